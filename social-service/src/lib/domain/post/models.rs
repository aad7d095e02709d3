use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::post::errors::ContentError;
use crate::domain::post::errors::PostError;
use crate::domain::post::errors::PostIdError;
use crate::domain::user::models::UserId;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// # Errors
            /// * `InvalidFormat` - String is not a valid UUID
            pub fn from_string(s: &str) -> Result<Self, PostIdError> {
                Uuid::parse_str(s)
                    .map($name)
                    .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(
    /// Post unique identifier type
    PostId
);
uuid_id!(
    /// Comment unique identifier type
    CommentId
);
uuid_id!(
    /// Like unique identifier type
    LikeId
);

/// Text body of a post or comment.
///
/// Ensures the body is non-blank and at most 5000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content(String);

impl Content {
    const MAX_LENGTH: usize = 5000;

    /// # Errors
    /// * `Empty` - Body is empty or whitespace only
    /// * `TooLong` - Body longer than 5000 characters
    pub fn new(body: String) -> Result<Self, ContentError> {
        if body.trim().is_empty() {
            return Err(ContentError::Empty);
        }
        let length = body.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ContentError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(body))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post aggregate entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub body: Content,
    pub user_id: UserId,
    /// Filled in by the image task once generation succeeds.
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub body: Content,
    pub post_id: PostId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Like {
    pub id: LikeId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Post together with its like count.
#[derive(Debug, Clone, PartialEq)]
pub struct PostWithLikes {
    pub post: Post,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostWithComments {
    pub post: PostWithLikes,
    pub comments: Vec<Comment>,
}

/// Ordering for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSorting {
    #[default]
    New,
    Old,
    MostLikes,
}

impl FromStr for PostSorting {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(PostSorting::New),
            "old" => Ok(PostSorting::Old),
            "most_likes" => Ok(PostSorting::MostLikes),
            other => Err(PostError::InvalidSorting(other.to_string())),
        }
    }
}

/// Command to publish a post
#[derive(Debug)]
pub struct CreatePostCommand {
    pub body: Content,
}

/// Command to comment on a post
#[derive(Debug)]
pub struct CreateCommentCommand {
    pub body: Content,
    pub post_id: PostId,
}
