use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::post::models::Comment;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostWithLikes;
use crate::domain::user::models::User;

/// Public view of a user; never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub confirmed: bool,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            confirmed: user.confirmed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    pub id: String,
    pub body: String,
    pub user_id: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            body: post.body.as_str().to_string(),
            user_id: post.user_id.to_string(),
            image_url: post.image_url.clone(),
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostWithLikesData {
    #[serde(flatten)]
    pub post: PostData,
    pub likes: i64,
}

impl From<&PostWithLikes> for PostWithLikesData {
    fn from(post: &PostWithLikes) -> Self {
        Self {
            post: (&post.post).into(),
            likes: post.likes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentData {
    pub id: String,
    pub body: String,
    pub post_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentData {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            body: comment.body.as_str().to_string(),
            post_id: comment.post_id.to_string(),
            user_id: comment.user_id.to_string(),
            created_at: comment.created_at,
        }
    }
}
