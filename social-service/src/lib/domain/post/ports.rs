use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CreateCommentCommand;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Like;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostSorting;
use crate::domain::post::models::PostWithComments;
use crate::domain::post::models::PostWithLikes;
use crate::domain::user::models::UserId;

/// Port for post, comment and like operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Publish a post authored by `author`.
    async fn create_post(
        &self,
        command: CreatePostCommand,
        author: UserId,
    ) -> Result<Post, PostError>;

    /// List every post with its like count in the requested order.
    async fn list_posts(&self, sorting: PostSorting) -> Result<Vec<PostWithLikes>, PostError>;

    /// Retrieve a post with its like count and comments.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn get_post(&self, id: PostId) -> Result<PostWithComments, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn create_comment(
        &self,
        command: CreateCommentCommand,
        author: UserId,
    ) -> Result<Comment, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `AlreadyLiked` - User already liked this post
    async fn like_post(&self, post_id: PostId, user_id: UserId) -> Result<Like, PostError>;
}

/// Persistence operations for posts and their comments and likes.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create_post(&self, post: Post) -> Result<Post, PostError>;

    /// Optional post (None if not found)
    async fn find_post(&self, id: PostId) -> Result<Option<Post>, PostError>;

    async fn find_post_with_likes(&self, id: PostId) -> Result<Option<PostWithLikes>, PostError>;

    async fn list_posts_with_likes(
        &self,
        sorting: PostSorting,
    ) -> Result<Vec<PostWithLikes>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn set_image_url(&self, id: PostId, image_url: &str) -> Result<(), PostError>;

    async fn create_comment(&self, comment: Comment) -> Result<Comment, PostError>;

    /// Comments of a post, oldest first.
    async fn find_comments(&self, post_id: PostId) -> Result<Vec<Comment>, PostError>;

    /// # Errors
    /// * `AlreadyLiked` - A like by this user on this post is already stored
    async fn create_like(&self, like: Like) -> Result<Like, PostError>;
}
