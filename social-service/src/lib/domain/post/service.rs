use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CommentId;
use crate::domain::post::models::CreateCommentCommand;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Like;
use crate::domain::post::models::LikeId;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostSorting;
use crate::domain::post::models::PostWithComments;
use crate::domain::post::models::PostWithLikes;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for posts, comments and likes.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    async fn ensure_post_exists(&self, id: PostId) -> Result<Post, PostError> {
        self.repository
            .find_post(id)
            .await?
            .ok_or(PostError::NotFound(id))
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        command: CreatePostCommand,
        author: UserId,
    ) -> Result<Post, PostError> {
        let post = Post {
            id: PostId::new(),
            body: command.body,
            user_id: author,
            image_url: None,
            created_at: Utc::now(),
        };

        let created = self.repository.create_post(post).await?;
        tracing::info!(post_id = %created.id, user_id = %author, "Post created");

        Ok(created)
    }

    async fn list_posts(&self, sorting: PostSorting) -> Result<Vec<PostWithLikes>, PostError> {
        self.repository.list_posts_with_likes(sorting).await
    }

    async fn get_post(&self, id: PostId) -> Result<PostWithComments, PostError> {
        let post = self
            .repository
            .find_post_with_likes(id)
            .await?
            .ok_or(PostError::NotFound(id))?;
        let comments = self.repository.find_comments(id).await?;

        Ok(PostWithComments { post, comments })
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, PostError> {
        self.ensure_post_exists(post_id).await?;
        self.repository.find_comments(post_id).await
    }

    async fn create_comment(
        &self,
        command: CreateCommentCommand,
        author: UserId,
    ) -> Result<Comment, PostError> {
        self.ensure_post_exists(command.post_id).await?;

        let comment = Comment {
            id: CommentId::new(),
            body: command.body,
            post_id: command.post_id,
            user_id: author,
            created_at: Utc::now(),
        };

        self.repository.create_comment(comment).await
    }

    async fn like_post(&self, post_id: PostId, user_id: UserId) -> Result<Like, PostError> {
        self.ensure_post_exists(post_id).await?;

        let like = Like {
            id: LikeId::new(),
            post_id,
            user_id,
            created_at: Utc::now(),
        };

        self.repository.create_like(like).await
    }
}
