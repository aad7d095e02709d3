use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CommentId;
use crate::domain::post::models::Content;
use crate::domain::post::models::Like;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostSorting;
use crate::domain::post::models::PostWithLikes;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;

const SELECT_POSTS_WITH_LIKES: &str = r#"
    SELECT posts.id, posts.body, posts.user_id, posts.image_url, posts.created_at,
           COUNT(likes.id) AS likes
    FROM posts
    LEFT JOIN likes ON likes.post_id = posts.id
"#;

#[derive(Debug, FromRow)]
struct PostRow {
    id: Uuid,
    body: String,
    user_id: Uuid,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = PostError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId(row.id),
            body: Content::new(row.body)?,
            user_id: UserId(row.user_id),
            image_url: row.image_url,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct PostWithLikesRow {
    #[sqlx(flatten)]
    post: PostRow,
    likes: i64,
}

impl TryFrom<PostWithLikesRow> for PostWithLikes {
    type Error = PostError;

    fn try_from(row: PostWithLikesRow) -> Result<Self, Self::Error> {
        Ok(PostWithLikes {
            post: Post::try_from(row.post)?,
            likes: row.likes,
        })
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: Uuid,
    body: String,
    post_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = PostError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId(row.id),
            body: Content::new(row.body)?,
            post_id: PostId(row.post_id),
            user_id: UserId(row.user_id),
            created_at: row.created_at,
        })
    }
}

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> PostError {
    PostError::DatabaseError(e.to_string())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, post: Post) -> Result<Post, PostError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, body, user_id, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(post.id.0)
        .bind(post.body.as_str())
        .bind(post.user_id.0)
        .bind(post.image_url.as_deref())
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(post)
    }

    async fn find_post(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, body, user_id, image_url, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Post::try_from).transpose()
    }

    async fn find_post_with_likes(&self, id: PostId) -> Result<Option<PostWithLikes>, PostError> {
        let query = format!(
            "{} WHERE posts.id = $1 GROUP BY posts.id",
            SELECT_POSTS_WITH_LIKES
        );

        let row = sqlx::query_as::<_, PostWithLikesRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(PostWithLikes::try_from).transpose()
    }

    async fn list_posts_with_likes(
        &self,
        sorting: PostSorting,
    ) -> Result<Vec<PostWithLikes>, PostError> {
        let order_by = match sorting {
            PostSorting::New => "posts.created_at DESC",
            PostSorting::Old => "posts.created_at ASC",
            PostSorting::MostLikes => "likes DESC, posts.created_at DESC",
        };
        let query = format!(
            "{} GROUP BY posts.id ORDER BY {}",
            SELECT_POSTS_WITH_LIKES, order_by
        );

        let rows = sqlx::query_as::<_, PostWithLikesRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(PostWithLikes::try_from).collect()
    }

    async fn set_image_url(&self, id: PostId, image_url: &str) -> Result<(), PostError> {
        let result = sqlx::query("UPDATE posts SET image_url = $2 WHERE id = $1")
            .bind(id.0)
            .bind(image_url)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id));
        }

        Ok(())
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, PostError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, body, post_id, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id.0)
        .bind(comment.body.as_str())
        .bind(comment.post_id.0)
        .bind(comment.user_id.0)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation()
                    && db_err.constraint() == Some("comments_post_id_fkey")
                {
                    return PostError::NotFound(comment.post_id);
                }
            }
            database_error(e)
        })?;

        Ok(comment)
    }

    async fn find_comments(&self, post_id: PostId) -> Result<Vec<Comment>, PostError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, body, post_id, user_id, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(post_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Comment::try_from).collect()
    }

    async fn create_like(&self, like: Like) -> Result<Like, PostError> {
        sqlx::query(
            r#"
            INSERT INTO likes (id, post_id, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(like.id.0)
        .bind(like.post_id.0)
        .bind(like.user_id.0)
        .bind(like.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("likes_post_id_user_id_key")
                {
                    return PostError::AlreadyLiked {
                        post_id: like.post_id,
                        user_id: like.user_id,
                    };
                }
                if db_err.is_foreign_key_violation()
                    && db_err.constraint() == Some("likes_post_id_fkey")
                {
                    return PostError::NotFound(like.post_id);
                }
            }
            database_error(e)
        })?;

        Ok(like)
    }
}
