use crate::domain::error::DomainError;
use crate::domain::post::BlogPost;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: BlogPost) -> Result<BlogPost, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, DomainError>;
    /// Overwrites the stored row. Returns `None` when the post no longer exists.
    async fn update(&self, post: BlogPost) -> Result<Option<BlogPost>, DomainError>;
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    /// Newest `published_at` first.
    async fn list(&self, include_inactive: bool) -> Result<Vec<BlogPost>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: BlogPost) -> Result<BlogPost, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO blog_posts
                (id, title, url, description, published_at, is_active, is_pinned, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.url)
        .bind(&post.description)
        .bind(post.published_at)
        .bind(post.is_active)
        .bind(post.is_pinned)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create post: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, DomainError> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, url, description, published_at, is_active, is_pinned, created_at, updated_at
            FROM blog_posts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn update(&self, post: BlogPost) -> Result<Option<BlogPost>, DomainError> {
        let updated = sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts
            SET
                title = $2,
                url = $3,
                description = $4,
                published_at = $5,
                is_active = $6,
                is_pinned = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING id, title, url, description, published_at, is_active, is_pinned, created_at, updated_at
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.url)
        .bind(&post.description)
        .bind(post.published_at)
        .bind(post.is_active)
        .bind(post.is_pinned)
        .bind(post.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update post {}: {}", post.id, e);
            DomainError::Internal(e.to_string())
        })?;

        if updated.is_some() {
            info!(post_id = %post.id, "post updated");
        }

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete post {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(post_id = %id, "post deleted");
        }
        Ok(removed)
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<BlogPost>, DomainError> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, url, description, published_at, is_active, is_pinned, created_at, updated_at
            FROM blog_posts
            WHERE is_active OR $1
            ORDER BY published_at DESC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching posts: {}", e);
            DomainError::Internal(e.to_string())
        })
    }
}
