//! PostgreSQL post repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::post::{NewPost, Post, PostId, PostRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

const POST_COLUMNS: &str = "id, owner_id, title, content, liked_by, created_at, updated_at";

/// PostgreSQL implementation of PostRepository
#[derive(Debug, Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let now = Utc::now();

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO posts (owner_id, title, content, liked_by, created_at, updated_at)
            VALUES ($1, $2, $3, '{{}}', $4, $4)
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(post.owner.value())
        .bind(&post.title)
        .bind(&post.content)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create post: {}", e)))?;

        row_to_post(&row)
    }

    async fn get(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get post: {}", e)))?;

        row.as_ref().map(row_to_post).transpose()
    }

    async fn update(&self, post: &Post) -> Result<Post, DomainError> {
        // liked_by is only ever written by add_like
        let row = sqlx::query(&format!(
            r#"
            UPDATE posts
            SET title = $2, content = $3, updated_at = $4
            WHERE id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(post.id().value())
        .bind(post.title())
        .bind(post.content())
        .bind(post.updated_at())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update post: {}", e)))?;

        match row {
            Some(row) => row_to_post(&row),
            None => Err(DomainError::not_found(format!("Post '{}' not found", post.id()))),
        }
    }

    async fn delete(&self, id: PostId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete post: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_newest_first(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM posts ORDER BY created_at DESC, id DESC",
            POST_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list posts: {}", e)))?;

        rows.iter().map(row_to_post).collect()
    }

    async fn add_like(&self, id: PostId, user: UserId) -> Result<Option<usize>, DomainError> {
        let count: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE posts
            SET liked_by = CASE
                    WHEN $2 = ANY(liked_by) THEN liked_by
                    ELSE array_append(liked_by, $2)
                END,
                updated_at = CASE
                    WHEN $2 = ANY(liked_by) THEN updated_at
                    ELSE $3
                END
            WHERE id = $1
            RETURNING cardinality(liked_by)
            "#,
        )
        .bind(id.value())
        .bind(user.value())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to like post: {}", e)))?;

        Ok(count.map(|c| c as usize))
    }
}

fn row_to_post(row: &PgRow) -> Result<Post, DomainError> {
    let column = |e: sqlx::Error| DomainError::storage(format!("Invalid post row: {}", e));

    let id: i64 = row.try_get("id").map_err(column)?;
    let owner_id: i64 = row.try_get("owner_id").map_err(column)?;
    let title: String = row.try_get("title").map_err(column)?;
    let content: String = row.try_get("content").map_err(column)?;
    let liked_by: Vec<i64> = row.try_get("liked_by").map_err(column)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(column)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(column)?;

    Ok(Post::restore(
        PostId::new(id),
        UserId::new(owner_id),
        title,
        content,
        liked_by.into_iter().map(UserId::new),
        created_at,
        updated_at,
    ))
}
