//! PostgreSQL comment repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::comment::{Comment, CommentId, CommentRepository, NewComment};
use crate::domain::post::PostId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

const COMMENT_COLUMNS: &str = "id, post_id, owner_id, content, created_at, updated_at";

/// PostgreSQL implementation of CommentRepository
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, DomainError> {
        let now = Utc::now();

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO comments (post_id, owner_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {}
            "#,
            COMMENT_COLUMNS
        ))
        .bind(comment.post_id.value())
        .bind(comment.owner.value())
        .bind(&comment.content)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let missing_post = e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation());

            if missing_post {
                DomainError::not_found(format!("Post '{}' not found", comment.post_id))
            } else {
                DomainError::storage(format!("Failed to create comment: {}", e))
            }
        })?;

        row_to_comment(&row)
    }

    async fn get(&self, post_id: PostId, id: CommentId) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM comments WHERE id = $1 AND post_id = $2",
            COMMENT_COLUMNS
        ))
        .bind(id.value())
        .bind(post_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get comment: {}", e)))?;

        row.as_ref().map(row_to_comment).transpose()
    }

    async fn update(&self, comment: &Comment) -> Result<Comment, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET content = $3, updated_at = $4
            WHERE id = $1 AND post_id = $2
            "#,
        )
        .bind(comment.id().value())
        .bind(comment.post_id().value())
        .bind(comment.content())
        .bind(comment.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update comment: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Comment '{}' not found",
                comment.id()
            )));
        }

        Ok(comment.clone())
    }

    async fn delete(&self, post_id: PostId, id: CommentId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND post_id = $2")
            .bind(id.value())
            .bind(post_id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete comment: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM comments WHERE post_id = $1 ORDER BY created_at DESC, id DESC",
            COMMENT_COLUMNS
        ))
        .bind(post_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list comments: {}", e)))?;

        rows.iter().map(row_to_comment).collect()
    }

    async fn delete_for_post(&self, post_id: PostId) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(post_id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete comments: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}

fn row_to_comment(row: &PgRow) -> Result<Comment, DomainError> {
    let column = |e: sqlx::Error| DomainError::storage(format!("Invalid comment row: {}", e));

    let id: i64 = row.try_get("id").map_err(column)?;
    let post_id: i64 = row.try_get("post_id").map_err(column)?;
    let owner_id: i64 = row.try_get("owner_id").map_err(column)?;
    let content: String = row.try_get("content").map_err(column)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(column)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(column)?;

    Ok(Comment::restore(
        CommentId::new(id),
        PostId::new(post_id),
        UserId::new(owner_id),
        content,
        created_at,
        updated_at,
    ))
}
