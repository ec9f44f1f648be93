//! Comment entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::post::PostId;
use crate::domain::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CommentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: PostId,
    pub owner: UserId,
    pub content: String,
}

/// Comment on a post. Always belongs to exactly one parent post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    post_id: PostId,
    owner: UserId,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn from_new(id: CommentId, new_comment: NewComment) -> Self {
        let now = Utc::now();

        Self {
            id,
            post_id: new_comment.post_id,
            owner: new_comment.owner,
            content: new_comment.content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn restore(
        id: CommentId,
        post_id: PostId,
        owner: UserId,
        content: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            post_id,
            owner,
            content,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_keeps_parent_and_owner() {
        let comment = Comment::from_new(
            CommentId::new(9),
            NewComment {
                post_id: PostId::new(3),
                owner: UserId::new(4),
                content: "Nice".to_string(),
            },
        );

        assert_eq!(comment.id(), CommentId::new(9));
        assert_eq!(comment.post_id(), PostId::new(3));
        assert_eq!(comment.owner(), UserId::new(4));
        assert_eq!(comment.content(), "Nice");
    }

    #[test]
    fn test_set_content() {
        let mut comment = Comment::from_new(
            CommentId::new(1),
            NewComment {
                post_id: PostId::new(1),
                owner: UserId::new(1),
                content: "before".to_string(),
            },
        );
        let created = comment.created_at();

        std::thread::sleep(std::time::Duration::from_millis(10));
        comment.set_content("after");

        assert_eq!(comment.content(), "after");
        assert_eq!(comment.created_at(), created);
        assert!(comment.updated_at() > created);
    }
}
