//! Post entity and the like-set it carries

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Store-assigned post identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PostId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Post data before the store assigns an id
#[derive(Debug, Clone)]
pub struct NewPost {
    pub owner: UserId,
    pub title: String,
    pub content: String,
}

/// Blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
    owner: UserId,
    liked_by: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Post {
    /// Materialize a new post; its like-set starts empty
    pub fn from_new(id: PostId, new_post: NewPost) -> Self {
        let now = Utc::now();

        Self {
            id,
            title: new_post.title,
            content: new_post.content,
            owner: new_post.owner,
            liked_by: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a post from persisted columns
    pub fn restore(
        id: PostId,
        owner: UserId,
        title: String,
        content: String,
        liked_by: impl IntoIterator<Item = UserId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            owner,
            liked_by: liked_by.into_iter().collect(),
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn liked_by(&self) -> &BTreeSet<UserId> {
        &self.liked_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    pub fn is_liked_by(&self, user: UserId) -> bool {
        self.liked_by.contains(&user)
    }

    /// Record a like from `user`. Returns false if it was already recorded.
    pub fn add_like(&mut self, user: UserId) -> bool {
        let added = self.liked_by.insert(user);

        if added {
            self.touch();
        }

        added
    }

    /// Replace title and content
    pub fn edit(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
