use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discussion thread. Likes only ever go up; threads are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumThread {
    pub id: String,
    pub title: String,
    pub tag: String,
    pub created_at: DateTime<Utc>,
    pub author: String,
    pub body: String,
    pub likes: u64,
    /// Insertion order is display order.
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl ForumThread {
    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn reply_count(&self) -> usize {
        self.posts.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub body: String,
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    pub title: String,
    pub tag: String,
    pub body: String,
    /// Falls back to the configured guest label when absent.
    pub author: Option<String>,
}

impl NewThread {
    pub fn new(title: impl Into<String>, tag: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tag: tag.into(),
            body: body.into(),
            author: None,
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub body: String,
    pub author: Option<String>,
}

impl NewPost {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            author: None,
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}
