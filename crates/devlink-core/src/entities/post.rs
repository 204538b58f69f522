//! Post entity - feed content with comments and likes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Kind of feed post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostKind {
    Text,
    Media,
    Code,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Media => "MEDIA",
            Self::Code => "CODE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TEXT" => Some(Self::Text),
            "MEDIA" => Some(Self::Media),
            "CODE" => Some(Self::Code),
            _ => None,
        }
    }
}

/// Feed post authored by one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub kind: PostKind,
    pub content: String,
    pub code_snippet: Option<String>,
    pub language: Option<String>,
    pub media_urls: Vec<String>,
    /// Set the first time the content is updated, never cleared
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(id: Snowflake, author_id: Snowflake, kind: PostKind, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            kind,
            content,
            code_snippet: None,
            language: None,
            media_urls: Vec::new(),
            is_edited: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user is the post author
    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }
}

/// Comment on a post; `parent_id` allows nested replies of arbitrary depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            post_id,
            author_id,
            parent_id: None,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_parent(mut self, parent_id: Snowflake) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }
}

/// Like on a post, unique per (post, user) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(post_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            post_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_kind_roundtrip() {
        for kind in [PostKind::Text, PostKind::Media, PostKind::Code] {
            assert_eq!(PostKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(PostKind::parse("VIDEO"), None);
    }

    #[test]
    fn test_post_authorship() {
        let post = Post::new(
            Snowflake::new(1),
            Snowflake::new(100),
            PostKind::Text,
            "hello".to_string(),
        );
        assert!(post.is_author(Snowflake::new(100)));
        assert!(!post.is_author(Snowflake::new(200)));
        assert!(!post.is_edited);
    }

    #[test]
    fn test_comment_with_parent() {
        let comment = Comment::new(
            Snowflake::new(2),
            Snowflake::new(1),
            Snowflake::new(100),
            "reply".to_string(),
        )
        .with_parent(Snowflake::new(1));
        assert_eq!(comment.parent_id, Some(Snowflake::new(1)));
    }
}
