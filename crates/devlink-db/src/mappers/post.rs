//! Post, comment, and like model mappers

use devlink_core::entities::{Comment, Like, Post, PostKind};
use devlink_core::Snowflake;

use crate::models::{CommentModel, LikeModel, PostModel};

/// Decode a JSONB array column into a vector of strings
fn media_urls_from_json(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|urls| {
            urls.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            kind: PostKind::parse(&model.kind).unwrap_or(PostKind::Text),
            content: model.content,
            code_snippet: model.code_snippet,
            language: model.language,
            media_urls: media_urls_from_json(&model.media_urls),
            is_edited: model.is_edited,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            author_id: Snowflake::new(model.author_id),
            parent_id: model.parent_id.map(Snowflake::new),
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<LikeModel> for Like {
    fn from(model: LikeModel) -> Self {
        Like {
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_urls_decoding() {
        let value = json!(["https://cdn.example.com/a.png", "https://cdn.example.com/b.png"]);
        let urls = media_urls_from_json(&value);
        assert_eq!(urls.len(), 2);

        assert!(media_urls_from_json(&json!(null)).is_empty());
        assert!(media_urls_from_json(&json!({})).is_empty());
    }
}
