//! HTTP request handlers organized by domain

pub mod analytics;
pub mod auth;
pub mod connections;
pub mod health;
pub mod messages;
pub mod notifications;
pub mod posts;
pub mod projects;
pub mod search;
pub mod tasks;
pub mod users;

use devlink_core::Snowflake;

use crate::response::ApiError;

/// Parse a snowflake path parameter
pub(crate) fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}
