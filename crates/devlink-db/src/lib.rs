//! # devlink-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `devlink-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, ping, DatabaseConfig, PgPool};
pub use repositories::{
    PgAnalyticsRepository, PgConnectionRepository, PgConversationRepository,
    PgNotificationRepository, PgPostRepository, PgProjectRepository, PgTaskRepository,
    PgUserRepository,
};
