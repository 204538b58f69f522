//! Model to entity mappers
//!
//! This module provides conversions from database models to domain entities
//! (`From<Model> for Entity`), including parsing of string-typed enum
//! columns. Unknown enum strings fall back to a safe default rather than
//! failing the whole row.

mod analytics;
mod connection;
mod conversation;
mod notification;
mod post;
mod project;
mod task;
mod user;
