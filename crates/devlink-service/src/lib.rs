//! # devlink-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::requests::*;
pub use dto::responses::*;
pub use services::{
    AnalyticsService, AuthService, ConnectionService, MessageService, NotificationService,
    PostService, ProjectService, SearchKind, SearchService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, TaskService, UserService,
};
