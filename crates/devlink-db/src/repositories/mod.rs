//! PostgreSQL repository implementations

mod analytics;
mod connection;
mod conversation;
mod error;
mod notification;
mod post;
mod project;
mod task;
mod user;

pub use analytics::PgAnalyticsRepository;
pub use connection::PgConnectionRepository;
pub use conversation::PgConversationRepository;
pub use notification::PgNotificationRepository;
pub use post::PgPostRepository;
pub use project::PgProjectRepository;
pub use task::PgTaskRepository;
pub use user::PgUserRepository;
