//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AnalyticsRepository, ConnectionRepository, ConversationRepository, DailyCount, KindCount,
    NotificationRepository, Page, PostRepository, ProjectRepository, RepoResult, TaskRepository,
    UserRepository,
};
