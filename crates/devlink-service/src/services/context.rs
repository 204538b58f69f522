//! Service context - dependency container for services
//!
//! Holds all repositories, cache primitives, and other dependencies needed by
//! services.

use std::sync::Arc;

use devlink_cache::{CacheStore, Invalidation, RefreshTokenStore, SharedRedisPool};
use devlink_common::auth::JwtService;
use devlink_core::traits::{
    AnalyticsRepository, ConnectionRepository, ConversationRepository, NotificationRepository,
    PostRepository, ProjectRepository, TaskRepository, UserRepository,
};
use devlink_core::SnowflakeGenerator;
use devlink_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The read-through cache store and invalidation lists
/// - JWT service for authentication
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    project_repo: Arc<dyn ProjectRepository>,
    task_repo: Arc<dyn TaskRepository>,
    connection_repo: Arc<dyn ConnectionRepository>,
    conversation_repo: Arc<dyn ConversationRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    analytics_repo: Arc<dyn AnalyticsRepository>,

    // Cache primitives
    cache: CacheStore,
    invalidation: Invalidation,
    refresh_token_store: RefreshTokenStore,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        task_repo: Arc<dyn TaskRepository>,
        connection_repo: Arc<dyn ConnectionRepository>,
        conversation_repo: Arc<dyn ConversationRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        analytics_repo: Arc<dyn AnalyticsRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        // Clone the inner RedisPool from the Arc
        let inner_pool = (*redis_pool).clone();
        let cache = CacheStore::new(inner_pool.clone());
        let invalidation = Invalidation::new(inner_pool.clone());
        let refresh_token_store = RefreshTokenStore::new(inner_pool);

        Self {
            pool,
            redis_pool,
            user_repo,
            post_repo,
            project_repo,
            task_repo,
            connection_repo,
            conversation_repo,
            notification_repo,
            analytics_repo,
            cache,
            invalidation,
            refresh_token_store,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the project repository
    pub fn project_repo(&self) -> &dyn ProjectRepository {
        self.project_repo.as_ref()
    }

    /// Get the task repository
    pub fn task_repo(&self) -> &dyn TaskRepository {
        self.task_repo.as_ref()
    }

    /// Get the connection repository
    pub fn connection_repo(&self) -> &dyn ConnectionRepository {
        self.connection_repo.as_ref()
    }

    /// Get the conversation repository
    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.conversation_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Get the analytics repository
    pub fn analytics_repo(&self) -> &dyn AnalyticsRepository {
        self.analytics_repo.as_ref()
    }

    // === Cache ===

    /// Get the read-through cache store
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Get the per-entity invalidation lists
    pub fn invalidation(&self) -> &Invalidation {
        &self.invalidation
    }

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> devlink_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    project_repo: Option<Arc<dyn ProjectRepository>>,
    task_repo: Option<Arc<dyn TaskRepository>>,
    connection_repo: Option<Arc<dyn ConnectionRepository>>,
    conversation_repo: Option<Arc<dyn ConversationRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    analytics_repo: Option<Arc<dyn AnalyticsRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn project_repo(mut self, repo: Arc<dyn ProjectRepository>) -> Self {
        self.project_repo = Some(repo);
        self
    }

    pub fn task_repo(mut self, repo: Arc<dyn TaskRepository>) -> Self {
        self.task_repo = Some(repo);
        self
    }

    pub fn connection_repo(mut self, repo: Arc<dyn ConnectionRepository>) -> Self {
        self.connection_repo = Some(repo);
        self
    }

    pub fn conversation_repo(mut self, repo: Arc<dyn ConversationRepository>) -> Self {
        self.conversation_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn analytics_repo(mut self, repo: Arc<dyn AnalyticsRepository>) -> Self {
        self.analytics_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool.ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.redis_pool.ok_or_else(|| ServiceError::validation("redis_pool is required"))?,
            self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.post_repo.ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            self.project_repo.ok_or_else(|| ServiceError::validation("project_repo is required"))?,
            self.task_repo.ok_or_else(|| ServiceError::validation("task_repo is required"))?,
            self.connection_repo.ok_or_else(|| ServiceError::validation("connection_repo is required"))?,
            self.conversation_repo.ok_or_else(|| ServiceError::validation("conversation_repo is required"))?,
            self.notification_repo.ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            self.analytics_repo.ok_or_else(|| ServiceError::validation("analytics_repo is required"))?,
            self.jwt_service.ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}
