//! Per-entity cache invalidation lists
//!
//! Every write path that touches a User, Post, Project, or Connection calls
//! the routine for that entity, which enumerates by hand every cache key that
//! could be derived from the changed row. There is no dependency tracking:
//! the lists below ARE the staleness contract, and adding a cached read path
//! means extending the matching list here.
//!
//! Invalidation failures are logged and swallowed. The cache is a disposable
//! mirror with TTL-bounded staleness, so a missed delete degrades freshness,
//! never correctness.

use devlink_core::Snowflake;
use tracing::{debug, warn};

use crate::keys;
use crate::pool::RedisPool;

/// Hand-enumerated invalidation routines, one per entity type
#[derive(Clone)]
pub struct Invalidation {
    pool: RedisPool,
}

impl Invalidation {
    /// Create a new invalidation helper
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// A user's profile or skills changed.
    ///
    /// Keys: profile, every page of their posts list (author summaries are
    /// denormalized into post responses), their connections list, and the
    /// user search sweep.
    pub async fn user_changed(&self, user_id: Snowflake) {
        self.delete(&keys::user_profile(user_id)).await;
        self.sweep(&keys::user_posts_pattern(user_id)).await;
        self.delete(&keys::user_connections(user_id)).await;
        self.sweep(&keys::search_pattern("users")).await;
    }

    /// A post, comment, or like owned by `author_id` changed.
    ///
    /// Keys: every page of the author's posts list and the post search sweep.
    pub async fn post_changed(&self, author_id: Snowflake) {
        self.sweep(&keys::user_posts_pattern(author_id)).await;
        self.sweep(&keys::search_pattern("posts")).await;
    }

    /// A project, its membership, its invitations, or its tasks changed.
    ///
    /// `related_user_ids` must name the owner and every member, whose project
    /// lists embed this project. Keys: the project's task board, each related
    /// user's project list pages, and the project search sweep.
    pub async fn project_changed(&self, project_id: Snowflake, related_user_ids: &[Snowflake]) {
        self.delete(&keys::project_tasks(project_id)).await;
        for user_id in related_user_ids {
            self.sweep(&keys::project_list_pattern(*user_id)).await;
        }
        self.sweep(&keys::search_pattern("projects")).await;
    }

    /// A connection between two users changed.
    ///
    /// Keys: both parties' connections lists.
    pub async fn connection_changed(&self, requester_id: Snowflake, receiver_id: Snowflake) {
        self.delete(&keys::user_connections(requester_id)).await;
        self.delete(&keys::user_connections(receiver_id)).await;
    }

    /// Analytics events were appended for a user.
    ///
    /// Keys: every cached summary window for that user.
    pub async fn analytics_changed(&self, user_id: Snowflake) {
        self.sweep(&keys::analytics_summary_pattern(user_id)).await;
    }

    async fn delete(&self, key: &str) {
        match self.pool.delete(key).await {
            Ok(deleted) => {
                if deleted {
                    debug!(key = %key, "Invalidated cache key");
                }
            }
            Err(e) => warn!(key = %key, error = %e, "Cache invalidation failed"),
        }
    }

    async fn sweep(&self, pattern: &str) {
        match self.pool.delete_pattern(pattern).await {
            Ok(count) if count > 0 => {
                debug!(pattern = %pattern, count, "Swept cache keys");
            }
            Ok(_) => {}
            Err(e) => warn!(pattern = %pattern, error = %e, "Cache sweep failed"),
        }
    }
}

impl std::fmt::Debug for Invalidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invalidation").finish_non_exhaustive()
    }
}
