//! PostgreSQL implementation of AnalyticsRepository
//!
//! Rollups are computed on read with GROUP BY aggregation; nothing is
//! maintained incrementally.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use devlink_core::entities::AnalyticsEvent;
use devlink_core::traits::{AnalyticsRepository, DailyCount, KindCount, RepoResult};
use devlink_core::value_objects::Snowflake;

use crate::models::{DailyCountRow, KindCountRow};

use super::error::map_db_error;

/// PostgreSQL implementation of AnalyticsRepository
#[derive(Clone)]
pub struct PgAnalyticsRepository {
    pool: PgPool,
}

impl PgAnalyticsRepository {
    /// Create a new PgAnalyticsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    #[instrument(skip(self, event))]
    async fn create(&self, event: &AnalyticsEvent) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO analytics_events (id, user_id, project_id, kind, data, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(event.id.into_inner())
        .bind(event.user_id.into_inner())
        .bind(event.project_id.map(Snowflake::into_inner))
        .bind(&event.kind)
        .bind(&event.data)
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_since(&self, user_id: Snowflake, since: DateTime<Utc>) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM analytics_events WHERE user_id = $1 AND created_at >= $2",
        )
        .bind(user_id.into_inner())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn counts_by_kind(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<KindCount>> {
        let rows = sqlx::query_as::<_, KindCountRow>(
            r"
            SELECT kind, COUNT(*) AS count
            FROM analytics_events
            WHERE user_id = $1 AND created_at >= $2
            GROUP BY kind
            ORDER BY count DESC
            ",
        )
        .bind(user_id.into_inner())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(KindCount::from).collect())
    }

    #[instrument(skip(self))]
    async fn daily_counts(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<DailyCount>> {
        let rows = sqlx::query_as::<_, DailyCountRow>(
            r"
            SELECT DATE(created_at) AS day, COUNT(*) AS count
            FROM analytics_events
            WHERE user_id = $1 AND created_at >= $2
            GROUP BY day
            ORDER BY day ASC
            ",
        )
        .bind(user_id.into_inner())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(DailyCount::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgAnalyticsRepository>();
    }
}
