//! Analytics service
//!
//! Appends event rows and computes daily/weekly rollups on read. Nothing is
//! maintained incrementally; the summary is a GROUP BY over the window plus
//! an in-process weekly fold, cached for 30 minutes.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use devlink_cache::keys;
use devlink_core::entities::AnalyticsEvent;
use devlink_core::traits::DailyCount;
use devlink_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::requests::RecordEventRequest;
use crate::dto::responses::{
    AnalyticsSummaryResponse, DailyCountResponse, KindCountResponse, WeeklyCountResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Default and maximum summary windows in days
const DEFAULT_WINDOW_DAYS: i64 = 30;
const MAX_WINDOW_DAYS: i64 = 365;

/// Analytics service
pub struct AnalyticsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AnalyticsService<'a> {
    /// Create a new AnalyticsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append an event row
    #[instrument(skip(self, request), fields(kind = %request.kind))]
    pub async fn record(
        &self,
        user_id: Snowflake,
        request: RecordEventRequest,
    ) -> ServiceResult<()> {
        let mut event = AnalyticsEvent::new(
            self.ctx.generate_id(),
            user_id,
            request.kind,
            request.data,
        );
        if let Some(project_id) = request.project_id {
            event = event.with_project(project_id);
        }

        self.ctx.analytics_repo().create(&event).await?;

        info!(event_id = %event.id, user_id = %user_id, "Analytics event recorded");

        self.ctx.invalidation().analytics_changed(user_id).await;

        Ok(())
    }

    /// Summary over the last `days` days (read-through cached)
    #[instrument(skip(self))]
    pub async fn summary(
        &self,
        user_id: Snowflake,
        days: Option<i64>,
    ) -> ServiceResult<AnalyticsSummaryResponse> {
        let days = days.unwrap_or(DEFAULT_WINDOW_DAYS).clamp(1, MAX_WINDOW_DAYS);

        let ctx = self.ctx;
        ctx.cache()
            .get_or_set(
                &keys::analytics_summary(user_id, days),
                keys::ANALYTICS_SUMMARY_TTL,
                || async move {
                    let since = Utc::now() - Duration::days(days);

                    let total_events = ctx.analytics_repo().count_since(user_id, since).await?;
                    let by_kind = ctx.analytics_repo().counts_by_kind(user_id, since).await?;
                    let daily = ctx.analytics_repo().daily_counts(user_id, since).await?;

                    let weekly = weekly_rollup(&daily);

                    Ok::<_, ServiceError>(AnalyticsSummaryResponse {
                        days,
                        total_events,
                        by_kind: by_kind
                            .into_iter()
                            .map(|k| KindCountResponse {
                                kind: k.kind,
                                count: k.count,
                            })
                            .collect(),
                        daily: daily
                            .into_iter()
                            .map(|d| DailyCountResponse {
                                day: d.day,
                                count: d.count,
                            })
                            .collect(),
                        weekly,
                    })
                },
            )
            .await
    }
}

/// Fold daily buckets into ISO weeks, keyed by the week's Monday
fn weekly_rollup(daily: &[DailyCount]) -> Vec<WeeklyCountResponse> {
    let mut weeks: Vec<WeeklyCountResponse> = Vec::new();

    for bucket in daily {
        let monday = week_start(bucket.day);
        match weeks.iter_mut().find(|w| w.week_start == monday) {
            Some(week) => week.count += bucket.count,
            None => weeks.push(WeeklyCountResponse {
                week_start: monday,
                count: bucket.count,
            }),
        }
    }

    weeks.sort_by_key(|w| w.week_start);
    weeks
}

/// Monday of the ISO week containing `day`
fn week_start(day: NaiveDate) -> NaiveDate {
    let offset = day.weekday().num_days_from_monday() as i64;
    day - Duration::days(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2026-08-05 is a Wednesday
        assert_eq!(week_start(date(2026, 8, 5)), date(2026, 8, 3));
        // Monday maps to itself
        assert_eq!(week_start(date(2026, 8, 3)), date(2026, 8, 3));
        // Sunday belongs to the preceding Monday's week
        assert_eq!(week_start(date(2026, 8, 9)), date(2026, 8, 3));
    }

    #[test]
    fn test_weekly_rollup_sums_days() {
        let daily = vec![
            DailyCount { day: date(2026, 8, 3), count: 2 },
            DailyCount { day: date(2026, 8, 5), count: 3 },
            DailyCount { day: date(2026, 8, 10), count: 7 },
        ];

        let weekly = weekly_rollup(&daily);
        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[0].week_start, date(2026, 8, 3));
        assert_eq!(weekly[0].count, 5);
        assert_eq!(weekly[1].week_start, date(2026, 8, 10));
        assert_eq!(weekly[1].count, 7);
    }

    #[test]
    fn test_weekly_rollup_empty() {
        assert!(weekly_rollup(&[]).is_empty());
    }
}
