//! Analytics model mappers

use devlink_core::entities::AnalyticsEvent;
use devlink_core::traits::{DailyCount, KindCount};
use devlink_core::Snowflake;

use crate::models::{AnalyticsEventModel, DailyCountRow, KindCountRow};

impl From<AnalyticsEventModel> for AnalyticsEvent {
    fn from(model: AnalyticsEventModel) -> Self {
        AnalyticsEvent {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            project_id: model.project_id.map(Snowflake::new),
            kind: model.kind,
            data: model.data,
            created_at: model.created_at,
        }
    }
}

impl From<KindCountRow> for KindCount {
    fn from(row: KindCountRow) -> Self {
        KindCount {
            kind: row.kind,
            count: row.count,
        }
    }
}

impl From<DailyCountRow> for DailyCount {
    fn from(row: DailyCountRow) -> Self {
        DailyCount {
            day: row.day,
            count: row.count,
        }
    }
}
