// File: wardrobot-common/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of days a wash takes when the owner has not configured one.
pub const DEFAULT_WASHING_TIME_DAYS: i64 = 1;

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct WardrobeUser {
    pub user_id: Uuid,
    pub username: String,
    /// Configured wash duration in days; `None` falls back to
    /// [`DEFAULT_WASHING_TIME_DAYS`].
    pub washing_time_days: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl WardrobeUser {
    pub fn washing_time_days(&self) -> i64 {
        self.washing_time_days.unwrap_or(DEFAULT_WASHING_TIME_DAYS)
    }
}
