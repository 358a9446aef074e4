use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailCampaignRow {
    pub id: Uuid,
    pub subject: String,
    pub recipient_count: i32,
    pub created_at: DateTime<Utc>,
}
