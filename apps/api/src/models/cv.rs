use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvDocumentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub s3_key: String,
    pub score: i32,
    pub analysis: Value,
    pub created_at: DateTime<Utc>,
}
