use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerAssessmentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub answers: Value,
    pub career_id: String,
    pub sector: String,
    pub match_score: f64,
    pub confidence: f64,
    pub top_match: Value,
    pub created_at: DateTime<Utc>,
}
