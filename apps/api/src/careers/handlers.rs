//! Axum route handlers for the Careers API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::careers::answers::CareerAnswers;
use crate::careers::catalog::{CareerDefinition, Sector};
use crate::careers::matcher::{generate_career_matches, MatchResult};
use crate::errors::AppError;
use crate::models::assessment::CareerAssessmentRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    /// When set, the top match is stored as a career assessment for this user.
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub answers: CareerAnswers,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
    pub assessment_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub sectors: Vec<Sector>,
    pub career_count: usize,
}

#[derive(Debug, Serialize)]
pub struct CareerResponse {
    pub sector: String,
    pub career: CareerDefinition,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/careers/catalog
pub async fn handle_get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        sectors: state.catalog.sectors().to_vec(),
        career_count: state.catalog.career_count(),
    })
}

/// GET /api/v1/careers/catalog/:id
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CareerResponse>, AppError> {
    let (sector, career) = state
        .catalog
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("Career {id} not found")))?;

    Ok(Json(CareerResponse {
        sector: sector.to_string(),
        career: career.clone(),
    }))
}

/// POST /api/v1/careers/match
///
/// Ranks every catalog career against the submitted quiz answers.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let matches = generate_career_matches(&request.answers, &state.catalog);

    let assessment_id = match (request.user_id, matches.first()) {
        (Some(user_id), Some(top)) => {
            Some(save_assessment(&state.db, user_id, &request.answers, top).await?)
        }
        _ => None,
    };

    Ok(Json(MatchResponse {
        matches,
        assessment_id,
    }))
}

/// GET /api/v1/careers/assessments?user_id=
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CareerAssessmentRow>>, AppError> {
    let rows = sqlx::query_as::<_, CareerAssessmentRow>(
        "SELECT * FROM career_assessments WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

async fn save_assessment(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    answers: &CareerAnswers,
    top: &MatchResult,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    let answers_json = serde_json::to_value(answers).map_err(anyhow::Error::from)?;
    let top_json = serde_json::to_value(top).map_err(anyhow::Error::from)?;

    sqlx::query(
        r#"
        INSERT INTO career_assessments
            (id, user_id, answers, career_id, sector, match_score, confidence, top_match)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(answers_json)
    .bind(&top.career.id)
    .bind(&top.sector)
    .bind(top.match_score)
    .bind(top.confidence)
    .bind(top_json)
    .execute(pool)
    .await?;

    info!(
        "Stored career assessment {id} for user {user_id}: {} ({:.2})",
        top.career.id, top.match_score
    );
    Ok(id)
}
