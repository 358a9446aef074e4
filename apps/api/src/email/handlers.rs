//! Axum route handlers for admin email campaigns.

use std::collections::HashSet;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::email::transport::OutboundEmail;
use crate::errors::AppError;
use crate::models::campaign::EmailCampaignRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CampaignRequest {
    pub subject: String,
    pub html_body: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TestEmailRequest {
    pub subject: String,
    pub html_body: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    pub campaign_id: Uuid,
    pub queued: usize,
}

/// POST /api/v1/admin/email-campaigns
///
/// Records the campaign and hands every recipient to the rate-limited mail
/// queue. Returns as soon as the emails are queued.
pub async fn handle_send_campaign(
    State(state): State<AppState>,
    Json(request): Json<CampaignRequest>,
) -> Result<Json<CampaignResponse>, AppError> {
    validate_content(&request.subject, &request.html_body)?;
    let recipients = normalize_recipients(&request.recipients)?;

    let campaign_id = Uuid::new_v4();
    sqlx::query("INSERT INTO email_campaigns (id, subject, recipient_count) VALUES ($1, $2, $3)")
        .bind(campaign_id)
        .bind(&request.subject)
        .bind(recipients.len() as i32)
        .execute(&state.db)
        .await?;

    for to in &recipients {
        state.mailer.enqueue(OutboundEmail {
            to: to.clone(),
            subject: request.subject.clone(),
            html: request.html_body.clone(),
        })?;
    }

    info!(
        "Queued campaign {campaign_id} to {} recipients",
        recipients.len()
    );

    Ok(Json(CampaignResponse {
        campaign_id,
        queued: recipients.len(),
    }))
}

/// POST /api/v1/admin/email-campaigns/test
///
/// Sends one preview through the mail queue and waits for delivery, so the
/// admin sees provider errors before launching a campaign.
pub async fn handle_send_test_email(
    State(state): State<AppState>,
    Json(request): Json<TestEmailRequest>,
) -> Result<StatusCode, AppError> {
    validate_content(&request.subject, &request.html_body)?;
    let to = normalize_recipients(std::slice::from_ref(&request.to))?.remove(0);

    state
        .mailer
        .send(OutboundEmail {
            to,
            subject: request.subject,
            html: request.html_body,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/email-campaigns
pub async fn handle_list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmailCampaignRow>>, AppError> {
    let rows = sqlx::query_as::<_, EmailCampaignRow>(
        "SELECT * FROM email_campaigns ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

fn validate_content(subject: &str, html_body: &str) -> Result<(), AppError> {
    if subject.trim().is_empty() {
        return Err(AppError::Validation("subject cannot be empty".to_string()));
    }
    if html_body.trim().is_empty() {
        return Err(AppError::Validation("html_body cannot be empty".to_string()));
    }
    Ok(())
}

/// Trims recipients and drops case-insensitive duplicates, keeping the first
/// spelling. Rejects an empty list and anything without an `@`.
pub fn normalize_recipients(recipients: &[String]) -> Result<Vec<String>, AppError> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for raw in recipients {
        let address = raw.trim();
        if !address.contains('@') {
            return Err(AppError::Validation(format!(
                "Invalid recipient address '{address}'"
            )));
        }
        if seen.insert(address.to_lowercase()) {
            unique.push(address.to_string());
        }
    }

    if unique.is_empty() {
        return Err(AppError::Validation(
            "At least one recipient is required".to_string(),
        ));
    }
    Ok(unique)
}
