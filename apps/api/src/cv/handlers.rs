//! Axum route handlers for the CV API.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cv::analysis::{analyze_cv, CvAnalysis};
use crate::cv::extract::{extract_text, DocumentKind};
use crate::cv::store::{list_cvs, store_cv, StoreParams};
use crate::errors::AppError;
use crate::models::cv::CvDocumentRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub document_id: Uuid,
    pub s3_key: String,
    pub analysis: CvAnalysis,
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

/// POST /api/v1/cv/analyze
///
/// Scores CV text without storing anything.
pub async fn handle_analyze(
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<CvAnalysis>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    let text = request.text;
    let analysis = run_blocking("CV analysis", move || Ok(analyze_cv(&text))).await?;
    Ok(Json(analysis))
}

/// POST /api/v1/cv/upload (multipart: `user_id`, `file`)
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("user_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid user_id field: {e}")))?;
                let id = Uuid::parse_str(text.trim())
                    .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?;
                user_id = Some(id);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("cv").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read file: {e}")))?;
                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
    let file = file.ok_or_else(|| AppError::Validation("file is required".to_string()))?;
    if file.bytes.is_empty() {
        return Err(AppError::Validation("file is empty".to_string()));
    }

    let kind = DocumentKind::detect(&file.file_name, file.content_type.as_deref()).ok_or_else(
        || AppError::Validation("Only PDF and plain-text CVs are supported".to_string()),
    )?;

    let bytes = file.bytes.clone();
    let analysis = run_blocking("CV extraction", move || {
        let text = extract_text(kind, &bytes)?;
        Ok(analyze_cv(&text))
    })
    .await?;

    let row = store_cv(
        &state.db,
        &state.s3,
        &state.config.s3_bucket,
        StoreParams {
            user_id,
            file_name: &file.file_name,
            kind,
            bytes: file.bytes.clone(),
            analysis: &analysis,
        },
    )
    .await?;

    Ok(Json(UploadResponse {
        document_id: row.id,
        s3_key: row.s3_key,
        analysis,
    }))
}

/// PDF parsing and the regex passes are CPU-bound, so they run on the
/// blocking pool. A panic inside the task surfaces as `AppError::Internal`.
async fn run_blocking<T, F>(label: &'static str, work: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in {label}: {e}")))?
}

/// GET /api/v1/cv/documents?user_id=
pub async fn handle_list_documents(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CvDocumentRow>>, AppError> {
    let rows = list_cvs(&state.db, params.user_id).await?;
    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blocking_work_returns_its_result() {
        let analysis = run_blocking("test", || {
            let text = extract_text(DocumentKind::PlainText, b"Experience\nLed a team of 12")?;
            Ok(analyze_cv(&text))
        })
        .await
        .unwrap();
        assert!(analysis.score > 0);
    }

    #[tokio::test]
    async fn test_blocking_work_propagates_extraction_error() {
        let err = run_blocking("test", || {
            let text = extract_text(DocumentKind::Pdf, b"not a pdf")?;
            Ok(analyze_cv(&text))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[tokio::test]
    async fn test_panic_in_blocking_work_is_internal_error() {
        let err = run_blocking::<(), _>("test", || panic!("parser blew up"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
