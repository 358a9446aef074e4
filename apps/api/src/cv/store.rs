use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cv::analysis::CvAnalysis;
use crate::cv::extract::DocumentKind;
use crate::errors::AppError;
use crate::models::cv::CvDocumentRow;

/// Parameters for storing an uploaded CV.
pub struct StoreParams<'a> {
    pub user_id: Uuid,
    pub file_name: &'a str,
    pub kind: DocumentKind,
    pub bytes: Bytes,
    pub analysis: &'a CvAnalysis,
}

/// Uploads the raw file to S3, then records it with its analysis. If the row
/// cannot be written the uploaded object is deleted again.
pub async fn store_cv(
    pool: &PgPool,
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    params: StoreParams<'_>,
) -> Result<CvDocumentRow, AppError> {
    let StoreParams {
        user_id,
        file_name,
        kind,
        bytes,
        analysis,
    } = params;

    let document_id = Uuid::new_v4();
    let extension = match kind {
        DocumentKind::Pdf => "pdf",
        DocumentKind::PlainText => "txt",
    };
    let s3_key = format!("cvs/{user_id}/{document_id}.{extension}");

    s3.put_object()
        .bucket(s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(bytes))
        .content_type(kind.content_type())
        .send()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("S3 upload failed: {e}")))?;

    info!("Uploaded CV to s3://{}/{}", s3_bucket, s3_key);

    let row = match insert_cv_row(pool, document_id, user_id, file_name, kind, &s3_key, analysis)
        .await
    {
        Ok(row) => row,
        Err(e) => {
            let cleanup = s3.delete_object().bucket(s3_bucket).key(&s3_key).send().await;
            if let Err(delete_err) = cleanup {
                warn!("Failed to remove orphaned CV object {s3_key}: {delete_err}");
            }
            return Err(e);
        }
    };

    info!(
        "Stored CV document {document_id} for user {user_id} (score {})",
        analysis.score
    );
    Ok(row)
}

async fn insert_cv_row(
    pool: &PgPool,
    document_id: Uuid,
    user_id: Uuid,
    file_name: &str,
    kind: DocumentKind,
    s3_key: &str,
    analysis: &CvAnalysis,
) -> Result<CvDocumentRow, AppError> {
    let analysis_json = serde_json::to_value(analysis).map_err(anyhow::Error::from)?;

    let row = sqlx::query_as::<_, CvDocumentRow>(
        r#"
        INSERT INTO cv_documents (id, user_id, file_name, content_type, s3_key, score, analysis)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(document_id)
    .bind(user_id)
    .bind(file_name)
    .bind(kind.content_type())
    .bind(s3_key)
    .bind(analysis.score as i32)
    .bind(analysis_json)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Returns a user's CVs, newest first.
pub async fn list_cvs(pool: &PgPool, user_id: Uuid) -> Result<Vec<CvDocumentRow>, AppError> {
    let rows = sqlx::query_as::<_, CvDocumentRow>(
        "SELECT * FROM cv_documents WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
