use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::careers::catalog::CareerCatalog;
use crate::config::Config;
use crate::email::queue::MailQueue;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Read-only for the process lifetime.
    pub catalog: Arc<CareerCatalog>,
    /// Rate-limited outbound email. Clones share one worker.
    pub mailer: MailQueue,
}
