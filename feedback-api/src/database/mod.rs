use async_trait::async_trait;
use chrono::NaiveDate;
use shared_types::{FeedbackRecord, NewFeedback};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresFeedbackStore;
pub use sqlite::SqliteFeedbackStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("Unsupported database URL scheme: {0}")]
    UnsupportedUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable storage for feedback records.
///
/// Every operation checks a connection out of the pool for its own duration only;
/// the connection goes back to the pool when the operation returns, on success or
/// failure.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Creates the `feedbacks` table if it is missing.
    async fn init(&self) -> Result<(), StoreError>;

    /// Returns every stored record, unfiltered and in no particular order.
    async fn list_all(&self) -> Result<Vec<FeedbackRecord>, StoreError>;

    /// Persists a record, assigning the next id. Ratings are kept to one decimal place.
    async fn insert(&self, feedback: NewFeedback) -> Result<FeedbackRecord, StoreError>;

    /// Round-trips a trivial query to prove the backend answers.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}

pub type SharedStore = Arc<dyn FeedbackStore>;

/// Opens the store named by `database_url`, choosing the backend from its scheme.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SharedStore, StoreError> {
    let scheme = database_url
        .split_once(':')
        .map(|(scheme, _)| scheme)
        .unwrap_or_default();

    let store: SharedStore = match scheme {
        "sqlite" => Arc::new(SqliteFeedbackStore::connect(database_url, max_connections).await?),
        "postgres" | "postgresql" => {
            Arc::new(PostgresFeedbackStore::connect(database_url, max_connections).await?)
        }
        _ => return Err(StoreError::UnsupportedUrl(redact(database_url))),
    };

    Ok(store)
}

/// Strips credentials so a connection string can be logged.
pub fn redact(database_url: &str) -> String {
    match (database_url.find("://"), database_url.rfind('@')) {
        (Some(start), Some(at)) if at > start => {
            format!("{}://***{}", &database_url[..start], &database_url[at..])
        }
        _ => database_url.to_string(),
    }
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct FeedbackRow {
    id: i64,
    feedback_date: NaiveDate,
    course_id: String,
    content_quality: f64,
    instructor_quality: f64,
    recommendation: String,
    comment: String,
}

impl From<FeedbackRow> for FeedbackRecord {
    fn from(row: FeedbackRow) -> Self {
        FeedbackRecord {
            id: row.id,
            date: row.feedback_date,
            course_id: row.course_id,
            content_quality: row.content_quality,
            instructor_quality: row.instructor_quality,
            recommendation: row.recommendation,
            comment: row.comment,
        }
    }
}
