use super::{ensure_parent_dir, FeedbackRow, FeedbackStore, StoreError};
use async_trait::async_trait;
use shared_types::{round_rating, FeedbackRecord, NewFeedback};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::debug;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS feedbacks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        feedback_date TEXT NOT NULL,
        course_id TEXT NOT NULL,
        content_quality REAL NOT NULL,
        instructor_quality REAL NOT NULL,
        recommendation TEXT NOT NULL,
        comment TEXT NOT NULL DEFAULT ''
    )
"#;

const CREATE_COURSE_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_feedbacks_course_id ON feedbacks(course_id)
"#;

const SELECT_ALL: &str = r#"
    SELECT id, feedback_date, course_id, content_quality, instructor_quality, recommendation, comment
    FROM feedbacks
"#;

const INSERT: &str = r#"
    INSERT INTO feedbacks
        (feedback_date, course_id, content_quality, instructor_quality, recommendation, comment)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    RETURNING id, feedback_date, course_id, content_quality, instructor_quality, recommendation, comment
"#;

#[derive(Clone)]
pub struct SqliteFeedbackStore {
    pool: SqlitePool,
}

impl SqliteFeedbackStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let pool_options = if in_memory {
            // An in-memory database lives only as long as its connection.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            ensure_parent_dir(options.get_filename())?;
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl FeedbackStore for SqliteFeedbackStore {
    async fn init(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query(CREATE_TABLE).execute(&mut *conn).await?;
        sqlx::query(CREATE_COURSE_INDEX).execute(&mut *conn).await?;

        debug!("SQLite feedback table ready");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<FeedbackRecord>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let rows: Vec<FeedbackRow> = sqlx::query_as(SELECT_ALL).fetch_all(&mut *conn).await?;

        Ok(rows.into_iter().map(FeedbackRecord::from).collect())
    }

    async fn insert(&self, feedback: NewFeedback) -> Result<FeedbackRecord, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let row: FeedbackRow = sqlx::query_as(INSERT)
            .bind(feedback.date)
            .bind(&feedback.course_id)
            .bind(round_rating(feedback.content_quality))
            .bind(round_rating(feedback.instructor_quality))
            .bind(&feedback.recommendation)
            .bind(&feedback.comment)
            .fetch_one(&mut *conn)
            .await?;

        Ok(row.into())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    async fn memory_store() -> SqliteFeedbackStore {
        let store = SqliteFeedbackStore::connect("sqlite::memory:", 1)
            .await
            .unwrap();
        store.init().await.unwrap();
        store
    }

    fn feedback(course: &str, recommendation: &str) -> NewFeedback {
        NewFeedback {
            date: NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
            course_id: course.to_string(),
            content_quality: 4.0,
            instructor_quality: 4.5,
            recommendation: recommendation.to_string(),
            comment: "Good pacing".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let store = memory_store().await;

        let first = store.insert(feedback("A", "Yes")).await.unwrap();
        let second = store.insert(feedback("A", "No")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.course_id, "A");
        assert_eq!(first.comment, "Good pacing");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 5, 12).unwrap());
    }

    #[tokio::test]
    async fn test_list_contains_inserted_records() {
        let store = memory_store().await;

        let inserted = vec![
            store.insert(feedback("A", "Yes")).await.unwrap(),
            store.insert(feedback("B", "Maybe")).await.unwrap(),
        ];

        let mut listed = store.list_all().await.unwrap();
        listed.sort_by_key(|record| record.id);

        assert_eq!(listed, inserted);
    }

    #[tokio::test]
    async fn test_repeated_lists_are_identical() {
        let store = memory_store().await;
        store.insert(feedback("A", "Yes")).await.unwrap();
        store.insert(feedback("C", "No")).await.unwrap();

        let mut first = store.list_all().await.unwrap();
        let mut second = store.list_all().await.unwrap();
        first.sort_by_key(|record| record.id);
        second.sort_by_key(|record| record.id);

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_insert_keeps_one_decimal() {
        let store = memory_store().await;

        let mut input = feedback("A", "Yes");
        input.content_quality = 3.86;
        input.instructor_quality = 4.04;

        let record = store.insert(input).await.unwrap();
        assert_eq!(record.content_quality, 3.9);
        assert_eq!(record.instructor_quality, 4.0);
    }

    #[tokio::test]
    async fn test_insert_accepts_out_of_range_values() {
        let store = memory_store().await;

        let mut input = feedback("A", "Absolutely");
        input.content_quality = 9.0;
        input.comment = String::new();

        let record = store.insert(input).await.unwrap();
        assert_eq!(record.content_quality, 9.0);
        assert_eq!(record.recommendation, "Absolutely");
        assert_eq!(record.comment, "");
    }

    #[tokio::test]
    async fn test_ping_after_close_fails() {
        let store = memory_store().await;
        assert_eq!(store.backend(), "sqlite");
        store.ping().await.unwrap();

        store.pool.close().await;
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let store = memory_store().await;
        store.insert(feedback("A", "Yes")).await.unwrap();

        store.init().await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/feedback.db");
        let url = format!("sqlite://{}", path.display());

        let store = SqliteFeedbackStore::connect(&url, 2).await.unwrap();
        store.init().await.unwrap();
        store.insert(feedback("A", "Yes")).await.unwrap();

        assert!(path.exists());
    }
}
