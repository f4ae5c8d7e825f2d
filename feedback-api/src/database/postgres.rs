use super::{FeedbackRow, FeedbackStore, StoreError};
use async_trait::async_trait;
use shared_types::{round_rating, FeedbackRecord, NewFeedback};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS feedbacks (
        id BIGSERIAL PRIMARY KEY,
        feedback_date DATE NOT NULL,
        course_id TEXT NOT NULL,
        content_quality DOUBLE PRECISION NOT NULL,
        instructor_quality DOUBLE PRECISION NOT NULL,
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
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, feedback_date, course_id, content_quality, instructor_quality, recommendation, comment
"#;

#[derive(Clone)]
pub struct PostgresFeedbackStore {
    pool: PgPool,
}

impl PostgresFeedbackStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl FeedbackStore for PostgresFeedbackStore {
    async fn init(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query(CREATE_TABLE).execute(&mut *conn).await?;
        sqlx::query(CREATE_COURSE_INDEX).execute(&mut *conn).await?;

        debug!("PostgreSQL feedback table ready");
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
        "postgres"
    }
}
