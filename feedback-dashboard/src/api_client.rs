use reqwest::{Response, StatusCode};
use shared_types::{CourseSummary, ErrorResponse, FeedbackRecord, NewFeedback};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// HTTP client for the feedback API.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_feedbacks(&self) -> Result<Vec<FeedbackRecord>, ClientError> {
        let url = format!("{}/feedbacks", self.base_url);
        debug!(%url, "Fetching feedback records");

        let response = self.client.get(&url).send().await?;
        let records = check_status(response).await?.json().await?;
        Ok(records)
    }

    pub async fn fetch_analysis(&self) -> Result<Vec<CourseSummary>, ClientError> {
        let url = format!("{}/feedbacks/analise", self.base_url);
        debug!(%url, "Fetching course analysis");

        let response = self.client.get(&url).send().await?;
        let summaries = check_status(response).await?.json().await?;
        Ok(summaries)
    }

    pub async fn submit_feedback(
        &self,
        feedback: &NewFeedback,
    ) -> Result<FeedbackRecord, ClientError> {
        let url = format!("{}/feedbacks", self.base_url);
        debug!(%url, course_id = %feedback.course_id, "Submitting feedback");

        let response = self.client.post(&url).json(feedback).send().await?;
        let record = check_status(response).await?.json().await?;
        Ok(record)
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|error| error.message)
        .unwrap_or(body);

    Err(ClientError::Status { status, message })
}
