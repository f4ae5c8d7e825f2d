use crate::api_client::{ApiClient, ClientError};
use crate::cache::TtlCache;
use shared_types::{CourseSummary, FeedbackRecord, NewFeedback};
use std::time::Duration;
use tracing::{debug, info};

/// Everything the dashboard renders, fetched together.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub feedbacks: Vec<FeedbackRecord>,
    pub analysis: Vec<CourseSummary>,
}

/// API client plus short-lived local copies of what it fetched.
pub struct Dashboard {
    client: ApiClient,
    feedbacks: TtlCache<Vec<FeedbackRecord>>,
    analysis: TtlCache<Vec<CourseSummary>>,
}

impl Dashboard {
    pub fn new(client: ApiClient, cache_ttl: Duration) -> Self {
        Self {
            client,
            feedbacks: TtlCache::new(cache_ttl),
            analysis: TtlCache::new(cache_ttl),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn feedbacks(&mut self) -> Result<Vec<FeedbackRecord>, ClientError> {
        if let Some(cached) = self.feedbacks.get() {
            debug!(count = cached.len(), "Using cached feedback records");
            return Ok(cached.clone());
        }

        let fresh = self.client.fetch_feedbacks().await?;
        Ok(self.feedbacks.insert(fresh).clone())
    }

    pub async fn analysis(&mut self) -> Result<Vec<CourseSummary>, ClientError> {
        if let Some(cached) = self.analysis.get() {
            debug!(count = cached.len(), "Using cached course analysis");
            return Ok(cached.clone());
        }

        let fresh = self.client.fetch_analysis().await?;
        Ok(self.analysis.insert(fresh).clone())
    }

    pub async fn snapshot(&mut self) -> Result<Snapshot, ClientError> {
        Ok(Snapshot {
            feedbacks: self.feedbacks().await?,
            analysis: self.analysis().await?,
        })
    }

    /// Posts a new record and drops the cached copies so the next load sees it.
    pub async fn submit(&mut self, feedback: &NewFeedback) -> Result<FeedbackRecord, ClientError> {
        let record = self.client.submit_feedback(feedback).await?;
        info!(id = record.id, course_id = %record.course_id, "Feedback submitted");
        self.invalidate();
        Ok(record)
    }

    pub fn invalidate(&mut self) {
        self.feedbacks.invalidate();
        self.analysis.invalidate();
    }
}
