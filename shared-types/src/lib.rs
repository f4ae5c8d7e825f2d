use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod feedback;
pub mod typescript_gen;

pub use typescript_gen::generate_typescript_definitions;

pub use feedback::{
    round_rating, CourseSummary, FeedbackRecord, NewFeedback, AFFIRMATIVE_LABEL, MAX_RATING,
    MIN_RATING, RECOMMENDATION_LABELS,
};

// Shared models for the feedback API and dashboard

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct HealthResponse {
    /// `ok`, or `unavailable` when the store does not answer.
    pub status: String,
    /// Store backend behind the API, e.g. `sqlite` or `postgres`.
    pub store: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct VersionResponse {
    pub version: String,
    pub service: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
