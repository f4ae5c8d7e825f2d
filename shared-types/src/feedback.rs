use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Recommendation label counted as a positive recommendation.
pub const AFFIRMATIVE_LABEL: &str = "Yes";

/// Labels offered by the submission form.
pub const RECOMMENDATION_LABELS: [&str; 3] = ["Yes", "No", "Maybe"];

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// One submitted course review, as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    #[ts(type = "number")]
    pub id: i64,
    pub date: NaiveDate,
    pub course_id: String,
    pub content_quality: f64,
    pub instructor_quality: f64,
    pub recommendation: String,
    #[serde(default)]
    pub comment: String,
}

/// Request body for creating a feedback record. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub date: NaiveDate,
    pub course_id: String,
    pub content_quality: f64,
    pub instructor_quality: f64,
    pub recommendation: String,
    #[serde(default)]
    pub comment: String,
}

impl NewFeedback {
    pub fn into_record(self, id: i64) -> FeedbackRecord {
        FeedbackRecord {
            id,
            date: self.date,
            course_id: self.course_id,
            content_quality: self.content_quality,
            instructor_quality: self.instructor_quality,
            recommendation: self.recommendation,
            comment: self.comment,
        }
    }

    /// Problems that would make this submission fall outside the documented
    /// rating range or label set. Empty when the submission is well formed.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("contentQuality", self.content_quality),
            ("instructorQuality", self.instructor_quality),
        ] {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                errors.push(format!(
                    "{field} must be between {MIN_RATING:.1} and {MAX_RATING:.1}, got {value}"
                ));
            }
        }

        if !RECOMMENDATION_LABELS.contains(&self.recommendation.as_str()) {
            errors.push(format!(
                "recommendation must be one of {}, got '{}'",
                RECOMMENDATION_LABELS.join("/"),
                self.recommendation
            ));
        }

        errors
    }
}

/// Per-course statistics computed by the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub course_id: String,
    #[ts(type = "number")]
    pub total_reviews: i64,
    pub mean_content: f64,
    pub mean_instructor: f64,
    pub percent_affirmative: f64,
}

/// Rounds a rating to the single decimal place the table keeps.
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
