use chrono::NaiveDate;
use shared_types::{NewFeedback, MAX_RATING, MIN_RATING, RECOMMENDATION_LABELS};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("course is required")]
    MissingCourse,

    #[error("'{0}' is not a date (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("{field} must be a number between 1.0 and 5.0, got '{input}'")]
    InvalidRating { field: &'static str, input: String },

    #[error("recommendation must be one of Yes/No/Maybe, got '{0}'")]
    InvalidRecommendation(String),
}

/// Raw text entered in the submission form.
#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    pub date: String,
    pub course: String,
    pub content_quality: String,
    pub instructor_quality: String,
    pub recommendation: String,
    pub comment: String,
}

impl FeedbackForm {
    /// Checks the form and builds the request body. An empty date means `today`.
    pub fn into_feedback(self, today: NaiveDate) -> Result<NewFeedback, FormError> {
        let course = self.course.trim();
        if course.is_empty() {
            return Err(FormError::MissingCourse);
        }

        Ok(NewFeedback {
            date: parse_date(&self.date, today)?,
            course_id: course.to_string(),
            content_quality: parse_rating("content quality", &self.content_quality)?,
            instructor_quality: parse_rating("instructor quality", &self.instructor_quality)?,
            recommendation: parse_recommendation(&self.recommendation)?,
            comment: self.comment.trim().to_string(),
        })
    }
}

pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate, FormError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(today);
    }
    input
        .parse()
        .map_err(|_| FormError::InvalidDate(input.to_string()))
}

pub fn parse_rating(field: &'static str, input: &str) -> Result<f64, FormError> {
    let invalid = || FormError::InvalidRating {
        field,
        input: input.trim().to_string(),
    };

    let value: f64 = input.trim().parse().map_err(|_| invalid())?;
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Accepts any casing and returns the canonical label.
pub fn parse_recommendation(input: &str) -> Result<String, FormError> {
    let input = input.trim();
    RECOMMENDATION_LABELS
        .iter()
        .find(|label| label.eq_ignore_ascii_case(input))
        .map(|label| label.to_string())
        .ok_or_else(|| FormError::InvalidRecommendation(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()
    }

    fn filled() -> FeedbackForm {
        FeedbackForm {
            date: String::new(),
            course: " Rust ".to_string(),
            content_quality: "4.5".to_string(),
            instructor_quality: "5".to_string(),
            recommendation: "maybe".to_string(),
            comment: "  solid  ".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let feedback = filled().into_feedback(today()).unwrap();
        assert_eq!(feedback.date, today());
        assert_eq!(feedback.course_id, "Rust");
        assert_eq!(feedback.content_quality, 4.5);
        assert_eq!(feedback.instructor_quality, 5.0);
        assert_eq!(feedback.recommendation, "Maybe");
        assert_eq!(feedback.comment, "solid");
        assert!(feedback.validation_errors().is_empty());
    }

    #[test]
    fn test_explicit_date() {
        let mut form = filled();
        form.date = "2024-01-31".to_string();
        let feedback = form.into_feedback(today()).unwrap();
        assert_eq!(feedback.date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

        assert_eq!(
            parse_date("31/01/2024", today()),
            Err(FormError::InvalidDate("31/01/2024".to_string()))
        );
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(parse_rating("content", "1"), Ok(1.0));
        assert_eq!(parse_rating("content", "5.0"), Ok(5.0));
        assert!(parse_rating("content", "5.5").is_err());
        assert!(parse_rating("content", "0.9").is_err());
        assert!(parse_rating("content", "great").is_err());
    }

    #[test]
    fn test_missing_course() {
        let mut form = filled();
        form.course = "   ".to_string();
        assert_eq!(form.into_feedback(today()), Err(FormError::MissingCourse));
    }

    #[test]
    fn test_unknown_recommendation() {
        assert_eq!(parse_recommendation("YES"), Ok("Yes".to_string()));
        assert_eq!(
            parse_recommendation("Sim"),
            Err(FormError::InvalidRecommendation("Sim".to_string()))
        );
    }
}
