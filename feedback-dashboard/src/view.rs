//! Reshapes API data into what the dashboard shows.

use chrono::NaiveDate;
use shared_types::{CourseSummary, FeedbackRecord, MAX_RATING};
use std::collections::{BTreeMap, BTreeSet};

/// Filter keyword meaning "every course".
pub const ALL_COURSES: &str = "all";

/// Course offered by the form when no feedback exists yet.
pub const DEFAULT_COURSE: &str = "Default Course";

/// Rounds a 1-5 rating to the nearest integer and draws that many stars.
/// Stored ratings above the scale are drawn as a full row.
pub fn star_rating(value: f64) -> String {
    let stars = value.round();
    if stars.is_finite() && stars > 0.0 {
        "★".repeat(stars.min(MAX_RATING) as usize)
    } else {
        String::new()
    }
}

/// One line of the recent-feedback table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRow {
    pub course: String,
    pub date: NaiveDate,
    pub content_quality: f64,
    pub instructor_quality: f64,
    pub content_stars: String,
    pub instructor_stars: String,
    pub recommendation: String,
    pub comment: String,
}

impl From<&FeedbackRecord> for FeedbackRow {
    fn from(record: &FeedbackRecord) -> Self {
        FeedbackRow {
            course: record.course_id.clone(),
            date: record.date,
            content_quality: record.content_quality,
            instructor_quality: record.instructor_quality,
            content_stars: star_rating(record.content_quality),
            instructor_stars: star_rating(record.instructor_quality),
            recommendation: record.recommendation.clone(),
            comment: record.comment.clone(),
        }
    }
}

/// Headline metrics across all courses.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub total_reviews: i64,
    pub mean_content: f64,
    pub mean_instructor: f64,
    pub percent_affirmative: f64,
}

pub fn overview(summaries: &[CourseSummary]) -> Overview {
    let total_reviews = summaries.iter().map(|s| s.total_reviews).sum();

    Overview {
        total_reviews,
        mean_content: simple_mean(summaries.iter().map(|s| s.mean_content)),
        mean_instructor: simple_mean(summaries.iter().map(|s| s.mean_instructor)),
        percent_affirmative: weighted_affirmative(summaries),
    }
}

/// Share of all reviews that recommend their course, weighted by each
/// course's review count rather than averaging the per-course percentages.
pub fn weighted_affirmative(summaries: &[CourseSummary]) -> f64 {
    let total: i64 = summaries.iter().map(|s| s.total_reviews).sum();
    if total <= 0 {
        return 0.0;
    }

    let affirmative: f64 = summaries
        .iter()
        .map(|s| s.total_reviews as f64 * (s.percent_affirmative / 100.0))
        .sum();

    affirmative / total as f64 * 100.0
}

fn simple_mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CourseFilter {
    #[default]
    All,
    Course(String),
}

impl CourseFilter {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case(ALL_COURSES) {
            CourseFilter::All
        } else {
            CourseFilter::Course(input.to_string())
        }
    }

    pub fn matches(&self, course_id: &str) -> bool {
        match self {
            CourseFilter::All => true,
            CourseFilter::Course(course) => course == course_id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CourseFilter::All => "All courses",
            CourseFilter::Course(course) => course,
        }
    }
}

pub fn filter_records<'a>(
    records: &'a [FeedbackRecord],
    filter: &CourseFilter,
) -> Vec<&'a FeedbackRecord> {
    records
        .iter()
        .filter(|record| filter.matches(&record.course_id))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub mean_content: f64,
    pub mean_instructor: f64,
    pub reviews: usize,
}

/// Mean quality per calendar date, oldest first.
pub fn quality_timeline(records: &[&FeedbackRecord]) -> Vec<TimelinePoint> {
    let mut by_date: BTreeMap<NaiveDate, (f64, f64, usize)> = BTreeMap::new();

    for record in records {
        let entry = by_date.entry(record.date).or_default();
        entry.0 += record.content_quality;
        entry.1 += record.instructor_quality;
        entry.2 += 1;
    }

    by_date
        .into_iter()
        .map(|(date, (content, instructor, reviews))| TimelinePoint {
            date,
            mean_content: content / reviews as f64,
            mean_instructor: instructor / reviews as f64,
            reviews,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseShare {
    pub course_id: String,
    pub total_reviews: i64,
    pub share_percent: f64,
}

/// Each course's slice of the total review count.
pub fn review_distribution(summaries: &[CourseSummary]) -> Vec<CourseShare> {
    let total: i64 = summaries.iter().map(|s| s.total_reviews).sum();

    summaries
        .iter()
        .map(|s| CourseShare {
            course_id: s.course_id.clone(),
            total_reviews: s.total_reviews,
            share_percent: if total > 0 {
                s.total_reviews as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Courses ordered by mean content rating, best first.
pub fn ranked_by_content(summaries: &[CourseSummary]) -> Vec<&CourseSummary> {
    let mut ranked: Vec<&CourseSummary> = summaries.iter().collect();
    ranked.sort_by(|a, b| b.mean_content.total_cmp(&a.mean_content));
    ranked
}

/// Course choices for the submission form.
pub fn course_options(summaries: &[CourseSummary]) -> Vec<String> {
    let courses: BTreeSet<&str> = summaries.iter().map(|s| s.course_id.as_str()).collect();

    if courses.is_empty() {
        vec![DEFAULT_COURSE.to_string()]
    } else {
        courses.into_iter().map(str::to_string).collect()
    }
}
