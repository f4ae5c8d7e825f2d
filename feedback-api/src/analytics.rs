//! Per-course summary statistics over the stored feedback.

use shared_types::{CourseSummary, FeedbackRecord, AFFIRMATIVE_LABEL};
use std::collections::BTreeMap;

#[derive(Default)]
struct CourseTotals {
    count: i64,
    content_sum: f64,
    instructor_sum: f64,
    affirmative: i64,
}

/// Groups `records` by exact course id and summarises each group.
///
/// Course ids are compared byte for byte, so `"Rust 101"` and `"rust 101"` are
/// different courses. Callers must not rely on the order of the result.
pub fn summarize(records: &[FeedbackRecord]) -> Vec<CourseSummary> {
    let mut groups: BTreeMap<&str, CourseTotals> = BTreeMap::new();

    for record in records {
        let totals = groups.entry(record.course_id.as_str()).or_default();
        totals.count += 1;
        totals.content_sum += record.content_quality;
        totals.instructor_sum += record.instructor_quality;
        if record.recommendation == AFFIRMATIVE_LABEL {
            totals.affirmative += 1;
        }
    }

    groups
        .into_iter()
        .map(|(course_id, totals)| CourseSummary {
            course_id: course_id.to_string(),
            total_reviews: totals.count,
            mean_content: mean(totals.content_sum, totals.count),
            mean_instructor: mean(totals.instructor_sum, totals.count),
            percent_affirmative: percent(totals.affirmative, totals.count),
        })
        .collect()
}

fn mean(sum: f64, count: i64) -> f64 {
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

fn percent(part: i64, count: i64) -> f64 {
    if count > 0 {
        part as f64 / count as f64 * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: i64, course: &str, content: f64, instructor: f64, rec: &str) -> FeedbackRecord {
        FeedbackRecord {
            id,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            course_id: course.to_string(),
            content_quality: content,
            instructor_quality: instructor,
            recommendation: rec.to_string(),
            comment: String::new(),
        }
    }

    fn find<'a>(summaries: &'a [CourseSummary], course: &str) -> &'a CourseSummary {
        summaries
            .iter()
            .find(|summary| summary.course_id == course)
            .unwrap_or_else(|| panic!("no summary for {course}"))
    }

    #[test]
    fn test_two_courses() {
        let records = vec![
            record(1, "A", 4.0, 5.0, "Yes"),
            record(2, "A", 3.0, 4.0, "No"),
            record(3, "B", 5.0, 5.0, "Yes"),
        ];

        let summaries = summarize(&records);
        assert_eq!(summaries.len(), 2);

        let a = find(&summaries, "A");
        assert_eq!(a.total_reviews, 2);
        assert_eq!(a.mean_content, 3.5);
        assert_eq!(a.mean_instructor, 4.5);
        assert_eq!(a.percent_affirmative, 50.0);

        let b = find(&summaries, "B");
        assert_eq!(b.total_reviews, 1);
        assert_eq!(b.percent_affirmative, 100.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn test_grouping_is_exact() {
        let records = vec![
            record(1, "Rust 101", 4.0, 4.0, "Yes"),
            record(2, "rust 101", 4.0, 4.0, "Yes"),
            record(3, "Rust 101 ", 4.0, 4.0, "Yes"),
        ];

        let summaries = summarize(&records);
        assert_eq!(summaries.len(), 3);
        assert!(summaries.iter().all(|summary| summary.total_reviews == 1));
    }

    #[test]
    fn test_only_exact_affirmative_label_counts() {
        let records = vec![
            record(1, "A", 4.0, 4.0, "Yes"),
            record(2, "A", 4.0, 4.0, "yes"),
            record(3, "A", 4.0, 4.0, "Maybe"),
            record(4, "A", 4.0, 4.0, "No"),
        ];

        let summaries = summarize(&records);
        assert_eq!(find(&summaries, "A").percent_affirmative, 25.0);
    }

    #[test]
    fn test_total_reviews_match_record_counts() {
        let courses = ["A", "B", "C", "A", "C", "A"];
        let records: Vec<FeedbackRecord> = courses
            .iter()
            .enumerate()
            .map(|(i, course)| record(i as i64, course, 3.0, 3.0, "No"))
            .collect();

        let summaries = summarize(&records);
        for summary in &summaries {
            let expected = courses.iter().filter(|c| **c == summary.course_id).count();
            assert_eq!(summary.total_reviews, expected as i64);
            assert_eq!(summary.percent_affirmative, 0.0);
        }
    }

    #[test]
    fn test_zero_count_helpers() {
        assert_eq!(mean(0.0, 0), 0.0);
        assert_eq!(percent(0, 0), 0.0);
        assert!((percent(1, 3) - 33.333).abs() < 0.001);
    }
}
