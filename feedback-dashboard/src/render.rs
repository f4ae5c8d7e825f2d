use crate::dashboard::Snapshot;
use crate::view::{
    filter_records, overview, quality_timeline, ranked_by_content, review_distribution,
    CourseFilter, CourseShare, FeedbackRow, Overview, TimelinePoint,
};
use shared_types::{CourseSummary, FeedbackRecord, MAX_RATING};

const BAR_WIDTH: usize = 30;
const RULE: &str = "----------------------------------------------------------------";

fn bar(value: f64, max: f64) -> String {
    if !value.is_finite() || max <= 0.0 {
        return String::new();
    }
    let filled = ((value / max).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>, header: &str) -> usize {
    names
        .map(|name| name.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

pub fn render_overview(overview: &Overview) -> String {
    format!(
        "Overview\n\
         Total reviews:           {}\n\
         Mean content (★):        {:.2}\n\
         Mean instructor (★):     {:.2}\n\
         Positive recommendation: {:.1}%\n",
        overview.total_reviews,
        overview.mean_content,
        overview.mean_instructor,
        overview.percent_affirmative
    )
}

pub fn render_course_means(summaries: &[CourseSummary]) -> String {
    if summaries.is_empty() {
        return "No data available to chart course means.\n".to_string();
    }

    let width = name_width(summaries.iter().map(|s| s.course_id.as_str()), "Course");
    let mut out = String::from("Mean rating per course\n");

    for summary in ranked_by_content(summaries) {
        out.push_str(&format!(
            "{:<width$}  content    {:<bar_width$} {:.2}\n",
            summary.course_id,
            bar(summary.mean_content, MAX_RATING),
            summary.mean_content,
            bar_width = BAR_WIDTH,
        ));
        out.push_str(&format!(
            "{:<width$}  instructor {:<bar_width$} {:.2}\n",
            "",
            bar(summary.mean_instructor, MAX_RATING),
            summary.mean_instructor,
            bar_width = BAR_WIDTH,
        ));
    }

    out
}

pub fn render_distribution(shares: &[CourseShare]) -> String {
    if shares.is_empty() {
        return "No data available to chart review distribution.\n".to_string();
    }

    let width = name_width(shares.iter().map(|s| s.course_id.as_str()), "Course");
    let mut out = String::from("Share of reviews per course\n");

    for share in shares {
        out.push_str(&format!(
            "{:<width$}  {:<bar_width$} {} ({:.1}%)\n",
            share.course_id,
            bar(share.share_percent, 100.0),
            share.total_reviews,
            share.share_percent,
            bar_width = BAR_WIDTH,
        ));
    }

    out
}

pub fn render_timeline(points: &[TimelinePoint], label: &str) -> String {
    if points.is_empty() {
        return "No time series data available.\n".to_string();
    }

    let mut out = format!("Quality over time - {label}\n");
    for point in points {
        out.push_str(&format!(
            "{}  content {:.2} {:<half$}  instructor {:.2} {}\n",
            point.date,
            point.mean_content,
            bar(point.mean_content, MAX_RATING),
            point.mean_instructor,
            bar(point.mean_instructor, MAX_RATING),
            half = BAR_WIDTH,
        ));
    }

    out
}

pub fn render_rows(rows: &[FeedbackRow]) -> String {
    let width = name_width(rows.iter().map(|r| r.course.as_str()), "Course");
    let mut out = String::from("Recent feedback\n");

    out.push_str(&format!(
        "{:<width$}  {:<10}  {:<7}  {:<10}  {:<14}  Comment\n",
        "Course", "Date", "Content", "Instructor", "Recommendation"
    ));

    for row in rows {
        out.push_str(&format!(
            "{:<width$}  {:<10}  {:<7}  {:<10}  {:<14}  {}\n",
            row.course,
            row.date.to_string(),
            row.content_stars,
            row.instructor_stars,
            row.recommendation,
            row.comment
        ));
    }

    out
}

/// The whole analysis view for one course filter.
pub fn render_dashboard(snapshot: &Snapshot, filter: &CourseFilter) -> String {
    let mut sections = vec![
        render_overview(&overview(&snapshot.analysis)),
        render_course_means(&snapshot.analysis),
        render_distribution(&review_distribution(&snapshot.analysis)),
    ];

    if snapshot.feedbacks.is_empty() {
        sections.push("No feedback found.\n".to_string());
    } else {
        let filtered: Vec<&FeedbackRecord> = filter_records(&snapshot.feedbacks, filter);
        let rows: Vec<FeedbackRow> = filtered.iter().map(|record| FeedbackRow::from(*record)).collect();

        sections.push(render_timeline(&quality_timeline(&filtered), filter.label()));
        sections.push(render_rows(&rows));
    }

    sections.join(&format!("{RULE}\n"))
}
