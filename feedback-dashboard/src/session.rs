//! Line-oriented interactive dashboard. API failures are reported and the
//! session keeps running.

use crate::dashboard::Dashboard;
use crate::form::FeedbackForm;
use crate::render::render_dashboard;
use crate::view::{course_options, CourseFilter};
use chrono::NaiveDate;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::warn;

pub const HELP: &str = "\
Commands:
  show              render the dashboard
  filter <course>   restrict the timeline and table to one course ('all' to reset)
  courses           list known courses
  submit            fill in and send a new feedback
  refresh           drop cached data and reload
  help              show this help
  quit              leave";

pub async fn run_interactive<R, W>(
    dashboard: &mut Dashboard,
    input: R,
    out: &mut W,
    today: NaiveDate,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut filter = CourseFilter::All;

    writeln!(out, "Course feedback dashboard ({})", dashboard.client().base_url())?;
    writeln!(out, "{HELP}")?;
    show(dashboard, &filter, out).await?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let line = line.trim();
        let (command, argument) = line
            .split_once(char::is_whitespace)
            .map(|(command, rest)| (command, rest.trim()))
            .unwrap_or((line, ""));

        match command.to_ascii_lowercase().as_str() {
            "" => {}
            "show" => show(dashboard, &filter, out).await?,
            "filter" => {
                filter = CourseFilter::parse(argument);
                writeln!(out, "Filter: {}", filter.label())?;
                show(dashboard, &filter, out).await?;
            }
            "courses" => match dashboard.analysis().await {
                Ok(analysis) => {
                    for course in course_options(&analysis) {
                        writeln!(out, "  {course}")?;
                    }
                }
                Err(e) => report_api_error(out, &e)?,
            },
            "submit" => submit_form(dashboard, &mut lines, out, today).await?,
            "refresh" => {
                dashboard.invalidate();
                show(dashboard, &filter, out).await?;
            }
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => break,
            other => writeln!(
                out,
                "Unknown command '{other}'. Type 'help' for the list of commands."
            )?,
        }
    }

    Ok(())
}

async fn show<W: Write>(
    dashboard: &mut Dashboard,
    filter: &CourseFilter,
    out: &mut W,
) -> io::Result<()> {
    match dashboard.snapshot().await {
        Ok(snapshot) => write!(out, "{}", render_dashboard(&snapshot, filter)),
        Err(e) => report_api_error(out, &e),
    }
}

fn report_api_error<W: Write>(out: &mut W, error: &dyn std::error::Error) -> io::Result<()> {
    warn!(error = %error, "API request failed");
    writeln!(out, "Error communicating with the API: {error}")
}

async fn prompt<R, W>(lines: &mut Lines<R>, out: &mut W, label: &str) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{label}: ")?;
    out.flush()?;
    lines.next_line().await
}

async fn submit_form<R, W>(
    dashboard: &mut Dashboard,
    lines: &mut Lines<R>,
    out: &mut W,
    today: NaiveDate,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let options = match dashboard.analysis().await {
        Ok(analysis) => course_options(&analysis),
        Err(_) => course_options(&[]),
    };
    writeln!(out, "New feedback. Known courses: {}", options.join(", "))?;

    let Some(date) = prompt(lines, out, "Date (YYYY-MM-DD, empty for today)").await? else {
        return Ok(());
    };
    let Some(course) = prompt(lines, out, &format!("Course [{}]", options[0])).await? else {
        return Ok(());
    };
    let Some(content_quality) = prompt(lines, out, "Content quality (1-5)").await? else {
        return Ok(());
    };
    let Some(instructor_quality) = prompt(lines, out, "Instructor quality (1-5)").await? else {
        return Ok(());
    };
    let Some(recommendation) = prompt(lines, out, "Recommend this course? (Yes/No/Maybe)").await?
    else {
        return Ok(());
    };
    let Some(comment) = prompt(lines, out, "Comment (optional)").await? else {
        return Ok(());
    };

    let form = FeedbackForm {
        date,
        course: if course.trim().is_empty() {
            options[0].clone()
        } else {
            course
        },
        content_quality,
        instructor_quality,
        recommendation,
        comment,
    };

    let feedback = match form.into_feedback(today) {
        Ok(feedback) => feedback,
        Err(e) => return writeln!(out, "Invalid feedback: {e}"),
    };

    match dashboard.submit(&feedback).await {
        Ok(record) => writeln!(out, "Feedback added successfully (id {}).", record.id),
        Err(e) => {
            warn!(error = %e, "Feedback submission failed");
            writeln!(out, "Error submitting feedback: {e}")
        }
    }
}
