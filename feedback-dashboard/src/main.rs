use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use feedback_dashboard::form::FeedbackForm;
use feedback_dashboard::render::render_dashboard;
use feedback_dashboard::view::CourseFilter;
use feedback_dashboard::{session, ApiClient, Dashboard, DEFAULT_API_URL};
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "feedback-dashboard",
    version,
    about = "Course feedback analytics in the terminal"
)]
struct Cli {
    /// Base URL of the feedback API
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Seconds fetched data stays cached
    #[arg(long, default_value_t = 300)]
    cache_ttl: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render the dashboard once
    Show {
        /// Only show the timeline and table for this course
        #[arg(long)]
        course: Option<String>,
    },
    /// Send a new feedback record
    Submit(SubmitArgs),
    /// Keep the dashboard open and read commands from stdin
    Interactive,
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long)]
    course: String,
    /// Content quality, 1-5
    #[arg(long)]
    content: String,
    /// Instructor quality, 1-5
    #[arg(long)]
    instructor: String,
    /// Yes, No or Maybe
    #[arg(long, default_value = "Yes")]
    recommendation: String,
    #[arg(long, default_value = "")]
    comment: String,
    /// YYYY-MM-DD, defaults to today
    #[arg(long, default_value = "")]
    date: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(api_url = %cli.api_url, "Using feedback API");

    let mut dashboard = Dashboard::new(
        ApiClient::new(cli.api_url),
        Duration::from_secs(cli.cache_ttl),
    );
    let today: NaiveDate = Local::now().date_naive();

    match cli.command.unwrap_or(Command::Show { course: None }) {
        Command::Show { course } => {
            let filter = course
                .as_deref()
                .map(CourseFilter::parse)
                .unwrap_or_default();
            let snapshot = dashboard
                .snapshot()
                .await
                .context("Error communicating with the API")?;
            print!("{}", render_dashboard(&snapshot, &filter));
        }
        Command::Submit(args) => {
            let form = FeedbackForm {
                date: args.date,
                course: args.course,
                content_quality: args.content,
                instructor_quality: args.instructor,
                recommendation: args.recommendation,
                comment: args.comment,
            };
            let feedback = match form.into_feedback(today) {
                Ok(feedback) => feedback,
                Err(e) => bail!("Invalid feedback: {e}"),
            };
            let record = dashboard
                .submit(&feedback)
                .await
                .context("Error submitting feedback")?;
            println!("Feedback added successfully (id {}).", record.id);
        }
        Command::Interactive => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session::run_interactive(&mut dashboard, stdin, &mut std::io::stdout(), today).await?;
        }
    }

    Ok(())
}
