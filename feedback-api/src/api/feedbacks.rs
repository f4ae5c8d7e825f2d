use super::AppState;
use crate::analytics;
use crate::error::{AppError, AppResult};
use actix_web::{get, post, web, HttpResponse};
use shared_types::NewFeedback;
use tracing::{error, info, warn};

#[get("/feedbacks")]
pub async fn list_feedbacks(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let records = state.store.list_all().await.map_err(|e| {
        error!(error = %e, "Failed to list feedback");
        AppError::from(e)
    })?;

    info!(count = records.len(), "Listed feedback records");
    Ok(HttpResponse::Ok().json(records))
}

#[get("/feedbacks/analise")]
pub async fn analyse_feedbacks(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let records = state.store.list_all().await.map_err(|e| {
        error!(error = %e, "Failed to load feedback for analysis");
        AppError::from(e)
    })?;

    let summaries = analytics::summarize(&records);

    info!(
        records = records.len(),
        courses = summaries.len(),
        "Computed course summaries"
    );
    Ok(HttpResponse::Ok().json(summaries))
}

#[post("/feedbacks")]
pub async fn create_feedback(
    state: web::Data<AppState>,
    request: web::Json<NewFeedback>,
) -> AppResult<HttpResponse> {
    let feedback = request.into_inner();

    if state.strict_validation {
        let problems = feedback.validation_errors();
        if !problems.is_empty() {
            warn!(course_id = %feedback.course_id, ?problems, "Rejected feedback");
            return Err(AppError::InvalidRequest(problems.join("; ")));
        }
    }

    let record = state.store.insert(feedback).await.map_err(|e| {
        error!(error = %e, "Failed to store feedback");
        AppError::from(e)
    })?;

    info!(id = record.id, course_id = %record.course_id, "Stored feedback");
    Ok(HttpResponse::Ok().json(record))
}
