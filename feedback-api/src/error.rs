use crate::database::StoreError;
use actix_web::{HttpResponse, ResponseError};
use shared_types::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            error: self.error_type(),
            message: self.to_string(),
        };

        match self {
            AppError::InvalidRequest(_) => HttpResponse::BadRequest().json(error_response),
            AppError::Store(_) => HttpResponse::InternalServerError().json(error_response),
        }
    }
}

impl AppError {
    fn error_type(&self) -> String {
        match self {
            AppError::Store(StoreError::Unavailable(_)) => "store_unavailable".to_string(),
            AppError::Store(_) => "store_error".to_string(),
            AppError::InvalidRequest(_) => "invalid_request".to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
