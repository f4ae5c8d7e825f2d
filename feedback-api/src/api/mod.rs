use crate::database::SharedStore;
use crate::error::AppError;
use actix_cors::Cors;
use actix_web::{http::header, web};

pub mod feedbacks;
pub mod health;

/// State shared by every request handler.
pub struct AppState {
    pub store: SharedStore,
    /// Reject ratings outside 1.0-5.0 and unknown recommendation labels.
    pub strict_validation: bool,
}

impl AppState {
    pub fn new(store: SharedStore, strict_validation: bool) -> Self {
        Self {
            store,
            strict_validation,
        }
    }
}

/// Registers all routes. The caller provides `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(feedbacks::list_feedbacks)
        .service(feedbacks::analyse_feedbacks)
        .service(feedbacks::create_feedback)
        .service(health::health_check)
        .service(health::version_info);
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}

pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600);

    allowed_origins.iter().fold(cors, |cors, origin| {
        if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        }
    })
}
