use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use feedback_api::api::{self, AppState};
use feedback_api::config::Config;
use feedback_api::{database, logging};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first to get logging settings
    let config = Config::load().context("Failed to load configuration")?;

    let _log_guard = logging::init(&config.logging)?;

    info!(
        database = %database::redact(&config.database.url),
        "Connecting to feedback store"
    );
    let store = database::connect(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to the feedback store")?;
    store
        .init()
        .await
        .context("Failed to initialize the feedbacks table")?;

    if config.validation.strict {
        info!("Strict validation enabled for new feedback");
    }

    let state = web::Data::new(AppState::new(store, config.validation.strict));
    let allowed_origins = config.cors.allowed_origins.clone();

    info!(
        "Starting feedback-api on {}:{}",
        config.server.host, config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(api::cors(&allowed_origins))
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
