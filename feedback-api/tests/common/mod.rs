use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use async_trait::async_trait;
use chrono::NaiveDate;
use feedback_api::api::{self, AppState};
use feedback_api::database::{self, FeedbackStore, SharedStore, StoreError};
use shared_types::{FeedbackRecord, NewFeedback};
use std::sync::Arc;

pub struct TestApp<S> {
    pub store: SharedStore,
    pub app: S,
}

pub async fn memory_store() -> anyhow::Result<SharedStore> {
    let store = database::connect("sqlite::memory:", 1).await?;
    store.init().await?;
    Ok(store)
}

pub async fn setup_app_with_store(
    store: SharedStore,
    strict_validation: bool,
) -> TestApp<
    impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
> {
    let state = web::Data::new(AppState::new(store.clone(), strict_validation));

    let app = test::init_service(App::new().app_data(state).configure(api::configure)).await;

    TestApp { store, app }
}

pub async fn setup_test_app(
    strict_validation: bool,
) -> anyhow::Result<
    TestApp<
        impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    >,
> {
    let store = memory_store().await?;
    Ok(setup_app_with_store(store, strict_validation).await)
}

pub fn new_feedback(course: &str, recommendation: &str) -> NewFeedback {
    NewFeedback {
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        course_id: course.to_string(),
        content_quality: 4.0,
        instructor_quality: 5.0,
        recommendation: recommendation.to_string(),
        comment: String::new(),
    }
}

/// A store whose backend is permanently unreachable.
pub struct UnavailableStore;

#[async_trait]
impl FeedbackStore for UnavailableStore {
    async fn init(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }

    async fn list_all(&self) -> Result<Vec<FeedbackRecord>, StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }

    async fn insert(&self, _feedback: NewFeedback) -> Result<FeedbackRecord, StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }

    fn backend(&self) -> &'static str {
        "unreachable"
    }
}

pub fn unavailable_store() -> SharedStore {
    Arc::new(UnavailableStore)
}
