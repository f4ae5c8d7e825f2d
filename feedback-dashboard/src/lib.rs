pub mod api_client;
pub mod cache;
pub mod dashboard;
pub mod form;
pub mod render;
pub mod session;
pub mod view;

pub use api_client::{ApiClient, ClientError, DEFAULT_API_URL};
pub use dashboard::{Dashboard, Snapshot};
