pub mod api;
pub mod config;
pub mod core;
pub mod store;

pub use api::{ApiClient, ApiError};
pub use config::AppConfig;
pub use store::{AppState, CancelScope, Resource, ResourceStore, Session};
