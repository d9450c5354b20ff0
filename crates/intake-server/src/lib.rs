// Intake server
// HTTP front end for the intake form: renders the page, accepts full
// submissions, and answers live per-field checks.

pub mod activity;
pub mod config;
pub mod error;
pub mod page;
pub mod request;
pub mod routes;
pub mod store;

use crate::activity::ActivityLog;
use crate::store::SubmissionStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use config::AppConfig;
pub use error::AppError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
    pub activity: Arc<dyn ActivityLog>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        activity: Arc<dyn ActivityLog>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            activity,
            config,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/submit", post(routes::submit))
        .route("/api/validate", post(routes::validate_field))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
