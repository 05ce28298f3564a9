//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domains::subscriptions::{toggle_subscriptions, JobOutcome, ToggleRequest};
use crate::kernel::ServerDeps;
use crate::server::routes::{form_page, health_handler, job_handler, submit_form};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
}

impl AxumAppState {
    /// Run a job on its own task and wait for the outcome.
    ///
    /// The job is detached from the request future: if the request times out
    /// or the client goes away, the batch still runs to completion and logs
    /// its count. Only the response is lost.
    pub async fn run_job(&self, request: ToggleRequest) -> JobOutcome {
        let deps = self.deps.clone();
        let handle = tokio::spawn(async move { toggle_subscriptions(request, &deps).await });

        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Job task failed");
                JobOutcome::failed()
            }
        }
    }
}

/// Build the Axum application router
///
/// `request_timeout` bounds how long a caller waits for the outcome, and a
/// whole batch runs inside one request, so it is kept on the order of minutes.
/// Jobs run on their own task and finish even when the response times out.
pub fn build_app(deps: ServerDeps, request_timeout: Duration) -> Router {
    let app_state = AxumAppState {
        deps: Arc::new(deps),
    };

    // CORS configuration - the JSON endpoint may be called from other origins
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(form_page).post(submit_form))
        .route("/api/jobs", post(job_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
