use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::domains::subscriptions::{JobOutcome, ToggleRequest};
use crate::server::app::AxumAppState;

/// JSON body for `POST /api/jobs`. Same fields as the HTML form; the list id
/// and count may be given as numbers or strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBody {
    pub api_key: Option<String>,
    pub list_id: Option<serde_json::Value>,
    pub status: Option<String>,
    pub count: Option<serde_json::Value>,
}

impl JobBody {
    fn to_request(&self) -> crate::domains::subscriptions::Result<ToggleRequest> {
        // Web ids are numbers in the platform's own JSON, strings in forms
        let list_id = self.list_id.as_ref().map(scalar_text);
        let count = self.count.as_ref().map(scalar_text);

        ToggleRequest::from_fields(
            self.api_key.as_deref(),
            list_id.as_deref(),
            self.status.as_deref(),
            count.as_deref(),
        )
    }
}

fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON variant of the form submission
///
/// Returns 400 with the error outcome when the body is malformed or required
/// fields are missing, 200 with the job outcome otherwise (including failed
/// jobs).
pub async fn job_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<JobBody>, JsonRejection>,
) -> (StatusCode, Json<JobOutcome>) {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            info!(error = %rejection, "Rejected job body");
            return (StatusCode::BAD_REQUEST, Json(JobOutcome::failed()));
        }
    };

    let request = match body.to_request() {
        Ok(request) => request,
        Err(e) => {
            info!(error = %e, "Rejected job request");
            return (StatusCode::BAD_REQUEST, Json(JobOutcome::failed()));
        }
    };

    let outcome = state.run_job(request).await;
    (StatusCode::OK, Json(outcome))
}
