use axum::{extract::Extension, response::Html, Form};
use serde::Deserialize;
use tracing::info;

use crate::domains::subscriptions::ToggleRequest;
use crate::server::app::AxumAppState;
use crate::server::views::{render_form, FormBanner};

/// Fields posted by the HTML form. All optional so a partial form still
/// renders an error page instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct JobForm {
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
    #[serde(rename = "listId")]
    pub list_id: Option<String>,
    pub status: Option<String>,
    pub count: Option<String>,
}

impl JobForm {
    pub fn to_request(&self) -> crate::domains::subscriptions::Result<ToggleRequest> {
        ToggleRequest::from_fields(
            self.api_key.as_deref(),
            self.list_id.as_deref(),
            self.status.as_deref(),
            self.count.as_deref(),
        )
    }
}

/// Empty form
pub async fn form_page() -> Html<String> {
    render_form(None)
}

/// Run a job from the submitted form and render the outcome
pub async fn submit_form(
    Extension(state): Extension<AxumAppState>,
    Form(form): Form<JobForm>,
) -> Html<String> {
    let request = match form.to_request() {
        Ok(request) => request,
        Err(e) => {
            info!(error = %e, "Rejected job form");
            return render_form(Some(FormBanner::Invalid));
        }
    };

    let outcome = state.run_job(request).await;
    render_form(Some(FormBanner::Finished(outcome)))
}
