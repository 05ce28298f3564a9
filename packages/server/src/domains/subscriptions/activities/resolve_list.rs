//! Resolve a human-facing web id into the platform's list id

use tracing::{debug, warn};

use crate::domains::subscriptions::models::{ApiKey, ListId, WebId};
use crate::domains::subscriptions::{Result, SubscriptionError};
use crate::kernel::{RemoteList, ServerDeps};

/// Resolve `list_ref` against every list the key can see.
///
/// One directory read per call; an unknown web id is not retried.
pub async fn resolve_list(api_key: &ApiKey, list_ref: WebId, deps: &ServerDeps) -> Result<ListId> {
    let lists = deps
        .mailing_lists
        .fetch_lists(api_key.expose())
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch list directory");
            SubscriptionError::UpstreamFetch(e)
        })?;

    debug!(web_id = %list_ref, lists = lists.len(), "Fetched list directory");
    select_list(&lists, list_ref)
}

/// Pick the list whose web id equals `list_ref`.
pub fn select_list(lists: &[RemoteList], list_ref: WebId) -> Result<ListId> {
    lists
        .iter()
        .find(|l| l.web_id == list_ref.0)
        .map(|l| ListId::new(l.id.clone()))
        .ok_or(SubscriptionError::UnknownList { web_id: list_ref.0 })
}
