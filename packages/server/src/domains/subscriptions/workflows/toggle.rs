//! Toggle workflow - the whole job for one inbound request
//!
//! Received → Resolving → Fetching → Filtering → Updating → Completed.
//! Nothing is retried and nothing outlives the call.

use tracing::{info, warn, Instrument};

use crate::domains::subscriptions::activities::{filter_for_transition, resolve_list, run_batch};
use crate::domains::subscriptions::models::{JobOutcome, JobPhase, Member, ToggleRequest};
use crate::domains::subscriptions::{Result, SubscriptionError};
use crate::kernel::{MemberFetch, ServerDeps};

/// Run a toggle job and report the outcome.
///
/// Any resolve or fetch error yields the failure outcome (count -1). Once the
/// batch starts the job always succeeds, even if no member was updated.
pub async fn toggle_subscriptions(request: ToggleRequest, deps: &ServerDeps) -> JobOutcome {
    let span = tracing::info_span!(
        "toggle_subscriptions",
        web_id = %request.list_ref,
        target = %request.target,
    );

    async move {
        info!(phase = JobPhase::Received.as_str(), "Job received");
        match run_job(&request, deps).await {
            Ok(count) => {
                info!(phase = JobPhase::Completed.as_str(), count, "Job completed");
                JobOutcome::success(count)
            }
            Err(e) => {
                warn!(phase = JobPhase::Completed.as_str(), error = %e, "Job failed");
                JobOutcome::failed()
            }
        }
    }
    .instrument(span)
    .await
}

async fn run_job(request: &ToggleRequest, deps: &ServerDeps) -> Result<usize> {
    info!(phase = JobPhase::Resolving.as_str(), "Resolving list");
    let list_id = resolve_list(&request.api_key, request.list_ref, deps).await?;

    let fetch = MemberFetch {
        status: request.target.opposite().into(),
        count: effective_fetch_limit(request.fetch_limit, deps.settings.default_fetch_limit),
        include_unsubscribe_reason: request.target.include_unsubscribe_reason(),
    };
    info!(
        phase = JobPhase::Fetching.as_str(),
        list_id = %list_id,
        count = fetch.count,
        "Fetching members"
    );
    let fetched = deps
        .mailing_lists
        .fetch_members(request.api_key.expose(), list_id.as_str(), &fetch)
        .await
        .map_err(SubscriptionError::UpstreamFetch)?;

    let fetched_count = fetched.len();
    let eligible = filter_for_transition(fetched, request.target);
    info!(
        phase = JobPhase::Filtering.as_str(),
        fetched = fetched_count,
        eligible = eligible.len(),
        "Filtered members"
    );

    let members: Vec<Member> = eligible
        .into_iter()
        .map(|m| Member::from_remote(m, list_id.clone()))
        .collect();

    info!(
        phase = JobPhase::Updating.as_str(),
        members = members.len(),
        max_concurrency = deps.settings.max_concurrency,
        "Updating members"
    );
    Ok(run_batch(
        &request.api_key,
        &members,
        request.target,
        deps.settings.max_concurrency,
        deps,
    )
    .await)
}

/// A zero or absent limit falls back to the configured cap.
fn effective_fetch_limit(requested: Option<u32>, default: u32) -> u32 {
    match requested {
        Some(limit) if limit > 0 => limit,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_limit_falls_back_to_default() {
        assert_eq!(effective_fetch_limit(None, 100), 100);
        assert_eq!(effective_fetch_limit(Some(0), 100), 100);
        assert_eq!(effective_fetch_limit(Some(2000), 100), 2000);
    }
}
