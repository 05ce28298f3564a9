//! Update a single member's status

use tracing::{info, warn};

use crate::domains::subscriptions::models::{ApiKey, Member, TargetStatus};
use crate::kernel::ServerDeps;

/// Move one member to `target`.
///
/// Returns whether the platform accepted the change. Every failure (network,
/// auth, validation, rate limit) is logged and turned into `false`, so callers
/// can treat members independently.
pub async fn update_member(
    api_key: &ApiKey,
    member: &Member,
    target: TargetStatus,
    deps: &ServerDeps,
) -> bool {
    match deps
        .mailing_lists
        .update_member_status(
            api_key.expose(),
            member.list_id.as_str(),
            &member.id,
            target.into(),
        )
        .await
    {
        Ok(()) => {
            info!(member_id = %member.id, status = %target, "Member status updated");
            true
        }
        Err(e) => {
            warn!(member_id = %member.id, status = %target, error = %e, "Member status update failed");
            false
        }
    }
}
