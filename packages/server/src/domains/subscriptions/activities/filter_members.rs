//! Decide which fetched members a job may touch

use crate::domains::subscriptions::models::{TargetStatus, ADMIN_UNSUBSCRIBE_REASON};
use crate::kernel::RemoteMember;

/// Drop members that must not be moved to `target`.
///
/// Re-subscribing only applies to members with no recorded reason or those
/// unsubscribed by an admin; anyone who unsubscribed themselves stays out.
/// Unsubscribing applies to everyone. Order is preserved.
pub fn filter_for_transition(members: Vec<RemoteMember>, target: TargetStatus) -> Vec<RemoteMember> {
    match target {
        TargetStatus::Unsubscribed => members,
        TargetStatus::Subscribed => members
            .into_iter()
            .filter(|m| is_resubscribable(m.unsubscribe_reason.as_deref()))
            .collect(),
    }
}

fn is_resubscribable(reason: Option<&str>) -> bool {
    match reason {
        None => true,
        Some(reason) => reason.is_empty() || reason == ADMIN_UNSUBSCRIBE_REASON,
    }
}
