//! Partitioned batch update
//!
//! Members are cut into at most `max_concurrency` contiguous lanes. Lanes run
//! concurrently on the calling task; each lane updates its members one at a
//! time, so no more than `max_concurrency` updates are ever in flight.

use futures::future::join_all;
use tracing::{debug, info};

use super::update_member;
use crate::domains::subscriptions::models::{ApiKey, Member, TargetStatus};
use crate::kernel::ServerDeps;

/// Split `items` into contiguous lanes of `ceil(len / max_concurrency)`.
///
/// Lane creation stops as soon as a lane ends at the last item, so small
/// inputs produce fewer than `max_concurrency` lanes and the last lane may be
/// short. Leftover capacity is not redistributed. Empty input yields no lanes.
pub fn partition_lanes<T>(items: &[T], max_concurrency: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }

    let lanes_wanted = max_concurrency.max(1);
    let lane_len = items.len().div_ceil(lanes_wanted).max(1);

    let mut lanes = Vec::with_capacity(lanes_wanted);
    for i in 0..lanes_wanted {
        let start = i * lane_len;
        let end = ((i + 1) * lane_len).min(items.len());
        lanes.push(&items[start..end]);
        if end == items.len() {
            break;
        }
    }
    lanes
}

/// Update every member of a lane in order, waiting for each result before
/// starting the next. One result per member.
pub async fn run_lane(
    api_key: &ApiKey,
    lane: &[Member],
    target: TargetStatus,
    deps: &ServerDeps,
) -> Vec<bool> {
    let mut results = Vec::with_capacity(lane.len());
    for member in lane {
        results.push(update_member(api_key, member, target, deps).await);
    }
    results
}

/// Run all lanes concurrently and return how many members were updated.
pub async fn run_batch(
    api_key: &ApiKey,
    members: &[Member],
    target: TargetStatus,
    max_concurrency: usize,
    deps: &ServerDeps,
) -> usize {
    let lanes = partition_lanes(members, max_concurrency);
    debug!(
        members = members.len(),
        lanes = lanes.len(),
        lane_len = lanes.first().map_or(0, |l| l.len()),
        "Partitioned members into lanes"
    );

    let lane_results = join_all(
        lanes
            .iter()
            .map(|lane| run_lane(api_key, lane, target, deps)),
    )
    .await;

    let count: usize = lane_results
        .iter()
        .map(|results| results.iter().filter(|ok| **ok).count())
        .sum();

    info!(count, members = members.len(), status = %target, "Batch update completed");
    count
}
