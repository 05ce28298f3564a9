//! Toggle workflow tests against the in-memory platform.

mod common;

use common::*;
use server_core::domains::subscriptions::activities::{partition_lanes, run_batch, run_lane};
use server_core::domains::subscriptions::{
    toggle_subscriptions, ApiKey, JobStatus, ListId, Member, TargetStatus, ToggleRequest, WebId,
};
use server_core::kernel::{MemberStatus, MockMailingListService};

fn request(web_id: u64, target: TargetStatus) -> ToggleRequest {
    ToggleRequest {
        api_key: ApiKey::new("test-key-us12"),
        list_ref: WebId(web_id),
        target,
        fetch_limit: None,
    }
}

fn stamped(ids: &[&str]) -> Vec<Member> {
    ids.iter()
        .map(|id| Member {
            id: id.to_string(),
            list_id: ListId::new(LIST_ID),
            unsubscribe_reason: None,
        })
        .collect()
}

#[tokio::test]
async fn resubscribes_every_admin_unsubscribed_member() {
    init_tracing();
    let test_deps = deps_with(admin_unsubscribed(25), 10);

    let outcome =
        toggle_subscriptions(request(WEB_ID, TargetStatus::Subscribed), &test_deps.server_deps())
            .await;

    assert_eq!(outcome.status, JobStatus::Success);
    assert_eq!(outcome.count, 25);
    assert_eq!(test_deps.mailing_lists.update_calls().len(), 25);
    assert!(test_deps
        .mailing_lists
        .update_calls()
        .iter()
        .all(|c| c.list_id == LIST_ID && c.status == MemberStatus::Subscribed));
}

#[tokio::test]
async fn user_unsubscribed_members_are_never_resubscribed() {
    let platform = platform()
        .with_member(LIST_ID, "1", MemberStatus::Unsubscribed, None)
        .with_member(LIST_ID, "2", MemberStatus::Unsubscribed, Some(ADMIN_REASON))
        .with_member(LIST_ID, "3", MemberStatus::Unsubscribed, Some(USER_REASON));
    let test_deps = deps_with(platform, 10);

    let outcome =
        toggle_subscriptions(request(WEB_ID, TargetStatus::Subscribed), &test_deps.server_deps())
            .await;

    assert_eq!(outcome.count, 2);
    assert_eq!(test_deps.mailing_lists.status_of("3"), Some(MemberStatus::Unsubscribed));
    assert_eq!(test_deps.mailing_lists.status_of("1"), Some(MemberStatus::Subscribed));
    assert_eq!(test_deps.mailing_lists.status_of("2"), Some(MemberStatus::Subscribed));
}

#[tokio::test]
async fn unsubscribing_ignores_reasons_and_fetches_ids_only() {
    let platform = platform()
        .with_member(LIST_ID, "1", MemberStatus::Subscribed, None)
        .with_member(LIST_ID, "2", MemberStatus::Subscribed, Some(USER_REASON));
    let test_deps = deps_with(platform, 10);

    let outcome =
        toggle_subscriptions(request(WEB_ID, TargetStatus::Unsubscribed), &test_deps.server_deps())
            .await;

    assert_eq!(outcome.count, 2);
    let fetches = test_deps.mailing_lists.fetch_calls();
    assert_eq!(fetches.len(), 1);
    assert_eq!(fetches[0].list_id, LIST_ID);
    assert_eq!(fetches[0].fetch.status, MemberStatus::Subscribed);
    assert!(!fetches[0].fetch.include_unsubscribe_reason);
}

#[tokio::test]
async fn subscribing_fetches_opposite_status_with_reason_and_default_cap() {
    let test_deps = deps_with(admin_unsubscribed(1), 10);

    toggle_subscriptions(request(WEB_ID, TargetStatus::Subscribed), &test_deps.server_deps()).await;

    let fetch = &test_deps.mailing_lists.fetch_calls()[0].fetch;
    assert_eq!(fetch.status, MemberStatus::Unsubscribed);
    assert_eq!(fetch.count, 100);
    assert!(fetch.include_unsubscribe_reason);
}

#[tokio::test]
async fn fetch_limit_caps_members_touched() {
    let test_deps = deps_with(admin_unsubscribed(30), 10);
    let mut req = request(WEB_ID, TargetStatus::Subscribed);
    req.fetch_limit = Some(12);

    let outcome = toggle_subscriptions(req, &test_deps.server_deps()).await;

    assert_eq!(test_deps.mailing_lists.fetch_calls()[0].fetch.count, 12);
    assert_eq!(outcome.count, 12);
}

#[tokio::test]
async fn resolves_the_requested_list_only() {
    let platform = admin_unsubscribed(3).with_members(
        OTHER_LIST_ID,
        4,
        MemberStatus::Unsubscribed,
        Some(ADMIN_REASON),
    );
    let test_deps = deps_with(platform, 10);

    let outcome = toggle_subscriptions(
        request(OTHER_WEB_ID, TargetStatus::Subscribed),
        &test_deps.server_deps(),
    )
    .await;

    assert_eq!(outcome.count, 4);
    assert!(test_deps
        .mailing_lists
        .update_calls()
        .iter()
        .all(|c| c.list_id == OTHER_LIST_ID));
}

#[tokio::test]
async fn unknown_web_id_fails_without_fetching_members() {
    let test_deps = deps_with(admin_unsubscribed(5), 10);

    let outcome =
        toggle_subscriptions(request(999, TargetStatus::Subscribed), &test_deps.server_deps())
            .await;

    assert_eq!(outcome.status, JobStatus::Error);
    assert_eq!(outcome.count, -1);
    assert_eq!(test_deps.mailing_lists.list_calls(), 1);
    assert!(test_deps.mailing_lists.fetch_calls().is_empty());
    assert!(test_deps.mailing_lists.update_calls().is_empty());
}

#[tokio::test]
async fn directory_failure_fails_the_job() {
    let test_deps = deps_with(admin_unsubscribed(5).failing_lists("401 API Key Invalid"), 10);

    let outcome =
        toggle_subscriptions(request(WEB_ID, TargetStatus::Subscribed), &test_deps.server_deps())
            .await;

    assert_eq!(outcome.count, -1);
    assert_eq!(outcome.status, JobStatus::Error);
}

#[tokio::test]
async fn member_fetch_failure_fails_the_job() {
    let test_deps = deps_with(admin_unsubscribed(5).failing_members_fetch("503"), 10);

    let outcome =
        toggle_subscriptions(request(WEB_ID, TargetStatus::Subscribed), &test_deps.server_deps())
            .await;

    assert_eq!(outcome.count, -1);
    assert!(test_deps.mailing_lists.update_calls().is_empty());
}

#[tokio::test]
async fn no_eligible_members_is_still_success() {
    let test_deps = deps_with(platform(), 10);

    let outcome =
        toggle_subscriptions(request(WEB_ID, TargetStatus::Subscribed), &test_deps.server_deps())
            .await;

    assert_eq!(outcome.status, JobStatus::Success);
    assert_eq!(outcome.count, 0);
}

#[tokio::test]
async fn item_failures_only_reduce_the_count() {
    let platform = admin_unsubscribed(10).failing_member("m3").failing_member("m7");
    let test_deps = deps_with(platform, 4);

    let outcome =
        toggle_subscriptions(request(WEB_ID, TargetStatus::Subscribed), &test_deps.server_deps())
            .await;

    assert_eq!(outcome.status, JobStatus::Success);
    assert_eq!(outcome.count, 8);
    assert_eq!(test_deps.mailing_lists.update_calls().len(), 10);
}

#[tokio::test]
async fn second_run_only_sees_members_still_in_opposite_status() {
    let platform = admin_unsubscribed(6).failing_member("m2");
    let test_deps = deps_with(platform, 3);
    let deps = test_deps.server_deps();

    let first = toggle_subscriptions(request(WEB_ID, TargetStatus::Subscribed), &deps).await;
    let second = toggle_subscriptions(request(WEB_ID, TargetStatus::Subscribed), &deps).await;

    assert_eq!(first.count, 5);
    // Only the member that failed is fetched again, and it fails again
    assert_eq!(second.status, JobStatus::Success);
    assert_eq!(second.count, 0);
    let calls = test_deps.mailing_lists.update_calls();
    assert_eq!(calls.len(), 7);
    assert_eq!(calls[6].member_id, "m2");
}

#[tokio::test]
async fn failing_member_does_not_stop_its_lane() {
    let test_deps = deps_with(
        platform()
            .with_member(LIST_ID, "5", MemberStatus::Unsubscribed, None)
            .with_member(LIST_ID, "6", MemberStatus::Unsubscribed, None)
            .with_member(LIST_ID, "7", MemberStatus::Unsubscribed, None)
            .failing_member("5"),
        10,
    );

    let results = run_lane(
        &ApiKey::new("key"),
        &stamped(&["5", "6", "7"]),
        TargetStatus::Subscribed,
        &test_deps.server_deps(),
    )
    .await;

    assert_eq!(results, vec![false, true, true]);
}

#[tokio::test]
async fn lane_updates_run_in_member_order() {
    let test_deps = deps_with(admin_unsubscribed(5), 1);

    run_lane(
        &ApiKey::new("key"),
        &stamped(&["m0", "m1", "m2", "m3", "m4"]),
        TargetStatus::Subscribed,
        &test_deps.server_deps(),
    )
    .await;

    let order: Vec<String> = test_deps
        .mailing_lists
        .update_calls()
        .into_iter()
        .map(|c| c.member_id)
        .collect();
    assert_eq!(order, vec!["m0", "m1", "m2", "m3", "m4"]);
}

#[tokio::test]
async fn batch_total_equals_sum_of_lane_totals() {
    let ids: Vec<String> = (0..23).map(|i| format!("m{}", i)).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let members = stamped(&id_refs);
    let key = ApiKey::new("key");

    let failing = || {
        admin_unsubscribed(23)
            .failing_member("m0")
            .failing_member("m11")
            .failing_member("m22")
    };

    let batch_deps = deps_with(failing(), 5);
    let total = run_batch(
        &key,
        &members,
        TargetStatus::Subscribed,
        5,
        &batch_deps.server_deps(),
    )
    .await;

    let lane_deps = deps_with(failing(), 5);
    let mut per_lane = 0;
    for lane in partition_lanes(&members, 5) {
        per_lane += run_lane(&key, lane, TargetStatus::Subscribed, &lane_deps.server_deps())
            .await
            .into_iter()
            .filter(|ok| *ok)
            .count();
    }

    assert_eq!(total, 20);
    assert_eq!(total, per_lane);
}

#[tokio::test]
async fn in_flight_updates_never_exceed_lane_count() {
    let test_deps = deps_with(admin_unsubscribed(40), 4);

    let outcome =
        toggle_subscriptions(request(WEB_ID, TargetStatus::Subscribed), &test_deps.server_deps())
            .await;

    assert_eq!(outcome.count, 40);
    let peak = test_deps.mailing_lists.max_in_flight();
    assert!(peak <= 4, "peak in-flight was {}", peak);
    assert!(peak > 1, "lanes should overlap, peak was {}", peak);
}

#[tokio::test]
async fn empty_batch_makes_no_calls() {
    let test_deps = deps_with(MockMailingListService::new(), 10);

    let total = run_batch(
        &ApiKey::new("key"),
        &[],
        TargetStatus::Unsubscribed,
        10,
        &test_deps.server_deps(),
    )
    .await;

    assert_eq!(total, 0);
    assert!(!test_deps.mailing_lists.was_contacted());
}
