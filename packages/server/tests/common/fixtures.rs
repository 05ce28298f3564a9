//! Test fixtures for building a mock platform.
//!
//! Every fixture lives in the list `abc` (web id 100); a second list `def`
//! (web id 200) exists so resolution has something to choose between.

use server_core::kernel::{BatchSettings, MemberStatus, MockMailingListService, TestDependencies};

pub const LIST_ID: &str = "abc";
pub const WEB_ID: u64 = 100;
pub const OTHER_LIST_ID: &str = "def";
pub const OTHER_WEB_ID: u64 = 200;

pub const ADMIN_REASON: &str = "N/A (Unsubscribed by admin)";
pub const USER_REASON: &str = "user requested";

/// Directory with both lists and no members
pub fn platform() -> MockMailingListService {
    MockMailingListService::new()
        .with_list(LIST_ID, WEB_ID)
        .with_list(OTHER_LIST_ID, OTHER_WEB_ID)
}

/// `count` members unsubscribed by an admin, all eligible for re-subscription
pub fn admin_unsubscribed(count: usize) -> MockMailingListService {
    platform().with_members(LIST_ID, count, MemberStatus::Unsubscribed, Some(ADMIN_REASON))
}

/// Test dependencies with the given platform and concurrency cap
pub fn deps_with(platform: MockMailingListService, max_concurrency: usize) -> TestDependencies {
    TestDependencies::new()
        .mock_mailing_lists(platform)
        .settings(BatchSettings {
            default_fetch_limit: 100,
            max_concurrency,
        })
}
