// TestDependencies - mock implementations for testing
//
// Provides a stateful mock of the remote mailing-list platform that can be
// injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    BaseMailingListService, BatchSettings, MemberFetch, MemberStatus, RemoteList, RemoteMember,
    ServerDeps,
};

// =============================================================================
// Mock Mailing List Service
// =============================================================================

/// Arguments captured from an update call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCallArgs {
    pub list_id: String,
    pub member_id: String,
    pub status: MemberStatus,
}

/// Arguments captured from a member fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCallArgs {
    pub list_id: String,
    pub fetch: MemberFetch,
}

#[derive(Debug, Clone)]
struct StoredMember {
    list_id: String,
    member: RemoteMember,
    status: MemberStatus,
}

/// In-memory platform. Successful updates really move members between
/// statuses, so a second job sees the effect of the first.
pub struct MockMailingListService {
    lists: Arc<Mutex<Vec<RemoteList>>>,
    members: Arc<Mutex<Vec<StoredMember>>>,
    failing_members: Arc<Mutex<HashSet<String>>>,
    lists_error: Arc<Mutex<Option<String>>>,
    members_error: Arc<Mutex<Option<String>>>,
    update_calls: Arc<Mutex<Vec<UpdateCallArgs>>>,
    fetch_calls: Arc<Mutex<Vec<FetchCallArgs>>>,
    list_calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    update_delay: Arc<Mutex<Option<Duration>>>,
}

impl Default for MockMailingListService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMailingListService {
    pub fn new() -> Self {
        Self {
            lists: Arc::new(Mutex::new(Vec::new())),
            members: Arc::new(Mutex::new(Vec::new())),
            failing_members: Arc::new(Mutex::new(HashSet::new())),
            lists_error: Arc::new(Mutex::new(None)),
            members_error: Arc::new(Mutex::new(None)),
            update_calls: Arc::new(Mutex::new(Vec::new())),
            fetch_calls: Arc::new(Mutex::new(Vec::new())),
            list_calls: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            update_delay: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a list to the directory
    pub fn with_list(self, id: &str, web_id: u64) -> Self {
        self.lists.lock().unwrap().push(RemoteList {
            id: id.to_string(),
            web_id,
        });
        self
    }

    /// Add a member to a list in the given status
    pub fn with_member(
        self,
        list_id: &str,
        member_id: &str,
        status: MemberStatus,
        unsubscribe_reason: Option<&str>,
    ) -> Self {
        self.members.lock().unwrap().push(StoredMember {
            list_id: list_id.to_string(),
            member: RemoteMember {
                id: member_id.to_string(),
                unsubscribe_reason: unsubscribe_reason.map(str::to_string),
            },
            status,
        });
        self
    }

    /// Add `count` members named `m0..m{count-1}` to a list
    pub fn with_members(
        mut self,
        list_id: &str,
        count: usize,
        status: MemberStatus,
        unsubscribe_reason: Option<&str>,
    ) -> Self {
        for i in 0..count {
            self = self.with_member(list_id, &format!("m{}", i), status, unsubscribe_reason);
        }
        self
    }

    /// Make every update of this member fail
    pub fn failing_member(self, member_id: &str) -> Self {
        self.failing_members
            .lock()
            .unwrap()
            .insert(member_id.to_string());
        self
    }

    /// Make every update take `delay` before answering
    pub fn with_update_delay(self, delay: Duration) -> Self {
        *self.update_delay.lock().unwrap() = Some(delay);
        self
    }

    /// Make the list directory read fail
    pub fn failing_lists(self, message: &str) -> Self {
        *self.lists_error.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Make the member fetch fail
    pub fn failing_members_fetch(self, message: &str) -> Self {
        *self.members_error.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Get all update calls in the order they were issued
    pub fn update_calls(&self) -> Vec<UpdateCallArgs> {
        self.update_calls.lock().unwrap().clone()
    }

    /// Get all member fetch calls
    pub fn fetch_calls(&self) -> Vec<FetchCallArgs> {
        self.fetch_calls.lock().unwrap().clone()
    }

    /// Number of directory reads
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Highest number of update calls that were in flight at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Current status of a member, if it exists
    pub fn status_of(&self, member_id: &str) -> Option<MemberStatus> {
        self.members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.member.id == member_id)
            .map(|m| m.status)
    }

    /// Whether any call at all reached the platform
    pub fn was_contacted(&self) -> bool {
        self.list_calls() > 0
            || !self.fetch_calls.lock().unwrap().is_empty()
            || !self.update_calls.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl BaseMailingListService for MockMailingListService {
    async fn fetch_lists(&self, _api_key: &str) -> Result<Vec<RemoteList>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.lists_error.lock().unwrap().clone() {
            anyhow::bail!(message);
        }
        Ok(self.lists.lock().unwrap().clone())
    }

    async fn fetch_members(
        &self,
        _api_key: &str,
        list_id: &str,
        fetch: &MemberFetch,
    ) -> Result<Vec<RemoteMember>> {
        self.fetch_calls.lock().unwrap().push(FetchCallArgs {
            list_id: list_id.to_string(),
            fetch: fetch.clone(),
        });

        if let Some(message) = self.members_error.lock().unwrap().clone() {
            anyhow::bail!(message);
        }

        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.list_id == list_id && m.status == fetch.status)
            .take(fetch.count as usize)
            .map(|m| RemoteMember {
                id: m.member.id.clone(),
                unsubscribe_reason: if fetch.include_unsubscribe_reason {
                    m.member.unsubscribe_reason.clone()
                } else {
                    None
                },
            })
            .collect())
    }

    async fn update_member_status(
        &self,
        _api_key: &str,
        list_id: &str,
        member_id: &str,
        status: MemberStatus,
    ) -> Result<()> {
        self.update_calls.lock().unwrap().push(UpdateCallArgs {
            list_id: list_id.to_string(),
            member_id: member_id.to_string(),
            status,
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Suspend so concurrently polled lanes can interleave
        let delay = *self.update_delay.lock().unwrap();
        match delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_members.lock().unwrap().contains(member_id) {
            anyhow::bail!("Mailchimp API error (400): member {} rejected", member_id);
        }

        let mut members = self.members.lock().unwrap();
        match members
            .iter_mut()
            .find(|m| m.list_id == list_id && m.member.id == member_id)
        {
            Some(stored) => {
                stored.status = status;
                Ok(())
            }
            None => anyhow::bail!("Mailchimp API error (404): member {} not found", member_id),
        }
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub mailing_lists: Arc<MockMailingListService>,
    pub settings: BatchSettings,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            mailing_lists: Arc::new(MockMailingListService::new()),
            settings: BatchSettings::default(),
        }
    }

    /// Set a mock mailing list service
    pub fn mock_mailing_lists(mut self, service: MockMailingListService) -> Self {
        self.mailing_lists = Arc::new(service);
        self
    }

    /// Override the batch settings
    pub fn settings(mut self, settings: BatchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build ServerDeps backed by the mocks
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(self.mailing_lists.clone(), self.settings)
    }
}
