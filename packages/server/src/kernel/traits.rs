// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (resolve, filter, batch) lives in domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseMailingListService)

use anyhow::Result;
use async_trait::async_trait;

pub use mailchimp_client::MemberStatus;

// =============================================================================
// Mailing List Service Trait (Infrastructure - remote email-marketing platform)
// =============================================================================

/// A list as seen in the remote directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteList {
    /// Platform-internal list id
    pub id: String,
    /// Human-facing numeric id shown in the platform UI
    pub web_id: u64,
}

/// A list member as returned by a status-filtered fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMember {
    pub id: String,
    pub unsubscribe_reason: Option<String>,
}

/// Which members to fetch and how much of each to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFetch {
    pub status: MemberStatus,
    pub count: u32,
    pub include_unsubscribe_reason: bool,
}

#[async_trait]
pub trait BaseMailingListService: Send + Sync {
    /// List every list the API key can see
    async fn fetch_lists(&self, api_key: &str) -> Result<Vec<RemoteList>>;

    /// Fetch members of a list currently in `fetch.status`
    async fn fetch_members(
        &self,
        api_key: &str,
        list_id: &str,
        fetch: &MemberFetch,
    ) -> Result<Vec<RemoteMember>>;

    /// Set one member's status (partial update)
    async fn update_member_status(
        &self,
        api_key: &str,
        list_id: &str,
        member_id: &str,
        status: MemberStatus,
    ) -> Result<()>;
}
