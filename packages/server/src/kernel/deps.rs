//! Server dependencies for domain workflows (using traits for testability)
//!
//! This module provides the central dependency container handed to the
//! subscription workflow. The remote platform sits behind a trait so tests can
//! swap in a mock.

use anyhow::Result;
use async_trait::async_trait;
use mailchimp_client::{MailchimpClient, MemberQuery};
use std::sync::Arc;

use crate::config::Config;
use crate::kernel::{BaseMailingListService, MemberFetch, MemberStatus, RemoteList, RemoteMember};

// =============================================================================
// MailchimpClient Adapter (implements BaseMailingListService trait)
// =============================================================================

/// Wrapper around MailchimpClient that implements BaseMailingListService trait
pub struct MailchimpAdapter(pub Arc<MailchimpClient>);

impl MailchimpAdapter {
    pub fn new(client: Arc<MailchimpClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseMailingListService for MailchimpAdapter {
    async fn fetch_lists(&self, api_key: &str) -> Result<Vec<RemoteList>> {
        let lists = self.0.get_lists(api_key).await?;
        Ok(lists
            .into_iter()
            .map(|l| RemoteList {
                id: l.id,
                web_id: l.web_id,
            })
            .collect())
    }

    async fn fetch_members(
        &self,
        api_key: &str,
        list_id: &str,
        fetch: &MemberFetch,
    ) -> Result<Vec<RemoteMember>> {
        let fields: &[&str] = if fetch.include_unsubscribe_reason {
            &["members.id", "members.unsubscribe_reason"]
        } else {
            &["members.id"]
        };
        let query = MemberQuery::new(fetch.status, fetch.count).with_fields(fields.iter().copied());

        let members = self.0.get_list_members(api_key, list_id, &query).await?;
        Ok(members
            .into_iter()
            .map(|m| RemoteMember {
                id: m.id,
                unsubscribe_reason: m.unsubscribe_reason,
            })
            .collect())
    }

    async fn update_member_status(
        &self,
        api_key: &str,
        list_id: &str,
        member_id: &str,
        status: MemberStatus,
    ) -> Result<()> {
        self.0
            .update_member_status(api_key, list_id, member_id, status)
            .await?;
        Ok(())
    }
}

// =============================================================================
// BatchSettings
// =============================================================================

/// Process-wide knobs for a subscription job, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    /// Members fetched per job when the caller gives no limit
    pub default_fetch_limit: u32,
    /// Number of lanes (and so in-flight updates) per job
    pub max_concurrency: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            default_fetch_limit: 100,
            max_concurrency: 10,
        }
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to workflows (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub mailing_lists: Arc<dyn BaseMailingListService>,
    pub settings: BatchSettings,
}

impl ServerDeps {
    pub fn new(mailing_lists: Arc<dyn BaseMailingListService>, settings: BatchSettings) -> Self {
        Self {
            mailing_lists,
            settings,
        }
    }

    /// Production wiring: a real Mailchimp client pointed at the configured URL.
    pub fn from_config(config: &Config) -> Self {
        let client = Arc::new(MailchimpClient::with_base_url(&config.mailchimp_api_url));
        Self::new(
            Arc::new(MailchimpAdapter::new(client)),
            BatchSettings {
                default_fetch_limit: config.fetch_limit,
                max_concurrency: config.max_concurrency,
            },
        )
    }
}
