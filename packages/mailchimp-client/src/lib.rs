//! Pure Mailchimp Marketing REST API client.
//!
//! A minimal client for the three list/member operations the subscription
//! toggler needs: listing the lists an API key can see, listing members of a
//! list by status, and patching a single member's status.
//!
//! The API key is passed per call rather than held by the client, so one
//! client (and its connection pool) can serve many callers.
//!
//! # Example
//!
//! ```rust,ignore
//! use mailchimp_client::{MailchimpClient, MemberQuery, MemberStatus};
//!
//! let client = MailchimpClient::new();
//!
//! let lists = client.get_lists("key-us12").await?;
//! let query = MemberQuery::new(MemberStatus::Unsubscribed, 100)
//!     .with_fields(["members.id", "members.unsubscribe_reason"]);
//! let members = client.get_list_members("key-us12", &lists[0].id, &query).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{MailchimpError, Result};
pub use types::{ListMember, ListSummary, MemberQuery, MemberStatus};

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use types::{ListsResponse, MembersResponse, UpdateMemberStatus};

pub const DEFAULT_BASE_URL: &str = "https://us12.api.mailchimp.com/3.0";

/// Upper bound on lists requested in one directory read.
const MAX_LISTS: u32 = 1000;

#[derive(Debug, Clone)]
pub struct MailchimpClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for MailchimpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MailchimpClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at another datacenter or a test server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the `{id, web_id}` pair of every list visible to the key.
    pub async fn get_lists(&self, api_key: &str) -> Result<Vec<ListSummary>> {
        let url = format!("{}/lists", self.base_url);
        let count = MAX_LISTS.to_string();
        let request = self
            .client
            .get(&url)
            .query(&[("fields", "lists.id,lists.web_id"), ("count", count.as_str())]);

        let resp: ListsResponse = self.send_json(request, api_key).await?;
        tracing::debug!(count = resp.lists.len(), "Fetched Mailchimp lists");
        Ok(resp.lists)
    }

    /// Fetch members of `list_id` that currently have `query.status`.
    pub async fn get_list_members(
        &self,
        api_key: &str,
        list_id: &str,
        query: &MemberQuery,
    ) -> Result<Vec<ListMember>> {
        let url = format!("{}/lists/{}/members", self.base_url, list_id);
        let count = query.count.to_string();
        let mut params = vec![
            ("count", count),
            ("status", query.status.as_str().to_string()),
        ];
        if !query.fields.is_empty() {
            params.push(("fields", query.fields.join(",")));
        }

        let request = self.client.get(&url).query(&params);
        let resp: MembersResponse = self.send_json(request, api_key).await?;
        tracing::debug!(
            list_id,
            status = query.status.as_str(),
            count = resp.members.len(),
            "Fetched list members"
        );
        Ok(resp.members)
    }

    /// Set a single member's status. Any 2xx counts as success; the body is ignored.
    pub async fn update_member_status(
        &self,
        api_key: &str,
        list_id: &str,
        member_id: &str,
        status: MemberStatus,
    ) -> Result<()> {
        let url = format!("{}/lists/{}/members/{}", self.base_url, list_id, member_id);
        let request = self
            .client
            .patch(&url)
            .json(&UpdateMemberStatus { status });

        self.send(request, api_key).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, api_key: &str) -> Result<Response> {
        let resp = request
            .header(AUTHORIZATION, format!("apikey {}", api_key))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MailchimpError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        api_key: &str,
    ) -> Result<T> {
        let resp = self.send(request, api_key).await?;
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
