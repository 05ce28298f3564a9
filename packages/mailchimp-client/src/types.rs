use serde::{Deserialize, Serialize};

/// Member subscription status as the API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Subscribed,
    Unsubscribed,
    Cleaned,
    Pending,
    Transactional,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Subscribed => "subscribed",
            MemberStatus::Unsubscribed => "unsubscribed",
            MemberStatus::Cleaned => "cleaned",
            MemberStatus::Pending => "pending",
            MemberStatus::Transactional => "transactional",
        }
    }
}

/// One entry of `GET /lists`, trimmed to the two ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListSummary {
    pub id: String,
    pub web_id: u64,
}

/// One entry of `GET /lists/{id}/members`, trimmed by the `fields` filter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListMember {
    pub id: String,
    #[serde(default)]
    pub unsubscribe_reason: Option<String>,
}

/// Query parameters for listing members.
#[derive(Debug, Clone)]
pub struct MemberQuery {
    pub status: MemberStatus,
    pub count: u32,
    /// Partial-response field paths, e.g. `members.id`.
    pub fields: Vec<String>,
}

impl MemberQuery {
    pub fn new(status: MemberStatus, count: u32) -> Self {
        Self {
            status,
            count,
            fields: Vec::new(),
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListsResponse {
    #[serde(default)]
    pub lists: Vec<ListSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MembersResponse {
    #[serde(default)]
    pub members: Vec<ListMember>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateMemberStatus {
    pub status: MemberStatus,
}
