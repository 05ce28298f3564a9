use std::fmt;
use std::str::FromStr;

use crate::domains::subscriptions::SubscriptionError;
use crate::kernel::RemoteMember;

/// Reason string the platform records when staff unsubscribe a member from
/// the management console. Only these members are re-subscribed.
pub const ADMIN_UNSUBSCRIBE_REASON: &str = "N/A (Unsubscribed by admin)";

/// Caller-supplied API key. Lives for one job; never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Human-facing numeric list id (the "web id").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WebId(pub u64);

impl FromStr for WebId {
    type Err = SubscriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(WebId)
            .map_err(|_| SubscriptionError::InvalidListRef(s.to_string()))
    }
}

impl fmt::Display for WebId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform-internal list id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListId(String);

impl ListId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fetched member stamped with the list it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub list_id: ListId,
    pub unsubscribe_reason: Option<String>,
}

impl Member {
    pub fn from_remote(remote: RemoteMember, list_id: ListId) -> Self {
        Self {
            id: remote.id,
            list_id,
            unsubscribe_reason: remote.unsubscribe_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("0123456789abcdef-us12");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key.expose(), "0123456789abcdef-us12");
    }

    #[test]
    fn web_id_parses_trimmed_numbers() {
        assert_eq!(" 200 ".parse::<WebId>().unwrap(), WebId(200));
        assert!(matches!(
            "abc".parse::<WebId>(),
            Err(SubscriptionError::InvalidListRef(s)) if s == "abc"
        ));
    }
}
