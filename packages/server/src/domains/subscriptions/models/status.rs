use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domains::subscriptions::SubscriptionError;
use crate::kernel::MemberStatus;

/// Status every fetched member is moved to by a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    Subscribed,
    Unsubscribed,
}

impl TargetStatus {
    /// The status members must currently have to be picked up by the job.
    pub fn opposite(self) -> Self {
        match self {
            TargetStatus::Subscribed => TargetStatus::Unsubscribed,
            TargetStatus::Unsubscribed => TargetStatus::Subscribed,
        }
    }

    /// Re-subscribing filters on the unsubscribe reason, so it must be fetched.
    pub fn include_unsubscribe_reason(self) -> bool {
        self == TargetStatus::Subscribed
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetStatus::Subscribed => "subscribed",
            TargetStatus::Unsubscribed => "unsubscribed",
        }
    }
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetStatus {
    type Err = SubscriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "subscribed" => Ok(TargetStatus::Subscribed),
            "unsubscribed" => Ok(TargetStatus::Unsubscribed),
            other => Err(SubscriptionError::InvalidStatus(other.to_string())),
        }
    }
}

impl From<TargetStatus> for MemberStatus {
    fn from(status: TargetStatus) -> Self {
        match status {
            TargetStatus::Subscribed => MemberStatus::Subscribed,
            TargetStatus::Unsubscribed => MemberStatus::Unsubscribed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_flips_both_ways() {
        assert_eq!(TargetStatus::Subscribed.opposite(), TargetStatus::Unsubscribed);
        assert_eq!(TargetStatus::Unsubscribed.opposite(), TargetStatus::Subscribed);
    }

    #[test]
    fn parses_platform_spelling_only() {
        assert_eq!("subscribed".parse::<TargetStatus>().unwrap(), TargetStatus::Subscribed);
        assert_eq!(" unsubscribed ".parse::<TargetStatus>().unwrap(), TargetStatus::Unsubscribed);
        assert!(matches!(
            "cleaned".parse::<TargetStatus>(),
            Err(SubscriptionError::InvalidStatus(s)) if s == "cleaned"
        ));
    }
}
