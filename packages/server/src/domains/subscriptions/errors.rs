use thiserror::Error;

/// Errors that abort a subscription job.
///
/// Per-member update failures are deliberately absent: they are absorbed into
/// a `false` result by `update_member` and never reach the job level.
#[derive(Error, Debug)]
pub enum SubscriptionError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid list id: {0:?}")]
    InvalidListRef(String),

    #[error("Invalid status: {0:?} (expected \"subscribed\" or \"unsubscribed\")")]
    InvalidStatus(String),

    #[error("Invalid member count: {0:?}")]
    InvalidFetchLimit(String),

    #[error("Unknown list web id: {web_id}")]
    UnknownList { web_id: u64 },

    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(#[source] anyhow::Error),
}

impl SubscriptionError {
    /// True for errors caused by the caller's input rather than the platform.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            SubscriptionError::MissingField(_)
                | SubscriptionError::InvalidListRef(_)
                | SubscriptionError::InvalidStatus(_)
                | SubscriptionError::InvalidFetchLimit(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SubscriptionError>;
