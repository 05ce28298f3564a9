//! Subscriptions domain - bulk toggling of mailing-list member status
//!
//! Architecture:
//!   HTTP route → toggle_subscriptions workflow → activities
//!   (resolve list, fetch, filter, partitioned batch update)

pub mod activities;
pub mod errors;
pub mod models;
pub mod workflows;

// Re-export commonly used types
pub use errors::{Result, SubscriptionError};
pub use models::{
    ApiKey, JobOutcome, JobStatus, ListId, Member, TargetStatus, ToggleRequest, WebId,
};
pub use workflows::toggle_subscriptions;
