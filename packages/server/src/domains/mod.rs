// Business domains
pub mod subscriptions;
