mod toggle;

pub use toggle::toggle_subscriptions;
