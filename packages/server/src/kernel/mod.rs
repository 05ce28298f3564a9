//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{BatchSettings, MailchimpAdapter, ServerDeps};
pub use test_dependencies::{MockMailingListService, TestDependencies};
pub use traits::*;
