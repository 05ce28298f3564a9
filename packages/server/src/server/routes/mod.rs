// HTTP routes
pub mod form;
pub mod health;
pub mod jobs;

pub use form::*;
pub use health::*;
pub use jobs::*;
