pub mod job;
pub mod member;
pub mod status;

pub use job::{JobOutcome, JobPhase, JobStatus, ToggleRequest, FAILED_COUNT};
pub use member::{ApiKey, ListId, Member, WebId, ADMIN_UNSUBSCRIBE_REASON};
pub use status::TargetStatus;
