//! Subscription activities - the individual steps a toggle job is built from

mod batch_update;
mod filter_members;
mod resolve_list;
mod update_member;

pub use batch_update::{partition_lanes, run_batch, run_lane};
pub use filter_members::filter_for_transition;
pub use resolve_list::{resolve_list, select_list};
pub use update_member::update_member;
