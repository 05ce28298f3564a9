// Mailing list subscription toggle - API Core
//
// This crate flips members of a mailing list between subscribed and
// unsubscribed in one request-triggered batch job.
//
// Workflows are organized per-domain in domains/*/workflows/

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
