//! Application layer for Jobdesk.
//!
//! This crate holds the client-side services that sit between the domain
//! types in `jobdesk-core` and a front end: the session store, the job list
//! and upload view models, and the `ClientContext` that owns them.

pub mod context;
pub mod job_list;
pub mod new_job;
pub mod notifications;
pub mod session_store;

#[cfg(test)]
mod test_support;

pub use context::ClientContext;
pub use job_list::{JobListViewModel, LoadState};
pub use new_job::{NewJobFlow, SubmitOutcome};
pub use notifications::Notifications;
pub use session_store::{SessionStore, validate_password};
