//! Job domain module.
//!
//! - `model`: `Job` snapshots, `JobStatus` and downloaded `Report`s
//! - `api`: `JobApi` trait for the remote job endpoints

mod api;
mod model;

pub use api::JobApi;
pub use model::{Job, JobStatus, Report};
