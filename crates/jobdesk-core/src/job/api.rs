//! Job API trait.

use super::model::{Job, Report};
use crate::error::Result;
use crate::session::Session;
use crate::upload::SelectedFile;
use async_trait::async_trait;

/// The remote job endpoints. Every call is authenticated with the session's
/// bearer token and makes a single attempt.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// `GET /jobs`.
    async fn list_jobs(&self, session: &Session) -> Result<Vec<Job>>;

    /// `DELETE /jobs/{id}`.
    async fn delete_job(&self, session: &Session, job_id: &str) -> Result<()>;

    /// `POST /jobs` as one multipart request with one `images` part per file.
    async fn create_job(&self, session: &Session, files: &[SelectedFile]) -> Result<()>;

    /// `GET /jobs/{id}/report`, following redirects.
    ///
    /// # Returns
    ///
    /// The final URL of the downloadable report.
    async fn report_url(&self, session: &Session, job_id: &str) -> Result<String>;

    /// `GET /jobs/{id}/report`, following redirects and reading the body of
    /// the final response. The resource is fetched exactly once.
    async fn fetch_report(&self, session: &Session, job_id: &str) -> Result<Report>;
}
