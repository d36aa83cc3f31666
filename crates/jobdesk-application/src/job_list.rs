//! Dashboard job list.

use crate::notifications::Notifications;
use jobdesk_core::Result;
use jobdesk_core::job::{Job, JobApi, Report};
use jobdesk_core::session::Session;
use std::sync::Arc;

pub const LOAD_FAILED: &str = "Failed to load jobs";
pub const DELETE_SUCCEEDED: &str = "Job deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete job";
pub const REPORT_UNAVAILABLE: &str = "Report not available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
}

/// Snapshot of the user's jobs plus the operations the dashboard offers.
///
/// Every operation makes a single request. Failures are surfaced as
/// notifications and never mutate the snapshot.
pub struct JobListViewModel {
    api: Arc<dyn JobApi>,
    jobs: Vec<Job>,
    state: LoadState,
}

impl JobListViewModel {
    pub fn new(api: Arc<dyn JobApi>) -> Self {
        Self {
            api,
            jobs: Vec::new(),
            state: LoadState::Loading,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Fetches the job list.
    ///
    /// On failure the previous snapshot is kept. Either way the view ends
    /// up `Loaded`.
    pub async fn refresh(&mut self, session: &Session, notifications: &mut Notifications) {
        self.state = LoadState::Loading;

        match self.api.list_jobs(session).await {
            Ok(jobs) => {
                tracing::debug!(count = jobs.len(), "Loaded jobs");
                self.jobs = jobs;
            }
            Err(e) => {
                tracing::warn!("Failed to load jobs: {}", e);
                notifications.error(LOAD_FAILED);
            }
        }

        self.state = LoadState::Loaded;
    }

    /// Deletes one job and drops it from the snapshot without refetching.
    ///
    /// # Returns
    ///
    /// `true` when the backend confirmed the delete.
    pub async fn delete(
        &mut self,
        session: &Session,
        job_id: &str,
        notifications: &mut Notifications,
    ) -> bool {
        match self.api.delete_job(session, job_id).await {
            Ok(()) => {
                self.jobs.retain(|job| job.job_id != job_id);
                tracing::info!(job_id, "Deleted job");
                notifications.success(DELETE_SUCCEEDED);
                true
            }
            Err(e) => {
                tracing::warn!(job_id, "Failed to delete job: {}", e);
                notifications.error(DELETE_FAILED);
                false
            }
        }
    }

    /// Resolves the downloadable report location for a job.
    pub async fn report_url(
        &self,
        session: &Session,
        job_id: &str,
        notifications: &mut Notifications,
    ) -> Result<String> {
        self.api
            .report_url(session, job_id)
            .await
            .inspect(|url| tracing::debug!(job_id, url = %url, "Resolved report"))
            .inspect_err(|e| {
                tracing::warn!(job_id, "Report not available: {}", e);
                notifications.error(REPORT_UNAVAILABLE);
            })
    }

    /// Downloads a job's report in one request chain.
    pub async fn fetch_report(
        &self,
        session: &Session,
        job_id: &str,
        notifications: &mut Notifications,
    ) -> Result<Report> {
        self.api
            .fetch_report(session, job_id)
            .await
            .inspect(|report| tracing::debug!(job_id, url = %report.url, "Fetched report"))
            .inspect_err(|e| {
                tracing::warn!(job_id, "Report not available: {}", e);
                notifications.error(REPORT_UNAVAILABLE);
            })
    }

    /// Forgets the snapshot, e.g. after sign-out.
    pub fn reset(&mut self) {
        self.jobs.clear();
        self.state = LoadState::Loading;
    }
}
