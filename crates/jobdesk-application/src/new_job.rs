//! New-job upload flow.

use crate::notifications::Notifications;
use jobdesk_core::job::JobApi;
use jobdesk_core::session::Session;
use jobdesk_core::upload::{AddFilesOutcome, SelectedFile, UploadSelection};
use std::sync::Arc;
use std::time::Duration;

pub const EMPTY_SELECTION: &str = "Please select at least one image";
pub const CREATE_SUCCEEDED: &str = "Job created successfully!";
pub const CREATE_FAILED: &str = "Failed to create job";

/// Delay between a successful submit and the move back to the dashboard.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// What a call to [`NewJobFlow::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The job was created; navigate to the dashboard once `redirect_after`
    /// has elapsed.
    Created { redirect_after: Duration },
    /// Nothing was selected, no request was made
    EmptySelection,
    /// The backend refused; the selection is kept for another try
    Failed,
}

pub struct NewJobFlow {
    api: Arc<dyn JobApi>,
    selection: UploadSelection,
    submitting: bool,
}

impl NewJobFlow {
    pub fn new(api: Arc<dyn JobApi>) -> Self {
        Self {
            api,
            selection: UploadSelection::new(),
            submitting: false,
        }
    }

    pub fn files(&self) -> &[SelectedFile] {
        self.selection.files()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Adds files to the selection, raising one error notification per
    /// rejection.
    pub fn add_files<I>(&mut self, files: I, notifications: &mut Notifications) -> AddFilesOutcome
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        let outcome = self.selection.add_files(files);
        for rejection in &outcome.rejections {
            tracing::debug!(?rejection, "Rejected upload");
            notifications.error(rejection.message());
        }
        tracing::debug!(
            added = outcome.added,
            total = self.selection.len(),
            "Updated upload selection"
        );
        outcome
    }

    pub fn remove_file(&mut self, index: usize) -> Option<SelectedFile> {
        self.selection.remove(index)
    }

    /// Drops the current selection, as when the screen is entered anew.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.submitting = false;
    }

    /// Uploads the whole selection as one job.
    pub async fn submit(
        &mut self,
        session: &Session,
        notifications: &mut Notifications,
    ) -> SubmitOutcome {
        if self.selection.is_empty() {
            notifications.error(EMPTY_SELECTION);
            return SubmitOutcome::EmptySelection;
        }

        self.submitting = true;
        let result = self.api.create_job(session, self.selection.files()).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                tracing::info!(files = self.selection.len(), "Created job");
                self.selection.clear();
                notifications.success(CREATE_SUCCEEDED);
                SubmitOutcome::Created {
                    redirect_after: REDIRECT_DELAY,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to create job: {}", e);
                notifications.error(CREATE_FAILED);
                SubmitOutcome::Failed
            }
        }
    }
}
