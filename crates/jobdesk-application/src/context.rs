//! Client context: the single owner of all client-side state.
//!
//! This module provides `ClientContext`, which wires the session store, the
//! navigation controller and the two screen view models together so that
//! every front end drives them the same way.

use crate::job_list::JobListViewModel;
use crate::new_job::{NewJobFlow, SubmitOutcome};
use crate::notifications::Notifications;
use crate::session_store::{SessionStore, validate_email, validate_password};
use jobdesk_core::job::{JobApi, Report};
use jobdesk_core::navigation::{NavigationController, Screen};
use jobdesk_core::notification::Notification;
use jobdesk_core::session::{AuthApi, KeyValueStore, Session};
use jobdesk_core::upload::{AddFilesOutcome, SelectedFile};
use jobdesk_core::{JobdeskError, Result};
use std::sync::Arc;

/// Inline message shown on the sign-in screen after a rejected attempt.
pub const SIGN_IN_FAILED: &str = "Invalid credentials. Please try again.";
/// Inline message shown on the sign-up screen after a rejected attempt.
pub const SIGN_UP_FAILED: &str = "Sign up failed. Please try again.";

/// Explicitly constructed client state, passed by reference.
///
/// # Responsibilities
///
/// - Restoring the persisted session at startup
/// - Applying the automatic navigation rule whenever authentication changes
/// - Running the mount effects of each screen (the dashboard loads jobs, the
///   new-job screen starts from an empty selection)
/// - Guarding protected operations behind a present session
/// - Collecting notifications for the front end to display
pub struct ClientContext {
    session: SessionStore,
    navigation: NavigationController,
    jobs: JobListViewModel,
    new_job: NewJobFlow,
    notifications: Notifications,
}

impl ClientContext {
    /// Creates a context on the landing screen with restore still pending.
    ///
    /// # Arguments
    ///
    /// * `storage` - Persistent key/value store holding the credentials
    /// * `auth_api` - Sign-in and sign-up endpoints
    /// * `job_api` - Job endpoints
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        auth_api: Arc<dyn AuthApi>,
        job_api: Arc<dyn JobApi>,
    ) -> Self {
        Self {
            session: SessionStore::new(storage, auth_api),
            navigation: NavigationController::new(),
            jobs: JobListViewModel::new(job_api.clone()),
            new_job: NewJobFlow::new(job_api),
            notifications: Notifications::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.navigation.current()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.session()
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.session
    }

    pub fn jobs(&self) -> &JobListViewModel {
        &self.jobs
    }

    pub fn new_job(&self) -> &NewJobFlow {
        &self.new_job
    }

    /// Removes and returns all pending notifications.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Restores the persisted session and settles navigation.
    ///
    /// Returns the screen the controller lands on: `dashboard` (with jobs
    /// loaded) when a session was restored, `landing` otherwise.
    pub async fn start(&mut self) -> Screen {
        self.navigation.on_auth_change(false, true);
        self.session.restore();
        self.sync_navigation().await
    }

    /// Explicit navigation, followed by the target screen's mount effects.
    pub async fn navigate(&mut self, to: Screen) -> Screen {
        self.navigation.navigate(to);
        self.mount(to).await;
        to
    }

    /// Signs in and moves to the dashboard.
    ///
    /// A rejected attempt is reported as [`SIGN_IN_FAILED`]; the screen is
    /// left where it was.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session> {
        validate_email(email)?;

        let session = self
            .session
            .sign_in(email, password)
            .await
            .map_err(|e| user_facing(e, SIGN_IN_FAILED))?;
        self.after_authentication().await;
        Ok(session)
    }

    /// Signs up and moves to the dashboard.
    ///
    /// Password length is checked first; a short password never reaches
    /// the API.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<Session> {
        validate_email(email)?;
        validate_password(password)?;

        let session = self
            .session
            .sign_up(email, password)
            .await
            .map_err(|e| user_facing(e, SIGN_UP_FAILED))?;
        self.after_authentication().await;
        Ok(session)
    }

    /// Signs out and returns to the landing screen.
    pub async fn sign_out(&mut self) -> Screen {
        self.session.sign_out();
        self.jobs.reset();
        self.new_job.reset();
        self.navigation.navigate(Screen::Landing);
        self.sync_navigation().await
    }

    /// Reloads the dashboard job list.
    pub async fn refresh_jobs(&mut self) -> Result<()> {
        let session = self.require_session()?;
        self.jobs.refresh(&session, &mut self.notifications).await;
        Ok(())
    }

    /// Deletes a job. `Ok(false)` means the backend refused.
    pub async fn delete_job(&mut self, job_id: &str) -> Result<bool> {
        let session = self.require_session()?;
        Ok(self
            .jobs
            .delete(&session, job_id, &mut self.notifications)
            .await)
    }

    /// Resolves the report URL for a job.
    pub async fn report_url(&mut self, job_id: &str) -> Result<String> {
        let session = self.require_session()?;
        self.jobs
            .report_url(&session, job_id, &mut self.notifications)
            .await
    }

    /// Downloads the report for a job.
    pub async fn fetch_report(&mut self, job_id: &str) -> Result<Report> {
        let session = self.require_session()?;
        self.jobs
            .fetch_report(&session, job_id, &mut self.notifications)
            .await
    }

    pub fn add_files<I>(&mut self, files: I) -> AddFilesOutcome
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        self.new_job.add_files(files, &mut self.notifications)
    }

    pub fn remove_file(&mut self, index: usize) -> Option<SelectedFile> {
        self.new_job.remove_file(index)
    }

    /// Submits the selection as a new job.
    ///
    /// On success, waits out the redirect delay and moves to the dashboard,
    /// which reloads the job list.
    pub async fn submit_job(&mut self) -> Result<SubmitOutcome> {
        let session = self.require_session()?;
        let outcome = self.new_job.submit(&session, &mut self.notifications).await;

        if let SubmitOutcome::Created { redirect_after } = outcome {
            tokio::time::sleep(redirect_after).await;
            self.navigate(Screen::Dashboard).await;
        }
        Ok(outcome)
    }

    async fn after_authentication(&mut self) {
        self.navigate(Screen::Dashboard).await;
        self.sync_navigation().await;
    }

    /// Feeds the current authentication state to the controller and mounts
    /// the screen it moves to, if any.
    async fn sync_navigation(&mut self) -> Screen {
        let before = self.navigation.current();
        let after = self
            .navigation
            .on_auth_change(self.session.is_authenticated(), self.session.is_restoring());
        if after != before {
            self.mount(after).await;
        }
        after
    }

    async fn mount(&mut self, screen: Screen) {
        match screen {
            Screen::Dashboard => {
                if let Some(session) = self.session.session().cloned() {
                    self.jobs.refresh(&session, &mut self.notifications).await;
                }
            }
            Screen::NewJob => self.new_job.reset(),
            Screen::Landing | Screen::SignIn | Screen::SignUp => {}
        }
    }

    fn require_session(&self) -> Result<Session> {
        self.session
            .session()
            .cloned()
            .ok_or(JobdeskError::NotAuthenticated)
    }
}

fn user_facing(error: JobdeskError, message: &str) -> JobdeskError {
    if error.is_authentication() {
        JobdeskError::authentication(message)
    } else {
        error
    }
}
