//! Hand-written test doubles shared by the application tests.

use async_trait::async_trait;
use jobdesk_core::job::{Job, JobApi, Report};
use jobdesk_core::session::{
    AuthApi, AuthGrant, Credentials, KeyValueStore, MemoryKeyValueStore, Session,
};
use jobdesk_core::upload::SelectedFile;
use jobdesk_core::{JobdeskError, Result};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub enum AuthBehavior {
    Accept { token: String, user_id: String },
    Reject(u16),
    Unreachable,
}

pub struct MockAuthApi {
    behavior: AuthBehavior,
    sign_in_calls: AtomicUsize,
    sign_up_calls: AtomicUsize,
}

impl MockAuthApi {
    fn with(behavior: AuthBehavior) -> Self {
        Self {
            behavior,
            sign_in_calls: AtomicUsize::new(0),
            sign_up_calls: AtomicUsize::new(0),
        }
    }

    pub fn accepting(token: &str, user_id: &str) -> Self {
        Self::with(AuthBehavior::Accept {
            token: token.to_string(),
            user_id: user_id.to_string(),
        })
    }

    pub fn rejecting(status: u16) -> Self {
        Self::with(AuthBehavior::Reject(status))
    }

    pub fn unreachable() -> Self {
        Self::with(AuthBehavior::Unreachable)
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn sign_up_calls(&self) -> usize {
        self.sign_up_calls.load(Ordering::SeqCst)
    }

    fn respond(&self) -> Result<AuthGrant> {
        match &self.behavior {
            AuthBehavior::Accept { token, user_id } => {
                let body = serde_json::json!({ "access_token": token, "user_id": user_id });
                Ok(serde_json::from_value(body)?)
            }
            AuthBehavior::Reject(status) => Err(JobdeskError::api(*status, "rejected")),
            AuthBehavior::Unreachable => Err(JobdeskError::transport("connection refused")),
        }
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn sign_in(&self, _credentials: &Credentials) -> Result<AuthGrant> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.respond()
    }

    async fn sign_up(&self, _credentials: &Credentials) -> Result<AuthGrant> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        self.respond()
    }
}

/// Memory store with scripted failures. Uses the provided
/// [`KeyValueStore::set_many`], one key at a time.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryKeyValueStore,
    fail_reads: bool,
    fail_writes_to: Option<&'static str>,
    fail_sets_to: Option<&'static str>,
    write_budget: Option<AtomicUsize>,
}

impl FlakyStore {
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Both `set` and `remove` of `key` fail.
    pub fn failing_writes_to(key: &'static str) -> Self {
        Self {
            fail_writes_to: Some(key),
            ..Self::default()
        }
    }

    /// Only `set` of `key` fails; removing it works.
    pub fn failing_sets_to(key: &'static str) -> Self {
        Self {
            fail_sets_to: Some(key),
            ..Self::default()
        }
    }

    /// The first `writes` calls to `set`/`remove` succeed, every later one fails.
    pub fn allowing_writes(writes: usize) -> Self {
        Self {
            write_budget: Some(AtomicUsize::new(writes)),
            ..Self::default()
        }
    }

    pub fn inner(&self) -> &MemoryKeyValueStore {
        &self.inner
    }

    fn check_write(&self, key: &str) -> Result<()> {
        if self.fail_writes_to == Some(key) {
            return Err(JobdeskError::storage(format!("quota exceeded writing {}", key)));
        }
        if let Some(budget) = &self.write_budget
            && budget
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_err()
        {
            return Err(JobdeskError::storage("storage is read-only"));
        }
        Ok(())
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(JobdeskError::storage("storage unavailable"));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_write(key)?;
        if self.fail_sets_to == Some(key) {
            return Err(JobdeskError::storage(format!("quota exceeded writing {}", key)));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_write(key)?;
        self.inner.remove(key)
    }
}

#[derive(Default)]
struct JobApiState {
    jobs: Vec<Job>,
    fail_list: bool,
    fail_delete: bool,
    fail_create: bool,
    fail_report: bool,
    list_calls: usize,
    deleted: Vec<String>,
    created: Vec<Vec<String>>,
    tokens_seen: Vec<String>,
}

/// In-memory job backend recording every call.
#[derive(Default)]
pub struct MockJobApi {
    state: Mutex<JobApiState>,
}

impl MockJobApi {
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().jobs = jobs;
        api
    }

    pub fn set_jobs(&self, jobs: Vec<Job>) {
        self.state.lock().unwrap().jobs = jobs;
    }

    pub fn fail_list(&self, fail: bool) {
        self.state.lock().unwrap().fail_list = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.state.lock().unwrap().fail_delete = fail;
    }

    pub fn fail_create(&self, fail: bool) {
        self.state.lock().unwrap().fail_create = fail;
    }

    pub fn fail_report(&self, fail: bool) {
        self.state.lock().unwrap().fail_report = fail;
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }

    /// File names of each created job, in submission order.
    pub fn created(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn tokens_seen(&self) -> Vec<String> {
        self.state.lock().unwrap().tokens_seen.clone()
    }
}

#[async_trait]
impl JobApi for MockJobApi {
    async fn list_jobs(&self, session: &Session) -> Result<Vec<Job>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        state.tokens_seen.push(session.token.clone());
        if state.fail_list {
            return Err(JobdeskError::api(500, "Internal Server Error"));
        }
        Ok(state.jobs.clone())
    }

    async fn delete_job(&self, session: &Session, job_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.tokens_seen.push(session.token.clone());
        if state.fail_delete {
            return Err(JobdeskError::api(404, "Not Found"));
        }
        state.deleted.push(job_id.to_string());
        state.jobs.retain(|job| job.job_id != job_id);
        Ok(())
    }

    async fn create_job(&self, session: &Session, files: &[SelectedFile]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.tokens_seen.push(session.token.clone());
        if state.fail_create {
            return Err(JobdeskError::api(500, "Internal Server Error"));
        }
        state
            .created
            .push(files.iter().map(|f| f.name.clone()).collect());
        Ok(())
    }

    async fn report_url(&self, session: &Session, job_id: &str) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.tokens_seen.push(session.token.clone());
        if state.fail_report {
            return Err(JobdeskError::api(404, "Not Found"));
        }
        Ok(format!("https://files.example.com/reports/{}.pdf", job_id))
    }

    async fn fetch_report(&self, session: &Session, job_id: &str) -> Result<Report> {
        let url = self.report_url(session, job_id).await?;
        Ok(Report {
            url,
            content: format!("%PDF report {}", job_id).into_bytes(),
        })
    }
}

pub fn image(name: &str) -> SelectedFile {
    SelectedFile::new(name, format!("/tmp/{}", name), "image/png", 1024)
}
