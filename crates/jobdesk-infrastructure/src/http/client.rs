//! REST client for the jobs API.
//!
//! Endpoints (relative to the configured base URL):
//!
//! | method | path | auth |
//! |---|---|---|
//! | POST | `/auth/signin` | - |
//! | POST | `/auth/signup` | - |
//! | GET | `/jobs` | bearer |
//! | POST | `/jobs` (multipart `images`) | bearer |
//! | DELETE | `/jobs/{id}` | bearer |
//! | GET | `/jobs/{id}/report` (redirects) | bearer |

use async_trait::async_trait;
use jobdesk_core::config::ClientConfig;
use jobdesk_core::job::{Job, JobApi, Report};
use jobdesk_core::session::{AuthApi, AuthGrant, Credentials, Session};
use jobdesk_core::upload::SelectedFile;
use jobdesk_core::{JobdeskError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};

/// Longest slice of an error body kept in [`JobdeskError::Api`].
const MAX_ERROR_BODY: usize = 512;

/// Multipart field name for each uploaded image.
const IMAGES_FIELD: &str = "images";

fn transport_error(e: reqwest::Error) -> JobdeskError {
    if e.is_timeout() {
        JobdeskError::transport(format!("Request timed out: {}", e))
    } else {
        JobdeskError::transport(e.to_string())
    }
}

/// Turns a non-success response into [`JobdeskError::Api`].
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    let message = if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body
    };
    Err(JobdeskError::api(status.as_u16(), message))
}

/// HTTP implementation of [`AuthApi`] and [`JobApi`].
///
/// Redirects are followed (reqwest's default policy), which is what the
/// report endpoint relies on. The `Authorization` header is dropped on
/// cross-origin redirects.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| JobdeskError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authenticate(&self, path: &str, credentials: &Credentials) -> Result<AuthGrant> {
        let response = self
            .client
            .post(self.url(path))
            .json(credentials)
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response).await?;
        response.json::<AuthGrant>().await.map_err(transport_error)
    }

    /// `{base}/jobs/{job_id}/{tail..}` with `job_id` percent-encoded as a
    /// single path segment.
    fn job_url(&self, job_id: &str, tail: &[&str]) -> Result<Url> {
        if job_id.is_empty() || job_id == "." || job_id == ".." {
            return Err(JobdeskError::validation(format!(
                "Invalid job id '{}'",
                job_id
            )));
        }

        let mut url = Url::parse(&self.url("/jobs"))
            .map_err(|e| JobdeskError::config(format!("Invalid API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| JobdeskError::config("API base URL cannot hold a path"))?
            .push(job_id)
            .extend(tail);
        Ok(url)
    }

    /// Sends the bearer-authenticated report request; redirects are
    /// followed, so the response is the final one.
    async fn report_response(&self, session: &Session, job_id: &str) -> Result<Response> {
        let response = self
            .client
            .get(self.job_url(job_id, &["report"])?)
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await
    }
}

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthGrant> {
        self.authenticate("/auth/signin", credentials).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthGrant> {
        self.authenticate("/auth/signup", credentials).await
    }
}

#[async_trait]
impl JobApi for HttpApiClient {
    async fn list_jobs(&self, session: &Session) -> Result<Vec<Job>> {
        let response = self
            .client
            .get(self.url("/jobs"))
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response).await?;
        response.json::<Vec<Job>>().await.map_err(transport_error)
    }

    async fn delete_job(&self, session: &Session, job_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.job_url(job_id, &[])?)
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn create_job(&self, session: &Session, files: &[SelectedFile]) -> Result<()> {
        let mut form = Form::new();
        for file in files {
            let bytes = tokio::fs::read(&file.path).await.map_err(|e| {
                JobdeskError::io(format!("Failed to read {}: {}", file.path.display(), e))
            })?;
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(&file.mime_type)
                .map_err(transport_error)?;
            form = form.part(IMAGES_FIELD, part);
        }

        let response = self
            .client
            .post(self.url("/jobs"))
            .bearer_auth(&session.token)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn report_url(&self, session: &Session, job_id: &str) -> Result<String> {
        let response = self.report_response(session, job_id).await?;
        Ok(response.url().to_string())
    }

    async fn fetch_report(&self, session: &Session, job_id: &str) -> Result<Report> {
        let response = self.report_response(session, job_id).await?;
        let url = response.url().to_string();
        let content = response.bytes().await.map_err(transport_error)?.to_vec();

        tracing::debug!(job_id, bytes = content.len(), "Fetched report from {}", url);
        Ok(Report { url, content })
    }
}
