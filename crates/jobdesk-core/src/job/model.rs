//! Job domain model.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing status reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Queued,
    Progressed,
    Done,
    Failed,
    /// Any status string this client does not know about
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "QUEUED",
            JobStatus::Progressed => "PROGRESSED",
            JobStatus::Done => "DONE",
            JobStatus::Failed => "FAILED",
            JobStatus::Unknown => "UNKNOWN",
        }
    }

    /// No further transitions will happen server-side.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot of one job as last fetched from the API.
///
/// Never locally authoritative: the client only holds what `GET /jobs`
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(deserialize_with = "crate::serde_ids::opaque_id")]
    pub job_id: String,
    /// Creation timestamp exactly as sent by the API
    pub created_at: String,
    pub status: JobStatus,
}

impl Job {
    pub fn new(job_id: impl Into<String>, created_at: impl Into<String>, status: JobStatus) -> Self {
        Self {
            job_id: job_id.into(),
            created_at: created_at.into(),
            status,
        }
    }

    /// Only finished jobs have a downloadable report.
    pub fn report_available(&self) -> bool {
        self.status == JobStatus::Done
    }

    /// Calendar date of `created_at`, if the timestamp is parseable.
    ///
    /// Accepts RFC 3339 as well as the zone-less ISO form some servers emit.
    pub fn created_date(&self) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.created_at) {
            return Some(dt.date_naive());
        }
        NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.date())
    }
}

/// A report body together with the URL it was finally served from.
#[derive(Clone, PartialEq, Eq)]
pub struct Report {
    pub url: String,
    pub content: Vec<u8>,
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report")
            .field("url", &self.url)
            .field("content_len", &self.content.len())
            .finish()
    }
}
