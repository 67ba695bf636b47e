//! Capability interfaces over the managed services.
//!
//! The pipeline only sees these traits; the AWS-backed implementations live in
//! the sibling modules and tests substitute in-memory fakes. Every method
//! distinguishes a typed "not found" condition from a genuine failure.

pub mod s3;
pub mod transcribe;

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

pub use s3::S3Store;
pub use transcribe::TranscribeJobs;

/// Durable blob storage for the uploaded media and the job result document.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fails when the bucket does not exist or is not accessible.
    async fn bucket_exists(&self, bucket: &str) -> Result<()>;

    /// Whether the object is already present. A service-side "not found" is
    /// the `false` branch, never an error.
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool>;

    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()>;

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
}

/// Asynchronous batch transcription jobs.
#[async_trait]
pub trait JobService: Send + Sync {
    /// `None` when no job with that name exists.
    async fn status(&self, job_name: &str) -> Result<Option<JobStatus>>;

    async fn start(&self, request: &JobRequest) -> Result<()>;

    /// Remove an existing job so its name can be reused.
    async fn delete(&self, job_name: &str) -> Result<()>;
}

/// Remote job status. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed,
    Failed(Option<String>),
    /// A status string this client does not know; treated as still running.
    Other(String),
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed(_))
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => f.write_str("QUEUED"),
            JobStatus::InProgress => f.write_str("IN_PROGRESS"),
            JobStatus::Completed => f.write_str("COMPLETED"),
            JobStatus::Failed(_) => f.write_str("FAILED"),
            JobStatus::Other(s) => f.write_str(s),
        }
    }
}

/// Everything needed to submit a transcription job.
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub job_name: String,
    pub bucket: String,
    pub media_key: String,
    pub language_code: String,
    /// Lowercased media file extension (`m4a`, `wav`, ...).
    pub media_format: String,
    pub diarization: Option<DiarizationSettings>,
}

/// Speaker diarization parameters, present only when requested.
#[derive(Debug, Clone, Copy)]
pub struct DiarizationSettings {
    pub max_speakers: i32,
}
