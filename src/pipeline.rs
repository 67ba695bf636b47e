use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::fingerprint::Fingerprint;
use crate::remote::{DiarizationSettings, JobRequest, JobService, JobStatus, ObjectStore};
use crate::transcript::{self, TranscriptionResult};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// The whole transcription run: one linear sequence per invocation.
///
/// read file → hash → (conditionally) upload → (conditionally) start job →
/// poll until terminal → download result → format → write output.
///
/// The poll loop is the only suspension point; it races the timer against the
/// caller's cancellation token, and a cancelled run never writes output.
pub struct Pipeline<S, J> {
    store: S,
    jobs: J,
    config: AppConfig,
    poll_interval: Duration,
}

impl<S: ObjectStore, J: JobService> Pipeline<S, J> {
    pub fn new(store: S, jobs: J, config: AppConfig) -> Self {
        Self {
            store,
            jobs,
            config,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the job status poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Execute the pipeline. Cancellation surfaces as `Error::Cancelled`.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<()> {
        self.config.validate()?;

        let fingerprint = Fingerprint::from_file(&self.config.input_path).await?;
        let storage_key = fingerprint.storage_key(&self.config.input_file_name());
        let job_name = fingerprint.job_name();
        info!(key = %storage_key, "using storage key");
        info!(job = %job_name, "using transcription job name");

        self.store.bucket_exists(&self.config.bucket).await?;

        if self.store.object_exists(&self.config.bucket, &storage_key).await? {
            info!("media already uploaded; skipping upload");
        } else {
            info!("uploading media");
            self.store
                .put_file(&self.config.bucket, &storage_key, &self.config.input_path)
                .await?;
            info!("upload completed");
        }

        self.ensure_job(cancel, &job_name, &storage_key).await?;
        info!("transcription job completed");

        // The service names the result document "<jobName>.json" in the
        // output bucket.
        let result_key = format!("{job_name}.json");
        info!(key = %result_key, "retrieving transcription result");
        let raw = self.store.get(&self.config.bucket, &result_key).await?;
        let result: TranscriptionResult = serde_json::from_slice(&raw)?;

        let text = transcript::render(&result, self.config.diarization)?;

        tokio::fs::write(&self.config.output_path, text).await?;
        info!(path = ?self.config.output_path, "transcript saved");
        Ok(())
    }

    /// Ensure exactly one transcription job exists for the fingerprint and
    /// block until it reaches a terminal state.
    async fn ensure_job(
        &self,
        cancel: &CancellationToken,
        job_name: &str,
        media_key: &str,
    ) -> Result<()> {
        match self.jobs.status(job_name).await? {
            Some(status) if self.config.force => {
                warn!(job = job_name, %status, "force: deleting existing job");
                self.jobs.delete(job_name).await?;
                self.start_job(job_name, media_key).await?;
            }
            Some(JobStatus::Completed) => {
                info!(job = job_name, "job already completed");
                return Ok(());
            }
            Some(JobStatus::Failed(reason)) => {
                return Err(Error::JobFailed(
                    reason.unwrap_or_else(|| "no failure reason reported".to_string()),
                ));
            }
            Some(status) => {
                info!(job = job_name, %status, "job already exists; waiting");
            }
            None => {
                self.start_job(job_name, media_key).await?;
            }
        }

        self.wait_for_job(cancel, job_name).await
    }

    async fn start_job(&self, job_name: &str, media_key: &str) -> Result<()> {
        let request = JobRequest {
            job_name: job_name.to_string(),
            bucket: self.config.bucket.clone(),
            media_key: media_key.to_string(),
            language_code: self.config.language_code.clone(),
            media_format: self.config.media_format(),
            diarization: self.config.diarization.then_some(DiarizationSettings {
                max_speakers: self.config.max_speakers,
            }),
        };
        info!(job = job_name, "starting transcription job");
        self.jobs.start(&request).await?;
        info!(job = job_name, "transcription job started");
        Ok(())
    }

    /// Poll the job on a fixed interval until COMPLETED or FAILED, or until
    /// the cancellation token fires.
    async fn wait_for_job(&self, cancel: &CancellationToken, job_name: &str) -> Result<()> {
        info!(job = job_name, "waiting for transcription job to complete");
        let mut ticker = tokio::time::interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                _ = ticker.tick() => {
                    match self.jobs.status(job_name).await? {
                        Some(JobStatus::Completed) => return Ok(()),
                        Some(JobStatus::Failed(reason)) => {
                            return Err(Error::JobFailed(
                                reason.unwrap_or_else(|| "no failure reason reported".to_string()),
                            ));
                        }
                        Some(status) => info!(job = job_name, %status, "job status"),
                        None => {
                            return Err(Error::JobService(format!(
                                "job {job_name:?} disappeared while polling"
                            )));
                        }
                    }
                }
            }
        }
    }
}
