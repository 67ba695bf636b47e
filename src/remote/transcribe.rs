use async_trait::async_trait;
use aws_sdk_transcribe::types::{
    LanguageCode, Media, MediaFormat, Settings, TranscriptionJobStatus,
};

use crate::error::{Error, Result};

use super::{JobRequest, JobService, JobStatus};

/// Amazon Transcribe-backed job service.
pub struct TranscribeJobs {
    client: aws_sdk_transcribe::Client,
}

impl TranscribeJobs {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_transcribe::Client::new(config),
        }
    }
}

#[async_trait]
impl JobService for TranscribeJobs {
    async fn status(&self, job_name: &str) -> Result<Option<JobStatus>> {
        let resp = match self
            .client
            .get_transcription_job()
            .transcription_job_name(job_name)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let service_err = e.into_service_error();
                if is_job_not_found(&service_err) {
                    return Ok(None);
                }
                return Err(Error::JobService(format!(
                    "get transcription job {job_name:?}: {service_err}"
                )));
            }
        };

        let job = resp
            .transcription_job()
            .ok_or_else(|| Error::JobService("no job in response".to_string()))?;

        let status = match job.transcription_job_status() {
            Some(TranscriptionJobStatus::Queued) => JobStatus::Queued,
            Some(TranscriptionJobStatus::InProgress) => JobStatus::InProgress,
            Some(TranscriptionJobStatus::Completed) => JobStatus::Completed,
            Some(TranscriptionJobStatus::Failed) => {
                JobStatus::Failed(job.failure_reason().map(str::to_string))
            }
            Some(other) => JobStatus::Other(other.as_str().to_string()),
            None => JobStatus::Other("UNKNOWN".to_string()),
        };
        Ok(Some(status))
    }

    async fn start(&self, request: &JobRequest) -> Result<()> {
        let media_uri = format!("s3://{}/{}", request.bucket, request.media_key);
        let media = Media::builder().media_file_uri(&media_uri).build();

        let mut call = self
            .client
            .start_transcription_job()
            .transcription_job_name(&request.job_name)
            .language_code(LanguageCode::from(request.language_code.as_str()))
            .media_format(media_format_for_extension(&request.media_format)?)
            .media(media)
            .output_bucket_name(&request.bucket);

        if let Some(diarization) = request.diarization {
            let settings = Settings::builder()
                .show_speaker_labels(true)
                .max_speaker_labels(diarization.max_speakers)
                .build();
            call = call.settings(settings);
        }

        call.send().await.map_err(|e| {
            Error::JobService(format!(
                "start transcription job {:?}: {}",
                request.job_name,
                e.into_service_error()
            ))
        })?;
        Ok(())
    }

    async fn delete(&self, job_name: &str) -> Result<()> {
        self.client
            .delete_transcription_job()
            .transcription_job_name(job_name)
            .send()
            .await
            .map_err(|e| {
                Error::JobService(format!(
                    "delete transcription job {job_name:?}: {}",
                    e.into_service_error()
                ))
            })?;
        Ok(())
    }
}

/// Transcribe reports a missing job either as a NotFoundException or as a
/// BadRequestException carrying a "couldn't be found" message.
fn is_job_not_found(
    err: &aws_sdk_transcribe::operation::get_transcription_job::GetTranscriptionJobError,
) -> bool {
    use aws_sdk_transcribe::operation::get_transcription_job::GetTranscriptionJobError as E;
    match err {
        E::NotFoundException(_) => true,
        E::BadRequestException(e) => e
            .message()
            .is_some_and(|m| m.contains("couldn't be found")),
        _ => false,
    }
}

/// Map a file extension to a Transcribe `MediaFormat`.
fn media_format_for_extension(ext: &str) -> Result<MediaFormat> {
    let format = match ext {
        "mp3" => MediaFormat::Mp3,
        "mp4" => MediaFormat::Mp4,
        "m4a" => MediaFormat::M4A,
        "wav" => MediaFormat::Wav,
        "flac" => MediaFormat::Flac,
        "ogg" => MediaFormat::Ogg,
        "amr" => MediaFormat::Amr,
        "webm" => MediaFormat::Webm,
        other => {
            return Err(Error::JobService(format!(
                "unsupported media format {other:?}"
            )))
        }
    };
    Ok(format)
}
