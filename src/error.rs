/// Errors surfaced by the transcription pipeline.
///
/// Remote "not found" conditions are not represented here: they are expected
/// idempotence branches handled inside the collaborators, never failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad flags, paths, or bucket names. Raised before any remote call.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A genuine object-store failure (network, access denied, ...).
    #[error("object store: {0}")]
    Storage(String),

    /// A genuine transcription-service failure.
    #[error("transcription service: {0}")]
    JobService(String),

    /// The remote job reached the terminal FAILED status.
    #[error("transcription job failed: {0}")]
    JobFailed(String),

    /// A completed job whose result carries no transcript at all.
    #[error("no transcript found in result")]
    NoTranscript,

    /// The downloaded result document could not be decoded.
    #[error("parse transcription result: {0}")]
    Parse(#[from] serde_json::Error),

    /// The run was interrupted while waiting on the remote job. Distinct from
    /// a job failure; no output is written.
    #[error("operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
