use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Error, Result};

/// Audio formats accepted by Amazon Transcribe batch jobs, keyed by file
/// extension.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "mp3", "mp4", "m4a", "wav", "flac", "ogg", "amr", "webm",
];

/// S3 bucket naming rules (lowercase, 3-63 chars, no leading/trailing
/// punctuation).
const BUCKET_NAME_PATTERN: &str = r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$";

/// Transcribe accepts between 2 and 30 speaker labels per job.
const MIN_SPEAKERS: i32 = 2;
const MAX_SPEAKERS: i32 = 30;

/// Resolved run parameters. Immutable after construction; owned by the run
/// and passed by reference to each collaborator.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub bucket: String,
    pub region: String,
    pub language_code: String,
    pub diarization: bool,
    pub max_speakers: i32,
    pub force: bool,
}

impl AppConfig {
    /// Validate the configuration. Fails fast, before any remote call.
    pub fn validate(&self) -> Result<()> {
        media_extension(&self.input_path).ok_or_else(|| {
            Error::Config(format!(
                "input file {:?} has no recognized audio extension (supported: {})",
                self.input_path,
                SUPPORTED_EXTENSIONS.join(", ")
            ))
        })?;

        if !valid_bucket_name(&self.bucket)? {
            return Err(Error::Config(format!(
                "invalid bucket name {:?}",
                self.bucket
            )));
        }

        if self.diarization
            && !(MIN_SPEAKERS..=MAX_SPEAKERS).contains(&self.max_speakers)
        {
            return Err(Error::Config(format!(
                "max speakers must be between {MIN_SPEAKERS} and {MAX_SPEAKERS}, got {}",
                self.max_speakers
            )));
        }

        Ok(())
    }

    /// Lowercased extension of the input file. Only valid after `validate`.
    pub fn media_format(&self) -> String {
        media_extension(&self.input_path).unwrap_or_default()
    }

    /// File name component of the input path.
    pub fn input_file_name(&self) -> String {
        self.input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Lowercased extension, if it names a supported audio format.
fn media_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

fn valid_bucket_name(bucket: &str) -> Result<bool> {
    let re = Regex::new(BUCKET_NAME_PATTERN)
        .map_err(|e| Error::Config(format!("compile bucket name pattern: {e}")))?;
    Ok(re.is_match(bucket))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            input_path: PathBuf::from("meeting.m4a"),
            output_path: PathBuf::from("meeting.txt"),
            bucket: "my-meeting-bucket".to_string(),
            region: "us-east-1".to_string(),
            language_code: "en-US".to_string(),
            diarization: false,
            max_speakers: 10,
            force: false,
        }
    }

    #[test]
    fn accepts_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn rejects_unsupported_extension() {
        let mut cfg = config();
        cfg.input_path = PathBuf::from("notes.txt");
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_missing_extension() {
        let mut cfg = config();
        cfg.input_path = PathBuf::from("meeting");
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn accepts_uppercase_extension() {
        let mut cfg = config();
        cfg.input_path = PathBuf::from("Meeting.M4A");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.media_format(), "m4a");
    }

    #[test]
    fn rejects_bad_bucket_names() {
        for bucket in ["", "ab", "UPPERCASE", "-leading-dash", "trailing-dash-", "has_underscore"] {
            let mut cfg = config();
            cfg.bucket = bucket.to_string();
            assert!(
                matches!(cfg.validate(), Err(Error::Config(_))),
                "bucket {bucket:?} should be rejected"
            );
        }
    }

    #[test]
    fn bounds_max_speakers_only_with_diarization() {
        let mut cfg = config();
        cfg.max_speakers = 100;
        assert!(cfg.validate().is_ok());

        cfg.diarization = true;
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));

        cfg.max_speakers = 2;
        assert!(cfg.validate().is_ok());
    }
}
