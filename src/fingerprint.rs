use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

use crate::error::Result;

/// Hex digits of the SHA-256 digest kept as the fingerprint.
const FINGERPRINT_LEN: usize = 16;

const READ_BUF_SIZE: usize = 64 * 1024;

/// Content fingerprint of an input file.
///
/// Derives the S3 storage key and the transcription job name, so identical
/// file content always maps to the same remote artifacts. This is the
/// idempotence key for the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a file by streaming its bytes through
    /// SHA-256 and keeping the first 16 hex digits.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let mut file = tokio::fs::File::open(path).await?;
        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; READ_BUF_SIZE];
        loop {
            let n = file.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        let digest = format!("{:x}", hasher.finalize());
        Ok(Self(digest[..FINGERPRINT_LEN].to_string()))
    }

    /// Storage key for the uploaded media, keeping the original file name
    /// for readability in the bucket listing.
    pub fn storage_key(&self, file_name: &str) -> String {
        format!("uploads/{}_{}", self.0, file_name)
    }

    /// Deterministic transcription job name.
    pub fn job_name(&self) -> String {
        format!("transcribe-{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    async fn fingerprint_of(content: &[u8]) -> Fingerprint {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        Fingerprint::from_file(file.path()).await.unwrap()
    }

    #[tokio::test]
    async fn matches_known_sha256_prefix() {
        // sha256("hello world") = b94d27b9934d3e08...
        let fp = fingerprint_of(b"hello world").await;
        assert_eq!(fp.as_str(), "b94d27b9934d3e08");
    }

    #[tokio::test]
    async fn identical_content_yields_identical_artifacts() {
        let a = fingerprint_of(b"same bytes").await;
        let b = fingerprint_of(b"same bytes").await;
        assert_eq!(a, b);
        assert_eq!(a.storage_key("call.m4a"), b.storage_key("call.m4a"));
        assert_eq!(a.job_name(), b.job_name());
    }

    #[tokio::test]
    async fn different_content_yields_different_fingerprints() {
        let a = fingerprint_of(b"one").await;
        let b = fingerprint_of(b"two").await;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn derived_names_have_expected_shape() {
        let fp = fingerprint_of(b"hello world").await;
        assert_eq!(fp.as_str().len(), 16);
        assert_eq!(
            fp.storage_key("call.m4a"),
            "uploads/b94d27b9934d3e08_call.m4a"
        );
        assert_eq!(fp.job_name(), "transcribe-b94d27b9934d3e08");
    }
}
