//! meetscribe
//!
//! Batch audio transcription against managed AWS services: the input file is
//! content-addressed, uploaded to S3 once, transcribed by an Amazon Transcribe
//! job named after the same fingerprint, and the resulting JSON is rendered to
//! a plain or speaker-labeled transcript.
//!
//! Repeated runs over byte-identical input are no-ops on the remote side: the
//! upload and the job creation both short-circuit on the service-reported
//! "already exists" condition.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod pipeline;
pub mod remote;
pub mod transcript;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use pipeline::Pipeline;
