//! Decoded Transcribe result documents and their rendering to output text.

pub mod format;
pub mod types;

pub use format::render;
pub use types::TranscriptionResult;
