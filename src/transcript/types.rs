use serde::Deserialize;

/// Decoded transcription job output, as written by the service into the
/// output bucket. Immutable once decoded; constructed once per run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptionResult {
    #[serde(default)]
    pub results: Results,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Results {
    /// Whole-transcript renderings; the first entry is authoritative.
    #[serde(default)]
    pub transcripts: Vec<Transcript>,
    /// Present only when diarization was requested and supported.
    #[serde(default)]
    pub speaker_labels: Option<SpeakerLabels>,
    /// Timed lexical units in reading order. Ordering is significant.
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub transcript: String,
}

/// Speaker diarization metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeakerLabels {
    #[serde(default)]
    pub speakers: u32,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub speaker_label: String,
    #[serde(default)]
    pub items: Vec<SegmentItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SegmentItem {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

/// One lexical unit: a word or a punctuation mark.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    /// Speaker label active at this point in time, when diarization ran.
    #[serde(default)]
    pub speaker_label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A spoken word.
    Pronunciation,
    /// A punctuation mark, attached to the preceding word.
    Punctuation,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub content: String,
}
