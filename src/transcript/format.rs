use crate::error::{Error, Result};

use super::types::{ItemKind, TranscriptionResult};

/// Render a decoded result to the output text.
///
/// The first transcript entry is authoritative for the flat rendering; the
/// speaker-labeled rendering is used only when diarization was requested AND
/// the service actually returned a speaker-label block. Speaker structure is
/// never fabricated.
pub fn render(result: &TranscriptionResult, diarization: bool) -> Result<String> {
    let transcript = result
        .results
        .transcripts
        .first()
        .ok_or(Error::NoTranscript)?;

    if diarization && result.results.speaker_labels.is_some() {
        return Ok(format_with_speakers(result));
    }

    Ok(transcript.transcript.clone())
}

/// Merge word-level speaker turns into a multi-paragraph transcript.
///
/// Walks the items in delivered order. Each speaker change opens a new
/// paragraph headed `Speaker <N>: `, with the `spk_` prefix stripped from the
/// label. Punctuation attaches to the preceding word without a separator.
pub fn format_with_speakers(result: &TranscriptionResult) -> String {
    let mut out = String::new();
    let mut current_speaker: Option<&str> = None;

    for item in &result.results.items {
        match item.kind {
            ItemKind::Punctuation => {
                if let Some(alt) = item.alternatives.first() {
                    out.push_str(&alt.content);
                }
            }
            ItemKind::Pronunciation => {
                if let Some(label) = item.speaker_label.as_deref() {
                    if current_speaker != Some(label) {
                        current_speaker = Some(label);
                        // Blank line between speaker turns, but not before
                        // the very first header.
                        if !out.is_empty() {
                            out.push_str("\n\n");
                        }
                        let number = label.strip_prefix("spk_").unwrap_or(label);
                        out.push_str(&format!("Speaker {number}: "));
                    }
                }

                if let Some(alt) = item.alternatives.first() {
                    // Single space between words, except right after a header
                    // or at the very start.
                    if !out.is_empty() && !out.ends_with(": ") {
                        out.push(' ');
                    }
                    out.push_str(&alt.content);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::types::{Alternative, Item, Results, SpeakerLabels, Transcript};

    fn word(content: &str, speaker: Option<&str>) -> Item {
        Item {
            start_time: Some("0.0".to_string()),
            end_time: Some("0.5".to_string()),
            kind: ItemKind::Pronunciation,
            alternatives: vec![Alternative {
                confidence: Some("0.99".to_string()),
                content: content.to_string(),
            }],
            speaker_label: speaker.map(str::to_string),
        }
    }

    fn punct(content: &str) -> Item {
        Item {
            start_time: None,
            end_time: None,
            kind: ItemKind::Punctuation,
            alternatives: vec![Alternative {
                confidence: None,
                content: content.to_string(),
            }],
            speaker_label: None,
        }
    }

    fn result_with_items(items: Vec<Item>) -> TranscriptionResult {
        TranscriptionResult {
            results: Results {
                transcripts: vec![Transcript {
                    transcript: "flat transcript".to_string(),
                }],
                speaker_labels: Some(SpeakerLabels::default()),
                items,
            },
            status: "COMPLETED".to_string(),
        }
    }

    #[test]
    fn empty_transcripts_is_an_error() {
        let result = TranscriptionResult::default();
        assert!(matches!(render(&result, false), Err(Error::NoTranscript)));
        assert!(matches!(render(&result, true), Err(Error::NoTranscript)));
    }

    #[test]
    fn falls_back_to_flat_transcript_without_speaker_labels() {
        let mut result = result_with_items(vec![word("ignored", Some("spk_0"))]);
        result.results.speaker_labels = None;
        assert_eq!(render(&result, true).unwrap(), "flat transcript");
    }

    #[test]
    fn falls_back_to_flat_transcript_when_diarization_disabled() {
        let result = result_with_items(vec![word("ignored", Some("spk_0"))]);
        assert_eq!(render(&result, false).unwrap(), "flat transcript");
    }

    #[test]
    fn merges_speaker_turns_into_paragraphs() {
        let result = result_with_items(vec![
            word("Hello", Some("spk_0")),
            punct(","),
            word("world", Some("spk_0")),
            punct("."),
            word("Hi", Some("spk_1")),
        ]);
        assert_eq!(
            render(&result, true).unwrap(),
            "Speaker 0: Hello, world.\n\nSpeaker 1: Hi"
        );
    }

    #[test]
    fn unlabeled_items_render_as_plain_concatenation() {
        let result = result_with_items(vec![
            word("just", None),
            word("plain", None),
            word("words", None),
            punct("."),
        ]);
        assert_eq!(render(&result, true).unwrap(), "just plain words.");
    }

    #[test]
    fn unlabeled_item_keeps_the_active_speaker() {
        let result = result_with_items(vec![
            word("one", Some("spk_0")),
            word("still", None),
            word("one", Some("spk_0")),
        ]);
        assert_eq!(render(&result, true).unwrap(), "Speaker 0: one still one");
    }

    #[test]
    fn header_emitted_for_labeled_first_word() {
        let result = result_with_items(vec![word("Hi", Some("spk_0"))]);
        let text = render(&result, true).unwrap();
        assert_eq!(text, "Speaker 0: Hi");
        assert!(!text.starts_with('\n'));
    }

    #[test]
    fn multi_digit_speaker_labels_keep_their_number() {
        let result = result_with_items(vec![word("Hey", Some("spk_12"))]);
        assert_eq!(render(&result, true).unwrap(), "Speaker 12: Hey");
    }

    #[test]
    fn items_without_alternatives_contribute_no_content() {
        let mut empty = word("", Some("spk_0"));
        empty.alternatives.clear();
        let result = result_with_items(vec![empty, word("next", Some("spk_0"))]);
        assert_eq!(render(&result, true).unwrap(), "Speaker 0: next");
    }
}
