use serde::{Deserialize, Serialize};

/// A word extracted from the original text.
///
/// `char_start..char_end` is a UTF-8 byte range into the source text, so
/// `&text[token.char_start..token.char_end] == token.text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalToken {
    pub index: usize,
    pub text: String,
    /// Lowercased, letters and digits only. Used for approximate matching.
    pub norm: String,
    pub char_start: usize,
    pub char_end: usize,
}

/// A word recognized by ASR, timestamps in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedToken {
    pub index: usize,
    pub text: String,
    pub norm: String,
    pub start: f64,
    pub end: f64,
}

/// Timing for one original token. Exactly one per `OriginalToken`, same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordAlignment {
    pub index: usize,
    pub text: String,
    pub char_start: usize,
    pub char_end: usize,
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl WordAlignment {
    /// Both endpoints present and finite.
    pub fn is_anchor(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s.is_finite() && e.is_finite())
    }
}

/// A sentence/paragraph display unit with aggregate timing.
///
/// `char_start`/`char_end` are the raw segmentation boundaries; `text` is the
/// trimmed slice between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkTiming {
    pub index: usize,
    pub text: String,
    pub char_start: usize,
    pub char_end: usize,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub word_indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsrWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// One ASR segment, in the provider's verbose JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsrSegment {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<AsrWord>>,
}

/// Full ASR response. `segments` is required; a response without it is
/// rejected at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsrTranscript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub segments: Vec<AsrSegment>,
}

#[derive(Debug, Clone)]
pub struct AlignmentInput {
    pub original_text: String,
    pub segments: Vec<AsrSegment>,
}

/// Final pipeline value handed to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub text: String,
    pub words: Vec<WordAlignment>,
    pub chunks: Vec<ChunkTiming>,
}

/// Out-of-band correction for one chunk. Only timing can be patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkTimingPatch {
    pub index: usize,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
}
