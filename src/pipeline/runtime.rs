use crate::alignment::flatten::flatten_segments;
use crate::alignment::report::{compute_alignment_report, AlignmentReport};
use crate::pipeline::builder::TranscriptAlignerBuilder;
use crate::pipeline::traits::{Chunker, SequenceAligner, TimingInterpolator, Tokenizer};
use crate::types::{AlignmentInput, AlignmentResult, AsrSegment, WordAlignment};

/// Runs tokenize → flatten → align → interpolate → chunk.
///
/// Stateless between calls; one instance can serve concurrent requests.
pub struct TranscriptAligner {
    tokenizer: Box<dyn Tokenizer>,
    sequence_aligner: Box<dyn SequenceAligner>,
    interpolator: Box<dyn TimingInterpolator>,
    chunker: Box<dyn Chunker>,
}

pub(crate) struct TranscriptAlignerParts {
    pub tokenizer: Box<dyn Tokenizer>,
    pub sequence_aligner: Box<dyn SequenceAligner>,
    pub interpolator: Box<dyn TimingInterpolator>,
    pub chunker: Box<dyn Chunker>,
}

struct Stages {
    raw_words: Vec<WordAlignment>,
    timed_token_count: usize,
    result: AlignmentResult,
}

impl TranscriptAligner {
    pub(crate) fn from_parts(parts: TranscriptAlignerParts) -> Self {
        Self {
            tokenizer: parts.tokenizer,
            sequence_aligner: parts.sequence_aligner,
            interpolator: parts.interpolator,
            chunker: parts.chunker,
        }
    }

    pub fn align(&self, input: &AlignmentInput) -> AlignmentResult {
        self.run(&input.original_text, &input.segments).result
    }

    pub fn align_with_report(&self, input: &AlignmentInput) -> (AlignmentResult, AlignmentReport) {
        let stages = self.run(&input.original_text, &input.segments);
        let report =
            compute_alignment_report(&stages.raw_words, &stages.result, stages.timed_token_count);
        (stages.result, report)
    }

    fn run(&self, original_text: &str, segments: &[AsrSegment]) -> Stages {
        let original_tokens = self.tokenizer.tokenize(original_text);
        let timed_tokens = flatten_segments(segments);

        tracing::debug!(
            original_token_count = original_tokens.len(),
            timed_token_count = timed_tokens.len(),
            "pipeline: tokenized inputs"
        );

        let raw_words = self.sequence_aligner.align(&original_tokens, &timed_tokens);
        debug_assert_eq!(
            raw_words.len(),
            original_tokens.len(),
            "aligner must return one entry per original token"
        );
        let words = self.interpolator.interpolate(&raw_words);
        let chunks = self.chunker.chunk(original_text, &words);

        tracing::debug!(
            word_count = words.len(),
            chunk_count = chunks.len(),
            "pipeline: alignment result ready"
        );

        Stages {
            raw_words,
            timed_token_count: timed_tokens.len(),
            result: AlignmentResult {
                text: original_text.to_string(),
                words,
                chunks,
            },
        }
    }
}

impl Default for TranscriptAligner {
    fn default() -> Self {
        TranscriptAlignerBuilder::default().assemble()
    }
}

/// Align with the default pipeline.
pub fn build_alignment_result(original_text: &str, segments: &[AsrSegment]) -> AlignmentResult {
    TranscriptAligner::default().run(original_text, segments).result
}
