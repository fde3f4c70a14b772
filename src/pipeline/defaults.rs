use crate::alignment::chunking::build_chunks;
use crate::alignment::edit_distance::align_tokens_with_timings;
use crate::alignment::interpolation::interpolate_word_timings;
use crate::alignment::tokenization::tokenize_original;
use crate::config::{AlignerConfig, ChunkerConfig};
use crate::pipeline::traits::{Chunker, SequenceAligner, TimingInterpolator, Tokenizer};
use crate::types::{ChunkTiming, OriginalToken, TimedToken, WordAlignment};

pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<OriginalToken> {
        tokenize_original(text)
    }
}

pub struct EditDistanceAligner {
    max_length_difference: usize,
}

impl EditDistanceAligner {
    pub fn new(max_length_difference: usize) -> Self {
        Self {
            max_length_difference,
        }
    }
}

impl Default for EditDistanceAligner {
    fn default() -> Self {
        Self::new(AlignerConfig::DEFAULT_MAX_LENGTH_DIFFERENCE)
    }
}

impl SequenceAligner for EditDistanceAligner {
    fn align(&self, original: &[OriginalToken], timed: &[TimedToken]) -> Vec<WordAlignment> {
        align_tokens_with_timings(original, timed, self.max_length_difference)
    }
}

pub struct LinearInterpolator;

impl TimingInterpolator for LinearInterpolator {
    fn interpolate(&self, words: &[WordAlignment]) -> Vec<WordAlignment> {
        interpolate_word_timings(words)
    }
}

#[derive(Default)]
pub struct SentenceChunker {
    config: ChunkerConfig,
}

impl SentenceChunker {
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }
}

impl Chunker for SentenceChunker {
    fn chunk(&self, text: &str, words: &[WordAlignment]) -> Vec<ChunkTiming> {
        build_chunks(text, words, &self.config.sentence_terminators)
    }
}
