use crate::types::{ChunkTiming, OriginalToken, TimedToken, WordAlignment};

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<OriginalToken>;
}

pub trait SequenceAligner: Send + Sync {
    /// Must return exactly one entry per original token, in order.
    fn align(&self, original: &[OriginalToken], timed: &[TimedToken]) -> Vec<WordAlignment>;
}

pub trait TimingInterpolator: Send + Sync {
    fn interpolate(&self, words: &[WordAlignment]) -> Vec<WordAlignment>;
}

pub trait Chunker: Send + Sync {
    fn chunk(&self, text: &str, words: &[WordAlignment]) -> Vec<ChunkTiming>;
}
