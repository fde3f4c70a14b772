pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::correction::apply_chunk_corrections;
pub use alignment::report::{compute_alignment_report, AlignmentReport};
pub use config::{AlignerConfig, ChunkerConfig};
pub use error::AlignmentError;
pub use pipeline::builder::TranscriptAlignerBuilder;
pub use pipeline::runtime::{build_alignment_result, TranscriptAligner};
pub use pipeline::traits::{Chunker, SequenceAligner, TimingInterpolator, Tokenizer};
pub use types::{
    AlignmentInput, AlignmentResult, AsrSegment, AsrTranscript, AsrWord, ChunkTiming,
    ChunkTimingPatch, OriginalToken, TimedToken, WordAlignment,
};
