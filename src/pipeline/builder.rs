use crate::config::AlignerConfig;
use crate::error::AlignmentError;
use crate::pipeline::defaults::{
    EditDistanceAligner, LinearInterpolator, SentenceChunker, UnicodeWordTokenizer,
};
use crate::pipeline::runtime::{TranscriptAligner, TranscriptAlignerParts};
use crate::pipeline::traits::{Chunker, SequenceAligner, TimingInterpolator, Tokenizer};

pub struct TranscriptAlignerBuilder {
    config: AlignerConfig,
    tokenizer: Option<Box<dyn Tokenizer>>,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
    interpolator: Option<Box<dyn TimingInterpolator>>,
    chunker: Option<Box<dyn Chunker>>,
}

impl TranscriptAlignerBuilder {
    pub fn new(config: AlignerConfig) -> Self {
        Self {
            config,
            tokenizer: None,
            sequence_aligner: None,
            interpolator: None,
            chunker: None,
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    pub fn with_interpolator(mut self, interpolator: Box<dyn TimingInterpolator>) -> Self {
        self.interpolator = Some(interpolator);
        self
    }

    pub fn with_chunker(mut self, chunker: Box<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    pub fn build(self) -> Result<TranscriptAligner, AlignmentError> {
        if let Err(err) = self.config.validate() {
            tracing::warn!(error = %err, "rejecting aligner configuration");
            return Err(err);
        }
        Ok(self.assemble())
    }

    /// Fill unset stages with the defaults derived from the config.
    pub(crate) fn assemble(self) -> TranscriptAligner {
        let config = self.config;
        TranscriptAligner::from_parts(TranscriptAlignerParts {
            tokenizer: self
                .tokenizer
                .unwrap_or_else(|| Box::new(UnicodeWordTokenizer)),
            sequence_aligner: self.sequence_aligner.unwrap_or_else(|| {
                Box::new(EditDistanceAligner::new(config.max_length_difference))
            }),
            interpolator: self
                .interpolator
                .unwrap_or_else(|| Box::new(LinearInterpolator)),
            chunker: self
                .chunker
                .unwrap_or_else(|| Box::new(SentenceChunker::new(config.chunker))),
        })
    }
}

impl Default for TranscriptAlignerBuilder {
    fn default() -> Self {
        Self::new(AlignerConfig::default())
    }
}
