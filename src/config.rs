use std::path::Path;

use serde::Deserialize;

use crate::error::AlignmentError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    /// Largest length difference (in characters) at which a prefix match
    /// still counts as approximately equal.
    pub max_length_difference: usize,
    pub chunker: ChunkerConfig,
}

impl AlignerConfig {
    pub const DEFAULT_MAX_LENGTH_DIFFERENCE: usize = 2;

    pub fn load(path: &Path) -> Result<Self, AlignmentError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AlignmentError::io("read aligner config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| AlignmentError::json("parse aligner config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AlignmentError> {
        self.chunker.validate()
    }
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            max_length_difference: Self::DEFAULT_MAX_LENGTH_DIFFERENCE,
            chunker: ChunkerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Characters that end a sentence when followed by whitespace or the end
    /// of the text. Newlines always end a chunk.
    pub sentence_terminators: Vec<char>,
}

impl ChunkerConfig {
    pub const DEFAULT_SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

    pub fn validate(&self) -> Result<(), AlignmentError> {
        // A word character as terminator would split tokens across chunks.
        if let Some(c) = self
            .sentence_terminators
            .iter()
            .find(|c| c.is_alphanumeric() || c.is_whitespace())
        {
            return Err(AlignmentError::invalid_config(format!(
                "sentence terminator {c:?} must be punctuation"
            )));
        }
        Ok(())
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            sentence_terminators: Self::DEFAULT_SENTENCE_TERMINATORS.to_vec(),
        }
    }
}
