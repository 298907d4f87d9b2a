use super::types::{GenerationError, GenerationResult};

/// Settings for one greedy decoding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Hard cap on the output sequence length, seed token included.
    pub max_length: usize,
    /// Generated tokens required before an eos token ends decoding.
    pub min_length: usize,
    /// Seed token fed to the decoder first.
    pub start_id: u32,
    pub eos_id: u32,
}

impl GenerationConfig {
    pub const DEFAULT_MAX_LENGTH: usize = 100;
    pub const DEFAULT_MIN_LENGTH: usize = 30;

    pub fn new(start_id: u32, eos_id: u32) -> Self {
        Self {
            max_length: Self::DEFAULT_MAX_LENGTH,
            min_length: Self::DEFAULT_MIN_LENGTH,
            start_id,
            eos_id,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Number of decoder calls at most; the seed token takes one slot.
    pub fn max_steps(&self) -> usize {
        self.max_length.saturating_sub(1)
    }

    pub fn validate(&self) -> GenerationResult<()> {
        if self.max_length == 0 {
            return Err(GenerationError::InvalidConfig(
                "max_length must be at least 1".to_string(),
            ));
        }
        if self.min_length > self.max_length {
            return Err(GenerationError::InvalidConfig(format!(
                "min_length ({}) must not exceed max_length ({})",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}
