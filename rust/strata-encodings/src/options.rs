use serde::{Deserialize, Serialize};

/// Tuning knobs of a chunk encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Number of elements per block when statistics are recomputed in parallel.
    pub parallel_block_len: usize,

    /// Ranges shorter than this (in elements) are recomputed on the calling thread.
    pub min_parallel_len: usize,
}

impl EncoderOptions {
    pub const DEFAULT_PARALLEL_BLOCK_LEN: usize = 64 * 1024;
    pub const DEFAULT_MIN_PARALLEL_LEN: usize = 256 * 1024;

    pub fn with_parallel_block_len(&self, len: usize) -> Self {
        let mut options = self.clone();
        options.parallel_block_len = len.max(1);
        options
    }

    pub fn with_min_parallel_len(&self, len: usize) -> Self {
        let mut options = self.clone();
        options.min_parallel_len = len;
        options
    }
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            parallel_block_len: Self::DEFAULT_PARALLEL_BLOCK_LEN,
            min_parallel_len: Self::DEFAULT_MIN_PARALLEL_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EncoderOptions;

    #[test]
    fn test_options_from_json() {
        let options: EncoderOptions =
            serde_json::from_str(r#"{ "parallel_block_len": 1024 }"#).unwrap();
        assert_eq!(options.parallel_block_len, 1024);
        assert_eq!(
            options.min_parallel_len,
            EncoderOptions::DEFAULT_MIN_PARALLEL_LEN
        );

        let json = serde_json::to_string(&options).unwrap();
        let back: EncoderOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_builders() {
        let options = EncoderOptions::default()
            .with_parallel_block_len(0)
            .with_min_parallel_len(0);
        assert_eq!(options.parallel_block_len, 1);
        assert_eq!(options.min_parallel_len, 0);
    }
}
