//! Chunked parallel application of scalar conversions.
//!
//! Synthesized conversions are pure, so a sequence of raw values can be
//! split into chunks and converted on rayon's work-stealing pool. Results
//! are collected in input order regardless of which thread processed which
//! chunk: `par_chunks` preserves chunk ordering and each chunk is mapped
//! sequentially.
//!
//! Small inputs skip the pool entirely.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Chunking parameters for parallel bulk conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Number of values per chunk; `0` selects a size from the input length.
    pub chunk_size: usize,
    /// Minimum chunk size (avoid too-small chunks)
    pub min_chunk: usize,
    /// Maximum chunk size (limit per-task working set)
    pub max_chunk: usize,
}

impl ChunkConfig {
    /// Create a chunk configuration with explicit size.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            ..Self::default()
        }
    }

    /// Chunk size to use for `len` values after clamping.
    ///
    /// Always at least `1`. Bounds that fail [`validate`](Self::validate)
    /// are normalised: a zero minimum becomes `1` and a maximum below the
    /// minimum is raised to it.
    pub fn effective_size(&self, len: usize) -> usize {
        let size = if self.chunk_size == 0 {
            optimal_chunk_size(len)
        } else {
            self.chunk_size
        };
        let min = self.min_chunk.max(1);
        let max = self.max_chunk.max(min);
        size.clamp(min, max)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_chunk == 0 {
            return Err(Error::InvalidConfig(
                "chunk.min_chunk must be > 0".to_string(),
            ));
        }
        if self.min_chunk > self.max_chunk {
            return Err(Error::InvalidConfig(format!(
                "chunk.min_chunk ({}) must not exceed chunk.max_chunk ({})",
                self.min_chunk, self.max_chunk
            )));
        }
        Ok(())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 0,
            min_chunk: 256,
            max_chunk: 16_384,
        }
    }
}

/// Chunk size targeting 4 chunks per worker thread.
pub fn optimal_chunk_size(len: usize) -> usize {
    let num_threads = rayon::current_num_threads().max(1);
    (len / (num_threads * 4)).max(1)
}

/// Map `map_fn` over `values`, in parallel chunks when the input is larger
/// than `serial_threshold`.
///
/// The output has the same length and order as the input.
///
/// ```rust
/// use metrology::bulk::{ChunkConfig, parallel_chunked_map};
///
/// let values: Vec<f64> = (0..10_000).map(f64::from).collect();
/// let doubled = parallel_chunked_map(&values, |v| v * 2.0, ChunkConfig::default(), 64);
/// assert_eq!(doubled.len(), values.len());
/// assert_eq!(doubled[9_999], 19_998.0);
/// ```
pub fn parallel_chunked_map<T, U, F>(
    values: &[T],
    map_fn: F,
    chunk: ChunkConfig,
    serial_threshold: usize,
) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    if values.len() <= serial_threshold {
        return values.iter().map(&map_fn).collect();
    }

    let chunk_size = chunk.effective_size(values.len());
    values
        .par_chunks(chunk_size)
        .flat_map_iter(|chunk| chunk.iter().map(&map_fn))
        .collect()
}
