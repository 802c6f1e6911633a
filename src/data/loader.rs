//! Batched data provider.
//!
//! Wraps a flat sample vector and serves it either as freshly shuffled
//! fixed-size batches (one full pass per request, restartable indefinitely)
//! or as deterministic in-order chunks for evaluation.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Errors that can occur when building a data provider.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("batch size must be positive, got {0}")]
    InvalidBatchSize(usize),
}

/// A flat sample set plus a batch size.
#[derive(Debug, Clone)]
pub struct BatchLoader {
    data: Vec<f64>,
    batch_size: usize,
}

impl BatchLoader {
    pub fn new(data: Vec<f64>, batch_size: usize) -> Result<Self, DataError> {
        if batch_size == 0 {
            return Err(DataError::InvalidBatchSize(batch_size));
        }
        Ok(Self { data, batch_size })
    }

    /// Total number of samples (not batches).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// One training pass: a lazy sequence of batches over a fresh shuffle of
    /// the data. The union of the batches is a permutation of the full set;
    /// the final batch may be shorter than `batch_size`.
    pub fn shuffled_epoch<R: Rng>(&self, rng: &mut R) -> Epoch {
        let mut shuffled = self.data.clone();
        shuffled.shuffle(rng);
        Epoch {
            shuffled,
            batch_size: self.batch_size,
            pos: 0,
        }
    }

    /// In-order chunks, no shuffling. Evaluation uses this: the mean loss is
    /// order-independent, so shuffling would only cost entropy.
    pub fn batches(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.batch_size)
    }
}

/// Iterator over one shuffled pass. Owns its shuffle so the loader can hand
/// out any number of independent epochs.
pub struct Epoch {
    shuffled: Vec<f64>,
    batch_size: usize,
    pos: usize,
}

impl Iterator for Epoch {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Vec<f64>> {
        if self.pos >= self.shuffled.len() {
            return None;
        }
        let end = (self.pos + self.batch_size).min(self.shuffled.len());
        let batch = self.shuffled[self.pos..end].to_vec();
        self.pos = end;
        Some(batch)
    }
}
