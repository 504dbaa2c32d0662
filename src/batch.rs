//! Borrowed, validated view over a batch of vector samples.
//!
//! A batch of `B` samples of dimension `n` is stored row-major in a flat
//! `&[f64]` of length `B * n`. The view never copies or mutates the data.

use std::ops::Range;
use std::slice::ChunksExact;

use crate::error::{Result, StatsError};

/// Read-only view of `B` samples, each an `n`-dimensional real vector.
///
/// # Invariants
/// - `dim >= 1`
/// - `data.len()` is a multiple of `dim`
/// - every value is finite
///
/// An empty batch (`B = 0`) is a valid view; estimators that need samples
/// reject it with [`StatsError::InsufficientSamples`].
///
/// # Examples
/// ```
/// use alpha_stats::batch::SampleBatch;
/// let data = [1.0, 0.0, -1.0, 0.0, 0.0, 1.0];
/// let batch = SampleBatch::new(&data, 2).unwrap();
/// assert_eq!(batch.len(), 3);
/// assert_eq!(batch.dim(), 2);
/// assert_eq!(batch.row(2), Some(&[0.0, 1.0][..]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleBatch<'a> {
    data: &'a [f64],
    dim: usize,
}

impl<'a> SampleBatch<'a> {
    /// Wraps a row-major buffer of samples with dimension `dim`.
    ///
    /// # Errors
    /// - [`StatsError::ZeroDimension`] if `dim == 0`.
    /// - [`StatsError::RaggedBatch`] if `data.len()` is not a multiple of `dim`.
    /// - [`StatsError::NonFiniteSample`] if any value is NaN or infinite.
    pub fn new(data: &'a [f64], dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(StatsError::ZeroDimension);
        }
        if data.len() % dim != 0 {
            return Err(StatsError::RaggedBatch {
                len: data.len(),
                dim,
            });
        }
        if let Some(pos) = data.iter().position(|x| !x.is_finite()) {
            return Err(StatsError::NonFiniteSample { sample: pos / dim });
        }
        Ok(Self { data, dim })
    }

    /// Number of samples `B`.
    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample dimension `n`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The underlying row-major buffer.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Returns sample `index`, or `None` if out of range.
    pub fn row(&self, index: usize) -> Option<&'a [f64]> {
        let start = index.checked_mul(self.dim)?;
        let end = start.checked_add(self.dim)?;
        self.data.get(start..end)
    }

    /// Iterates over the samples in order.
    pub fn rows(&self) -> ChunksExact<'a, f64> {
        self.data.chunks_exact(self.dim)
    }

    /// Sub-batch of the samples in `rows`, or `None` if out of range.
    ///
    /// The view inherits this batch's validation, so nothing is re-checked.
    pub fn slice_rows(&self, rows: Range<usize>) -> Option<SampleBatch<'a>> {
        let start = rows.start.checked_mul(self.dim)?;
        let end = rows.end.checked_mul(self.dim)?;
        let data = self.data.get(start..end)?;
        Some(Self {
            data,
            dim: self.dim,
        })
    }

    /// Fails unless the batch holds at least `required` samples.
    pub(crate) fn require(&self, operation: &'static str, required: usize) -> Result<()> {
        let actual = self.len();
        if actual < required {
            return Err(StatsError::InsufficientSamples {
                operation,
                required,
                actual,
            });
        }
        Ok(())
    }
}
