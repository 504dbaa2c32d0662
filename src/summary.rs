//! One-shot summary of a batch, ready to feed the bound formulas.

use crate::batch::SampleBatch;
use crate::bounds::BoundParams;
use crate::error::Result;
use crate::norm::MatrixNorm;
use crate::stats::{compute_covariance_norm, compute_mean, compute_variance_norm};

/// Mean, variance norm and covariance norm of one batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSummary {
    /// Number of samples `B`.
    pub n_samples: usize,
    /// Sample dimension `n`.
    pub dim: usize,
    pub mean: Vec<f64>,
    /// `Σ‖xᵢ − x̄‖² / (B − 1)`.
    pub variance_norm: f64,
    /// Norm of the unbiased covariance matrix, of the order requested.
    pub covariance_norm: f64,
    pub norm: MatrixNorm,
}

impl BatchSummary {
    /// Bound parameters using this batch's dimension, sample count and
    /// variance norm as `sigma`.
    ///
    /// # Errors
    /// See [`BoundParams::new`].
    pub fn bound_params(&self, deviation_bound: f64, delta: f64) -> Result<BoundParams> {
        BoundParams::from_mean(
            &self.mean,
            self.variance_norm,
            self.n_samples,
            deviation_bound,
            delta,
        )
    }

    /// Closed-form confidence interval for this batch's mean.
    pub fn confidence_interval(&self, deviation_bound: f64, delta: f64) -> Result<f64> {
        self.bound_params(deviation_bound, delta)?.confidence_interval()
    }
}

/// Summarises a batch of at least two samples.
///
/// # Errors
/// [`StatsError::InsufficientSamples`](crate::StatsError::InsufficientSamples)
/// if `B < 2`.
///
/// # Examples
/// ```
/// use alpha_stats::{batch::SampleBatch, norm::MatrixNorm, summary::summarize};
/// let data = [1.0, 0.0, -1.0, 0.0, 0.0, 1.0, 0.0, -1.0];
/// let batch = SampleBatch::new(&data, 2).unwrap();
/// let s = summarize(&batch, MatrixNorm::Spectral).unwrap();
/// assert_eq!(s.mean, vec![0.0, 0.0]);
/// assert!((s.variance_norm - 4.0 / 3.0).abs() < 1e-12);
/// let eps = s.confidence_interval(1.0, 0.05).unwrap();
/// assert!(eps > 0.0);
/// ```
pub fn summarize(batch: &SampleBatch<'_>, norm: MatrixNorm) -> Result<BatchSummary> {
    batch.require("summary", 2)?;
    let mean = compute_mean(batch)?;
    let variance_norm = compute_variance_norm(batch)?;
    let covariance_norm = compute_covariance_norm(batch, norm)?;
    Ok(BatchSummary {
        n_samples: batch.len(),
        dim: batch.dim(),
        mean,
        variance_norm,
        covariance_norm,
        norm,
    })
}
