//! Batch statistics over vector samples.
//!
//! Every estimator takes a [`SampleBatch`] of `B` samples of dimension `n`
//! and returns a fresh result; nothing is cached between calls.
//!
//! # Estimators
//!
//! - **Mean**: column-wise Neumaier compensated summation, divided by `B`.
//! - **Covariance**: sum of outer products of deviations `xᵢ − x̄`,
//!   divided by `B − 1` (Bessel's correction).
//! - **Covariance norm**: a [`MatrixNorm`] of the covariance matrix.
//! - **Variance norm**: `Σ‖xᵢ − x̄‖² / (B − 1)`, computed from per-sample
//!   Euclidean norms without forming the covariance matrix. It equals the
//!   trace of the covariance matrix, not a norm of it.
//!
//! Reference for the compensated sum: Neumaier (1974), "Rundungsfehleranalyse
//! einiger Verfahren zur Summation endlicher Summen", *ZAMM* 54(1).

use nalgebra::{DMatrix, DVector};

use crate::batch::SampleBatch;
use crate::error::{Result, StatsError};
use crate::norm::{matrix_norm, MatrixNorm};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Computes the empirical mean of the samples.
///
/// # Complexity
/// Time: O(B·n), Space: O(n)
///
/// # Errors
/// - [`StatsError::InsufficientSamples`] if the batch is empty.
/// - [`StatsError::NonFiniteResult`] if a column sum overflows.
///
/// # Examples
/// ```
/// use alpha_stats::{batch::SampleBatch, stats::compute_mean};
/// let data = [1.0, 2.0, 3.0, 6.0];
/// let batch = SampleBatch::new(&data, 2).unwrap();
/// assert_eq!(compute_mean(&batch).unwrap(), vec![2.0, 4.0]);
/// ```
pub fn compute_mean(batch: &SampleBatch<'_>) -> Result<Vec<f64>> {
    batch.require("mean", 1)?;
    let mut sums = vec![NeumaierSum::new(); batch.dim()];
    for row in batch.rows() {
        for (acc, &x) in sums.iter_mut().zip(row) {
            acc.add(x);
        }
    }
    let b = batch.len() as f64;
    let mean: Vec<f64> = sums.iter().map(|s| s.total() / b).collect();
    if !mean.iter().all(|m| m.is_finite()) {
        return Err(StatsError::NonFiniteResult { operation: "mean" });
    }
    Ok(mean)
}

/// Computes the unbiased `n × n` sample covariance matrix.
///
/// # Formula
/// ```text
/// C = Σᵢ (xᵢ − x̄)(xᵢ − x̄)ᵀ / (B − 1)
/// ```
///
/// # Complexity
/// Time: O(B·n²), Space: O(n²)
///
/// # Errors
/// - [`StatsError::InsufficientSamples`] if `B < 2`.
/// - [`StatsError::NonFiniteResult`] if an entry overflows, which finite
///   samples beyond roughly `1e154` in magnitude can cause.
///
/// # Examples
/// ```
/// use alpha_stats::{batch::SampleBatch, stats::compute_covariance};
/// let data = [1.0, 2.0, 3.0, 6.0];
/// let batch = SampleBatch::new(&data, 2).unwrap();
/// let c = compute_covariance(&batch).unwrap();
/// assert_eq!(c[(0, 0)], 2.0);
/// assert_eq!(c[(0, 1)], 4.0);
/// assert_eq!(c[(1, 1)], 8.0);
/// ```
pub fn compute_covariance(batch: &SampleBatch<'_>) -> Result<DMatrix<f64>> {
    batch.require("covariance", 2)?;
    let mean = compute_mean(batch)?;
    tracing::debug!(
        samples = batch.len(),
        dim = batch.dim(),
        "accumulating sample covariance"
    );
    let covariance = scatter_matrix(batch, &mean) / (batch.len() - 1) as f64;
    if !covariance.iter().all(|x| x.is_finite()) {
        return Err(StatsError::NonFiniteResult {
            operation: "covariance",
        });
    }
    Ok(covariance)
}

/// Computes a matrix norm of the unbiased sample covariance.
///
/// With [`MatrixNorm::Spectral`] (the default) this is the largest
/// eigenvalue of the covariance, since it is symmetric positive
/// semi-definite.
///
/// # Complexity
/// Time: O(B·n²) to accumulate, plus O(n³) for singular-value orders.
///
/// # Errors
/// - [`StatsError::InsufficientSamples`] if `B < 2`.
/// - [`StatsError::NonFiniteResult`] if the covariance or its norm
///   overflows.
///
/// # Examples
/// ```
/// use alpha_stats::{batch::SampleBatch, norm::MatrixNorm, stats::compute_covariance_norm};
/// let data = [1.0, 0.0, -1.0, 0.0, 0.0, 1.0, 0.0, -1.0];
/// let batch = SampleBatch::new(&data, 2).unwrap();
/// let s = compute_covariance_norm(&batch, MatrixNorm::Spectral).unwrap();
/// assert!((s - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn compute_covariance_norm(batch: &SampleBatch<'_>, norm: MatrixNorm) -> Result<f64> {
    let covariance = compute_covariance(batch)?;
    if norm.needs_svd() {
        tracing::trace!(dim = batch.dim(), ?norm, "covariance norm via SVD");
    }
    matrix_norm(&covariance, norm)
}

/// Computes the variance norm `Σ‖xᵢ − x̄‖² / (B − 1)`.
///
/// Only per-sample squared distances to the mean are used, so the result is
/// the trace of the covariance matrix and ignores cross-coordinate structure.
///
/// # Complexity
/// Time: O(B·n), Space: O(n)
///
/// # Errors
/// - [`StatsError::InsufficientSamples`] if `B < 2`.
/// - [`StatsError::NonFiniteResult`] if the mean or a squared distance
///   overflows.
///
/// # Examples
/// ```
/// use alpha_stats::{batch::SampleBatch, stats::compute_variance_norm};
/// let data = [1.0, 0.0, -1.0, 0.0, 0.0, 1.0, 0.0, -1.0];
/// let batch = SampleBatch::new(&data, 2).unwrap();
/// assert!((compute_variance_norm(&batch).unwrap() - 4.0 / 3.0).abs() < 1e-12);
/// ```
pub fn compute_variance_norm(batch: &SampleBatch<'_>) -> Result<f64> {
    batch.require("variance norm", 2)?;
    let mean = compute_mean(batch)?;
    let mut acc = NeumaierSum::new();
    for row in batch.rows() {
        acc.add(squared_distance(row, &mean));
    }
    let variance = acc.total() / (batch.len() - 1) as f64;
    if !variance.is_finite() {
        return Err(StatsError::NonFiniteResult {
            operation: "variance norm",
        });
    }
    Ok(variance)
}

fn squared_distance(row: &[f64], mean: &[f64]) -> f64 {
    row.iter()
        .zip(mean)
        .map(|(x, m)| {
            let d = x - m;
            d * d
        })
        .sum()
}

fn deviation(row: &[f64], mean: &[f64]) -> DVector<f64> {
    DVector::from_iterator(row.len(), row.iter().zip(mean).map(|(x, m)| x - m))
}

/// Σ (xᵢ − x̄)(xᵢ − x̄)ᵀ over all rows.
#[cfg(not(feature = "parallel"))]
fn scatter_matrix(batch: &SampleBatch<'_>, mean: &[f64]) -> DMatrix<f64> {
    let n = batch.dim();
    let mut scatter = DMatrix::<f64>::zeros(n, n);
    for row in batch.rows() {
        let d = deviation(row, mean);
        scatter += &d * d.transpose();
    }
    scatter
}

/// Σ (xᵢ − x̄)(xᵢ − x̄)ᵀ over all rows, folded per rayon worker.
#[cfg(feature = "parallel")]
fn scatter_matrix(batch: &SampleBatch<'_>, mean: &[f64]) -> DMatrix<f64> {
    let n = batch.dim();
    batch
        .as_slice()
        .par_chunks_exact(n)
        .fold(
            || DMatrix::<f64>::zeros(n, n),
            |mut acc, row| {
                let d = deviation(row, mean);
                acc += &d * d.transpose();
                acc
            },
        )
        .reduce(|| DMatrix::<f64>::zeros(n, n), |a, b| a + b)
}

// ---------------------------------------------------------------------------
// Compensated summation
// ---------------------------------------------------------------------------

/// Running Neumaier compensated sum.
///
/// An improved Kahan summation that also handles addends larger in
/// magnitude than the running sum, giving O(ε) error independent of the
/// number of terms.
///
/// # Examples
/// ```
/// use alpha_stats::stats::NeumaierSum;
/// let mut s = NeumaierSum::new();
/// for x in [1e16, 1.0, -1e16] {
///     s.add(x);
/// }
/// assert_eq!(s.total(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NeumaierSum {
    sum: f64,
    c: f64,
}

impl NeumaierSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `x`, capturing the low-order bits of the smaller operand.
    pub fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.c += (self.sum - t) + x;
        } else {
            self.c += (x - t) + self.sum;
        }
        self.sum = t;
    }

    /// The compensated total.
    ///
    /// Once the running sum overflows the correction term is meaningless,
    /// so the overflowed sum is returned as is (`±inf`, never NaN for
    /// finite addends).
    pub fn total(&self) -> f64 {
        if self.sum.is_finite() {
            self.sum + self.c
        } else {
            self.sum
        }
    }
}

/// Neumaier compensated sum of a slice.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut acc = NeumaierSum::new();
    for &x in data {
        acc.add(x);
    }
    acc.total()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
