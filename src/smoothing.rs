//! Moving-window mean with a one-standard-deviation band.
//!
//! For each index `i` of a scalar series the window is
//! `[max(0, i − w), min(len, i + w))`, upper bound exclusive, so interior
//! windows hold `2w` points and the edges are truncated. The band is
//! `mean ± √variance` with the variance computed by
//! [`compute_variance_norm`] on the window.

use crate::batch::SampleBatch;
use crate::error::{Result, StatsError};
use crate::stats::{compute_mean, compute_variance_norm};

/// Smallest half-window for which every window holds two samples.
pub const MIN_HALF_WINDOW: usize = 2;

/// Per-index window mean and spread of a scalar series.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothedSeries {
    pub mean: Vec<f64>,
    /// Square root of the window's unbiased variance.
    pub spread: Vec<f64>,
}

impl SmoothedSeries {
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// `mean − spread` at every index.
    pub fn lower(&self) -> Vec<f64> {
        self.mean.iter().zip(&self.spread).map(|(m, s)| m - s).collect()
    }

    /// `mean + spread` at every index.
    pub fn upper(&self) -> Vec<f64> {
        self.mean.iter().zip(&self.spread).map(|(m, s)| m + s).collect()
    }
}

/// Smooths `series` with half-window `half_window`.
///
/// # Errors
/// - [`StatsError::InvalidWindow`] if `half_window < 2` or the series has
///   fewer than 2 points.
/// - [`StatsError::NonFiniteSample`] if the series contains NaN or infinity.
///
/// # Examples
/// ```
/// use alpha_stats::smoothing::smooth_series;
/// let s = smooth_series(&[1.0, 3.0, 1.0, 3.0, 1.0, 3.0], 2).unwrap();
/// assert_eq!(s.mean[0], 2.0);
/// assert!(s.lower().iter().zip(s.upper()).all(|(lo, hi)| *lo <= hi));
/// ```
pub fn smooth_series(series: &[f64], half_window: usize) -> Result<SmoothedSeries> {
    let len = series.len();
    if half_window < MIN_HALF_WINDOW || len < 2 {
        return Err(StatsError::InvalidWindow { half_window, len });
    }
    let batch = SampleBatch::new(series, 1)?;

    let mut mean = Vec::with_capacity(len);
    let mut spread = Vec::with_capacity(len);
    for i in 0..len {
        let start = i.saturating_sub(half_window);
        let end = i.saturating_add(half_window).min(len);
        let window = batch
            .slice_rows(start..end)
            .ok_or(StatsError::InvalidWindow { half_window, len })?;
        mean.push(compute_mean(&window)?[0]);
        spread.push(compute_variance_norm(&window)?.sqrt());
    }
    Ok(SmoothedSeries { mean, spread })
}
