//! Error type shared by every fallible operation in the crate.
//!
//! All precondition violations are reported as [`StatsError`]; no operation
//! turns invalid input into a NaN or infinite result. Finite input whose
//! statistics overflow `f64` is reported as [`StatsError::NonFiniteResult`].

/// Reasons a statistic or bound cannot be computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// Samples must have at least one coordinate.
    #[error("sample dimension must be at least 1")]
    ZeroDimension,

    /// The flat buffer does not split into whole rows.
    #[error("batch length {len} is not a multiple of the sample dimension {dim}")]
    RaggedBatch { len: usize, dim: usize },

    /// A sample contains NaN or an infinity.
    #[error("sample {sample} contains a non-finite value")]
    NonFiniteSample { sample: usize },

    /// The batch is too small for the requested estimator.
    #[error("{operation} requires at least {required} samples, got {actual}")]
    InsufficientSamples {
        operation: &'static str,
        required: usize,
        actual: usize,
    },

    /// The confidence level must lie strictly between 0 and 1.
    #[error("confidence level delta must lie in (0, 1), got {0}")]
    InvalidDelta(f64),

    /// Bound formulas divide by the sample count.
    #[error("sample count N must be at least 1")]
    ZeroSampleCount,

    /// A scalar parameter is out of its domain (negative, NaN or infinite).
    #[error("parameter `{name}` is out of range, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// `sigma² + L·eps/3` vanished, leaving the exponent undefined.
    #[error("exponent denominator sigma^2 + L*eps/3 is zero")]
    DegenerateExponent,

    /// An intermediate or final value overflowed the finite `f64` range.
    #[error("{operation} is not representable as a finite f64")]
    NonFiniteResult { operation: &'static str },

    /// The singular value decomposition did not converge.
    #[error("singular value decomposition did not converge")]
    SvdNotConverged,

    /// Smoothing windows must always hold at least two samples.
    #[error("smoothing needs half_window >= 2 and at least 2 points, got half_window={half_window}, len={len}")]
    InvalidWindow { half_window: usize, len: usize },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Checks that `value` is finite and non-negative.
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(StatsError::InvalidParameter { name, value })
    }
}

/// Checks that `value` is finite, allowing any sign.
pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::InvalidParameter { name, value })
    }
}
