//! Matrix norms of selectable order.
//!
//! | Variant | Order | Value |
//! |---|---|---|
//! | [`MatrixNorm::Frobenius`] | `fro` | √Σ aᵢⱼ² |
//! | [`MatrixNorm::Nuclear`] | `nuc` | Σ σᵢ |
//! | [`MatrixNorm::MaxColumnSum`] | `1` | maxⱼ Σᵢ \|aᵢⱼ\| |
//! | [`MatrixNorm::MinColumnSum`] | `-1` | minⱼ Σᵢ \|aᵢⱼ\| |
//! | [`MatrixNorm::Spectral`] | `2` | max σᵢ |
//! | [`MatrixNorm::MinSingular`] | `-2` | min σᵢ |
//! | [`MatrixNorm::MaxRowSum`] | `inf` | maxᵢ Σⱼ \|aᵢⱼ\| |
//! | [`MatrixNorm::MinRowSum`] | `-inf` | minᵢ Σⱼ \|aᵢⱼ\| |
//!
//! where σᵢ are the singular values. The negative orders are not norms in
//! the strict sense but are kept for parity with the usual dense-matrix
//! conventions.

use nalgebra::{DMatrix, SVD};

use crate::error::{Result, StatsError};

/// Order of the matrix norm applied to a covariance matrix.
///
/// Defaults to [`MatrixNorm::Spectral`] (order 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixNorm {
    Frobenius,
    Nuclear,
    MaxColumnSum,
    MinColumnSum,
    #[default]
    Spectral,
    MinSingular,
    MaxRowSum,
    MinRowSum,
}

impl MatrixNorm {
    /// Whether evaluating this order needs a singular value decomposition.
    pub fn needs_svd(self) -> bool {
        matches!(
            self,
            MatrixNorm::Nuclear | MatrixNorm::Spectral | MatrixNorm::MinSingular
        )
    }
}

/// Evaluates `norm` on `m`.
///
/// Returns `0.0` for an empty matrix.
///
/// # Complexity
/// O(r·c) for the entrywise and row/column-sum orders, O(min(r,c)·r·c) for
/// the singular-value orders.
///
/// # Errors
/// - [`StatsError::NonFiniteResult`] if `m` holds a NaN or infinite entry,
///   or if the norm itself overflows.
/// - [`StatsError::SvdNotConverged`] if the decomposition fails.
///
/// # Examples
/// ```
/// use alpha_stats::norm::{matrix_norm, MatrixNorm};
/// use nalgebra::DMatrix;
/// let m = DMatrix::from_row_slice(2, 2, &[1.0, -2.0, 3.0, 4.0]);
/// assert_eq!(matrix_norm(&m, MatrixNorm::MaxColumnSum).unwrap(), 6.0);
/// assert_eq!(matrix_norm(&m, MatrixNorm::MaxRowSum).unwrap(), 7.0);
/// assert!((matrix_norm(&m, MatrixNorm::Frobenius).unwrap() - 30.0_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn matrix_norm(m: &DMatrix<f64>, norm: MatrixNorm) -> Result<f64> {
    if m.is_empty() {
        return Ok(0.0);
    }
    // nalgebra's SVD panics when sorting NaN singular values.
    if !m.iter().all(|x| x.is_finite()) {
        return Err(StatsError::NonFiniteResult {
            operation: "matrix norm input",
        });
    }
    let value = match norm {
        MatrixNorm::Frobenius => m.norm(),
        MatrixNorm::MaxColumnSum => column_sums(m).fold(f64::NEG_INFINITY, f64::max),
        MatrixNorm::MinColumnSum => column_sums(m).fold(f64::INFINITY, f64::min),
        MatrixNorm::MaxRowSum => row_sums(m).fold(f64::NEG_INFINITY, f64::max),
        MatrixNorm::MinRowSum => row_sums(m).fold(f64::INFINITY, f64::min),
        MatrixNorm::Nuclear | MatrixNorm::Spectral | MatrixNorm::MinSingular => {
            let svd = SVD::try_new(m.clone(), false, false, f64::EPSILON, 0)
                .ok_or(StatsError::SvdNotConverged)?;
            let sv = svd.singular_values;
            match norm {
                MatrixNorm::Nuclear => sv.sum(),
                MatrixNorm::Spectral => sv.max(),
                _ => sv.min(),
            }
        }
    };
    if !value.is_finite() {
        return Err(StatsError::NonFiniteResult {
            operation: "matrix norm",
        });
    }
    Ok(value)
}

fn column_sums(m: &DMatrix<f64>) -> impl Iterator<Item = f64> + '_ {
    m.column_iter().map(|c| c.iter().map(|x| x.abs()).sum())
}

fn row_sums(m: &DMatrix<f64>) -> impl Iterator<Item = f64> + '_ {
    m.row_iter().map(|r| r.iter().map(|x| x.abs()).sum())
}
