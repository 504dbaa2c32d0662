//! Bernstein-type confidence bounds on the deviation of an empirical mean.
//!
//! Given the empirical mean `mu` of dimension `d`, a variance proxy `sigma`,
//! the sample count `N`, a bound `L` on individual sample deviations and a
//! confidence level `delta`, this module provides:
//!
//! - [`compute_confidence_interval`]: the closed-form two-term bound
//!   ```text
//!   sqrt(2·sigma·ln((d+1)/delta) / N) + (2·L)/(3·N) · ln((d+1)/delta)
//!   ```
//! - [`compute_confidence_interval_roots`]: both roots of
//!   `a·eps² + b·eps + c = 0` with
//!   ```text
//!   a = N/2,  b = (L/3)·ln((1−delta)/(d+1)),  c = sigma·ln((1−delta)/(d+1))
//!   ```
//! - [`compute_confidence_probability`]: the failure probability bound
//!   ```text
//!   (d+1) · exp((−eps²·N/2) / (sigma² + L·eps/3))
//!   ```
//!
//! The closed form and the quadratic use different logarithm arguments
//! (`(d+1)/delta` against `(1−delta)/(d+1)`), so the positive root is not
//! the closed-form bound in general. Both are evaluated exactly as written.
//!
//! The probability bound is not clamped: for small `eps` it exceeds 1 and
//! equals `d + 1` at `eps = 0`.
//!
//! `sigma` may be any finite real. The quadratic and the probability bound
//! are defined for negative values (a negative `sigma` makes `c > 0`, which
//! can turn the roots complex); only the closed form, which takes
//! `sqrt(sigma)`, requires `sigma >= 0`.
//!
//! Reference: Tropp (2012), "User-Friendly Tail Bounds for Sums of Random
//! Matrices", *Foundations of Computational Mathematics* 12(4).

use num_complex::Complex64;

use crate::error::{finite, non_negative, Result, StatsError};

/// Validated inputs of the bound formulas.
///
/// # Examples
/// ```
/// use alpha_stats::bounds::BoundParams;
/// let p = BoundParams::new(1, 1.0, 100, 1.0, 0.05).unwrap();
/// let eps = p.confidence_interval().unwrap();
/// assert!(eps > 0.0 && eps < 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundParams {
    dim: usize,
    sigma: f64,
    n_samples: usize,
    deviation_bound: f64,
    delta: f64,
}

impl BoundParams {
    /// Creates bound parameters for a mean of dimension `dim`.
    ///
    /// # Errors
    /// - [`StatsError::InvalidParameter`] if `sigma` is not finite, or if
    ///   `deviation_bound` is negative or not finite.
    /// - [`StatsError::ZeroSampleCount`] if `n_samples == 0`.
    /// - [`StatsError::InvalidDelta`] unless `0 < delta < 1`.
    pub fn new(
        dim: usize,
        sigma: f64,
        n_samples: usize,
        deviation_bound: f64,
        delta: f64,
    ) -> Result<Self> {
        let sigma = finite("sigma", sigma)?;
        let deviation_bound = non_negative("L", deviation_bound)?;
        if n_samples == 0 {
            return Err(StatsError::ZeroSampleCount);
        }
        if !(delta > 0.0 && delta < 1.0) {
            return Err(StatsError::InvalidDelta(delta));
        }
        Ok(Self {
            dim,
            sigma,
            n_samples,
            deviation_bound,
            delta,
        })
    }

    /// Same as [`BoundParams::new`], taking the dimension from `mu`.
    pub fn from_mean(
        mu: &[f64],
        sigma: f64,
        n_samples: usize,
        deviation_bound: f64,
        delta: f64,
    ) -> Result<Self> {
        Self::new(mu.len(), sigma, n_samples, deviation_bound, delta)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn deviation_bound(&self) -> f64 {
        self.deviation_bound
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Coefficients `(a, b, c)` of `a·eps² + b·eps + c = 0`.
    ///
    /// Since `0 < delta < 1`, the log term is negative, so `b ≤ 0` and `c`
    /// has the opposite sign of `sigma`.
    pub fn quadratic_coefficients(&self) -> (f64, f64, f64) {
        let log_term = ((1.0 - self.delta) / (self.dim as f64 + 1.0)).ln();
        let a = self.n_samples as f64 / 2.0;
        let b = self.deviation_bound / 3.0 * log_term;
        let c = self.sigma * log_term;
        (a, b, c)
    }

    /// Roots of the quadratic formulation.
    pub fn confidence_interval_roots(&self) -> QuadraticRoots {
        let (a, b, c) = self.quadratic_coefficients();
        let roots = quadratic_roots(a, b, c);
        if !roots.is_real() {
            tracing::debug!(a, b, c, "confidence quadratic has complex roots");
        }
        roots
    }

    /// Closed-form confidence interval bound.
    ///
    /// # Errors
    /// [`StatsError::InvalidParameter`] if `sigma < 0`.
    pub fn confidence_interval(&self) -> Result<f64> {
        non_negative("sigma", self.sigma)?;
        let n = self.n_samples as f64;
        let log_term = ((self.dim as f64 + 1.0) / self.delta).ln();
        let first = (2.0 * self.sigma * log_term / n).sqrt();
        let second = 2.0 * self.deviation_bound / (3.0 * n) * log_term;
        Ok(first + second)
    }
}

/// Computes the closed-form Bernstein confidence interval bound.
///
/// With probability at least `1 − delta`, `‖x̄ − E[x]‖` does not exceed the
/// returned value.
///
/// # Errors
/// See [`BoundParams::new`]; additionally `sigma` must be non-negative.
///
/// # Examples
/// ```
/// use alpha_stats::bounds::compute_confidence_interval;
/// let mu = [0.0];
/// let narrow = compute_confidence_interval(&mu, 1.0, 100, 1.0, 0.05).unwrap();
/// let wide = compute_confidence_interval(&mu, 2.0, 100, 1.0, 0.05).unwrap();
/// assert!(wide > narrow);
/// ```
pub fn compute_confidence_interval(
    mu: &[f64],
    sigma: f64,
    n_samples: usize,
    deviation_bound: f64,
    delta: f64,
) -> Result<f64> {
    BoundParams::from_mean(mu, sigma, n_samples, deviation_bound, delta)?.confidence_interval()
}

/// Computes both roots of the quadratic formulation of the bound.
///
/// A negative discriminant is not an error: the roots come back as a
/// [`QuadraticRoots::Complex`] pair. With `a > 0` and `b ≤ 0` this needs
/// `c > 0`, i.e. a negative `sigma`.
///
/// # Errors
/// See [`BoundParams::new`].
///
/// # Examples
/// ```
/// use alpha_stats::bounds::{compute_confidence_interval_roots, QuadraticRoots};
/// // N = 2, L = 0 and sigma = −1/ln((1−δ)/(d+1)) reduce to eps² − 1 = 0.
/// let delta: f64 = 0.5;
/// let sigma = -1.0 / ((1.0 - delta) / 2.0).ln();
/// let roots = compute_confidence_interval_roots(&[0.0], sigma, 2, 0.0, delta).unwrap();
/// match roots {
///     QuadraticRoots::Real(hi, lo) => {
///         assert!((hi - 1.0).abs() < 1e-12);
///         assert!((lo + 1.0).abs() < 1e-12);
///     }
///     QuadraticRoots::Complex(..) => unreachable!(),
/// }
/// ```
pub fn compute_confidence_interval_roots(
    mu: &[f64],
    sigma: f64,
    n_samples: usize,
    deviation_bound: f64,
    delta: f64,
) -> Result<QuadraticRoots> {
    Ok(BoundParams::from_mean(mu, sigma, n_samples, deviation_bound, delta)?
        .confidence_interval_roots())
}

/// Computes the failure probability bound `P(‖x̄ − E[x]‖ > eps)`.
///
/// The result lies in `[0, d + 1]` and is deliberately not clamped to
/// `[0, 1]`; values above 1 mean the bound is vacuous at this `eps`.
///
/// # Errors
/// - [`StatsError::InvalidParameter`] if `sigma` is not finite, or if
///   `deviation_bound` or `eps` is negative or not finite. Only `sigma²`
///   enters the formula, so its sign is irrelevant.
/// - [`StatsError::ZeroSampleCount`] if `n_samples == 0`.
/// - [`StatsError::DegenerateExponent`] if `sigma² + L·eps/3 == 0`.
///
/// # Examples
/// ```
/// use alpha_stats::bounds::compute_confidence_probability;
/// assert_eq!(compute_confidence_probability(3, 1.0, 50, 1.0, 0.0).unwrap(), 4.0);
/// let p = compute_confidence_probability(3, 1.0, 50, 1.0, 2.0).unwrap();
/// assert!(p < 1e-10);
/// ```
pub fn compute_confidence_probability(
    dim: usize,
    sigma: f64,
    n_samples: usize,
    deviation_bound: f64,
    eps: f64,
) -> Result<f64> {
    let sigma = finite("sigma", sigma)?;
    let deviation_bound = non_negative("L", deviation_bound)?;
    let eps = non_negative("eps", eps)?;
    if n_samples == 0 {
        return Err(StatsError::ZeroSampleCount);
    }
    let denom = sigma * sigma + deviation_bound * eps / 3.0;
    if denom == 0.0 {
        return Err(StatsError::DegenerateExponent);
    }
    let numer = -eps * eps * n_samples as f64 / 2.0;
    let p = (dim as f64 + 1.0) * (numer / denom).exp();
    if p > 1.0 {
        tracing::debug!(p, eps, "probability bound is vacuous");
    }
    Ok(p)
}

// ---------------------------------------------------------------------------
// Quadratic roots
// ---------------------------------------------------------------------------

/// The two roots of a real quadratic `a·x² + b·x + c = 0`.
///
/// Real roots are ordered larger first. Complex roots form a conjugate pair
/// with the positive imaginary part first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    Real(f64, f64),
    Complex(Complex64, Complex64),
}

impl QuadraticRoots {
    /// Solves `a·x² + b·x + c = 0`.
    ///
    /// Returns `None` if `a == 0` or any coefficient is not finite.
    ///
    /// # Algorithm
    /// The coefficients are first divided by the power of two nearest below
    /// `max(|a|, |b|, |c|)`. Power-of-two scaling is exact, so the roots are
    /// unchanged unless a coefficient underflows, and `b²` and `4ac` can no
    /// longer overflow. For a non-negative discriminant
    /// it then uses `q = −(b + sign(b)·√disc)/2` and the roots `q/a`, `c/q`,
    /// which avoids cancellation when `b² ≫ 4ac`.
    ///
    /// Reference: Press et al. (2007), *Numerical Recipes*, 3rd ed., §5.6.
    ///
    /// # Examples
    /// ```
    /// use alpha_stats::bounds::QuadraticRoots;
    /// assert_eq!(QuadraticRoots::solve(1.0, -3.0, 2.0), Some(QuadraticRoots::Real(2.0, 1.0)));
    /// assert!(!QuadraticRoots::solve(1.0, 0.0, 1.0).unwrap().is_real());
    /// assert_eq!(QuadraticRoots::solve(0.0, 1.0, 1.0), None);
    /// ```
    pub fn solve(a: f64, b: f64, c: f64) -> Option<Self> {
        if a == 0.0 || !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return None;
        }
        Some(quadratic_roots(a, b, c))
    }

    pub fn is_real(&self) -> bool {
        matches!(self, QuadraticRoots::Real(..))
    }

    /// Both roots as complex numbers.
    pub fn as_complex(&self) -> [Complex64; 2] {
        match *self {
            QuadraticRoots::Real(r1, r2) => [Complex64::new(r1, 0.0), Complex64::new(r2, 0.0)],
            QuadraticRoots::Complex(z1, z2) => [z1, z2],
        }
    }

    /// The larger real root, or `None` for a complex pair.
    pub fn max_real(&self) -> Option<f64> {
        match *self {
            QuadraticRoots::Real(r1, _) => Some(r1),
            QuadraticRoots::Complex(..) => None,
        }
    }
}

/// Quadratic roots for finite coefficients with `a != 0`.
fn quadratic_roots(a: f64, b: f64, c: f64) -> QuadraticRoots {
    let scale = binary_scale(a.abs().max(b.abs()).max(c.abs()));
    let (a, b, c) = (a / scale, b / scale, c / scale);
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        let re = -b / (2.0 * a);
        let im = ((-disc).sqrt() / (2.0 * a)).abs();
        return QuadraticRoots::Complex(Complex64::new(re, im), Complex64::new(re, -im));
    }
    let sign = if b < 0.0 { -1.0 } else { 1.0 };
    let q = -0.5 * (b + sign * disc.sqrt());
    let (r1, r2) = if q == 0.0 {
        // b == 0 and c == 0: double root at zero.
        (0.0, 0.0)
    } else {
        (q / a, c / q)
    };
    if r1 >= r2 {
        QuadraticRoots::Real(r1, r2)
    } else {
        QuadraticRoots::Real(r2, r1)
    }
}

/// Largest power of two not exceeding the finite, positive `x`, or the
/// smallest normal power of two when `x` is subnormal.
fn binary_scale(x: f64) -> f64 {
    let exponent = ((x.to_bits() >> 52) & 0x7ff) as i32;
    2.0_f64.powi(exponent.max(1) - 1023)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sigma_for_unit_roots(d: usize, delta: f64) -> f64 {
        -1.0 / ((1.0 - delta) / (d as f64 + 1.0)).ln()
    }

    // --- parameters ---

    #[test]
    fn test_params_validation() {
        assert!(BoundParams::new(2, 1.0, 10, 1.0, 0.05).is_ok());
        assert!(BoundParams::new(0, 0.0, 1, 0.0, 0.5).is_ok());
        assert_eq!(
            BoundParams::new(2, 1.0, 0, 1.0, 0.05),
            Err(StatsError::ZeroSampleCount)
        );
        for delta in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                BoundParams::new(2, 1.0, 10, 1.0, delta),
                Err(StatsError::InvalidDelta(_))
            ));
        }
        assert!(BoundParams::new(2, -1.0, 10, 1.0, 0.05).is_ok());
        assert!(matches!(
            BoundParams::new(2, f64::NAN, 10, 1.0, 0.05),
            Err(StatsError::InvalidParameter { name: "sigma", .. })
        ));
        assert!(matches!(
            BoundParams::new(2, 1.0, 10, f64::INFINITY, 0.05),
            Err(StatsError::InvalidParameter { name: "L", .. })
        ));
    }

    #[test]
    fn test_from_mean_uses_length() {
        let p = BoundParams::from_mean(&[0.1, 0.2, 0.3], 1.0, 10, 1.0, 0.1).unwrap();
        assert_eq!(p.dim(), 3);
        assert_eq!(p.n_samples(), 10);
        assert_eq!(p.sigma(), 1.0);
        assert_eq!(p.deviation_bound(), 1.0);
        assert_eq!(p.delta(), 0.1);
    }

    #[test]
    fn test_quadratic_coefficients_signs() {
        let p = BoundParams::new(4, 2.0, 30, 3.0, 0.1).unwrap();
        let (a, b, c) = p.quadratic_coefficients();
        let log_term = (0.9_f64 / 5.0).ln();
        assert_eq!(a, 15.0);
        assert!((b - log_term).abs() < 1e-15);
        assert!((c - 2.0 * log_term).abs() < 1e-15);
        assert!(b < 0.0 && c < 0.0);
    }

    // --- closed-form interval ---

    #[test]
    fn test_interval_known_value() {
        // d = 1, delta = 0.05: ln(40)
        let l = 40.0_f64.ln();
        let expected = (2.0 * l / 100.0).sqrt() + 2.0 / 300.0 * l;
        let got = compute_confidence_interval(&[0.0], 1.0, 100, 1.0, 0.05).unwrap();
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_interval_monotonic_in_sigma() {
        let lo = compute_confidence_interval(&[0.0], 1.0, 100, 1.0, 0.05).unwrap();
        let hi = compute_confidence_interval(&[0.0], 2.0, 100, 1.0, 0.05).unwrap();
        assert!(hi > lo);
    }

    #[test]
    fn test_interval_zero_spread() {
        assert_eq!(
            compute_confidence_interval(&[1.0, 2.0], 0.0, 10, 0.0, 0.1).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_interval_rejects_negative_sigma() {
        assert!(matches!(
            compute_confidence_interval(&[0.0], -1.0, 10, 1.0, 0.1),
            Err(StatsError::InvalidParameter { name: "sigma", value }) if value == -1.0
        ));
    }

    #[test]
    fn test_interval_rejects_bad_delta() {
        assert_eq!(
            compute_confidence_interval(&[0.0], 1.0, 10, 1.0, 1.0),
            Err(StatsError::InvalidDelta(1.0))
        );
    }

    #[test]
    fn test_interval_differs_from_positive_root() {
        let mu = [0.0, 0.0];
        let closed = compute_confidence_interval(&mu, 1.0, 50, 1.0, 0.05).unwrap();
        let root = compute_confidence_interval_roots(&mu, 1.0, 50, 1.0, 0.05)
            .unwrap()
            .max_real()
            .unwrap();
        assert!((closed - root).abs() > 1e-3, "closed={closed}, root={root}");
    }

    // --- roots ---

    #[test]
    fn test_roots_unit() {
        for (d, delta) in [(1, 0.5), (3, 0.05), (10, 0.9)] {
            let sigma = sigma_for_unit_roots(d, delta);
            let mu = vec![0.0; d];
            let p = BoundParams::from_mean(&mu, sigma, 2, 0.0, delta).unwrap();
            let (a, b, c) = p.quadratic_coefficients();
            assert_eq!(a, 1.0);
            assert_eq!(b, 0.0);
            assert!((c + 1.0).abs() < 1e-12);
            let roots = p.confidence_interval_roots();
            let QuadraticRoots::Real(hi, lo) = roots else {
                panic!("expected real roots, got {roots:?}");
            };
            assert!((hi - 1.0).abs() < 1e-12, "hi={hi}");
            assert!((lo + 1.0).abs() < 1e-12, "lo={lo}");
        }
    }

    #[test]
    fn test_roots_from_bound_are_real() {
        // b, c <= 0 with a > 0 gives disc = b² − 4ac >= 0.
        let roots = compute_confidence_interval_roots(&[0.0; 5], 0.7, 40, 2.0, 0.01).unwrap();
        assert!(roots.is_real());
        let QuadraticRoots::Real(hi, lo) = roots else {
            unreachable!()
        };
        assert!(hi > 0.0 && lo <= 0.0);
    }

    #[test]
    fn test_roots_complex_for_negative_sigma() {
        // a = 1, b = (1/3)·ln(1/4), c = −ln(1/4) > 0: disc < 0.
        let roots = compute_confidence_interval_roots(&[0.0], -1.0, 2, 1.0, 0.5).unwrap();
        let QuadraticRoots::Complex(z1, z2) = roots else {
            panic!("expected complex roots, got {roots:?}");
        };
        let log_term = 0.25_f64.ln();
        let (b, c) = (log_term / 3.0, -log_term);
        let re = -b / 2.0;
        let im = (4.0 * c - b * b).sqrt() / 2.0;
        assert!((z1 - Complex64::new(re, im)).norm() < 1e-12, "z1={z1}");
        assert!((z2 - Complex64::new(re, -im)).norm() < 1e-12, "z2={z2}");
        assert_eq!(z1.conj(), z2);
    }

    #[test]
    fn test_solve_large_linear_coefficient() {
        // x² + 1e200·x + 1 = 0: roots ≈ −1e-200 and −1e200, with b² overflowing.
        let roots = QuadraticRoots::solve(1.0, 1e200, 1.0).unwrap();
        let QuadraticRoots::Real(hi, lo) = roots else {
            panic!("expected real roots, got {roots:?}");
        };
        assert!((hi / -1e-200 - 1.0).abs() < 1e-14, "hi={hi}");
        assert!((lo / -1e200 - 1.0).abs() < 1e-14, "lo={lo}");
    }

    #[test]
    fn test_solve_large_constant_complex() {
        // x² + 1e300 = 0: ±1e150·i, with 4ac overflowing.
        let [z1, z2] = QuadraticRoots::solve(1.0, 0.0, 1e300).unwrap().as_complex();
        assert!((z1.im / 1e150 - 1.0).abs() < 1e-14, "z1={z1}");
        assert_eq!(z1.re, 0.0);
        assert_eq!(z2, z1.conj());
    }

    #[test]
    fn test_binary_scale() {
        assert_eq!(binary_scale(1.0), 1.0);
        assert_eq!(binary_scale(3.0), 2.0);
        assert_eq!(binary_scale(0.3), 0.25);
        assert_eq!(binary_scale(f64::MAX), 2.0_f64.powi(1023));
        assert_eq!(binary_scale(f64::MIN_POSITIVE / 4.0), f64::MIN_POSITIVE);
    }

    #[test]
    fn test_solve_real_ordering() {
        assert_eq!(
            QuadraticRoots::solve(1.0, -3.0, 2.0),
            Some(QuadraticRoots::Real(2.0, 1.0))
        );
        assert_eq!(
            QuadraticRoots::solve(-1.0, 3.0, -2.0),
            Some(QuadraticRoots::Real(2.0, 1.0))
        );
        assert_eq!(
            QuadraticRoots::solve(2.0, 0.0, 0.0),
            Some(QuadraticRoots::Real(0.0, 0.0))
        );
    }

    #[test]
    fn test_solve_double_root() {
        // (x − 3)² = x² − 6x + 9
        let r = QuadraticRoots::solve(1.0, -6.0, 9.0).unwrap();
        assert_eq!(r, QuadraticRoots::Real(3.0, 3.0));
    }

    #[test]
    fn test_solve_complex() {
        // x² + 2x + 5 = 0 → −1 ± 2i
        let r = QuadraticRoots::solve(1.0, 2.0, 5.0).unwrap();
        assert!(!r.is_real());
        assert_eq!(r.max_real(), None);
        let [z1, z2] = r.as_complex();
        assert!((z1 - Complex64::new(-1.0, 2.0)).norm() < 1e-15);
        assert!((z2 - Complex64::new(-1.0, -2.0)).norm() < 1e-15);
    }

    #[test]
    fn test_solve_complex_negative_leading() {
        // −x² − 1 = 0 → ±i
        let r = QuadraticRoots::solve(-1.0, 0.0, -1.0).unwrap();
        let [z1, z2] = r.as_complex();
        assert_eq!(z1, Complex64::new(0.0, 1.0));
        assert_eq!(z2, Complex64::new(0.0, -1.0));
    }

    #[test]
    fn test_solve_avoids_cancellation() {
        // x² − 1e8·x + 1 = 0: small root ≈ 1e-8.
        let QuadraticRoots::Real(hi, lo) = QuadraticRoots::solve(1.0, -1e8, 1.0).unwrap() else {
            panic!("expected real roots");
        };
        assert!((hi - 1e8).abs() / 1e8 < 1e-15);
        assert!((lo - 1e-8).abs() / 1e-8 < 1e-12, "lo={lo}");
    }

    #[test]
    fn test_solve_rejects_degenerate() {
        assert_eq!(QuadraticRoots::solve(0.0, 1.0, 1.0), None);
        assert_eq!(QuadraticRoots::solve(1.0, f64::NAN, 1.0), None);
        assert_eq!(QuadraticRoots::solve(f64::INFINITY, 1.0, 1.0), None);
    }

    #[test]
    fn test_as_complex_real() {
        let r = QuadraticRoots::Real(2.0, -1.0);
        assert_eq!(
            r.as_complex(),
            [Complex64::new(2.0, 0.0), Complex64::new(-1.0, 0.0)]
        );
        assert_eq!(r.max_real(), Some(2.0));
    }

    // --- probability ---

    #[test]
    fn test_probability_at_zero_eps() {
        for d in [0, 1, 2, 7, 100] {
            let p = compute_confidence_probability(d, 0.3, 25, 2.0, 0.0).unwrap();
            assert_eq!(p, d as f64 + 1.0);
        }
    }

    #[test]
    fn test_probability_known_value() {
        // numer = −4·10/2 = −20, denom = 1 + 2/3 = 5/3 → exp(−12)
        let p = compute_confidence_probability(2, 1.0, 10, 1.0, 2.0).unwrap();
        assert!((p - 3.0 * (-12.0_f64).exp()).abs() < 1e-18);
    }

    #[test]
    fn test_probability_not_clamped() {
        let p = compute_confidence_probability(4, 10.0, 2, 1.0, 0.1).unwrap();
        assert!(p > 1.0, "p={p}");
        assert!(p <= 5.0);
    }

    #[test]
    fn test_probability_sigma_zero() {
        // denom = L·eps/3 stays positive.
        let p = compute_confidence_probability(1, 0.0, 3, 3.0, 1.0).unwrap();
        assert!((p - 2.0 * (-1.5_f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_probability_errors() {
        assert_eq!(
            compute_confidence_probability(1, 0.0, 10, 1.0, 0.0),
            Err(StatsError::DegenerateExponent)
        );
        assert_eq!(
            compute_confidence_probability(1, 0.0, 10, 0.0, 1.0),
            Err(StatsError::DegenerateExponent)
        );
        assert_eq!(
            compute_confidence_probability(1, 1.0, 0, 1.0, 1.0),
            Err(StatsError::ZeroSampleCount)
        );
        assert!(matches!(
            compute_confidence_probability(1, 1.0, 10, 1.0, -0.5),
            Err(StatsError::InvalidParameter { name: "eps", .. })
        ));
        assert!(matches!(
            compute_confidence_probability(1, f64::NAN, 10, 1.0, 0.5),
            Err(StatsError::InvalidParameter { name: "sigma", .. })
        ));
    }

    #[test]
    fn test_probability_sign_of_sigma_irrelevant() {
        let neg = compute_confidence_probability(1, -1.0, 10, 1.0, 0.5).unwrap();
        let pos = compute_confidence_probability(1, 1.0, 10, 1.0, 0.5).unwrap();
        assert_eq!(neg, pos);
    }
}
