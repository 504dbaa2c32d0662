//! # alpha-stats
//!
//! Batch statistics and Bernstein-type confidence bounds for noisy vector
//! samples such as stochastic gradient estimates.
//!
//! Given a batch of `B` samples of dimension `n`, the crate computes the
//! empirical mean, a variance norm and a covariance-matrix norm, and turns
//! them into a high-probability bound on `‖x̄ − E[x]‖`.
//!
//! ## Modules
//!
//! - [`batch`] — validated, borrowed view over a row-major sample batch
//! - [`stats`] — mean, covariance, covariance norm, variance norm
//! - [`norm`] — matrix norms of selectable order
//! - [`bounds`] — confidence interval, its quadratic roots, failure probability
//! - [`summary`] — one-shot batch summary feeding the bound formulas
//! - [`smoothing`] — moving-window mean with a ±√variance band
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: no state survives a call; inputs are borrowed read-only
//! - **Explicit preconditions**: invalid input, and finite input whose
//!   statistics overflow, is a [`StatsError`], never a silent NaN
//! - **Numerical stability**: compensated summation for every accumulation
//! - **Property-based testing**: statistical invariants verified via proptest
//!
//! ## Cargo features
//!
//! - `parallel` — accumulate the covariance scatter matrix with rayon
//! - `serde` — `Serialize`/`Deserialize` for parameter and summary types
//!
//! ```
//! use alpha_stats::{compute_confidence_interval, compute_mean, compute_variance_norm, SampleBatch};
//!
//! let data = [0.9, 0.1, 1.1, -0.1, 1.0, 0.05, 1.05, -0.05];
//! let batch = SampleBatch::new(&data, 2)?;
//! let mu = compute_mean(&batch)?;
//! let sigma = compute_variance_norm(&batch)?;
//! let eps = compute_confidence_interval(&mu, sigma, batch.len(), 1.0, 0.05)?;
//! assert!(eps > 0.0);
//! # Ok::<(), alpha_stats::StatsError>(())
//! ```

pub mod batch;
pub mod bounds;
pub mod error;
pub mod norm;
pub mod smoothing;
pub mod stats;
pub mod summary;

pub use batch::SampleBatch;
pub use bounds::{
    compute_confidence_interval, compute_confidence_interval_roots,
    compute_confidence_probability, BoundParams, QuadraticRoots,
};
pub use error::{Result, StatsError};
pub use norm::{matrix_norm, MatrixNorm};
pub use smoothing::{smooth_series, SmoothedSeries};
pub use stats::{
    compute_covariance, compute_covariance_norm, compute_mean, compute_variance_norm,
};
pub use summary::{summarize, BatchSummary};
