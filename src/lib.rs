//! # linefit
//!
//! Fits a straight line `y = a·x + b` to a fixed set of observations by
//! minimizing mean squared error with coordinate-wise local search, a
//! gradient-free hill-climbing method.
//!
//! ## Core Design Principles
//!
//! - **Immutable data**: a [`Dataset`] is validated once at load time
//!   (two labels, aligned non-empty columns) and only read afterwards.
//! - **Explicit run state**: each optimizer threads a small [`FitState`]
//!   through its loop and turns it into a [`FitReport`]; nothing is global.
//! - **Swappable strategies**: every search variant implements
//!   [`Optimizer`], so callers can run them side by side or box them.
//!
//! ## Quick Start
//!
//! ```rust
//! use linefit::dataset::{AxisLabels, Dataset};
//! use linefit::model::LineParams;
//! use linefit::optimizer::{JointSearch, Optimizer};
//!
//! let ds = Dataset::from_points(
//!     AxisLabels::new("x", "y"),
//!     &[(1.0, 11.0), (2.0, 19.0), (3.0, 31.0)],
//! ).unwrap();
//!
//! let report = JointSearch::new().optimize(&ds, LineParams::new(10.0, 0.0));
//! println!(
//!     "a = {}; b = {}; MSE = {} in {} iterations",
//!     report.params.slope, report.params.intercept, report.mse, report.iterations
//! );
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: [`Dataset`] and the CSV [`DataSource`](dataset::DataSource)
//! - `model`: line parameters and `predict`
//! - `loss`: `mse` and the dataset-bound [`Evaluator`](loss::Evaluator)
//! - `optimizer`: fixed-step, sign-adaptive and joint searches
//! - `plot`: SVG scatter plot of the input data
//! - `error`: [`ParseError`], [`DomainError`] and the umbrella [`FitError`]

/// Error taxonomy for loading and evaluation.
pub mod error;

/// Observations and the CSV loader.
pub mod dataset;

/// Mean squared error and candidate evaluation.
pub mod loss;

/// The line model.
pub mod model;

/// Local-search strategies.
pub mod optimizer;

/// Scatter plot rendering.
pub mod plot;

pub use dataset::Dataset;
pub use error::{DomainError, FitError, ParseError};
pub use model::{LineParams, Param};
pub use optimizer::{FitReport, FitState, Optimizer, StopReason};
