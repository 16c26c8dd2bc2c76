//! Labeled `(x, y)` observations for line fitting.
//!
//! A [`Dataset`] holds two axis labels and two index-aligned numeric columns of
//! equal, non-zero length. It is immutable once built: optimizers only ever
//! read from it.
//!
//! Datasets are produced by a [`DataSource`]. The crate ships [`CsvSource`],
//! which reads the line-oriented `label,label` / `x,y` format:
//!
//! ```rust
//! use linefit::dataset::read_csv;
//!
//! let text = "x,y\n1,10\n2,20\n3,30\n";
//! let dataset = read_csv(text.as_bytes()).unwrap();
//! assert_eq!(dataset.len(), 3);
//! assert_eq!(dataset.labels().x, "x");
//! ```

use crate::error::{DomainError, FitError};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

pub mod csv;
pub use self::csv::{read_csv, CsvSource};

/// Anything that can produce a [`Dataset`].
pub trait DataSource {
    /// Loads the observations, failing without substituting defaults.
    fn load(&self) -> Result<Dataset, FitError>;
}

/// Column labels taken from the first record of the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

impl AxisLabels {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// An immutable set of `(x, y)` observations with `len() >= 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    labels: AxisLabels,
    x: Array1<f64>,
    y: Array1<f64>,
}

impl Dataset {
    /// Builds a dataset from two columns.
    ///
    /// # Errors
    ///
    /// - [`DomainError::LengthMismatch`] if the columns differ in length
    /// - [`DomainError::EmptySequence`] if the columns are empty
    pub fn new(labels: AxisLabels, x: Vec<f64>, y: Vec<f64>) -> Result<Self, FitError> {
        if x.len() != y.len() {
            return Err(DomainError::LengthMismatch {
                predicted: x.len(),
                truth: y.len(),
            }
            .into());
        }
        if x.is_empty() {
            return Err(DomainError::EmptySequence.into());
        }
        Ok(Self {
            labels,
            x: Array1::from(x),
            y: Array1::from(y),
        })
    }

    /// Builds a dataset from `(x, y)` pairs.
    pub fn from_points(labels: AxisLabels, points: &[(f64, f64)]) -> Result<Self, FitError> {
        let (x, y) = points.iter().copied().unzip();
        Self::new(labels, x, y)
    }

    pub fn labels(&self) -> &AxisLabels {
        &self.labels
    }

    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// Number of observations (always at least 1).
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterates over the observations in source order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Smallest and largest value of a column, used for plot ranges.
    pub(crate) fn bounds(column: ArrayView1<'_, f64>) -> (f64, f64) {
        column
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
