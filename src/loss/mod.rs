//! Mean squared error and the dataset-bound evaluator used by every optimizer.

use crate::dataset::Dataset;
use crate::error::DomainError;
use crate::model::LineParams;
use log::trace;
use ndarray::ArrayView1;
use std::cell::Cell;

/// Mean Squared Error: `L = (1/n) * Σ(pred_i - target_i)^2`
///
/// # Errors
///
/// - [`DomainError::LengthMismatch`] if the sequences differ in length
/// - [`DomainError::EmptySequence`] if they are empty
///
/// ```rust
/// use linefit::loss::mse;
/// use ndarray::array;
///
/// let loss = mse(array![3.0, 5.0].view(), array![1.0, 2.0].view()).unwrap();
/// assert_eq!(loss, 6.5);
/// ```
pub fn mse(predicted: ArrayView1<'_, f64>, truth: ArrayView1<'_, f64>) -> Result<f64, DomainError> {
    if predicted.len() != truth.len() {
        return Err(DomainError::LengthMismatch {
            predicted: predicted.len(),
            truth: truth.len(),
        });
    }
    if truth.is_empty() {
        return Err(DomainError::EmptySequence);
    }
    Ok(mean_squared_residual(predicted, truth))
}

// Callers guarantee equal, non-zero lengths.
fn mean_squared_residual(predicted: ArrayView1<'_, f64>, truth: ArrayView1<'_, f64>) -> f64 {
    let sum: f64 = predicted
        .iter()
        .zip(truth.iter())
        .map(|(p, t)| (p - t) * (p - t))
        .sum();
    sum / truth.len() as f64
}

/// Scores candidate lines against a fixed dataset.
///
/// Because a [`Dataset`] always holds at least one point with aligned columns,
/// [`Evaluator::evaluate`] is total. The evaluator also counts how many times
/// it was queried, which lets callers check an optimizer's trial budget.
pub struct Evaluator<'a> {
    dataset: &'a Dataset,
    calls: Cell<usize>,
}

impl<'a> Evaluator<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            calls: Cell::new(0),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// MSE of the line `params` over the dataset.
    pub fn evaluate(&self, params: &LineParams) -> f64 {
        self.calls.set(self.calls.get() + 1);
        let predicted = params.predict(self.dataset.x());
        let loss = mean_squared_residual(predicted.view(), self.dataset.y());
        trace!(
            "eval a={:.6} b={:.6} -> mse={:.9}",
            params.slope,
            params.intercept,
            loss
        );
        loss
    }

    /// Number of [`evaluate`](Self::evaluate) calls so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}
