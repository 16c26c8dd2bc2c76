//! Gradient-free local search for the line parameters.
//!
//! All variants implement [`Optimizer`]: given a dataset and a starting line
//! they repeatedly probe trial steps through an [`Evaluator`] and report the
//! final line, its MSE and how many iterations were spent.
//!
//! - [`FixedStepSearch`]: one parameter, fixed `+Δ`, always runs its full budget.
//! - [`SignAdaptiveSearch`]: one parameter, direction picked on the first
//!   trial, stops at the first non-improving step.
//! - [`JointSearch`]: both parameters, shrinking and reversing steps, stops on
//!   convergence or stagnation.
//!
//! The variants are deliberately distinct algorithms; none of them is a
//! configuration of another.
//!
//! # Example
//! ```rust
//! use linefit::dataset::{AxisLabels, Dataset};
//! use linefit::model::{LineParams, Param};
//! use linefit::optimizer::{FixedStepSearch, JointSearch, Optimizer};
//!
//! let ds = Dataset::from_points(
//!     AxisLabels::new("x", "y"),
//!     &[(1.0, 11.0), (2.0, 19.0), (3.0, 31.0)],
//! ).unwrap();
//! let start = LineParams::new(10.0, 0.0);
//!
//! let optimizers: Vec<Box<dyn Optimizer>> = vec![
//!     Box::new(FixedStepSearch::new(Param::Intercept)),
//!     Box::new(JointSearch::new()),
//! ];
//! for opt in &optimizers {
//!     let report = opt.optimize(&ds, start);
//!     assert!(report.mse <= 1.0);
//! }
//! ```

use crate::dataset::Dataset;
use crate::loss::Evaluator;
use crate::model::LineParams;
use serde::Serialize;
use std::fmt;

pub mod fixed_step;
pub mod joint;
pub mod sign_adaptive;

pub use fixed_step::FixedStepSearch;
pub use joint::JointSearch;
pub use sign_adaptive::SignAdaptiveSearch;

/// Common interface of the search strategies.
///
/// Runs are pure computations over an immutable dataset; they never fail
/// because a [`Dataset`] is non-empty by construction.
pub trait Optimizer {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Searches for a better line starting from `initial`.
    fn optimize(&self, dataset: &Dataset, initial: LineParams) -> FitReport;
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The fixed trial budget was used up.
    BudgetExhausted,
    /// A trial after the first failed to improve.
    NoImprovement,
    /// Relative improvement fell to `epsilon` or below.
    Converged,
    /// Two consecutive rounds in which no trial improved.
    Stagnated,
    /// The optional iteration cap was reached.
    IterationLimit,
    /// The caller's control hook asked to stop.
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StopReason::BudgetExhausted => "budget exhausted",
            StopReason::NoImprovement => "no improvement",
            StopReason::Converged => "converged",
            StopReason::Stagnated => "no update twice in a row",
            StopReason::IterationLimit => "iteration limit",
            StopReason::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}

/// Accepted state of a run in progress.
///
/// Created at the start of a run and consumed into a [`FitReport`] at the end.
/// Trial values and step sizes are owned by each strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct FitState {
    /// Last accepted line.
    pub params: LineParams,
    /// MSE of `params`.
    pub mse: f64,
    /// Iterations started so far.
    pub iteration: usize,
    /// Consecutive rounds without an accepted step.
    pub no_improvement_streak: usize,
    history: Vec<f64>,
}

impl FitState {
    pub(crate) fn start(eval: &Evaluator<'_>, params: LineParams) -> Self {
        let mse = eval.evaluate(&params);
        Self {
            params,
            mse,
            iteration: 0,
            no_improvement_streak: 0,
            history: vec![mse],
        }
    }

    /// Commits a trial and returns the MSE it replaced.
    pub(crate) fn accept(&mut self, params: LineParams, mse: f64) -> f64 {
        let previous = self.mse;
        self.params = params;
        self.mse = mse;
        self.no_improvement_streak = 0;
        self.history.push(mse);
        previous
    }

    pub(crate) fn finish(
        self,
        optimizer: &'static str,
        eval: &Evaluator<'_>,
        stop: StopReason,
    ) -> FitReport {
        FitReport {
            optimizer,
            params: self.params,
            mse: self.mse,
            iterations: self.iteration,
            // the starting point is not a trial
            evaluations: eval.calls().saturating_sub(1),
            stop,
            mse_history: self.history,
        }
    }
}

/// Outcome of one optimizer run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub optimizer: &'static str,
    pub params: LineParams,
    pub mse: f64,
    pub iterations: usize,
    /// Trial evaluations, excluding the evaluation of the starting line.
    pub evaluations: usize,
    pub stop: StopReason,
    /// Accepted MSE after each commit, starting with the initial MSE.
    pub mse_history: Vec<f64>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dataset::AxisLabels;

    pub(crate) fn exact() -> Dataset {
        Dataset::from_points(
            AxisLabels::new("x", "y"),
            &[(1.0, 10.0), (2.0, 20.0), (3.0, 30.0)],
        )
        .unwrap()
    }

    pub(crate) fn noisy() -> Dataset {
        Dataset::from_points(
            AxisLabels::new("x", "y"),
            &[(1.0, 11.0), (2.0, 19.0), (3.0, 31.0)],
        )
        .unwrap()
    }

    pub(crate) fn assert_non_increasing(history: &[f64]) {
        for pair in history.windows(2) {
            assert!(pair[1] <= pair[0], "MSE increased: {:?}", history);
        }
    }

    #[test]
    fn test_state_accept_records_history() {
        let ds = noisy();
        let eval = Evaluator::new(&ds);
        let mut state = FitState::start(&eval, LineParams::new(10.0, 0.0));
        assert_eq!(state.mse, 1.0);

        state.no_improvement_streak = 1;
        let previous = state.accept(LineParams::new(10.1, 0.0), 0.9);
        assert_eq!(previous, 1.0);
        assert_eq!(state.no_improvement_streak, 0);

        let report = state.finish("test", &eval, StopReason::Converged);
        assert_eq!(report.mse_history, vec![1.0, 0.9]);
        assert_eq!(report.evaluations, 0);
        assert_eq!(report.params, LineParams::new(10.1, 0.0));
    }

    #[test]
    fn test_report_serializes_stop_reason() {
        let ds = exact();
        let eval = Evaluator::new(&ds);
        let report = FitState::start(&eval, LineParams::new(10.0, 0.0)).finish(
            "joint",
            &eval,
            StopReason::Stagnated,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stop"], "stagnated");
        assert_eq!(json["optimizer"], "joint");
        assert_eq!(json["params"]["slope"], 10.0);
    }

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(StopReason::Stagnated.to_string(), "no update twice in a row");
        assert_eq!(StopReason::Converged.to_string(), "converged");
    }
}
