use super::{FitReport, FitState, Optimizer, StopReason};
use crate::dataset::Dataset;
use crate::loss::Evaluator;
use crate::model::{LineParams, Param};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// One-parameter search that picks its direction on the first trial.
///
/// Iteration 0 probes `start + Δ`. If that does not improve the MSE the step
/// is negated and the trial value reset to `start`; otherwise the trial keeps
/// its advanced value without being committed. Every later iteration applies
/// the signed step: an improving trial is accepted, the first non-improving
/// one ends the run.
///
/// Defaults:
/// - `step`: 0.1
/// - `budget`: 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignAdaptiveSearch {
    target: Param,
    step: f64,
    budget: usize,
}

impl SignAdaptiveSearch {
    pub fn new(target: Param) -> Self {
        Self {
            target,
            step: 0.1,
            budget: 100,
        }
    }

    /// Sets the step magnitude `|Δ|`; the sign is discovered at run time.
    pub fn step(mut self, step: f64) -> Self {
        self.step = step.abs();
        self
    }

    /// Sets the maximum number of trials `K`.
    pub fn budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    pub fn target(&self) -> Param {
        self.target
    }
}

impl Optimizer for SignAdaptiveSearch {
    fn name(&self) -> &'static str {
        "sign_adaptive"
    }

    fn optimize(&self, dataset: &Dataset, initial: LineParams) -> FitReport {
        let eval = Evaluator::new(dataset);
        let mut state = FitState::start(&eval, initial);
        let start = initial.get(self.target);
        let mut trial = start;
        let mut step = self.step;
        let mut stop = StopReason::BudgetExhausted;

        for i in 0..self.budget {
            state.iteration += 1;
            trial += step;
            let candidate = state.params.with(self.target, trial);
            let mse = eval.evaluate(&candidate);
            let improved = mse < state.mse;

            if i == 0 {
                if !improved {
                    step = -step;
                    trial = start;
                    debug!(
                        "[{}] {}: first trial failed, searching with step {}",
                        self.name(),
                        self.target,
                        step
                    );
                }
            } else if improved {
                state.accept(candidate, mse);
                debug!(
                    "[{}] iter {}: accepted {}={:.6}, mse={:.9}",
                    self.name(),
                    state.iteration,
                    self.target,
                    trial,
                    mse
                );
            } else {
                stop = StopReason::NoImprovement;
                break;
            }
        }

        info!(
            "[{}] {}={:.6} mse={:.9}, stopped at iteration {} ({})",
            self.name(),
            self.target,
            state.params.get(self.target),
            state.mse,
            state.iteration,
            stop
        );
        state.finish(self.name(), &eval, stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{AxisLabels, Dataset};
    use crate::optimizer::tests::{assert_non_increasing, exact, noisy};
    use approx::assert_relative_eq;

    #[test]
    fn test_step_sign_is_ignored() {
        let search = SignAdaptiveSearch::new(Param::Slope).step(-0.25).budget(10);
        assert_eq!(search.step, 0.25);
        assert_eq!(search.budget, 10);
    }

    #[test]
    fn test_reverses_direction_when_first_trial_fails() {
        // y = 10x, start above the optimum: +Δ fails, -Δ walks back down
        let report =
            SignAdaptiveSearch::new(Param::Slope).optimize(&exact(), LineParams::new(10.5, 0.0));
        assert!(report.params.slope < 10.5);
        assert_relative_eq!(report.params.slope, 10.0, epsilon = 1e-9);
        assert_eq!(report.stop, StopReason::NoImprovement);
        assert_non_increasing(&report.mse_history);
    }

    #[test]
    fn test_stops_at_first_failure_after_first_trial() {
        // start 10.5 -> flip, 10.4 10.3 10.2 10.1 10.0 accepted, 9.9 fails
        let report =
            SignAdaptiveSearch::new(Param::Slope).optimize(&exact(), LineParams::new(10.5, 0.0));
        assert_eq!(report.iterations, 7);
        assert_eq!(report.evaluations, 7);
        assert_eq!(report.mse_history.len(), 6);
    }

    #[test]
    fn test_exact_start_never_moves() {
        let report =
            SignAdaptiveSearch::new(Param::Slope).optimize(&exact(), LineParams::new(10.0, 0.0));
        assert_eq!(report.params, LineParams::new(10.0, 0.0));
        assert_eq!(report.mse, 0.0);
        // first trial flips, second (a = 9.9) fails
        assert_eq!(report.iterations, 2);
        assert_eq!(report.stop, StopReason::NoImprovement);
    }

    #[test]
    fn test_improving_first_trial_is_not_committed() {
        // y = x + 1 with a fixed at 1: the walk continues from the uncommitted
        // first probe instead of from the start
        let ds = Dataset::from_points(AxisLabels::new("x", "y"), &[(0.0, 1.0), (1.0, 2.0)]).unwrap();
        let report = SignAdaptiveSearch::new(Param::Intercept)
            .step(0.25)
            .optimize(&ds, LineParams::new(1.0, 0.0));
        // trials 0.25 (uncommitted), 0.5, 0.75, 1.0 accepted, 1.25 fails
        assert_eq!(report.params.intercept, 1.0);
        assert_eq!(report.mse_history.len(), 4);
        assert_eq!(report.iterations, 5);
    }

    #[test]
    fn test_budget_exhausted_when_always_improving() {
        let report = SignAdaptiveSearch::new(Param::Slope)
            .budget(5)
            .optimize(&exact(), LineParams::new(0.0, 0.0));
        assert_eq!(report.stop, StopReason::BudgetExhausted);
        assert_eq!(report.iterations, 5);
        // four commits: iteration 0 only probes
        assert_relative_eq!(report.params.slope, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_intercept_on_noisy_data() {
        let report =
            SignAdaptiveSearch::new(Param::Intercept).optimize(&noisy(), LineParams::new(10.0, 0.0));
        assert!(report.mse < 1.0);
        assert_non_increasing(&report.mse_history);
    }
}
