use super::{FitReport, FitState, Optimizer, StopReason};
use crate::dataset::Dataset;
use crate::loss::Evaluator;
use crate::model::{LineParams, Param};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Naive scan of one parameter in the `+Δ` direction.
///
/// Every iteration advances the trial value by `step` and evaluates it; the
/// trial is accepted only if its MSE is strictly lower than the best so far.
/// The trial keeps advancing after a rejection, so the run always visits
/// `budget` points `start + Δ, start + 2Δ, …` and never exits early.
///
/// The search cannot move the parameter downwards: when the optimum lies
/// below the starting value the parameter stays where it started.
///
/// Defaults:
/// - `step`: 0.1
/// - `budget`: 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedStepSearch {
    target: Param,
    step: f64,
    budget: usize,
}

impl FixedStepSearch {
    pub fn new(target: Param) -> Self {
        Self {
            target,
            step: 0.1,
            budget: 100,
        }
    }

    /// Sets the increment `Δ`; only its magnitude is used.
    pub fn step(mut self, step: f64) -> Self {
        self.step = step.abs();
        self
    }

    /// Sets the number of trials `K`.
    pub fn budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    pub fn target(&self) -> Param {
        self.target
    }
}

impl Optimizer for FixedStepSearch {
    fn name(&self) -> &'static str {
        "fixed_step"
    }

    fn optimize(&self, dataset: &Dataset, initial: LineParams) -> FitReport {
        let eval = Evaluator::new(dataset);
        let mut state = FitState::start(&eval, initial);
        let mut trial = initial.get(self.target);

        for _ in 0..self.budget {
            state.iteration += 1;
            trial += self.step;
            let candidate = state.params.with(self.target, trial);
            let mse = eval.evaluate(&candidate);
            if mse < state.mse {
                state.accept(candidate, mse);
                debug!(
                    "[{}] iter {}: accepted {}={:.6}, mse={:.9}",
                    self.name(),
                    state.iteration,
                    self.target,
                    trial,
                    mse
                );
            }
        }

        info!(
            "[{}] {}={:.6} mse={:.9} after {} iterations",
            self.name(),
            self.target,
            state.params.get(self.target),
            state.mse,
            state.iteration
        );
        state.finish(self.name(), &eval, StopReason::BudgetExhausted)
    }
}
