use super::{FitReport, FitState, Optimizer, StopReason};
use crate::dataset::Dataset;
use crate::loss::Evaluator;
use crate::model::{LineParams, Param};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

// Seeds the relative improvement so the first iteration always runs.
const INITIAL_IMPROVEMENT: f64 = 0.1;
// Consecutive rounds without any improving trial before giving up.
const STAGNATION_ROUNDS: usize = 2;

/// Simultaneous search over slope and intercept.
///
/// Each iteration probes both parameters independently from the accepted
/// line. A probe that fails to improve has its step halved and reversed and
/// its trial value reset. If at least one probe improved, only the better of
/// the two is committed and the other probe's progress is dropped.
///
/// The run ends when the relative MSE drop of the last commit is at most
/// `epsilon`, or after two consecutive rounds where neither probe improved.
/// There is no iteration cap unless [`max_iterations`](Self::max_iterations)
/// is set; use [`optimize_until`](Self::optimize_until) to cancel from outside.
///
/// Defaults:
/// - `step`: 0.1 for both parameters
/// - `epsilon`: 1e-15
/// - `max_iterations`: none
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointSearch {
    step: f64,
    epsilon: f64,
    max_iterations: Option<usize>,
}

impl Default for JointSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Trial value and signed step of one parameter.
#[derive(Debug, Clone, Copy)]
struct Probe {
    param: Param,
    value: f64,
    step: f64,
}

impl Probe {
    fn new(param: Param, start: f64, step: f64) -> Self {
        Self {
            param,
            value: start,
            step,
        }
    }

    fn advance(&mut self) -> f64 {
        self.value += self.step;
        self.value
    }

    fn reject(&mut self, accepted: f64) {
        self.step = -self.step / 2.0;
        self.value = accepted;
        debug!("[joint] {} rejected, step now {:e}", self.param, self.step);
    }
}

impl JointSearch {
    pub fn new() -> Self {
        Self {
            step: 0.1,
            epsilon: 1e-15,
            max_iterations: None,
        }
    }

    /// Initial step for both parameters.
    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Convergence threshold on the relative MSE improvement.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Optional hard cap on iterations; `None` keeps the run unbounded.
    pub fn max_iterations(mut self, limit: Option<usize>) -> Self {
        self.max_iterations = limit;
        self
    }

    /// Runs the search, calling `control` with the accepted state before every
    /// iteration. Returning [`ControlFlow::Break`] ends the run with
    /// [`StopReason::Cancelled`].
    pub fn optimize_until<F>(&self, dataset: &Dataset, initial: LineParams, mut control: F) -> FitReport
    where
        F: FnMut(&FitState) -> ControlFlow<()>,
    {
        let eval = Evaluator::new(dataset);
        let mut state = FitState::start(&eval, initial);

        if state.mse == 0.0 {
            warn!("[joint] starting line already fits exactly, nothing to optimize");
            return state.finish(self.name(), &eval, StopReason::Converged);
        }

        let mut slope = Probe::new(Param::Slope, initial.slope, self.step);
        let mut intercept = Probe::new(Param::Intercept, initial.intercept, self.step);
        let mut improvement = INITIAL_IMPROVEMENT;

        let stop = loop {
            if improvement <= self.epsilon {
                break StopReason::Converged;
            }
            if self.max_iterations.is_some_and(|limit| state.iteration >= limit) {
                break StopReason::IterationLimit;
            }
            if control(&state).is_break() {
                break StopReason::Cancelled;
            }
            state.iteration += 1;

            let accepted = state.params;
            let (cand_a, mse_a) = self.probe(&eval, &mut slope, accepted, state.mse);
            let (cand_b, mse_b) = self.probe(&eval, &mut intercept, accepted, state.mse);
            let a_improved = mse_a < state.mse;
            let b_improved = mse_b < state.mse;

            let (params, mse) = match (a_improved, b_improved) {
                (false, false) => {
                    state.no_improvement_streak += 1;
                    if state.no_improvement_streak >= STAGNATION_ROUNDS {
                        break StopReason::Stagnated;
                    }
                    continue;
                }
                (true, true) if mse_a < mse_b => (cand_a, mse_a),
                (true, false) => (cand_a, mse_a),
                _ => (cand_b, mse_b),
            };

            let previous = state.accept(params, mse);
            // the losing probe restarts from the committed line
            slope.value = params.slope;
            intercept.value = params.intercept;
            improvement = (previous - mse) / previous;
            debug!(
                "[joint] iter {}: a={:.9} b={:.9} mse={:.12} impr={:e}",
                state.iteration, params.slope, params.intercept, mse, improvement
            );
        };

        info!(
            "[joint] a={:.9} b={:.9} mse={:.12} in {} iterations ({})",
            state.params.slope, state.params.intercept, state.mse, state.iteration, stop
        );
        state.finish(self.name(), &eval, stop)
    }

    /// Advances one probe from the accepted line; rejects it if it did not improve.
    fn probe(
        &self,
        eval: &Evaluator<'_>,
        probe: &mut Probe,
        accepted: LineParams,
        best: f64,
    ) -> (LineParams, f64) {
        let candidate = accepted.with(probe.param, probe.advance());
        let mse = eval.evaluate(&candidate);
        if mse >= best {
            probe.reject(accepted.get(probe.param));
        }
        (candidate, mse)
    }
}

impl Optimizer for JointSearch {
    fn name(&self) -> &'static str {
        "joint"
    }

    fn optimize(&self, dataset: &Dataset, initial: LineParams) -> FitReport {
        self.optimize_until(dataset, initial, |_| ControlFlow::Continue(()))
    }
}
