// demos/fit_line.rs: compare the search strategies on a small noisy line
use linefit::{
    dataset::{AxisLabels, Dataset},
    optimizer::{FixedStepSearch, JointSearch, SignAdaptiveSearch},
    LineParams, Optimizer, Param,
};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

fn main() {
    env_logger::init();

    let points = [
        (0.5, 6.9),
        (1.0, 12.4),
        (1.5, 16.1),
        (2.0, 22.3),
        (2.5, 26.0),
        (3.0, 31.8),
    ];
    let dataset = Dataset::from_points(AxisLabels::new("x", "y"), &points).unwrap();
    let start = LineParams::new(10.0, 0.0);

    let optimizers: Vec<Box<dyn Optimizer>> = vec![
        Box::new(FixedStepSearch::new(Param::Slope)),
        Box::new(FixedStepSearch::new(Param::Intercept)),
        Box::new(SignAdaptiveSearch::new(Param::Slope)),
        Box::new(SignAdaptiveSearch::new(Param::Intercept)),
        Box::new(JointSearch::new()),
    ];
    for opt in &optimizers {
        let report = opt.optimize(&dataset, start);
        println!(
            "{:>14}: a = {:.4}; b = {:.4}; MSE = {:.6} ({} iterations, {})",
            opt.name(),
            report.params.slope,
            report.params.intercept,
            report.mse,
            report.iterations,
            report.stop
        );
    }

    // The joint search has no iteration cap: guard it with a deadline.
    let deadline = Instant::now() + Duration::from_millis(50);
    let report = JointSearch::new()
        .step(1.0)
        .optimize_until(&dataset, start, |_| {
            if Instant::now() > deadline {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
    println!(
        "joint (deadline): a = {:.4}; b = {:.4}; MSE = {:.6} ({})",
        report.params.slope, report.params.intercept, report.mse, report.stop
    );
}
