use anyhow::{Context, Result};
use clap::Parser;
use linefit::dataset::{CsvSource, DataSource};
use linefit::loss::Evaluator;
use linefit::optimizer::{FixedStepSearch, JointSearch, SignAdaptiveSearch};
use linefit::plot::ScatterPlot;
use linefit::{FitReport, LineParams, Optimizer, Param, StopReason};
use serde_json::json;
use std::path::PathBuf;

/// Fit y = a*x + b to CSV data by gradient-free local search
#[derive(Debug, Parser)]
#[command(name = "linefit", version)]
struct Args {
    /// CSV file: a label line followed by `x,y` rows
    #[arg(short, long, default_value = "data/datapoints.csv")]
    data: PathBuf,

    /// Output path of the scatter plot (SVG)
    #[arg(short, long, default_value = "plots/fig_task2.svg")]
    plot: PathBuf,

    /// Skip rendering the scatter plot
    #[arg(long)]
    no_plot: bool,

    /// Initial slope a
    #[arg(short = 'a', long, default_value_t = 10.0, allow_negative_numbers = true)]
    slope: f64,

    /// Initial intercept b
    #[arg(short = 'b', long, default_value_t = 0.0, allow_negative_numbers = true)]
    intercept: f64,

    /// Step size for every search
    #[arg(long, default_value_t = 0.1)]
    step: f64,

    /// Trial budget K of the single-parameter searches
    #[arg(short = 'k', long, default_value_t = 100)]
    budget: usize,

    /// Convergence threshold of the joint search
    #[arg(long, default_value_t = 1e-15)]
    epsilon: f64,

    /// Safety cap on joint search iterations
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Print one JSON object per task instead of status lines
    #[arg(long)]
    json: bool,
}

struct Reporter {
    json: bool,
}

impl Reporter {
    fn mse(&self, task: &str, mse: f64) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(&json!({ "task": task, "mse": mse }))?);
        } else {
            println!("Task {}: MSE = {}", task, mse);
        }
        Ok(())
    }

    fn single(&self, task: &str, param: Param, report: &FitReport) -> Result<()> {
        if self.json {
            return self.emit(task, report);
        }
        println!(
            "Task {}: {} = {}; MSE = {}",
            task,
            param,
            report.params.get(param),
            report.mse
        );
        Ok(())
    }

    fn joint(&self, task: &str, report: &FitReport) -> Result<()> {
        if self.json {
            return self.emit(task, report);
        }
        if report.stop == StopReason::Stagnated {
            println!("Iteration finished after {}.", report.stop);
        }
        println!(
            "Task {}: a = {}; b = {}; MSE = {} in {} iterations.",
            task, report.params.slope, report.params.intercept, report.mse, report.iterations
        );
        Ok(())
    }

    fn emit(&self, task: &str, report: &FitReport) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string(&json!({ "task": task, "report": report }))?
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Task 1: read the x/y data points
    let dataset = CsvSource::new(&args.data)
        .load()
        .with_context(|| format!("failed to load {}", args.data.display()))?;

    // Task 2: plot the data
    if !args.no_plot {
        ScatterPlot::new()
            .title("Task 2: Input data")
            .render(&dataset, &args.plot)
            .with_context(|| format!("failed to write {}", args.plot.display()))?;
    }

    let reporter = Reporter { json: args.json };
    let start = LineParams::new(args.slope, args.intercept);

    // Tasks 3-4: evaluate the starting line
    reporter.mse("4", Evaluator::new(&dataset).evaluate(&start))?;

    // Tasks 5-6: fixed +step scans, b continues from the improved a
    let task5 = FixedStepSearch::new(Param::Slope)
        .step(args.step)
        .budget(args.budget)
        .optimize(&dataset, start);
    reporter.single("5", Param::Slope, &task5)?;

    let task6 = FixedStepSearch::new(Param::Intercept)
        .step(args.step)
        .budget(args.budget)
        .optimize(&dataset, task5.params);
    reporter.single("6", Param::Intercept, &task6)?;

    // Task 7.1: direction chosen on the first trial, early stop
    let task71a = SignAdaptiveSearch::new(Param::Slope)
        .step(args.step)
        .budget(args.budget)
        .optimize(&dataset, start);
    reporter.single("7.1a", Param::Slope, &task71a)?;

    let task71b = SignAdaptiveSearch::new(Param::Intercept)
        .step(args.step)
        .budget(args.budget)
        .optimize(&dataset, task71a.params);
    reporter.single("7.1b", Param::Intercept, &task71b)?;

    // Task 7.2: both parameters at once
    let task72 = JointSearch::new()
        .step(args.step)
        .epsilon(args.epsilon)
        .max_iterations(args.max_iterations)
        .optimize(&dataset, start);
    reporter.joint("7.2", &task72)?;

    Ok(())
}
