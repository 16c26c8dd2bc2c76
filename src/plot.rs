//! Scatter plot of the raw observations, rendered to SVG.

use crate::dataset::Dataset;
use crate::error::FitError;
use log::info;
use plotters::prelude::*;
use std::fs;
use std::path::Path;

/// Renders a dataset as a scatter plot.
///
/// Defaults:
/// - `title`: "Scatter plot"
/// - `size`: 500 × 500 px
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    title: String,
    size: (u32, u32),
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ScatterPlot {
    pub fn new() -> Self {
        Self {
            title: "Scatter plot".to_string(),
            size: (500, 500),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Draws every point of `dataset` and writes the SVG to `path`,
    /// creating missing parent directories.
    pub fn render(&self, dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), FitError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;

        let (x_lo, x_hi) = padded(Dataset::bounds(dataset.x()));
        let (y_lo, y_hi) = padded(Dataset::bounds(dataset.y()));

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
            .map_err(plot_error)?;

        chart
            .configure_mesh()
            .x_desc(dataset.labels().x.as_str())
            .y_desc(dataset.labels().y.as_str())
            .draw()
            .map_err(plot_error)?;

        chart
            .draw_series(
                dataset
                    .points()
                    .map(|(x, y)| Circle::new((x, y), 2, BLUE.filled())),
            )
            .map_err(plot_error)?;

        root.present().map_err(plot_error)?;
        info!("wrote scatter plot of {} points to {}", dataset.len(), path.display());
        Ok(())
    }
}

fn plot_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> FitError {
    FitError::Plot(err.to_string())
}

// 5% margin on each side; a degenerate range is widened to ±1.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - 0.05 * span, hi + 0.05 * span)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}
