//! Parameters and predictions of the line `y = a·x + b`.
//!
//! [`LineParams`] is plain data: optimizers own their copy and replace it when
//! a trial step is accepted. Evaluation never mutates it.

use super::Param;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Slope `a` and intercept `b` of a line.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineParams {
    pub slope: f64,
    pub intercept: f64,
}

impl LineParams {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Reads one coordinate.
    pub fn get(&self, param: Param) -> f64 {
        match param {
            Param::Slope => self.slope,
            Param::Intercept => self.intercept,
        }
    }

    /// Returns a copy with one coordinate replaced.
    pub fn with(self, param: Param, value: f64) -> Self {
        match param {
            Param::Slope => Self {
                slope: value,
                ..self
            },
            Param::Intercept => Self {
                intercept: value,
                ..self
            },
        }
    }

    /// `a·x + b` for a single input.
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// `a·x + b` for every input, same order and length.
    pub fn predict(&self, x: ArrayView1<'_, f64>) -> Array1<f64> {
        x.mapv(|v| self.eval(v))
    }
}

/// Computes `a·x + b` for every element of `x`.
///
/// ```rust
/// use linefit::model::predict;
/// use ndarray::array;
///
/// let y = predict(array![1.0, 2.0, 3.0].view(), 10.0, 0.5);
/// assert_eq!(y.to_vec(), vec![10.5, 20.5, 30.5]);
/// ```
pub fn predict(x: ArrayView1<'_, f64>, a: f64, b: f64) -> Array1<f64> {
    LineParams::new(a, b).predict(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_predict_length_and_order() {
        let x = array![3.0, -1.0, 0.0, 2.5];
        let y = predict(x.view(), 2.0, 1.0);
        assert_eq!(y.len(), x.len());
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert_relative_eq!(*yi, 2.0 * xi + 1.0);
        }
    }

    #[test]
    fn test_predict_empty_input() {
        let x: Array1<f64> = Array1::zeros(0);
        assert!(predict(x.view(), 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_get_and_with() {
        let p = LineParams::new(10.0, 0.0);
        assert_eq!(p.get(Param::Slope), 10.0);
        assert_eq!(p.get(Param::Intercept), 0.0);

        let q = p.with(Param::Intercept, -0.3);
        assert_eq!(q, LineParams::new(10.0, -0.3));
        // `p` itself is unchanged
        assert_eq!(p.intercept, 0.0);
        assert_eq!(q.with(Param::Slope, 1.0), LineParams::new(1.0, -0.3));
    }

    #[test]
    fn test_params_serialize_field_names() {
        let json = serde_json::to_string(&LineParams::new(1.5, -2.0)).unwrap();
        assert_eq!(json, r#"{"slope":1.5,"intercept":-2.0}"#);
    }
}
