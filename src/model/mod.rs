//! The straight-line model `y = a·x + b`.

pub mod linear;
pub use linear::{predict, LineParams};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects one coordinate of [`LineParams`] for single-parameter searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Param {
    /// `a`
    Slope,
    /// `b`
    Intercept,
}

impl Param {
    /// The coordinate that is held fixed while this one varies.
    pub fn other(self) -> Self {
        match self {
            Param::Slope => Param::Intercept,
            Param::Intercept => Param::Slope,
        }
    }

    /// Conventional one-letter name (`a` or `b`).
    pub fn symbol(self) -> &'static str {
        match self {
            Param::Slope => "a",
            Param::Intercept => "b",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
