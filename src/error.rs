//! Error types for loading data and evaluating line fits.

use std::fmt;

/// Failure to turn a text source into a [`Dataset`](crate::dataset::Dataset).
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The source has no label record.
    Empty,
    /// The label record does not contain exactly two fields.
    BadLabels { found: usize },
    /// Labels were present but no data records followed.
    NoData,
    /// A data record does not split into exactly two fields.
    FieldCount { line: u64, found: usize },
    /// A data field is not a floating-point number.
    BadNumber { line: u64, value: String },
    /// The source could not be decoded at all (e.g. invalid UTF-8).
    Malformed(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty input: missing label record"),
            ParseError::BadLabels { found } => {
                write!(f, "label record must have 2 fields, got {}", found)
            }
            ParseError::NoData => write!(f, "no data records after labels"),
            ParseError::FieldCount { line, found } => {
                write!(f, "line {}: expected 2 fields, got {}", line, found)
            }
            ParseError::BadNumber { line, value } => {
                write!(f, "line {}: '{}' is not a number", line, value)
            }
            ParseError::Malformed(msg) => write!(f, "malformed input: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// Loss requested on sequences it is not defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// Zero-length input; the mean would divide by zero.
    EmptySequence,
    /// Predicted and true sequences differ in length.
    LengthMismatch { predicted: usize, truth: usize },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::EmptySequence => write!(f, "MSE of an empty sequence is undefined"),
            DomainError::LengthMismatch { predicted, truth } => write!(
                f,
                "length mismatch: {} predictions vs {} targets",
                predicted, truth
            ),
        }
    }
}

impl std::error::Error for DomainError {}

/// Top-level error for the crate.
#[derive(Debug)]
pub enum FitError {
    Parse(ParseError),
    Domain(DomainError),
    /// I/O error while reading data or writing a plot.
    Io(String),
    /// The plotting backend failed to render.
    Plot(String),
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::Parse(e) => write!(f, "Parse error: {}", e),
            FitError::Domain(e) => write!(f, "Domain error: {}", e),
            FitError::Io(msg) => write!(f, "I/O error: {}", msg),
            FitError::Plot(msg) => write!(f, "Plot error: {}", msg),
        }
    }
}

impl std::error::Error for FitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FitError::Parse(e) => Some(e),
            FitError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for FitError {
    fn from(err: ParseError) -> Self {
        FitError::Parse(err)
    }
}

impl From<DomainError> for FitError {
    fn from(err: DomainError) -> Self {
        FitError::Domain(err)
    }
}

impl From<std::io::Error> for FitError {
    fn from(err: std::io::Error) -> Self {
        FitError::Io(err.to_string())
    }
}

impl From<csv::Error> for FitError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            FitError::Io(err.to_string())
        } else {
            FitError::Parse(ParseError::Malformed(err.to_string()))
        }
    }
}
