use std::fmt;
use std::io;

use plotters::drawing::DrawingAreaErrorKind;

/// Errors returned by figure rendering.
#[derive(Debug)]
pub enum PlotError {
    /// Input arrays do not have the dimensions the chart needs.
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Output directory or image file could not be written.
    Io(io::Error),
    /// The drawing backend failed (fonts, encoding, degenerate canvas).
    Render(String),
    /// Malformed numeric input (CSV rows fed to the CLI).
    Parse { line: usize, message: String },
}

impl PlotError {
    pub fn shape(what: &'static str, expected: usize, actual: usize) -> Self {
        PlotError::ShapeMismatch {
            what,
            expected,
            actual,
        }
    }

    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, PlotError::ShapeMismatch { .. })
    }
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(f, "shape mismatch: {what} expected {expected}, got {actual}"),
            PlotError::Io(err) => write!(f, "i/o error: {err}"),
            PlotError::Render(msg) => write!(f, "render failed: {msg}"),
            PlotError::Parse { line, message } => write!(f, "parse error (line {line}): {message}"),
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlotError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PlotError {
    fn from(err: io::Error) -> Self {
        PlotError::Io(err)
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Render(err.to_string())
    }
}

impl From<png::EncodingError> for PlotError {
    fn from(err: png::EncodingError) -> Self {
        match err {
            png::EncodingError::IoError(err) => PlotError::Io(err),
            other => PlotError::Render(other.to_string()),
        }
    }
}
