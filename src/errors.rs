use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors raised while building an airfoil boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryError {
    /// Fewer than two chord samples were requested, so the abscissa spacing `1 / (N - 1)` is
    /// undefined.
    #[error("invalid sample count {requested}: at least 2 samples are required")]
    InvalidSampleCount { requested: usize },

    /// After removing coincident vertices the loop no longer encloses any area.
    #[error("not enough distinct points to form a closed loop ({remaining} remain)")]
    NotEnoughPoints { remaining: usize },
}

/// Errors raised while handing a boundary to the external mesher.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("mesher i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The mesher ran but exited unsuccessfully.
    #[error("mesher exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    /// The mesher reported success but the requested file does not exist.
    #[error("mesher produced no output at {}", .0.display())]
    MissingOutput(PathBuf),
}

/// Errors raised while reading the summary of a mesh file written by the mesher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MshParseError {
    #[error("missing {0} section")]
    MissingSection(&'static str),

    #[error("unexpected end of file in {0} section")]
    Truncated(&'static str),

    #[error("malformed {section} header: '{line}'")]
    Malformed { section: &'static str, line: String },

    /// Only ASCII mesh files can be summarized
    #[error("binary mesh files are not supported")]
    Binary,
}

/// Run parameters that are outside the range the generator and mesher accept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("invalid sample count {0}: at least 2 samples are required")]
    TooFewSamples(usize),

    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}
