//! Error types and path context for solver, builder and file operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all solver and builder operations
#[derive(Debug)]
pub enum MinesetterError {
    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Cell id lies outside the grid
    InvalidCell {
        /// The offending cell id
        cell: usize,
        /// Number of cells in the grid
        total_cells: usize,
        /// Role the cell was given
        role: &'static str,
    },

    /// Cell claimed by two roles at once
    OverlappingCell {
        /// The contested cell id
        cell: usize,
        /// Role assigned first
        first: &'static str,
        /// Role that tried to claim it again
        second: &'static str,
    },

    /// Requested minimums cannot fit the grid
    ///
    /// Detected before any enumeration is spent.
    InfeasibleConfiguration {
        /// Summed minimum element count over enabled categories
        required: usize,
        /// Largest grid area the settings allow
        capacity: usize,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// JSON encoding or decoding failure
    Serialization {
        /// File being read or written
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },

    /// Background solve failed unexpectedly
    Worker {
        /// Panic message or disconnect description
        reason: String,
    },

    /// Operation stopped by a cancellation token
    Cancelled,

}

impl fmt::Display for MinesetterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidCell {
                cell,
                total_cells,
                role,
            } => {
                write!(
                    f,
                    "Cell {cell} given as {role} is outside the grid ({total_cells} cells)"
                )
            }
            Self::OverlappingCell {
                cell,
                first,
                second,
            } => {
                write!(f, "Cell {cell} is already a {first} and cannot be a {second}")
            }
            Self::InfeasibleConfiguration { required, capacity } => {
                write!(
                    f,
                    "Config Error: Min Elements ({required}) > Grid Area ({capacity})"
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { path, source } => {
                write!(f, "Invalid JSON in '{}': {source}", path.display())
            }
            Self::Worker { reason } => write!(f, "Solver worker failed: {reason}"),
            Self::Cancelled => write!(f, "Operation cancelled"),
        }
    }
}

impl std::error::Error for MinesetterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, MinesetterError>;

impl From<std::io::Error> for MinesetterError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for MinesetterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Attaches the file path an I/O or JSON error occurred on
pub trait WithPath<T> {
    /// Add path and operation context to a failed file operation
    ///
    /// # Errors
    ///
    /// Propagates the underlying error with the path applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<MinesetterError>,
{
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|e| match e.into() {
            MinesetterError::FileSystem { source, .. } => MinesetterError::FileSystem {
                path: path.to_path_buf(),
                operation,
                source,
            },
            MinesetterError::Serialization { source, .. } => MinesetterError::Serialization {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MinesetterError {
    MinesetterError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
