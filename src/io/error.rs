//! Error types for solver setup and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
///
/// Dead cells, malformed attributes and out-of-range scans are normal
/// outcomes of a solve and never surface here.
#[derive(Debug)]
pub enum AlgorithmError {
    /// The solve was started without any module definitions
    EmptyModuleList,

    /// Solver parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A module name does not belong to the loaded module set
    UnknownModule {
        /// The name that was looked up
        name: String,
    },

    /// A module manifest could not be parsed
    ManifestParse {
        /// Path to the manifest file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// A placement report could not be written
    ReportExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to save a preview image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
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
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyModuleList => {
                write!(f, "Module list is empty, nothing to generate")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::UnknownModule { name } => {
                write!(f, "Module '{name}' is not part of the module set")
            }
            Self::ManifestParse { path, source } => {
                write!(
                    f,
                    "Failed to parse manifest '{}': {source}",
                    path.display()
                )
            }
            Self::ReportExport { path, source } => {
                write!(
                    f,
                    "Failed to write report '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
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
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ManifestParse { source, .. } | Self::ReportExport { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for AlgorithmError {
    fn from(err: serde_json::Error) -> Self {
        Self::ManifestParse {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
