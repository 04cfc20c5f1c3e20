//! Error types and path context for mosaic operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder used until a call site attaches the real path
const UNKNOWN_PATH: &str = "<unknown>";

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to save the mosaic to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
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

    /// Every file in the tile directory was unreadable or not an image
    NoUsableTiles {
        /// Directory that was scanned
        directory: PathBuf,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Source image can't be turned into a mosaic
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Work or result queue failed while composing
    Pipeline {
        /// Pipeline role that observed the failure
        stage: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Run was interrupted before any matching started
    Interrupted,

    /// Terminal logger could not be installed
    Logging {
        /// Underlying logger error
        source: log::SetLoggerError,
    },

    /// Ctrl-C handler could not be installed
    InterruptHandler {
        /// Underlying signal handler error
        source: ctrlc::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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
            Self::NoUsableTiles { directory } => {
                write!(
                    f,
                    "No usable tiles found in directory '{}'",
                    directory.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::Pipeline { stage, reason } => {
                write!(f, "Pipeline failure in {stage}: {reason}")
            }
            Self::Interrupted => write!(f, "Interrupted before matching started"),
            Self::Logging { source } => write!(f, "Failed to initialise logging: {source}"),
            Self::InterruptHandler { source } => {
                write!(f, "Failed to install interrupt handler: {source}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Logging { source } => Some(source),
            Self::InterruptHandler { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Attaches the offending path to errors converted without one
pub trait WithPath<T> {
    /// Replace a placeholder path on image and file system errors
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors that carry a path benefit from the context
            match &mut error {
                MosaicError::ImageLoad { path: slot, .. }
                | MosaicError::ImageExport { path: slot, .. }
                | MosaicError::FileSystem { path: slot, .. } => {
                    if slot.as_os_str() == UNKNOWN_PATH {
                        *slot = path.to_path_buf();
                    }
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a pipeline failure error
pub fn pipeline_error(stage: &'static str, reason: &impl ToString) -> MosaicError {
    MosaicError::Pipeline {
        stage,
        reason: reason.to_string(),
    }
}
