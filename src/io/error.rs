//! Error types for mosaic construction and its image collaborators

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// The element library holds no images, so no cell can be matched
    EmptyLibrary,

    /// Build parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to decode a template or element image
    DecodeFailure {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to encode or write the finished mosaic
    PersistFailure {
        /// Path where the mosaic was being written
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// Output path does not name a supported image format
    UnsupportedFormat {
        /// Offending output path
        path: PathBuf,
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

    /// An element raster is not `expected × expected` pixels
    ElementSizeMismatch {
        /// Library index of the offending element
        index: usize,
        /// Side length required by the library
        expected: usize,
        /// Actual raster width
        width: usize,
        /// Actual raster height
        height: usize,
    },

    /// Grid or raster data doesn't meet the builder's shape requirements
    InvalidSourceData {
        /// Description of what's wrong with the data
        reason: String,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLibrary => {
                write!(f, "Element library is empty: no usable element images")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DecodeFailure { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::PersistFailure { path, source } => {
                write!(f, "Failed to save mosaic to '{}': {source}", path.display())
            }
            Self::UnsupportedFormat { path } => {
                write!(
                    f,
                    "Unsupported output format for '{}' (expected bmp, jpg, jpeg, png or gif)",
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
            Self::ElementSizeMismatch {
                index,
                expected,
                width,
                height,
            } => {
                write!(
                    f,
                    "Element {index} is {width}x{height}, expected {expected}x{expected}"
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DecodeFailure { source, .. } | Self::PersistFailure { source, .. } => {
                Some(source)
            }
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

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

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> MosaicError {
    MosaicError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> MosaicError {
    MosaicError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
