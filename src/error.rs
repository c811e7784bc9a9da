use thiserror::Error;

use crate::ofx::Status;

/// Main error type for the clip host library
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Property error: {0}")]
    Property(#[from] PropertyError),

    #[error("Clip error: {0}")]
    Clip(#[from] ClipError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Property bag errors
///
/// These are what the property suite reports back to a plugin, see
/// [`PropertyError::status`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    #[error("Unknown property: {name}")]
    Unknown { name: String },

    #[error("Property {name} is not of type {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("Bad index or count {index} for property {name}")]
    ValueRange { name: String, index: usize },

    #[error("Property {name} is read only to plugins")]
    ReadOnly { name: String },

    #[error("Host does not support this on property {name}")]
    MissingHostFeature { name: String },
}

/// Clip model errors
#[derive(Error, Debug)]
pub enum ClipError {
    #[error("Clip not found: {name}")]
    NotFound { name: String },

    #[error("Clip {name} declares no supported components")]
    NoSupportedComponents { name: String },
}

/// Image and texture record errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    #[error("Image {identifier:?} was already released")]
    AlreadyReleased { identifier: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using HostError
pub type Result<T> = std::result::Result<T, HostError>;

/// Result alias used by the property bag and its get hooks
pub type PropResult<T> = std::result::Result<T, PropertyError>;

impl PropertyError {
    pub fn value_range<S: Into<String>>(name: S, index: usize) -> Self {
        Self::ValueRange { name: name.into(), index }
    }

    pub fn unknown<S: Into<String>>(name: S) -> Self {
        Self::Unknown { name: name.into() }
    }

    pub fn missing_host_feature<S: Into<String>>(name: S) -> Self {
        Self::MissingHostFeature { name: name.into() }
    }

    /// The status code a property suite call reports for this failure
    pub fn status(&self) -> Status {
        match self {
            Self::Unknown { .. } => Status::ERR_UNKNOWN,
            Self::MissingHostFeature { .. } => Status::ERR_MISSING_HOST_FEATURE,
            Self::TypeMismatch { .. }
            | Self::ValueRange { .. }
            | Self::ReadOnly { .. } => Status::ERR_VALUE,
        }
    }
}

impl HostError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable
    ///
    /// Property and clip failures are local to one call and leave the bag
    /// untouched, so the caller may carry on. A double release is a
    /// programming error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Property(_) => true,
            Self::Clip(_) => true,
            Self::Io(_) => true,
            _ => false,
        }
    }

    /// Status code to hand back across the C boundary
    pub fn status(&self) -> Status {
        match self {
            Self::Property(e) => e.status(),
            Self::Clip(ClipError::NotFound { .. }) => Status::ERR_BAD_HANDLE,
            Self::Image(ImageError::AlreadyReleased { .. }) => Status::ERR_BAD_HANDLE,
            _ => Status::FAILED,
        }
    }
}
