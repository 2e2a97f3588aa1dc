//! Error handling for the codec library
//!
//! Every failure in this crate is a rejected operation: the call returns an
//! error and no channel state is modified.

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error type for codec and channel operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Byte input is not a whole number of units (16-bit samples or frames)
    #[error("Invalid length: {actual} bytes is not a multiple of {unit}")]
    InvalidLength { unit: usize, actual: usize },

    /// Encode/decode argument does not match the fixed frame size
    #[error("Invalid frame size: expected {expected}, got {actual}")]
    InvalidFrameSize { expected: usize, actual: usize },

    /// Operation attempted on a channel that was already closed
    #[error("Channel is closed")]
    ClosedChannel,

    /// Channel state could not be allocated
    #[error("Allocation failed: {reason}")]
    AllocationFailed { reason: String },

    /// Invalid codec configuration
    #[error("Invalid codec configuration: {details}")]
    InvalidConfig { details: String },

    /// Feature not enabled
    #[error("Feature not enabled: {feature} (enable with --features {feature})")]
    FeatureNotEnabled { feature: String },
}

impl CodecError {
    /// Create a new invalid length error for 16-bit sample data
    pub fn odd_sample_bytes(actual: usize) -> Self {
        Self::InvalidLength { unit: 2, actual }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Create a new allocation failed error
    pub fn allocation_failed(reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            reason: reason.into(),
        }
    }

    /// Create a new feature not enabled error
    pub fn feature_not_enabled(feature: impl Into<String>) -> Self {
        Self::FeatureNotEnabled {
            feature: feature.into(),
        }
    }

    /// Check if the caller can retry the operation with corrected input
    /// on the same object.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidLength { .. } | Self::InvalidFrameSize { .. } => true,

            Self::ClosedChannel
            | Self::AllocationFailed { .. }
            | Self::InvalidConfig { .. }
            | Self::FeatureNotEnabled { .. } => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidLength { .. } | Self::InvalidFrameSize { .. } => ErrorCategory::Input,
            Self::ClosedChannel => ErrorCategory::Lifecycle,
            Self::AllocationFailed { .. } => ErrorCategory::Memory,
            Self::InvalidConfig { .. } | Self::FeatureNotEnabled { .. } => {
                ErrorCategory::Configuration
            }
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed caller input
    Input,
    /// Channel lifecycle violations
    Lifecycle,
    /// Memory management errors
    Memory,
    /// Configuration and parameter errors
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Lifecycle => write!(f, "Lifecycle"),
            Self::Memory => write!(f, "Memory"),
            Self::Configuration => write!(f, "Configuration"),
        }
    }
}

impl From<std::collections::TryReserveError> for CodecError {
    fn from(error: std::collections::TryReserveError) -> Self {
        Self::allocation_failed(error.to_string())
    }
}
