//! Error types and handling for bufmeta

use crate::layout::MetadataKind;

/// Result type alias for bufmeta operations
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Error taxonomy for metadata region operations
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Handle is null-equivalent or fails structural validation
    #[error("invalid buffer handle: {reason}")]
    InvalidHandle { reason: String },

    /// Handle is structurally valid but carries no shared-memory descriptor
    #[error("handle carries no metadata descriptor")]
    NoMetadataDescriptor,

    /// The underlying map call could not establish the shared mapping
    #[error("failed to map metadata region: {source}")]
    MapFailed {
        #[source]
        source: nix::errno::Errno,
    },

    /// Requested attribute's presence bit is clear
    #[error("attribute {kind:?} is not present")]
    AttributeNotPresent { kind: MetadataKind },

    /// Invalid parameters (null destination, malformed input)
    #[error("invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Platform-specific errors (descriptor allocation, duplication)
    #[error("platform error: {message}")]
    Platform { message: String },
}

impl MetadataError {
    /// Create an invalid handle error
    pub fn invalid_handle(reason: impl Into<String>) -> Self {
        Self::InvalidHandle {
            reason: reason.into(),
        }
    }

    /// Create a map failure error from the underlying errno
    pub fn map_failed(source: nix::errno::Errno) -> Self {
        Self::MapFailed { source }
    }

    /// Create an attribute-not-present error
    pub fn not_present(kind: MetadataKind) -> Self {
        Self::AttributeNotPresent { kind }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a platform error
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform {
            message: message.into(),
        }
    }
}
