//! Domain errors for segment operations
//!
//! Every failure of the four store operations maps onto one of four kinds
//! (see [`ErrorKind`]). Variants carry enough detail for a caller to retry
//! selectively: the number of unknown segments, or the exact slugs that were
//! already assigned.

use std::time::Duration;

use thiserror::Error;

/// Coarse classification of a [`SegmentError`]
///
/// Transport layers map on this rather than on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced segment does not exist
    NotFound,
    /// A uniqueness constraint was violated
    Conflict,
    /// The input was malformed
    Validation,
    /// Connectivity, transaction or timeout failure
    Internal,
}

/// Errors that can occur while managing segments and memberships
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// No segment with this slug exists
    #[error("Segment '{0}' not found")]
    SegmentNotFound(String),

    /// Some of the requested slugs did not resolve to a segment
    #[error("Some segments were not found, number: {missing}")]
    MissingSegments { missing: usize },

    /// A segment with this slug already exists
    #[error("Segment '{0}' already exists")]
    SlugTaken(String),

    /// The user already has some of the listed segments; `slugs` names each one
    #[error("User already has segments: {}", .slugs.join(", "))]
    AlreadyAssigned { slugs: Vec<String> },

    /// Malformed input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Store failure, tagged with the operation that hit it
    #[error("{operation}: {message}")]
    Internal {
        operation: &'static str,
        message: String,
    },
}

impl SegmentError {
    /// Create a validation error with a message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a missing segments error
    pub fn missing_segments(missing: usize) -> Self {
        Self::MissingSegments { missing }
    }

    /// Create an already assigned error; slugs are sorted for stable output
    pub fn already_assigned(slugs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut slugs: Vec<String> = slugs.into_iter().map(Into::into).collect();
        slugs.sort();
        Self::AlreadyAssigned { slugs }
    }

    /// Create an internal error for the given operation
    pub fn internal(operation: &'static str, msg: impl Into<String>) -> Self {
        Self::Internal {
            operation,
            message: msg.into(),
        }
    }

    /// Create the error reported when an operation exceeds its deadline
    pub fn timeout(operation: &'static str, after: Duration) -> Self {
        Self::internal(operation, format!("timed out after {}ms", after.as_millis()))
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SegmentNotFound(_) | Self::MissingSegments { .. } => ErrorKind::NotFound,
            Self::SlugTaken(_) | Self::AlreadyAssigned { .. } => ErrorKind::Conflict,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Slugs that caused a conflict, empty for non-conflict errors
    pub fn conflicting_slugs(&self) -> Vec<&str> {
        match self {
            Self::SlugTaken(slug) => vec![slug.as_str()],
            Self::AlreadyAssigned { slugs } => slugs.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Number of unresolved segments, if this is a missing segments error
    pub fn missing_count(&self) -> Option<usize> {
        match self {
            Self::MissingSegments { missing } => Some(*missing),
            _ => None,
        }
    }
}

/// Result type alias for segment operations
pub type Result<T> = std::result::Result<T, SegmentError>;
