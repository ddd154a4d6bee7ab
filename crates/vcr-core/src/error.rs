//! Error types for VCR

use thiserror::Error;

/// Boxed error returned by user-supplied formatters and tapes
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by a level call on a [`Vcr`](crate::Vcr)
///
/// Nothing is caught or retried inside the pipeline: the first failing
/// formatter or tape ends the call and its error is returned as-is.
#[derive(Debug, Error)]
pub enum VcrError {
    #[error("Formatter #{index} failed for {tag}: {source}")]
    Formatter {
        /// Full tag of the frame being formatted
        tag: String,
        /// Registration index of the failing formatter
        index: usize,
        #[source]
        source: BoxError,
    },

    #[error("Tape #{index} failed for {tag}: {source}")]
    Tape {
        /// Full tag of the frame being dispatched
        tag: String,
        /// Registration index of the failing tape
        index: usize,
        #[source]
        source: BoxError,
    },
}

impl VcrError {
    /// Tag of the frame that was in flight when the error occurred
    pub fn tag(&self) -> &str {
        match self {
            Self::Formatter { tag, .. } => tag,
            Self::Tape { tag, .. } => tag,
        }
    }

    /// Registration index of the formatter or tape that failed
    pub fn index(&self) -> usize {
        match self {
            Self::Formatter { index, .. } => *index,
            Self::Tape { index, .. } => *index,
        }
    }
}

/// Error returned when parsing a [`Level`](crate::Level) from a string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown log level: {0}")]
pub struct ParseLevelError(pub String);
