//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Result type for link resolution.
pub type LinkResult<T> = Result<T, LinkError>;

/// Errors that can occur while packing or unpacking a track.
///
/// Only the variants for which [`CodecError::is_corruption`] returns `true`
/// are ever converted into a [`TrackError::Corrupt`](crate::TrackError)
/// marker. Everything else reaches the caller as an `Err`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The byte stream ended before a number or text field was complete.
    #[error("unexpected end of input while unpacking number")]
    Incomplete,

    /// A value does not fit the widest varint tier.
    #[error("number {value} too big to pack in 29 bits")]
    OutOfRange {
        /// The rejected value.
        value: i64,
    },

    /// A text field holds bytes that are not UTF-8.
    #[error("invalid UTF-8 in text field")]
    InvalidUtf8,

    /// A length or count prefix is negative.
    #[error("invalid length prefix: {length}")]
    InvalidLength {
        /// The decoded prefix.
        length: i64,
    },
}

impl CodecError {
    /// Create an out-of-range error.
    pub fn out_of_range(value: i64) -> Self {
        Self::OutOfRange { value }
    }

    /// Create an invalid length error.
    pub fn invalid_length(length: i64) -> Self {
        Self::InvalidLength { length }
    }

    /// Returns true if this error describes damaged input rather than a
    /// misuse of the API.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            CodecError::Incomplete | CodecError::InvalidUtf8 | CodecError::InvalidLength { .. }
        )
    }
}

/// Errors returned by [`LinkResolver`](crate::LinkResolver).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The URL carries no `nktl=<id>` marker.
    #[error("invalid track link url: {url}")]
    NoTrackId {
        /// The rejected URL.
        url: String,
    },

    /// The HTTP layer handed over the wrong number of response bodies.
    #[error("invalid responses array length {count}")]
    ResponseCount {
        /// Number of bodies received.
        count: usize,
    },

    /// Decoding a response body failed outright.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
