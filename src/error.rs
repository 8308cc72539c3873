//! Error types for xcdr-rs

use thiserror::Error;

/// Result type alias for xcdr-rs operations
pub type Result<T> = std::result::Result<T, CdrError>;

/// Errors that can occur while encoding or decoding CDR data
#[derive(Error, Debug)]
pub enum CdrError {
    /// A read would run past the end of the input buffer
    #[error("buffer too small: need {needed} bytes at position {position}, but only {remaining} remain")]
    BufferTooSmall {
        needed: usize,
        remaining: usize,
        position: usize,
    },

    /// Unknown encapsulation kind byte at position 1 of the stream
    #[error("invalid encapsulation kind: 0x{kind:02X}")]
    InvalidEncapsulation { kind: u8 },

    /// Missing null terminator or invalid UTF-8 in a string
    #[error("invalid string: {reason}")]
    InvalidString { reason: String },

    /// XCDR2 member id exceeds the 28-bit EMHEADER id field
    #[error("member id 0x{id:08X} exceeds the XCDR2 EMHEADER id range")]
    IdTooLarge { id: u32 },

    /// A length code outside 0-7, or an object size inconsistent with the chosen code
    #[error("bad length code: {reason}")]
    BadLengthCode { reason: String },

    /// Stream structure does not match what the caller expected
    #[error("integrity violation: {reason}")]
    IntegrityViolation { reason: String },
}

impl CdrError {
    /// Create a buffer-too-small error
    pub fn buffer_too_small(needed: usize, remaining: usize, position: usize) -> Self {
        Self::BufferTooSmall {
            needed,
            remaining,
            position,
        }
    }

    /// Create an invalid string error
    pub fn invalid_string(reason: impl Into<String>) -> Self {
        Self::InvalidString {
            reason: reason.into(),
        }
    }

    /// Create a bad length code error
    pub fn bad_length_code(reason: impl Into<String>) -> Self {
        Self::BadLengthCode {
            reason: reason.into(),
        }
    }

    /// Create an integrity violation error
    pub fn integrity_violation(reason: impl Into<String>) -> Self {
        Self::IntegrityViolation {
            reason: reason.into(),
        }
    }
}
