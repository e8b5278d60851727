//! # Error Types
//!
//! Error handling for the datagram framing codec.
//!
//! Every way a buffer can fail to become a trusted packet has its own variant,
//! so callers can tell a short read from a foreign datagram from a corrupted
//! one without parsing error strings.
//!
//! ## Error Categories
//! - **Framing Errors**: Truncated input, writer overflow, trailing bytes
//! - **Header Errors**: Bad magic, unsupported version, body length out of range,
//!   unknown encoding/encryption tags, malformed reserved field
//! - **Integrity Errors**: Body length mismatch, checksum mismatch
//! - **Ambient Errors**: I/O, configuration, system clock
//!
//! Malformed input is an expected occurrence on a network boundary, so none of
//! these are raised by panicking.
//!
//! ## Example Usage
//! ```rust
//! use datagram_frame::core::packet::Packet;
//! use datagram_frame::error::ProtocolError;
//! use tracing::warn;
//!
//! let datagram = [0u8; 28];
//! match Packet::decode(&datagram) {
//!     Ok(packet) => assert!(packet.is_valid()),
//!     Err(e @ ProtocolError::TruncatedInput { .. }) => {
//!         warn!(kind = e.kind(), error = %e, "Dropping datagram");
//!     }
//!     Err(e) => panic!("unexpected error: {e}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Clock errors
    pub const ERR_SYSTEM_TIME: &str = "System time error: time went backwards";

    /// Configuration errors
    pub const ERR_SUBSCRIBER_INSTALLED: &str = "A global tracing subscriber is already installed";
    pub const ERR_BODY_CAP_TOO_LARGE: &str = "max_body_length exceeds the protocol maximum";
}

// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    #[serde(skip_serializing, skip_deserializing)]
    Io(#[from] io::Error),

    #[error("Truncated input: need {expected} bytes, have {actual}")]
    TruncatedInput { expected: usize, actual: usize },

    #[error("Buffer overflow: need {needed} bytes, {remaining} remaining")]
    BufferOverflow { needed: usize, remaining: usize },

    #[error("Invalid magic number: {0:#010x}")]
    InvalidMagic(u32),

    #[error("Unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    #[error("Body length {length} out of range (max {max})")]
    BodyLengthOutOfRange { length: usize, max: usize },

    #[error("Body length mismatch: header declares {declared}, found {actual}")]
    BodyLengthMismatch { declared: usize, actual: usize },

    #[error("Checksum mismatch: declared {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("Malformed reserved field: expected 4 bytes, got {0}")]
    MalformedReserved(usize),

    #[error("Unknown encoding tag: {0}")]
    UnknownEncoding(u8),

    #[error("Unknown encryption tag: {0}")]
    UnknownEncryption(u8),

    #[error("Protocol id {0:#06x} is outside every known category")]
    UnknownCategory(u16),

    #[error("{}", constants::ERR_SYSTEM_TIME)]
    Clock,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// Stable snake_case name of the error kind, for log fields and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            ProtocolError::Io(_) => "io",
            ProtocolError::TruncatedInput { .. } => "truncated_input",
            ProtocolError::BufferOverflow { .. } => "buffer_overflow",
            ProtocolError::InvalidMagic(_) => "invalid_magic",
            ProtocolError::UnsupportedVersion(_) => "invalid_version",
            ProtocolError::BodyLengthOutOfRange { .. } => "body_length_out_of_range",
            ProtocolError::BodyLengthMismatch { .. } => "body_length_mismatch",
            ProtocolError::ChecksumMismatch { .. } => "checksum_mismatch",
            ProtocolError::MalformedReserved(_) => "malformed_reserved",
            ProtocolError::UnknownEncoding(_) => "unknown_encoding",
            ProtocolError::UnknownEncryption(_) => "unknown_encryption",
            ProtocolError::UnknownCategory(_) => "unknown_category",
            ProtocolError::Clock => "clock",
            ProtocolError::ConfigError(_) => "config",
        }
    }

    /// Whether this error describes a bad frame (as opposed to a local fault).
    pub fn is_wire_error(&self) -> bool {
        !matches!(
            self,
            ProtocolError::Io(_)
                | ProtocolError::BufferOverflow { .. }
                | ProtocolError::Clock
                | ProtocolError::ConfigError(_)
        )
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_are_distinct() {
        let errors = [
            ProtocolError::TruncatedInput {
                expected: 29,
                actual: 28,
            },
            ProtocolError::InvalidMagic(0),
            ProtocolError::UnsupportedVersion(2),
            ProtocolError::BodyLengthOutOfRange {
                length: 65537,
                max: 65536,
            },
            ProtocolError::BodyLengthMismatch {
                declared: 1,
                actual: 0,
            },
            ProtocolError::ChecksumMismatch {
                expected: 1,
                actual: 2,
            },
            ProtocolError::MalformedReserved(3),
        ];

        let mut kinds: Vec<_> = errors.iter().map(ProtocolError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
        assert!(errors.iter().all(ProtocolError::is_wire_error));
    }

    #[test]
    fn test_display_includes_hex_magic() {
        let err = ProtocolError::InvalidMagic(0xDEAD_BEEF);
        assert_eq!(err.to_string(), "Invalid magic number: 0xdeadbeef");
    }

    #[test]
    fn test_local_faults_are_not_wire_errors() {
        assert!(!ProtocolError::Clock.is_wire_error());
        assert!(!ProtocolError::ConfigError("x".into()).is_wire_error());
        assert!(!ProtocolError::BufferOverflow {
            needed: 4,
            remaining: 0
        }
        .is_wire_error());
    }
}
