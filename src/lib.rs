//! # datagram-frame
//!
//! Fixed-header, checksum-protected binary framing for datagram transports.
//!
//! Turns a protocol identifier and a body into wire bytes, and wire bytes back
//! into a typed, validated [`Packet`].
//!
//! ```rust
//! use datagram_frame::core::packet;
//! use datagram_frame::core::registry::ProtocolType;
//!
//! # fn main() -> datagram_frame::Result<()> {
//! let bytes = packet::encode(ProtocolType::Heartbeat.id(), b"")?;
//! assert_eq!(bytes.len(), 29);
//!
//! let decoded = packet::decode(&bytes)?;
//! assert!(decoded.is_valid());
//! assert_eq!(decoded.protocol_type(), Some(ProtocolType::Heartbeat));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//! - [`core`]: wire format, header, packet and the tokio codec adapter
//! - [`config`]: TOML configuration for the codec and logging
//! - [`error`]: error kinds
//! - [`utils`]: logging, metrics and time helpers

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::codec::PacketCodec;
pub use crate::core::header::Header;
pub use crate::core::packet::Packet;
pub use crate::core::registry::{ProtocolCategory, ProtocolType};
pub use crate::core::tags::{Encoding, Encryption};
pub use crate::error::{ProtocolError, Result};
