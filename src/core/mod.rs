//! # Core Protocol Components
//!
//! Byte-level framing: primitives, checksum, registry, header and packet.
//!
//! This module turns opaque datagram bytes into validated packets and back.
//! Everything here is pure and synchronous; no socket I/O happens in this crate.
//!
//! ## Components
//! - **Buffer**: Bounds-checked big-endian reader/writer
//! - **Checksum**: CRC-32 over `header || body`
//! - **Registry**: Wire constants and protocol-id classification
//! - **Tags**: Encoding and encryption header tags
//! - **Header**: Fixed 25-byte header codec
//! - **Packet**: Header + body + checksum envelope
//! - **Codec**: Tokio codec for framed datagram or stream I/O
//!
//! ## Wire Format
//! ```text
//! [Magic(4)] [Version(1)] [ProtocolId(2)] [Encoding(1)] [Encryption(1)]
//! [BodyLength(4)] [Timestamp(8)] [Reserved(4)] [Body(N)] [Checksum(4)]
//! ```
//!
//! ## Security
//! - Maximum body size: 64 KiB
//! - Magic bytes reject foreign datagrams early
//! - Declared length checked against the buffer before any body read
//! - The checksum detects corruption, not tampering

pub mod buffer;
pub mod checksum;
pub mod codec;
pub mod header;
pub mod packet;
pub mod registry;
pub mod tags;
