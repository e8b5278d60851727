//! # Packet Envelope
//!
//! Joins a [`Header`], an opaque body and a trailing CRC-32 into one wire unit.
//!
//! ## Wire Format
//! ```text
//! [Header(25)] [Body(bodyLength)] [Checksum(4)]
//! ```
//! The checksum covers `header || body` and is written big-endian.
//!
//! ## Ownership
//! A decoded [`Packet`] owns a copy of its body. It holds no reference into
//! the input buffer, so the buffer can be reused as soon as decoding returns.
//!
//! ## Trust
//! Decoding checks only what is needed to find the frame boundaries. Call
//! [`Packet::is_valid`] (or [`Packet::check`] for the precise failure) before
//! acting on the contents.

use bytes::Bytes;
use tracing::trace;

use crate::core::buffer::{ByteReader, ByteWriter};
use crate::core::checksum;
use crate::core::header::Header;
use crate::core::registry::{ProtocolType, CHECKSUM_LENGTH, HEADER_LENGTH, MIN_PACKET_LENGTH};
use crate::error::{ProtocolError, Result};

/// A complete frame: header, body and checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    header: Header,
    body: Vec<u8>,
    /// Trailer read off the wire. `None` for outbound packets, whose checksum
    /// is computed when they are serialized.
    checksum: Option<u32>,
}

impl Packet {
    /// Build an outbound packet, synthesizing a fresh header for `body`.
    ///
    /// # Errors
    /// `BodyLengthOutOfRange` if the body is larger than `MAX_BODY_LENGTH`.
    pub fn new(protocol_id: u16, body: impl Into<Vec<u8>>) -> Result<Self> {
        let body = body.into();
        let header = Header::new(protocol_id, body.len())?;
        Ok(Self {
            header,
            body,
            checksum: None,
        })
    }

    /// Build an outbound packet around a caller-supplied header.
    ///
    /// # Errors
    /// `BodyLengthMismatch` if the header does not declare `body.len()`.
    pub fn with_header(header: Header, body: impl Into<Vec<u8>>) -> Result<Self> {
        let body = body.into();
        if header.body_length() != body.len() {
            return Err(ProtocolError::BodyLengthMismatch {
                declared: header.body_length(),
                actual: body.len(),
            });
        }
        Ok(Self {
            header,
            body,
            checksum: None,
        })
    }

    /// Decode a buffer holding exactly one packet.
    ///
    /// # Errors
    /// - `TruncatedInput` if the buffer is shorter than 29 bytes or shorter
    ///   than the header's declared body length plus trailer
    /// - `BodyLengthMismatch` if bytes remain after the trailer
    /// - header tag errors from [`Header::decode`]
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (packet, consumed) = Self::decode_prefix(bytes)?;
        if consumed != bytes.len() {
            return Err(ProtocolError::BodyLengthMismatch {
                declared: packet.header.body_length(),
                actual: bytes.len() - HEADER_LENGTH - CHECKSUM_LENGTH,
            });
        }
        Ok(packet)
    }

    /// Decode one packet from the front of `bytes`, returning it along with the
    /// number of bytes it occupied. Anything after the trailer is left alone.
    pub fn decode_prefix(bytes: &[u8]) -> Result<(Self, usize)> {
        if bytes.len() < MIN_PACKET_LENGTH {
            return Err(ProtocolError::TruncatedInput {
                expected: MIN_PACKET_LENGTH,
                actual: bytes.len(),
            });
        }

        let mut reader = ByteReader::new(bytes);
        let header = Header::decode_from(&mut reader)?;

        // Guard the declared length before touching the body so an inflated
        // field can never cause an out-of-bounds read.
        let body_length = header.body_length();
        let needed = body_length.saturating_add(CHECKSUM_LENGTH);
        if reader.remaining() < needed {
            return Err(ProtocolError::TruncatedInput {
                expected: HEADER_LENGTH.saturating_add(needed),
                actual: bytes.len(),
            });
        }

        let body = reader.read_bytes(body_length)?.to_vec();
        let declared = reader.read_u32()?;

        trace!(
            protocol_id = header.protocol_id(),
            body_length,
            checksum = declared,
            "Decoded packet"
        );

        Ok((
            Self {
                header,
                body,
                checksum: Some(declared),
            },
            reader.position(),
        ))
    }

    /// Total size on the wire
    pub fn encoded_len(&self) -> usize {
        HEADER_LENGTH + self.body.len() + CHECKSUM_LENGTH
    }

    /// Serialize to `header || body || checksum`.
    ///
    /// A decoded packet is written back with the checksum it arrived with, so
    /// decode-then-encode reproduces the original bytes.
    pub fn encode(&self) -> Result<Bytes> {
        let mut writer = ByteWriter::with_capacity(self.encoded_len());
        self.encode_into(&mut writer)?;
        Ok(writer.freeze())
    }

    /// Append the wire form to `writer`.
    pub fn encode_into(&self, writer: &mut ByteWriter) -> Result<()> {
        write_frame(&self.header, &self.body, self.checksum, writer)
    }

    /// Recompute the checksum over `header || body`.
    pub fn computed_checksum(&self) -> Result<u32> {
        let header_bytes = self.header.encode()?;
        Ok(checksum::checksum_concat(&header_bytes, &self.body))
    }

    /// Checksum as it appears (or will appear) on the wire.
    pub fn checksum(&self) -> Result<u32> {
        match self.checksum {
            Some(declared) => Ok(declared),
            None => self.computed_checksum(),
        }
    }

    /// Checksum read from the trailer; `None` for outbound packets.
    pub fn declared_checksum(&self) -> Option<u32> {
        self.checksum
    }

    /// Compare the declared trailer against a fresh computation.
    ///
    /// Returns `false` on mismatch and when the header cannot be re-encoded.
    pub fn verify(&self) -> bool {
        match (self.checksum(), self.computed_checksum()) {
            (Ok(declared), Ok(computed)) => declared == computed,
            _ => false,
        }
    }

    /// Check header invariants, body length and checksum, reporting the first
    /// failure as its own error kind.
    pub fn check(&self) -> Result<()> {
        self.header.check()?;

        if self.body.len() != self.header.body_length() {
            return Err(ProtocolError::BodyLengthMismatch {
                declared: self.header.body_length(),
                actual: self.body.len(),
            });
        }

        let computed = self.computed_checksum()?;
        let declared = self.checksum.unwrap_or(computed);
        if declared != computed {
            return Err(ProtocolError::ChecksumMismatch {
                expected: declared,
                actual: computed,
            });
        }
        Ok(())
    }

    /// The single predicate to consult before trusting a packet's contents.
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn protocol_id(&self) -> u16 {
        self.header.protocol_id()
    }

    pub fn protocol_type(&self) -> Option<ProtocolType> {
        self.header.protocol_type()
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    pub fn into_parts(self) -> (Header, Vec<u8>) {
        (self.header, self.body)
    }
}

/// Encode `protocol_id` and `body` straight to wire bytes.
///
/// Output length is always `25 + body.len() + 4`.
pub fn encode(protocol_id: u16, body: &[u8]) -> Result<Bytes> {
    let header = Header::new(protocol_id, body.len())?;
    let mut writer = ByteWriter::with_capacity(HEADER_LENGTH + body.len() + CHECKSUM_LENGTH);
    write_frame(&header, body, None, &mut writer)?;
    Ok(writer.freeze())
}

/// Decode a buffer holding exactly one packet. See [`Packet::decode`].
pub fn decode(bytes: &[u8]) -> Result<Packet> {
    Packet::decode(bytes)
}

fn write_frame(
    header: &Header,
    body: &[u8],
    declared: Option<u32>,
    writer: &mut ByteWriter,
) -> Result<()> {
    // Packet constructors guarantee agreement; a mismatch here is a bug.
    assert_eq!(
        header.body_length(),
        body.len(),
        "header declares a different body length than supplied"
    );

    let start = writer.len();
    header.encode_into(writer)?;
    writer.write_bytes(body)?;
    let crc = match declared {
        Some(crc) => crc,
        None => checksum::checksum(&writer.as_slice()[start..]),
    };
    writer.write_u32(crc)
}
