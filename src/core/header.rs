//! # Header Codec
//!
//! The fixed 25-byte preamble of every packet.
//!
//! Decoding and validation are separate steps: [`Header::decode`] only fails
//! when the bytes cannot be parsed at all, while [`Header::check`] (and its
//! boolean twin [`Header::validate`]) rejects a well-formed header that this
//! endpoint does not accept, such as a foreign magic number or another
//! protocol version, or an encoding/encryption tag outside the wire table.
//! This lets a caller log the parsed fields of a rejected header. Tag bytes
//! are kept as read so a decoded header re-encodes unchanged.
//!
//! ## Wire Format
//! ```text
//! [Magic(4)] [Version(1)] [ProtocolId(2)] [Encoding(1)] [Encryption(1)]
//! [BodyLength(4)] [Timestamp(8)] [Reserved(4)]
//! ```
//! All integers are big-endian.

use serde::{Deserialize, Serialize};

use crate::core::buffer::{ByteReader, ByteWriter};
use crate::core::registry::{
    ProtocolCategory, ProtocolType, HEADER_LENGTH, MAGIC, MAX_BODY_LENGTH, RESERVED_LENGTH,
    VERSION,
};
use crate::core::tags::{Encoding, Encryption};
use crate::error::{ProtocolError, Result};
use crate::utils::time;

/// Immutable packet header.
///
/// Built fresh for outbound packets with [`Header::new`] (which stamps the
/// current time) or rebuilt from inbound bytes with [`Header::decode`]. The
/// `with_*` methods return a new header rather than mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    magic: u32,
    version: u8,
    protocol_id: u16,
    encoding: u8,
    encryption: u8,
    body_length: u32,
    timestamp: u64,
    reserved: [u8; RESERVED_LENGTH],
}

impl Header {
    /// Build an outbound header for a body of `body_length` bytes.
    ///
    /// Uses the registry magic and version, JSON encoding, no encryption,
    /// a zeroed reserved field and the current wall-clock time.
    ///
    /// # Errors
    /// - `BodyLengthOutOfRange` if `body_length` exceeds `MAX_BODY_LENGTH`
    /// - `Clock` if the system clock reads earlier than the Unix epoch
    pub fn new(protocol_id: u16, body_length: usize) -> Result<Self> {
        if body_length > MAX_BODY_LENGTH {
            return Err(ProtocolError::BodyLengthOutOfRange {
                length: body_length,
                max: MAX_BODY_LENGTH,
            });
        }

        Ok(Self {
            magic: MAGIC,
            version: VERSION,
            protocol_id,
            encoding: Encoding::default().tag(),
            encryption: Encryption::default().tag(),
            // MAX_BODY_LENGTH fits in u32
            body_length: body_length as u32,
            timestamp: time::now_millis()?,
            reserved: [0; RESERVED_LENGTH],
        })
    }

    pub fn with_encoding(self, encoding: Encoding) -> Self {
        Self {
            encoding: encoding.tag(),
            ..self
        }
    }

    pub fn with_encryption(self, encryption: Encryption) -> Self {
        Self {
            encryption: encryption.tag(),
            ..self
        }
    }

    /// Replace the construction timestamp (epoch milliseconds)
    pub fn with_timestamp(self, timestamp: u64) -> Self {
        Self { timestamp, ..self }
    }

    pub fn with_reserved(self, reserved: [u8; RESERVED_LENGTH]) -> Self {
        Self { reserved, ..self }
    }

    /// Parse the first `HEADER_LENGTH` bytes of `bytes`.
    ///
    /// Performs no validation: magic, version, tags and body length are
    /// returned as found.
    ///
    /// # Errors
    /// `TruncatedInput` if fewer than 25 bytes are supplied.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LENGTH {
            return Err(ProtocolError::TruncatedInput {
                expected: HEADER_LENGTH,
                actual: bytes.len(),
            });
        }

        let mut reader = ByteReader::new(&bytes[..HEADER_LENGTH]);
        Self::decode_from(&mut reader)
    }

    /// Read a header at the reader's cursor, advancing past it.
    pub fn decode_from(reader: &mut ByteReader<'_>) -> Result<Self> {
        if reader.remaining() < HEADER_LENGTH {
            return Err(ProtocolError::TruncatedInput {
                expected: reader.position() + HEADER_LENGTH,
                actual: reader.position() + reader.remaining(),
            });
        }

        let magic = reader.read_u32()?;
        let version = reader.read_u8()?;
        let protocol_id = reader.read_u16()?;
        let encoding = reader.read_u8()?;
        let encryption = reader.read_u8()?;
        let body_length = reader.read_u32()?;
        let timestamp = reader.read_u64()?;
        let reserved = parse_reserved(reader.read_bytes(RESERVED_LENGTH)?)?;

        Ok(Self {
            magic,
            version,
            protocol_id,
            encoding,
            encryption,
            body_length,
            timestamp,
            reserved,
        })
    }

    /// Write the header at the writer's cursor (always exactly 25 bytes).
    pub fn encode_into(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_u32(self.magic)?;
        writer.write_u8(self.version)?;
        writer.write_u16(self.protocol_id)?;
        writer.write_u8(self.encoding)?;
        writer.write_u8(self.encryption)?;
        writer.write_u32(self.body_length)?;
        writer.write_u64(self.timestamp)?;
        writer.write_bytes(&self.reserved)?;
        Ok(())
    }

    /// Serialize to the fixed 25-byte wire form.
    pub fn encode(&self) -> Result<[u8; HEADER_LENGTH]> {
        let mut writer = ByteWriter::with_capacity(HEADER_LENGTH);
        self.encode_into(&mut writer)?;
        <[u8; HEADER_LENGTH]>::try_from(writer.as_slice()).map_err(|_| {
            ProtocolError::TruncatedInput {
                expected: HEADER_LENGTH,
                actual: writer.len(),
            }
        })
    }

    /// Check every header invariant, reporting the first violation.
    ///
    /// Order: magic, version, encoding, encryption, body length. The reserved
    /// field is a fixed-size array and cannot be malformed once a `Header`
    /// exists.
    pub fn check(&self) -> Result<()> {
        if !self.valid_magic() {
            return Err(ProtocolError::InvalidMagic(self.magic));
        }
        if !self.valid_version() {
            return Err(ProtocolError::UnsupportedVersion(self.version));
        }
        Encoding::from_tag(self.encoding)?;
        Encryption::from_tag(self.encryption)?;
        if !self.valid_body_length() {
            return Err(ProtocolError::BodyLengthOutOfRange {
                length: self.body_length(),
                max: MAX_BODY_LENGTH,
            });
        }
        Ok(())
    }

    /// `true` when every header invariant holds
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    pub fn valid_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn valid_version(&self) -> bool {
        self.version == VERSION
    }

    pub fn valid_tags(&self) -> bool {
        self.encoding().is_some() && self.encryption().is_some()
    }

    pub fn valid_body_length(&self) -> bool {
        self.body_length() <= MAX_BODY_LENGTH
    }

    pub fn magic(&self) -> u32 {
        self.magic
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn protocol_id(&self) -> u16 {
        self.protocol_id
    }

    /// Body encoding, or `None` for a tag byte outside the wire table
    pub fn encoding(&self) -> Option<Encoding> {
        Encoding::from_tag(self.encoding).ok()
    }

    /// Encoding tag byte as carried on the wire
    pub fn encoding_tag(&self) -> u8 {
        self.encoding
    }

    /// Encryption scheme, or `None` for a tag byte outside the wire table
    pub fn encryption(&self) -> Option<Encryption> {
        Encryption::from_tag(self.encryption).ok()
    }

    pub fn encryption_tag(&self) -> u8 {
        self.encryption
    }

    /// Declared length of the body that follows the header
    pub fn body_length(&self) -> usize {
        self.body_length as usize
    }

    /// Construction time in milliseconds since the Unix epoch
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn reserved(&self) -> [u8; RESERVED_LENGTH] {
        self.reserved
    }

    /// Range category of the protocol id, if any
    pub fn category(&self) -> Option<ProtocolCategory> {
        ProtocolCategory::of(self.protocol_id)
    }

    /// Registered name of the protocol id, if any
    pub fn protocol_type(&self) -> Option<ProtocolType> {
        ProtocolType::from_id(self.protocol_id)
    }
}

/// Convert a variable-length span into the reserved field.
///
/// # Errors
/// `MalformedReserved` unless the span is exactly 4 bytes long.
pub fn parse_reserved(bytes: &[u8]) -> Result<[u8; RESERVED_LENGTH]> {
    <[u8; RESERVED_LENGTH]>::try_from(bytes)
        .map_err(|_| ProtocolError::MalformedReserved(bytes.len()))
}
