//! # Header Tags
//!
//! One-byte header fields naming how the body is encoded and whether it is
//! encrypted. The codec only carries these tags; it never serializes or
//! encrypts the body itself.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};

/// Body content encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Json,
    Yaml,
    Xml,
    Binary,
}

impl Encoding {
    pub const ALL: [Encoding; 4] = [
        Encoding::Json,
        Encoding::Yaml,
        Encoding::Xml,
        Encoding::Binary,
    ];

    /// Get the tag byte written to the wire
    pub fn tag(self) -> u8 {
        match self {
            Encoding::Json => 0,
            Encoding::Yaml => 1,
            Encoding::Xml => 2,
            Encoding::Binary => 3,
        }
    }

    /// Parse a tag byte read off the wire
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Encoding::Json),
            1 => Ok(Encoding::Yaml),
            2 => Ok(Encoding::Xml),
            3 => Ok(Encoding::Binary),
            other => Err(ProtocolError::UnknownEncoding(other)),
        }
    }

    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Json => "JSON",
            Encoding::Yaml => "YAML",
            Encoding::Xml => "XML",
            Encoding::Binary => "BINARY",
        }
    }
}

/// Body encryption scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encryption {
    #[default]
    None,
    Dtls,
    Aes,
}

impl Encryption {
    pub const ALL: [Encryption; 3] = [Encryption::None, Encryption::Dtls, Encryption::Aes];

    pub fn tag(self) -> u8 {
        match self {
            Encryption::None => 0,
            Encryption::Dtls => 1,
            Encryption::Aes => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Encryption::None),
            1 => Ok(Encryption::Dtls),
            2 => Ok(Encryption::Aes),
            other => Err(ProtocolError::UnknownEncryption(other)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encryption::None => "NONE",
            Encryption::Dtls => "DTLS",
            Encryption::Aes => "AES",
        }
    }

    pub fn is_encrypted(self) -> bool {
        self != Encryption::None
    }
}
