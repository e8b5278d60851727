//! # Protocol Registry
//!
//! Compile-time constants for the wire format and the table of protocol
//! identifiers.
//!
//! Two independent questions can be asked about an identifier:
//! - **Which category is it in?** Answered purely by numeric range
//!   ([`is_system`], [`is_business`], [`is_extension`], [`ProtocolCategory::of`]).
//! - **Does it have a registered name?** Answered by the fixed table
//!   ([`type_of`], [`ProtocolType`]).
//!
//! An identifier can sit inside a category range without being named. The
//! range predicates never consult the named table.
//!
//! ## Identifier Ranges
//! ```text
//! 0x0000           reserved
//! 0x0001 - 0x00FF  system
//! 0x0100 - 0x0FFF  business
//! 0x1000 - 0x7FFF  extension
//! 0x8000 - 0xFFFF  reserved
//! ```

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Magic number opening every header
pub const MAGIC: u32 = 0x1234_5678;

/// Current supported protocol version
pub const VERSION: u8 = 0x01;

/// Fixed header size in bytes
pub const HEADER_LENGTH: usize = 25;

/// Trailing checksum size in bytes
pub const CHECKSUM_LENGTH: usize = 4;

/// Reserved header field size in bytes
pub const RESERVED_LENGTH: usize = 4;

/// Smallest possible packet: header plus trailer around an empty body
pub const MIN_PACKET_LENGTH: usize = HEADER_LENGTH + CHECKSUM_LENGTH;

/// Max allowed body size (64 KiB)
pub const MAX_BODY_LENGTH: usize = 65536;

/// Largest possible packet on the wire
pub const MAX_PACKET_LENGTH: usize = MIN_PACKET_LENGTH + MAX_BODY_LENGTH;

/// Field offsets and widths of the fixed header.
pub mod layout {
    pub const MAGIC_OFFSET: usize = 0;
    pub const MAGIC_LENGTH: usize = 4;

    pub const VERSION_OFFSET: usize = 4;
    pub const VERSION_LENGTH: usize = 1;

    pub const PROTOCOL_ID_OFFSET: usize = 5;
    pub const PROTOCOL_ID_LENGTH: usize = 2;

    pub const ENCODING_OFFSET: usize = 7;
    pub const ENCODING_LENGTH: usize = 1;

    pub const ENCRYPTION_OFFSET: usize = 8;
    pub const ENCRYPTION_LENGTH: usize = 1;

    pub const BODY_LENGTH_OFFSET: usize = 9;
    pub const BODY_LENGTH_LENGTH: usize = 4;

    pub const TIMESTAMP_OFFSET: usize = 13;
    pub const TIMESTAMP_LENGTH: usize = 8;

    pub const RESERVED_OFFSET: usize = 21;
    pub const RESERVED_LENGTH: usize = super::RESERVED_LENGTH;

    /// Body starts immediately after the header
    pub const BODY_OFFSET: usize = super::HEADER_LENGTH;
}

pub const SYSTEM_RANGE: RangeInclusive<u16> = 0x0001..=0x00FF;
pub const BUSINESS_RANGE: RangeInclusive<u16> = 0x0100..=0x0FFF;
pub const EXTENSION_RANGE: RangeInclusive<u16> = 0x1000..=0x7FFF;

/// Identifier lies in the system range
pub fn is_system(id: u16) -> bool {
    SYSTEM_RANGE.contains(&id)
}

/// Identifier lies in the business range
pub fn is_business(id: u16) -> bool {
    BUSINESS_RANGE.contains(&id)
}

/// Identifier lies in the extension range
pub fn is_extension(id: u16) -> bool {
    EXTENSION_RANGE.contains(&id)
}

/// Category an identifier belongs to, by numeric range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolCategory {
    System,
    Business,
    Extension,
}

impl ProtocolCategory {
    /// Classify an identifier. `None` for 0x0000 and anything above 0x7FFF.
    pub fn of(id: u16) -> Option<Self> {
        if is_system(id) {
            Some(ProtocolCategory::System)
        } else if is_business(id) {
            Some(ProtocolCategory::Business)
        } else if is_extension(id) {
            Some(ProtocolCategory::Extension)
        } else {
            None
        }
    }

    pub fn range(self) -> RangeInclusive<u16> {
        match self {
            ProtocolCategory::System => SYSTEM_RANGE,
            ProtocolCategory::Business => BUSINESS_RANGE,
            ProtocolCategory::Extension => EXTENSION_RANGE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProtocolCategory::System => "system",
            ProtocolCategory::Business => "business",
            ProtocolCategory::Extension => "extension",
        }
    }
}

impl fmt::Display for ProtocolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registered protocol identifiers.
///
/// The extension range has no named members yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum ProtocolType {
    Heartbeat = 0x0001,
    AuthRequest = 0x0002,
    AuthResponse = 0x0003,
    ErrorResponse = 0x0004,
    Ack = 0x0005,

    UserLogin = 0x0100,
    UserLogout = 0x0101,
    DataSync = 0x0102,
    FileUpload = 0x0103,
}

impl ProtocolType {
    pub const ALL: [ProtocolType; 9] = [
        ProtocolType::Heartbeat,
        ProtocolType::AuthRequest,
        ProtocolType::AuthResponse,
        ProtocolType::ErrorResponse,
        ProtocolType::Ack,
        ProtocolType::UserLogin,
        ProtocolType::UserLogout,
        ProtocolType::DataSync,
        ProtocolType::FileUpload,
    ];

    /// Numeric identifier written to the header
    pub const fn id(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            ProtocolType::Heartbeat => "heartbeat",
            ProtocolType::AuthRequest => "auth-request",
            ProtocolType::AuthResponse => "auth-response",
            ProtocolType::ErrorResponse => "error-response",
            ProtocolType::Ack => "ack",
            ProtocolType::UserLogin => "user-login",
            ProtocolType::UserLogout => "user-logout",
            ProtocolType::DataSync => "data-sync",
            ProtocolType::FileUpload => "file-upload",
        }
    }

    pub fn category(self) -> ProtocolCategory {
        match self {
            ProtocolType::Heartbeat
            | ProtocolType::AuthRequest
            | ProtocolType::AuthResponse
            | ProtocolType::ErrorResponse
            | ProtocolType::Ack => ProtocolCategory::System,
            ProtocolType::UserLogin
            | ProtocolType::UserLogout
            | ProtocolType::DataSync
            | ProtocolType::FileUpload => ProtocolCategory::Business,
        }
    }

    /// Named lookup; `None` for any identifier without a registered name.
    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            0x0001 => Some(ProtocolType::Heartbeat),
            0x0002 => Some(ProtocolType::AuthRequest),
            0x0003 => Some(ProtocolType::AuthResponse),
            0x0004 => Some(ProtocolType::ErrorResponse),
            0x0005 => Some(ProtocolType::Ack),
            0x0100 => Some(ProtocolType::UserLogin),
            0x0101 => Some(ProtocolType::UserLogout),
            0x0102 => Some(ProtocolType::DataSync),
            0x0103 => Some(ProtocolType::FileUpload),
            _ => None,
        }
    }
}

impl From<ProtocolType> for u16 {
    fn from(ty: ProtocolType) -> Self {
        ty.id()
    }
}

impl TryFrom<u16> for ProtocolType {
    type Error = u16;

    fn try_from(id: u16) -> std::result::Result<Self, Self::Error> {
        ProtocolType::from_id(id).ok_or(id)
    }
}

impl fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#06x})", self.name(), self.id())
    }
}

/// Look up the registered name for an identifier
pub fn type_of(id: u16) -> Option<ProtocolType> {
    ProtocolType::from_id(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_contiguous() {
        let fields = [
            (layout::MAGIC_OFFSET, layout::MAGIC_LENGTH),
            (layout::VERSION_OFFSET, layout::VERSION_LENGTH),
            (layout::PROTOCOL_ID_OFFSET, layout::PROTOCOL_ID_LENGTH),
            (layout::ENCODING_OFFSET, layout::ENCODING_LENGTH),
            (layout::ENCRYPTION_OFFSET, layout::ENCRYPTION_LENGTH),
            (layout::BODY_LENGTH_OFFSET, layout::BODY_LENGTH_LENGTH),
            (layout::TIMESTAMP_OFFSET, layout::TIMESTAMP_LENGTH),
            (layout::RESERVED_OFFSET, layout::RESERVED_LENGTH),
        ];
        let mut next = 0;
        for (offset, len) in fields {
            assert_eq!(offset, next);
            next += len;
        }
        assert_eq!(next, HEADER_LENGTH);
        assert_eq!(layout::BODY_OFFSET, HEADER_LENGTH);
        assert_eq!(MAX_PACKET_LENGTH, 65565);
    }

    #[test]
    fn test_range_boundaries() {
        assert!(!is_system(0x0000));
        assert!(is_system(0x0001));
        assert!(is_system(0x00FF));
        assert!(!is_system(0x0100));

        assert!(is_business(0x0100));
        assert!(is_business(0x0FFF));
        assert!(!is_business(0x1000));

        assert!(is_extension(0x1000));
        assert!(is_extension(0x7FFF));
        assert!(!is_extension(0x8000));

        assert_eq!(ProtocolCategory::of(0x0000), None);
        assert_eq!(ProtocolCategory::of(0x8000), None);
        assert_eq!(ProtocolCategory::of(0xFFFF), None);
    }

    #[test]
    fn test_every_id_has_at_most_one_category() {
        for id in 0..=u16::MAX {
            let hits = [is_system(id), is_business(id), is_extension(id)]
                .into_iter()
                .filter(|hit| *hit)
                .count();
            assert!(hits <= 1, "{id:#06x} in {hits} categories");
            assert_eq!(hits == 1, ProtocolCategory::of(id).is_some());
            if let Some(category) = ProtocolCategory::of(id) {
                assert!(category.range().contains(&id));
            }
        }
    }

    #[test]
    fn test_named_types_stay_inside_their_category() {
        for ty in ProtocolType::ALL {
            assert_eq!(ProtocolCategory::of(ty.id()), Some(ty.category()));
            assert_eq!(type_of(ty.id()), Some(ty));
            assert_eq!(ProtocolType::try_from(ty.id()), Ok(ty));
        }

        let named = (0..=u16::MAX).filter(|id| type_of(*id).is_some()).count();
        assert_eq!(named, ProtocolType::ALL.len());
    }

    #[test]
    fn test_in_range_but_unnamed() {
        assert!(is_system(0x0042));
        assert_eq!(type_of(0x0042), None);
        assert!(is_extension(0x1234));
        assert_eq!(type_of(0x1234), None);
        assert_eq!(ProtocolType::try_from(0x0000), Err(0x0000));
    }

    #[test]
    fn test_names() {
        assert_eq!(ProtocolType::Heartbeat.name(), "heartbeat");
        assert_eq!(ProtocolType::UserLogin.id(), 0x0100);
        assert_eq!(u16::from(ProtocolType::FileUpload), 0x0103);
        assert_eq!(ProtocolType::Ack.to_string(), "ack (0x0005)");
        assert_eq!(ProtocolCategory::Business.to_string(), "business");
    }
}
