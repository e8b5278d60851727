#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Edge-case tests for framing reliability
//! Tests boundary conditions, malformed datagrams and every rejection path

use datagram_frame::core::checksum;
use datagram_frame::core::header::Header;
use datagram_frame::core::packet::{self, Packet};
use datagram_frame::core::registry::{
    layout, CHECKSUM_LENGTH, HEADER_LENGTH, MAGIC, MAX_BODY_LENGTH, MIN_PACKET_LENGTH,
};
use datagram_frame::error::ProtocolError;

// ============================================================================
// CONCRETE SCENARIOS
// ============================================================================

#[test]
fn test_heartbeat_wire_bytes() {
    let bytes = packet::encode(0x0001, b"").expect("encode heartbeat");

    assert_eq!(bytes.len(), 29);
    assert_eq!(&bytes[0..4], &[0x12, 0x34, 0x56, 0x78]);
    assert_eq!(bytes[4], 0x01);
    assert_eq!(&bytes[5..7], &[0x00, 0x01]);
    assert_eq!(&bytes[9..13], &[0x00, 0x00, 0x00, 0x00]);
    assert_eq!(&bytes[21..25], &[0x00, 0x00, 0x00, 0x00]);

    let expected = checksum::checksum(&bytes[..HEADER_LENGTH]);
    assert_eq!(&bytes[25..29], &expected.to_be_bytes());
}

#[test]
fn test_28_bytes_never_decode() {
    let patterns: [[u8; 28]; 3] = [[0x00; 28], [0xFF; 28], {
        let mut almost = [0u8; 28];
        almost.copy_from_slice(&packet::encode(1, b"").unwrap()[..28]);
        almost
    }];

    for bytes in patterns {
        match Packet::decode(&bytes) {
            Err(ProtocolError::TruncatedInput {
                expected: 29,
                actual: 28,
            }) => {}
            other => panic!("expected TruncatedInput, got {other:?}"),
        }
    }
}

// ============================================================================
// LENGTH EDGE CASES
// ============================================================================

#[test]
fn test_every_short_prefix_is_truncated() {
    let bytes = packet::encode(0x0102, &[0x42; 64]).unwrap();
    for len in 0..bytes.len() {
        let err = Packet::decode(&bytes[..len]).expect_err("prefix must not decode");
        assert!(
            matches!(err, ProtocolError::TruncatedInput { .. }),
            "len {len}: {err:?}"
        );
    }
}

#[test]
fn test_body_length_boundaries() {
    for size in [0usize, 1, MAX_BODY_LENGTH - 1, MAX_BODY_LENGTH] {
        let body = vec![0xAB; size];
        let bytes = packet::encode(0x0100, &body).unwrap();
        assert_eq!(bytes.len(), HEADER_LENGTH + size + CHECKSUM_LENGTH);

        let decoded = packet::decode(&bytes).unwrap();
        assert!(decoded.is_valid(), "size {size}");
        assert_eq!(decoded.body(), &body[..]);
    }

    assert!(matches!(
        Header::new(0x0100, MAX_BODY_LENGTH + 1),
        Err(ProtocolError::BodyLengthOutOfRange { length, max })
            if length == MAX_BODY_LENGTH + 1 && max == MAX_BODY_LENGTH
    ));
}

#[test]
fn test_declared_length_above_maximum_is_rejected_by_validation() {
    // A body of 65537 bytes can only arrive from a foreign encoder; build it by hand.
    let body = vec![0u8; MAX_BODY_LENGTH + 1];
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&MAGIC.to_be_bytes());
    bytes.push(0x01);
    bytes.extend_from_slice(&1u16.to_be_bytes());
    bytes.extend_from_slice(&[0, 0]);
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&0u64.to_be_bytes());
    bytes.extend_from_slice(&[0; 4]);
    assert_eq!(bytes.len(), HEADER_LENGTH);
    bytes.extend_from_slice(&body);
    let crc = checksum::checksum(&bytes);
    bytes.extend_from_slice(&crc.to_be_bytes());

    let packet = Packet::decode(&bytes).expect("structurally decodable");
    assert!(packet.verify());
    assert!(!packet.header().valid_body_length());
    assert!(!packet.is_valid());
    assert!(matches!(
        packet.check(),
        Err(ProtocolError::BodyLengthOutOfRange { length: 65537, .. })
    ));
}

#[test]
fn test_trailing_garbage_is_a_length_mismatch() {
    let mut bytes = packet::encode(3, b"abc").unwrap().to_vec();
    bytes.push(0);
    assert!(matches!(
        Packet::decode(&bytes),
        Err(ProtocolError::BodyLengthMismatch {
            declared: 3,
            actual: 4
        })
    ));
}

// ============================================================================
// HEADER EDGE CASES
// ============================================================================

#[test]
fn test_foreign_magic_decodes_but_fails_validation() {
    let mut bytes = packet::encode(1, b"x").unwrap().to_vec();
    bytes[layout::MAGIC_OFFSET..layout::MAGIC_OFFSET + 4].copy_from_slice(b"HTTP");

    let packet = Packet::decode(&bytes).expect("structure is intact");
    assert!(!packet.header().valid_magic());
    assert!(matches!(
        packet.check(),
        Err(ProtocolError::InvalidMagic(0x4854_5450))
    ));
}

#[test]
fn test_header_decode_reencode_reproduces_bytes() {
    for id in [0x0001u16, 0x00FF, 0x0100, 0x0FFF, 0x1000, 0x7FFF, 0xFFFF] {
        let bytes = packet::encode(id, &[1, 2, 3]).unwrap();
        let header = Header::decode(&bytes).unwrap();
        assert_eq!(&header.encode().unwrap()[..], &bytes[..HEADER_LENGTH]);
    }
}

#[test]
fn test_decoded_packet_checksum_uses_reencoded_header() {
    let bytes = packet::encode(0x0101, b"logout").unwrap();
    let packet = Packet::decode(&bytes).unwrap();

    let len = bytes.len();
    let trailer = u32::from_be_bytes(bytes[len - 4..].try_into().unwrap());
    assert_eq!(packet.declared_checksum(), Some(trailer));
    assert_eq!(packet.computed_checksum().unwrap(), trailer);
    assert_eq!(
        checksum::checksum(&bytes[..len - CHECKSUM_LENGTH]),
        trailer
    );
}

// ============================================================================
// CORRUPTION
// ============================================================================

#[test]
fn test_every_single_bit_flip_is_caught() {
    let original = packet::encode(0x0103, b"file chunk #1").unwrap();

    for byte in 0..original.len() {
        for bit in 0..8 {
            let mut corrupted = original.to_vec();
            corrupted[byte] ^= 1 << bit;

            let accepted = match Packet::decode(&corrupted) {
                Ok(packet) => packet.is_valid(),
                Err(_) => false,
            };
            assert!(!accepted, "flip of byte {byte} bit {bit} went unnoticed");
        }
    }
}

#[test]
fn test_empty_input() {
    assert!(matches!(
        Packet::decode(&[]),
        Err(ProtocolError::TruncatedInput {
            expected: MIN_PACKET_LENGTH,
            actual: 0
        })
    ));
    assert!(matches!(
        Header::decode(&[]),
        Err(ProtocolError::TruncatedInput {
            expected: HEADER_LENGTH,
            actual: 0
        })
    ));
}
