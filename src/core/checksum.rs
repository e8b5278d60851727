//! # Checksum Validator
//!
//! CRC-32 (IEEE) over arbitrary byte spans, used as the packet trailer over
//! `header || body`.
//!
//! The checksum only detects accidental corruption and truncation. It is not a
//! MAC and offers no protection against deliberate tampering.
//!
//! The empty span checksums to `0`.

use crc32fast::Hasher;

/// Checksum of a single span.
#[inline]
pub fn checksum(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

/// Checksum of `first || second` without allocating the concatenation.
#[inline]
pub fn checksum_concat(first: &[u8], second: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(first);
    hasher.update(second);
    hasher.finalize()
}

/// `true` when `bytes` checksums to `expected`.
pub fn verify(bytes: &[u8], expected: u32) -> bool {
    checksum(bytes) == expected
}

/// `true` when `first || second` checksums to `expected`.
pub fn verify_concat(first: &[u8], second: &[u8], expected: u32) -> bool {
    checksum_concat(first, second) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(checksum(&[]), 0);
        assert_eq!(checksum_concat(&[], &[]), 0);
    }

    #[test]
    fn test_known_vector() {
        // Standard CRC-32/ISO-HDLC check value
        assert_eq!(checksum(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_concat_matches_contiguous() {
        let data = b"header-bytes-then-the-body";
        for split in 0..=data.len() {
            let (a, b) = data.split_at(split);
            assert_eq!(checksum_concat(a, b), checksum(data), "split at {split}");
        }
    }

    #[test]
    fn test_verify_detects_single_bit_flip() {
        let data = vec![0x5Au8; 64];
        let crc = checksum(&data);
        assert!(verify(&data, crc));

        for byte in 0..data.len() {
            for bit in 0..8 {
                let mut corrupted = data.clone();
                corrupted[byte] ^= 1 << bit;
                assert!(!verify(&corrupted, crc));
            }
        }
    }

    #[test]
    fn test_verify_concat() {
        let crc = checksum(b"abcdef");
        assert!(verify_concat(b"abc", b"def", crc));
        assert!(!verify_concat(b"abc", b"deg", crc));
    }
}
