//! Observability and Metrics
//!
//! Counters for encode/decode traffic and for every kind of rejected frame.
//!
//! Uses atomic counters for thread-safe metrics collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::ProtocolError;

/// Codec metrics collector
#[derive(Debug)]
pub struct Metrics {
    /// Packets serialized
    pub packets_encoded: AtomicU64,
    /// Packets decoded and accepted
    pub packets_decoded: AtomicU64,
    /// Bytes written by the encoder
    pub bytes_encoded: AtomicU64,
    /// Bytes consumed by accepted packets
    pub bytes_decoded: AtomicU64,
    /// Frames shorter than their fixed or declared length
    pub truncated: AtomicU64,
    /// Bad magic, version or tag bytes
    pub invalid_header: AtomicU64,
    /// Body length out of range or mismatched
    pub body_length_errors: AtomicU64,
    /// Checksum mismatches
    pub checksum_failures: AtomicU64,
    /// Any other rejection
    pub other_errors: AtomicU64,
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            packets_encoded: AtomicU64::new(0),
            packets_decoded: AtomicU64::new(0),
            bytes_encoded: AtomicU64::new(0),
            bytes_decoded: AtomicU64::new(0),
            truncated: AtomicU64::new(0),
            invalid_header: AtomicU64::new(0),
            body_length_errors: AtomicU64::new(0),
            checksum_failures: AtomicU64::new(0),
            other_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record an encoded packet
    pub fn packet_encoded(&self, byte_count: usize) {
        self.packets_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_encoded
            .fetch_add(byte_count as u64, Ordering::Relaxed);
    }

    /// Record an accepted inbound packet
    pub fn packet_decoded(&self, byte_count: usize) {
        self.packets_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_decoded
            .fetch_add(byte_count as u64, Ordering::Relaxed);
    }

    /// Record a rejected frame under the counter for its error kind
    pub fn packet_rejected(&self, error: &ProtocolError) {
        let counter = match error {
            ProtocolError::TruncatedInput { .. } => &self.truncated,
            ProtocolError::InvalidMagic(_)
            | ProtocolError::UnsupportedVersion(_)
            | ProtocolError::UnknownEncoding(_)
            | ProtocolError::UnknownEncryption(_)
            | ProtocolError::MalformedReserved(_) => &self.invalid_header,
            ProtocolError::BodyLengthOutOfRange { .. }
            | ProtocolError::BodyLengthMismatch { .. } => &self.body_length_errors,
            ProtocolError::ChecksumMismatch { .. } => &self.checksum_failures,
            _ => &self.other_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        debug!(kind = error.kind(), "Rejected frame counted");
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            packets_encoded: self.packets_encoded.load(Ordering::Relaxed),
            packets_decoded: self.packets_decoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            truncated: self.truncated.load(Ordering::Relaxed),
            invalid_header: self.invalid_header.load(Ordering::Relaxed),
            body_length_errors: self.body_length_errors.load(Ordering::Relaxed),
            checksum_failures: self.checksum_failures.load(Ordering::Relaxed),
            other_errors: self.other_errors.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            packets_encoded = snapshot.packets_encoded,
            packets_decoded = snapshot.packets_decoded,
            bytes_encoded = snapshot.bytes_encoded,
            bytes_decoded = snapshot.bytes_decoded,
            truncated = snapshot.truncated,
            invalid_header = snapshot.invalid_header,
            body_length_errors = snapshot.body_length_errors,
            checksum_failures = snapshot.checksum_failures,
            other_errors = snapshot.other_errors,
            uptime_seconds = snapshot.uptime_seconds,
            "Codec metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub packets_encoded: u64,
    pub packets_decoded: u64,
    pub bytes_encoded: u64,
    pub bytes_decoded: u64,
    pub truncated: u64,
    pub invalid_header: u64,
    pub body_length_errors: u64,
    pub checksum_failures: u64,
    pub other_errors: u64,
    pub uptime_seconds: u64,
}

impl MetricsSnapshot {
    /// Sum of every rejection counter
    pub fn rejected(&self) -> u64 {
        self.truncated
            + self.invalid_header
            + self.body_length_errors
            + self.checksum_failures
            + self.other_errors
    }
}

/// Global metrics instance (lazy static for simplicity)
static METRICS: once_cell::sync::Lazy<Metrics> = once_cell::sync::Lazy::new(Metrics::new);

/// Get the global metrics instance
pub fn global_metrics() -> &'static Metrics {
    &METRICS
}
