//! # Packet Codec
//!
//! [`tokio_util::codec`] adapter over the packet envelope, for use with a
//! caller-owned `UdpFramed` (one packet per datagram) or `Framed` stream.
//!
//! ## Decoding
//! 1. Wait until a full header is buffered
//! 2. Decode and check the header before waiting for the body, so an
//!    oversized `bodyLength` is refused without buffering anything
//! 3. Wait for `25 + bodyLength + 4` bytes, then split off exactly one frame
//! 4. Run the full packet check (when checksum verification is enabled)
//!
//! Every rejected frame is logged at `warn` with its error kind, counted in
//! [`Metrics`], dropped from the read buffer and returned as an error.
//! Nothing is retried. A rejected header discards the whole buffer: one
//! datagram is one frame, and a stream has no marker to resync on.

use std::sync::Arc;

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};

use crate::config::CodecConfig;
use crate::core::header::Header;
use crate::core::packet::Packet;
use crate::core::registry::{
    ProtocolCategory, CHECKSUM_LENGTH, HEADER_LENGTH, MAX_BODY_LENGTH, MIN_PACKET_LENGTH,
};
use crate::error::{ProtocolError, Result};
use crate::utils::metrics::Metrics;
use crate::utils::time;

/// Configured encoder/decoder for whole packets
#[derive(Debug, Clone)]
pub struct PacketCodec {
    config: CodecConfig,
    metrics: Arc<Metrics>,
    /// Length of the screened frame at the front of the buffer, while its
    /// body is still arriving
    pending_frame: Option<usize>,
}

impl Default for PacketCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl PacketCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self::with_metrics(config, Arc::new(Metrics::new()))
    }

    /// Share a metrics collector between several codecs
    pub fn with_metrics(config: CodecConfig, metrics: Arc<Metrics>) -> Self {
        Self {
            config,
            metrics,
            pending_frame: None,
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Effective body limit: the configured cap, never above the protocol maximum
    pub fn max_body_length(&self) -> usize {
        self.config.max_body_length.min(MAX_BODY_LENGTH)
    }

    /// Build an outbound packet stamped with the configured encoding and
    /// encryption tags.
    ///
    /// # Errors
    /// - `BodyLengthOutOfRange` if `body` exceeds the configured cap
    /// - `UnknownCategory` if category enforcement is on and `protocol_id`
    ///   is outside every range
    pub fn packet(&self, protocol_id: u16, body: impl Into<Vec<u8>>) -> Result<Packet> {
        let body = body.into();
        self.check_limits(protocol_id, body.len())?;

        let header = Header::new(protocol_id, body.len())?
            .with_encoding(self.config.encoding)
            .with_encryption(self.config.encryption);
        Packet::with_header(header, body)
    }

    fn check_limits(&self, protocol_id: u16, body_length: usize) -> Result<()> {
        let max = self.max_body_length();
        if body_length > max {
            return Err(ProtocolError::BodyLengthOutOfRange {
                length: body_length,
                max,
            });
        }
        if self.config.require_known_category && ProtocolCategory::of(protocol_id).is_none() {
            return Err(ProtocolError::UnknownCategory(protocol_id));
        }
        Ok(())
    }

    fn screen_header(&self, bytes: &[u8]) -> Result<Header> {
        let header = Header::decode(bytes)?;
        header.check()?;
        self.check_limits(header.protocol_id(), header.body_length())?;
        Ok(header)
    }

    fn reject(&self, error: ProtocolError) -> ProtocolError {
        warn!(kind = error.kind(), error = %error, "Dropping packet");
        self.metrics.packet_rejected(&error);
        error
    }
}

impl Decoder for PacketCodec {
    type Item = Packet;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Packet>> {
        if src.len() < HEADER_LENGTH {
            self.pending_frame = None;
            return Ok(None);
        }

        let header = match self.screen_header(&src[..HEADER_LENGTH]) {
            Ok(header) => header,
            Err(e) => {
                self.pending_frame = None;
                src.clear();
                return Err(self.reject(e));
            }
        };

        let frame_len = HEADER_LENGTH + header.body_length() + CHECKSUM_LENGTH;
        if src.len() < frame_len {
            self.pending_frame = Some(frame_len);
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        self.pending_frame = None;
        let frame = src.split_to(frame_len);
        let packet = Packet::decode(&frame).map_err(|e| self.reject(e))?;
        if self.config.verify_checksum {
            packet.check().map_err(|e| self.reject(e))?;
        }

        self.metrics.packet_decoded(frame_len);
        debug!(
            protocol_id = packet.protocol_id(),
            body_length = packet.body().len(),
            age_ms = ?time::age_millis(header.timestamp()).ok(),
            "Packet accepted"
        );
        Ok(Some(packet))
    }

    /// At end of input (or end of a datagram) any leftover bytes are a
    /// truncated frame; they are discarded and reported.
    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Packet>> {
        match self.decode(buf)? {
            Some(packet) => Ok(Some(packet)),
            None if buf.is_empty() => Ok(None),
            None => {
                let actual = buf.len();
                let expected = self.pending_frame.take().unwrap_or(MIN_PACKET_LENGTH);
                buf.clear();
                Err(self.reject(ProtocolError::TruncatedInput { expected, actual }))
            }
        }
    }
}

impl Encoder<Packet> for PacketCodec {
    type Error = ProtocolError;

    fn encode(&mut self, packet: Packet, dst: &mut BytesMut) -> Result<()> {
        self.check_limits(packet.protocol_id(), packet.body().len())?;

        let bytes = packet.encode()?;
        dst.reserve(bytes.len());
        dst.extend_from_slice(&bytes);

        self.metrics.packet_encoded(bytes.len());
        debug!(
            protocol_id = packet.protocol_id(),
            encoded_len = bytes.len(),
            "Packet encoded"
        );
        Ok(())
    }
}
