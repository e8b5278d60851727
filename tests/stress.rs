use bytes::BytesMut;
use datagram_frame::core::codec::PacketCodec;
use datagram_frame::core::packet::Packet;
use tokio_util::codec::Encoder;

#[test]
#[allow(clippy::unwrap_used)]
fn stress_packet_encode_decode_large_series() {
    // Heavy burst of packets across the full body range, no panics
    let mut codec = PacketCodec::default();
    let mut buf = BytesMut::new();

    for size in [0usize, 1, 64, 512, 4096, 65536] {
        for _ in 0..1_000 {
            let p = codec.packet(1, vec![0u8; size]).unwrap();
            codec.encode(p, &mut buf).unwrap();
            let decoded = Packet::decode(&buf).unwrap();
            assert!(decoded.is_valid());
            buf.clear();
        }
    }
}
