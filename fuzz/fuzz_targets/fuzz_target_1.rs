#![no_main]

use datagram_frame::Packet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz packet decoding - test for panics, crashes, infinite loops
    if let Ok(packet) = Packet::decode(data) {
        // Anything that decodes must serialize back to the same bytes
        let bytes = packet.encode().expect("decoded packet re-encodes");
        assert_eq!(&bytes[..], data);
        let _ = packet.is_valid();
    }
});
