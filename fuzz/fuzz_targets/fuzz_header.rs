#![no_main]

use datagram_frame::Header;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header decode never reads past 25 bytes and re-encodes losslessly
    if let Ok(header) = Header::decode(data) {
        let bytes = header.encode().expect("decoded header re-encodes");
        assert_eq!(&bytes[..], &data[..bytes.len()]);
        let _ = header.validate();
    }
});
