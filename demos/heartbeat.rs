//! Example: Framing and inspecting packets
//!
//! Encodes a few packets, decodes them back, and shows how corrupted or
//! foreign datagrams are rejected.
//!
//! Run with: `cargo run --example heartbeat`

#![allow(clippy::uninlined_format_args)]

use datagram_frame::config::LoggingConfig;
use datagram_frame::core::packet::{self, Packet};
use datagram_frame::core::registry::{ProtocolCategory, ProtocolType};
use datagram_frame::utils::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&LoggingConfig::default())?;

    println!("=== Datagram Framing Demo ===\n");

    // 1. Heartbeat with an empty body
    let heartbeat = packet::encode(ProtocolType::Heartbeat.id(), b"")?;
    println!("1. HEARTBEAT");
    println!("   - Wire size: {} bytes", heartbeat.len());
    println!("   - Bytes: {:02x?}\n", &heartbeat[..]);

    // 2. Business packet round trip
    let login = packet::encode(ProtocolType::UserLogin.id(), br#"{"user":"alice"}"#)?;
    let decoded = packet::decode(&login)?;
    println!("2. USER LOGIN");
    println!("   - Type: {:?}", decoded.protocol_type());
    println!("   - Category: {:?}", decoded.header().category());
    println!("   - Body: {}", String::from_utf8_lossy(decoded.body()));
    println!("   - Valid: {}\n", decoded.is_valid());

    // 3. Unnamed extension id
    let ext = packet::encode(0x1234, &[0xDE, 0xAD])?;
    let ext = Packet::decode(&ext)?;
    println!("3. EXTENSION 0x1234");
    println!(
        "   - Category: {:?}, named: {:?}\n",
        ProtocolCategory::of(ext.protocol_id()),
        ext.protocol_type()
    );

    // 4. Corruption in transit
    let mut corrupted = login.to_vec();
    corrupted[30] ^= 0x01;
    let damaged = Packet::decode(&corrupted)?;
    println!("4. CORRUPTED BODY");
    match damaged.check() {
        Ok(()) => println!("   - Unexpectedly valid"),
        Err(e) => println!("   - Rejected ({}): {}", e.kind(), e),
    }

    // 5. Too short to be a packet
    println!("\n5. SHORT DATAGRAM");
    match Packet::decode(&login[..28]) {
        Ok(_) => println!("   - Unexpectedly decoded"),
        Err(e) => println!("   - Rejected ({}): {}", e.kind(), e),
    }

    Ok(())
}
