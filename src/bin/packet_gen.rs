//! Synthetic test-traffic generator.
//!
//! Sends a burst of fixed-length datagrams shaped like real frames (4-byte
//! little-endian counter up front, 1028 bytes total) so a receiver can be
//! exercised without any radio hardware. The payload past the counter is a
//! greeting plus `'1'` filler, not sample data.

use std::env;
use std::net::UdpSocket;
use std::process;
use std::thread;
use std::time::Duration;

const DEFAULT_PORT: u16 = 25344;
const PACKET_SIZE: usize = 1028;
const MESSAGE: &[u8] = b"Hello from the tarang packet generator";

fn usage(program: &str) {
    eprintln!("Usage: {} <dest_addr> <packet_count> [port]", program);
}

/// Fill one synthetic packet: LE counter, message, then '1' padding
fn build_packet(packet: &mut [u8; PACKET_SIZE], counter: u32) {
    packet[..4].copy_from_slice(&counter.to_le_bytes());
    packet[4..4 + MESSAGE.len()].copy_from_slice(MESSAGE);
    for byte in packet[4 + MESSAGE.len()..].iter_mut() {
        *byte = b'1';
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        usage(&args[0]);
        process::exit(1);
    }

    let dest_addr = &args[1];
    let count: u32 = match args[2].parse() {
        Ok(n) if n > 0 => n,
        _ => {
            eprintln!("Invalid packet count: {}", args[2]);
            process::exit(1);
        }
    };
    let port: u16 = match args.get(3) {
        Some(p) => match p.parse() {
            Ok(p) if p > 0 => p,
            _ => {
                eprintln!("Invalid port: {}", p);
                process::exit(1);
            }
        },
        None => DEFAULT_PORT,
    };

    let socket = match UdpSocket::bind("0.0.0.0:0") {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to create UDP socket: {}", e);
            process::exit(1);
        }
    };

    log::info!("Sending {} packets to {}:{}...", count, dest_addr, port);

    let mut packet = [0u8; PACKET_SIZE];
    for counter in 0..count {
        build_packet(&mut packet, counter);
        if let Err(e) = socket.send_to(&packet, (dest_addr.as_str(), port)) {
            log::warn!("Packet {} send failed: {}", counter, e);
        }
        // Pace the burst so a slow receiver is not flooded
        thread::sleep(Duration::from_millis(1));
    }

    log::info!("Finished sending {} packets", count);
}
