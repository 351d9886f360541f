//! TarangIO - radio receive FIFO to UDP streaming daemon
//!
//! Maps the FIFO register window, then streams fixed-length I/Q frames to
//! one destination until terminated. Startup failures exit non-zero; send
//! failures during streaming are logged and tolerated.

use std::env;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tarang_io::config::Config;
use tarang_io::error::Result;
use tarang_io::fifo::AxiFifo;
use tarang_io::mmio::RegisterWindow;
use tarang_io::streaming::frame::frame_len;
use tarang_io::streaming::UdpFrameSender;
use tarang_io::Streamer;

struct Args {
    dest_addr: String,
    dest_port: u16,
    config_path: Option<String>,
}

fn usage(program: &str) {
    eprintln!("Usage: {} <dest_addr> <dest_port> [--config <path>]", program);
}

/// Parse the two positional arguments plus the optional config flag.
///
/// Supports:
/// - `tarang-io <dest_addr> <dest_port>`
/// - `tarang-io <dest_addr> <dest_port> --config <path>` (or `-c`)
fn parse_args(args: &[String]) -> Option<Args> {
    let mut positional = Vec::new();
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            if i + 1 >= args.len() {
                return None;
            }
            config_path = Some(args[i + 1].clone());
            i += 2;
        } else {
            positional.push(args[i].clone());
            i += 1;
        }
    }

    if positional.len() != 2 {
        return None;
    }

    // Port 0 is not a sendable destination
    let dest_port: u16 = match positional[1].parse() {
        Ok(p) if p > 0 => p,
        _ => {
            eprintln!("Invalid port: {} (expected 1-65535)", positional[1]);
            return None;
        }
    };

    Some(Args {
        dest_addr: positional[0].clone(),
        dest_port,
        config_path,
    })
}

fn run(args: Args, config: Config) -> Result<()> {
    // Resolve the destination before touching any hardware resource
    let dest = UdpFrameSender::resolve(&args.dest_addr, args.dest_port)?;

    let window = RegisterWindow::open(config.hardware.fifo_base_address, config.hardware.map_bytes)?;
    let fifo = AxiFifo::new(&window)?;
    let sender = UdpFrameSender::open(dest)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| tarang_io::Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let samples = config.framing.samples_per_frame;
    log::info!(
        "Streaming {}-byte frames ({} samples) to {} - Ctrl-C to stop",
        frame_len(samples),
        samples,
        dest
    );

    let mut streamer = Streamer::new(fifo, sender, samples);
    streamer.run(&running);

    log::info!("TarangIO stopped");
    Ok(())
}

fn main() {
    let argv: Vec<String> = env::args().collect();
    let Some(args) = parse_args(&argv) else {
        usage(&argv[0]);
        process::exit(1);
    };

    // Config is loaded before the logger so its level can seed the filter
    let config = match &args.config_path {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    // RUST_LOG still wins; the config level is only the fallback
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if let Some(path) = &args.config_path {
        log::info!("Using config: {}", path);
    }

    if let Err(e) = run(args, config) {
        log::error!("{}", e);
        process::exit(1);
    }
}
