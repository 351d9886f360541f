//! FIFO validation tool: drain a fixed number of words and discard them.
//!
//! Confirms the register window and receive queue are alive before the
//! streaming daemon is pointed at them. The default count corresponds to
//! ten seconds of 48 kHz complex samples.

use std::env;
use std::process;
use std::time::Instant;
use tarang_io::config::Config;
use tarang_io::error::Result;
use tarang_io::fifo::{AxiFifo, FifoReader};
use tarang_io::mmio::RegisterWindow;

const DEFAULT_TARGET_WORDS: u64 = 480_000;

fn usage(program: &str) {
    eprintln!("Usage: {} [word_count] [--config <path>]", program);
}

fn run(target_words: u64, config: Config) -> Result<()> {
    let window = RegisterWindow::open(config.hardware.fifo_base_address, config.hardware.map_bytes)?;
    let fifo = AxiFifo::new(&window)?;
    let mut reader = FifoReader::new(fifo);

    log::info!("Draining {} words from the receive FIFO...", target_words);
    let start = Instant::now();
    for _ in 0..target_words {
        // Read and discard; this is a validation pass, not acquisition
        let _ = reader.next_word();
    }
    let elapsed = start.elapsed();

    let rate = target_words as f64 / elapsed.as_secs_f64();
    println!(
        "Read {} words in {:.3} s ({:.0} words/s)",
        target_words,
        elapsed.as_secs_f64(),
        rate
    );
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut target_words = DEFAULT_TARGET_WORDS;
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            if i + 1 >= args.len() {
                usage(&args[0]);
                process::exit(1);
            }
            config_path = Some(args[i + 1].clone());
            i += 2;
        } else {
            match args[i].parse() {
                Ok(n) => target_words = n,
                Err(_) => {
                    usage(&args[0]);
                    process::exit(1);
                }
            }
            i += 1;
        }
    }

    let config = match config_path {
        Some(path) => match Config::load(&path) {
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

    if let Err(e) = run(target_words, config) {
        log::error!("{}", e);
        process::exit(1);
    }
}
