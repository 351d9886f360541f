//! Radio tuner setup tool.
//!
//! Programs the fake-ADC and tuner DDS frequencies, gates sample flow into
//! the receive FIFO, and prints the register readback. Run this before
//! pointing the streaming daemon at the FIFO.

use std::env;
use std::process;
use tarang_io::config::Config;
use tarang_io::error::Result;
use tarang_io::mmio::RegisterWindow;
use tarang_io::radio::{RadioTuner, StreamGate};

struct Args {
    adc_freq_hz: f64,
    tune_freq_hz: f64,
    streaming: bool,
    config_path: Option<String>,
}

fn usage(program: &str) {
    eprintln!(
        "Usage: {} <adc_freq_hz> <tune_freq_hz> [--stream] [--config <path>]",
        program
    );
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut positional = Vec::new();
    let mut streaming = false;
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        if args[i] == "--stream" {
            streaming = true;
            i += 1;
        } else if args[i] == "--config" || args[i] == "-c" {
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
    let adc_freq_hz: f64 = positional[0].parse().ok()?;
    let tune_freq_hz: f64 = positional[1].parse().ok()?;

    Some(Args {
        adc_freq_hz,
        tune_freq_hz,
        streaming,
        config_path,
    })
}

fn run(args: Args, config: Config) -> Result<()> {
    let tuner_window =
        RegisterWindow::open(config.hardware.radio_base_address, config.hardware.map_bytes)?;
    let gpio_window =
        RegisterWindow::open(config.hardware.stream_gpio_address, config.hardware.map_bytes)?;

    let tuner = RadioTuner::new(&tuner_window)?;
    let gate = StreamGate::new(&gpio_window)?;

    log::info!(
        "Tuning: ADC {:.3} Hz, tuner {:.3} Hz, streaming {}",
        args.adc_freq_hz,
        args.tune_freq_hz,
        if args.streaming { "enabled" } else { "disabled" }
    );

    tuner.set_adc_frequency(args.adc_freq_hz);
    tuner.set_tune_frequency(args.tune_freq_hz);
    gate.set_enabled(args.streaming);

    println!("Fake ADC PINC = 0x{:08X}", tuner.adc_pinc());
    println!("Tuner PINC    = 0x{:08X}", tuner.tuner_pinc());
    println!(
        "Streaming is {}",
        if gate.is_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );
    Ok(())
}

fn main() {
    let argv: Vec<String> = env::args().collect();
    let Some(args) = parse_args(&argv) else {
        usage(&argv[0]);
        process::exit(1);
    };

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

    if let Err(e) = run(args, config) {
        log::error!("{}", e);
        process::exit(1);
    }
}
