//! Configuration for TarangIO
//!
//! Loads hardware and framing parameters from a TOML file. The streaming
//! destination is always given on the command line; the config file covers
//! everything that is fixed per board rather than per run.

use crate::error::{Error, Result};
use crate::fifo::axi::RX_DATA_OFFSET;
use crate::streaming::frame::DEFAULT_SAMPLES_PER_FRAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub hardware: HardwareConfig,
    #[serde(default)]
    pub framing: FramingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hardware configuration (register window placement)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HardwareConfig {
    /// Physical base address of the receive FIFO register window
    #[serde(default = "default_fifo_base")]
    pub fifo_base_address: u64,
    /// Physical base address of the radio tuner register window
    #[serde(default = "default_radio_base")]
    pub radio_base_address: u64,
    /// Physical base address of the FIFO-enable GPIO window
    #[serde(default = "default_gpio_base")]
    pub stream_gpio_address: u64,
    /// Size of each mapped window in bytes (page aligned)
    #[serde(default = "default_map_bytes")]
    pub map_bytes: usize,
}

fn default_fifo_base() -> u64 {
    0x43C1_0000
}

fn default_radio_base() -> u64 {
    0x43C0_0000
}

fn default_gpio_base() -> u64 {
    0x4120_0000
}

fn default_map_bytes() -> usize {
    4096
}

/// Framing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FramingConfig {
    /// Complex samples per UDP frame
    ///
    /// Tunable: balances datagram size against transport MTU and per-frame
    /// latency. The reference value of 256 yields 1028-byte datagrams.
    pub samples_per_frame: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        HardwareConfig {
            fifo_base_address: default_fifo_base(),
            radio_base_address: default_radio_base(),
            stream_gpio_address: default_gpio_base(),
            map_bytes: default_map_bytes(),
        }
    }
}

impl Default for FramingConfig {
    fn default() -> Self {
        FramingConfig {
            samples_per_frame: DEFAULT_SAMPLES_PER_FRAME,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the hardware cannot satisfy
    pub fn validate(&self) -> Result<()> {
        if self.framing.samples_per_frame == 0 {
            return Err(Error::InvalidParameter(
                "samples_per_frame must be at least 1".to_string(),
            ));
        }
        let required = (RX_DATA_OFFSET + 1) * 4;
        if self.hardware.map_bytes < required {
            return Err(Error::InvalidParameter(format!(
                "map_bytes {} too small to cover the data register ({} bytes required)",
                self.hardware.map_bytes, required
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_hardware() {
        let config = Config::default();
        assert_eq!(config.hardware.fifo_base_address, 0x43C1_0000);
        assert_eq!(config.hardware.radio_base_address, 0x43C0_0000);
        assert_eq!(config.hardware.stream_gpio_address, 0x4120_0000);
        assert_eq!(config.hardware.map_bytes, 4096);
        assert_eq!(config.framing.samples_per_frame, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_round_trip() {
        let toml_content = r#"
[hardware]
fifo_base_address = 0x43C10000
map_bytes = 4096

[framing]
samples_per_frame = 128

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.hardware.fifo_base_address, 0x43C1_0000);
        assert_eq!(config.framing.samples_per_frame, 128);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config = toml::from_str("[framing]\nsamples_per_frame = 64\n").unwrap();
        assert_eq!(config.framing.samples_per_frame, 64);
        assert_eq!(config.hardware.map_bytes, 4096);

        // A partial [hardware] section keeps defaults for the other windows
        let config: Config =
            toml::from_str("[hardware]\nfifo_base_address = 0x10000000\n").unwrap();
        assert_eq!(config.hardware.fifo_base_address, 0x1000_0000);
        assert_eq!(config.hardware.radio_base_address, 0x43C0_0000);
        assert_eq!(config.hardware.stream_gpio_address, 0x4120_0000);
    }

    #[test]
    fn zero_samples_rejected() {
        let config: Config = toml::from_str("[framing]\nsamples_per_frame = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn window_must_cover_data_register() {
        let config: Config = toml::from_str("[hardware]\nfifo_base_address = 0x43C10000\nmap_bytes = 16\n").unwrap();
        assert!(config.validate().is_err());
    }
}
