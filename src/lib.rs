//! TarangIO - real-time I/Q streaming from a memory-mapped radio FIFO
//!
//! Drains the receive FIFO of a radio peripheral through memory-mapped
//! registers and republishes the samples as fixed-length UDP frames.
//!
//! Pipeline, leaf first:
//!
//! - [`mmio`]: bounds-checked volatile access over the register windows
//! - [`fifo`]: blocking busy-wait reader over the occupancy/data registers
//! - [`radio`]: tuner and streaming-gate setup (off the hot path)
//! - [`streaming`]: frame wire format and the fire-and-forget UDP sender
//! - [`streamer`]: the acquisition loop tying reading to transmission

pub mod config;
pub mod error;
pub mod fifo;
pub mod mmio;
pub mod radio;
pub mod streamer;
pub mod streaming;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use streamer::Streamer;
