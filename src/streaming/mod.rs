//! UDP streaming for acquired I/Q frames

pub mod frame;
pub mod udp_sender;

pub use udp_sender::UdpFrameSender;

use crate::error::Result;

/// Sink for completed frames, one datagram per call
///
/// Implementations attempt exactly one best-effort transmission; the caller
/// decides what a failure means (the acquisition loop logs and moves on).
pub trait FrameSink: Send {
    /// Send one complete frame
    fn send(&mut self, frame: &[u8]) -> Result<()>;
}
