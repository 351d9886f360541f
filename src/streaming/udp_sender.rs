//! UDP frame transmitter (fire-and-forget unicast)
//!
//! One connectionless socket bound at startup, one fixed destination for the
//! life of the process. No acknowledgment, no retransmission: a stale frame
//! has no value in a continuous real-time stream.

use super::FrameSink;
use crate::error::{Error, Result};
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

/// UDP sender bound to one fixed destination
pub struct UdpFrameSender {
    socket: UdpSocket,
    dest: SocketAddr,
}

impl UdpFrameSender {
    /// Create the socket for a resolved destination.
    ///
    /// Socket creation failure is fatal at startup.
    pub fn open(dest: SocketAddr) -> Result<Self> {
        // Send-only socket; any local port will do
        let socket = UdpSocket::bind("0.0.0.0:0")
            .map_err(|e| Error::Other(format!("Failed to create UDP socket: {}", e)))?;
        Ok(UdpFrameSender { socket, dest })
    }

    /// Resolve an address/port pair once, at startup.
    ///
    /// Accepts IPv4/IPv6 literals or resolvable hostnames; failure is fatal.
    pub fn resolve(addr: &str, port: u16) -> Result<SocketAddr> {
        (addr, port)
            .to_socket_addrs()
            .map_err(|e| Error::BadDestination(format!("{}:{}: {}", addr, port, e)))?
            .next()
            .ok_or_else(|| {
                Error::BadDestination(format!("{}:{} resolved to no address", addr, port))
            })
    }

    /// Destination this sender is bound to
    pub fn destination(&self) -> SocketAddr {
        self.dest
    }
}

impl FrameSink for UdpFrameSender {
    fn send(&mut self, frame: &[u8]) -> Result<()> {
        let written = self.socket.send_to(frame, self.dest)?;
        if written != frame.len() {
            return Err(Error::ShortSend {
                written,
                expected: frame.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn resolve_accepts_ip_literal() {
        let addr = UdpFrameSender::resolve("127.0.0.1", 5005).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:5005");
    }

    #[test]
    fn resolve_rejects_garbage() {
        assert!(UdpFrameSender::resolve("not an address", 5005).is_err());
    }

    #[test]
    fn sends_one_datagram_per_frame() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let dest = receiver.local_addr().unwrap();

        let mut sender = UdpFrameSender::open(dest).unwrap();
        sender.send(&[1, 2, 3, 4]).unwrap();

        let mut buf = [0u8; 16];
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..len], &[1, 2, 3, 4]);
    }
}
