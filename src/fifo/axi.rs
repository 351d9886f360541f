//! AXI-Stream FIFO receive-side register map
//!
//! The radio exposes its receive queue through two registers of the Xilinx
//! AXI-Stream FIFO core: the receive occupancy count (RDFO) and the receive
//! data register (RDFD). Reading the data register pops one word from the
//! hardware queue.

use super::SampleFifo;
use crate::error::Result;
use crate::mmio::{Reg, RegisterWindow};

/// Receive occupancy register (RDFO, byte offset 0x1C), in 32-bit words
pub const RX_OCCUPANCY_OFFSET: usize = 7;
/// Receive data register (RDFD, byte offset 0x20), in 32-bit words
pub const RX_DATA_OFFSET: usize = 8;

/// Hardware receive FIFO over a mapped register window
pub struct AxiFifo<'a> {
    occupancy: Reg<'a>,
    data: Reg<'a>,
}

impl<'a> AxiFifo<'a> {
    /// Bind the FIFO registers of a mapped window.
    ///
    /// Both register offsets are bounds-checked here, once; the streaming
    /// path does unchecked volatile reads through the validated handles.
    pub fn new(window: &'a RegisterWindow) -> Result<Self> {
        let occupancy = window.reg(RX_OCCUPANCY_OFFSET)?;
        let data = window.reg(RX_DATA_OFFSET)?;
        Ok(AxiFifo { occupancy, data })
    }
}

impl SampleFifo for AxiFifo<'_> {
    fn occupancy(&mut self) -> u32 {
        self.occupancy.read()
    }

    fn pop_word(&mut self) -> u32 {
        self.data.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_the_documented_register_pair() {
        let window = RegisterWindow::map_anon(4096);
        // Populate the cells the FIFO registers live in
        window.reg(RX_OCCUPANCY_OFFSET).unwrap().write(3);
        window.reg(RX_DATA_OFFSET).unwrap().write(0xAABB_CCDD);

        let mut fifo = AxiFifo::new(&window).unwrap();
        assert_eq!(fifo.occupancy(), 3);
        assert_eq!(fifo.pop_word(), 0xAABB_CCDD);
    }

    #[test]
    fn rejects_window_too_small_for_registers() {
        let window = RegisterWindow::map_anon(16);
        assert!(AxiFifo::new(&window).is_err());
    }
}
