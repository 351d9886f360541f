//! Receive FIFO draining
//!
//! [`SampleFifo`] abstracts the occupancy/data register pair of the hardware
//! receive queue so the blocking reader can be driven by the real peripheral
//! ([`AxiFifo`]) or a scripted source ([`MockFifo`]) in tests.

pub mod axi;
pub mod mock;

pub use axi::AxiFifo;
pub use mock::MockFifo;

/// Occupancy/data access over a hardware receive FIFO
pub trait SampleFifo: Send {
    /// Number of words currently waiting in the queue (0 = empty)
    fn occupancy(&mut self) -> u32;

    /// Pop the next word from the queue
    ///
    /// Only meaningful after `occupancy` reported a non-zero value; popping
    /// an empty hardware queue returns undefined data.
    fn pop_word(&mut self) -> u32;
}

/// Blocking word reader over any [`SampleFifo`]
pub struct FifoReader<F: SampleFifo> {
    fifo: F,
}

impl<F: SampleFifo> FifoReader<F> {
    /// Wrap a FIFO in a blocking reader
    pub fn new(fifo: F) -> Self {
        FifoReader { fifo }
    }

    /// Block until a word is available, then pop and return it.
    ///
    /// This is a deliberate busy-wait, not a sleep/backoff loop: the hardware
    /// queue has finite depth, and any software delay while it fills loses
    /// samples with no recovery path. Latency wins over CPU efficiency here.
    pub fn next_word(&mut self) -> u32 {
        while self.fifo.occupancy() == 0 {
            std::hint::spin_loop();
        }
        self.fifo.pop_word()
    }
}
