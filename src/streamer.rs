//! Acquisition loop: FIFO words → frames → UDP
//!
//! Single-threaded by design. There is one producer (hardware), one consumer
//! (this loop), and one sink (the socket); frame counters stay monotonic
//! because nothing else ever touches them. The only suspension point is the
//! busy-wait inside [`FifoReader::next_word`].

use crate::error::Error;
use crate::fifo::{FifoReader, SampleFifo};
use crate::streaming::frame::{encode_frame_into, frame_len};
use crate::streaming::FrameSink;
use std::sync::atomic::{AtomicBool, Ordering};

/// Continuous acquisition-and-framing pipeline
///
/// Owns the sequence counter and all per-cycle buffers; multiple independent
/// instances (for example over simulated streams) never interfere.
pub struct Streamer<F: SampleFifo, S: FrameSink> {
    reader: FifoReader<F>,
    sink: S,
    samples_per_frame: usize,
    counter: u32,
    words: Vec<u32>,
    frame: Vec<u8>,
}

impl<F: SampleFifo, S: FrameSink> Streamer<F, S> {
    /// Build a streamer over an opened FIFO and frame sink
    pub fn new(fifo: F, sink: S, samples_per_frame: usize) -> Self {
        Streamer {
            reader: FifoReader::new(fifo),
            sink,
            samples_per_frame,
            counter: 0,
            words: Vec::with_capacity(samples_per_frame),
            frame: Vec::with_capacity(frame_len(samples_per_frame)),
        }
    }

    /// Sequence counter of the next frame to be sent
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// One full cycle: collect N words, encode, send, advance the counter.
    ///
    /// A send failure is transient: it is logged and the counter still
    /// advances, so the receiver sees a gap rather than a stale duplicate.
    /// The counter is never rolled back.
    pub fn run_cycle(&mut self) {
        self.words.clear();
        for _ in 0..self.samples_per_frame {
            self.words.push(self.reader.next_word());
        }

        encode_frame_into(self.counter, &self.words, &mut self.frame);

        match self.sink.send(&self.frame) {
            Ok(()) => log::trace!("Sent frame {} ({} bytes)", self.counter, self.frame.len()),
            Err(Error::ShortSend { written, expected }) => {
                log::warn!(
                    "Frame {} truncated by transport ({}/{} bytes)",
                    self.counter,
                    written,
                    expected
                );
            }
            Err(e) => log::warn!("Frame {} send failed: {}", self.counter, e),
        }

        self.counter = self.counter.wrapping_add(1);
    }

    /// Stream until `running` clears.
    ///
    /// The flag is checked only between frames, never inside the per-word
    /// wait, so shutdown cannot truncate a frame mid-assembly.
    pub fn run(&mut self, running: &AtomicBool) {
        while running.load(Ordering::Relaxed) {
            self.run_cycle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::fifo::MockFifo;
    use crate::streaming::frame::encode_frame;
    use std::sync::{Arc, Mutex};

    /// Records every frame; fails the cycles listed in `fail_on`.
    #[derive(Clone, Default)]
    struct RecordingSink {
        frames: Arc<Mutex<Vec<Vec<u8>>>>,
        fail_on: Arc<Mutex<Vec<u32>>>,
        attempts: Arc<Mutex<u32>>,
    }

    impl RecordingSink {
        fn frames(&self) -> Vec<Vec<u8>> {
            self.frames.lock().unwrap().clone()
        }
    }

    impl FrameSink for RecordingSink {
        fn send(&mut self, frame: &[u8]) -> Result<()> {
            let attempt = {
                let mut attempts = self.attempts.lock().unwrap();
                let n = *attempts;
                *attempts += 1;
                n
            };
            if self.fail_on.lock().unwrap().contains(&attempt) {
                return Err(Error::ShortSend {
                    written: frame.len() / 2,
                    expected: frame.len(),
                });
            }
            self.frames.lock().unwrap().push(frame.to_vec());
            Ok(())
        }
    }

    #[test]
    fn cycle_packs_words_in_acquisition_order() {
        let fifo = MockFifo::new();
        fifo.push_words(&[0x0001_0002, 0x0003_0004]);
        let sink = RecordingSink::default();

        let mut streamer = Streamer::new(fifo, sink.clone(), 2);
        streamer.run_cycle();

        let frames = sink.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0], encode_frame(0, &[0x0001_0002, 0x0003_0004]));
        assert_eq!(streamer.counter(), 1);
    }

    #[test]
    fn counter_advances_across_cycles() {
        let fifo = MockFifo::new();
        fifo.push_words(&[10, 20, 30]);
        let sink = RecordingSink::default();

        let mut streamer = Streamer::new(fifo, sink.clone(), 1);
        streamer.run_cycle();
        streamer.run_cycle();
        streamer.run_cycle();

        let frames = sink.frames();
        assert_eq!(frames[0], encode_frame(0, &[10]));
        assert_eq!(frames[1], encode_frame(1, &[20]));
        assert_eq!(frames[2], encode_frame(2, &[30]));
    }

    #[test]
    fn send_failure_does_not_stop_or_repeat() {
        let fifo = MockFifo::new();
        let words: Vec<u32> = (0..256 * 3).collect();
        fifo.push_words(&words);

        let sink = RecordingSink::default();
        // Frame 1 hits a partial write
        sink.fail_on.lock().unwrap().push(1);

        let mut streamer = Streamer::new(fifo, sink.clone(), 256);
        streamer.run_cycle();
        streamer.run_cycle();
        streamer.run_cycle();

        // Frame 1 is gone for good; frame 2 carries counter 2, not a retry
        let frames = sink.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[0][..4], &0u32.to_le_bytes());
        assert_eq!(&frames[1][..4], &2u32.to_le_bytes());
        assert_eq!(streamer.counter(), 3);
    }

    #[test]
    fn counter_wraps_to_zero() {
        let fifo = MockFifo::new();
        fifo.push_words(&[1, 2]);
        let sink = RecordingSink::default();

        let mut streamer = Streamer::new(fifo, sink.clone(), 1);
        streamer.counter = u32::MAX;
        streamer.run_cycle();
        assert_eq!(streamer.counter(), 0);
        streamer.run_cycle();

        let frames = sink.frames();
        assert_eq!(&frames[0][..4], &u32::MAX.to_le_bytes());
        assert_eq!(&frames[1][..4], &0u32.to_le_bytes());
    }
}
