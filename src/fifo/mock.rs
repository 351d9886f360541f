//! Mock FIFO for testing
//!
//! Drives the blocking reader with deterministic occupancy sequences so unit
//! tests never need real hardware or real-time delay.

use super::SampleFifo;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scriptable in-memory FIFO
///
/// Clones share state, so a test can hold one handle for assertions while
/// the reader owns another.
#[derive(Clone, Default)]
pub struct MockFifo {
    inner: Arc<Mutex<MockFifoInner>>,
}

#[derive(Default)]
struct MockFifoInner {
    /// Occupancy readings consumed before falling back to the queue length
    occupancy_script: VecDeque<u32>,
    words: VecDeque<u32>,
    polls: u64,
}

impl MockFifo {
    /// Create an empty mock FIFO
    pub fn new() -> Self {
        Self::default()
    }

    /// Append words to the simulated queue
    pub fn push_words(&self, words: &[u32]) {
        let mut inner = self.inner.lock().unwrap();
        inner.words.extend(words.iter().copied());
    }

    /// Script the next occupancy readings, overriding the queue length
    pub fn script_occupancy(&self, readings: &[u32]) {
        let mut inner = self.inner.lock().unwrap();
        inner.occupancy_script.extend(readings.iter().copied());
    }

    /// Number of occupancy polls observed so far
    pub fn poll_count(&self) -> u64 {
        self.inner.lock().unwrap().polls
    }

    /// Words still waiting in the simulated queue
    pub fn remaining(&self) -> usize {
        self.inner.lock().unwrap().words.len()
    }
}

impl SampleFifo for MockFifo {
    fn occupancy(&mut self) -> u32 {
        let mut inner = self.inner.lock().unwrap();
        inner.polls += 1;
        match inner.occupancy_script.pop_front() {
            Some(scripted) => scripted,
            None => inner.words.len() as u32,
        }
    }

    fn pop_word(&mut self) -> u32 {
        let mut inner = self.inner.lock().unwrap();
        inner.words.pop_front().unwrap_or(0)
    }
}
