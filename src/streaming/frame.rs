//! I/Q frame wire format
//!
//! Each UDP datagram carries one fixed-length frame:
//!
//! ```text
//! ┌────────────────────┬──────────────────────────────────────┐
//! │ Counter (4 bytes)  │ N sample pairs (4 bytes each)        │
//! │ Little-endian u32  │ I (u16 LE) then Q (u16 LE) per pair  │
//! └────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! Each hardware word packs one complex sample: low 16 bits = I, high
//! 16 bits = Q. Both components are transported as raw bit patterns with no
//! sign extension; receivers reinterpret them as two's-complement i16. The
//! counter wraps at 2^32 and strictly increases across consecutive frames.

/// Bytes of the sequence-counter header
pub const HEADER_BYTES: usize = 4;
/// Bytes per I/Q sample pair on the wire
pub const BYTES_PER_SAMPLE: usize = 4;
/// Default samples per frame (1028-byte datagram, comfortably under MTU)
pub const DEFAULT_SAMPLES_PER_FRAME: usize = 256;

/// Total frame length for a given sample count
pub const fn frame_len(samples: usize) -> usize {
    HEADER_BYTES + samples * BYTES_PER_SAMPLE
}

/// Encode one frame into `buf`, reusing its allocation.
///
/// Pure transformation: total over all inputs, no hidden state. `buf` is
/// cleared first, so the hot loop reuses one buffer with zero allocation
/// once its capacity is established.
pub fn encode_frame_into(counter: u32, words: &[u32], buf: &mut Vec<u8>) {
    buf.clear();
    buf.reserve(frame_len(words.len()));
    buf.extend_from_slice(&counter.to_le_bytes());
    for &word in words {
        let i = (word & 0xFFFF) as u16;
        let q = (word >> 16) as u16;
        buf.extend_from_slice(&i.to_le_bytes());
        buf.extend_from_slice(&q.to_le_bytes());
    }
}

/// Encode one frame into a fresh buffer
pub fn encode_frame(counter: u32, words: &[u32]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(frame_len(words.len()));
    encode_frame_into(counter, words, &mut buf);
    buf
}
