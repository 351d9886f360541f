//! Memory-mapped register access over `/dev/mem`
//!
//! All unsafe volatile access is isolated in this module. A [`RegisterWindow`]
//! owns one mapping of a contiguous span of 32-bit hardware registers;
//! offsets are validated once when a [`Reg`] handle is created, and every
//! access through a handle is a single volatile load or store. Volatile
//! semantics matter here: the receive-data register pops the hardware queue
//! on read, so an access must never be cached, coalesced, or elided.

use crate::error::{Error, Result};
use memmap2::{MmapMut, MmapOptions};
use std::fs::OpenOptions;
use std::marker::PhantomData;
use std::os::unix::fs::OpenOptionsExt;
use std::ptr;

const REGISTER_BYTES: usize = 4;

/// Validated handle to one register of a [`RegisterWindow`]
///
/// Carries the resolved register address, so an access can never combine a
/// foreign offset with the wrong base; the lifetime keeps the mapping alive
/// for as long as any handle exists. Handles are cheap to copy.
#[derive(Debug, Clone, Copy)]
pub struct Reg<'a> {
    ptr: *mut u32,
    _window: PhantomData<&'a RegisterWindow>,
}

// Handles move with their single thread of control; the pointed-to cells are
// hardware registers, not aliased program memory.
unsafe impl Send for Reg<'_> {}

impl Reg<'_> {
    /// Volatile read of the register
    #[inline]
    pub fn read(self) -> u32 {
        unsafe { ptr::read_volatile(self.ptr) }
    }

    /// Volatile write of the register
    #[inline]
    pub fn write(self, value: u32) {
        unsafe { ptr::write_volatile(self.ptr, value) }
    }
}

/// Mapping of a physical register span, addressed by 32-bit word offset
pub struct RegisterWindow {
    base: *mut u32,
    span_words: usize,
    phys_base: u64,
    // Keeps the mapping alive for as long as `base` is dereferenced.
    _map: MmapMut,
}

// The window is exclusively owned by its single thread of control; the raw
// base pointer is never shared or aliased.
unsafe impl Send for RegisterWindow {}

impl RegisterWindow {
    /// Map `span_bytes` of physical address space starting at `phys_base`.
    ///
    /// Requires privileged access to `/dev/mem`; the file is opened with
    /// `O_SYNC` so the mapping is uncached device memory. Any failure here
    /// (permissions, invalid address, mapping rejected) is fatal at startup:
    /// the condition will not change without operator intervention.
    pub fn open(phys_base: u64, span_bytes: usize) -> Result<Self> {
        if span_bytes == 0 || span_bytes % REGISTER_BYTES != 0 {
            return Err(Error::InvalidParameter(format!(
                "window size must be a non-zero multiple of {} bytes, got {}",
                REGISTER_BYTES, span_bytes
            )));
        }
        let page_size = page_size();
        if phys_base % page_size != 0 {
            return Err(Error::InvalidParameter(format!(
                "physical base {:#x} is not aligned to the {} byte page size",
                phys_base, page_size
            )));
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open("/dev/mem")
            .map_err(|e| Error::Map(format!("open /dev/mem: {}", e)))?;

        let mut map = unsafe {
            MmapOptions::new()
                .offset(phys_base)
                .len(span_bytes)
                .map_mut(&file)
        }
        .map_err(|e| {
            Error::Map(format!(
                "mmap {} bytes at {:#x}: {}",
                span_bytes, phys_base, e
            ))
        })?;

        let base = map.as_mut_ptr() as *mut u32;
        log::info!(
            "Mapped register window: {:#x} ({} bytes)",
            phys_base,
            span_bytes
        );

        Ok(RegisterWindow {
            base,
            span_words: span_bytes / REGISTER_BYTES,
            phys_base,
            _map: map,
        })
    }

    /// Validate a word offset and return a handle for unchecked access.
    ///
    /// Bounds are checked here, once, so reads on the hot path carry no
    /// per-access check.
    pub fn reg(&self, word_offset: usize) -> Result<Reg<'_>> {
        if word_offset >= self.span_words {
            return Err(Error::OutOfRange {
                offset: word_offset,
                span: self.span_words,
            });
        }
        Ok(Reg {
            ptr: unsafe { self.base.add(word_offset) },
            _window: PhantomData,
        })
    }

    /// Physical base address of the mapping
    pub fn phys_base(&self) -> u64 {
        self.phys_base
    }

    /// Window size in 32-bit words
    pub fn span_words(&self) -> usize {
        self.span_words
    }

    /// Window over anonymous memory, for tests that need register semantics
    /// without hardware.
    #[cfg(test)]
    pub(crate) fn map_anon(span_bytes: usize) -> Self {
        let mut map = MmapMut::map_anon(span_bytes).unwrap();
        let base = map.as_mut_ptr() as *mut u32;
        RegisterWindow {
            base,
            span_words: span_bytes / REGISTER_BYTES,
            phys_base: 0,
            _map: map,
        }
    }
}

fn page_size() -> u64 {
    // sysconf cannot fail for _SC_PAGESIZE on any supported platform
    unsafe { libc::sysconf(libc::_SC_PAGESIZE) as u64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reg_rejects_out_of_range_offset() {
        let window = RegisterWindow::map_anon(16);
        assert!(window.reg(3).is_ok());
        assert!(matches!(
            window.reg(4),
            Err(Error::OutOfRange { offset: 4, span: 4 })
        ));
        assert!(window.reg(10).is_err());
    }

    #[test]
    fn read_write_round_trip() {
        let window = RegisterWindow::map_anon(64);
        let reg = window.reg(5).unwrap();
        reg.write(0xCAFE_F00D);
        assert_eq!(reg.read(), 0xCAFE_F00D);
    }

    #[test]
    fn handles_stay_bound_to_their_window() {
        let big = RegisterWindow::map_anon(4096);
        let small = RegisterWindow::map_anon(16);

        // A small window cannot issue a handle past its own span, so no
        // handle can ever reach memory the bounds check did not cover.
        assert!(small.reg(10).is_err());

        // A handle from one window always accesses that window's cells,
        // whatever else is mapped.
        let big_reg = big.reg(10).unwrap();
        let small_reg = small.reg(2).unwrap();
        big_reg.write(0x1111_1111);
        small_reg.write(0x2222_2222);
        assert_eq!(big_reg.read(), 0x1111_1111);
        assert_eq!(small_reg.read(), 0x2222_2222);
    }
}
