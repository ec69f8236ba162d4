//! Virtual display provider
//!
//! Drop-in substitute for the PRU path on development hosts and in tests:
//! same sizing, same zero-initialization, no hardware and no process-global
//! state. The returned pointer addresses an ordinary heap allocation that
//! nothing else reads.

use std::cell::UnsafeCell;
use std::ptr::NonNull;

use crate::provider::DisplayMemory;

/// In-process stand-in for the PRU display memory.
///
/// Owns a zeroed buffer of exactly `display_size + 1` bytes (display content
/// plus the control byte). Unlike the hardware path there is no second
/// reader, but the buffer sits behind `UnsafeCell` because callers write
/// through the raw pointer while holding only a shared borrow of the
/// provider.
pub struct VirtualDisplay {
    buf: UnsafeCell<Box<[u8]>>,
}

impl VirtualDisplay {
    /// Allocate a zeroed buffer for `display_size` content bytes plus the
    /// control byte.
    pub fn new(display_size: usize) -> Self {
        Self {
            buf: UnsafeCell::new(vec![0u8; display_size + 1].into_boxed_slice()),
        }
    }

    /// Total buffer length in bytes (`display_size + 1`).
    pub fn size_bytes(&self) -> usize {
        // SAFETY: shared read of the slice length; the allocation is never
        // resized.
        unsafe { (&(*self.buf.get())).len() }
    }
}

impl DisplayMemory for VirtualDisplay {
    fn get(&self) -> NonNull<u8> {
        // SAFETY: the boxed slice is non-empty (len >= 1) and its allocation
        // is stable for the life of `self`.
        unsafe { NonNull::new_unchecked((*self.buf.get()).as_mut_ptr()) }
    }
}

// The buffer moves with its owner; there is no interior sharing across
// threads (the provider is !Sync via UnsafeCell).
unsafe impl Send for VirtualDisplay {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_zeroed_including_control_byte() {
        let display = VirtualDisplay::new(16);
        assert_eq!(display.size_bytes(), 17);

        let ptr = display.get();
        for i in 0..17 {
            let byte = unsafe { ptr.as_ptr().add(i).read() };
            assert_eq!(byte, 0, "byte {i} not zeroed");
        }
    }

    #[test]
    fn zero_display_size_yields_one_byte() {
        let display = VirtualDisplay::new(0);
        assert_eq!(display.size_bytes(), 1);
        unsafe {
            display.get().as_ptr().write(0xA5);
            assert_eq!(display.get().as_ptr().read(), 0xA5);
        }
    }

    #[test]
    fn pointer_is_stable() {
        let display = VirtualDisplay::new(8);
        assert_eq!(display.get(), display.get());
    }
}
