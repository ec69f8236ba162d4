//! Display memory capability trait
//!
//! This trait defines the one contract both providers implement: hand out a
//! writable pointer to the display buffer. Providers differ only in where
//! the bytes live (PRU shared RAM vs an in-process allocation), never in
//! what the caller may do with them.

use std::ptr::NonNull;

/// Writable display memory of at least `display_size + 1` bytes.
///
/// The final byte past the display content is the control byte; the renderer
/// addresses everything by raw byte offset.
///
/// # Memory model
///
/// The region behind the returned pointer is shared and unsynchronized. On
/// the hardware path the PRU reads it concurrently with the renderer's
/// writes, with no locking and no ordering guarantees. A torn frame is
/// acceptable and self-corrects on the next write. Do not wrap the buffer in
/// a lock; the race is part of the contract.
///
/// # Lifetime
///
/// The pointer is valid for as long as the provider is alive and must not be
/// retained past it.
pub trait DisplayMemory {
    /// Pointer to byte 0 of the display buffer.
    ///
    /// Idempotent: every call on the same provider returns the same address.
    /// Never fails - by the time a provider exists, its buffer does too.
    fn get(&self) -> NonNull<u8>;
}
