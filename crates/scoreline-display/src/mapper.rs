//! Display mapper: selects and owns the display memory provider
//!
//! The mapper decides exactly once, at construction, which provider backs
//! the display buffer. Selection has two axes:
//!
//! - the `pru` cargo feature - whether this build targets the real device;
//! - `has_pru_display` - whether this particular unit has the PRU panel.
//!
//! A build without the `pru` feature asserts that hardware was not
//! requested; there is no silent fallback to the virtual provider, in
//! either direction, and no retry on bring-up failure - that policy belongs
//! to the caller.

use std::ptr::NonNull;

use crate::error::Result;
use crate::provider::DisplayMemory;
use crate::virt::VirtualDisplay;

#[cfg(feature = "pru")]
use crate::pru::PruDisplay;

/// The one provider alive per mapper. Closed set: no third backing store is
/// anticipated, so variants are matched exhaustively rather than dispatched
/// through a boxed trait object.
enum Provider {
    #[cfg(feature = "pru")]
    Pru(PruDisplay),
    Virtual(VirtualDisplay),
}

/// Owner of the display buffer for the life of the process.
///
/// Constructed once at startup; there is no resize, no re-bind, and no
/// hot-swap between providers. Callers treat [`get()`](DisplayMemory::get)
/// as opaque shared memory and must not retain the pointer past the mapper.
pub struct DisplayMapper {
    display_size: usize,
    provider: Provider,
}

impl DisplayMapper {
    /// Build the provider for `display_size` content bytes.
    ///
    /// `display_size == 0` is accepted and yields the 1-byte control
    /// buffer.
    ///
    /// # Panics
    ///
    /// In a build without the `pru` feature, `has_pru_display` must be
    /// `false`; requesting hardware a build cannot drive is a precondition
    /// violation, not a recoverable error.
    ///
    /// # Errors
    ///
    /// Propagates PRU bring-up failures unchanged; see
    /// [`Error`](crate::error::Error).
    pub fn new(display_size: usize, has_pru_display: bool) -> Result<Self> {
        let provider = Self::select(display_size, has_pru_display)?;
        Ok(Self {
            display_size,
            provider,
        })
    }

    #[cfg(feature = "pru")]
    fn select(display_size: usize, has_pru_display: bool) -> Result<Provider> {
        if has_pru_display {
            let pru = PruDisplay::new(display_size)?;
            tracing::debug!(display_size, "selected PRU display provider");
            Ok(Provider::Pru(pru))
        } else {
            tracing::debug!(display_size, "selected virtual display provider");
            Ok(Provider::Virtual(VirtualDisplay::new(display_size)))
        }
    }

    #[cfg(not(feature = "pru"))]
    fn select(display_size: usize, has_pru_display: bool) -> Result<Provider> {
        assert!(
            !has_pru_display,
            "pru-display: hardware requested in a build without the `pru` feature"
        );
        tracing::debug!(display_size, "selected virtual display provider");
        Ok(Provider::Virtual(VirtualDisplay::new(display_size)))
    }

    /// Total buffer length in bytes (`display_size + 1`, the trailing byte
    /// being the control byte).
    pub fn size_bytes(&self) -> usize {
        self.display_size + 1
    }
}

impl DisplayMemory for DisplayMapper {
    fn get(&self) -> NonNull<u8> {
        match &self.provider {
            #[cfg(feature = "pru")]
            Provider::Pru(pru) => pru.get(),
            Provider::Virtual(virt) => virt.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_mapper_reports_control_byte_in_size() {
        let mapper = DisplayMapper::new(32, false).unwrap();
        assert_eq!(mapper.size_bytes(), 33);
    }

    #[test]
    fn zero_display_size_does_not_panic() {
        let mapper = DisplayMapper::new(0, false).unwrap();
        assert_eq!(mapper.size_bytes(), 1);
    }

    #[cfg(not(feature = "pru"))]
    #[test]
    #[should_panic(expected = "without the `pru` feature")]
    fn hardware_request_without_pru_feature_is_a_precondition_violation() {
        let _ = DisplayMapper::new(32, true);
    }
}
