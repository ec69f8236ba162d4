//! Display memory layer for the PRU-driven scoreboard
//!
//! This crate answers one question for the renderer: where do I write
//! display bytes? The answer is a single writable region of
//! `display_size + 1` bytes (content plus one trailing control byte),
//! zero-initialized, address-stable for the life of the process, backed
//! either by RAM shared with the scoreboard PRU or by an ordinary
//! in-process buffer.
//!
//! # Architecture
//!
//! ```text
//! DisplayMapper            - selects and owns the provider, once
//!   ├── PruDisplay         - real PRU via libprussdrv (feature "pru")
//!   │     bring-up: init → open → map → zero → event fd → intc → firmware
//!   │     teardown: PRU left running, only the event fd is closed
//!   └── VirtualDisplay     - zeroed heap buffer, no hardware, no globals
//! ```
//!
//! Selection is two-axis: the `pru` cargo feature marks a device-capable
//! build, the `has_pru_display` constructor flag marks a unit that actually
//! has the panel. A non-`pru` build asserts the flag is false.
//!
//! # Usage
//!
//! ```rust
//! use scoreline_display::{DisplayMapper, DisplayMemory};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mapper = DisplayMapper::new(256, false)?;
//!
//! // The renderer writes frames through the raw pointer from here on.
//! let frame = mapper.get();
//! unsafe { frame.as_ptr().write(b'A') };
//! # Ok(())
//! # }
//! ```
//!
//! The returned region is intentionally unsynchronized shared memory; see
//! [`DisplayMemory`] for the contract. Everything above it - what the bytes
//! mean, when frames are written - is the renderer's business, not this
//! crate's.

pub mod error;
pub mod mapper;
pub mod provider;
pub mod virt;

#[cfg(feature = "pru")]
pub mod pru;

// Re-export public API
pub use error::{Error, Result};
pub use mapper::DisplayMapper;
pub use provider::DisplayMemory;
pub use virt::VirtualDisplay;

#[cfg(feature = "pru")]
pub use pru::PruDisplay;
