//! PRU-backed display provider
//!
//! Binds the process to the scoreboard PRU and hands out a pointer into the
//! RAM bank the PRU's display routine scans out from. Bring-up is a fixed
//! sequence against `libprussdrv`; every step must succeed before the
//! provider exists.
//!
//! # Bring-up sequence
//!
//! ```text
//! prussdrv_init            - process-wide driver binding
//! prussdrv_open            - host interrupt PRU_EVTOUT_1
//! prussdrv_map_prumem      - shared DATARAM into our address space
//! zero display bytes       - no power-up noise on the panel
//! prussdrv_pru_event_fd    - retained for teardown
//! prussdrv_pruintc_init    - stock PRUSS_INTC_INITDATA routing
//! prussdrv_load_datafile   - /lib/firmware/pru-display/data.bin
//! prussdrv_exec_program    - /lib/firmware/pru-display/text.bin
//! ```
//!
//! # Teardown
//!
//! Deliberately asymmetric: the PRU is left running. Halting the scoreboard
//! PRU can freeze the column scan with LED outputs driven, which burns out
//! pixels over time; a running PRU is harmless. Only the event fd is closed.

use std::ffi::CStr;
use std::os::unix::io::RawFd;
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};
use crate::provider::DisplayMemory;

/// Host interrupt the display firmware signals on.
const HOST_INTERRUPT: libc::c_uint = prussdrv_sys::PRU_EVTOUT_1;

/// PRU core the display firmware occupies. PRU 0 is reserved for the line
/// I/O firmware.
const PRU_NUM: libc::c_int = 1;

/// RAM bank shared between the ARM and both PRU cores; the display firmware
/// scans its frame out of this bank.
const PRU_RAM_ID: libc::c_uint = prussdrv_sys::PRUSS0_SHARED_DATARAM;

/// Firmware data image, fixed install path. The C-string twin feeds the
/// loader; the `str` twin feeds diagnostics.
const DATA_FILE: &str = "/lib/firmware/pru-display/data.bin";
const DATA_FILE_C: &CStr = c"/lib/firmware/pru-display/data.bin";

/// Firmware program image, fixed install path.
const TEXT_FILE: &str = "/lib/firmware/pru-display/text.bin";
const TEXT_FILE_C: &CStr = c"/lib/firmware/pru-display/text.bin";

/// Sentinel returned by `prussdrv_pru_event_fd` when no event device is
/// open; nothing to close at teardown.
const NO_EVENT_FD: RawFd = -1;

/// prussdrv state is process-global: one init, one interrupt binding, one
/// mapping. At most one live `PruDisplay` per process, asserted rather than
/// locked since construction and teardown are single-threaded.
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Display memory backed by the real scoreboard PRU.
///
/// `get()` points into PRU shared RAM; the PRU reads those bytes
/// concurrently with the renderer's writes (see
/// [`DisplayMemory`](crate::provider::DisplayMemory) for the memory model).
pub struct PruDisplay {
    /// Base of the mapped shared RAM bank.
    shared_mem: NonNull<u8>,

    /// Event fd retained from bring-up, closed at teardown unless it is the
    /// sentinel.
    event_fd: RawFd,
}

impl PruDisplay {
    /// Bind the PRU and start the display firmware.
    ///
    /// # Panics
    ///
    /// Panics if another `PruDisplay` is alive in this process.
    ///
    /// # Errors
    ///
    /// Returns the first failing bring-up step; see [`Error`]. Bring-up is
    /// all-or-nothing - on failure no provider exists and the caller should
    /// treat it as a fatal startup condition. The process-global driver
    /// binding and mapping acquired before the failing step are left to
    /// process teardown (prussdrv offers no per-resource release); the event
    /// fd, if already obtained, is closed.
    pub fn new(display_size: usize) -> Result<Self> {
        assert!(
            !ACTIVE.swap(true, Ordering::AcqRel),
            "pru-display: at most one live PruDisplay per process"
        );

        match Self::bring_up(display_size) {
            Ok(display) => Ok(display),
            Err(err) => {
                ACTIVE.store(false, Ordering::Release);
                Err(err)
            }
        }
    }

    fn bring_up(display_size: usize) -> Result<Self> {
        // SAFETY: FFI into libprussdrv. The ACTIVE guard ensures no
        // concurrent or repeated binding of the process-global driver state.
        if unsafe { prussdrv_sys::prussdrv_init() } != 0 {
            return Err(Error::SubsystemInit);
        }

        if unsafe { prussdrv_sys::prussdrv_open(HOST_INTERRUPT) } != 0 {
            return Err(Error::InterruptOpen {
                host_interrupt: HOST_INTERRUPT,
            });
        }

        let mut mapped: *mut libc::c_void = ptr::null_mut();
        // SAFETY: prussdrv_map_prumem writes the mapping base through the
        // out-pointer on success.
        if unsafe { prussdrv_sys::prussdrv_map_prumem(PRU_RAM_ID, &mut mapped) } != 0 {
            return Err(Error::MemoryMap { ram_id: PRU_RAM_ID });
        }
        let shared_mem = NonNull::new(mapped.cast::<u8>()).ok_or(Error::MemoryMap { ram_id: PRU_RAM_ID })?;

        // Clear the display bytes and the control byte so the panel shows
        // nothing until the renderer's first frame.
        //
        // SAFETY: the shared DATARAM bank is 12KB, comfortably larger than
        // any configured display; the mapping is valid for the write.
        unsafe {
            ptr::write_bytes(shared_mem.as_ptr(), 0, display_size + 1);
        }

        // SAFETY: queries the fd of the event device opened above.
        let event_fd = unsafe { prussdrv_sys::prussdrv_pru_event_fd(HOST_INTERRUPT) };

        let initdata = prussdrv_sys::PRUSS_INTC_INITDATA;
        // SAFETY: initdata is a valid, fully initialized routing table.
        if unsafe { prussdrv_sys::prussdrv_pruintc_init(&initdata) } != 0 {
            close_event_fd(event_fd);
            return Err(Error::IntcInit);
        }

        // SAFETY: path is a valid NUL-terminated string for the life of the
        // call.
        if unsafe { prussdrv_sys::prussdrv_load_datafile(PRU_NUM, DATA_FILE_C.as_ptr()) } != 0 {
            close_event_fd(event_fd);
            return Err(Error::DataLoad {
                pru: PRU_NUM,
                path: DATA_FILE,
            });
        }

        // SAFETY: as above; on success the PRU starts executing the display
        // routine immediately.
        if unsafe { prussdrv_sys::prussdrv_exec_program(PRU_NUM, TEXT_FILE_C.as_ptr()) } != 0 {
            close_event_fd(event_fd);
            return Err(Error::ProgramLoad {
                pru: PRU_NUM,
                path: TEXT_FILE,
            });
        }

        tracing::info!(pru = PRU_NUM, "PRU enabled");

        Ok(Self { shared_mem, event_fd })
    }
}

impl DisplayMemory for PruDisplay {
    fn get(&self) -> NonNull<u8> {
        self.shared_mem
    }
}

impl Drop for PruDisplay {
    fn drop(&mut self) {
        // Never prussdrv_pru_disable() here: halting the scoreboard PRU can
        // leave LED columns driven, and driven outputs burn out pixels.
        tracing::info!(pru = PRU_NUM, "intentionally leaving PRU enabled");

        close_event_fd(self.event_fd);

        ACTIVE.store(false, Ordering::Release);
    }
}

/// Close the retained event fd, logging (never propagating) a failure.
/// Shared between bring-up rollback and drop; destructors must not fail.
fn close_event_fd(fd: RawFd) {
    if fd == NO_EVENT_FD {
        return;
    }

    // SAFETY: fd was returned by prussdrv for the event device this module
    // opened, and is closed exactly once.
    if unsafe { libc::close(fd) } == -1 {
        tracing::error!(fd, "failed to close PRU event fd");
    }
}
