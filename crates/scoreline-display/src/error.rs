//! Error types for display memory bring-up
//!
//! Every variant is a construction-time failure of the PRU-backed provider;
//! once a provider exists, `get()` cannot fail. The selector never catches
//! or retries these - bring-up either fully succeeds or is a fatal startup
//! condition for the caller.

/// Result type for display memory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while binding the PRU display
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Process-wide prussdrv initialization failed
    #[error("pru-display: prussdrv subsystem initialization failed")]
    SubsystemInit,

    /// Opening the host interrupt event device failed
    #[error("pru-display: failed to open host interrupt {host_interrupt}")]
    InterruptOpen { host_interrupt: u32 },

    /// Mapping the shared PRU RAM bank failed
    #[error("pru-display: failed to map PRU memory region {ram_id}")]
    MemoryMap { ram_id: u32 },

    /// Programming the PRUSS interrupt controller failed
    #[error("pru-display: interrupt controller configuration failed")]
    IntcInit,

    /// Loading the firmware data image failed
    #[error("pru-display: failed to load data image \"{path}\" into PRU {pru}")]
    DataLoad { pru: i32, path: &'static str },

    /// Loading or starting the firmware program image failed
    #[error("pru-display: failed to exec program image \"{path}\" on PRU {pru}")]
    ProgramLoad { pru: i32, path: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_load_error_names_slot_and_path() {
        let err = Error::DataLoad {
            pru: 1,
            path: "/lib/firmware/pru-display/data.bin",
        };
        let message = err.to_string();
        assert!(message.contains("PRU 1"));
        assert!(message.contains("/lib/firmware/pru-display/data.bin"));
    }

    #[test]
    fn program_load_error_names_slot_and_path() {
        let err = Error::ProgramLoad {
            pru: 1,
            path: "/lib/firmware/pru-display/text.bin",
        };
        let message = err.to_string();
        assert!(message.contains("PRU 1"));
        assert!(message.contains("/lib/firmware/pru-display/text.bin"));
    }

    #[test]
    fn interrupt_error_names_host_interrupt() {
        let err = Error::InterruptOpen { host_interrupt: 1 };
        assert!(err.to_string().contains('1'));
    }
}
