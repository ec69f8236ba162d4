//! Raw FFI bindings to the TI PRUSS userspace driver (`libprussdrv`).
//!
//! Declarations mirror `prussdrv.h` and `pruss_intc_mapping.h` from the
//! am335x_pru_package. Only the surface the scoreboard display layer uses is
//! bound, plus the enable/disable pair so the deliberate decision *not* to
//! disable the PRU at teardown is made against a bound symbol, not a missing
//! one.
//!
//! All functions return `0` on success and a non-zero value on failure, per
//! the C library's convention. Nothing here is safe to call without a PRUSS
//! present; the `scoreline-display` crate wraps this behind its `pru`
//! feature.

#![allow(non_camel_case_types)]

use libc::{c_char, c_int, c_short, c_uint, c_void};

// ================================================================================================
// Host interrupts and memory regions (prussdrv.h)
// ================================================================================================

pub const PRU_EVTOUT_0: c_uint = 0;
pub const PRU_EVTOUT_1: c_uint = 1;

pub const PRUSS0_PRU0_DATARAM: c_uint = 0;
pub const PRUSS0_PRU1_DATARAM: c_uint = 1;
pub const PRUSS0_PRU0_IRAM: c_uint = 2;
pub const PRUSS0_PRU1_IRAM: c_uint = 3;
pub const PRUSS0_SHARED_DATARAM: c_uint = 4;

// ================================================================================================
// Interrupt controller mapping (pruss_intc_mapping.h)
// ================================================================================================

pub const NUM_PRU_SYS_EVTS: usize = 64;
pub const NUM_PRU_CHANNELS: usize = 10;

// System events
pub const PRU0_PRU1_INTERRUPT: c_short = 17;
pub const PRU1_PRU0_INTERRUPT: c_short = 18;
pub const PRU0_ARM_INTERRUPT: c_short = 19;
pub const PRU1_ARM_INTERRUPT: c_short = 20;
pub const ARM_PRU0_INTERRUPT: c_short = 21;
pub const ARM_PRU1_INTERRUPT: c_short = 22;

// Channels
pub const CHANNEL0: c_short = 0;
pub const CHANNEL1: c_short = 1;
pub const CHANNEL2: c_short = 2;
pub const CHANNEL3: c_short = 3;

// Hosts
pub const PRU0: c_short = 0;
pub const PRU1: c_short = 1;
pub const PRU_EVTOUT0: c_short = 2;
pub const PRU_EVTOUT1: c_short = 3;

pub const PRU0_HOSTEN_MASK: c_uint = 0x0001;
pub const PRU1_HOSTEN_MASK: c_uint = 0x0002;
pub const PRU_EVTOUT0_HOSTEN_MASK: c_uint = 0x0004;
pub const PRU_EVTOUT1_HOSTEN_MASK: c_uint = 0x0008;

/// System event to channel routing entry.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct tsysevt_to_channel_map {
    pub sysevt: c_short,
    pub channel: c_short,
}

/// Channel to host interrupt routing entry.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct tchannel_to_host_map {
    pub channel: c_short,
    pub host: c_short,
}

/// Interrupt controller initialization table, laid out exactly as the C
/// `tpruss_intc_initdata` struct expected by `prussdrv_pruintc_init`.
///
/// Entry lists are `-1`-terminated; unused tail entries are zero, matching
/// C aggregate initialization.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct tpruss_intc_initdata {
    pub sysevts_enabled: [c_char; NUM_PRU_SYS_EVTS],
    pub sysevt_to_channel_map: [tsysevt_to_channel_map; NUM_PRU_SYS_EVTS],
    pub channel_to_host_map: [tchannel_to_host_map; NUM_PRU_CHANNELS],
    pub host_enable_bitmask: c_uint,
}

/// The stock `PRUSS_INTC_INITDATA` routing table from
/// `pruss_intc_mapping.h`: PRU-to-PRU events on channels 0/1, PRU-to-ARM
/// events on channels 2/3 mapped to the EVTOUT hosts, all four hosts
/// enabled.
pub const PRUSS_INTC_INITDATA: tpruss_intc_initdata = {
    let mut sysevts_enabled = [0 as c_char; NUM_PRU_SYS_EVTS];
    sysevts_enabled[0] = PRU0_PRU1_INTERRUPT as c_char;
    sysevts_enabled[1] = PRU1_PRU0_INTERRUPT as c_char;
    sysevts_enabled[2] = PRU0_ARM_INTERRUPT as c_char;
    sysevts_enabled[3] = PRU1_ARM_INTERRUPT as c_char;
    sysevts_enabled[4] = ARM_PRU0_INTERRUPT as c_char;
    sysevts_enabled[5] = ARM_PRU1_INTERRUPT as c_char;
    sysevts_enabled[6] = -1i8 as c_char;

    let mut sysevt_to_channel_map = [tsysevt_to_channel_map { sysevt: 0, channel: 0 }; NUM_PRU_SYS_EVTS];
    sysevt_to_channel_map[0] = tsysevt_to_channel_map {
        sysevt: PRU0_PRU1_INTERRUPT,
        channel: CHANNEL1,
    };
    sysevt_to_channel_map[1] = tsysevt_to_channel_map {
        sysevt: PRU1_PRU0_INTERRUPT,
        channel: CHANNEL0,
    };
    sysevt_to_channel_map[2] = tsysevt_to_channel_map {
        sysevt: PRU0_ARM_INTERRUPT,
        channel: CHANNEL2,
    };
    sysevt_to_channel_map[3] = tsysevt_to_channel_map {
        sysevt: PRU1_ARM_INTERRUPT,
        channel: CHANNEL3,
    };
    sysevt_to_channel_map[4] = tsysevt_to_channel_map {
        sysevt: ARM_PRU0_INTERRUPT,
        channel: CHANNEL0,
    };
    sysevt_to_channel_map[5] = tsysevt_to_channel_map {
        sysevt: ARM_PRU1_INTERRUPT,
        channel: CHANNEL1,
    };
    sysevt_to_channel_map[6] = tsysevt_to_channel_map { sysevt: -1, channel: -1 };

    let mut channel_to_host_map = [tchannel_to_host_map { channel: 0, host: 0 }; NUM_PRU_CHANNELS];
    channel_to_host_map[0] = tchannel_to_host_map {
        channel: CHANNEL0,
        host: PRU0,
    };
    channel_to_host_map[1] = tchannel_to_host_map {
        channel: CHANNEL1,
        host: PRU1,
    };
    channel_to_host_map[2] = tchannel_to_host_map {
        channel: CHANNEL2,
        host: PRU_EVTOUT0,
    };
    channel_to_host_map[3] = tchannel_to_host_map {
        channel: CHANNEL3,
        host: PRU_EVTOUT1,
    };
    channel_to_host_map[4] = tchannel_to_host_map { channel: -1, host: -1 };

    tpruss_intc_initdata {
        sysevts_enabled,
        sysevt_to_channel_map,
        channel_to_host_map,
        host_enable_bitmask: PRU0_HOSTEN_MASK | PRU1_HOSTEN_MASK | PRU_EVTOUT0_HOSTEN_MASK | PRU_EVTOUT1_HOSTEN_MASK,
    }
};

// ================================================================================================
// Driver entry points (prussdrv.h)
// ================================================================================================

extern "C" {
    /// Process-wide driver initialization. Must precede every other call.
    pub fn prussdrv_init() -> c_int;

    /// Release the process-wide driver binding.
    pub fn prussdrv_exit() -> c_int;

    /// Open the uio device backing `host_interrupt` (`PRU_EVTOUT_*`).
    pub fn prussdrv_open(host_interrupt: c_uint) -> c_int;

    /// Map the PRUSS memory region `pru_ram_id` (`PRUSS0_*`) into the
    /// process address space, storing the base pointer in `address`.
    pub fn prussdrv_map_prumem(pru_ram_id: c_uint, address: *mut *mut c_void) -> c_int;

    /// File descriptor of the event device opened for `host_interrupt`, or
    /// `-1` if none is open.
    pub fn prussdrv_pru_event_fd(host_interrupt: c_uint) -> c_int;

    /// Program the PRUSS interrupt controller from `initdata`.
    pub fn prussdrv_pruintc_init(initdata: *const tpruss_intc_initdata) -> c_int;

    /// Load a firmware data image from `filename` into PRU `prunum`'s data
    /// RAM.
    pub fn prussdrv_load_datafile(prunum: c_int, filename: *const c_char) -> c_int;

    /// Load a firmware program image from `filename` into PRU `prunum`'s
    /// instruction RAM and start it.
    pub fn prussdrv_exec_program(prunum: c_int, filename: *const c_char) -> c_int;

    /// Start PRU `prunum` executing from instruction 0.
    pub fn prussdrv_pru_enable(prunum: c_uint) -> c_int;

    /// Halt PRU `prunum`. The display layer deliberately never calls this at
    /// teardown; see `scoreline-display`.
    pub fn prussdrv_pru_disable(prunum: c_uint) -> c_int;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    #[test]
    fn intc_initdata_matches_c_layout() {
        // char[64] + 64 shorts pairs + 10 short pairs + u32, no padding
        assert_eq!(size_of::<tsysevt_to_channel_map>(), 4);
        assert_eq!(size_of::<tchannel_to_host_map>(), 4);
        assert_eq!(size_of::<tpruss_intc_initdata>(), 64 + 64 * 4 + 10 * 4 + 4);
        assert_eq!(align_of::<tpruss_intc_initdata>(), 4);
    }

    #[test]
    fn stock_initdata_routing() {
        let init = PRUSS_INTC_INITDATA;

        // Six events enabled, -1 terminated, zero tail
        assert_eq!(init.sysevts_enabled[5], ARM_PRU1_INTERRUPT as c_char);
        assert_eq!(init.sysevts_enabled[6], -1i8 as c_char);
        assert_eq!(init.sysevts_enabled[7], 0);

        // ARM-visible events land on the EVTOUT hosts
        assert_eq!(
            init.sysevt_to_channel_map[2],
            tsysevt_to_channel_map {
                sysevt: PRU0_ARM_INTERRUPT,
                channel: CHANNEL2,
            }
        );
        assert_eq!(
            init.channel_to_host_map[3],
            tchannel_to_host_map {
                channel: CHANNEL3,
                host: PRU_EVTOUT1,
            }
        );
        assert_eq!(init.channel_to_host_map[4], tchannel_to_host_map { channel: -1, host: -1 });

        assert_eq!(init.host_enable_bitmask, 0x000F);
    }
}
