//! Integration tests for the display memory layer
//!
//! All tests run against the virtual provider; the PRU path needs the real
//! peripheral and is exercised on-device. The buffer contract (sizing,
//! zeroing, pointer stability, write-through) is identical across providers
//! by construction.

use scoreline_display::{DisplayMapper, DisplayMemory};
use scoreline_tracing::{init_global_tracing, TracingConfig};

fn init_tracing() {
    // Several tests race to install the subscriber; only the first wins.
    let _ = init_global_tracing(&TracingConfig::for_ci());
}

unsafe fn read_at(mapper: &DisplayMapper, offset: usize) -> u8 {
    mapper.get().as_ptr().add(offset).read()
}

unsafe fn write_at(mapper: &DisplayMapper, offset: usize, value: u8) {
    mapper.get().as_ptr().add(offset).write(value);
}

#[test]
fn buffer_is_zeroed_and_sized_with_control_byte() {
    init_tracing();
    let mapper = DisplayMapper::new(256, false).unwrap();
    assert_eq!(mapper.size_bytes(), 257);

    for offset in 0..257 {
        assert_eq!(unsafe { read_at(&mapper, offset) }, 0, "offset {offset} not zeroed");
    }
}

#[test]
fn pointer_is_stable_across_calls() {
    init_tracing();
    let mapper = DisplayMapper::new(64, false).unwrap();
    assert_eq!(mapper.get(), mapper.get());
}

#[test]
fn writes_read_back_at_every_offset() {
    init_tracing();
    let mapper = DisplayMapper::new(32, false).unwrap();

    for offset in 0..mapper.size_bytes() {
        unsafe { write_at(&mapper, offset, offset as u8 ^ 0x5A) };
    }
    for offset in 0..mapper.size_bytes() {
        assert_eq!(unsafe { read_at(&mapper, offset) }, offset as u8 ^ 0x5A);
    }
}

#[test]
fn control_byte_round_trips_without_touching_content() {
    init_tracing();
    let mapper = DisplayMapper::new(256, false).unwrap();

    unsafe { write_at(&mapper, 256, 0xFF) };
    assert_eq!(unsafe { read_at(&mapper, 256) }, 0xFF);

    // Display content stays zero until written
    for offset in 0..256 {
        assert_eq!(unsafe { read_at(&mapper, offset) }, 0);
    }
}

#[test]
fn sequential_mappers_are_independent() {
    init_tracing();

    let first = DisplayMapper::new(64, false).unwrap();
    unsafe { write_at(&first, 0, 0x11) };
    drop(first);

    let second = DisplayMapper::new(128, false).unwrap();
    assert_eq!(second.size_bytes(), 129);
    for offset in 0..129 {
        assert_eq!(unsafe { read_at(&second, offset) }, 0, "offset {offset} contaminated");
    }
}

#[test]
fn zero_display_size_yields_the_control_byte_only() {
    init_tracing();
    let mapper = DisplayMapper::new(0, false).unwrap();
    assert_eq!(mapper.size_bytes(), 1);

    unsafe { write_at(&mapper, 0, 0x7E) };
    assert_eq!(unsafe { read_at(&mapper, 0) }, 0x7E);
}

#[cfg(not(feature = "pru"))]
#[test]
#[should_panic(expected = "without the `pru` feature")]
fn hardware_flag_rejected_on_host_builds() {
    init_tracing();
    let _ = DisplayMapper::new(256, true);
}
