//! End-to-end session over the SPI transport: counter manipulation, the
//! seven-segment output, and both edge modes on pin 0.

use counter_harness::{CounterSystem, HarnessConfig, RegisterPort};
use edge_counter::EdgeMode;

const REG_RESET: u8 = 0x00;
const REG_INC: u8 = 0x01;
const REG_VALUE: u8 = 0x02;
const REG_CFG: u8 = 0x03;

/// Synchronizer plus edge detector, then some slack to catch double counts.
fn settle(sys: &mut CounterSystem) {
    sys.clock_cycles(3);
    sys.clock_cycles(10);
}

fn drive(sys: &mut CounterSystem, inputs: u8) -> u8 {
    sys.set_inputs(inputs);
    settle(sys);
    sys.read_reg(REG_VALUE).expect("read VALUE")
}

fn system() -> CounterSystem {
    let mut sys = CounterSystem::new(HarnessConfig::default()).expect("default config");
    sys.reset();
    sys.clock_cycles(10);
    sys
}

#[test]
fn counter_manipulation_and_display() {
    let mut sys = system();
    sys.write_reg(REG_RESET, 0).expect("write");
    for _ in 0..3 {
        sys.write_reg(REG_INC, 0).expect("write");
    }
    assert_eq!(sys.read_reg(REG_VALUE).expect("read"), 3);
    assert_eq!(sys.display(), 0b0100_1111);
}

#[test]
fn rising_edge_detection() {
    let mut sys = system();
    sys.write_reg(REG_CFG, EdgeMode::Rising.code()).expect("write");
    sys.write_reg(REG_RESET, 0).expect("write");

    assert_eq!(drive(&mut sys, 0x01), 1);
    assert_eq!(drive(&mut sys, 0x00), 1);
    assert_eq!(drive(&mut sys, 0x01), 2);
}

#[test]
fn full_session() {
    let mut sys = system();

    sys.write_reg(REG_RESET, 0).expect("write");
    for _ in 0..3 {
        sys.write_reg(REG_INC, 0).expect("write");
    }
    assert_eq!(sys.read_reg(REG_VALUE).expect("read"), 3);
    assert_eq!(sys.display(), 0b0100_1111);

    sys.write_reg(REG_CFG, EdgeMode::Rising.code()).expect("write");
    sys.write_reg(REG_RESET, 0).expect("write");
    assert_eq!(drive(&mut sys, 0x01), 1);
    assert_eq!(drive(&mut sys, 0x00), 1);
    assert_eq!(drive(&mut sys, 0x01), 2);

    // Pin 0 is still high when the mode switches.
    sys.write_reg(REG_CFG, EdgeMode::Falling.code()).expect("write");
    sys.write_reg(REG_RESET, 0).expect("write");
    assert_eq!(sys.read_reg(REG_VALUE).expect("read"), 0);

    assert_eq!(drive(&mut sys, 0x00), 1);
    assert_eq!(drive(&mut sys, 0x01), 1);
    assert_eq!(drive(&mut sys, 0x00), 2);
    assert_eq!(sys.display(), 0b0101_1011);
}

#[test]
fn edges_ignored_in_mode_none() {
    let mut sys = system();
    for inputs in [0x01, 0x00, 0x01, 0x00] {
        assert_eq!(drive(&mut sys, inputs), 0);
    }
}

#[test]
fn cfg_reads_back() {
    let mut sys = system();
    assert_eq!(sys.read_reg(REG_CFG).expect("read"), EdgeMode::None.code());
    sys.write_reg(REG_CFG, EdgeMode::Falling.code()).expect("write");
    assert_eq!(sys.read_reg(REG_CFG).expect("read"), EdgeMode::Falling.code());
}

#[test]
fn edge_counts_after_three_ticks() {
    let mut sys = system();
    sys.write_reg(REG_CFG, EdgeMode::Rising.code()).expect("write");
    sys.set_inputs(0x01);
    sys.clock_cycles(2);
    assert_eq!(sys.counter().value(), 0);
    sys.clock_cycles(1);
    assert_eq!(sys.counter().value(), 1);
    sys.clock_cycles(50);
    assert_eq!(sys.counter().value(), 1);
}
