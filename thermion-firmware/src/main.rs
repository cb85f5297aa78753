//! Thermion - SPI Thermometer Firmware
//!
//! Main firmware binary for RP2040-based boards. Samples a BMP280 over
//! a bit-banged three-wire bus and renders the temperature on four
//! shift-register-driven 7-segment digits.
//!
//! All acquisition work happens in the periodic task; after startup
//! the main task only idles.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use {defmt_rtt as _, panic_probe as _};

use thermion_core::state::{Event, State};
use thermion_drivers::bus::{GpioShifter, ShiftBus};
use thermion_drivers::station::Station;

mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Thermion firmware starting...");

    let p = embassy_rp::init(Default::default());
    let mut state = State::Boot;

    // Fixed pin roles: the bus and select wiring is part of the board,
    // not configuration.
    let sck = Output::new(p.PIN_2, Level::Low);
    let mosi = Output::new(p.PIN_3, Level::Low);
    let miso = Input::new(p.PIN_4, Pull::None);
    let sensor_select = Output::new(p.PIN_5, Level::High);
    let display_select = Output::new(p.PIN_6, Level::High);

    let shifter = unwrap!(GpioShifter::new(sck, mosi, miso));
    let bus = unwrap!(ShiftBus::new(shifter, sensor_select, display_select));
    info!("Bus initialized");

    // Calibration read and sensor configuration happen here, before
    // the periodic task exists; a temperature can never be computed
    // against an unpopulated calibration set.
    let station = match Station::start(bus) {
        Ok(station) => station,
        Err(e) => defmt::panic!("Sensor bring-up failed: {}", e),
    };
    info!("Sensor calibrated: {}", station.calibration());

    state = state.transition(Event::StartupComplete);
    info!("State: {}", state);

    unwrap!(spawner.spawn(tasks::acquire_task(station)));
    info!("Acquisition task spawned, firmware running");

    // Main task has nothing else to do - all work happens in the
    // acquisition task.
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
