//! Periodic acquisition task
//!
//! Replaces the classic timer-compare interrupt: a ticker fires at the
//! sample rate and each tick runs one read-compute-display cycle. The
//! cycle reads the sensor once and writes all four digits from that
//! single reading.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Ticker};

use thermion_core::cycle;
use thermion_drivers::bus::{GpioShifter, ShiftBus};
use thermion_drivers::station::Station;

/// Samples (and display refreshes) per second.
pub const SAMPLE_HZ: u64 = 2;

type BoardShifter = GpioShifter<Output<'static>, Output<'static>, Input<'static>>;
type BoardBus = ShiftBus<BoardShifter, Output<'static>, Output<'static>>;
pub type BoardStation = Station<BoardBus>;

/// Acquisition task - one full sensor read and display refresh per tick
#[embassy_executor::task]
pub async fn acquire_task(mut station: BoardStation) {
    info!("Acquisition task started ({} Hz)", SAMPLE_HZ);

    let mut ticker = Ticker::every(Duration::from_millis(1000 / SAMPLE_HZ));

    loop {
        ticker.next().await;

        match cycle::run(&mut station) {
            Ok(celsius) => trace!("Temperature: {} °C", celsius),
            // A stuck bus or failed read leaves the previous digits
            // showing; the next tick tries again.
            Err(e) => error!("Acquisition cycle failed: {}", e),
        }
    }
}
