//! Sensor and display bound to one bus
//!
//! Both peripherals share the serial bus, so they cannot each own it.
//! `Station` owns the bus and both drivers, serializing access in
//! program order, and implements the core seam traits so the
//! acquisition cycle can run against it.

use thermion_core::readout::DigitPosition;
use thermion_core::traits::{DigitSink, SerialBus, TemperatureSource};

use crate::display::SevenSegment;
use crate::sensor::{Bmp280, Calibration};
use crate::Error;

pub struct Station<B> {
    bus: B,
    sensor: Bmp280,
    display: SevenSegment,
}

impl<B: SerialBus> Station<B> {
    /// Run the startup sequence: sensor bring-up (chip id, calibration,
    /// configuration) followed by blanking the display.
    ///
    /// Consuming the bus here is what guarantees calibration exists
    /// before the first temperature read.
    pub fn start(mut bus: B) -> Result<Self, Error<B::Error>> {
        let sensor = Bmp280::init(&mut bus)?;
        let mut display = SevenSegment::new();
        display.blank(&mut bus)?;
        Ok(Self {
            bus,
            sensor,
            display,
        })
    }

    pub fn calibration(&self) -> &Calibration {
        self.sensor.calibration()
    }

    pub fn display(&self) -> &SevenSegment {
        &self.display
    }
}

impl<B: SerialBus> TemperatureSource for Station<B> {
    type Error = Error<B::Error>;

    fn read_celsius(&mut self) -> Result<f32, Self::Error> {
        self.sensor.read_temperature(&mut self.bus)
    }
}

impl<B: SerialBus> DigitSink for Station<B> {
    type Error = Error<B::Error>;

    fn write_digit(&mut self, position: DigitPosition, value: u8) -> Result<(), Self::Error> {
        self.display.write_digit(&mut self.bus, position, value)
    }
}

#[cfg(test)]
mod tests {
    use thermion_core::cycle;
    use thermion_core::traits::BusDevice;

    use super::*;
    use crate::bus::mock::{BusEvent, MockBus};
    use crate::display::GLYPHS;

    const CALIB_T1: u16 = 27504;
    const CALIB_T2: i16 = 26435;
    const CALIB_T3: i16 = -1000;

    fn startup_responses(bus: &mut MockBus) {
        bus.push_responses(&[0x58]); // chip id
        let [t1l, t1h] = CALIB_T1.to_le_bytes();
        let [t2l, t2h] = CALIB_T2.to_le_bytes();
        let [t3l, t3h] = CALIB_T3.to_le_bytes();
        bus.push_responses(&[t1l, t1h, t2l, t2h, t3l, t3h]);
    }

    #[test]
    fn startup_loads_calibration_and_blanks_the_display() {
        let mut bus = MockBus::new();
        startup_responses(&mut bus);

        let station = Station::start(bus).unwrap();
        assert_eq!(
            station.calibration(),
            &Calibration {
                t1: CALIB_T1,
                t2: CALIB_T2,
                t3: CALIB_T3,
            }
        );
        for position in thermion_core::readout::SHIFT_ORDER {
            assert_eq!(station.display().shown_at(position), crate::display::BLANK);
        }
    }

    #[test]
    fn full_cycle_shows_the_vendor_reference_temperature() {
        let mut bus = MockBus::new();
        startup_responses(&mut bus);
        let mut station = Station::start(bus).unwrap();

        // raw 519888 = 0x7EED0 -> 25.0824 °C, displayed 25.08
        station.bus.push_responses(&[0x7E, 0xED, 0x00]);
        station.bus.log.clear();

        let celsius = cycle::run(&mut station).unwrap();
        assert!((celsius - 25.0824).abs() < 1e-3);

        station.bus.assert_sessions_balanced();

        // one sensor session, then four display sessions with the
        // glyphs for 8, 0, 5, 2 in shift order
        let opens: heapless::Vec<BusDevice, 8> = station
            .bus
            .log
            .iter()
            .filter_map(|e| match e {
                BusEvent::Open(device) => Some(*device),
                _ => None,
            })
            .collect();
        assert_eq!(
            opens.as_slice(),
            [
                BusDevice::Sensor,
                BusDevice::Display,
                BusDevice::Display,
                BusDevice::Display,
                BusDevice::Display,
            ]
        );

        let display_bytes: heapless::Vec<u8, 8> = station
            .bus
            .log
            .iter()
            .skip(5) // sensor session: open, 3 transfers, close
            .filter_map(|e| match e {
                BusEvent::Transfer { out, .. } => Some(*out),
                _ => None,
            })
            .collect();
        assert_eq!(
            display_bytes.as_slice(),
            [GLYPHS[8], GLYPHS[0], GLYPHS[5], GLYPHS[2]]
        );
    }

    #[test]
    fn sensor_fault_at_startup_propagates() {
        let mut bus = MockBus::new();
        bus.push_responses(&[0x00]); // bus floating low, no sensor
        assert_eq!(
            Station::start(bus).map(|_| ()).unwrap_err(),
            Error::BadChipId(0x00)
        );
    }
}
