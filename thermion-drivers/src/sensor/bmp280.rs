//! BMP280 temperature protocol over the shared bus
//!
//! Register map and compensation formula follow the vendor datasheet;
//! the shift amounts and the 5120.0 divisor are contractual and must
//! not be "improved". Only the temperature path is implemented, the
//! pressure registers are never touched.

use thermion_core::traits::{BusDevice, SerialBus};

use crate::Error;

/// Chip-id register and the id a BMP280 reports.
const REG_ID: u8 = 0xD0;
pub const CHIP_ID: u8 = 0x58;

/// Calibration block base: dig_T1..dig_T3 as 3 little-endian u16/i16.
const REG_CALIB_START: u8 = 0x88;

/// ctrl_meas register. SPI writes clear bit 7 of the address.
const REG_CTRL_MEAS: u8 = 0xF4;
const SPI_WRITE_MASK: u8 = 0x7F;

/// temp_msb, start of the 3-byte temperature readout.
const REG_TEMP_MSB: u8 = 0xFA;

/// osrs_t = x2, pressure measurement skipped, normal mode.
pub const CTRL_MEAS_NORMAL: u8 = 0b0100_0011;

/// Factory calibration constants, read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
}

/// BMP280 driver. Owns the calibration for the process lifetime, so a
/// temperature can only be read once calibration exists.
#[derive(Debug, Clone, Copy)]
pub struct Bmp280 {
    calibration: Calibration,
}

impl Bmp280 {
    /// Bring the sensor up: verify the chip id, read the calibration
    /// block and switch to continuous temperature measurement.
    pub fn init<B: SerialBus>(bus: &mut B) -> Result<Self, Error<B::Error>> {
        let id = read_chip_id(bus).map_err(Error::bus)?;
        if id != CHIP_ID {
            return Err(Error::BadChipId(id));
        }
        let calibration = read_calibration(bus).map_err(Error::bus)?;
        configure(bus).map_err(Error::bus)?;
        Ok(Self { calibration })
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Read and compensate one temperature sample.
    pub fn read_temperature<B: SerialBus>(&self, bus: &mut B) -> Result<f32, Error<B::Error>> {
        let raw = read_raw(bus).map_err(Error::bus)?;
        Ok(compensate(raw, &self.calibration))
    }
}

fn read_chip_id<B: SerialBus>(bus: &mut B) -> Result<u8, B::Error> {
    bus.session(BusDevice::Sensor, |bus| bus.transfer(REG_ID, 2))
}

/// Burst-read dig_T1..dig_T3. The address transfer runs two byte
/// periods so it already captures T1's low byte; five single reads
/// fetch the rest.
fn read_calibration<B: SerialBus>(bus: &mut B) -> Result<Calibration, B::Error> {
    bus.session(BusDevice::Sensor, |bus| {
        let t1l = bus.transfer(REG_CALIB_START, 2)?;
        let t1h = bus.transfer(0, 1)?;
        let t2l = bus.transfer(0, 1)?;
        let t2h = bus.transfer(0, 1)?;
        let t3l = bus.transfer(0, 1)?;
        let t3h = bus.transfer(0, 1)?;
        Ok(Calibration {
            t1: u16::from_le_bytes([t1l, t1h]),
            t2: i16::from_le_bytes([t2l, t2h]),
            t3: i16::from_le_bytes([t3l, t3h]),
        })
    })
}

/// Write ctrl_meas so temperature data is continuously available.
fn configure<B: SerialBus>(bus: &mut B) -> Result<(), B::Error> {
    bus.session(BusDevice::Sensor, |bus| {
        bus.transfer(REG_CTRL_MEAS & SPI_WRITE_MASK, 1)?;
        bus.transfer(CTRL_MEAS_NORMAL, 1)?;
        Ok(())
    })
}

/// Read the 3-byte temperature registers and assemble the 20-bit raw
/// sample (left-justified in the 24 transferred bits).
fn read_raw<B: SerialBus>(bus: &mut B) -> Result<u32, B::Error> {
    let (msb, mid, lsb) = bus.session(BusDevice::Sensor, |bus| {
        let msb = bus.transfer(REG_TEMP_MSB, 2)?;
        let mid = bus.transfer(0, 1)?;
        let lsb = bus.transfer(0, 1)?;
        Ok((msb, mid, lsb))
    })?;
    Ok((u32::from(msb) << 12) | (u32::from(mid) << 4) | (u32::from(lsb) >> 4))
}

/// Vendor fixed-point compensation. All intermediates are i32; a
/// 20-bit raw sample against 16-bit constants stays in range.
pub fn compensate(raw: u32, calibration: &Calibration) -> f32 {
    let adc_t = raw as i32;
    let t1 = i32::from(calibration.t1);
    let t2 = i32::from(calibration.t2);
    let t3 = i32::from(calibration.t3);

    let var1 = (((adc_t >> 3) - (t1 << 1)) * t2) >> 11;
    let var2 = (((((adc_t >> 4) - t1) * ((adc_t >> 4) - t1)) >> 12) * t3) >> 14;

    (var1 + var2) as f32 / 5120.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::mock::{BusEvent, MockBus};
    use crate::Error;

    /// Vendor worked example from the datasheet.
    const T1: u16 = 27504;
    const T2: i16 = 26435;
    const T3: i16 = -1000;
    const RAW: u32 = 519_888;

    fn reference_calibration() -> Calibration {
        Calibration {
            t1: T1,
            t2: T2,
            t3: T3,
        }
    }

    /// Calibration block bytes as they come off the wire (LE pairs).
    fn calibration_bytes() -> [u8; 6] {
        let [t1l, t1h] = T1.to_le_bytes();
        let [t2l, t2h] = T2.to_le_bytes();
        let [t3l, t3h] = T3.to_le_bytes();
        [t1l, t1h, t2l, t2h, t3l, t3h]
    }

    #[test]
    fn compensation_matches_the_vendor_example() {
        let celsius = compensate(RAW, &reference_calibration());
        assert!((celsius - 25.0824).abs() < 1e-3, "got {celsius}");
    }

    #[test]
    fn raw_assembly_discards_the_low_nibble() {
        // 0x7EED0 arrives as 0x7E, 0xED, 0x0F: the low nibble of the
        // third byte is not part of the 20-bit sample.
        let mut bus = MockBus::new();
        bus.push_responses(&[0x7E, 0xED, 0x0F]);
        assert_eq!(read_raw(&mut bus).unwrap(), 0x7EED0);
    }

    #[test]
    fn init_reads_id_calibration_and_configures() {
        let mut bus = MockBus::new();
        bus.push_responses(&[CHIP_ID]);
        bus.push_responses(&calibration_bytes());

        let sensor = Bmp280::init(&mut bus).unwrap();
        assert_eq!(sensor.calibration(), &reference_calibration());

        bus.assert_sessions_balanced();

        // id read, then the calibration burst, then the ctrl_meas write
        assert_eq!(bus.log[0], BusEvent::Open(BusDevice::Sensor));
        assert_eq!(
            bus.log[1],
            BusEvent::Transfer {
                out: 0xD0,
                periods: 2
            }
        );
        assert_eq!(
            bus.log[4],
            BusEvent::Transfer {
                out: 0x88,
                periods: 2
            }
        );
        let n = bus.log.len();
        assert_eq!(
            bus.log[n - 3],
            BusEvent::Transfer {
                out: 0x74,
                periods: 1
            }
        );
        assert_eq!(
            bus.log[n - 2],
            BusEvent::Transfer {
                out: CTRL_MEAS_NORMAL,
                periods: 1
            }
        );
    }

    #[test]
    fn init_rejects_a_wrong_chip_id() {
        let mut bus = MockBus::new();
        bus.push_responses(&[0x60]); // a BME280, not a BMP280
        assert_eq!(Bmp280::init(&mut bus).unwrap_err(), Error::BadChipId(0x60));
        bus.assert_sessions_balanced();
    }

    #[test]
    fn calibration_read_is_idempotent() {
        let mut bus = MockBus::new();
        bus.push_responses(&calibration_bytes());
        bus.push_responses(&calibration_bytes());

        let first = read_calibration(&mut bus).unwrap();
        let second = read_calibration(&mut bus).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, reference_calibration());
    }

    #[test]
    fn temperature_read_uses_one_sensor_session() {
        let sensor = Bmp280 {
            calibration: reference_calibration(),
        };
        let mut bus = MockBus::new();
        // RAW = 0x7EED0 -> msb 0x7E, mid 0xED, lsb 0x00
        bus.push_responses(&[0x7E, 0xED, 0x00]);

        let celsius = sensor.read_temperature(&mut bus).unwrap();
        assert!((celsius - 25.0824).abs() < 1e-3);

        bus.assert_sessions_balanced();
        assert_eq!(
            bus.log.as_slice(),
            [
                BusEvent::Open(BusDevice::Sensor),
                BusEvent::Transfer {
                    out: 0xFA,
                    periods: 2
                },
                BusEvent::Transfer { out: 0, periods: 1 },
                BusEvent::Transfer { out: 0, periods: 1 },
                BusEvent::Close(BusDevice::Sensor),
            ]
        );
    }
}
