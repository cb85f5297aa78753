//! The acquisition-and-display cycle
//!
//! One cycle reads the sensor exactly once, decomposes the temperature
//! into four digits and writes them out in shift order. The sensor and
//! display share a bus, so a single station object implements both
//! seams and serializes access internally.

use crate::readout::{ReadoutDigits, SHIFT_ORDER};
use crate::traits::{DigitSink, TemperatureSource};

/// Run one acquisition cycle, returning the temperature that was shown.
pub fn run<S, E>(station: &mut S) -> Result<f32, E>
where
    S: TemperatureSource<Error = E> + DigitSink<Error = E>,
{
    let celsius = station.read_celsius()?;
    let digits = ReadoutDigits::from_celsius(celsius);
    for position in SHIFT_ORDER {
        station.write_digit(position, digits.value_at(position))?;
    }
    Ok(celsius)
}
