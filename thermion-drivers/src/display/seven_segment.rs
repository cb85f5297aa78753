//! 7-segment shift-out display driver
//!
//! Each digit is one byte shifted into an external register behind the
//! display select line, segments A..G in bits 0..6, bit 7 the decimal
//! point. The wiring maps shift order to physical slots; the caller
//! supplies the slot explicitly and the driver remembers what each one
//! shows.

use thermion_core::readout::DigitPosition;
use thermion_core::traits::{BusDevice, SerialBus};

use crate::Error;

/// Segment patterns for digit values 0..=17.
///
/// 0-9 are the decimal digits, 10-15 the hex letters A-F, 16 blank and
/// 17 a reserved decimal-point-only pattern.
pub const GLYPHS: [u8; 18] = [
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
    0b0111_0111, // A
    0b0111_1100, // b
    0b0011_1001, // C
    0b0101_1110, // d
    0b0111_1001, // E
    0b0111_0001, // F
    0b0000_0000, // blank
    0b1000_0000, // reserved (decimal point only)
];

/// Glyph index that blanks a digit.
pub const BLANK: u8 = 16;
/// Reserved glyph index (unused by the readout).
pub const RESERVED: u8 = 17;

/// The four-digit readout behind the display select line.
pub struct SevenSegment {
    shown: [u8; 4],
}

impl SevenSegment {
    pub fn new() -> Self {
        Self { shown: [BLANK; 4] }
    }

    /// Shift the glyph for `value` out to `position`.
    ///
    /// Values outside the glyph table are rejected before the bus is
    /// touched.
    pub fn write_digit<B: SerialBus>(
        &mut self,
        bus: &mut B,
        position: DigitPosition,
        value: u8,
    ) -> Result<(), Error<B::Error>> {
        let glyph = *GLYPHS
            .get(usize::from(value))
            .ok_or(Error::InvalidDigit(value))?;
        bus.session(BusDevice::Display, |bus| bus.transfer(glyph, 1))
            .map_err(Error::bus)?;
        self.shown[position.index()] = value;
        Ok(())
    }

    /// Blank all four digits (power-on display state).
    pub fn blank<B: SerialBus>(&mut self, bus: &mut B) -> Result<(), Error<B::Error>> {
        for position in thermion_core::readout::SHIFT_ORDER {
            self.write_digit(bus, position, BLANK)?;
        }
        Ok(())
    }

    /// Digit value last written to `position`.
    pub fn shown_at(&self, position: DigitPosition) -> u8 {
        self.shown[position.index()]
    }
}

impl Default for SevenSegment {
    fn default() -> Self {
        Self::new()
    }
}
