//! Digit display trait

use crate::readout::DigitPosition;

/// A four-digit numeric display written one digit at a time.
pub trait DigitSink {
    type Error;

    /// Show `value` (a glyph table index, 0..=17) at `position`.
    fn write_digit(&mut self, position: DigitPosition, value: u8) -> Result<(), Self::Error>;
}
