//! Temperature readout decomposition
//!
//! The display shows a temperature as four digits: tens, ones, tenths,
//! hundredths (the decimal point is fixed by the panel). External
//! wiring maps shift order to physical slots, so the order digits are
//! written matters; [`SHIFT_ORDER`] encodes it in one place.

/// The four digit slots of the readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitPosition {
    Hundredths,
    Tenths,
    Ones,
    Tens,
}

impl DigitPosition {
    /// Index into per-slot storage (shift order).
    pub fn index(self) -> usize {
        match self {
            DigitPosition::Hundredths => 0,
            DigitPosition::Tenths => 1,
            DigitPosition::Ones => 2,
            DigitPosition::Tens => 3,
        }
    }
}

/// Order in which digits must be shifted out to land in the right
/// physical slots: least significant first.
pub const SHIFT_ORDER: [DigitPosition; 4] = [
    DigitPosition::Hundredths,
    DigitPosition::Tenths,
    DigitPosition::Ones,
    DigitPosition::Tens,
];

/// Displayable ceiling; the panel has two integer digits.
pub const MAX_CENTI: u16 = 9999;

/// A temperature decomposed into display digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadoutDigits {
    pub tens: u8,
    pub ones: u8,
    pub tenths: u8,
    pub hundredths: u8,
}

impl ReadoutDigits {
    /// Decompose a temperature into digits, rounding to the nearest
    /// hundredth of a degree.
    ///
    /// The panel covers 00.00-99.99; readings outside that range are
    /// clamped rather than wrapped.
    pub fn from_celsius(celsius: f32) -> Self {
        let centi = if celsius <= 0.0 {
            0
        } else {
            let scaled = (celsius * 100.0 + 0.5) as u32;
            scaled.min(u32::from(MAX_CENTI)) as u16
        };
        Self::from_centi(centi)
    }

    /// Decompose from hundredths of a degree (0..=9999).
    pub fn from_centi(centi: u16) -> Self {
        let centi = centi.min(MAX_CENTI);
        Self {
            tens: (centi / 1000 % 10) as u8,
            ones: (centi / 100 % 10) as u8,
            tenths: (centi / 10 % 10) as u8,
            hundredths: (centi % 10) as u8,
        }
    }

    /// Digit value shown at `position`.
    pub fn value_at(&self, position: DigitPosition) -> u8 {
        match position {
            DigitPosition::Hundredths => self.hundredths,
            DigitPosition::Tenths => self.tenths,
            DigitPosition::Ones => self.ones,
            DigitPosition::Tens => self.tens,
        }
    }
}
