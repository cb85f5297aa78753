//! Shared serial bus trait
//!
//! The sensor and the display hang off the same three-wire bus, each
//! behind its own active-low select line. All exchanges happen inside a
//! session bounded by asserting and deasserting exactly one select.

/// Peripherals sharing the bus, one select line each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusDevice {
    /// BMP280 pressure/temperature sensor
    Sensor,
    /// Shift-out register driving the 7-segment digits
    Display,
}

/// Byte-wide synchronous exchange over the shared bus.
///
/// `transfer` follows the shift-register peripheral's quirky primitive:
/// the outbound byte is loaded once and the clock then runs for
/// `byte_periods` full byte periods (16 toggles each). Subsequent
/// periods shift out zeros; the returned byte is whatever was clocked
/// in during the last period. Register reads use this to send an
/// address and capture the first data byte in one call.
pub trait SerialBus {
    type Error;

    /// Assert the select line for `device` and open a session.
    ///
    /// At most one session may be open at a time.
    fn open(&mut self, device: BusDevice) -> Result<(), Self::Error>;

    /// Deassert the select line of the currently open session.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// Exchange `byte_periods` bytes, returning the byte last clocked in.
    fn transfer(&mut self, out: u8, byte_periods: u8) -> Result<u8, Self::Error>;

    /// Run `f` inside a session with `device`.
    ///
    /// The select line is deasserted on every exit path, including when
    /// `f` returns an error.
    fn session<T, F>(&mut self, device: BusDevice, f: F) -> Result<T, Self::Error>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T, Self::Error>,
    {
        self.open(device)?;
        let result = f(self);
        self.close()?;
        result
    }
}
