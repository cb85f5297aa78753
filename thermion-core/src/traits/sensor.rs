//! Temperature source trait

/// A calibrated temperature source.
///
/// Implementations own their calibration state; a reading is only
/// possible once calibration has been loaded, which the constructor of
/// the concrete driver enforces.
pub trait TemperatureSource {
    type Error;

    /// Read the current temperature in degrees Celsius.
    fn read_celsius(&mut self) -> Result<f32, Self::Error>;
}
