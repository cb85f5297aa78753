//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod bus;
pub mod display;
pub mod sensor;

pub use bus::{BusDevice, SerialBus};
pub use display::DigitSink;
pub use sensor::TemperatureSource;
