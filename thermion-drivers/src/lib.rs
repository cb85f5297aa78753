//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in thermion-core:
//!
//! - Bus engine over a manually clocked shift register, with the two
//!   chip-select lines and session discipline
//! - Bit-banged shift-register peripheral over `embedded-hal` pins
//! - BMP280 sensor protocol (calibration, configuration, compensation)
//! - 7-segment shift-out display driver
//! - `Station`: sensor + display bound to one bus

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod display;
pub mod sensor;
pub mod station;

/// Driver-level error, generic over the bus error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus transfer or session failure
    Bus(E),
    /// Sensor identified itself with an unexpected chip id
    BadChipId(u8),
    /// Digit value outside the glyph table (0..=17)
    InvalidDigit(u8),
}

impl<E> Error<E> {
    pub(crate) fn bus(err: E) -> Self {
        Error::Bus(err)
    }
}
