//! Bus engine over a manually clocked shift register
//!
//! The transfer engine drives a shift-register peripheral bit by bit
//! under software clock control and multiplexes two devices (sensor,
//! display) behind active-low select lines. The clocking sequence
//! itself is tracked by [`ShiftCycle`] from thermion-core; this module
//! owns the hardware and the session discipline.

mod gpio_shift;

use embedded_hal::digital::OutputPin;
use thermion_core::shift::{ShiftCycle, ShiftPhase};
use thermion_core::traits::{BusDevice, SerialBus};

pub use gpio_shift::{GpioShifter, ShifterError};

/// A shift-register peripheral operated under manual clocking.
///
/// Mirrors the minimal hardware contract: load an outbound byte,
/// toggle the serial clock one half-bit at a time, and watch a
/// completion flag that fires once 16 toggles have shifted a full
/// byte through the register.
pub trait ShiftRegister {
    type Error;

    /// Load the outbound byte into the register.
    fn load(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Toggle the serial clock line once.
    fn toggle_clock(&mut self) -> Result<(), Self::Error>;

    /// Completion flag: a full byte period has elapsed.
    fn overflow(&self) -> bool;

    /// Clear the completion flag for the next byte period.
    fn clear_overflow(&mut self);

    /// Byte currently held in the register (the byte last clocked in).
    fn read(&self) -> u8;
}

/// Bus-level error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Completion flag never fired within the toggle budget
    Stuck,
    /// `open` while another session is active
    SessionOpen,
    /// `transfer` or `close` without an open session
    NoSession,
    /// GPIO failure on a bus or select line
    Pin,
}

/// The shared bus: one shift register, two select lines.
///
/// Select lines are active low and idle high; exactly one may be
/// asserted at a time, which `open`/`close` enforce.
pub struct ShiftBus<R, S, D> {
    reg: R,
    sensor_select: S,
    display_select: D,
    open: Option<BusDevice>,
}

impl<R, S, D> ShiftBus<R, S, D>
where
    R: ShiftRegister,
    S: OutputPin,
    D: OutputPin,
{
    /// Take ownership of the peripheral and both select lines.
    ///
    /// Both selects are driven to their deasserted (high) level.
    pub fn new(reg: R, mut sensor_select: S, mut display_select: D) -> Result<Self, BusError> {
        sensor_select.set_high().map_err(|_| BusError::Pin)?;
        display_select.set_high().map_err(|_| BusError::Pin)?;
        Ok(Self {
            reg,
            sensor_select,
            display_select,
            open: None,
        })
    }

    fn set_select(&mut self, device: BusDevice, asserted: bool) -> Result<(), BusError> {
        match (device, asserted) {
            (BusDevice::Sensor, true) => self.sensor_select.set_low().map_err(|_| BusError::Pin),
            (BusDevice::Sensor, false) => self.sensor_select.set_high().map_err(|_| BusError::Pin),
            (BusDevice::Display, true) => self.display_select.set_low().map_err(|_| BusError::Pin),
            (BusDevice::Display, false) => {
                self.display_select.set_high().map_err(|_| BusError::Pin)
            }
        }
    }
}

impl<R, S, D> SerialBus for ShiftBus<R, S, D>
where
    R: ShiftRegister,
    S: OutputPin,
    D: OutputPin,
{
    type Error = BusError;

    fn open(&mut self, device: BusDevice) -> Result<(), BusError> {
        if self.open.is_some() {
            return Err(BusError::SessionOpen);
        }
        self.set_select(device, true)?;
        self.open = Some(device);
        Ok(())
    }

    fn close(&mut self) -> Result<(), BusError> {
        let device = self.open.take().ok_or(BusError::NoSession)?;
        self.set_select(device, false)
    }

    fn transfer(&mut self, out: u8, byte_periods: u8) -> Result<u8, BusError> {
        if self.open.is_none() {
            return Err(BusError::NoSession);
        }

        self.reg.load(out).map_err(|_| BusError::Pin)?;

        let mut cycle = ShiftCycle::new(byte_periods);
        cycle.start();

        // The toggle sequence must not interleave with anything else
        // that could touch the clock or data lines; only the clocking
        // loop runs with interrupts masked, not the whole transfer.
        critical_section::with(|_| {
            while cycle.phase() != ShiftPhase::Complete {
                self.reg.toggle_clock().map_err(|_| BusError::Pin)?;
                let completed = self.reg.overflow();
                if completed {
                    self.reg.clear_overflow();
                }
                cycle.advance(completed).map_err(|_| BusError::Stuck)?;
            }
            Ok(())
        })?;

        Ok(self.reg.read())
    }
}
