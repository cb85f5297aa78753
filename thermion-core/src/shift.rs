//! Manual-clocking protocol state machine
//!
//! The shift-register peripheral has no free-running clock: software
//! toggles the clock line and polls a completion flag that fires once
//! 16 toggles (8 data bits, both edges counted) have passed through the
//! register. This module tracks that sequence as an explicit state
//! machine so the bus engine stays portable across peripherals and the
//! logic is testable without hardware.

/// Clock toggles per full byte period (both edges of 8 bit cells).
pub const TOGGLES_PER_BYTE: u32 = 16;

/// Toggle budget per byte period before the peripheral is declared
/// stuck. The flag normally fires on toggle 16 exactly; the budget is
/// deliberately generous to tolerate a flag that lags a few toggles.
pub const TOGGLE_BUDGET_PER_BYTE: u32 = 64;

/// Phase of one multi-byte shift cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftPhase {
    /// Outbound byte loaded, clock not yet running
    Idle,
    /// Clock toggling, waiting on the completion flag
    Clocking,
    /// All requested byte periods have completed
    Complete,
}

/// Error from one shift cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftError {
    /// Completion flag never fired within the toggle budget
    Stuck,
}

/// Tracks the clock toggles of one `transfer` call.
///
/// The bus engine drives it: toggle the clock line, sample the
/// hardware completion flag, feed the flag to [`ShiftCycle::advance`],
/// repeat until [`ShiftPhase::Complete`].
#[derive(Debug, Clone, Copy)]
pub struct ShiftCycle {
    bytes_left: u8,
    toggles_this_byte: u32,
    phase: ShiftPhase,
}

impl ShiftCycle {
    /// Set up a cycle spanning `byte_periods` byte periods.
    ///
    /// A zero-length cycle is complete immediately.
    pub fn new(byte_periods: u8) -> Self {
        Self {
            bytes_left: byte_periods,
            toggles_this_byte: 0,
            phase: if byte_periods == 0 {
                ShiftPhase::Complete
            } else {
                ShiftPhase::Idle
            },
        }
    }

    pub fn phase(&self) -> ShiftPhase {
        self.phase
    }

    /// Begin clocking. No-op unless the cycle is idle.
    pub fn start(&mut self) {
        if self.phase == ShiftPhase::Idle {
            self.phase = ShiftPhase::Clocking;
        }
    }

    /// Record one clock toggle and the completion flag sampled after it.
    ///
    /// Returns the new phase, or [`ShiftError::Stuck`] once the toggle
    /// budget for the current byte period is exhausted without the flag
    /// firing.
    pub fn advance(&mut self, completed: bool) -> Result<ShiftPhase, ShiftError> {
        if self.phase != ShiftPhase::Clocking {
            return Ok(self.phase);
        }

        self.toggles_this_byte += 1;
        if completed {
            self.bytes_left -= 1;
            self.toggles_this_byte = 0;
            if self.bytes_left == 0 {
                self.phase = ShiftPhase::Complete;
            }
        } else if self.toggles_this_byte >= TOGGLE_BUDGET_PER_BYTE {
            return Err(ShiftError::Stuck);
        }

        Ok(self.phase)
    }
}
