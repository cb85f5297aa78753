//! Firmware lifecycle state machine
//!
//! Two states only: everything before the startup sequence finishes,
//! and the steady periodic-acquisition state that runs until power
//! loss. There is no terminal state.

/// Machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on: bus bring-up, calibration read, sensor configuration
    Boot,
    /// Periodic acquisition active
    Running,
}

/// Lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Calibration is loaded and the sensor is configured
    StartupComplete,
}

impl State {
    /// Whether periodic acquisition may run.
    pub fn is_running(&self) -> bool {
        matches!(self, State::Running)
    }

    /// Process an event and return the next state.
    pub fn transition(self, event: Event) -> Self {
        match (self, event) {
            (State::Boot, Event::StartupComplete) => State::Running,

            // Default: stay in current state
            _ => self,
        }
    }
}
