//! Board-agnostic core logic for the Thermion thermometer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (serial bus, temperature source, digit sink)
//! - Manual-clocking protocol state machine for the shift-register bus
//! - Temperature readout digit decomposition
//! - The acquisition-and-display cycle
//! - Firmware lifecycle state machine

#![no_std]
#![deny(unsafe_code)]

pub mod cycle;
pub mod readout;
pub mod shift;
pub mod state;
pub mod traits;
