//! Firmware tasks

mod acquire;

pub use acquire::acquire_task;
