//! Sensor protocol drivers

mod bmp280;

pub use bmp280::{compensate, Bmp280, Calibration, CHIP_ID, CTRL_MEAS_NORMAL};
