//! Display drivers

mod seven_segment;

pub use seven_segment::{SevenSegment, BLANK, GLYPHS, RESERVED};
