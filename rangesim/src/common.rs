//! Common constructs shared between the sensor and scene modules

mod angles;

pub use angles::{ANGLE_TOL, centered_offsets, is_full_turn, rotate_about};
