//! This module has I/O functionality for exporting sensor output

mod csv;

pub use csv::{HIT_POINTS_FILE_NAME, format_coordinate, hit_points_csv, write_hit_points_csv};
