//! Export of hit points as CSV text. The format is a header row `x,y,z` followed by one row per
//! point, with every coordinate written to two decimal places and rows joined by `\n` without a
//! trailing newline.

use crate::{Point3, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// The file name offered for a hit point export
pub const HIT_POINTS_FILE_NAME: &str = "hit_points.csv";

/// Format a coordinate to two decimal places. Rounding is half away from zero and is applied to
/// the shortest decimal representation that round-trips to `value`, so `1.005` is written as
/// `1.01` even though the nearest double is slightly below it. A value which rounds to zero is
/// written without a sign.
///
/// # Arguments
///
/// * `value`: the coordinate to format
///
/// returns: String
///
/// # Examples
///
/// ```
/// use rangesim::io::format_coordinate;
/// assert_eq!(format_coordinate(1.005), "1.01");
/// assert_eq!(format_coordinate(-9.999), "-10.00");
/// assert_eq!(format_coordinate(-0.001), "0.00");
/// ```
pub fn format_coordinate(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // `Display` for f64 never uses exponent notation
    let repr = value.abs().to_string();
    let (whole, frac) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits = whole.bytes().map(|b| b - b'0').collect::<Vec<_>>();
    let mut frac_digits = frac.bytes().map(|b| b - b'0').chain(std::iter::repeat(0));
    digits.extend(frac_digits.by_ref().take(2));
    let round_up = frac_digits.next().is_some_and(|d| d >= 5);

    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let is_zero = digits.iter().all(|d| *d == 0);
    let split = digits.len() - 2;
    let text = digits.iter().map(|d| char::from(b'0' + d)).collect::<String>();

    format!(
        "{}{}.{}",
        if value < 0.0 && !is_zero { "-" } else { "" },
        &text[..split],
        &text[split..]
    )
}

/// Render hit points as CSV text
///
/// # Examples
///
/// ```
/// use rangesim::Point3;
/// use rangesim::io::hit_points_csv;
/// let csv = hit_points_csv(&[Point3::new(1.005, 0.0, -9.999)]);
/// assert_eq!(csv, "x,y,z\n1.01,0.00,-10.00");
/// ```
pub fn hit_points_csv(points: &[Point3]) -> String {
    let rows = points.iter().map(|p| {
        format!(
            "{},{},{}",
            format_coordinate(p.x),
            format_coordinate(p.y),
            format_coordinate(p.z)
        )
    });

    std::iter::once("x,y,z".to_string())
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write hit points to a CSV file at `path`. If `path` is an existing directory the file is
/// created inside it as `hit_points.csv`.
pub fn write_hit_points_csv(path: &Path, points: &[Point3]) -> Result<()> {
    let path = if path.is_dir() {
        path.join(HIT_POINTS_FILE_NAME)
    } else {
        path.to_path_buf()
    };

    let mut file = File::create(path)?;
    file.write_all(hit_points_csv(points).as_bytes())?;
    Ok(())
}
