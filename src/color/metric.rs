//! Euclidean distance between colors treated as points in RGB space

use crate::color::Rgb;

/// Squared Euclidean distance between two colors
///
/// Exact integer form of [`distance`]; it orders any set of colors the same way
/// and yields equal values exactly where [`distance`] does, so comparisons can
/// skip the square root.
pub const fn squared_distance(a: Rgb, b: Rgb) -> u32 {
    let dr = a.r.abs_diff(b.r) as u32;
    let dg = a.g.abs_diff(b.g) as u32;
    let db = a.b.abs_diff(b.b) as u32;
    dr * dr + dg * dg + db * db
}

/// Euclidean distance `sqrt(dr² + dg² + db²)` between two colors
///
/// Symmetric, non-negative, and zero exactly when `a == b`.
pub fn distance(a: Rgb, b: Rgb) -> f64 {
    f64::from(squared_distance(a, b)).sqrt()
}
