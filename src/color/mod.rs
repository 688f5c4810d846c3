//! Color values and the dissimilarity metric used for matching

/// Euclidean RGB distance
pub mod metric;
/// Eight-bit RGB triple and block averaging
pub mod rgb;

pub use metric::{distance, squared_distance};
pub use rgb::Rgb;
