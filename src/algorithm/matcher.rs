//! Nearest-color search strategies over an element library

use crate::algorithm::library::ElementLibrary;
use crate::color::Rgb;
use crate::io::error::Result;

/// Finds the library element that best approximates a target color
///
/// Implementations must return the same index as [`LinearScan`] for every
/// input, including its lowest-index tie-break, so swapping strategies never
/// changes the mosaic. They are shared across worker threads during a build.
pub trait Matcher: Sync {
    /// Index of the element closest to `target`
    ///
    /// # Errors
    ///
    /// Returns [`crate::MosaicError::EmptyLibrary`] if the library has no elements
    fn best_match(&self, library: &ElementLibrary, target: Rgb) -> Result<usize>;
}

/// Reference strategy: a full scan of the library for every query
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScan;

impl Matcher for LinearScan {
    fn best_match(&self, library: &ElementLibrary, target: Rgb) -> Result<usize> {
        library.find_best_match(target)
    }
}
