//! Grid and raster data structures
//!
//! This module contains the two rasters a build moves between:
//! - The coarse color grid sampled from the template
//! - The output canvas that element tiles are stamped into

/// Output raster assembled from element tiles
pub mod canvas;
/// Coarse template color grid and its dimension arithmetic
pub mod grid;

pub use canvas::Canvas;
pub use grid::ColorGrid;
