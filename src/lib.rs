//! Photomosaic generation by nearest-color tile matching
//!
//! A template image is sampled into a coarse grid of colors. Every cell is
//! replaced by the element image whose representative color is closest in RGB
//! space, and the chosen tiles are stamped side by side into the output canvas.

/// Element library, matching, composition, and build orchestration
pub mod algorithm;
/// RGB color values and the Euclidean color metric
pub mod color;
/// Input/output collaborators, command line, and error handling
pub mod io;
/// Coarse color grid and output canvas
pub mod spatial;

pub use algorithm::builder::{MosaicBuilder, MosaicConfig};
pub use io::error::{MosaicError, Result};
