//! Coarse template color grid
//!
//! Each cell holds the representative color of one `resolution × resolution`
//! block of the template (smaller at the trailing edges). Cells are addressed
//! `(x, y)` with `x` the column and `y` the row; storage is row-major.

use ndarray::{Array2, ArrayView1, Axis};

use crate::color::Rgb;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter, invalid_source};

/// Number of grid cells `(width, height)` covering a template at a given resolution
///
/// Uses ceiling division, so a partial block at the right or bottom edge still
/// gets its own cell.
///
/// # Errors
///
/// Returns an error if:
/// - `resolution` is zero
/// - Either template dimension is zero
/// - Either resulting grid dimension exceeds [`MAX_GRID_DIMENSION`]
pub fn grid_dimensions(
    template_width: usize,
    template_height: usize,
    resolution: usize,
) -> Result<(usize, usize)> {
    if resolution == 0 {
        return Err(invalid_parameter(
            "resolution",
            &resolution,
            &"must be at least 1",
        ));
    }
    if template_width == 0 || template_height == 0 {
        return Err(invalid_source(&format!(
            "template has zero size ({template_width}x{template_height})"
        )));
    }

    let width = template_width.div_ceil(resolution);
    let height = template_height.div_ceil(resolution);
    check_limits(width, height)?;
    Ok((width, height))
}

fn check_limits(width: usize, height: usize) -> Result<()> {
    if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
        return Err(invalid_source(&format!(
            "grid {width}x{height} exceeds the {MAX_GRID_DIMENSION} cell limit per side"
        )));
    }
    Ok(())
}

/// Two-dimensional array of cell colors, at least one cell on each side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    /// Cell colors indexed `[row, col]`
    cells: Array2<Rgb>,
}

impl ColorGrid {
    /// Wrap an array of cell colors indexed `[row, col]`
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds [`MAX_GRID_DIMENSION`]
    pub fn new(cells: Array2<Rgb>) -> Result<Self> {
        let (height, width) = cells.dim();
        if width == 0 || height == 0 {
            return Err(invalid_source(&format!(
                "grid must have at least one cell per side, got {width}x{height}"
            )));
        }
        check_limits(width, height)?;
        Ok(Self { cells })
    }

    /// Build a grid from rows of colors, top row first
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, a row is empty, or the rows differ in length
    pub fn from_rows(rows: &[Vec<Rgb>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if let Some(ragged) = rows.iter().position(|row| row.len() != width) {
            return Err(invalid_source(&format!(
                "grid row {ragged} has {} cells, expected {width}",
                rows.get(ragged).map_or(0, Vec::len)
            )));
        }

        let flat: Vec<Rgb> = rows.iter().flatten().copied().collect();
        let cells = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| invalid_source(&e))?;
        Self::new(cells)
    }

    /// Grid of a single repeated color
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds [`MAX_GRID_DIMENSION`]
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self> {
        Self::new(Array2::from_elem((height, width), color))
    }

    /// Number of cells per row
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Color of the cell at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.cells.get([y, x]).copied()
    }

    /// Rows of cell colors, top to bottom
    pub fn rows(&self) -> impl ExactSizeIterator<Item = ArrayView1<'_, Rgb>> {
        self.cells.axis_iter(Axis(0))
    }

    /// Underlying `[row, col]` array
    pub const fn cells(&self) -> &Array2<Rgb> {
        &self.cells
    }
}
