//! Output raster of the mosaic
//!
//! Pixels are stored as an `ndarray` of shape `(height, width, 3)` so element
//! tiles can be stamped in with a single slice assignment.

use image::RgbImage;
use ndarray::{Array3, ArrayView3, ArrayViewMut3, Axis, s};

use crate::color::Rgb;
use crate::io::configuration::MAX_CANVAS_PIXELS;
use crate::io::error::{Result, computation_error, invalid_source};

/// Eight-bit RGB raster owned by the builder until it is handed to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Array3<u8>,
}

impl Canvas {
    /// Allocate a zeroed canvas covering `grid_width × grid_height` tiles of `element_size` pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel dimensions overflow or the canvas would
    /// exceed [`MAX_CANVAS_PIXELS`]
    pub fn for_grid(grid_width: usize, grid_height: usize, element_size: usize) -> Result<Self> {
        let width = grid_width
            .checked_mul(element_size)
            .ok_or_else(|| computation_error("canvas allocation", &"width overflows"))?;
        let height = grid_height
            .checked_mul(element_size)
            .ok_or_else(|| computation_error("canvas allocation", &"height overflows"))?;
        let pixel_count = width
            .checked_mul(height)
            .ok_or_else(|| computation_error("canvas allocation", &"pixel count overflows"))?;
        if pixel_count > MAX_CANVAS_PIXELS {
            return Err(computation_error(
                "canvas allocation",
                &format!("{width}x{height} canvas exceeds the {MAX_CANVAS_PIXELS} pixel limit"),
            ));
        }

        Ok(Self {
            pixels: Array3::zeros((height, width, 3)),
        })
    }

    /// Wrap an existing `(height, width, 3)` pixel array
    ///
    /// # Errors
    ///
    /// Returns an error if the last axis does not hold exactly three channels
    pub fn from_pixels(pixels: Array3<u8>) -> Result<Self> {
        let (_, _, channels) = pixels.dim();
        if channels != 3 {
            return Err(invalid_source(&format!(
                "canvas needs 3 channels, got {channels}"
            )));
        }
        Ok(Self { pixels })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Color of the pixel at column `x`, row `y`
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        let r = *self.pixels.get([y, x, 0])?;
        let g = *self.pixels.get([y, x, 1])?;
        let b = *self.pixels.get([y, x, 2])?;
        Some(Rgb::new(r, g, b))
    }

    /// Read-only view of the `(height, width, 3)` pixels
    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// Split into disjoint horizontal bands of `band_height` rows, top to bottom
    ///
    /// The last band is shorter when the height is not a multiple of `band_height`.
    pub(crate) fn bands_mut(&mut self, band_height: usize) -> Vec<ArrayViewMut3<'_, u8>> {
        self.pixels
            .axis_chunks_iter_mut(Axis(0), band_height.max(1))
            .collect()
    }

    /// Convert into an `image` buffer for encoding
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension does not fit in `u32`
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let width =
            u32::try_from(self.width()).map_err(|e| computation_error("canvas conversion", &e))?;
        let height =
            u32::try_from(self.height()).map_err(|e| computation_error("canvas conversion", &e))?;
        let raw: Vec<u8> = self.pixels.iter().copied().collect();

        RgbImage::from_raw(width, height, raw).ok_or_else(|| {
            computation_error("canvas conversion", &"pixel buffer does not match dimensions")
        })
    }
}

/// Copy `tile` verbatim into `band` with its left edge at column `x_offset`
///
/// The tile occupies rows `0..tile_height` of the band.
///
/// # Errors
///
/// Returns an error if the tile does not fit inside the band
pub(crate) fn blit(
    band: &mut ArrayViewMut3<'_, u8>,
    x_offset: usize,
    tile: ArrayView3<'_, u8>,
) -> Result<()> {
    let (tile_height, tile_width, _) = tile.dim();
    let (band_height, band_width, _) = band.dim();
    let x_end = x_offset + tile_width;

    if tile_height > band_height || x_end > band_width {
        return Err(computation_error(
            "tile placement",
            &format!(
                "{tile_width}x{tile_height} tile at column {x_offset} exceeds {band_width}x{band_height} band"
            ),
        ));
    }

    band.slice_mut(s![..tile_height, x_offset..x_end, ..]).assign(&tile);
    Ok(())
}
