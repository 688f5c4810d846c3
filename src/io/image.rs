//! Default image collaborators backed by the `image` crate
//!
//! Decoding, resizing, and encoding live here so the matching core only ever
//! sees color grids and square rasters.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};
use ndarray::{Array3, s};

use crate::algorithm::builder::{CanvasPersister, ElementDecoder, TemplateDecoder, TemplateSample};
use crate::algorithm::library::{ElementImage, ElementLibrary};
use crate::color::Rgb;
use crate::io::configuration::SUPPORTED_EXTENSIONS;
use crate::io::error::{MosaicError, Result, computation_error, invalid_parameter};
use crate::spatial::canvas::Canvas;
use crate::spatial::grid::{ColorGrid, grid_dimensions};

/// Whether `path` has one of the supported image extensions (case-insensitive)
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Encoding format selected by the extension of `path`
///
/// # Errors
///
/// Returns an error if the extension is missing or not one of bmp, jpg, jpeg, png, gif
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("bmp") => Ok(ImageFormat::Bmp),
        Some("jpg" | "jpeg") => Ok(ImageFormat::Jpeg),
        Some("png") => Ok(ImageFormat::Png),
        Some("gif") => Ok(ImageFormat::Gif),
        _ => Err(MosaicError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Open any supported image as 8-bit RGB
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|e| MosaicError::DecodeFailure {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Convert an `image` buffer to a `(height, width, 3)` array
///
/// # Errors
///
/// Returns an error if the buffer length does not match its dimensions
pub fn image_to_array(img: RgbImage) -> Result<Array3<u8>> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    Array3::from_shape_vec((height, width, 3), img.into_raw())
        .map_err(|e| computation_error("image conversion", &e))
}

/// Samples a template into a grid of block mean colors
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageTemplateDecoder;

impl ImageTemplateDecoder {
    /// Sample an in-memory template
    ///
    /// Each cell is the rounded mean of its `resolution × resolution` block;
    /// blocks on the right and bottom edges may be smaller.
    ///
    /// # Errors
    ///
    /// Returns an error if `resolution` is zero or the image is empty
    pub fn sample(img: RgbImage, resolution: usize) -> Result<TemplateSample> {
        let (width, height) = (img.width() as usize, img.height() as usize);
        let (grid_width, grid_height) = grid_dimensions(width, height, resolution)?;
        let pixels = image_to_array(img)?;

        let mut cells = Vec::with_capacity(grid_width * grid_height);
        for gy in 0..grid_height {
            let y_start = gy * resolution;
            let y_end = (y_start + resolution).min(height);
            for gx in 0..grid_width {
                let x_start = gx * resolution;
                let x_end = (x_start + resolution).min(width);
                let block = pixels.slice(s![y_start..y_end, x_start..x_end, ..]);
                cells.push(Rgb::mean_of(block));
            }
        }

        let cells = ndarray::Array2::from_shape_vec((grid_height, grid_width), cells)
            .map_err(|e| computation_error("template sampling", &e))?;

        Ok(TemplateSample {
            width,
            height,
            grid: ColorGrid::new(cells)?,
        })
    }
}

impl TemplateDecoder for ImageTemplateDecoder {
    fn decode_template(&self, path: &Path, resolution: usize) -> Result<TemplateSample> {
        if resolution == 0 {
            return Err(invalid_parameter(
                "resolution",
                &resolution,
                &"must be at least 1",
            ));
        }
        Self::sample(load_rgb(path)?, resolution)
    }
}

/// Loads a directory of images as square element tiles
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageElementDecoder;

impl ImageElementDecoder {
    /// Turn an arbitrary image into an `element_size` square tile
    ///
    /// The largest centered square is cropped out and resized; the tile's
    /// representative color is the mean of the resized pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if `element_size` is zero, the image is empty, or it
    /// does not fit in the `image` crate's dimensions
    pub fn prepare(img: &RgbImage, element_size: usize) -> Result<ElementImage> {
        if element_size == 0 {
            return Err(invalid_parameter(
                "element_size",
                &element_size,
                &"must be at least 1",
            ));
        }
        let side = u32::try_from(element_size)
            .map_err(|e| invalid_parameter("element_size", &element_size, &e))?;

        let (width, height) = img.dimensions();
        let square = width.min(height);
        if square == 0 {
            return Err(computation_error("element preparation", &"image is empty"));
        }
        let left = (width - square) / 2;
        let top = (height - square) / 2;

        let cropped = imageops::crop_imm(img, left, top, square, square).to_image();
        let tile = if square == side {
            cropped
        } else {
            imageops::resize(&cropped, side, side, FilterType::Triangle)
        };

        ElementImage::from_raster(image_to_array(tile)?)
    }

    /// Image files in `directory` with a supported extension, in listing order
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or one of its entries cannot be read
    pub fn list_images(directory: &Path) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(directory).map_err(|e| MosaicError::FileSystem {
            path: directory.to_path_buf(),
            operation: "list directory",
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| MosaicError::FileSystem {
                    path: directory.to_path_buf(),
                    operation: "read directory entry",
                    source: e,
                })?
                .path();
            if path.is_file() && has_supported_extension(&path) {
                files.push(path);
            }
        }
        Ok(files)
    }
}

impl ElementDecoder for ImageElementDecoder {
    fn decode_elements(&self, directory: &Path, element_size: usize) -> Result<ElementLibrary> {
        let mut library = ElementLibrary::new(element_size)?;
        for path in Self::list_images(directory)? {
            let img = load_rgb(&path)?;
            library.push(Self::prepare(&img, element_size)?)?;
        }
        Ok(library)
    }
}

/// Encodes canvases with a format chosen by the output extension
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCanvasPersister;

impl CanvasPersister for ImageCanvasPersister {
    fn persist(&self, canvas: &Canvas, path: &Path) -> Result<()> {
        let format = output_format(path)?;
        let img = canvas.to_rgb_image()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        img.save_with_format(path, format)
            .map_err(|e| MosaicError::PersistFailure {
                path: path.to_path_buf(),
                source: e,
            })
    }
}
