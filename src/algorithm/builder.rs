//! Build orchestration and the boundary traits for image collaborators
//!
//! [`MosaicBuilder`] is the only part of the crate that talks to both the
//! decoders and, through [`MosaicBuilder::build_and_save`], the persister.
//! Everything it does beyond validation is a straight line: load elements,
//! sample the template, compose.

use std::path::{Path, PathBuf};

use crate::algorithm::compositor::{Composition, Compositor};
use crate::algorithm::library::ElementLibrary;
use crate::io::error::{MosaicError, Result, invalid_parameter, invalid_source};
use crate::io::image::{ImageElementDecoder, ImageTemplateDecoder};
use crate::spatial::canvas::Canvas;
use crate::spatial::grid::{ColorGrid, grid_dimensions};

/// Template dimensions together with its coarse color grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSample {
    /// Template width in pixels
    pub width: usize,
    /// Template height in pixels
    pub height: usize,
    /// `ceil(width / resolution) × ceil(height / resolution)` cell colors
    pub grid: ColorGrid,
}

/// Turns a template image into a coarse color grid
pub trait TemplateDecoder {
    /// Decode the template at `path`, sampling one cell per `resolution`-pixel block
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be read or decoded
    fn decode_template(&self, path: &Path, resolution: usize) -> Result<TemplateSample>;
}

/// Turns a directory of candidate images into an element library
pub trait ElementDecoder {
    /// Decode every usable image in `directory` into `element_size`-pixel tiles
    ///
    /// The library keeps the directory listing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed or an image fails to decode
    fn decode_elements(&self, directory: &Path, element_size: usize) -> Result<ElementLibrary>;
}

impl<T: TemplateDecoder + ?Sized> TemplateDecoder for &T {
    fn decode_template(&self, path: &Path, resolution: usize) -> Result<TemplateSample> {
        (**self).decode_template(path, resolution)
    }
}

impl<E: ElementDecoder + ?Sized> ElementDecoder for &E {
    fn decode_elements(&self, directory: &Path, element_size: usize) -> Result<ElementLibrary> {
        (**self).decode_elements(directory, element_size)
    }
}

/// Writes a finished canvas to its destination
pub trait CanvasPersister {
    /// Encode `canvas` to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unsupported or encoding fails
    fn persist(&self, canvas: &Canvas, path: &Path) -> Result<()>;
}

/// Receives progress notifications during a build
///
/// Every method defaults to doing nothing; `()` is the silent observer.
/// Rows may complete out of order and from several threads when composing in parallel.
pub trait BuildObserver: Sync {
    /// The element library has been decoded
    fn elements_loaded(&self, _count: usize) {}

    /// The template has been sampled into a grid of the given size
    fn template_sampled(&self, _grid_width: usize, _grid_height: usize) {}

    /// Grid row `y` has been stamped into the canvas
    fn row_completed(&self, _y: usize) {}
}

impl BuildObserver for () {}

/// The four parameters of one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicConfig {
    template_path: PathBuf,
    resolution: usize,
    element_directory: PathBuf,
    element_size: usize,
}

impl MosaicConfig {
    /// Create a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if `resolution` or `element_size` is zero
    pub fn new(
        template_path: impl Into<PathBuf>,
        resolution: usize,
        element_directory: impl Into<PathBuf>,
        element_size: usize,
    ) -> Result<Self> {
        if resolution == 0 {
            return Err(invalid_parameter(
                "resolution",
                &resolution,
                &"must be at least 1",
            ));
        }
        if element_size == 0 {
            return Err(invalid_parameter(
                "element_size",
                &element_size,
                &"must be at least 1",
            ));
        }

        Ok(Self {
            template_path: template_path.into(),
            resolution,
            element_directory: element_directory.into(),
            element_size,
        })
    }

    /// Path of the template image
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Side length in template pixels of one sampled block
    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    /// Directory holding the element images
    pub fn element_directory(&self) -> &Path {
        &self.element_directory
    }

    /// Side length in output pixels of one element tile
    pub const fn element_size(&self) -> usize {
        self.element_size
    }
}

/// Drives one complete mosaic build from decoded inputs to a finished canvas
#[derive(Debug, Clone, Default)]
pub struct MosaicBuilder<T = ImageTemplateDecoder, E = ImageElementDecoder> {
    template_decoder: T,
    element_decoder: E,
    parallel: bool,
}

impl MosaicBuilder {
    /// Builder backed by the `image` crate decoders, running sequentially
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: TemplateDecoder, E: ElementDecoder> MosaicBuilder<T, E> {
    /// Builder with custom decoding collaborators, running sequentially
    pub const fn with_decoders(template_decoder: T, element_decoder: E) -> Self {
        Self {
            template_decoder,
            element_decoder,
            parallel: false,
        }
    }

    /// Compose grid rows concurrently
    #[must_use]
    pub const fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Build the mosaic described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails, the element library is empty, the
    /// decoded shapes disagree with `config`, or composition fails
    pub fn build_mosaic(&self, config: &MosaicConfig) -> Result<Canvas> {
        self.build_observed(config, &())
            .map(|composition| composition.canvas)
    }

    /// Build the mosaic described by `config`, reporting progress to `observer`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The element directory cannot be decoded or yields no elements
    /// - The decoded elements are not `element_size` pixels square
    /// - The template cannot be decoded
    /// - The sampled grid does not cover the template at `resolution`
    /// - Composition fails
    pub fn build_observed(
        &self,
        config: &MosaicConfig,
        observer: &dyn BuildObserver,
    ) -> Result<Composition> {
        let library = self
            .element_decoder
            .decode_elements(config.element_directory(), config.element_size())?;
        observer.elements_loaded(library.len());

        if library.is_empty() {
            return Err(MosaicError::EmptyLibrary);
        }
        if library.element_size() != config.element_size() {
            return Err(invalid_source(&format!(
                "element decoder produced {}-pixel tiles, expected {}",
                library.element_size(),
                config.element_size()
            )));
        }

        let sample = self
            .template_decoder
            .decode_template(config.template_path(), config.resolution())?;
        let expected = grid_dimensions(sample.width, sample.height, config.resolution())?;
        let actual = (sample.grid.width(), sample.grid.height());
        if actual != expected {
            return Err(invalid_source(&format!(
                "template decoder produced a {}x{} grid for a {}x{} template at resolution {}, expected {}x{}",
                actual.0,
                actual.1,
                sample.width,
                sample.height,
                config.resolution(),
                expected.0,
                expected.1
            )));
        }
        observer.template_sampled(actual.0, actual.1);

        Compositor::new(&library)
            .parallel(self.parallel)
            .compose(&sample.grid, observer)
    }

    /// Build the mosaic and hand it to `persister` for writing to `output`
    ///
    /// Nothing is written if the build fails.
    ///
    /// # Errors
    ///
    /// Returns any build error, or the persister's error if writing fails
    pub fn build_and_save(
        &self,
        config: &MosaicConfig,
        output: &Path,
        persister: &dyn CanvasPersister,
        observer: &dyn BuildObserver,
    ) -> Result<Composition> {
        let composition = self.build_observed(config, observer)?;
        persister.persist(&composition.canvas, output)?;
        Ok(composition)
    }
}
