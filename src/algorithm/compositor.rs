//! Mosaic assembly: match every grid cell and stamp the winning tile
//!
//! The canvas is split into one horizontal band per grid row. Bands never
//! overlap, so they can be filled one after another or on the rayon pool with
//! byte-identical results.

use ndarray::{ArrayView1, ArrayViewMut3};
use rayon::prelude::*;

use crate::algorithm::builder::BuildObserver;
use crate::algorithm::cache::{CacheStats, MatchCache};
use crate::algorithm::library::ElementLibrary;
use crate::algorithm::matcher::{LinearScan, Matcher};
use crate::color::Rgb;
use crate::io::error::{MosaicError, Result, computation_error};
use crate::spatial::canvas::{Canvas, blit};
use crate::spatial::grid::ColorGrid;

/// Finished canvas together with matching statistics
#[derive(Debug, Clone)]
pub struct Composition {
    /// Fully populated output raster
    pub canvas: Canvas,
    /// Cache hits and misses summed over all bands
    pub stats: CacheStats,
}

/// Builds a canvas from a color grid by nearest-color tile placement
#[derive(Debug, Clone)]
pub struct Compositor<'a, M = LinearScan> {
    library: &'a ElementLibrary,
    matcher: M,
    parallel: bool,
}

impl<'a> Compositor<'a> {
    /// Compositor using the reference linear scan, running sequentially
    pub const fn new(library: &'a ElementLibrary) -> Self {
        Self::with_matcher(library, LinearScan)
    }
}

impl<'a, M: Matcher> Compositor<'a, M> {
    /// Compositor using a custom matching strategy, running sequentially
    pub const fn with_matcher(library: &'a ElementLibrary, matcher: M) -> Self {
        Self {
            library,
            matcher,
            parallel: false,
        }
    }

    /// Fill grid rows concurrently on the rayon thread pool
    #[must_use]
    pub const fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Assemble the mosaic for `grid`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The library is empty
    /// - The canvas dimensions overflow
    pub fn build(&self, grid: &ColorGrid) -> Result<Canvas> {
        self.compose(grid, &()).map(|composition| composition.canvas)
    }

    /// Assemble the mosaic for `grid`, reporting each finished row to `observer`
    ///
    /// Output is `grid.width() * element_size` pixels wide and
    /// `grid.height() * element_size` pixels tall, with every pixel written once.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The library is empty
    /// - The canvas dimensions overflow
    /// - The matcher returns an index outside the library
    pub fn compose(&self, grid: &ColorGrid, observer: &dyn BuildObserver) -> Result<Composition> {
        // Checked up front so no band starts and the failure is the same on every run
        if self.library.is_empty() {
            return Err(MosaicError::EmptyLibrary);
        }

        let element_size = self.library.element_size();
        let mut canvas = Canvas::for_grid(grid.width(), grid.height(), element_size)?;
        let rows: Vec<ArrayView1<'_, Rgb>> = grid.rows().collect();
        let bands = canvas.bands_mut(element_size);

        let stats = if self.parallel {
            bands
                .into_par_iter()
                .zip(rows.into_par_iter())
                .enumerate()
                .map(|(y, (mut band, cells))| -> Result<CacheStats> {
                    let mut cache = MatchCache::new();
                    self.fill_band(&mut band, cells, &mut cache)?;
                    observer.row_completed(y);
                    Ok(cache.stats)
                })
                .try_reduce(CacheStats::default, |a, b| Ok(a.merge(b)))?
        } else {
            let mut cache = MatchCache::new();
            for (y, (mut band, cells)) in bands.into_iter().zip(rows).enumerate() {
                self.fill_band(&mut band, cells, &mut cache)?;
                observer.row_completed(y);
            }
            cache.stats
        };

        Ok(Composition { canvas, stats })
    }

    fn fill_band(
        &self,
        band: &mut ArrayViewMut3<'_, u8>,
        cells: ArrayView1<'_, Rgb>,
        cache: &mut MatchCache,
    ) -> Result<()> {
        let element_size = self.library.element_size();

        for (x, &target) in cells.iter().enumerate() {
            let index =
                cache.get_or_compute(target, || self.matcher.best_match(self.library, target))?;
            let element = self.library.get(index).ok_or_else(|| {
                computation_error(
                    "tile lookup",
                    &format!(
                        "matcher returned index {index} for a library of {}",
                        self.library.len()
                    ),
                )
            })?;
            blit(band, x * element_size, element.raster())?;
        }

        Ok(())
    }
}
