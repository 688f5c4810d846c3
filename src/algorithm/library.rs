//! Element tiles and the ordered library they are matched from

use ndarray::{Array3, ArrayView3};

use crate::color::{Rgb, squared_distance};
use crate::io::error::{MosaicError, Result, invalid_parameter, invalid_source};

/// One candidate tile: a square RGB raster and its representative color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementImage {
    raster: Array3<u8>,
    color: Rgb,
}

impl ElementImage {
    /// Create an element from a `(size, size, 3)` raster and its representative color
    ///
    /// # Errors
    ///
    /// Returns an error if the raster is not square, is empty, or does not have three channels
    pub fn new(raster: Array3<u8>, color: Rgb) -> Result<Self> {
        let (height, width, channels) = raster.dim();
        if channels != 3 {
            return Err(invalid_source(&format!(
                "element raster needs 3 channels, got {channels}"
            )));
        }
        if width != height || width == 0 {
            return Err(invalid_source(&format!(
                "element raster must be a non-empty square, got {width}x{height}"
            )));
        }
        Ok(Self { raster, color })
    }

    /// Create an element whose representative color is the mean of its raster
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`ElementImage::new`]
    pub fn from_raster(raster: Array3<u8>) -> Result<Self> {
        let color = Rgb::mean_of(raster.view());
        Self::new(raster, color)
    }

    /// Element of side `size` filled with a single color
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero
    pub fn solid(size: usize, color: Rgb) -> Result<Self> {
        let mut raster = Array3::<u8>::zeros((size, size, 3));
        for (channel, value) in color.channels().into_iter().enumerate() {
            raster.index_axis_mut(ndarray::Axis(2), channel).fill(value);
        }
        Self::new(raster, color)
    }

    /// Tile pixels, shape `(size, size, 3)`
    pub fn raster(&self) -> ArrayView3<'_, u8> {
        self.raster.view()
    }

    /// Representative color
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Side length in pixels
    pub fn size(&self) -> usize {
        self.raster.dim().0
    }
}

/// Ordered, append-only collection of equally sized element tiles
///
/// Insertion order is the order elements were decoded in. It decides ties in
/// [`ElementLibrary::find_best_match`], so it must stay fixed for a build.
#[derive(Debug, Clone)]
pub struct ElementLibrary {
    element_size: usize,
    elements: Vec<ElementImage>,
}

impl ElementLibrary {
    /// Create an empty library for tiles of side `element_size`
    ///
    /// # Errors
    ///
    /// Returns an error if `element_size` is zero
    pub fn new(element_size: usize) -> Result<Self> {
        if element_size == 0 {
            return Err(invalid_parameter(
                "element_size",
                &element_size,
                &"must be at least 1",
            ));
        }
        Ok(Self {
            element_size,
            elements: Vec::new(),
        })
    }

    /// Create a library from elements in their intended order
    ///
    /// # Errors
    ///
    /// Returns an error if `element_size` is zero or any element has a different side length
    pub fn from_elements(element_size: usize, elements: Vec<ElementImage>) -> Result<Self> {
        let mut library = Self::new(element_size)?;
        library.elements.reserve(elements.len());
        for element in elements {
            library.push(element)?;
        }
        Ok(library)
    }

    /// Append an element at the end of the library order
    ///
    /// # Errors
    ///
    /// Returns an error if the element's side length differs from the library's
    pub fn push(&mut self, element: ElementImage) -> Result<()> {
        let (height, width, _) = element.raster.dim();
        if width != self.element_size || height != self.element_size {
            return Err(MosaicError::ElementSizeMismatch {
                index: self.elements.len(),
                expected: self.element_size,
                width,
                height,
            });
        }
        self.elements.push(element);
        Ok(())
    }

    /// Side length shared by every element
    pub const fn element_size(&self) -> usize {
        self.element_size
    }

    /// Number of elements
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the library holds no elements
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index` in library order
    pub fn get(&self, index: usize) -> Option<&ElementImage> {
        self.elements.get(index)
    }

    /// Elements in library order
    pub fn iter(&self) -> std::slice::Iter<'_, ElementImage> {
        self.elements.iter()
    }

    /// Index of the element whose color is closest to `target`
    ///
    /// Scans every element once. Among equally close elements the lowest index wins.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyLibrary`] if the library has no elements
    pub fn find_best_match(&self, target: Rgb) -> Result<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (index, element) in self.elements.iter().enumerate() {
            let candidate = squared_distance(target, element.color);
            // Strict comparison keeps the first of equal minima
            if best.is_none_or(|(_, shortest)| candidate < shortest) {
                best = Some((index, candidate));
            }
        }
        best.map(|(index, _)| index).ok_or(MosaicError::EmptyLibrary)
    }
}

impl<'a> IntoIterator for &'a ElementLibrary {
    type Item = &'a ElementImage;
    type IntoIter = std::slice::Iter<'a, ElementImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
