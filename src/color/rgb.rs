//! Eight-bit RGB triple used for representative tile and cell colors

use ndarray::{ArrayView3, Axis};

/// Representative color of an element tile or template cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels in `[r, g, b]` order
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Rounded per-channel mean of a `(height, width, 3)` pixel block
    ///
    /// An empty block averages to black.
    pub fn mean_of(pixels: ArrayView3<'_, u8>) -> Self {
        let (height, width, _) = pixels.dim();
        let count = (height * width) as u64;
        if count == 0 {
            return Self::default();
        }

        let mut sums = [0u64; 3];
        for pixel in pixels.lanes(Axis(2)) {
            for (sum, &value) in sums.iter_mut().zip(pixel.iter()) {
                *sum += u64::from(value);
            }
        }

        // Round half up
        let [r, g, b] = sums.map(|sum| ((sum + count / 2) / count) as u8);
        Self::new(r, g, b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.channels()
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self::from(pixel.0)
    }
}
