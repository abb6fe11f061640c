//! Pixel extraction: decode a photo into a bounded set of opaque RGB samples.
//!
//! A phone photo may be tens of megapixels; clustering must not scale with
//! that. The sampler first resizes the source to a small fixed target, so
//! the sample count is bounded by the target area regardless of the input
//! resolution, then walks the RGBA buffer and keeps only opaque pixels.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Default resize target width.
pub const DEFAULT_TARGET_WIDTH: u32 = 100;
/// Default resize target height.
pub const DEFAULT_TARGET_HEIGHT: u32 = 100;

/// Extracts a bounded, uniformly-sampled set of opaque RGB pixels from an image.
///
/// Sampling is a three-step pipeline:
///
/// 1. **Downsample** to the configured target (default 100×100) with a
///    triangle filter. Skipped when the source already has the target
///    dimensions.
/// 2. **Decode** to an RGBA8 buffer, four bytes per pixel.
/// 3. **Filter**: walk the buffer in 4-byte strides and drop every pixel
///    whose alpha channel is exactly zero. Fully transparent pixels carry no
///    visible color and would bias the palette toward background padding.
///
/// The result is in raster-scan order and holds at most `width × height`
/// samples. An image that decodes to zero opaque pixels yields an empty
/// vector, which is a valid result — distinct from a decode failure.
#[derive(Debug, Clone)]
pub struct PixelSampler {
    target_width: u32,
    target_height: u32,
}

impl PixelSampler {
    /// Create a sampler with the default 100×100 target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resize target. Both dimensions must be at least 1.
    pub fn with_target(mut self, width: u32, height: u32) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    /// Sample the image file at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be opened, [`Error::Decode`] if its
    /// contents cannot be decoded, [`Error::InvalidParameter`] on a
    /// zero-area target.
    pub fn sample_path(&self, path: impl AsRef<Path>) -> Result<Vec<Rgb>> {
        let image = ImageReader::open(path)?.decode()?;
        self.sample_image(&image)
    }

    /// Sample an encoded image held in memory (PNG, JPEG, ...).
    ///
    /// # Errors
    ///
    /// [`Error::Decode`] if the buffer cannot be decoded,
    /// [`Error::InvalidParameter`] on a zero-area target.
    pub fn sample_bytes(&self, bytes: &[u8]) -> Result<Vec<Rgb>> {
        let image = image::load_from_memory(bytes)?;
        self.sample_image(&image)
    }

    /// Sample an already-decoded image.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] on a zero-area target.
    pub fn sample_image(&self, image: &DynamicImage) -> Result<Vec<Rgb>> {
        if self.target_width == 0 || self.target_height == 0 {
            return Err(Error::InvalidParameter {
                name: "target",
                message: "resize target must be at least 1x1",
            });
        }

        let rgba = if image.dimensions() == (self.target_width, self.target_height) {
            image.to_rgba8()
        } else {
            image
                .resize_exact(self.target_width, self.target_height, FilterType::Triangle)
                .to_rgba8()
        };

        let mut pixels =
            Vec::with_capacity(self.target_width as usize * self.target_height as usize);
        for px in rgba.into_raw().chunks_exact(4) {
            if px[3] == 0 {
                continue;
            }
            pixels.push(Rgb::new(px[0], px[1], px[2]));
        }
        Ok(pixels)
    }
}

impl Default for PixelSampler {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: DEFAULT_TARGET_HEIGHT,
        }
    }
}
