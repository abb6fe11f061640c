//! The end-to-end pipeline: photo → pixel samples → color palette.

use std::path::Path;

use image::DynamicImage;

use crate::cluster::{Kmeans, KmeansFit, DEFAULT_MAX_ITER};
use crate::color::Rgb;
use crate::error::Result;
use crate::extract::PixelSampler;

/// Default number of palette colors.
pub const DEFAULT_K: usize = 3;

/// Dominant-color palette extraction: sampling plus clustering in one call.
///
/// Composes a [`PixelSampler`] and a [`Kmeans`] fit. The first centroid of
/// the palette is the image's dominant color. Extraction is best-effort
/// enrichment in the host flow: on failure, callers typically substitute
/// [`Rgb::WHITE`] rather than failing the surrounding action — that
/// fallback stays with the caller, the pipeline itself always reports
/// failures.
///
/// Each call builds its own working state, so one extractor can serve
/// concurrent extractions of separate images.
#[derive(Debug, Clone)]
pub struct PaletteExtractor {
    sampler: PixelSampler,
    k: usize,
    max_iter: usize,
    seed: Option<u64>,
}

impl PaletteExtractor {
    /// Create an extractor with the defaults: 3 colors, 100×100 sampling
    /// target, 100-iteration cap, unseeded RNG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of palette colors.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the sampling resize target.
    pub fn with_target(mut self, width: u32, height: u32) -> Self {
        self.sampler = self.sampler.with_target(width, height);
        self
    }

    /// Set the clustering iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seed the clustering RNG for reproducible palettes.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Extract the palette of the image file at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`]/[`Error::Decode`] if the image cannot be read or
    /// decoded; [`Error::EmptyInput`] if it decodes to zero opaque pixels;
    /// [`Error::InvalidClusterCount`] if fewer opaque pixels than `k`
    /// remain after sampling.
    ///
    /// [`Error::Io`]: crate::Error::Io
    /// [`Error::Decode`]: crate::Error::Decode
    /// [`Error::EmptyInput`]: crate::Error::EmptyInput
    /// [`Error::InvalidClusterCount`]: crate::Error::InvalidClusterCount
    pub fn palette_path(&self, path: impl AsRef<Path>) -> Result<Vec<Rgb>> {
        let pixels = self.sampler.sample_path(path)?;
        Ok(self.fit(&pixels)?.into_centroids())
    }

    /// Extract the palette of an encoded image held in memory.
    pub fn palette_bytes(&self, bytes: &[u8]) -> Result<Vec<Rgb>> {
        let pixels = self.sampler.sample_bytes(bytes)?;
        Ok(self.fit(&pixels)?.into_centroids())
    }

    /// Extract the palette of an already-decoded image.
    pub fn palette_image(&self, image: &DynamicImage) -> Result<Vec<Rgb>> {
        let pixels = self.sampler.sample_image(image)?;
        Ok(self.fit(&pixels)?.into_centroids())
    }

    /// Extract the dominant color of the image file at `path`.
    pub fn dominant_path(&self, path: impl AsRef<Path>) -> Result<Rgb> {
        let pixels = self.sampler.sample_path(path)?;
        Ok(self.fit(&pixels)?.dominant())
    }

    /// Extract the dominant color of an encoded image held in memory.
    pub fn dominant_bytes(&self, bytes: &[u8]) -> Result<Rgb> {
        let pixels = self.sampler.sample_bytes(bytes)?;
        Ok(self.fit(&pixels)?.dominant())
    }

    /// Extract the dominant color of an already-decoded image.
    pub fn dominant_image(&self, image: &DynamicImage) -> Result<Rgb> {
        let pixels = self.sampler.sample_image(image)?;
        Ok(self.fit(&pixels)?.dominant())
    }

    fn fit(&self, pixels: &[Rgb]) -> Result<KmeansFit> {
        let mut model = Kmeans::new(self.k).with_max_iter(self.max_iter);
        if let Some(seed) = self.seed {
            model = model.with_seed(seed);
        }
        model.fit(pixels)
    }
}

impl Default for PaletteExtractor {
    fn default() -> Self {
        Self {
            sampler: PixelSampler::new(),
            k: DEFAULT_K,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_solid_image_fills_every_palette_slot() {
        // A single-color image exercises both degenerate-seeding and
        // empty-cluster retention: all three centroids settle on the color,
        // whichever seed is drawn.
        let green = Rgba([0, 200, 0, 255]);
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, green));

        let palette = PaletteExtractor::new()
            .with_target(10, 10)
            .palette_image(&img)
            .unwrap();
        assert_eq!(palette, vec![Rgb::new(0, 200, 0); 3]);
    }

    #[test]
    fn test_dominant_of_solid_image() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([7, 7, 7, 255])));
        let dominant = PaletteExtractor::new()
            .with_target(10, 10)
            .dominant_image(&img)
            .unwrap();
        assert_eq!(dominant, Rgb::new(7, 7, 7));
    }

    #[test]
    fn test_fully_transparent_image_is_empty_input() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 0])));
        let result = PaletteExtractor::new().with_target(4, 4).palette_image(&img);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }
}
