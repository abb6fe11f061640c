//! Dominant-color extraction for photos.
//!
//! `swatch` turns an arbitrary photo into a small color palette: the image
//! is downsampled into a bounded set of opaque RGB samples, the samples are
//! clustered with k-means (k-means++ seeding, Lloyd iterations), and the
//! cluster centroids come back as [`Rgb`] values or `#rrggbb` strings.
//!
//! The one-call entry point is [`PaletteExtractor`]; the stages compose and
//! can be used on their own:
//! - [`PixelSampler`] — decode + downsample + transparency filtering
//! - [`Kmeans`] — clustering over the pixel samples (under [`cluster`])
//! - [`Rgb`] — the color value type, with hex formatting and parsing

#![forbid(unsafe_code)]

pub mod cluster;
pub mod color;
pub mod error;
pub mod extract;
pub mod palette;

pub use cluster::{Clustering, Kmeans, KmeansFit};
pub use color::Rgb;
pub use error::{Error, Result};
pub use extract::PixelSampler;
pub use palette::{PaletteExtractor, DEFAULT_K};
