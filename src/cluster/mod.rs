//! Color clustering over pixel samples.
//!
//! One algorithm is implemented: k-means, which fits the palette problem
//! well — a photo's colors form a handful of roughly blob-shaped groups in
//! RGB space, and the caller knows how many palette entries it wants.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical (reasonable for garment color masses)
//! - You know k in advance (the palette size)
//!
//! Distance is flat squared-Euclidean over RGB. No perceptual color space
//! is involved; two colors the eye groups together may land in different
//! clusters, which is acceptable for dominant-color tagging.
//!
//! ## Usage
//!
//! ```rust
//! use swatch::{Clustering, Kmeans, Rgb};
//!
//! let pixels = vec![
//!     Rgb::new(255, 0, 0),
//!     Rgb::new(255, 0, 0),
//!     Rgb::new(0, 0, 255),
//!     Rgb::new(0, 0, 255),
//! ];
//!
//! // Centroids only.
//! let fit = Kmeans::new(2).with_seed(42).fit(&pixels).unwrap();
//! assert_eq!(fit.centroids().len(), 2);
//!
//! // Hard assignments.
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&pixels).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod kmeans;
mod traits;

pub use kmeans::{Kmeans, KmeansFit, DEFAULT_MAX_ITER};
pub use traits::Clustering;
