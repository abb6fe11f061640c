use crate::color::Rgb;
use crate::error::Result;

/// Common interface for hard clustering over pixel samples (one label per pixel).
pub trait Clustering {
    /// Fit the model (if needed) and return one cluster label per input pixel.
    fn fit_predict(&self, pixels: &[Rgb]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
