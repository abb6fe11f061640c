use thiserror::Error;

/// Errors returned by the extraction and clustering pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Image data could not be decoded or resized.
    #[error("failed to decode image")]
    Decode(#[from] image::ImageError),

    /// The image file could not be opened or read.
    #[error("failed to read image")]
    Io(#[from] std::io::Error),

    /// The pixel sample set is empty.
    ///
    /// This is also how a successfully-decoded but fully-transparent image
    /// surfaces from the pipeline: sampling yields zero opaque pixels, and
    /// centroids are undefined over an empty sample set.
    #[error("empty pixel sample set")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the sample set.
    #[error("invalid cluster count: requested {requested}, but sample set has {n_pixels} pixels")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of pixels in the sample set.
        n_pixels: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
