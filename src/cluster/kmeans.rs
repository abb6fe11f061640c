//! K-means over RGB pixel samples (k-means++ seeding, Lloyd iterations).
//!
//! # The Algorithm
//!
//! Lloyd's algorithm alternates two steps until the centroids stop moving:
//!
//! 1. **Assign**: give each pixel to its nearest centroid by squared
//!    Euclidean RGB distance, ties going to the lowest centroid index.
//! 2. **Update**: recompute each centroid as the component-wise mean of its
//!    assigned pixels, rounded to the nearest integer. A cluster that
//!    received no pixels keeps its previous centroid.
//!
//! Convergence is exact integer equality of consecutive centroid sets. If
//! the iteration cap is reached first, the current centroids are returned
//! as-is; the two terminal outcomes are deliberately indistinguishable in
//! the result.
//!
//! ## Seeding
//!
//! Initial centroids come from k-means++ (Arthur & Vassilvitskii, 2007):
//! the first pick is uniform over the samples, and each subsequent pick is
//! drawn with probability proportional to the sample's squared distance to
//! its nearest already-chosen centroid. On skewed color histograms (e.g. a
//! garment photographed on a mostly-white background) uniform seeding tends
//! to place several centroids in the dominant mass; the weighted scheme
//! spreads them across the actual color groups.
//!
//! ## Divergences from textbook k-means
//!
//! Centroids are rounded to integer channels on *every* update, not only at
//! the end. Exact-equality convergence depends on this: it is observable,
//! reproducible behavior and is kept rather than accumulating in floating
//! point.

use rand::prelude::*;

use super::traits::Clustering;
use crate::color::Rgb;
use crate::error::{Error, Result};

/// Default cap on assign/update iterations.
pub const DEFAULT_MAX_ITER: usize = 100;

/// K-means clusterer for pixel samples.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters to fit.
    k: usize,
    /// Iteration cap for the assign/update loop.
    max_iter: usize,
    /// Optional RNG seed for reproducible seeding.
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new clusterer producing `k` centroids.
    ///
    /// Defaults: `max_iter = 100`, unseeded RNG.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
        }
    }

    /// Set the iteration cap (must be at least 1).
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seed the RNG used for centroid seeding, for reproducible fits.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fit `k` centroids over the given pixel samples.
    ///
    /// Always returns exactly `k` centroids with channels in [0, 255]. A
    /// cluster that ends up empty keeps the last centroid it had, so a
    /// persistently empty cluster can report a color no pixel is finally
    /// assigned to; this is a known limitation of the retention policy.
    ///
    /// All working state lives in this call, so concurrent fits over
    /// separate sample sets need no synchronization.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `pixels` is empty.
    /// - [`Error::InvalidParameter`] if `k` or `max_iter` is zero.
    /// - [`Error::InvalidClusterCount`] if `k` exceeds the sample count.
    pub fn fit(&self, pixels: &[Rgb]) -> Result<KmeansFit> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if pixels.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.k > pixels.len() {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_pixels: pixels.len(),
            });
        }

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut centroids = seed_centroids(pixels, self.k, rng.as_mut());
        let mut assignments = vec![0usize; pixels.len()];

        for _ in 0..self.max_iter {
            assign(pixels, &centroids, &mut assignments);
            let next = updated_centroids(pixels, &assignments, &centroids);
            let converged = next == centroids;
            centroids = next;
            if converged {
                break;
            }
        }

        Ok(KmeansFit { centroids })
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, pixels: &[Rgb]) -> Result<Vec<usize>> {
        let fit = self.fit(pixels)?;
        Ok(pixels.iter().map(|&px| fit.nearest(px)).collect())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// A fitted k-means model: the `k` cluster centroids, in seeding order.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    centroids: Vec<Rgb>,
}

impl KmeansFit {
    /// The fitted centroids, one per cluster.
    pub fn centroids(&self) -> &[Rgb] {
        &self.centroids
    }

    /// Consume the fit, returning the centroids.
    pub fn into_centroids(self) -> Vec<Rgb> {
        self.centroids
    }

    /// Number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Index of the centroid nearest to `pixel` (ties to the lowest index).
    ///
    /// This is the same rule the assign step uses, so labelling pixels with
    /// `nearest` after a converged fit reproduces the final assignment.
    pub fn nearest(&self, pixel: Rgb) -> usize {
        nearest_centroid(pixel, &self.centroids)
    }

    /// The dominant color: the first centroid.
    pub fn dominant(&self) -> Rgb {
        self.centroids[0]
    }
}

/// K-means++ seeding.
///
/// The first centroid is a uniform pick; each subsequent centroid is chosen
/// by drawing a uniform threshold in `[0, total_weight)` over the cumulative
/// squared-distance weights and taking the first sample whose cumulative
/// weight reaches it. When every weight is zero (all samples duplicate an
/// already-chosen centroid) this degenerates to picking index 0.
fn seed_centroids(pixels: &[Rgb], k: usize, rng: &mut dyn RngCore) -> Vec<Rgb> {
    let mut centroids = Vec::with_capacity(k);
    let first = rng.random_range(0..pixels.len());
    centroids.push(pixels[first]);

    let mut weights = vec![0.0f64; pixels.len()];
    while centroids.len() < k {
        for (weight, px) in weights.iter_mut().zip(pixels) {
            let nearest = centroids
                .iter()
                .map(|&c| px.distance_squared(c))
                .min()
                .unwrap_or(0);
            *weight = f64::from(nearest);
        }

        let total: f64 = weights.iter().sum();
        let threshold = rng.random::<f64>() * total;

        let mut cumulative = 0.0;
        let mut chosen = pixels.len() - 1;
        for (i, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if cumulative >= threshold {
                chosen = i;
                break;
            }
        }
        centroids.push(pixels[chosen]);
    }

    centroids
}

/// Assign every pixel to its nearest centroid.
fn assign(pixels: &[Rgb], centroids: &[Rgb], assignments: &mut [usize]) {
    for (slot, &px) in assignments.iter_mut().zip(pixels) {
        *slot = nearest_centroid(px, centroids);
    }
}

#[inline]
fn nearest_centroid(pixel: Rgb, centroids: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, &centroid) in centroids.iter().enumerate() {
        let d = pixel.distance_squared(centroid);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Recompute each centroid as the rounded component-wise mean of its
/// assigned pixels. A cluster with no pixels keeps its previous centroid,
/// never re-seeded and never dropped.
fn updated_centroids(pixels: &[Rgb], assignments: &[usize], previous: &[Rgb]) -> Vec<Rgb> {
    let k = previous.len();
    let mut sums = vec![[0u64; 3]; k];
    let mut counts = vec![0u64; k];

    for (&px, &cluster) in pixels.iter().zip(assignments) {
        let sum = &mut sums[cluster];
        sum[0] += u64::from(px.r);
        sum[1] += u64::from(px.g);
        sum[2] += u64::from(px.b);
        counts[cluster] += 1;
    }

    previous
        .iter()
        .zip(sums.iter().zip(&counts))
        .map(|(&prev, (sum, &count))| {
            if count == 0 {
                prev
            } else {
                Rgb::new(
                    rounded_mean(sum[0], count),
                    rounded_mean(sum[1], count),
                    rounded_mean(sum[2], count),
                )
            }
        })
        .collect()
}

#[inline]
fn rounded_mean(sum: u64, count: u64) -> u8 {
    (sum as f64 / count as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn red_blue_pixels() -> Vec<Rgb> {
        let mut pixels = vec![RED; 8];
        pixels.extend(vec![BLUE; 8]);
        pixels
    }

    #[test]
    fn test_kmeans_returns_k_centroids() {
        let pixels: Vec<Rgb> = (0..50u8).map(|i| Rgb::new(i, i.wrapping_mul(5), 200 - i)).collect();
        for k in [1, 2, 3, 7] {
            let fit = Kmeans::new(k).with_seed(42).fit(&pixels).unwrap();
            assert_eq!(fit.centroids().len(), k);
            assert_eq!(fit.n_clusters(), k);
        }
    }

    #[test]
    fn test_kmeans_single_cluster_is_rounded_mean() {
        // Mean is 61/3 = 20.33 on red, 1/3 = 0.33 on green: rounds to (20, 0, 0).
        let pixels = vec![Rgb::new(10, 0, 0), Rgb::new(20, 1, 0), Rgb::new(31, 0, 0)];
        for seed in [0, 1, 42] {
            let fit = Kmeans::new(1).with_seed(seed).fit(&pixels).unwrap();
            assert_eq!(fit.centroids(), &[Rgb::new(20, 0, 0)]);
        }
    }

    #[test]
    fn test_kmeans_separates_red_and_blue() {
        let pixels = red_blue_pixels();
        let fit = Kmeans::new(2).with_seed(42).fit(&pixels).unwrap();

        let mut centroids = fit.centroids().to_vec();
        centroids.sort();
        assert_eq!(centroids, vec![BLUE, RED]);

        // Zero misassignments after convergence.
        for &px in &pixels {
            assert_eq!(fit.centroids()[fit.nearest(px)], px);
        }
    }

    #[test]
    fn test_kmeans_k_equals_pixel_count() {
        // With k == n and distinct pixels every cluster holds exactly one
        // member, so the centroids are the pixels themselves.
        let pixels = vec![
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(128, 128, 128),
        ];
        let fit = Kmeans::new(4).with_seed(42).fit(&pixels).unwrap();

        let mut centroids = fit.into_centroids();
        centroids.sort();
        let mut expected = pixels.clone();
        expected.sort();
        assert_eq!(centroids, expected);
    }

    #[test]
    fn test_kmeans_converged_fit_is_fixed_point() {
        let pixels = red_blue_pixels();
        let fit = Kmeans::new(2).with_seed(7).fit(&pixels).unwrap();

        // One more assign/update round must reproduce the converged set.
        let centroids = fit.centroids().to_vec();
        let mut assignments = vec![0usize; pixels.len()];
        assign(&pixels, &centroids, &mut assignments);
        assert_eq!(updated_centroids(&pixels, &assignments, &centroids), centroids);
    }

    #[test]
    fn test_kmeans_seeded_fit_is_reproducible() {
        let pixels: Vec<Rgb> = (0..60u8).map(|i| Rgb::new(i, 255 - i, i / 2)).collect();
        let a = Kmeans::new(3).with_seed(123).fit(&pixels).unwrap();
        let b = Kmeans::new(3).with_seed(123).fit(&pixels).unwrap();
        assert_eq!(a.centroids(), b.centroids());
    }

    #[test]
    fn test_empty_cluster_keeps_previous_centroid() {
        // Nothing assigned to cluster 1: its centroid must come through
        // unchanged while cluster 0 moves to the mean of its pixels.
        let pixels = vec![Rgb::new(10, 10, 10), Rgb::new(20, 20, 20)];
        let previous = vec![Rgb::new(0, 0, 0), Rgb::new(200, 200, 200)];
        let assignments = vec![0, 0];

        let next = updated_centroids(&pixels, &assignments, &previous);
        assert_eq!(next, vec![Rgb::new(15, 15, 15), Rgb::new(200, 200, 200)]);
    }

    #[test]
    fn test_assignment_ties_break_to_lowest_index() {
        // Identical centroids make every distance a tie.
        let centroids = vec![Rgb::new(10, 0, 0), Rgb::new(10, 0, 0)];
        assert_eq!(nearest_centroid(Rgb::new(10, 0, 0), &centroids), 0);
        assert_eq!(nearest_centroid(Rgb::new(200, 0, 0), &centroids), 0);
    }

    #[test]
    fn test_kmeans_duplicate_pixels_duplicate_centroids() {
        // All samples identical: every seeding weight is zero, so extra
        // centroids duplicate the first pick and converge unchanged.
        let pixels = vec![Rgb::new(40, 80, 120); 6];
        let fit = Kmeans::new(3).with_seed(5).fit(&pixels).unwrap();
        assert_eq!(fit.centroids(), &[Rgb::new(40, 80, 120); 3]);
    }

    #[test]
    fn test_kmeans_empty_input() {
        let result = Kmeans::new(3).fit(&[]);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_kmeans_invalid_params() {
        let pixels = red_blue_pixels();

        let result = Kmeans::new(0).fit(&pixels);
        assert!(matches!(result, Err(Error::InvalidParameter { name: "k", .. })));

        let result = Kmeans::new(2).with_max_iter(0).fit(&pixels);
        assert!(matches!(
            result,
            Err(Error::InvalidParameter { name: "max_iter", .. })
        ));

        let result = Kmeans::new(17).fit(&pixels);
        assert!(matches!(
            result,
            Err(Error::InvalidClusterCount {
                requested: 17,
                n_pixels: 16,
            })
        ));
    }

    #[test]
    fn test_fit_predict_labels_match_centroids() {
        let pixels = red_blue_pixels();
        let model = Kmeans::new(2).with_seed(42);
        let labels = model.fit_predict(&pixels).unwrap();

        assert_eq!(labels.len(), pixels.len());
        for &l in &labels {
            assert!(l < 2);
        }
        // All reds share a label, all blues share the other.
        assert!(labels[..8].iter().all(|&l| l == labels[0]));
        assert!(labels[8..].iter().all(|&l| l == labels[8]));
        assert_ne!(labels[0], labels[8]);
    }
}
