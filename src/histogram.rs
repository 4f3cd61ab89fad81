//! Parzen-smoothed intensity histograms over seed pixels.
//!
//! Each seed observation is spread across all 256 intensity bins through a
//! Gaussian kernel (sigma 10, scaled by 1000 and truncated to integer
//! counts), so a handful of seed pixels yields a usable density estimate.
//! Every per-seed increment is clamped to at least one count, which keeps
//! every bin strictly positive for a non-empty seed set and every
//! negative-log-likelihood query finite.

use std::collections::HashSet;
use std::f64::consts::PI;

use crate::error::SegmentationError;
use crate::raster::{PixelIndex, Raster, SeedLabel};

/// Number of intensity bins.
pub const NUM_BINS: usize = 256;

/// Standard deviation of the smoothing kernel, in intensity levels.
const KERNEL_SIGMA: f64 = 10.0;

/// Scale applied to the kernel density before truncating to a count.
const KERNEL_SCALE: f64 = 1000.0;

/// A 256-bin integer histogram of seed-pixel intensities, queried for
/// regional costs as negative log-likelihoods.
#[derive(Debug, Clone)]
pub struct IntensityHistogram {
    bins: [u64; NUM_BINS],
    total: u64,
}

impl IntensityHistogram {
    /// Accumulate the histogram of the seed pixels' intensities.
    ///
    /// Fails if the seed set is empty or any index lies outside the raster.
    pub fn from_seeds(
        raster: &Raster,
        seeds: &HashSet<PixelIndex>,
        label: SeedLabel,
    ) -> Result<Self, SegmentationError> {
        if seeds.is_empty() {
            return Err(SegmentationError::EmptySeeds { label });
        }
        let mut bins = [0u64; NUM_BINS];
        for &index in seeds {
            let pixel = raster
                .get(index)
                .ok_or(SegmentationError::IndexOutOfRange {
                    index,
                    width: raster.width(),
                    height: raster.height(),
                })?;
            let intensity = f64::from(pixel.intensity());
            for (k, bin) in bins.iter_mut().enumerate() {
                let mass = KERNEL_SCALE * gaussian_density(k as f64 - intensity);
                // truncated kernel mass, clamped so every bin stays positive
                *bin += (mass as u64).max(1);
            }
        }
        let total = bins.iter().sum();
        Ok(Self { bins, total })
    }

    /// Count accumulated in the bin for `intensity`.
    pub fn bin(&self, intensity: u8) -> u64 {
        self.bins[usize::from(intensity)]
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Regional cost of `intensity`: `-(ln(bin) - ln(total))`.
    ///
    /// Always finite and non-negative, since every bin holds at least one
    /// count and no bin exceeds the total.
    pub fn neg_log_likelihood(&self, intensity: u8) -> f64 {
        -((self.bin(intensity) as f64).ln() - (self.total as f64).ln())
    }
}

// Probability density of N(0, KERNEL_SIGMA) at x.
fn gaussian_density(x: f64) -> f64 {
    (-(x * x) / (2.0 * KERNEL_SIGMA * KERNEL_SIGMA)).exp() / (KERNEL_SIGMA * (2.0 * PI).sqrt())
}
