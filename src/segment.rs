//! Seeded object/background segmentation as a minimum s-t cut.
//!
//! The raster is encoded as a flow network in the Boykov–Funka-Lea style:
//! every pixel becomes a vertex, 4-neighbors are joined by boundary n-links
//! whose capacity decays with intensity contrast, and two terminal vertices
//! anchor the operator's seeds. Seed pixels connect to their terminal with a
//! capacity `K` strictly greater than any pixel's total boundary cost, so no
//! minimum cut can ever sever a seed anchor. Non-seed pixels connect to both
//! terminals with regional costs taken from Parzen-smoothed intensity
//! histograms of the two seed sets.
//!
//! The object mask is the non-terminal source side of the minimum cut.
//! Construction is `O(width * height)` network building plus one
//! Edmonds–Karp solve; everything runs synchronously on the calling thread.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SegmentationError;
use crate::histogram::IntensityHistogram;
use crate::maxflow;
use crate::network::{FlowEdge, FlowNetwork, VertexId};
use crate::raster::{PixelIndex, Raster, SeedLabel};

// Terminal ids, outside the `i * width + j` range of any pixel vertex.
const SOURCE: VertexId = VertexId::MAX;
const SINK: VertexId = VertexId::MAX - 1;

/// Tunable weights of the segmentation energy.
///
/// The defaults are the calibrated values; masks produced with other
/// settings are still exact minimum cuts of the resulting energy, just a
/// different energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Boundary smoothness scale: contrast beyond `sigma` makes a cheap cut.
    pub sigma: f64,
    /// Weight of the regional term relative to the boundary term.
    pub lambda: f64,
    /// Scale factor applied to every boundary capacity.
    pub dist: f64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            sigma: 60.0,
            lambda: 1.0,
            dist: 50.0,
        }
    }
}

/// Graph-cut segmenter for 2-D color rasters.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    /// Create a segmenter with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a segmenter with an explicit configuration.
    pub fn with_config(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Partition `raster` into object and background given the operator's
    /// seed sets, returning the indices of the object pixels.
    ///
    /// The result is exactly the non-terminal source side of the minimum
    /// s-t cut of the constructed network. Every object seed is in the
    /// mask and no background seed is. If an index appears in both seed
    /// sets, the object anchor wins.
    ///
    /// Fails if the raster is empty, either seed set is empty, or any seed
    /// index is out of range.
    pub fn segment(
        &self,
        raster: &Raster,
        seed_obj: &HashSet<PixelIndex>,
        seed_bkg: &HashSet<PixelIndex>,
    ) -> Result<HashSet<PixelIndex>, SegmentationError> {
        let width = raster.width();
        let height = raster.height();
        if width == 0 || height == 0 {
            return Err(SegmentationError::InvalidRaster { width, height });
        }
        if seed_obj.is_empty() {
            return Err(SegmentationError::EmptySeeds {
                label: SeedLabel::Object,
            });
        }
        if seed_bkg.is_empty() {
            return Err(SegmentationError::EmptySeeds {
                label: SeedLabel::Background,
            });
        }
        for &index in seed_obj.iter().chain(seed_bkg.iter()) {
            if !raster.contains(index) {
                return Err(SegmentationError::IndexOutOfRange {
                    index,
                    width,
                    height,
                });
            }
        }

        let intensities = raster.intensities();
        let mut network =
            FlowNetwork::with_capacity(width * height + 2, 6 * width * height);

        let anchor = self.add_n_links(&mut network, &intensities, width, height);
        self.add_t_links(
            &mut network,
            raster,
            &intensities,
            seed_obj,
            seed_bkg,
            anchor,
        )?;
        info!(
            width,
            height,
            vertices = network.num_vertices(),
            edges = network.num_edges(),
            anchor,
            "flow network constructed"
        );

        let solution = maxflow::solve(&mut network, SOURCE, SINK)?;

        let mut mask = HashSet::with_capacity(solution.min_cut().len());
        for &v in solution.min_cut() {
            if v != SOURCE && v != SINK {
                mask.insert(index_of(v, width));
            }
        }
        info!(
            max_flow = solution.max_flow(),
            object_pixels = mask.len(),
            "segmentation complete"
        );
        Ok(mask)
    }

    // Join every pixel to its 4-neighbors (left, right, up, down) with
    // boundary-cost capacities; each ordered pair is inserted once from each
    // side. Returns the seed anchor capacity K = 1 + the largest total
    // boundary cost at any pixel, which makes severing a seed anchor
    // strictly more expensive than any boundary cut.
    fn add_n_links(
        &self,
        network: &mut FlowNetwork,
        intensities: &[u8],
        width: usize,
        height: usize,
    ) -> u32 {
        let mut max_sum = 0.0f64;
        for i in 0..height {
            for j in 0..width {
                let mut sum = 0.0f64;
                if j > 0 {
                    sum += self.n_link(network, intensities, width, (i, j), (i, j - 1));
                }
                if j + 1 < width {
                    sum += self.n_link(network, intensities, width, (i, j), (i, j + 1));
                }
                if i > 0 {
                    sum += self.n_link(network, intensities, width, (i, j), (i - 1, j));
                }
                if i + 1 < height {
                    sum += self.n_link(network, intensities, width, (i, j), (i + 1, j));
                }
                max_sum = max_sum.max(sum);
            }
        }
        (1.0 + max_sum) as u32
    }

    // Add the single directed n-link p -> q and return its untruncated
    // boundary cost for the K accumulation.
    fn n_link(
        &self,
        network: &mut FlowNetwork,
        intensities: &[u8],
        width: usize,
        p: (usize, usize),
        q: (usize, usize),
    ) -> f64 {
        let cost = self.boundary_cost(
            intensities[p.0 * width + p.1],
            intensities[q.0 * width + q.1],
        );
        network.add_edge(FlowEdge::new(
            voxel_id(p.0, p.1, width),
            voxel_id(q.0, q.1, width),
            cost as u32,
        ));
        cost
    }

    // Boundary penalty between neighboring intensities:
    // dist * exp(-(delta^2) / (2 * sigma^2)). Largest for equal intensities,
    // decaying toward zero with contrast.
    fn boundary_cost(&self, a: u8, b: u8) -> f64 {
        let delta = f64::from(a) - f64::from(b);
        self.config.dist * (-(delta * delta) / (2.0 * self.config.sigma * self.config.sigma)).exp()
    }

    // Connect every pixel to the terminals: seeds get the `anchor` capacity
    // on their own terminal only, all other pixels get both regional
    // capacities from the seed histograms.
    fn add_t_links(
        &self,
        network: &mut FlowNetwork,
        raster: &Raster,
        intensities: &[u8],
        seed_obj: &HashSet<PixelIndex>,
        seed_bkg: &HashSet<PixelIndex>,
        anchor: u32,
    ) -> Result<(), SegmentationError> {
        let hist_obj = IntensityHistogram::from_seeds(raster, seed_obj, SeedLabel::Object)?;
        let hist_bkg = IntensityHistogram::from_seeds(raster, seed_bkg, SeedLabel::Background)?;

        let width = raster.width();
        for i in 0..raster.height() {
            for j in 0..width {
                let index = PixelIndex::new(i, j);
                let p = voxel_id(i, j, width);
                if seed_obj.contains(&index) {
                    network.add_edge(FlowEdge::new(SOURCE, p, anchor));
                } else if seed_bkg.contains(&index) {
                    network.add_edge(FlowEdge::new(p, SINK, anchor));
                } else {
                    let intensity = intensities[i * width + j];
                    let to_pixel =
                        (self.config.lambda * hist_obj.neg_log_likelihood(intensity)) as u32;
                    let to_sink =
                        (self.config.lambda * hist_bkg.neg_log_likelihood(intensity)) as u32;
                    network.add_edge(FlowEdge::new(SOURCE, p, to_pixel));
                    network.add_edge(FlowEdge::new(p, SINK, to_sink));
                }
            }
        }
        Ok(())
    }
}

/// Segment `raster` with the default configuration. See
/// [`Segmenter::segment`].
pub fn segment(
    raster: &Raster,
    seed_obj: &HashSet<PixelIndex>,
    seed_bkg: &HashSet<PixelIndex>,
) -> Result<HashSet<PixelIndex>, SegmentationError> {
    Segmenter::new().segment(raster, seed_obj, seed_bkg)
}

fn voxel_id(i: usize, j: usize, width: usize) -> VertexId {
    (i * width + j) as VertexId
}

fn index_of(id: VertexId, width: usize) -> PixelIndex {
    let width = width as VertexId;
    PixelIndex::new((id / width) as usize, (id % width) as usize)
}
