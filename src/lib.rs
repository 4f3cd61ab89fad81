//! Seeded graph-cut segmentation of 2-D color rasters.
//!
//! Given a raster and two sets of operator-marked pixels (object and
//! background), this crate partitions the image into the two regions by
//! minimizing an energy with a regional term (how well a pixel's intensity
//! matches each seed population) and a boundary term (how costly it is to
//! separate similar neighbors). The minimization is exact: the energy is
//! encoded as a capacitated flow network whose minimum s-t cut is computed
//! with the shortest-augmenting-path max-flow algorithm.
//!
//! # Layers
//!
//! | Module | Role |
//! |--------|------|
//! | [`network`] | Flow network: directed multigraph with residual-capacity semantics |
//! | [`maxflow`] | Max-flow / min-cut solver (Edmonds–Karp) |
//! | [`histogram`] | Parzen-smoothed intensity histograms for the regional term |
//! | [`segment`] | Raster-to-network encoding and mask extraction |
//!
//! The lower layers are public: the network and solver work on any directed
//! multigraph over `u64` vertex ids, not just pixel grids.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashSet;
//! use seedcut::{segment, PixelIndex, Raster, Rgb};
//!
//! let raster = Raster::from_rows(vec![vec![Rgb::BLACK, Rgb::WHITE]]).unwrap();
//! let object = HashSet::from([PixelIndex::new(0, 0)]);
//! let background = HashSet::from([PixelIndex::new(0, 1)]);
//!
//! let mask = segment(&raster, &object, &background).unwrap();
//! assert!(mask.contains(&PixelIndex::new(0, 0)));
//! assert!(!mask.contains(&PixelIndex::new(0, 1)));
//! ```

pub mod error;
pub mod histogram;
pub mod maxflow;
pub mod network;
pub mod raster;
pub mod segment;

pub use error::{FlowError, Result, SegmentationError};
pub use histogram::IntensityHistogram;
pub use maxflow::MinCutSolution;
pub use network::{Capacity, EdgeId, FlowEdge, FlowNetwork, VertexId};
pub use raster::{PixelIndex, Raster, Rgb, SeedLabel};
pub use segment::{segment, Segmenter, SegmenterConfig};
