#![doc = include_str!("../README.md")]

// Public modules
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod features;
pub mod image;
pub mod io;
pub mod types;

// Building blocks, public for tooling and tests.
pub mod angle;
pub mod tracer;

// --- High-level re-exports -------------------------------------------------

pub use crate::config::{load_config, FeatureConfig};
pub use crate::error::{Result, SamplerError};
pub use crate::features::{
    CobwebOptions, CobwebSampler, DistanceMeasure, SpiderOptions, SpiderSampler,
};
pub use crate::image::{DepthImage, ImageF32, ImageMask};
pub use crate::tracer::LineTracer;
pub use crate::types::{CobwebFeature, PixelCoord, PixelIndex, SpiderFeature};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use depth_features::prelude::*;
///
/// # fn main() -> depth_features::Result<()> {
/// let (w, h) = (5usize, 5usize);
/// let mut edges = ImageMask::new(w, h);
/// edges.set(4, 2, true);
/// let image = DepthImage::new(
///     ImageF32::filled(w, h, 1.0),
///     edges,
///     ImageF32::new(w, h),
///     1.0,
/// )?;
///
/// let mut spider = SpiderSampler::new(SpiderOptions::new(DistanceMeasure::Pixels))?;
/// spider.set_image(&image);
/// let feature = spider.compute_feature(PixelIndex::new(2, 2))?;
/// assert_eq!(feature[0], 2.0);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::features::{
        CobwebOptions, CobwebSampler, DistanceMeasure, SpiderOptions, SpiderSampler,
    };
    pub use crate::image::{DepthImage, ImageF32, ImageMask};
    pub use crate::types::{PixelIndex, SpiderFeature};
}
