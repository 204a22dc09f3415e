//! Feature samplers over a bound [`DepthImage`](crate::image::DepthImage).
//!
//! - [`CobwebSampler`]: 32 depth differences at compass offsets and radii.
//! - [`SpiderSampler`]: 8 distances to the nearest depth discontinuity.
//!
//! Samplers borrow the image for their lifetime `'a` and need only `&self`
//! to extract, so one sampler may serve many threads.

pub mod cobweb;
pub mod options;
pub mod spider;

pub use cobweb::{CobwebSampler, COBWEB_MULTIPLIERS, COBWEB_OFFSETS_DEG};
pub use options::{CobwebOptions, DistanceMeasure, SpiderOptions};
pub use spider::{SpiderSampler, SPIDER_OFFSETS_DEG};
