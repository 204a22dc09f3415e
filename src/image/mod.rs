//! Rasters and the depth image context.
//!
//! - [`ImageF32`]: owned float raster (depth, orientation in degrees).
//! - [`ImageMask`]: owned boolean raster (edge map).
//! - [`DepthImage`]: the read-only bundle the samplers bind to.
pub mod depth;
pub mod f32;
pub mod mask;
pub mod traits;

pub use self::depth::DepthImage;
pub use self::f32::ImageF32;
pub use self::mask::ImageMask;
pub use self::traits::{ImageView, Rows};
