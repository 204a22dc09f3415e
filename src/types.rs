//! Small value types shared across the crate.
use serde::{Deserialize, Serialize};

/// Number of values in a spider feature (one per traced direction).
pub const SPIDER_LEN: usize = 8;
/// Number of values in a cobweb feature (4 radii × 8 compass directions).
pub const COBWEB_LEN: usize = 32;

/// Distances to the nearest depth discontinuity, ordered by
/// [`crate::features::SPIDER_OFFSETS_DEG`].
pub type SpiderFeature = [f32; SPIDER_LEN];
/// Depth differences, multiplier-major then angle-minor, see
/// [`crate::features::cobweb`].
pub type CobwebFeature = [f32; COBWEB_LEN];

/// Sampling origin given as (row, col) into the depth map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelIndex {
    pub row: usize,
    pub col: usize,
}

impl PixelIndex {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The same pixel as an (x, y) tracer coordinate.
    pub fn to_coord(self) -> PixelCoord {
        PixelCoord::new(self.col as i32, self.row as i32)
    }
}

impl From<(usize, usize)> for PixelIndex {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Signed pixel coordinate, x = column, y = row. Traced points may lie
/// outside the image, hence the signed representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoord {
    pub x: i32,
    pub y: i32,
}

impl PixelCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels.
    #[inline]
    pub fn distance(&self, other: &PixelCoord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Chessboard distance; consecutive traced points are always 1 apart.
    #[inline]
    pub fn chebyshev(&self, other: &PixelCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}
