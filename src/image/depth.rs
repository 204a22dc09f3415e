//! The image context consumed by the samplers.
//!
//! A [`DepthImage`] bundles the depth map, the edge map, the per-pixel
//! orientation map (degrees) and the camera focal length. All three rasters
//! share one size; [`DepthImage::new`] enforces it. Producing the edge and
//! orientation maps is up to the caller.
use super::{ImageF32, ImageMask, ImageView};
use crate::error::{Result, SamplerError};
use crate::types::{PixelCoord, PixelIndex};
use nalgebra::Point3;

#[derive(Clone, Debug)]
pub struct DepthImage {
    depth: ImageF32,
    edges: ImageMask,
    angles: ImageF32,
    focal_length: f32,
}

impl DepthImage {
    pub fn new(
        depth: ImageF32,
        edges: ImageMask,
        angles: ImageF32,
        focal_length: f32,
    ) -> Result<Self> {
        check_dims("edge", &depth, &edges)?;
        check_dims("orientation", &depth, &angles)?;
        if !focal_length.is_finite() || focal_length <= 0.0 {
            return Err(SamplerError::InvalidFocalLength(focal_length));
        }
        Ok(Self {
            depth,
            edges,
            angles,
            focal_length,
        })
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.depth.w
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.depth.h
    }

    pub fn depth_map(&self) -> &ImageF32 {
        &self.depth
    }

    pub fn edge_map(&self) -> &ImageMask {
        &self.edges
    }

    pub fn orientation_map(&self) -> &ImageF32 {
        &self.angles
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    /// Fails with `IndexOutOfBounds` unless `index` addresses a pixel.
    pub fn check_index(&self, index: PixelIndex) -> Result<()> {
        if index.row < self.rows() && index.col < self.cols() {
            Ok(())
        } else {
            Err(SamplerError::IndexOutOfBounds {
                row: index.row,
                col: index.col,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    /// Depth at a validated index.
    #[inline]
    pub fn depth_at(&self, index: PixelIndex) -> f32 {
        self.depth.get(index.col, index.row)
    }

    /// Orientation in degrees at a validated index.
    #[inline]
    pub fn angle_at(&self, index: PixelIndex) -> f32 {
        self.angles.get(index.col, index.row)
    }

    /// Depth at a possibly out-of-image coordinate.
    #[inline]
    pub fn depth_at_coord(&self, p: PixelCoord) -> Option<f32> {
        self.depth.get_signed(p.x, p.y)
    }

    /// Edge flag at a coordinate; `None` outside the image.
    #[inline]
    pub fn edge_at_coord(&self, p: PixelCoord) -> Option<bool> {
        self.edges.get_signed(p.x, p.y)
    }

    /// True when `p` lies inside the image shrunk by `border` pixels on
    /// every side.
    #[inline]
    pub fn contains(&self, p: PixelCoord, border: usize) -> bool {
        let b = border as i64;
        let (x, y) = (p.x as i64, p.y as i64);
        x >= b && y >= b && x < self.cols() as i64 - b && y < self.rows() as i64 - b
    }

    /// Back-projects pixel `p` at `depth` into camera space.
    ///
    /// The projection centre is the far image corner `(cols, rows)`, not a
    /// calibrated principal point. Distances between points at similar depth
    /// are unaffected by that offset; absolute coordinates are not metric.
    pub fn project(&self, p: PixelCoord, depth: f32) -> Point3<f32> {
        let scale = depth / self.focal_length;
        Point3::new(
            (p.x as f32 - self.cols() as f32) * scale,
            (p.y as f32 - self.rows() as f32) * scale,
            depth,
        )
    }

    /// Every pixel with finite depth, in row-major order.
    pub fn valid_indices(&self) -> Vec<PixelIndex> {
        self.depth
            .rows()
            .enumerate()
            .flat_map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .filter(|(_, d)| d.is_finite())
                    .map(move |(col, _)| PixelIndex::new(row, col))
            })
            .collect()
    }
}

fn check_dims<O: ImageView>(map: &'static str, depth: &ImageF32, other: &O) -> Result<()> {
    if depth.same_dims(other) {
        return Ok(());
    }
    Err(SamplerError::DimensionMismatch {
        map,
        expected_w: depth.width(),
        expected_h: depth.height(),
        actual_w: other.width(),
        actual_h: other.height(),
    })
}
