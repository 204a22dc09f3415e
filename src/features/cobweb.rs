//! Compass ("cobweb") depth-difference features.
//!
//! For a start pixel with depth `d0` and orientation `a0` the sampler reads
//! the depth at 32 offsets, four radii along eight compass directions
//! measured from `a0`, and emits `depth(offset) - d0`.
//!
//! Layout of the 32 values (`k = 8·(m−1) + θ/45`):
//!
//! ```text
//!   k  0.. 7   radius 1·b   θ = 0°, 45°, …, 315°
//!   k  8..15   radius 2·b   θ = 0°, 45°, …, 315°
//!   k 16..23   radius 3·b   …
//!   k 24..31   radius 4·b   …
//! ```
//!
//! Direction `φ` maps to the offset pixel `(row − r·sin φ, col + r·cos φ)`,
//! truncated towards zero, so positive angles turn towards the top of the
//! image. Offsets outside the image produce `NaN`. Offsets are computed in
//! `f64` and trigonometric noise on the compass axes is snapped to zero, so a
//! 90° or 180° offset never truncates into the neighbouring row or column.
use super::options::CobwebOptions;
use crate::angle::defined_or_zero;
use crate::diagnostics::CobwebReport;
use crate::error::{Result, SamplerError};
use crate::image::DepthImage;
use crate::types::{CobwebFeature, PixelIndex, COBWEB_LEN};
use log::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Radius multipliers of the base offset, outer loop of the layout.
pub const COBWEB_MULTIPLIERS: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
/// Compass offsets from the local orientation, inner loop of the layout.
pub const COBWEB_OFFSETS_DEG: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];

#[derive(Clone, Debug)]
pub struct CobwebSampler<'a> {
    options: CobwebOptions,
    image: Option<&'a DepthImage>,
}

impl<'a> CobwebSampler<'a> {
    pub fn new(options: CobwebOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            image: None,
        })
    }

    pub fn options(&self) -> &CobwebOptions {
        &self.options
    }

    /// Binds `image`, replacing any previously bound image.
    pub fn set_image(&mut self, image: &'a DepthImage) {
        self.image = Some(image);
    }

    fn image(&self) -> Result<&'a DepthImage> {
        self.image.ok_or(SamplerError::NoImageBound)
    }

    /// One 32-value feature per index, in input order.
    ///
    /// Fails on the first index outside the image.
    pub fn extract(&self, indices: &[PixelIndex]) -> Result<Vec<CobwebFeature>> {
        let image = self.image()?;
        #[cfg(feature = "parallel")]
        {
            indices
                .par_iter()
                .map(|&index| self.sample(image, index).map(|r| r.feature))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            indices
                .iter()
                .map(|&index| self.sample(image, index).map(|r| r.feature))
                .collect()
        }
    }

    /// Feature for a single index together with its fallback bookkeeping.
    pub fn extract_report(&self, index: PixelIndex) -> Result<CobwebReport> {
        let image = self.image()?;
        self.sample(image, index)
    }

    fn sample(&self, image: &DepthImage, index: PixelIndex) -> Result<CobwebReport> {
        image.check_index(index)?;

        let start_depth = image.depth_at(index);
        let (start_angle, angle_undefined) = defined_or_zero(image.angle_at(index));
        if angle_undefined {
            warn!(
                "CobwebSampler: undefined orientation at ({}, {}), using 0°",
                index.row, index.col
            );
        }
        if start_depth.is_nan() {
            debug!(
                "CobwebSampler: NaN start depth at ({}, {})",
                index.row, index.col
            );
        }

        let step = f64::from(self.options.step);
        let base_offset = if self.options.fixed_patch_size {
            step
        } else {
            step / f64::from(start_depth)
        };

        let start_angle = f64::from(start_angle);
        let mut feature = [0.0f32; COBWEB_LEN];
        let mut k = 0;
        for multiplier in COBWEB_MULTIPLIERS {
            for offset_deg in COBWEB_OFFSETS_DEG {
                let depth = offset_depth(
                    image,
                    index,
                    (start_angle + offset_deg).to_radians(),
                    base_offset * multiplier,
                );
                feature[k] = depth - start_depth;
                k += 1;
            }
        }

        Ok(CobwebReport {
            index,
            feature,
            start_depth,
            undefined_angles: usize::from(angle_undefined),
        })
    }
}

/// Trigonometric results below this magnitude are treated as exact zeros.
const AXIS_SNAP: f64 = 1e-9;

#[inline]
fn snap_axis(v: f64) -> f64 {
    if v.abs() < AXIS_SNAP {
        0.0
    } else {
        v
    }
}

/// Depth at `offset` pixels from `index` along `angle_rad`, or `NaN` when
/// that pixel is outside the image.
fn offset_depth(image: &DepthImage, index: PixelIndex, angle_rad: f64, offset: f64) -> f32 {
    let (sin, cos) = angle_rad.sin_cos();
    let end_row = (index.row as f64 - offset * snap_axis(sin)).trunc();
    let end_col = (index.col as f64 + offset * snap_axis(cos)).trunc();
    if !end_row.is_finite() || !end_col.is_finite() {
        return f32::NAN;
    }
    if end_row < 0.0 || end_col < 0.0 {
        return f32::NAN;
    }
    let (r, c) = (end_row as usize, end_col as usize);
    if r >= image.rows() || c >= image.cols() {
        return f32::NAN;
    }
    image.depth_at(PixelIndex::new(r, c))
}
