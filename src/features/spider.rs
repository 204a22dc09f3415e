//! Spider features: distance to the nearest depth discontinuity along eight
//! directions anchored to the local gradient orientation.
//!
//! Rays are cast with [`LineTracer`] from the start pixel at
//! `a0 + 360°, a0 + 315°, …, a0 + 45°` (in that order, see
//! [`SPIDER_OFFSETS_DEG`]). Tracer `y` grows down the image, so successive
//! entries rotate clockwise on screen, the opposite sense to the cobweb
//! layout.
//!
//! Each ray is reduced to a scalar by the configured [`DistanceMeasure`]:
//!
//! - `Pixels`: Euclidean pixel distance to the first edge pixel.
//! - `Perpendicular`: the pixel distance times the depth at the stop pixel.
//! - `Geodesic`: keyframes (every `keyframe_stride`-th traced point plus the
//!   stop point) are back-projected with [`DepthImage::project`] and the 3D
//!   polyline length is summed.
//!
//! A ray with no edge stops at the last in-image pixel (`Pixels`,
//! `Perpendicular`) or at the `border` margin (`Geodesic`). A geodesic ray
//! with fewer than two keyframes has length 0.
use super::options::{DistanceMeasure, SpiderOptions};
use crate::angle::wrap_degrees;
use crate::diagnostics::{DirectionSample, SampleStatus, SpiderReport, TraceOutcome};
use crate::error::{Result, SamplerError};
use crate::image::DepthImage;
use crate::tracer::LineTracer;
use crate::types::{PixelCoord, PixelIndex, SpiderFeature, SPIDER_LEN};
use log::{debug, warn};
use nalgebra::Point3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Direction offsets from the local orientation, in output order.
pub const SPIDER_OFFSETS_DEG: [f32; SPIDER_LEN] =
    [360.0, 315.0, 270.0, 225.0, 180.0, 135.0, 90.0, 45.0];

#[derive(Clone, Debug)]
pub struct SpiderSampler<'a> {
    options: SpiderOptions,
    image: Option<&'a DepthImage>,
}

impl<'a> SpiderSampler<'a> {
    pub fn new(options: SpiderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            image: None,
        })
    }

    /// Sampler with default options and the named distance measure.
    pub fn with_measure_name(name: &str) -> Result<Self> {
        Self::new(SpiderOptions::new(name.parse()?))
    }

    pub fn options(&self) -> &SpiderOptions {
        &self.options
    }

    pub fn distance_measure(&self) -> DistanceMeasure {
        self.options.distance_measure
    }

    /// Binds `image`, replacing any previously bound image.
    pub fn set_image(&mut self, image: &'a DepthImage) {
        self.image = Some(image);
    }

    fn image(&self) -> Result<&'a DepthImage> {
        self.image.ok_or(SamplerError::NoImageBound)
    }

    /// The eight distances for `index`.
    ///
    /// `NaN` depth or orientation at `index` yields `[0.0; 8]`.
    pub fn compute_feature(&self, index: PixelIndex) -> Result<SpiderFeature> {
        self.compute_report(index).map(|report| report.feature)
    }

    /// Like [`compute_feature`](Self::compute_feature), also recording how
    /// every ray terminated.
    pub fn compute_report(&self, index: PixelIndex) -> Result<SpiderReport> {
        let image = self.image()?;
        image.check_index(index)?;

        let start_depth = image.depth_at(index);
        let start_angle = image.angle_at(index);
        let status = if start_depth.is_nan() {
            SampleStatus::InvalidDepth
        } else if start_angle.is_nan() {
            SampleStatus::InvalidOrientation
        } else {
            SampleStatus::Valid
        };
        if !status.is_valid() {
            warn!(
                "SpiderSampler: {:?} at ({}, {}), emitting zero feature",
                status, index.row, index.col
            );
            return Ok(SpiderReport {
                index,
                status,
                feature: [0.0; SPIDER_LEN],
                directions: Vec::new(),
                undefined_angles: 0,
            });
        }

        let mut feature = [0.0f32; SPIDER_LEN];
        let mut directions = Vec::with_capacity(SPIDER_LEN);
        for (slot, offset) in feature.iter_mut().zip(SPIDER_OFFSETS_DEG) {
            let sample = self.trace_direction(image, index.to_coord(), start_angle + offset)?;
            *slot = sample.distance;
            directions.push(sample);
        }

        let undefined_angles = directions.iter().filter(|d| d.angle_undefined).count();
        Ok(SpiderReport {
            index,
            status,
            feature,
            directions,
            undefined_angles,
        })
    }

    /// One result per index, in input order. A fatal error for one index
    /// does not affect the others.
    pub fn compute_features(&self, indices: &[PixelIndex]) -> Vec<Result<SpiderFeature>> {
        #[cfg(feature = "parallel")]
        {
            indices
                .par_iter()
                .map(|&index| self.compute_feature(index))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            indices
                .iter()
                .map(|&index| self.compute_feature(index))
                .collect()
        }
    }

    /// Distance from `index` to the nearest discontinuity along the absolute
    /// direction `angle_deg`, using the configured measure.
    pub fn distance_along_direction(&self, index: PixelIndex, angle_deg: f32) -> Result<f32> {
        let image = self.image()?;
        image.check_index(index)?;
        self.trace_direction(image, index.to_coord(), angle_deg)
            .map(|sample| sample.distance)
    }

    fn trace_direction(
        &self,
        image: &DepthImage,
        start: PixelCoord,
        angle_deg: f32,
    ) -> Result<DirectionSample> {
        let angle_deg = wrap_degrees(angle_deg);
        let tracer =
            LineTracer::with_max_steps(start, angle_deg.to_radians(), self.options.max_steps);
        let angle_undefined = tracer.angle_was_undefined();
        let angle_deg = if angle_undefined { 0.0 } else { angle_deg };

        let mut sample = match self.options.distance_measure {
            DistanceMeasure::Pixels | DistanceMeasure::Perpendicular => {
                self.trace_to_edge(image, start, tracer, angle_deg)?
            }
            DistanceMeasure::Geodesic => self.trace_geodesic(image, start, tracer, angle_deg)?,
        };
        sample.angle_undefined = angle_undefined;
        debug!(
            "SpiderSampler: {} ray from ({}, {}) at {:.1}° -> {:?} at ({}, {}) d={:.4}",
            self.options.distance_measure,
            start.x,
            start.y,
            sample.angle_deg,
            sample.outcome,
            sample.stop.x,
            sample.stop.y,
            sample.distance
        );
        Ok(sample)
    }

    /// `Pixels` and `Perpendicular`: walk until an edge pixel or the last
    /// pixel inside the image.
    fn trace_to_edge(
        &self,
        image: &DepthImage,
        start: PixelCoord,
        mut tracer: LineTracer,
        angle_deg: f32,
    ) -> Result<DirectionSample> {
        let mut stop = start;
        let mut outcome = TraceOutcome::OutOfBounds;
        for point in tracer.by_ref() {
            let point = point?;
            let Some(edge) = image.edge_at_coord(point) else {
                break;
            };
            stop = point;
            if edge {
                outcome = TraceOutcome::EdgeFound;
                break;
            }
        }

        let mut distance = start.distance(&stop);
        if self.options.distance_measure == DistanceMeasure::Perpendicular {
            distance *= image.depth_at_coord(stop).unwrap_or(f32::NAN);
        }

        Ok(DirectionSample {
            angle_deg,
            distance,
            outcome,
            stop,
            steps: tracer.steps(),
            keyframes: 0,
            angle_undefined: false,
        })
    }

    /// `Geodesic`: accumulate 3D arc length over keyframes until an edge or
    /// the border margin.
    fn trace_geodesic(
        &self,
        image: &DepthImage,
        start: PixelCoord,
        mut tracer: LineTracer,
        angle_deg: f32,
    ) -> Result<DirectionSample> {
        let stride = self.options.keyframe_stride;
        let border = self.options.border;

        let mut arc = ArcLength::default();
        let mut pending: Option<(PixelCoord, f32)> = None;
        let mut stop = start;
        let mut outcome = TraceOutcome::OutOfBounds;

        for (idx, point) in tracer.by_ref().enumerate() {
            let point = point?;
            let Some(depth) = image.depth_at_coord(point) else {
                // Left the image without touching the margin (border == 0):
                // close the polyline at the last pixel inside.
                if let Some((p, d)) = pending.take() {
                    arc.push(image.project(p, d));
                }
                break;
            };
            stop = point;

            let edge = image.edge_at_coord(point).unwrap_or(false);
            let end_of_line = edge || !image.contains(point, border);
            if idx % stride == 0 || end_of_line {
                arc.push(image.project(point, depth));
                pending = None;
            } else {
                pending = Some((point, depth));
            }

            if end_of_line {
                if edge {
                    outcome = TraceOutcome::EdgeFound;
                }
                break;
            }
        }

        if arc.keyframes < 2 {
            debug!(
                "SpiderSampler: geodesic ray collected {} keyframe(s), distance 0",
                arc.keyframes
            );
        }

        Ok(DirectionSample {
            angle_deg,
            distance: arc.total,
            outcome,
            stop,
            steps: tracer.steps(),
            keyframes: arc.keyframes,
            angle_undefined: false,
        })
    }
}

/// Running length of a 3D polyline.
#[derive(Default)]
struct ArcLength {
    prev: Option<Point3<f32>>,
    total: f32,
    keyframes: usize,
}

impl ArcLength {
    fn push(&mut self, p: Point3<f32>) {
        if let Some(prev) = self.prev {
            self.total += nalgebra::distance(&prev, &p);
        }
        self.prev = Some(p);
        self.keyframes += 1;
    }
}
