use crate::error::{Result, SamplerError};
use crate::tracer::MAX_TRACE_STEPS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the spider sampler turns a traced ray into a scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DistanceMeasure {
    /// Euclidean pixel distance from the start to the first edge pixel.
    Pixels,
    /// Pixel distance scaled by the depth at the stopping pixel.
    Perpendicular,
    /// 3D arc length accumulated over back-projected keyframes.
    #[default]
    Geodesic,
}

impl DistanceMeasure {
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMeasure::Pixels => "pixels",
            DistanceMeasure::Perpendicular => "perpendicular",
            DistanceMeasure::Geodesic => "geodesic",
        }
    }
}

impl fmt::Display for DistanceMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMeasure {
    type Err = SamplerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pixels" => Ok(DistanceMeasure::Pixels),
            "perpendicular" => Ok(DistanceMeasure::Perpendicular),
            "geodesic" => Ok(DistanceMeasure::Geodesic),
            other => Err(SamplerError::UnknownDistanceMeasure(other.to_string())),
        }
    }
}

impl TryFrom<String> for DistanceMeasure {
    type Error = SamplerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Options for [`SpiderSampler`](super::SpiderSampler).
///
/// - `keyframe_stride`: geodesic keyframes are taken every n-th traced point
///   (plus the stopping point); larger strides smooth depth noise.
/// - `border`: margin in pixels at which a geodesic trace is considered to
///   have left the image.
/// - `max_steps`: safety budget handed to the line tracer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiderOptions {
    pub distance_measure: DistanceMeasure,
    pub keyframe_stride: usize,
    pub border: usize,
    pub max_steps: usize,
}

impl Default for SpiderOptions {
    fn default() -> Self {
        Self {
            distance_measure: DistanceMeasure::Geodesic,
            keyframe_stride: 10,
            border: 1,
            max_steps: MAX_TRACE_STEPS,
        }
    }
}

impl SpiderOptions {
    pub fn new(distance_measure: DistanceMeasure) -> Self {
        Self {
            distance_measure,
            ..Self::default()
        }
    }

    pub fn with_keyframe_stride(mut self, stride: usize) -> Self {
        self.keyframe_stride = stride;
        self
    }

    pub fn with_border(mut self, border: usize) -> Self {
        self.border = border;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.keyframe_stride == 0 {
            return Err(SamplerError::InvalidOptions(
                "keyframe_stride must be at least 1".into(),
            ));
        }
        if self.max_steps == 0 {
            return Err(SamplerError::InvalidOptions(
                "max_steps must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Options for [`CobwebSampler`](super::CobwebSampler).
///
/// `step` is the base offset `t`. With `fixed_patch_size` it is used as-is
/// in pixels; otherwise it is divided by the start depth so the sampled
/// patch keeps a constant real-world size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CobwebOptions {
    pub step: f32,
    pub fixed_patch_size: bool,
}

impl Default for CobwebOptions {
    fn default() -> Self {
        Self {
            step: 5.0,
            fixed_patch_size: false,
        }
    }
}

impl CobwebOptions {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }

    pub fn with_fixed_patch_size(mut self, fixed: bool) -> Self {
        self.fixed_patch_size = fixed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(SamplerError::InvalidOptions(format!(
                "step must be finite and positive, got {}",
                self.step
            )));
        }
        Ok(())
    }
}
