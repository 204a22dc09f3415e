use crate::types::{CobwebFeature, PixelCoord, PixelIndex, SpiderFeature};
use serde::{Deserialize, Serialize};

/// How the start pixel of a spider sample was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SampleStatus {
    /// Depth and orientation defined; all eight rays were traced.
    Valid,
    /// Start depth was `NaN`; the feature is the zero fallback.
    InvalidDepth,
    /// Start orientation was `NaN`; the feature is the zero fallback.
    InvalidOrientation,
}

impl SampleStatus {
    pub fn is_valid(self) -> bool {
        self == SampleStatus::Valid
    }
}

/// Terminal state of a single traced ray.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraceOutcome {
    /// Stopped on a pixel flagged in the edge map.
    EdgeFound,
    /// Stopped at the image boundary (or border margin) without an edge.
    OutOfBounds,
}

/// One spider direction: where the ray went and what it measured.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionSample {
    /// Absolute direction in degrees, wrapped into [0, 360).
    pub angle_deg: f32,
    pub distance: f32,
    pub outcome: TraceOutcome,
    /// Point at which the trace stopped.
    pub stop: PixelCoord,
    /// Number of traced points, start included.
    pub steps: usize,
    /// Keyframes retained for the geodesic measure; 0 for the others.
    pub keyframes: usize,
    /// The requested direction was undefined and 0° was traced instead.
    pub angle_undefined: bool,
}

/// Spider feature with the provenance of every value.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiderReport {
    pub index: PixelIndex,
    pub status: SampleStatus,
    pub feature: SpiderFeature,
    /// Empty unless `status` is `Valid`.
    pub directions: Vec<DirectionSample>,
    /// Directions traced at 0° because their angle was undefined.
    pub undefined_angles: usize,
}

/// Cobweb feature plus the number of undefined-angle substitutions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CobwebReport {
    pub index: PixelIndex,
    pub feature: CobwebFeature,
    pub start_depth: f32,
    pub undefined_angles: usize,
}
