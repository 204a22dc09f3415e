//! Error type shared by the samplers, the image context and config loading.
//!
//! Only conditions that abort an extraction call live here. Recoverable data
//! conditions (undefined orientation, `NaN` start depth) are handled in place
//! with a fallback value and surfaced through the sample reports in
//! [`crate::diagnostics`].
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SamplerError {
    /// The line tracer walked its whole safety budget without a terminal
    /// condition. Indicates a geometry or configuration fault.
    #[error("ray exceeded the maximum of {max_steps} traced points")]
    RayOverrun { max_steps: usize },

    #[error("unknown distance measure: {0:?} (expected pixels, perpendicular or geodesic)")]
    UnknownDistanceMeasure(String),

    #[error("no depth image bound to the sampler; call set_image first")]
    NoImageBound,

    #[error("index (row {row}, col {col}) outside {rows}x{cols} image")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{map} map is {actual_w}x{actual_h}, expected {expected_w}x{expected_h}")]
    DimensionMismatch {
        map: &'static str,
        expected_w: usize,
        expected_h: usize,
        actual_w: usize,
        actual_h: usize,
    },

    #[error("buffer of {actual} values does not fill a {w}x{h} image")]
    BufferSize { w: usize, h: usize, actual: usize },

    #[error("focal length must be finite and positive, got {0}")]
    InvalidFocalLength(f32),

    #[error("invalid sampler options: {0}")]
    InvalidOptions(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SamplerError>;
