//! Per-sample reports for tooling and data-quality audits.
//!
//! The plain feature arrays returned by the samplers carry no information
//! about how they were produced. The report types here record which
//! fallback paths were taken (undefined orientation, invalid start sample)
//! and how each spider ray terminated.

pub mod sample;
pub mod timing;

pub use sample::{CobwebReport, DirectionSample, SampleStatus, SpiderReport, TraceOutcome};
pub use timing::{StageTiming, TimingBreakdown};
