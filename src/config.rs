//! JSON configuration for both samplers.
//!
//! ```json
//! {
//!   "spider": { "distance_measure": "geodesic", "keyframe_stride": 10 },
//!   "cobweb": { "step": 5.0, "fixed_patch_size": false }
//! }
//! ```
//!
//! Every field is optional; missing ones take the option defaults. An
//! unknown `distance_measure` is rejected while loading.
use crate::error::Result;
use crate::features::{CobwebOptions, CobwebSampler, SpiderOptions, SpiderSampler};
use crate::io::read_json_file;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub spider: SpiderOptions,
    pub cobweb: CobwebOptions,
}

impl FeatureConfig {
    pub fn spider_sampler<'a>(&self) -> Result<SpiderSampler<'a>> {
        SpiderSampler::new(self.spider)
    }

    pub fn cobweb_sampler<'a>(&self) -> Result<CobwebSampler<'a>> {
        CobwebSampler::new(self.cobweb)
    }
}

pub fn load_config(path: &Path) -> Result<FeatureConfig> {
    read_json_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SamplerError;
    use crate::features::DistanceMeasure;
    use std::fs;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg: FeatureConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, FeatureConfig::default());
        assert_eq!(cfg.spider.distance_measure, DistanceMeasure::Geodesic);
        assert!(!cfg.cobweb.fixed_patch_size);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.json");
        fs::write(
            &path,
            r#"{"spider":{"distance_measure":"perpendicular","border":2},
                "cobweb":{"step":3.0,"fixed_patch_size":true}}"#,
        )
        .unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.spider.distance_measure, DistanceMeasure::Perpendicular);
        assert_eq!(cfg.spider.border, 2);
        assert_eq!(cfg.spider.keyframe_stride, 10);
        assert_eq!(cfg.cobweb.step, 3.0);
        assert!(cfg.cobweb.fixed_patch_size);
        assert!(cfg.spider_sampler().is_ok());
        assert!(cfg.cobweb_sampler().is_ok());
    }

    #[test]
    fn unknown_measure_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"spider":{"distance_measure":"taxicab"}}"#).unwrap();
        let err = load_config(&path).unwrap_err();
        match err {
            SamplerError::Config(msg) => assert!(msg.contains("taxicab"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_config(Path::new("/nonexistent/features.json")).unwrap_err();
        assert!(matches!(err, SamplerError::Config(_)));
    }

    #[test]
    fn invalid_options_rejected_when_building_sampler() {
        let cfg: FeatureConfig =
            serde_json::from_str(r#"{"spider":{"keyframe_stride":0}}"#).unwrap();
        assert!(matches!(
            cfg.spider_sampler(),
            Err(SamplerError::InvalidOptions(_))
        ));
    }
}
