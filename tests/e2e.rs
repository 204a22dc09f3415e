mod common;

use approx::assert_relative_eq;
use common::synthetic_depth::box_on_plane;
use depth_features::diagnostics::{SampleStatus, TraceOutcome};
use depth_features::io::{read_json_file, write_json_file};
use depth_features::types::{COBWEB_LEN, SPIDER_LEN};
use depth_features::{
    CobwebOptions, CobwebSampler, DepthImage, DistanceMeasure, PixelIndex, SpiderOptions,
    SpiderSampler,
};

#[test]
fn cobweb_returns_one_vector_per_index() {
    let image = box_on_plane(64, 48, (20, 40, 15, 30), 2.0, 1.5, 0.0, 500.0);
    let mut sampler =
        CobwebSampler::new(CobwebOptions::new(4.0).with_fixed_patch_size(true)).unwrap();
    sampler.set_image(&image);

    let indices: Vec<PixelIndex> = image.valid_indices().into_iter().step_by(97).collect();
    let features = sampler.extract(&indices).unwrap();
    assert_eq!(features.len(), indices.len());
    assert!(features.iter().all(|f| f.len() == COBWEB_LEN));
}

#[test]
fn cobweb_sees_the_box_step() {
    // Start on the plane 2 px left of the box; 0° looks right into the box.
    let image = box_on_plane(64, 48, (20, 40, 15, 30), 2.0, 1.5, 0.0, 500.0);
    let mut sampler =
        CobwebSampler::new(CobwebOptions::new(1.0).with_fixed_patch_size(true)).unwrap();
    sampler.set_image(&image);
    let f = sampler.extract(&[PixelIndex::new(22, 18)]).unwrap()[0];
    // radius 1 stays on the plane, radius 2..4 lands on the box
    assert_relative_eq!(f[0], 0.0);
    for m in 1..4 {
        assert_relative_eq!(f[8 * m], -0.5);
    }
    // 180° looks away from the box
    for m in 0..4 {
        assert_relative_eq!(f[8 * m + 4], 0.0);
    }
}

#[test]
fn spider_box_interior_distances() {
    // Box spans cols 10..=30, rows 10..=20; start in the middle.
    let image = box_on_plane(48, 32, (10, 30, 10, 20), 3.0, 1.0, 0.0, 2.0);
    let mut sampler = SpiderSampler::new(SpiderOptions::new(DistanceMeasure::Pixels)).unwrap();
    sampler.set_image(&image);

    let report = sampler.compute_report(PixelIndex::new(15, 20)).unwrap();
    assert_eq!(report.status, SampleStatus::Valid);
    assert_eq!(report.feature.len(), SPIDER_LEN);
    assert!(report
        .directions
        .iter()
        .all(|d| d.outcome == TraceOutcome::EdgeFound));
    // 0° → right edge at col 30, 270° → up to row 10, 180° → col 10, 90° → row 20
    assert_relative_eq!(report.feature[0], 10.0);
    assert_relative_eq!(report.feature[2], 5.0);
    assert_relative_eq!(report.feature[4], 10.0);
    assert_relative_eq!(report.feature[6], 5.0);
}

#[test]
fn measures_agree_on_constant_depth_box() {
    // Inside the box the depth is constant, so perpendicular = pixels · d
    // and geodesic = pixels · d / f along axis-aligned rays.
    let (d, f) = (1.25f32, 5.0f32);
    let image = box_on_plane(80, 60, (10, 70, 10, 50), 4.0, d, 0.0, f);
    let index = PixelIndex::new(30, 25);

    let features: Vec<[f32; SPIDER_LEN]> = [
        DistanceMeasure::Pixels,
        DistanceMeasure::Perpendicular,
        DistanceMeasure::Geodesic,
    ]
    .into_iter()
    .map(|m| {
        let mut s = SpiderSampler::new(SpiderOptions::new(m)).unwrap();
        s.set_image(&image);
        s.compute_feature(index).unwrap()
    })
    .collect();

    for k in [0usize, 2, 4, 6] {
        let px = features[0][k];
        assert_relative_eq!(features[1][k], px * d, max_relative = 1e-5);
        assert_relative_eq!(features[2][k], px * d / f, max_relative = 1e-4);
    }
}

#[test]
fn invalid_samples_do_not_abort_a_batch() {
    let base = box_on_plane(20, 20, (5, 15, 5, 15), 2.0, 1.0, 45.0, 1.0);
    let mut depth = base.depth_map().clone();
    depth.set(3, 3, f32::NAN);
    let image = DepthImage::new(
        depth,
        base.edge_map().clone(),
        base.orientation_map().clone(),
        base.focal_length(),
    )
    .unwrap();

    let mut sampler = SpiderSampler::new(SpiderOptions::default()).unwrap();
    sampler.set_image(&image);
    let out = sampler.compute_features(&[
        PixelIndex::new(10, 10),
        PixelIndex::new(3, 3),
        PixelIndex::new(12, 8),
    ]);
    assert_eq!(out.len(), 3);
    assert_eq!(*out[1].as_ref().unwrap(), [0.0; SPIDER_LEN]);
    assert!(out[0].as_ref().unwrap().iter().all(|v| *v > 0.0));
    assert!(out[2].is_ok());
}

#[test]
fn spider_report_dumps_to_json() {
    let image = box_on_plane(64, 48, (20, 40, 15, 30), 2.0, 1.5, 0.0, 500.0);
    let mut sampler = SpiderSampler::new(SpiderOptions::default()).unwrap();
    sampler.set_image(&image);
    let report = sampler.compute_report(PixelIndex::new(22, 30)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("spider.json");
    write_json_file(&path, &report).unwrap();

    let json: serde_json::Value = read_json_file(&path).unwrap();
    assert_eq!(json["status"], "valid");
    assert_eq!(json["undefinedAngles"], 0);
    let directions = json["directions"].as_array().unwrap();
    assert_eq!(directions.len(), SPIDER_LEN);
    assert!(directions.iter().all(|d| d["angleUndefined"] == false));
}
