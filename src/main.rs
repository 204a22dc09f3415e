use depth_features::diagnostics::TimingBreakdown;
use depth_features::io::write_json_file;
use depth_features::{load_config, DepthImage, FeatureConfig, ImageF32, ImageMask, PixelIndex};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

/// Demo: a box raised 0.5 m above a plane at 2 m, with the box outline as
/// the edge map and orientations pointing away from the box centre.
fn synthetic_scene(w: usize, h: usize) -> depth_features::Result<DepthImage> {
    let (x0, x1, y0, y1) = (w / 3, 2 * w / 3, h / 3, 2 * h / 3);
    let (cx, cy) = ((x0 + x1) as f32 / 2.0, (y0 + y1) as f32 / 2.0);
    let mut depth = ImageF32::filled(w, h, 2.0);
    let mut edges = ImageMask::new(w, h);
    let mut angles = ImageF32::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let inside = (x0..=x1).contains(&x) && (y0..=y1).contains(&y);
            if inside {
                depth.set(x, y, 1.5);
            }
            let on_outline = inside && (x == x0 || x == x1 || y == y0 || y == y1);
            edges.set(x, y, on_outline);
            let angle = (y as f32 - cy).atan2(x as f32 - cx).to_degrees();
            angles.set(x, y, angle);
        }
    }
    // a hole in the depth data to exercise the invalid-sample path
    depth.set(2, 2, f32::NAN);
    DepthImage::new(depth, edges, angles, 525.0)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DemoOutput {
    config: FeatureConfig,
    indices: Vec<PixelIndex>,
    cobweb: Vec<Vec<f32>>,
    spider: Vec<Option<Vec<f32>>>,
    timings: TimingBreakdown,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Usage: `depth-features [config.json] [output.json]`. Without an output
/// path the result is printed to stdout.
fn run() -> depth_features::Result<()> {
    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => FeatureConfig::default(),
    };
    let output_path = args.next().map(PathBuf::from);

    let image = synthetic_scene(96, 72)?;
    let indices = vec![
        PixelIndex::new(36, 48),
        PixelIndex::new(30, 40),
        PixelIndex::new(10, 10),
        PixelIndex::new(2, 2),
    ];

    let mut cobweb = config.cobweb_sampler()?;
    let mut spider = config.spider_sampler()?;
    cobweb.set_image(&image);
    spider.set_image(&image);

    let mut timings = TimingBreakdown::default();
    let cobweb_features = timings.time("cobweb", || cobweb.extract(&indices))?;
    let spider_features = timings.time("spider", || spider.compute_features(&indices));

    let output = DemoOutput {
        config,
        cobweb: cobweb_features.iter().map(|f| f.to_vec()).collect(),
        spider: spider_features
            .into_iter()
            .zip(&indices)
            .map(|(res, index)| match res {
                Ok(f) => Some(f.to_vec()),
                Err(err) => {
                    eprintln!("skipping ({}, {}): {err}", index.row, index.col);
                    None
                }
            })
            .collect(),
        indices,
        timings,
    };

    match output_path {
        Some(path) => {
            write_json_file(&path, &output)?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&output).map_err(|e| {
                depth_features::SamplerError::Config(format!("Failed to serialize: {e}"))
            })?;
            println!("{json}");
        }
    }
    Ok(())
}
