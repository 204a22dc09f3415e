use depth_features::{DepthImage, ImageF32, ImageMask};

/// A plane at `plane_depth` with a raised rectangle `[x0, x1] × [y0, y1]` at
/// `box_depth`. The rectangle outline is flagged in the edge map and every
/// orientation is `angle_deg`.
pub fn box_on_plane(
    width: usize,
    height: usize,
    rect: (usize, usize, usize, usize),
    plane_depth: f32,
    box_depth: f32,
    angle_deg: f32,
    focal: f32,
) -> DepthImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let (x0, x1, y0, y1) = rect;
    assert!(x0 <= x1 && x1 < width && y0 <= y1 && y1 < height);

    let mut depth = ImageF32::filled(width, height, plane_depth);
    let mut edges = ImageMask::new(width, height);
    for y in y0..=y1 {
        for x in x0..=x1 {
            depth.set(x, y, box_depth);
            if x == x0 || x == x1 || y == y0 || y == y1 {
                edges.set(x, y, true);
            }
        }
    }
    DepthImage::new(
        depth,
        edges,
        ImageF32::filled(width, height, angle_deg),
        focal,
    )
    .expect("synthetic maps share dimensions")
}
