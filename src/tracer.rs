//! Integer line stepping along an arbitrary angle.
//!
//! [`LineTracer`] walks pixel by pixel from a start coordinate in a given
//! direction using Bresenham-style error accumulation. The direction is
//! discretised once, against a fixed reference length, into integer
//! displacements `dx`, `dy`; after that every step is integer-only:
//!
//! ```text
//! angle ≈ 20°, dx = 939, dy = 342 (x dominant)
//!
//!     2 │              ●●●
//!     1 │      ●●●●●●●●
//!     0 ●●●●●●●
//!       └────────────────────
//! ```
//!
//! The tracer is a pure geometric ray: it knows nothing about image bounds
//! and relies on the consumer to stop pulling points. A safety budget on
//! the number of yielded points is enforced here, so a consumer that never
//! finds a terminal condition gets [`SamplerError::RayOverrun`] instead of
//! looping forever.
use crate::angle::defined_or_zero;
use crate::error::SamplerError;
use crate::types::PixelCoord;
use log::warn;

/// Default number of points a tracer yields before reporting an overrun.
pub const MAX_TRACE_STEPS: usize = 10_000;

/// Length over which the direction is discretised into integer deltas.
const REFERENCE_LENGTH: f32 = 1000.0;

/// Lazy, fused iterator over the pixels of a ray.
///
/// Yields the start point first. Each later point is exactly one step
/// (Chebyshev distance 1) from its predecessor.
#[derive(Clone, Debug)]
pub struct LineTracer {
    x: i32,
    y: i32,
    sx: i32,
    sy: i32,
    /// Delta along the dominant axis
    major: i32,
    /// Delta along the secondary axis
    minor: i32,
    err: i32,
    x_major: bool,
    yielded: usize,
    max_steps: usize,
    angle_undefined: bool,
    done: bool,
}

impl LineTracer {
    /// Tracer from `start` along `angle_rad` with the default step budget.
    pub fn new(start: PixelCoord, angle_rad: f32) -> Self {
        Self::with_max_steps(start, angle_rad, MAX_TRACE_STEPS)
    }

    pub fn with_max_steps(start: PixelCoord, angle_rad: f32, max_steps: usize) -> Self {
        let (angle, angle_undefined) = defined_or_zero(angle_rad);
        if angle_undefined {
            warn!(
                "LineTracer: undefined angle at ({}, {}), tracing at 0 rad",
                start.x, start.y
            );
        }

        let (sin, cos) = angle.sin_cos();
        let dx = (REFERENCE_LENGTH * cos).abs() as i32;
        let dy = (REFERENCE_LENGTH * sin).abs() as i32;
        let sx = if cos < 0.0 { -1 } else { 1 };
        let sy = if sin < 0.0 { -1 } else { 1 };

        let x_major = dx > dy;
        let (major, minor) = if x_major { (dx, dy) } else { (dy, dx) };

        Self {
            x: start.x,
            y: start.y,
            sx,
            sy,
            major,
            minor,
            err: major / 2,
            x_major,
            yielded: 0,
            max_steps,
            angle_undefined,
            done: false,
        }
    }

    /// True when the requested angle was `NaN` and 0 was traced instead.
    pub fn angle_was_undefined(&self) -> bool {
        self.angle_undefined
    }

    /// Number of points yielded so far.
    pub fn steps(&self) -> usize {
        self.yielded
    }

    /// True once the iterator has returned its last item.
    pub fn is_exhausted(&self) -> bool {
        self.done
    }

    #[inline]
    fn advance(&mut self) {
        self.err -= self.minor;
        if self.x_major {
            if self.err < 0 {
                self.y += self.sy;
                self.err += self.major;
            }
            self.x += self.sx;
        } else {
            if self.err < 0 {
                self.x += self.sx;
                self.err += self.major;
            }
            self.y += self.sy;
        }
    }
}

impl Iterator for LineTracer {
    type Item = Result<PixelCoord, SamplerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.yielded >= self.max_steps {
            self.done = true;
            return Some(Err(SamplerError::RayOverrun {
                max_steps: self.max_steps,
            }));
        }
        let point = PixelCoord::new(self.x, self.y);
        self.yielded += 1;
        self.advance();
        Some(Ok(point))
    }
}

impl std::iter::FusedIterator for LineTracer {}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(start: PixelCoord, angle_deg: f32, n: usize) -> Vec<PixelCoord> {
        LineTracer::new(start, angle_deg.to_radians())
            .take(n)
            .map(|p| p.unwrap())
            .collect()
    }

    #[test]
    fn starts_at_origin_point() {
        let pts = trace(PixelCoord::new(5, 7), 33.0, 1);
        assert_eq!(pts, vec![PixelCoord::new(5, 7)]);
    }

    #[test]
    fn axis_aligned_rays_hold_secondary_axis() {
        let origin = PixelCoord::new(0, 0);
        let cases = [
            (0.0, (1, 0)),
            (90.0, (0, 1)),
            (180.0, (-1, 0)),
            (270.0, (0, -1)),
        ];
        for (deg, (ux, uy)) in cases {
            let pts = trace(origin, deg, 50);
            for (i, p) in pts.iter().enumerate() {
                let i = i as i32;
                assert_eq!(
                    *p,
                    PixelCoord::new(ux * i, uy * i),
                    "angle {deg}, step {i}"
                );
            }
        }
    }

    #[test]
    fn consecutive_points_are_adjacent() {
        let starts = [
            PixelCoord::new(0, 0),
            PixelCoord::new(17, -4),
            PixelCoord::new(-30, 12),
        ];
        let mut deg = 0.0f32;
        while deg < 360.0 {
            for start in starts {
                let pts = trace(start, deg, 200);
                for pair in pts.windows(2) {
                    assert_eq!(
                        pair[0].chebyshev(&pair[1]),
                        1,
                        "angle {deg} start {start:?}: {:?} -> {:?}",
                        pair[0],
                        pair[1]
                    );
                }
            }
            deg += 7.5;
        }
    }

    #[test]
    fn diagonal_tie_goes_to_vertical_axis() {
        // At 45° both deltas are 707; y is stepped every iteration and x
        // follows on every one as well.
        let pts = trace(PixelCoord::new(0, 0), 45.0, 5);
        for (i, p) in pts.iter().enumerate() {
            let i = i as i32;
            assert_eq!(*p, PixelCoord::new(i, i));
        }
    }

    #[test]
    fn shallow_ray_follows_slope() {
        // tan(20°) ≈ 0.364: after 100 steps along x, y should be ~36.
        let pts = trace(PixelCoord::new(0, 0), 20.0, 101);
        let last = pts[100];
        assert_eq!(last.x, 100);
        assert!((last.y - 36).abs() <= 1, "got {last:?}");
    }

    #[test]
    fn negative_directions_step_backwards() {
        let pts = trace(PixelCoord::new(0, 0), 225.0, 4);
        assert_eq!(pts[3], PixelCoord::new(-3, -3));
    }

    #[test]
    fn nan_angle_traces_along_zero() {
        let mut tracer = LineTracer::new(PixelCoord::new(2, 3), f32::NAN);
        assert!(tracer.angle_was_undefined());
        let pts: Vec<PixelCoord> = tracer.by_ref().take(3).map(|p| p.unwrap()).collect();
        assert_eq!(
            pts,
            vec![
                PixelCoord::new(2, 3),
                PixelCoord::new(3, 3),
                PixelCoord::new(4, 3)
            ]
        );
    }

    #[test]
    fn overrun_is_reported_once_then_exhausted() {
        let mut tracer = LineTracer::with_max_steps(PixelCoord::new(0, 0), 0.3, 4);
        for _ in 0..4 {
            assert!(matches!(tracer.next(), Some(Ok(_))));
        }
        assert_eq!(
            tracer.next(),
            Some(Err(SamplerError::RayOverrun { max_steps: 4 }))
        );
        assert!(tracer.is_exhausted());
        assert_eq!(tracer.next(), None);
        assert_eq!(tracer.steps(), 4);
    }

    #[test]
    fn default_budget_is_ten_thousand_points() {
        let results: Vec<_> = LineTracer::new(PixelCoord::new(0, 0), 1.0).collect();
        assert_eq!(results.len(), MAX_TRACE_STEPS + 1);
        assert!(results[..MAX_TRACE_STEPS].iter().all(|r| r.is_ok()));
        assert!(results[MAX_TRACE_STEPS].is_err());
    }
}
