//! Angle utilities shared by the samplers.

/// Wraps an angle in degrees into `[0, 360)`.
///
/// Matches floored modulo, so `-45` maps to `315` and `360` maps to `0`.
#[inline]
pub fn wrap_degrees(angle_deg: f32) -> f32 {
    let wrapped = angle_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Replaces an undefined angle by 0. The flag reports whether the fallback
/// was taken.
#[inline]
pub fn defined_or_zero(angle: f32) -> (f32, bool) {
    if angle.is_nan() {
        (0.0, true)
    } else {
        (angle, false)
    }
}
