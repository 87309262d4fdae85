//! vec_math.rs
//!
//! Thin helpers over `nalgebra::Vector3<f32>`.
//!
//! All helpers are total: a zero-length input yields the zero vector
//! instead of NaN, so callers never have to guard before normalizing.

use nalgebra::Vector3;

/// World-space vector (meters, m/s, rad/s depending on context).
///
/// Axes: x = lateral (goal width), y = up, z = depth (goal line at z = 0).
pub type Vec3 = Vector3<f32>;

/// Lengths below this are treated as zero.
pub const EPSILON: f32 = 1e-6;

#[inline]
pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

#[inline]
pub fn up() -> Vec3 {
    Vec3::y()
}

/// Unit vector in the direction of `v`, or zero when `v` has no length.
#[inline]
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    v.try_normalize(EPSILON).unwrap_or_else(Vec3::zeros)
}

/// Scale `v` down so that `|v| <= max_len`. Direction is preserved.
#[inline]
pub fn clamp_length(v: &Vec3, max_len: f32) -> Vec3 {
    let len = v.norm();
    if len > max_len && len > EPSILON {
        v * (max_len / len)
    } else {
        *v
    }
}

/// Horizontal (x/z) part of `v`.
#[inline]
pub fn horizontal(v: &Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// All components finite (no NaN/inf).
#[inline]
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// 선형 보간
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_zero_vector_is_zero() {
        let n = normalize_or_zero(&Vec3::zeros());
        assert_eq!(n, Vec3::zeros());
        assert!(is_finite(&n));
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = normalize_or_zero(&vec3(3.0, 0.0, 4.0));
        assert!((n.norm() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_length() {
        let v = vec3(0.0, 200.0, 0.0);
        assert!((clamp_length(&v, 120.0).norm() - 120.0).abs() < 1e-3);

        let small = vec3(1.0, 1.0, 0.0);
        assert_eq!(clamp_length(&small, 120.0), small);
        assert_eq!(clamp_length(&Vec3::zeros(), 120.0), Vec3::zeros());
    }

    #[test]
    fn test_lerp_vec_midpoint() {
        let m = lerp_vec(&vec3(0.0, 1.0, 0.0), &vec3(2.0, 1.0, 4.0), 0.5);
        assert_eq!(m, vec3(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_is_finite_rejects_nan() {
        assert!(!is_finite(&vec3(f32::NAN, 0.0, 0.0)));
        assert!(!is_finite(&vec3(0.0, f32::INFINITY, 0.0)));
    }
}
