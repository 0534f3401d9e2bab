// Copyright @yucwang 2026

use super::constants::{ Float, Vector3f };

/// Direction in the local shading frame from polar angle `theta`
/// (measured from +z) and azimuth `phi`, both in radians.
pub fn spherical_direction(theta: Float, phi: Float) -> Vector3f {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vector3f::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

pub fn spherical_theta(w: &Vector3f) -> Float {
    w.z.max(-1.0).min(1.0).acos()
}

pub fn spherical_phi(w: &Vector3f) -> Float {
    let phi = w.y.atan2(w.x);
    if phi < 0.0 { phi + 2.0 * super::constants::PI } else { phi }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::HALF_PI;

    fn assert_close(a: Float, b: Float) {
        assert!((a - b).abs() < 1e-9, "expected {} ≈ {}", a, b);
    }

    #[test]
    fn test_spherical_direction_axes() {
        let n = spherical_direction(0.0, 1.3);
        assert_close(n.z, 1.0);

        let x = spherical_direction(HALF_PI, 0.0);
        assert_close(x.x, 1.0);
        assert_close(x.z, 0.0);
    }

    #[test]
    fn test_spherical_angles_invert_direction() {
        let w = spherical_direction(0.7, 2.1);
        assert_close(spherical_theta(&w), 0.7);
        assert_close(spherical_phi(&w), 2.1);
    }
}
