// Copyright @yucwang 2026

use crate::core::brdf::{BRDF, BRDFError, BRDFSample};
use crate::core::rng::LcgRng;
use crate::materials::sggx::{self, Ellipsoid};
use crate::math::constants::{Float, Vector3f};

/// Bulk properties of the flake slab.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SlabMedium {
    pub density: Float,
    pub thickness: Float,
    pub albedo: Float,
}

/// The reflectance is defined for a slab of unit density, unit thickness and
/// a non-absorbing medium.
pub const UNIT_SLAB: SlabMedium = SlabMedium {
    density: 1.0,
    thickness: 1.0,
    albedo: 1.0,
};

/// Analytic single scattering off a slab of SGGX microflakes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SingleScatterSggxBrdf {
    alpha: Float,
}

impl SingleScatterSggxBrdf {
    pub fn new(alpha: Float) -> Self {
        Self { alpha }
    }

    pub fn alpha(&self) -> Float {
        self.alpha
    }

    fn distribution(&self) -> Ellipsoid {
        // Roughness to SGGX flake cross section.
        let sigma = self.alpha * self.alpha;
        Ellipsoid::from_non_fiber(&Vector3f::z(), sigma)
    }
}

impl BRDF for SingleScatterSggxBrdf {
    fn eval(&self, wi: &Vector3f, wo: &Vector3f, _rng: Option<&mut LcgRng>) -> Float {
        let slab = &UNIT_SLAB;

        let cos_theta_i = wi.z;
        let cos_theta_o = wo.z;
        if cos_theta_i <= 0.0 || cos_theta_o < 0.0 {
            return 0.0;
        }

        let s = self.distribution();
        let lambda_wi = sggx::sigma(wi, &s) / cos_theta_i;
        let lambda_wo = sggx::sigma(wo, &s) / cos_theta_o;

        let tmp0 = slab.density * (lambda_wi + lambda_wo);
        let tmp1 = 1.0 - (-slab.thickness * tmp0).exp();
        let tmp = tmp1 / (cos_theta_i.abs() * tmp0);

        let sigma_t_along_wi = slab.density * sggx::sigma(wi, &s);
        let phase = sggx::eval_phase_specular(wi, wo, &s);

        let value = slab.albedo * phase * sigma_t_along_wi * tmp;

        // lambda_wi and lambda_wo diverge at grazing angles.
        if !value.is_finite() {
            return 0.0;
        }
        value
    }

    fn sample(&self, _wi: &Vector3f, _rng: &mut LcgRng) -> Result<BRDFSample, BRDFError> {
        Err(BRDFError::Unimplemented {
            model: "SingleScatterSggxBrdf",
            operation: "sample",
        })
    }

    fn to_string(&self) -> String {
        format!("SingleScatterSggxBrdf[\n  alpha = {}\n]", self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::{PI, HALF_PI};
    use crate::math::spherical::spherical_direction;

    fn assert_close(a: Float, b: Float) {
        assert!((a - b).abs() < 1e-12, "expected {} ≈ {}", a, b);
    }

    fn directions() -> Vec<Vector3f> {
        let mut out = Vec::new();
        for i in 0..=12 {
            for j in 0..8 {
                let theta = PI * i as Float / 12.0;
                let phi = 2.0 * PI * j as Float / 8.0;
                out.push(spherical_direction(theta, phi));
            }
        }
        out.push(Vector3f::new(1.0, 0.0, 0.0));
        out.push(Vector3f::new(0.0, 0.0, -1.0));
        out
    }

    #[test]
    fn test_normal_incidence_regression() {
        let brdf = SingleScatterSggxBrdf::new(0.5);
        let n = Vector3f::z();

        let s = brdf.distribution();
        assert_close(sggx::sigma(&n, &s), 1.0);

        // λ_wi = λ_wo = 1, D(n) = 16/π, σ(n) = 1.
        let expected = 2.0 / PI * (1.0 - (-2.0 as Float).exp());
        assert_close(brdf.eval(&n, &n, None), expected);
    }

    #[test]
    fn test_finite_and_non_negative_everywhere() {
        let dirs = directions();
        for &alpha in [0.0, 0.01, 0.1, 0.3, 0.5, 0.9, 1.0, 2.0].iter() {
            let brdf = SingleScatterSggxBrdf::new(alpha);
            for wi in dirs.iter() {
                for wo in dirs.iter() {
                    let value = brdf.eval(wi, wo, None);
                    assert!(value.is_finite() && value >= 0.0,
                            "alpha = {}, wi = {:?}, wo = {:?}: {}", alpha, wi, wo, value);
                }
            }
        }
    }

    #[test]
    fn test_horizon_cutoff() {
        let brdf = SingleScatterSggxBrdf::new(0.5);
        let below = Vector3f::new(0.0, 0.0, -1.0);
        let grazing = spherical_direction(HALF_PI, 0.3);
        for wo in directions().iter() {
            assert_eq!(brdf.eval(&below, wo, None), 0.0);
            assert_eq!(brdf.eval(&Vector3f::new(grazing.x, grazing.y, 0.0), wo, None), 0.0);
        }

        let wi = spherical_direction(0.4, 0.0);
        let wo = spherical_direction(0.4 + HALF_PI, 1.0);
        assert!(wo.z < 0.0);
        assert_eq!(brdf.eval(&wi, &wo, None), 0.0);
    }

    #[test]
    fn test_grazing_outgoing_is_allowed() {
        // wo.z == 0 passes the guard; the slab attenuates it to zero.
        let brdf = SingleScatterSggxBrdf::new(0.5);
        let wi = spherical_direction(0.3, 0.0);
        let wo = Vector3f::new(1.0, 0.0, 0.0);
        let value = brdf.eval(&wi, &wo, None);
        assert!(value.is_finite() && value >= 0.0);
    }

    #[test]
    fn test_deterministic() {
        let brdf = SingleScatterSggxBrdf::new(0.3);
        let mut rng = LcgRng::new(3);
        for i in 0..8 {
            for j in 0..8 {
                let wi = spherical_direction((0.3 as Float).acos() * i as Float / 7.0, 0.5 * j as Float);
                let wo = spherical_direction((0.3 as Float).acos() * j as Float / 7.0, 0.9 * i as Float);
                let a = brdf.eval(&wi, &wo, None);
                let b = brdf.eval(&wi, &wo, Some(&mut rng));
                assert_eq!(a.to_bits(), b.to_bits());
                assert!(a > 0.0);
            }
        }
    }

    #[test]
    fn test_grazing_incidence_stays_finite() {
        let brdf = SingleScatterSggxBrdf::new(0.5);
        let wo = spherical_direction(0.8, 2.0);
        assert!(wo.z > 0.1);
        for &z in [1e-3, 1e-6, 1e-7, 1e-12, 1e-200, 1e-310, 0.0].iter() {
            let wi = Vector3f::new((1.0 - z * z as Float).sqrt(), 0.0, z);
            let value = brdf.eval(&wi, &wo, None);
            assert!(value.is_finite() && value >= 0.0, "wi.z = {}: {}", z, value);
        }
        let wi = Vector3f::new(1.0, 0.0, 0.0);
        assert_eq!(brdf.eval(&wi, &wo, None), 0.0);
    }

    #[test]
    fn test_roughness_extremes_at_normal_incidence() {
        let n = Vector3f::z();
        for &alpha in [0.1, 0.9].iter() {
            let value = SingleScatterSggxBrdf::new(alpha).eval(&n, &n, None);
            assert!(value.is_finite() && value >= 0.0);
        }
    }

    #[test]
    fn test_sample_is_unimplemented() {
        let brdf = SingleScatterSggxBrdf::new(0.5);
        let mut rng = LcgRng::new(0);
        for wi in directions().iter() {
            match brdf.sample(wi, &mut rng) {
                Err(BRDFError::Unimplemented { model, operation }) => {
                    assert_eq!(model, "SingleScatterSggxBrdf");
                    assert_eq!(operation, "sample");
                }
                other => panic!("sampling must fail, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_to_string() {
        assert_eq!(SingleScatterSggxBrdf::new(0.5).to_string(),
                   "SingleScatterSggxBrdf[\n  alpha = 0.5\n]");
        assert_eq!(SingleScatterSggxBrdf::new(1.0).to_string(),
                   "SingleScatterSggxBrdf[\n  alpha = 1\n]");
    }
}
