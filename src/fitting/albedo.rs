// Copyright @yucwang 2026

use crate::core::brdf::BRDF;
use crate::core::rng::LcgRng;
use crate::math::constants::{Float, Vector3f};
use crate::math::warp::{sample_uniform_hemisphere, sample_uniform_hemisphere_pdf};

/// Monte Carlo estimate of the integral of `brdf.eval(wi, ·)` over the upper
/// hemisphere. For a fitted LTC this is its magnitude.
pub fn integrate_hemisphere(brdf: &dyn BRDF,
                            wi: &Vector3f,
                            sample_count: usize,
                            rng: &mut LcgRng) -> Float {
    if sample_count == 0 {
        return 0.0;
    }

    let inv_pdf = 1.0 / sample_uniform_hemisphere_pdf();
    let mut sum = 0.0;
    for _ in 0..sample_count {
        let wo = sample_uniform_hemisphere(&rng.next_2d());
        sum += brdf.eval(wi, &wo, Some(&mut *rng)) * inv_pdf;
    }
    sum / sample_count as Float
}
