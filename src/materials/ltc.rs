// Copyright @yucwang 2026

use crate::core::brdf::{BRDF, BRDFError, BRDFSample};
use crate::core::rng::LcgRng;
use crate::math::constants::{Float, Matrix3f, Vector3f, INV_PI};
use crate::math::warp::sample_cosine_hemisphere;

/// Linearly transformed clamped cosine. The lobe is stored through the
/// inverse transform `m_inv`, which maps a direction of the lobe back onto
/// the canonical cosine distribution.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LtcBrdf {
    magnitude: Float,
    m_inv: Matrix3f,
}

impl LtcBrdf {
    pub fn new(magnitude: Float, m_inv: Matrix3f) -> Self {
        Self { magnitude, m_inv }
    }

    /// The isotropic parameterization used for the fitted tables:
    /// `m_inv = [[a, 0, b], [0, a, 0], [0, 0, 1]]`.
    pub fn from_coefficients(a: Float, b: Float, magnitude: Float) -> Self {
        let m_inv = Matrix3f::new(a,   0.0, b,
                                  0.0, a,   0.0,
                                  0.0, 0.0, 1.0);
        Self::new(magnitude, m_inv)
    }

    pub fn magnitude(&self) -> Float {
        self.magnitude
    }

    fn density(&self, wo: &Vector3f) -> Float {
        let w = self.m_inv * wo;
        let len = w.norm();
        if len == 0.0 {
            return 0.0;
        }
        let cosine = (w.z / len).max(0.0) * INV_PI;
        let jacobian = self.m_inv.determinant().abs() / (len * len * len);
        cosine * jacobian
    }
}

impl BRDF for LtcBrdf {
    fn eval(&self, _wi: &Vector3f, wo: &Vector3f, _rng: Option<&mut LcgRng>) -> Float {
        let value = self.magnitude * self.density(wo);
        if !value.is_finite() {
            return 0.0;
        }
        value
    }

    fn sample(&self, _wi: &Vector3f, rng: &mut LcgRng) -> Result<BRDFSample, BRDFError> {
        let m = self.m_inv.try_inverse().ok_or(BRDFError::SingularTransform)?;
        let w = m * sample_cosine_hemisphere(&rng.next_2d());
        let len = w.norm();
        if len == 0.0 {
            return Err(BRDFError::SingularTransform);
        }
        let wo = w / len;
        Ok(BRDFSample { pdf: self.density(&wo), wo })
    }

    fn to_string(&self) -> String {
        let m = &self.m_inv;
        format!("LtcBrdf[\n  magnitude = {}\n  m_inv = [[{}, {}, {}], [{}, {}, {}], [{}, {}, {}]]\n]",
                self.magnitude,
                m[(0, 0)], m[(0, 1)], m[(0, 2)],
                m[(1, 0)], m[(1, 1)], m[(1, 2)],
                m[(2, 0)], m[(2, 1)], m[(2, 2)])
    }
}
