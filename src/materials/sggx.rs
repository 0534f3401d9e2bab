// Copyright @yucwang 2026

//! SGGX microflake distribution (Heitz et al. 2015).
//!
//! A distribution is the symmetric positive semi-definite matrix `S` of an
//! ellipsoid. Its projected area along `w` is `sqrt(wᵀ S w)` and the
//! distribution of flake normals is
//! `D(m) = 1 / (π sqrt(|S|) (mᵀ S⁻¹ m)²)`.

use crate::math::constants::{ Float, Matrix3f, Vector3f, INV_PI };

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipsoid {
    pub xx: Float,
    pub yy: Float,
    pub zz: Float,
    pub xy: Float,
    pub xz: Float,
    pub yz: Float,
}

impl Ellipsoid {
    pub fn from_matrix(m: &Matrix3f) -> Self {
        Self {
            xx: m[(0, 0)],
            yy: m[(1, 1)],
            zz: m[(2, 2)],
            xy: m[(0, 1)],
            xz: m[(0, 2)],
            yz: m[(1, 2)],
        }
    }

    /// Surface-like flakes whose normals cluster around `axis`.
    /// `S = axis axisᵀ + σ² (I - axis axisᵀ)`.
    pub fn from_non_fiber(axis: &Vector3f, sigma: Float) -> Self {
        let outer = axis * axis.transpose();
        let s2 = sigma * sigma;
        Self::from_matrix(&(outer + (Matrix3f::identity() - outer) * s2))
    }

    /// Fiber-like flakes whose normals are orthogonal to `tangent`.
    /// `S = σ² t tᵀ + (I - t tᵀ)`.
    pub fn from_fiber(tangent: &Vector3f, sigma: Float) -> Self {
        let outer = tangent * tangent.transpose();
        let s2 = sigma * sigma;
        Self::from_matrix(&(outer * s2 + (Matrix3f::identity() - outer)))
    }

    pub fn matrix(&self) -> Matrix3f {
        Matrix3f::new(self.xx, self.xy, self.xz,
                      self.xy, self.yy, self.yz,
                      self.xz, self.yz, self.zz)
    }

    pub fn determinant(&self) -> Float {
        self.xx * self.yy * self.zz
            - self.xx * self.yz * self.yz
            - self.yy * self.xz * self.xz
            - self.zz * self.xy * self.xy
            + 2.0 * self.xy * self.xz * self.yz
    }

    /// `wᵀ adj(S) w`, i.e. `|S| wᵀ S⁻¹ w` without inverting.
    fn adjugate_quadratic_form(&self, w: &Vector3f) -> Float {
        w.x * w.x * (self.yy * self.zz - self.yz * self.yz)
            + w.y * w.y * (self.xx * self.zz - self.xz * self.xz)
            + w.z * w.z * (self.xx * self.yy - self.xy * self.xy)
            + 2.0 * (w.x * w.y * (self.xz * self.yz - self.zz * self.xy)
                   + w.x * w.z * (self.xy * self.yz - self.yy * self.xz)
                   + w.y * w.z * (self.xy * self.xz - self.xx * self.yz))
    }
}

/// Projected area of the distribution along `w`.
pub fn sigma(w: &Vector3f, s: &Ellipsoid) -> Float {
    let q = w.x * w.x * s.xx + w.y * w.y * s.yy + w.z * w.z * s.zz
        + 2.0 * (w.x * w.y * s.xy + w.x * w.z * s.xz + w.y * w.z * s.yz);
    q.max(0.0).sqrt()
}

/// Density of flake normals at `wm`.
pub fn ndf(wm: &Vector3f, s: &Ellipsoid) -> Float {
    let det = s.determinant();
    let den = s.adjugate_quadratic_form(wm);
    det.abs().powf(1.5) * INV_PI / (den * den)
}

/// Phase function of perfectly specular flakes: `D(wh) / (4 σ(wi))`.
pub fn eval_phase_specular(wi: &Vector3f, wo: &Vector3f, s: &Ellipsoid) -> Float {
    let h = wi + wo;
    let len = h.norm();
    if len == 0.0 {
        return 0.0;
    }
    let wh = h / len;
    0.25 * ndf(&wh, s) / sigma(wi, s)
}
