// Copyright @yucwang 2023

use std::fmt;

use crate::core::rng::LcgRng;
use crate::math::constants::{ Float, Vector3f };
use crate::math::spherical::spherical_direction;

#[derive(Debug, PartialEq)]
pub struct BRDFSample {
    pub pdf: Float,
    pub wo: Vector3f,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BRDFError {
    /// The model does not provide this capability at all.
    Unimplemented { model: &'static str, operation: &'static str },
    /// The model's transform cannot be inverted, so it cannot be sampled.
    SingularTransform,
}

impl fmt::Display for BRDFError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BRDFError::Unimplemented { model, operation } => {
                write!(f, "\"{}::{}\" not implemented.", model, operation)
            }
            BRDFError::SingularTransform => write!(f, "transform matrix is not invertible"),
        }
    }
}

impl std::error::Error for BRDFError {}

/// Reflectance models in the local shading frame, +z being the macroscopic
/// normal. Both directions point away from the surface.
pub trait BRDF: Send + Sync {
    /// The randomness source is part of the interface; deterministic models
    /// ignore it.
    fn eval(&self, wi: &Vector3f, wo: &Vector3f, rng: Option<&mut LcgRng>) -> Float;

    fn sample(&self, wi: &Vector3f, rng: &mut LcgRng) -> Result<BRDFSample, BRDFError>;

    // Output string for a single model.
    fn to_string(&self) -> String;
}

pub fn eval_spherical(brdf: &dyn BRDF,
                      theta_i: Float,
                      phi_i: Float,
                      theta_o: Float,
                      phi_o: Float) -> Float {
    let wi = spherical_direction(theta_i, phi_i);
    let wo = spherical_direction(theta_o, phi_o);
    brdf.eval(&wi, &wo, None)
}
