// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};

/// Deterministic randomness source handed to `BRDF::eval`/`BRDF::sample`.
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    /// Uniform in [0, 1).
    pub fn next_float(&mut self) -> Float {
        (self.next_u32() as Float) / (u32::MAX as Float + 1.0)
    }

    pub fn next_2d(&mut self) -> Vector2f {
        let u = self.next_float();
        let v = self.next_float();
        Vector2f::new(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::LcgRng;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = LcgRng::new(7);
        let mut b = LcgRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_floats_in_unit_interval() {
        let mut rng = LcgRng::new(0);
        for _ in 0..1000 {
            let u = rng.next_float();
            assert!(u >= 0.0 && u < 1.0);
        }
    }
}
