// Copyright @yucwang 2026

use std::cell::Cell;
use std::cmp::Ordering;

use nalgebra::DVector;

use crate::math::constants::Float;

const REFLECTION: Float = 1.0;
const EXPANSION: Float = 2.0;
const CONTRACTION: Float = 0.5;
const SHRINK: Float = 0.5;

/// Downhill simplex minimizer. Needs no derivatives.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NelderMead {
    /// Convergence threshold, applied both to the spread of the simplex
    /// vertices and to the spread of their objective values.
    pub tolerance: Float,
    pub max_iters: usize,
    /// Objective evaluations after which no new iteration is started.
    pub max_evals: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub x: DVector<Float>,
    pub value: Float,
    pub iterations: usize,
    pub evaluations: usize,
    pub converged: bool,
}

impl NelderMead {
    pub fn new(tolerance: Float, max_iters: usize) -> Self {
        Self { tolerance, max_iters, max_evals: usize::MAX }
    }

    pub fn with_max_evals(self, max_evals: usize) -> Self {
        Self { max_evals, ..self }
    }

    /// Simplex around `x0`: `x0` itself plus one vertex offset by `delta`
    /// along each axis.
    pub fn axis_simplex(x0: &DVector<Float>, delta: Float) -> Vec<DVector<Float>> {
        let mut simplex = vec![x0.clone()];
        for i in 0..x0.len() {
            let mut v = x0.clone();
            v[i] += delta;
            simplex.push(v);
        }
        simplex
    }

    /// Minimize `f` starting from `simplex`, which must hold `n + 1`
    /// vertices of dimension `n`. NaN objective values count as +inf.
    pub fn minimize<F>(&self, mut f: F, simplex: Vec<DVector<Float>>) -> Minimum
    where
        F: FnMut(&DVector<Float>) -> Float,
    {
        assert!(!simplex.is_empty());
        let n = simplex[0].len();
        assert!(n >= 1, "simplex vertices need at least one dimension");
        assert_eq!(simplex.len(), n + 1, "simplex needs n + 1 vertices");

        let evaluations = Cell::new(0usize);
        let mut objective = |x: &DVector<Float>| -> Float {
            evaluations.set(evaluations.get() + 1);
            let v = f(x);
            if v.is_nan() { Float::INFINITY } else { v }
        };

        let mut vertices: Vec<(DVector<Float>, Float)> = simplex
            .into_iter()
            .map(|x| {
                let v = objective(&x);
                (x, v)
            })
            .collect();
        sort_vertices(&mut vertices);

        let mut iterations = 0usize;
        let mut converged = false;

        while iterations < self.max_iters && evaluations.get() < self.max_evals {
            if self.has_converged(&vertices) {
                converged = true;
                break;
            }

            let worst = vertices[n].0.clone();
            let worst_value = vertices[n].1;
            let second_worst_value = vertices[n - 1].1;
            let best_value = vertices[0].1;

            let mut centroid = DVector::<Float>::zeros(n);
            for (x, _) in vertices.iter().take(n) {
                centroid += x;
            }
            centroid /= n as Float;

            let xr = &centroid * (1.0 + REFLECTION) - &worst * REFLECTION;
            let fr = objective(&xr);

            let mut shrink = false;
            if fr < best_value {
                let xe = &centroid * (1.0 + REFLECTION * EXPANSION) - &worst * (REFLECTION * EXPANSION);
                let fe = objective(&xe);
                vertices[n] = if fe < fr { (xe, fe) } else { (xr, fr) };
            } else if fr < second_worst_value {
                vertices[n] = (xr, fr);
            } else if fr < worst_value {
                let xc = &centroid * (1.0 + CONTRACTION * REFLECTION) - &worst * (CONTRACTION * REFLECTION);
                let fc = objective(&xc);
                if fc <= fr {
                    vertices[n] = (xc, fc);
                } else {
                    shrink = true;
                }
            } else {
                let xcc = &centroid * (1.0 - CONTRACTION) + &worst * CONTRACTION;
                let fcc = objective(&xcc);
                if fcc < worst_value {
                    vertices[n] = (xcc, fcc);
                } else {
                    shrink = true;
                }
            }

            if shrink {
                let best = vertices[0].0.clone();
                for vertex in vertices.iter_mut().skip(1) {
                    let x = &best + (&vertex.0 - &best) * SHRINK;
                    let v = objective(&x);
                    *vertex = (x, v);
                }
            }

            iterations += 1;
            sort_vertices(&mut vertices);
        }

        if !converged {
            converged = self.has_converged(&vertices);
        }

        let (x, value) = vertices.swap_remove(0);
        Minimum { x, value, iterations, evaluations: evaluations.get(), converged }
    }

    fn has_converged(&self, vertices: &[(DVector<Float>, Float)]) -> bool {
        let (best, best_value) = (&vertices[0].0, vertices[0].1);
        let x_spread = vertices[1..]
            .iter()
            .map(|(x, _)| (x - best).amax())
            .fold(0.0, Float::max);
        let f_spread = vertices[1..]
            .iter()
            .map(|(_, v)| (v - best_value).abs())
            .fold(0.0, Float::max);
        x_spread <= self.tolerance && f_spread <= self.tolerance
    }
}

fn sort_vertices(vertices: &mut [(DVector<Float>, Float)]) {
    vertices.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
}
