// Copyright @yucwang 2026

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::DVector;

use crate::core::brdf::BRDF;
use crate::fitting::nelder_mead::{Minimum, NelderMead};
use crate::materials::ltc::LtcBrdf;
use crate::materials::single_scatter_sggx::SingleScatterSggxBrdf;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector3f, HALF_PI, PI};
use crate::math::spherical::spherical_direction;

#[derive(Debug, Clone, PartialEq)]
pub struct FitSettings {
    /// Table rows, over the incident cosine.
    pub mu_res: usize,
    /// Table columns, over roughness.
    pub alpha_res: usize,
    pub theta_o_res: usize,
    pub phi_o_res: usize,
    /// Lower clamp for both table axes.
    pub min_value: Float,
    pub tolerance: Float,
    pub max_iters: usize,
    /// Offset of the initial simplex vertices from the starting guess.
    pub delta: Float,
    /// Worker threads, 0 for all available cores.
    pub threads: usize,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            mu_res: 32,
            alpha_res: 32,
            theta_o_res: 32,
            phi_o_res: 32,
            min_value: 0.01,
            tolerance: 1e-5,
            max_iters: 10000,
            delta: 0.05,
            threads: 0,
        }
    }
}

/// Sample positions of the table and of the outgoing directions each cell
/// is compared on. Azimuths only cover [0, π] as both models are isotropic.
#[derive(Debug, Clone)]
pub struct FitGrid {
    pub mus: Vec<Float>,
    pub alphas: Vec<Float>,
    pub outgoing: Vec<Vector3f>,
}

impl FitGrid {
    pub fn new(settings: &FitSettings) -> Self {
        let mus = clamped_linspace(settings.mu_res, settings.min_value);
        let alphas = clamped_linspace(settings.alpha_res, settings.min_value);

        let mut outgoing = Vec::with_capacity(settings.theta_o_res * settings.phi_o_res);
        for t in 0..settings.theta_o_res {
            let theta_o = (t as Float + 0.5) / settings.theta_o_res as Float * HALF_PI;
            for p in 0..settings.phi_o_res {
                let phi_o = (p as Float + 0.5) / settings.phi_o_res as Float * PI;
                outgoing.push(spherical_direction(theta_o, phi_o));
            }
        }

        Self { mus, alphas, outgoing }
    }

    /// Incident direction of table row `mu_idx`, in the xz-plane.
    pub fn incident(&self, mu_idx: usize) -> Vector3f {
        spherical_direction(self.mus[mu_idx].acos(), 0.0)
    }
}

fn clamped_linspace(res: usize, min_value: Float) -> Vec<Float> {
    match res {
        0 => Vec::new(),
        1 => vec![min_value.max(0.0)],
        _ => (0..res)
            .map(|i| (i as Float / (res - 1) as Float).max(min_value))
            .collect(),
    }
}

pub fn reference_values(brdf: &dyn BRDF, wi: &Vector3f, outgoing: &[Vector3f]) -> Vec<Float> {
    outgoing.iter().map(|wo| brdf.eval(wi, wo, None)).collect()
}

/// Squared L2 distance between the LTC with coefficients `x = (a, b, R)`
/// and the reference values.
pub fn ltc_loss(x: &DVector<Float>, wi: &Vector3f, outgoing: &[Vector3f], reference: &[Float]) -> Float {
    let ltc = LtcBrdf::from_coefficients(x[0], x[1], x[2]);
    outgoing
        .iter()
        .zip(reference.iter())
        .map(|(wo, r)| {
            let diff = ltc.eval(wi, wo, None) - r;
            diff * diff
        })
        .sum()
}

pub struct LtcFitter {
    settings: FitSettings,
    grid: FitGrid,
}

impl LtcFitter {
    pub fn new(settings: FitSettings) -> Self {
        let grid = FitGrid::new(&settings);
        Self { settings, grid }
    }

    pub fn grid(&self) -> &FitGrid {
        &self.grid
    }

    pub fn fit_cell(&self, mu_idx: usize, alpha_idx: usize, guess: &Vector3f) -> Minimum {
        let wi = self.grid.incident(mu_idx);
        let brdf = SingleScatterSggxBrdf::new(self.grid.alphas[alpha_idx]);
        let reference = reference_values(&brdf, &wi, &self.grid.outgoing);

        let solver = NelderMead::new(self.settings.tolerance, self.settings.max_iters);
        let x0 = DVector::from_column_slice(guess.as_slice());
        let simplex = NelderMead::axis_simplex(&x0, self.settings.delta);
        let outgoing = &self.grid.outgoing;
        solver.minimize(|x| ltc_loss(x, &wi, outgoing, &reference), simplex)
    }

    /// Fit one table row, from the roughest column down to the smoothest,
    /// each cell starting from its neighbour's solution.
    pub fn fit_row(&self, mu_idx: usize) -> Vec<Vector3f> {
        let mut row = vec![Vector3f::zeros(); self.grid.alphas.len()];
        let mut guess = Vector3f::new(1.0, 0.0, 1.0);
        for alpha_idx in (0..self.grid.alphas.len()).rev() {
            let min = self.fit_cell(mu_idx, alpha_idx, &guess);
            if !min.converged {
                log::warn!("LTC fit at mu = {}, alpha = {} stopped after {} iterations (loss = {}).",
                           self.grid.mus[mu_idx], self.grid.alphas[alpha_idx], min.iterations, min.value);
            }
            log::debug!("mu = {}, alpha = {}: {:?}, loss = {}",
                        self.grid.mus[mu_idx], self.grid.alphas[alpha_idx], min.x.as_slice(), min.value);

            let x = Vector3f::new(min.x[0], min.x[1], min.x[2]);
            row[alpha_idx] = x;
            guess = x;
        }
        row
    }

    /// Fit the full table. Rows are independent and are distributed over
    /// worker threads; the result does not depend on the thread count.
    pub fn fit(&self) -> Bitmap {
        let width = self.grid.alphas.len();
        let height = self.grid.mus.len();
        let mut table = Bitmap::new(width, height);
        if width == 0 || height == 0 {
            return table;
        }

        log::info!("Fitting {}x{} LTC table on {} outgoing directions.",
                   height, width, self.grid.outgoing.len());

        let progress = ProgressBar::new(height as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let thread_count = match self.settings.threads {
            0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            n => n,
        }
        .min(height);

        let next_row = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel::<(usize, Vec<Vector3f>)>();

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_row = Arc::clone(&next_row);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let mu_idx = next_row.fetch_add(1, Ordering::Relaxed);
                        if mu_idx >= height {
                            break;
                        }
                        let row = self.fit_row(mu_idx);
                        if tx.send((mu_idx, row)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(tx);

            for (mu_idx, row) in rx.iter() {
                table.set_row(mu_idx, &row);
                progress.inc(1);
            }
        });

        progress.finish();
        log::info!("LTC table fitted.");
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_settings() -> FitSettings {
        FitSettings {
            mu_res: 3,
            alpha_res: 3,
            theta_o_res: 6,
            phi_o_res: 6,
            max_iters: 2000,
            ..FitSettings::default()
        }
    }

    #[test]
    fn test_grid_layout() {
        let grid = FitGrid::new(&tiny_settings());
        assert_eq!(grid.mus, vec![0.01, 0.5, 1.0]);
        assert_eq!(grid.alphas, vec![0.01, 0.5, 1.0]);
        assert_eq!(grid.outgoing.len(), 36);
        assert!(grid.outgoing.iter().all(|w| w.z > 0.0 && w.y >= 0.0));
        assert!((grid.incident(0).z - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_loss_vanishes_on_own_lobe() {
        let grid = FitGrid::new(&tiny_settings());
        let wi = grid.incident(1);
        let target = LtcBrdf::from_coefficients(0.7, -0.1, 0.4);
        let reference = reference_values(&target, &wi, &grid.outgoing);
        let x = DVector::from_vec(vec![0.7, -0.1, 0.4]);
        assert!(ltc_loss(&x, &wi, &grid.outgoing, &reference) < 1e-20);
        let y = DVector::from_vec(vec![0.9, -0.1, 0.4]);
        assert!(ltc_loss(&y, &wi, &grid.outgoing, &reference) > 0.0);
    }

    #[test]
    fn test_fit_cell_improves_on_guess() {
        let fitter = LtcFitter::new(tiny_settings());
        let guess = Vector3f::new(1.0, 0.0, 1.0);
        let wi = fitter.grid().incident(2);
        let brdf = SingleScatterSggxBrdf::new(fitter.grid().alphas[1]);
        let reference = reference_values(&brdf, &wi, &fitter.grid().outgoing);
        let initial = ltc_loss(&DVector::from_column_slice(guess.as_slice()), &wi,
                               &fitter.grid().outgoing, &reference);

        let min = fitter.fit_cell(2, 1, &guess);
        assert!(min.value.is_finite());
        assert!(min.value <= initial);
    }

    #[test]
    fn test_fit_is_finite_and_thread_independent() {
        let single = LtcFitter::new(FitSettings { threads: 1, ..tiny_settings() }).fit();
        let multi = LtcFitter::new(FitSettings { threads: 3, ..tiny_settings() }).fit();
        assert_eq!(single.width(), 3);
        assert_eq!(single.height(), 3);
        assert!(single.is_finite());
        assert_eq!(single, multi);
    }
}
