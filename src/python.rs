// Copyright @yucwang 2026

use pyo3::exceptions::{PyNotImplementedError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::brdf::{eval_spherical, BRDF, BRDFError};
use crate::core::rng::LcgRng;
use crate::materials::ltc::LtcBrdf;
use crate::materials::single_scatter_sggx::SingleScatterSggxBrdf;
use crate::math::constants::Matrix3f;
use crate::math::spherical::{spherical_direction, spherical_phi, spherical_theta};

fn to_py_err(err: BRDFError) -> PyErr {
    match err {
        BRDFError::Unimplemented { .. } => PyNotImplementedError::new_err(err.to_string()),
        BRDFError::SingularTransform => PyRuntimeError::new_err(err.to_string()),
    }
}

fn eval_grid(brdf: &dyn BRDF,
             theta_i: f64,
             phi_i: f64,
             theta_o: &[f64],
             phi_o: &[f64]) -> PyResult<Vec<f64>> {
    if theta_o.len() != phi_o.len() {
        return Err(PyValueError::new_err("theta_o and phi_o must have the same length"));
    }
    Ok(theta_o
        .iter()
        .zip(phi_o.iter())
        .map(|(&t, &p)| eval_spherical(brdf, theta_i, phi_i, t, p))
        .collect())
}

/// Returns `(pdf, (theta_o, phi_o))`.
fn sample_spherical(brdf: &dyn BRDF, theta_i: f64, phi_i: f64, seed: u64) -> PyResult<(f64, (f64, f64))> {
    let wi = spherical_direction(theta_i, phi_i);
    let mut rng = LcgRng::new(seed);
    let sample = brdf.sample(&wi, &mut rng).map_err(to_py_err)?;
    Ok((sample.pdf, (spherical_theta(&sample.wo), spherical_phi(&sample.wo))))
}

#[pyclass(name = "SingleScatterSggxBrdf")]
struct PySingleScatterSggxBrdf {
    inner: SingleScatterSggxBrdf,
}

#[pymethods]
impl PySingleScatterSggxBrdf {
    #[new]
    fn new(alpha: f64) -> Self {
        Self { inner: SingleScatterSggxBrdf::new(alpha) }
    }

    #[getter]
    fn alpha(&self) -> f64 {
        self.inner.alpha()
    }

    fn eval(&self, theta_i: f64, phi_i: f64, theta_o: f64, phi_o: f64) -> f64 {
        eval_spherical(&self.inner, theta_i, phi_i, theta_o, phi_o)
    }

    fn eval_vectorized(&self, theta_i: f64, phi_i: f64, theta_o: Vec<f64>, phi_o: Vec<f64>) -> PyResult<Vec<f64>> {
        eval_grid(&self.inner, theta_i, phi_i, &theta_o, &phi_o)
    }

    #[args(seed = "0")]
    fn sample(&self, theta_i: f64, phi_i: f64, seed: u64) -> PyResult<(f64, (f64, f64))> {
        sample_spherical(&self.inner, theta_i, phi_i, seed)
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

#[pyclass(name = "LtcBrdf")]
struct PyLtcBrdf {
    inner: LtcBrdf,
}

#[pymethods]
impl PyLtcBrdf {
    /// `m_inv` is given row by row.
    #[new]
    fn new(magnitude: f64, m_inv: [[f64; 3]; 3]) -> Self {
        let m = Matrix3f::new(m_inv[0][0], m_inv[0][1], m_inv[0][2],
                              m_inv[1][0], m_inv[1][1], m_inv[1][2],
                              m_inv[2][0], m_inv[2][1], m_inv[2][2]);
        Self { inner: LtcBrdf::new(magnitude, m) }
    }

    #[staticmethod]
    fn from_coefficients(a: f64, b: f64, magnitude: f64) -> Self {
        Self { inner: LtcBrdf::from_coefficients(a, b, magnitude) }
    }

    fn eval(&self, theta_i: f64, phi_i: f64, theta_o: f64, phi_o: f64) -> f64 {
        eval_spherical(&self.inner, theta_i, phi_i, theta_o, phi_o)
    }

    fn eval_vectorized(&self, theta_i: f64, phi_i: f64, theta_o: Vec<f64>, phi_o: Vec<f64>) -> PyResult<Vec<f64>> {
        eval_grid(&self.inner, theta_i, phi_i, &theta_o, &phi_o)
    }

    #[args(seed = "0")]
    fn sample(&self, theta_i: f64, phi_i: f64, seed: u64) -> PyResult<(f64, (f64, f64))> {
        sample_spherical(&self.inner, theta_i, phi_i, seed)
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

#[pymodule]
fn sggx_slab(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PySingleScatterSggxBrdf>()?;
    m.add_class::<PyLtcBrdf>()?;
    Ok(())
}
