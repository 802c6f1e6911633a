//! The 1D mixture-CDF flow model (forward pass).
//!
//! A convex combination of K Gaussian CDFs is a smooth, strictly increasing
//! map ℝ → (0,1); its derivative is the matching combination of Gaussian
//! densities. Pushing a standard normal back through this map gives an exact
//! density over x via the change-of-variables formula.

use crate::core::{normal_cdf, normal_pdf, softmax};
use rand::Rng;
use rand_distr::StandardNormal;

/// Flow parameters: per-component location, scale, and raw (pre-softmax)
/// weight. Plain data - the forward pass is a pure function of this record,
/// and the backward pass lives in `diff::flow_grad`.
#[derive(Debug, Clone)]
pub struct Flow1d {
    pub mu: Vec<f64>,
    pub sigma: Vec<f64>,
    pub weight: Vec<f64>,
}

impl Flow1d {
    /// Random initialization: μ ~ N(0,1), σ = 1, raw weights = 1.
    pub fn new<R: Rng>(n_components: usize, rng: &mut R) -> Self {
        let mu = (0..n_components)
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect();
        Self {
            mu,
            sigma: vec![1.0; n_components],
            weight: vec![1.0; n_components],
        }
    }

    pub fn n_components(&self) -> usize {
        self.mu.len()
    }

    /// Effective mixture weights: softmax of the raw weight vector.
    pub fn mixture_weights(&self) -> Vec<f64> {
        softmax(&self.weight)
    }

    /// Forward transform over a batch: returns `(z, dz_by_dx)` with
    /// z_i = Σ_k p_k Φ((x_i - μ_k)/σ_k) and dz/dx_i = Σ_k p_k φ_k(x_i).
    ///
    /// For all σ_k > 0 this guarantees 0 < z_i < 1 and dz/dx_i > 0. Scales
    /// are deliberately not validated: a degenerate σ_k propagates as a
    /// non-finite value and surfaces as a non-finite loss downstream.
    pub fn forward(&self, xs: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let weights = self.mixture_weights();
        let mut z = Vec::with_capacity(xs.len());
        let mut dz_by_dx = Vec::with_capacity(xs.len());

        for &x in xs {
            let mut zi = 0.0;
            let mut di = 0.0;
            for k in 0..self.n_components() {
                zi += weights[k] * normal_cdf(x, self.mu[k], self.sigma[k]);
                di += weights[k] * normal_pdf(x, self.mu[k], self.sigma[k]);
            }
            z.push(zi);
            dz_by_dx.push(di);
        }

        (z, dz_by_dx)
    }
}
