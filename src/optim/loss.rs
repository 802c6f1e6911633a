//! Change-of-variables negative log-likelihood.
//!
//! Per-sample log-likelihood under the flow is
//! `log φ_std(z) + log(dz/dx)`; the loss is its negative mean over the
//! batch. The theoretical minimum is the differential entropy of the
//! standard normal target, not zero.

use crate::core::std_normal_log_pdf;

/// Negative mean log-likelihood of a batch given the forward outputs.
///
/// No NaN/Inf guard: `dz_by_dx <= 0` (or an underflow to 0) yields a
/// non-finite loss that propagates to the caller.
pub fn nll_loss(z: &[f64], dz_by_dx: &[f64]) -> f64 {
    assert_eq!(z.len(), dz_by_dx.len());
    let n = z.len() as f64;
    let mut total = 0.0;
    for i in 0..z.len() {
        total += std_normal_log_pdf(z[i]) + dz_by_dx[i].ln();
    }
    -total / n
}

/// Loss plus its gradients with respect to the forward outputs:
/// `∂L/∂z_i = z_i / n` and `∂L/∂(dz/dx_i) = -1 / (n * dz/dx_i)`.
pub fn nll_loss_and_grad(z: &[f64], dz_by_dx: &[f64]) -> (f64, Vec<f64>, Vec<f64>) {
    assert_eq!(z.len(), dz_by_dx.len());
    let n = z.len() as f64;
    let mut total = 0.0;
    let mut d_z = Vec::with_capacity(z.len());
    let mut d_dzdx = Vec::with_capacity(z.len());

    for i in 0..z.len() {
        total += std_normal_log_pdf(z[i]) + dz_by_dx[i].ln();
        d_z.push(z[i] / n);
        d_dzdx.push(-1.0 / (n * dz_by_dx[i]));
    }

    (-total / n, d_z, d_dzdx)
}
