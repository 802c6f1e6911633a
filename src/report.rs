//! Run artifacts for the plotting surface.
//!
//! The core produces loss histories and a trained flow; this module writes
//! them out as CSV so any external tool can plot the loss curves, the
//! learned transform x → z, and the learned density. Data flows out only -
//! nothing here feeds back into training.

use crate::core::std_normal_log_pdf;
use crate::flow::Flow1d;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// `n` evenly spaced points from `lo` to `hi` inclusive.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

/// Write `epoch,train_loss,test_loss` rows, one per completed epoch.
pub fn write_loss_history(path: &Path, train: &[f64], test: &[f64]) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "epoch,train_loss,test_loss")?;
    for (epoch, (tr, te)) in train.iter().zip(test).enumerate() {
        writeln!(file, "{},{},{}", epoch, tr, te)?;
    }
    Ok(())
}

/// Sample the learned transform on a linspace and write
/// `x,z,dz_dx,density` rows, where density is the model's probability
/// density over x: exp(log φ_std(z) + ln dz/dx).
pub fn write_transform_curve(
    path: &Path,
    flow: &Flow1d,
    lo: f64,
    hi: f64,
    n: usize,
) -> std::io::Result<()> {
    let xs = linspace(lo, hi, n);
    let (z, dz_by_dx) = flow.forward(&xs);

    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "x,z,dz_dx,density")?;
    for i in 0..xs.len() {
        let density = (std_normal_log_pdf(z[i]) + dz_by_dx[i].ln()).exp();
        writeln!(file, "{},{},{},{}", xs[i], z[i], dz_by_dx[i], density)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints_and_count() {
        let xs = linspace(-3.0, 3.0, 1000);
        assert_eq!(xs.len(), 1000);
        assert_relative_eq!(xs[0], -3.0, epsilon = 1e-12);
        assert_relative_eq!(xs[999], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_linspace_degenerate_count() {
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
        assert_eq!(linspace(0.0, 1.0, 0), vec![0.0]);
    }
}
