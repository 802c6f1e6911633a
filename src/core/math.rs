//! Scalar Gaussian math and the softmax used for mixture weights.

/// Natural log of `sqrt(2π)`.
///
/// `ln(sqrt(2π)) = 0.5*ln(2π)` (precomputed so the log-pdf stays const-friendly).
pub const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// Error function approximation (Abramowitz & Stegun 7.1.26).
///
/// Maximum absolute error about 1.5e-7. The gradient-check tests size their
/// tolerances to this approximation.
pub fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

/// Standard normal CDF: Φ(x) = 0.5 * (1 + erf(x / √2))
///
/// Maps ℝ → (0, 1), monotonically increasing.
pub fn std_normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Standard normal density: φ(x) = exp(-x²/2) / √(2π)
pub fn std_normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Standard normal log-density: log φ(x) = -x²/2 - ln(√(2π))
pub fn std_normal_log_pdf(x: f64) -> f64 {
    -0.5 * x * x - LN_SQRT_2PI
}

/// CDF of `N(mu, sigma)` at `x`.
///
/// No validation of `sigma`: a zero or negative scale propagates as a
/// non-finite or out-of-range value, which the caller treats as fatal.
pub fn normal_cdf(x: f64, mu: f64, sigma: f64) -> f64 {
    std_normal_cdf((x - mu) / sigma)
}

/// Density of `N(mu, sigma)` at `x`: φ((x-mu)/σ) / σ.
pub fn normal_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    std_normal_pdf((x - mu) / sigma) / sigma
}

/// Numerically stable softmax: subtracts the max before exponentiating.
///
/// Output sums to 1 and every entry is strictly positive for finite input,
/// regardless of the raw values' range.
pub fn softmax(raw: &[f64]) -> Vec<f64> {
    let max = raw.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = raw.iter().map(|&w| (w - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_erf_known_values() {
        assert_relative_eq!(erf(0.0), 0.0, epsilon = 1e-7);
        assert_relative_eq!(erf(1.0), 0.842_700_792_9, epsilon = 1e-6);
        assert_relative_eq!(erf(-1.0), -0.842_700_792_9, epsilon = 1e-6);
        assert_relative_eq!(erf(3.0), 0.999_977_909_5, epsilon = 1e-6);
    }

    #[test]
    fn test_std_normal_cdf_symmetry() {
        assert_relative_eq!(std_normal_cdf(0.0), 0.5, epsilon = 1e-7);
        let a = std_normal_cdf(1.3);
        let b = std_normal_cdf(-1.3);
        assert_relative_eq!(a + b, 1.0, epsilon = 1e-7);
    }

    #[test]
    fn test_std_normal_pdf_at_zero() {
        // φ(0) = 1/√(2π)
        assert_relative_eq!(std_normal_pdf(0.0), 0.398_942_280_4, epsilon = 1e-9);
        assert_relative_eq!(std_normal_log_pdf(0.0), -LN_SQRT_2PI, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_pdf_scales_with_sigma() {
        // N(2, 0.5) at its mean: φ(0)/0.5
        assert_relative_eq!(normal_pdf(2.0, 2.0, 0.5), 0.398_942_280_4 / 0.5, epsilon = 1e-8);
        assert_relative_eq!(normal_cdf(2.0, 2.0, 0.5), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        for raw in [
            vec![1.0, 1.0, 1.0],
            vec![-5.0, -5.0, -5.0],
            vec![100.0, 0.0, -100.0],
        ] {
            let p = softmax(&raw);
            let sum: f64 = p.iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
            for &pk in &p {
                assert!(pk > 0.0, "softmax output must be strictly positive");
            }
        }
    }
}
