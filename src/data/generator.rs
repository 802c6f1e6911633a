//! Synthetic five-component Gaussian mixture sampler.
//!
//! The training and test sets are drawn from this fixed mixture; the flow is
//! then asked to learn it back from the samples alone.

use rand::Rng;
use rand_distr::StandardNormal;

/// The fixed `(mean, standard deviation)` table of the synthetic mixture.
pub const MIXTURE_COMPONENTS: [(f64, f64); 5] = [
    (-1.0, 0.25),
    (0.5, 0.25),
    (0.25, 0.35),
    (-0.5, 0.05),
    (0.0, 0.15),
];

/// Draw `num_points / 5` samples from each mixture component, concatenated in
/// component order (shuffling is the batch loader's job).
///
/// Integer division truncates: the result has exactly `5 * (num_points / 5)`
/// elements, which is shorter than `num_points` when it is not a multiple of 5.
pub fn generate_mixture_of_gaussians<R: Rng>(num_points: usize, rng: &mut R) -> Vec<f64> {
    let per_component = num_points / MIXTURE_COMPONENTS.len();
    let mut samples = Vec::with_capacity(per_component * MIXTURE_COMPONENTS.len());
    for (mean, std_dev) in MIXTURE_COMPONENTS {
        for _ in 0..per_component {
            let u: f64 = rng.sample(StandardNormal);
            samples.push(mean + std_dev * u);
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_length_truncates_to_multiple_of_five() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_mixture_of_gaussians(1000, &mut rng).len(), 1000);
        assert_eq!(generate_mixture_of_gaussians(1003, &mut rng).len(), 1000);
        assert_eq!(generate_mixture_of_gaussians(4, &mut rng).len(), 0);
    }
}
