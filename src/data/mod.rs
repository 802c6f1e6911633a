//! Synthetic data generation and batching.

mod generator;
mod loader;

pub use generator::{generate_mixture_of_gaussians, MIXTURE_COMPONENTS};
pub use loader::{BatchLoader, DataError, Epoch};
