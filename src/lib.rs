//! # flow1d-rs: 1D normalizing flow via a mixture of Gaussian CDFs
//!
//! Fits a smooth, strictly increasing transform
//! `z = Σ_k p_k · Φ((x - μ_k)/σ_k)` to samples from a synthetic
//! five-component Gaussian mixture, so that z is distributed as a standard
//! normal. Training minimizes the change-of-variables negative
//! log-likelihood with Adam; all gradients are derived in closed form and
//! verified against finite differences.
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - `core`: scalar Gaussian math (erf, pdf/cdf) and softmax
//! - `data`: synthetic mixture sampling and shuffled batching
//! - `flow`: the flow model (forward transform and its derivative)
//! - `diff`: backward passes (closed-form parameter gradients)
//! - `optim`: Adam, the NLL loss, and the training loop
//! - `report`: CSV artifacts (loss history, learned transform/density)

// Pure math
pub mod core;

// Data generation and batching
pub mod data;

// Flow model (forward)
pub mod flow;

// Backward passes
pub mod diff;

// Optimization (training loop, loss, Adam)
pub mod optim;

// Run artifacts (CSV for external plotting)
pub mod report;

// Re-export commonly used types at crate root for convenience
pub use flow::Flow1d;
pub use optim::trainer::{run_experiment, TrainConfig, TrainOutputs};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
