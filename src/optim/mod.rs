//! Optimization components (optimizer, loss, training orchestration).
//!
//! This module contains everything needed for training:
//! - Adam optimizer
//! - Change-of-variables NLL loss
//! - Training loop and per-epoch evaluation

pub mod adam;
pub mod loss;
pub mod trainer;
