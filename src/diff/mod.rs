//! Differentiable operations (backward passes).
//!
//! Gradients are derived in closed form rather than taped; every formula is
//! checked against finite differences in `tests/gradient_check.rs`.

pub mod flow_grad;

pub use flow_grad::{flow_backward, FlowGrads};
