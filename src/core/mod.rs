//! Pure math used throughout the crate: scalar Gaussian functions and softmax.
//!
//! Everything here is "pure data in, pure data out" - no I/O, no model state.

pub mod math;

pub use math::{
    erf, normal_cdf, normal_pdf, softmax, std_normal_cdf, std_normal_log_pdf, std_normal_pdf,
    LN_SQRT_2PI,
};
