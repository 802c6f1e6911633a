//! The flow model: parameter record and forward transform.

mod model;

pub use model::Flow1d;
