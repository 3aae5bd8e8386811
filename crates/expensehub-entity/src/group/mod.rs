//! Group entity.

pub mod model;

pub use model::*;
