//! # Utilities Module
//!
//! Injectable randomness and the stat arithmetic shared by the generators.

pub mod math;
pub mod rng;

pub use math::*;
pub use rng::*;
