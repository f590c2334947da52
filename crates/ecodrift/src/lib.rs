//! # ecodrift
//!
//! Unified API for neutral-ecology drift simulations and macroecological
//! pattern analysis.
//!
//! This crate re-exports the main functionality from its submodules.

pub mod input_parsers;
pub mod drift_parsers;

pub mod community {
    pub use ::ed_community::*;
}

pub mod stats {
    pub use ::ed_stats::*;
}

pub mod drift {
    pub use ::ed_drift::*;
}
