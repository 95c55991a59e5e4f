//! Constellation Geometry Fuzz Harness
//!
//! Property-based testing infrastructure for the geometry crate: strategies for
//! geodetic positions, ECEF vectors, rotations and constellation shapes, plus a
//! small runner for deterministic sweeps.
//!
//! # Usage
//!
//! ```rust
//! use fuzz_harness::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn latitude_in_range(lat in latitude_deg()) {
//!         prop_assert!((-90.0..=90.0).contains(&lat));
//!     }
//! }
//! ```

pub mod generators;
pub mod runner;

pub mod prelude {
    pub use crate::generators::*;
    pub use crate::runner::{FuzzConfig, FuzzResult, FuzzRunner};
    pub use proptest::prelude::*;
}

// Re-export proptest for convenience
pub use proptest;
