//! # Mimic-Compare
//!
//! Pose and movement comparison engine: scores a live attempt against a
//! recorded reference and explains the result.
//!
//! ## Pipeline
//!
//! 1. **Normalizer** - clamp raw detector landmarks into canonical ranges
//! 2. **Similarity** - weighted 3D landmark distance mapped to [0, 1]
//! 3. **Alignment** - zero-order-hold resampling of movement sequences
//! 4. **Temporal** - bell-curve weighting of per-frame scores
//! 5. **Verdict** - fixed per-difficulty thresholds
//! 6. **Feedback** - body-region and movement-phase coaching
//!
//! Every operation is synchronous, allocation-light and free of shared
//! state, so it can run inside a per-frame capture callback.

pub mod alignment;
pub mod comparator;
pub mod config;
pub mod detector;
pub mod feedback;
pub mod normalizer;
pub mod quality;
pub mod similarity;
pub mod temporal;
pub mod verdict;

pub use alignment::*;
pub use comparator::*;
pub use config::*;
pub use detector::*;
pub use feedback::*;
pub use normalizer::*;
pub use quality::*;
pub use similarity::*;
pub use temporal::*;
pub use verdict::*;
