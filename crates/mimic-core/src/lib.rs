//! # Mimic-Core
//!
//! Core value types for the Mimic pose and movement comparison engine:
//! landmarks, landmark sets, timestamped movement sequences, difficulty
//! presets, comparison results and stored activities.

pub mod activity;
pub mod error;
pub mod topology;
pub mod types;

pub use activity::*;
pub use error::{Error, Result};
pub use topology::*;
pub use types::*;
