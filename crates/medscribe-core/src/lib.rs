//! medscribe-core
//!
//! Pure domain types for transcript analysis and lenient recovery of JSON
//! from model output. No network or runtime dependency.

pub mod error;
pub mod json_extract;
pub mod models;
