//! medscribe-pipeline
//!
//! Runs one transcript analysis: keywords inline, then sentiment, intent,
//! summary and SOAP note as independent deadline-bound tasks whose failures
//! are folded into the response instead of propagated.

pub mod config;
pub mod orchestrator;
pub mod outcome;

pub use config::PipelineConfig;
pub use orchestrator::Orchestrator;
pub use outcome::{AnalysisTask, Fallback, TaskOutcome};
