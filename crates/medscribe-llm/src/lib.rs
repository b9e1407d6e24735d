//! medscribe-llm
//!
//! Language model access behind one "send a prompt, get text back" contract,
//! plus the prompt-driven classifiers and document generators built on it.

pub mod classify;
pub mod error;
pub mod generate;
pub mod model;
pub mod prompts;
pub mod provider;

pub use error::LlmError;
pub use model::ChatModel;
pub use provider::{ModelSettings, OllamaOptions, ProviderSettings, build_model};
