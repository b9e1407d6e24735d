//! Provider selection: one [`ChatModel`] built once at startup from
//! [`ModelSettings`].

mod ollama;
mod openai;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

pub use ollama::{OLLAMA_BASE_URL, Ollama, OllamaOptions};
pub use openai::{GROQ_BASE_URL, OPENAI_BASE_URL, OpenAiCompatible};

use crate::error::LlmError;
use crate::model::ChatModel;

pub const DEFAULT_TEMPERATURE: f64 = 0.1;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Which backend to talk to, with its connection details.
#[derive(Clone, PartialEq)]
pub enum ProviderSettings {
    Ollama {
        base_url: String,
        model: String,
        options: OllamaOptions,
    },
    Groq {
        api_key: String,
        model: String,
    },
    OpenAi {
        api_key: String,
        model: String,
        base_url: String,
    },
}

impl ProviderSettings {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ollama { .. } => "Ollama",
            Self::Groq { .. } => "Groq",
            Self::OpenAi { .. } => "OpenAI",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Self::Ollama { model, .. } | Self::Groq { model, .. } | Self::OpenAi { model, .. } => {
                model
            }
        }
    }
}

// API keys stay out of logs and test failure output.
impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ollama {
                base_url,
                model,
                options,
            } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .field("model", model)
                .field("options", options)
                .finish(),
            Self::Groq { model, .. } => f
                .debug_struct("Groq")
                .field("api_key", &"<redacted>")
                .field("model", model)
                .finish(),
            Self::OpenAi {
                model, base_url, ..
            } => f
                .debug_struct("OpenAi")
                .field("api_key", &"<redacted>")
                .field("model", model)
                .field("base_url", base_url)
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// `None` runs the service without a model; every model-backed field
    /// degrades to its default.
    pub provider: Option<ProviderSettings>,
    pub temperature: f64,
    pub request_timeout: Duration,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: None,
            temperature: DEFAULT_TEMPERATURE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Build the configured model, or `None` if no provider is configured.
pub fn build_model(settings: &ModelSettings) -> Result<Option<Arc<dyn ChatModel>>, LlmError> {
    let Some(provider) = &settings.provider else {
        return Ok(None);
    };

    let model: Arc<dyn ChatModel> = match provider {
        ProviderSettings::Ollama {
            base_url,
            model,
            options,
        } => Arc::new(Ollama::new(
            base_url,
            model.as_str(),
            settings.temperature,
            *options,
            settings.request_timeout,
        )?),
        ProviderSettings::Groq { api_key, model } => Arc::new(OpenAiCompatible::new(
            "Groq",
            GROQ_BASE_URL,
            api_key.as_str(),
            model.as_str(),
            settings.temperature,
            settings.request_timeout,
        )?),
        ProviderSettings::OpenAi {
            api_key,
            model,
            base_url,
        } => Arc::new(OpenAiCompatible::new(
            "OpenAI",
            base_url,
            api_key.as_str(),
            model.as_str(),
            settings.temperature,
            settings.request_timeout,
        )?),
    };

    info!(
        provider = model.provider(),
        model = model.model(),
        temperature = settings.temperature,
        "language model initialized"
    );

    Ok(Some(model))
}
