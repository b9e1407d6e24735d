//! Process configuration, read once from the environment at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use medscribe_llm::provider::{
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_TEMPERATURE, OLLAMA_BASE_URL, OPENAI_BASE_URL,
};
use medscribe_llm::{ModelSettings, OllamaOptions, ProviderSettings};
use medscribe_pipeline::PipelineConfig;
use thiserror::Error;
use tracing::warn;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8000);
const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Which annotator backs keyword extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotatorKind {
    Rule,
    /// No annotation; keywords are always empty.
    Disabled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub model: ModelSettings,
    pub pipeline: PipelineConfig,
    pub annotator: AnnotatorKind,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let pipeline = PipelineConfig {
            sentiment_timeout: env.seconds("SENTIMENT_TIMEOUT_SECS", 30)?,
            intent_timeout: env.seconds("INTENT_TIMEOUT_SECS", 30)?,
            summary_timeout: env.seconds("SUMMARY_TIMEOUT_SECS", 120)?,
            soap_timeout: env.seconds("SOAP_TIMEOUT_SECS", 120)?,
            max_keywords: env.parse("MAX_KEYWORDS", PipelineConfig::default().max_keywords)?,
        };

        let temperature: f64 = env.parse("LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(invalid(
                "LLM_TEMPERATURE",
                temperature.to_string(),
                "must be a non-negative number",
            ));
        }

        let model = ModelSettings {
            provider: env.provider(),
            temperature,
            request_timeout: env
                .seconds("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT.as_secs())?,
        };

        let annotator = match env.get("KEYWORD_ANNOTATOR") {
            None => AnnotatorKind::Rule,
            Some(value) if value.eq_ignore_ascii_case("rule") => AnnotatorKind::Rule,
            Some(value) if value.eq_ignore_ascii_case("disabled") => AnnotatorKind::Disabled,
            Some(value) => {
                return Err(invalid(
                    "KEYWORD_ANNOTATOR",
                    value,
                    "expected \"rule\" or \"disabled\"",
                ));
            }
        };

        Ok(Self {
            bind_addr: env.parse("BIND_ADDR", DEFAULT_BIND_ADDR)?,
            model,
            pipeline,
            annotator,
        })
    }
}

fn invalid(name: &'static str, value: impl Into<String>, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.into(),
        reason: reason.to_string(),
    }
}

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// A trimmed, non-empty value.
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    fn parse<T>(&self, name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: ToString,
    {
        match self.get(name) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|e| invalid(name, value, e)),
        }
    }

    fn seconds(&self, name: &'static str, default: u64) -> Result<Duration, ConfigError> {
        let secs: u64 = self.parse(name, default)?;
        if secs == 0 {
            return Err(invalid(name, "0", "must be at least one second"));
        }
        Ok(Duration::from_secs(secs))
    }

    /// Ollama, then Groq, then OpenAI. A selected hosted provider without an
    /// API key yields no model rather than an error.
    fn provider(&self) -> Option<ProviderSettings> {
        if self.flag("USE_OLLAMA") {
            return Some(ProviderSettings::Ollama {
                base_url: self.get_or("OLLAMA_BASE_URL", OLLAMA_BASE_URL),
                model: self.get_or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
                options: OllamaOptions::default(),
            });
        }

        if self.flag("USE_GROQ") {
            let Some(api_key) = self.get("GROQ_API_KEY") else {
                warn!("USE_GROQ is set but GROQ_API_KEY is missing");
                return None;
            };
            return Some(ProviderSettings::Groq {
                api_key,
                model: self.get_or("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            });
        }

        let Some(api_key) = self.get("OPENAI_API_KEY") else {
            warn!("OPENAI_API_KEY is missing");
            return None;
        };
        Some(ProviderSettings::OpenAi {
            api_key,
            model: self.get_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            base_url: self.get_or("OPENAI_BASE_URL", OPENAI_BASE_URL),
        })
    }
}
