use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM not initialized")]
    NotConfigured,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("model returned no choices")]
    EmptyResponse,

    #[error("LLM config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LlmError {
    /// The provider could not be reached, or the exchange was cut short.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::ResponseParse(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}
