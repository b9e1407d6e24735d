use std::time::Duration;

use async_trait::async_trait;

use crate::error::LlmError;

/// How long to wait for a TCP connection to the provider.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// A chat-capable language model: one prompt in, one completion out.
///
/// Implementations are shared across concurrent requests and must not hold
/// per-request state.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send `prompt` as a single user message and return the reply text.
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider label for logs, e.g. `"Groq"`.
    fn provider(&self) -> &'static str;

    fn model(&self) -> &str;
}

/// The HTTP client shared by the hosted and local providers.
pub(crate) fn http_client(request_timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(request_timeout)
        .build()
        .map_err(|e| LlmError::Config(format!("failed to build HTTP client: {e}")))
}

/// Read an error body without letting a second failure mask the status.
pub(crate) async fn error_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}
