//! Local Ollama server (`POST {base}/api/chat`, non-streaming).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LlmError;
use crate::model::{ChatModel, error_body, http_client};

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Sampling options tuned for small models on CPU.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OllamaOptions {
    pub num_ctx: u32,
    pub num_predict: u32,
    pub top_k: u32,
    pub top_p: f64,
}

impl Default for OllamaOptions {
    fn default() -> Self {
        Self {
            num_ctx: 2048,
            num_predict: 256,
            top_k: 20,
            top_p: 0.9,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    temperature: f64,
    #[serde(flatten)]
    tuning: OllamaOptions,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

pub struct Ollama {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f64,
    options: OllamaOptions,
}

impl Ollama {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        temperature: f64,
        options: OllamaOptions,
        request_timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: http_client(request_timeout)?,
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
            model: model.into(),
            temperature,
            options,
        })
    }
}

#[async_trait]
impl ChatModel for Ollama {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            options: RequestOptions {
                temperature: self.temperature,
                tuning: self.options,
            },
        };

        let started = Instant::now();
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        let reply: ChatResponse = response.json().await?;
        let message = reply.message.ok_or(LlmError::EmptyResponse)?;

        debug!(
            provider = "Ollama",
            model = %self.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chat completion received"
        );

        Ok(message.content)
    }

    fn provider(&self) -> &'static str {
        "Ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
