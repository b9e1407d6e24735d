//! OpenAI-compatible chat completions (`POST {base}/chat/completions`).
//!
//! Serves both OpenAI itself and Groq, which exposes the same API surface.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LlmError;
use crate::model::{ChatModel, error_body, http_client};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiCompatible {
    client: reqwest::Client,
    provider: &'static str,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl OpenAiCompatible {
    pub fn new(
        provider: &'static str,
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f64,
        request_timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Config(format!("{provider} API key is empty")));
        }
        Ok(Self {
            client: http_client(request_timeout)?,
            provider,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model: model.into(),
            temperature,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatible {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let started = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        debug!(
            provider = self.provider,
            model = %self.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chat completion received"
        );

        Ok(choice.message.content.unwrap_or_default())
    }

    fn provider(&self) -> &'static str {
        self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }
}
