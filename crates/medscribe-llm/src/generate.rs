//! Free-form document generation: clinical summary and SOAP note.
//!
//! Generators hand back the raw reply; turning it into a document is left to
//! the caller.

use tracing::debug;

use crate::error::LlmError;
use crate::model::ChatModel;
use crate::prompts;

/// Shown instead of the raw transport error when the provider hung up.
pub const CONNECTION_HINT: &str = "Connection closed - request took too long. \
Local models on CPU can need several minutes; please wait or use a hosted provider.";

pub async fn generate_summary(
    model: Option<&dyn ChatModel>,
    transcript: &str,
) -> Result<String, LlmError> {
    generate_document(model, &prompts::summary(transcript)).await
}

pub async fn generate_soap_note(
    model: Option<&dyn ChatModel>,
    transcript: &str,
) -> Result<String, LlmError> {
    generate_document(model, &prompts::soap_note(transcript)).await
}

pub async fn generate_document(
    model: Option<&dyn ChatModel>,
    prompt: &str,
) -> Result<String, LlmError> {
    let model = model.ok_or(LlmError::NotConfigured)?;
    let reply = model.invoke(prompt).await?;
    debug!(reply_chars = reply.chars().count(), "document reply received");
    Ok(reply)
}

/// The text a failed generation leaves in its document's `error` field.
pub fn failure_message(err: &LlmError) -> String {
    match err {
        LlmError::NotConfigured => err.to_string(),
        e if e.is_connection() => CONNECTION_HINT.to_string(),
        e => format!("LLM error: {e}"),
    }
}
