//! Closed-set classification over a chat model.
//!
//! The model is asked for `{"<key>": "<label>", "confidence": 0.0}`. A reply
//! that is not such an object falls back to keyword heuristics over the raw
//! text; a failed call falls back to the safe default. Either way the caller
//! always gets a label from the closed set.

use medscribe_core::models::classification::{
    Classification, DEGRADED_CONFIDENCE, IntentResult, LabelSet, SentimentResult,
};
use serde_json::Value;
use tracing::debug;

use crate::error::LlmError;
use crate::model::ChatModel;
use crate::prompts;

const CONFIDENCE_KEY: &str = "confidence";

pub async fn classify_sentiment(model: Option<&dyn ChatModel>, text: &str) -> SentimentResult {
    classify(model, &prompts::sentiment(text), "sentiment").await
}

pub async fn classify_intent(model: Option<&dyn ChatModel>, text: &str) -> IntentResult {
    classify(model, &prompts::intent(text), "intent").await
}

/// Run one classification prompt. Never fails.
pub async fn classify<C: Classification>(
    model: Option<&dyn ChatModel>,
    prompt: &str,
    label_key: &str,
) -> C {
    let Some(model) = model else {
        return C::degraded(LlmError::NotConfigured.to_string());
    };

    match model.invoke(prompt).await {
        Ok(reply) => parse_reply(&reply, label_key),
        Err(e) => C::degraded(format!("LLM error: {e}")),
    }
}

/// Interpret a model reply as a classification.
///
/// The reply must be a bare JSON object; no fence stripping is attempted.
pub fn parse_reply<C: Classification>(reply: &str, label_key: &str) -> C {
    let fields = match serde_json::from_str::<Value>(reply) {
        Ok(Value::Object(fields)) => fields,
        _ => {
            debug!(label_key, "classification reply is not a JSON object, guessing");
            return C::guessed(reply);
        }
    };

    let label = match fields.get(label_key) {
        Some(Value::String(raw)) => <C::Label as LabelSet>::from_label(raw)
            .unwrap_or_else(|| <C::Label as LabelSet>::guess(raw)),
        _ => <C::Label as LabelSet>::DEFAULT,
    };

    let confidence = match fields.get(CONFIDENCE_KEY) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(DEGRADED_CONFIDENCE),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(DEGRADED_CONFIDENCE),
        _ => DEGRADED_CONFIDENCE,
    };

    C::classified(label, confidence)
}
