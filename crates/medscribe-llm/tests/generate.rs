use async_trait::async_trait;
use medscribe_llm::generate::{
    CONNECTION_HINT, failure_message, generate_soap_note, generate_summary,
};
use medscribe_llm::{ChatModel, LlmError};

enum Reply {
    Text(&'static str),
    Refused,
    Status(u16),
}

struct ScriptedModel(Reply);

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
        assert!(prompt.contains("Transcript:"));
        match self.0 {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Refused => Err(LlmError::Connection("connection reset by peer".to_string())),
            Reply::Status(status) => Err(LlmError::Http {
                status,
                body: "quota exceeded".to_string(),
            }),
        }
    }

    fn provider(&self) -> &'static str {
        "Scripted"
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

#[tokio::test]
async fn no_model_is_not_configured() {
    let err = generate_summary(None, "transcript").await.unwrap_err();
    assert!(matches!(err, LlmError::NotConfigured));
    assert_eq!(failure_message(&err), "LLM not initialized");
}

#[tokio::test]
async fn reply_is_returned_untouched() {
    let fenced = "```json\n{\"Patient_Name\": \"Janet Jones\"}\n```";
    let model = ScriptedModel(Reply::Text(fenced));
    let reply = generate_summary(Some(&model), "transcript").await.unwrap();
    assert_eq!(reply, fenced);
}

#[tokio::test]
async fn empty_reply_is_not_an_error() {
    let model = ScriptedModel(Reply::Text(""));
    let reply = generate_soap_note(Some(&model), "transcript").await.unwrap();
    assert!(reply.is_empty());
}

#[tokio::test]
async fn connection_failure_carries_hint() {
    let model = ScriptedModel(Reply::Refused);
    let err = generate_summary(Some(&model), "transcript").await.unwrap_err();
    assert_eq!(failure_message(&err), CONNECTION_HINT);
}

#[tokio::test]
async fn other_failures_are_reported_verbatim() {
    let model = ScriptedModel(Reply::Status(429));
    let err = generate_soap_note(Some(&model), "transcript").await.unwrap_err();
    let message = failure_message(&err);
    assert!(message.starts_with("LLM error:"), "{message}");
    assert!(message.contains("429"));
    assert!(message.contains("quota exceeded"));
}
