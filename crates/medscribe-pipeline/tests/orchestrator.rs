use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use medscribe_core::models::analysis::{AggregateResponse, AnalyzeRequest, AnalyzeResponse};
use medscribe_core::models::classification::{Intent, Sentiment};
use medscribe_keywords::{KeywordExtractor, RuleAnnotator};
use medscribe_llm::{ChatModel, LlmError};
use medscribe_pipeline::{Orchestrator, PipelineConfig};
use serde_json::json;

const TRANSCRIPT: &str = "Physician: Good morning, Ms Jones. How are you feeling today?\n\
Patient: I had a car accident on September 1st. The whiplash caused severe neck pain \
for four weeks. I'm worried it will affect me in the future.";

const SENTIMENT_REPLY: &str = r#"{"sentiment": "Anxious", "confidence": 0.9}"#;
const INTENT_REPLY: &str = r#"{"intent": "Seeking reassurance", "confidence": 0.85}"#;
const SUMMARY_REPLY: &str = "```json\n{\"Patient_Name\": \"Janet Jones\", \
\"Symptoms\": [\"Neck pain\"], \"Diagnosis\": \"Whiplash injury\"}\n```";
const SOAP_REPLY: &str = r#"Here is the note: {"Subjective": {"Chief_Complaint": "Neck pain"}, "Assessment": {"Severity": "Mild"}}"#;

#[derive(Clone, Copy)]
enum Behaviour {
    Reply(&'static str),
    Delay(Duration, &'static str),
    Fail,
    Panic,
}

/// Routes each prompt to a scripted behaviour by the task it asks for.
struct RoutedModel {
    sentiment: Behaviour,
    intent: Behaviour,
    summary: Behaviour,
    soap: Behaviour,
    calls: AtomicUsize,
    finished: AtomicUsize,
}

impl RoutedModel {
    fn healthy() -> Self {
        Self {
            sentiment: Behaviour::Reply(SENTIMENT_REPLY),
            intent: Behaviour::Reply(INTENT_REPLY),
            summary: Behaviour::Reply(SUMMARY_REPLY),
            soap: Behaviour::Reply(SOAP_REPLY),
            calls: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ChatModel for RoutedModel {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behaviour = if prompt.contains("patient's sentiment") {
            self.sentiment
        } else if prompt.contains("patient intent") {
            self.intent
        } else if prompt.contains("SOAP note") {
            self.soap
        } else {
            self.summary
        };

        let reply = match behaviour {
            Behaviour::Reply(text) => Ok(text.to_string()),
            Behaviour::Delay(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text.to_string())
            }
            Behaviour::Fail => Err(LlmError::Http {
                status: 401,
                body: "invalid api key".to_string(),
            }),
            Behaviour::Panic => panic!("model exploded"),
        };
        self.finished.fetch_add(1, Ordering::SeqCst);
        reply
    }

    fn provider(&self) -> &'static str {
        "Routed"
    }

    fn model(&self) -> &str {
        "routed"
    }
}

fn orchestrator(model: Arc<RoutedModel>) -> Orchestrator {
    Orchestrator::new(
        Some(model),
        KeywordExtractor::new(Arc::new(RuleAnnotator)),
        PipelineConfig::default(),
    )
}

fn request(transcript: &str, patient_name: Option<&str>) -> AnalyzeRequest {
    AnalyzeRequest {
        transcript: transcript.to_string(),
        patient_name: patient_name.map(str::to_string),
    }
}

fn complete(response: AnalyzeResponse) -> AggregateResponse {
    match response {
        AnalyzeResponse::Complete(aggregate) => *aggregate,
        AnalyzeResponse::Rejected { error } => panic!("request rejected: {error}"),
    }
}

#[tokio::test]
async fn healthy_model_populates_every_field() {
    let model = Arc::new(RoutedModel::healthy());
    let aggregate = complete(orchestrator(model.clone()).analyze(request(TRANSCRIPT, None)).await);

    assert_eq!(model.calls.load(Ordering::SeqCst), 4);
    assert_eq!(aggregate.patient_name, "Janet Jones");
    assert_eq!(aggregate.sentiment.sentiment, Sentiment::Anxious);
    assert_eq!(aggregate.sentiment.confidence, 0.9);
    assert_eq!(aggregate.intent.intent, Intent::SeekingReassurance);
    assert_eq!(aggregate.summary.get("Diagnosis"), Some(&json!("Whiplash injury")));
    assert_eq!(
        aggregate.soap_note.get("Assessment"),
        Some(&json!({"Severity": "Mild"}))
    );
    assert!(aggregate.keywords.len() <= 12);
    assert!(aggregate.keywords.iter().any(|k| k == "severe neck pain"));
}

#[tokio::test]
async fn blank_transcript_is_rejected_without_calling_the_model() {
    let model = Arc::new(RoutedModel::healthy());
    let response = orchestrator(model.clone()).analyze(request("  \n\t ", None)).await;

    assert_eq!(response, AnalyzeResponse::rejected("Transcript is required"));
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn explicit_patient_name_wins() {
    let model = Arc::new(RoutedModel::healthy());
    let aggregate = complete(
        orchestrator(model)
            .analyze(request(TRANSCRIPT, Some("Jane Doe")))
            .await,
    );
    assert_eq!(aggregate.patient_name, "Jane Doe");
}

#[tokio::test]
async fn blank_explicit_name_falls_back_to_summary() {
    let model = Arc::new(RoutedModel::healthy());
    let aggregate = complete(orchestrator(model).analyze(request(TRANSCRIPT, Some("  "))).await);
    assert_eq!(aggregate.patient_name, "Janet Jones");
}

#[tokio::test]
async fn without_model_every_model_field_degrades() {
    let orchestrator =
        Orchestrator::new(None, KeywordExtractor::disabled(), PipelineConfig::default());
    let aggregate = complete(orchestrator.analyze(request(TRANSCRIPT, None)).await);

    assert_eq!(aggregate.patient_name, "Unknown");
    assert!(aggregate.keywords.is_empty());
    assert_eq!(aggregate.sentiment.sentiment, Sentiment::Neutral);
    assert_eq!(aggregate.sentiment.confidence, 0.5);
    assert_eq!(aggregate.sentiment.error.as_deref(), Some("LLM not initialized"));
    assert_eq!(aggregate.intent.intent, Intent::ReportingSymptoms);
    assert_eq!(aggregate.intent.error.as_deref(), Some("LLM not initialized"));
    assert_eq!(aggregate.summary.error_message(), Some("LLM not initialized"));
    assert_eq!(aggregate.soap_note.error_message(), Some("LLM not initialized"));
}

#[tokio::test(start_paused = true)]
async fn slow_summary_times_out_alone() {
    let model = Arc::new(RoutedModel {
        summary: Behaviour::Delay(Duration::from_secs(600), SUMMARY_REPLY),
        ..RoutedModel::healthy()
    });
    let aggregate = complete(orchestrator(model).analyze(request(TRANSCRIPT, None)).await);

    assert_eq!(aggregate.summary.fields().len(), 1);
    assert_eq!(aggregate.summary.error_message(), Some("timeout"));
    assert_eq!(aggregate.patient_name, "Unknown");

    assert!(aggregate.sentiment.error.is_none());
    assert!(aggregate.intent.error.is_none());
    assert!(!aggregate.soap_note.is_error());
}

#[tokio::test(start_paused = true)]
async fn slow_classifier_times_out_with_default_label() {
    let model = Arc::new(RoutedModel {
        intent: Behaviour::Delay(Duration::from_secs(45), INTENT_REPLY),
        ..RoutedModel::healthy()
    });
    let aggregate = complete(orchestrator(model).analyze(request(TRANSCRIPT, None)).await);

    assert_eq!(aggregate.intent.intent, Intent::ReportingSymptoms);
    assert_eq!(aggregate.intent.confidence, 0.5);
    assert_eq!(aggregate.intent.error.as_deref(), Some("Timeout"));
    assert_eq!(aggregate.sentiment.sentiment, Sentiment::Anxious);
    assert!(!aggregate.summary.is_error());
}

#[tokio::test(start_paused = true)]
async fn deadlines_are_configurable() {
    let model = Arc::new(RoutedModel {
        sentiment: Behaviour::Delay(Duration::from_secs(10), SENTIMENT_REPLY),
        ..RoutedModel::healthy()
    });
    let config = PipelineConfig {
        sentiment_timeout: Duration::from_secs(5),
        ..PipelineConfig::default()
    };
    let orchestrator = Orchestrator::new(Some(model), KeywordExtractor::disabled(), config);
    let aggregate = complete(orchestrator.analyze(request(TRANSCRIPT, None)).await);

    assert_eq!(aggregate.sentiment.error.as_deref(), Some("Timeout"));
}

#[tokio::test(start_paused = true)]
async fn slow_task_does_not_delay_the_others_past_its_deadline() {
    let model = Arc::new(RoutedModel {
        soap: Behaviour::Delay(Duration::from_secs(3600), SOAP_REPLY),
        ..RoutedModel::healthy()
    });
    let started = tokio::time::Instant::now();
    let aggregate = complete(orchestrator(model).analyze(request(TRANSCRIPT, None)).await);

    assert_eq!(aggregate.soap_note.error_message(), Some("timeout"));
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(120), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(121), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn cancelled_request_stops_its_model_calls() {
    let delay = Duration::from_secs(20);
    let model = Arc::new(RoutedModel {
        sentiment: Behaviour::Delay(delay, SENTIMENT_REPLY),
        intent: Behaviour::Delay(delay, INTENT_REPLY),
        summary: Behaviour::Delay(delay, SUMMARY_REPLY),
        soap: Behaviour::Delay(delay, SOAP_REPLY),
        ..RoutedModel::healthy()
    });
    let orchestrator = orchestrator(model.clone());
    let in_flight =
        tokio::spawn(async move { orchestrator.analyze(request(TRANSCRIPT, None)).await });

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(model.calls.load(Ordering::SeqCst), 4);

    in_flight.abort();
    assert!(in_flight.await.unwrap_err().is_cancelled());

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(model.finished.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_failure_is_isolated() {
    let model = Arc::new(RoutedModel {
        sentiment: Behaviour::Fail,
        soap: Behaviour::Fail,
        ..RoutedModel::healthy()
    });
    let aggregate = complete(orchestrator(model).analyze(request(TRANSCRIPT, None)).await);

    let error = aggregate.sentiment.error.as_deref().unwrap();
    assert!(error.contains("invalid api key"), "{error}");
    assert_eq!(aggregate.sentiment.sentiment, Sentiment::Neutral);

    let soap_error = aggregate.soap_note.error_message().unwrap();
    assert!(soap_error.starts_with("LLM error:"), "{soap_error}");

    assert_eq!(aggregate.intent.intent, Intent::SeekingReassurance);
    assert_eq!(aggregate.patient_name, "Janet Jones");
}

#[tokio::test]
async fn panicking_task_becomes_a_failure_stub() {
    let model = Arc::new(RoutedModel {
        summary: Behaviour::Panic,
        ..RoutedModel::healthy()
    });
    let aggregate = complete(orchestrator(model).analyze(request(TRANSCRIPT, None)).await);

    let error = aggregate.summary.error_message().unwrap();
    assert!(error.contains("model exploded"), "{error}");
    assert_eq!(aggregate.patient_name, "Unknown");
    assert_eq!(aggregate.sentiment.sentiment, Sentiment::Anxious);
}

#[tokio::test]
async fn response_serializes_with_the_expected_keys() {
    let model = Arc::new(RoutedModel::healthy());
    let response = orchestrator(model).analyze(request(TRANSCRIPT, None)).await;
    let value = serde_json::to_value(&response).unwrap();

    let object = value.as_object().unwrap();
    for key in ["patient_name", "summary", "keywords", "sentiment", "intent", "soap_note"] {
        assert!(object.contains_key(key), "missing {key}");
    }
    assert_eq!(value["sentiment"], json!({"Sentiment": "Anxious", "Confidence": 0.9}));
    assert_eq!(
        value["intent"],
        json!({"Intent": "Seeking reassurance", "Confidence": 0.85})
    );
}
