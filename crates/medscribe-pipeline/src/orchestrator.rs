use std::sync::Arc;
use std::time::Instant;

use medscribe_core::json_extract::extract_document;
use medscribe_core::models::analysis::{
    AggregateResponse, AnalyzeRequest, AnalyzeResponse, resolve_patient_name,
};
use medscribe_core::models::classification::Classification;
use medscribe_core::models::document::ExtractedDocument;
use medscribe_core::models::transcript::Transcript;
use medscribe_keywords::KeywordExtractor;
use medscribe_llm::{ChatModel, LlmError};
use medscribe_llm::classify::{classify_intent, classify_sentiment};
use medscribe_llm::generate::{failure_message, generate_soap_note, generate_summary};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::outcome::{AnalysisTask, run_with_deadline};

/// Turns one transcript into the aggregate analysis.
///
/// Holds only shared, read-only capabilities, so one instance serves every
/// request concurrently.
#[derive(Clone)]
pub struct Orchestrator {
    model: Option<Arc<dyn ChatModel>>,
    keywords: KeywordExtractor,
    config: PipelineConfig,
}

impl Orchestrator {
    pub fn new(
        model: Option<Arc<dyn ChatModel>>,
        keywords: KeywordExtractor,
        config: PipelineConfig,
    ) -> Self {
        Self {
            model,
            keywords,
            config,
        }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyze a transcript. Never fails: a blank transcript is rejected in
    /// the response body, and every other problem degrades a single field.
    pub async fn analyze(&self, request: AnalyzeRequest) -> AnalyzeResponse {
        let transcript = match Transcript::parse(&request.transcript) {
            Ok(transcript) => transcript,
            Err(e) => {
                warn!(error = %e, "rejected analysis request");
                return AnalyzeResponse::rejected(e.to_string());
            }
        };

        let analysis_id = Uuid::new_v4();
        let started = Instant::now();
        info!(
            analysis_id = %analysis_id,
            transcript_len = transcript.len(),
            model_available = self.has_model(),
            "starting analysis"
        );

        let keywords = self
            .keywords
            .extract(transcript.as_str(), self.config.max_keywords);

        let config = &self.config;
        let (sentiment, intent, summary, soap_note) = tokio::join!(
            run_with_deadline(analysis_id, AnalysisTask::Sentiment, config.sentiment_timeout, {
                let (model, transcript) = (self.model.clone(), transcript.clone());
                async move { classify_sentiment(model.as_deref(), transcript.as_str()).await }
            }),
            run_with_deadline(analysis_id, AnalysisTask::Intent, config.intent_timeout, {
                let (model, transcript) = (self.model.clone(), transcript.clone());
                async move { classify_intent(model.as_deref(), transcript.as_str()).await }
            }),
            run_with_deadline(analysis_id, AnalysisTask::Summary, config.summary_timeout, {
                let (model, transcript) = (self.model.clone(), transcript.clone());
                async move { generate_summary(model.as_deref(), transcript.as_str()).await }
            }),
            run_with_deadline(analysis_id, AnalysisTask::SoapNote, config.soap_timeout, {
                let (model, transcript) = (self.model.clone(), transcript.clone());
                async move { generate_soap_note(model.as_deref(), transcript.as_str()).await }
            }),
        );

        let sentiment = sentiment.resolve();
        let intent = intent.resolve();
        let summary = summary.map(into_document).resolve();
        let soap_note = soap_note.map(into_document).resolve();

        if let Some(error) = sentiment.error() {
            warn!(analysis_id = %analysis_id, field = "sentiment", error, "degraded field");
        }
        if let Some(error) = intent.error() {
            warn!(analysis_id = %analysis_id, field = "intent", error, "degraded field");
        }
        if let Some(error) = summary.error_message() {
            warn!(analysis_id = %analysis_id, field = "summary", error, "degraded field");
        }
        if let Some(error) = soap_note.error_message() {
            warn!(analysis_id = %analysis_id, field = "soap_note", error, "degraded field");
        }

        let patient_name = resolve_patient_name(request.patient_name.as_deref(), &summary);

        info!(
            analysis_id = %analysis_id,
            keywords = keywords.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );

        AggregateResponse {
            patient_name,
            summary,
            keywords,
            sentiment,
            intent,
            soap_note,
        }
        .into()
    }
}

/// Leniently parse a generator's raw reply; failures become error documents.
fn into_document(reply: Result<String, LlmError>) -> ExtractedDocument {
    match reply {
        Ok(raw) => extract_document(&raw),
        Err(e) => ExtractedDocument::error(failure_message(&e)),
    }
}
