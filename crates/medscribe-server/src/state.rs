use std::sync::Arc;

use medscribe_keywords::{KeywordExtractor, RuleAnnotator};
use medscribe_llm::{LlmError, build_model};
use medscribe_pipeline::Orchestrator;
use tracing::{info, warn};

use crate::config::{AnnotatorKind, AppConfig};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Build every shared capability once, at startup.
    pub fn from_config(config: &AppConfig) -> Result<Self, LlmError> {
        let model = build_model(&config.model)?;
        if model.is_none() {
            warn!("no language model configured; sentiment, intent, summary and SOAP fields will degrade");
        }

        let keywords = match config.annotator {
            AnnotatorKind::Rule => KeywordExtractor::new(Arc::new(RuleAnnotator::new())),
            AnnotatorKind::Disabled => {
                warn!("keyword annotator disabled; keywords will be empty");
                KeywordExtractor::disabled()
            }
        };

        info!(
            provider = config.model.provider.as_ref().map(|p| p.name()),
            model = config.model.provider.as_ref().map(|p| p.model()),
            annotator = ?config.annotator,
            max_keywords = config.pipeline.max_keywords,
            "application state ready"
        );

        Ok(Self::new(Orchestrator::new(model, keywords, config.pipeline.clone())))
    }
}
