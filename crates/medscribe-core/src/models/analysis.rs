use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::classification::{IntentResult, SentimentResult};
use super::document::ExtractedDocument;

/// Placeholder used when no patient name is known.
pub const UNKNOWN_PATIENT: &str = "Unknown";

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalyzeRequest {
    pub transcript: String,
    #[serde(default)]
    #[ts(optional)]
    pub patient_name: Option<String>,
}

/// Everything produced for one transcript. Every field is always present;
/// degraded fields carry an `error` key instead of being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AggregateResponse {
    pub patient_name: String,
    pub summary: ExtractedDocument,
    pub keywords: Vec<String>,
    pub sentiment: SentimentResult,
    pub intent: IntentResult,
    pub soap_note: ExtractedDocument,
}

/// What `/analyze` returns: either the aggregate or a validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AnalyzeResponse {
    Complete(Box<AggregateResponse>),
    Rejected { error: String },
}

impl AnalyzeResponse {
    pub fn rejected(error: impl Into<String>) -> Self {
        Self::Rejected {
            error: error.into(),
        }
    }
}

impl From<AggregateResponse> for AnalyzeResponse {
    fn from(aggregate: AggregateResponse) -> Self {
        Self::Complete(Box::new(aggregate))
    }
}

/// Pick the patient name: an explicit, non-blank request value wins, then the
/// name the summary extracted, then [`UNKNOWN_PATIENT`].
pub fn resolve_patient_name(explicit: Option<&str>, summary: &ExtractedDocument) -> String {
    explicit
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .or_else(|| summary.patient_name())
        .unwrap_or(UNKNOWN_PATIENT)
        .to_string()
}
