//! Closed-set classification results for sentiment and intent.
//!
//! Both classifiers share one protocol (parse, guess, or degrade), so the
//! label sets implement [`LabelSet`] and the result types implement
//! [`Classification`]. The wire shape keeps the capitalised keys the frontend
//! already consumes: `{"Sentiment": "...", "Confidence": 0.9}`.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Confidence reported when the label was guessed from free text.
pub const HEURISTIC_CONFIDENCE: f64 = 0.7;

/// Confidence reported alongside a safe default label.
pub const DEGRADED_CONFIDENCE: f64 = 0.5;

/// A fixed, closed set of labels with a safe default.
pub trait LabelSet: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const ALL: &'static [Self];
    const DEFAULT: Self;

    fn as_str(self) -> &'static str;

    /// Case-insensitive lookup of an exact label.
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.as_str().eq_ignore_ascii_case(label))
    }

    /// Keyword heuristics over arbitrary text. Always yields a label.
    fn guess(text: &str) -> Self;
}

/// A classification outcome whose label is always populated.
pub trait Classification: Sized {
    type Label: LabelSet;

    fn from_parts(label: Self::Label, confidence: f64, error: Option<String>) -> Self;

    fn label(&self) -> Self::Label;

    fn confidence(&self) -> f64;

    fn error(&self) -> Option<&str>;

    /// A label the model reported directly.
    fn classified(label: Self::Label, confidence: f64) -> Self {
        Self::from_parts(label, clamp_confidence(confidence), None)
    }

    /// A label recovered from unstructured model output.
    fn guessed(text: &str) -> Self {
        Self::from_parts(<Self::Label as LabelSet>::guess(text), HEURISTIC_CONFIDENCE, None)
    }

    /// The safe default, carrying a description of what went wrong.
    fn degraded(error: impl Into<String>) -> Self {
        Self::from_parts(
            <Self::Label as LabelSet>::DEFAULT,
            DEGRADED_CONFIDENCE,
            Some(error.into()),
        )
    }

    fn is_degraded(&self) -> bool {
        self.error().is_some()
    }
}

/// Clamp into `[0, 1]`; non-finite values fall back to the degraded score.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        DEGRADED_CONFIDENCE
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

// ── Sentiment ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Sentiment {
    Anxious,
    Neutral,
    Reassured,
}

impl LabelSet for Sentiment {
    const ALL: &'static [Self] = &[Self::Anxious, Self::Neutral, Self::Reassured];
    const DEFAULT: Self = Self::Neutral;

    fn as_str(self) -> &'static str {
        match self {
            Self::Anxious => "Anxious",
            Self::Neutral => "Neutral",
            Self::Reassured => "Reassured",
        }
    }

    fn guess(text: &str) -> Self {
        let lower = text.to_lowercase();
        if contains_any(&lower, &["anxious", "worried", "concerned", "nervous"]) {
            Self::Anxious
        } else if contains_any(&lower, &["reassured", "relieved", "better", "good"]) {
            Self::Reassured
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SentimentResult {
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    #[serde(rename = "Confidence")]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl Classification for SentimentResult {
    type Label = Sentiment;

    fn from_parts(label: Sentiment, confidence: f64, error: Option<String>) -> Self {
        Self {
            sentiment: label,
            confidence,
            error,
        }
    }

    fn label(&self) -> Sentiment {
        self.sentiment
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

// ── Intent ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Intent {
    #[serde(rename = "Seeking reassurance")]
    SeekingReassurance,
    #[serde(rename = "Reporting symptoms")]
    ReportingSymptoms,
    #[serde(rename = "Reporting recovery status")]
    ReportingRecoveryStatus,
    #[serde(rename = "Providing history")]
    ProvidingHistory,
    #[serde(rename = "Expressing concern")]
    ExpressingConcern,
    #[serde(rename = "Requesting treatment plan")]
    RequestingTreatmentPlan,
}

impl LabelSet for Intent {
    const ALL: &'static [Self] = &[
        Self::SeekingReassurance,
        Self::ReportingSymptoms,
        Self::ReportingRecoveryStatus,
        Self::ProvidingHistory,
        Self::ExpressingConcern,
        Self::RequestingTreatmentPlan,
    ];
    const DEFAULT: Self = Self::ReportingSymptoms;

    fn as_str(self) -> &'static str {
        match self {
            Self::SeekingReassurance => "Seeking reassurance",
            Self::ReportingSymptoms => "Reporting symptoms",
            Self::ReportingRecoveryStatus => "Reporting recovery status",
            Self::ProvidingHistory => "Providing history",
            Self::ExpressingConcern => "Expressing concern",
            Self::RequestingTreatmentPlan => "Requesting treatment plan",
        }
    }

    fn guess(text: &str) -> Self {
        let lower = text.to_lowercase();
        if contains_any(&lower, &["reassurance", "worry"]) {
            Self::SeekingReassurance
        } else if contains_any(&lower, &["treatment", "plan"]) {
            Self::RequestingTreatmentPlan
        } else if contains_any(&lower, &["history", "happened"]) {
            Self::ProvidingHistory
        } else {
            Self::ReportingSymptoms
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IntentResult {
    #[serde(rename = "Intent")]
    pub intent: Intent,
    #[serde(rename = "Confidence")]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl Classification for IntentResult {
    type Label = Intent;

    fn from_parts(label: Intent, confidence: f64, error: Option<String>) -> Self {
        Self {
            intent: label,
            confidence,
            error,
        }
    }

    fn label(&self) -> Intent {
        self.intent
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
