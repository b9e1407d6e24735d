use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Field names the summary prompt asks the model to fill.
pub mod summary_field {
    pub const PATIENT_NAME: &str = "Patient_Name";
    pub const SYMPTOMS: &str = "Symptoms";
    pub const DIAGNOSIS: &str = "Diagnosis";
    pub const TREATMENT: &str = "Treatment";
    pub const CURRENT_STATUS: &str = "Current_Status";
    pub const PROGNOSIS: &str = "Prognosis";

    pub const ALL: &[&str] = &[
        PATIENT_NAME,
        SYMPTOMS,
        DIAGNOSIS,
        TREATMENT,
        CURRENT_STATUS,
        PROGNOSIS,
    ];
}

/// Section names of a SOAP note.
pub mod soap_section {
    pub const SUBJECTIVE: &str = "Subjective";
    pub const OBJECTIVE: &str = "Objective";
    pub const ASSESSMENT: &str = "Assessment";
    pub const PLAN: &str = "Plan";

    pub const ALL: &[&str] = &[SUBJECTIVE, OBJECTIVE, ASSESSMENT, PLAN];
}

/// Key carrying a failure description in degraded documents.
pub const ERROR_KEY: &str = "error";

/// Key carrying the truncated model output when parsing failed.
pub const RAW_KEY: &str = "raw";

/// A JSON object recovered from model output.
///
/// The shape is whatever the model produced (normally the summary fields or
/// the SOAP sections). On failure it is `{"error": ...}`, plus `"raw"` when
/// the model answered but nothing parseable came back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractedDocument(#[ts(type = "Record<string, unknown>")] pub Map<String, Value>);

impl ExtractedDocument {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// A stub standing in for a task that produced nothing usable.
    pub fn error(message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(ERROR_KEY.to_string(), Value::String(message.into()));
        Self(fields)
    }

    /// A stub for model output that could not be parsed.
    pub fn parse_failure(message: impl Into<String>, raw: impl Into<String>) -> Self {
        let mut doc = Self::error(message);
        doc.0.insert(RAW_KEY.to_string(), Value::String(raw.into()));
        doc
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A string field, ignoring blanks and non-string values.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.0.get(ERROR_KEY).and_then(Value::as_str)
    }

    pub fn is_error(&self) -> bool {
        self.0.contains_key(ERROR_KEY)
    }

    pub fn patient_name(&self) -> Option<&str> {
        self.get_str(summary_field::PATIENT_NAME)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ExtractedDocument {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
