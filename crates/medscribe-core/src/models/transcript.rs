use std::fmt;
use std::sync::Arc;

use crate::error::CoreError;

/// A validated, trimmed conversation transcript.
///
/// Cheap to clone: the text is shared so each concurrent analysis task can
/// hold its own handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(Arc<str>);

impl Transcript {
    /// Trim the raw input and reject it if nothing remains.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyTranscript);
        }
        Ok(Self(Arc::from(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes, for logging without exposing content.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Transcript {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
