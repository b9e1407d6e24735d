use std::time::Duration;

use medscribe_keywords::DEFAULT_MAX_KEYWORDS;

/// Per-task deadlines and output limits for one analysis.
///
/// The classifiers get short deadlines and the document generators long
/// ones; slow local models need minutes for a full summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub sentiment_timeout: Duration,
    pub intent_timeout: Duration,
    pub summary_timeout: Duration,
    pub soap_timeout: Duration,
    pub max_keywords: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sentiment_timeout: Duration::from_secs(30),
            intent_timeout: Duration::from_secs(30),
            summary_timeout: Duration::from_secs(120),
            soap_timeout: Duration::from_secs(120),
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }
}
