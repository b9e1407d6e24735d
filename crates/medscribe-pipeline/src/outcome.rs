use std::any::Any;
use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use medscribe_core::models::classification::{Classification, IntentResult, SentimentResult};
use medscribe_core::models::document::ExtractedDocument;
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, warn};
use uuid::Uuid;

/// The model-backed sub-analyses of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisTask {
    Sentiment,
    Intent,
    Summary,
    SoapNote,
}

impl AnalysisTask {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Intent => "intent",
            Self::Summary => "summary",
            Self::SoapNote => "soap_note",
        }
    }
}

impl fmt::Display for AnalysisTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one task ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome<T> {
    Completed(T),
    TimedOut,
    /// The task died before producing a value (panic or cancellation).
    Failed(String),
}

/// The stand-in value a task's field takes when the task did not complete.
pub trait Fallback {
    fn timed_out() -> Self;

    fn failed(description: String) -> Self;
}

impl Fallback for SentimentResult {
    fn timed_out() -> Self {
        Self::degraded("Timeout")
    }

    fn failed(description: String) -> Self {
        Self::degraded(description)
    }
}

impl Fallback for IntentResult {
    fn timed_out() -> Self {
        Self::degraded("Timeout")
    }

    fn failed(description: String) -> Self {
        Self::degraded(description)
    }
}

impl Fallback for ExtractedDocument {
    fn timed_out() -> Self {
        Self::error("timeout")
    }

    fn failed(description: String) -> Self {
        Self::error(description)
    }
}

impl<T> TaskOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TaskOutcome<U> {
        match self {
            Self::Completed(value) => TaskOutcome::Completed(f(value)),
            Self::TimedOut => TaskOutcome::TimedOut,
            Self::Failed(description) => TaskOutcome::Failed(description),
        }
    }
}

impl<T: Fallback> TaskOutcome<T> {
    /// Collapse into a value; the response never carries an outcome.
    pub fn resolve(self) -> T {
        match self {
            Self::Completed(value) => value,
            Self::TimedOut => T::timed_out(),
            Self::Failed(description) => T::failed(description),
        }
    }
}

/// Spawn `work` on the runtime and wait at most `deadline` for it.
///
/// On expiry the task is aborted, which drops any in-flight provider request.
/// Dropping the returned future before it resolves aborts the task as well.
pub async fn run_with_deadline<T, F>(
    analysis_id: Uuid,
    task: AnalysisTask,
    deadline: Duration,
    work: F,
) -> TaskOutcome<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let started = Instant::now();
    let mut handle = AbortOnDrop(tokio::spawn(work));

    let outcome = match tokio::time::timeout(deadline, &mut handle.0).await {
        Ok(Ok(value)) => TaskOutcome::Completed(value),
        Ok(Err(e)) => TaskOutcome::Failed(describe_join_error(e)),
        Err(_) => TaskOutcome::TimedOut,
    };
    drop(handle);

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &outcome {
        TaskOutcome::Completed(_) => {
            info!(analysis_id = %analysis_id, task = %task, elapsed_ms, "task completed");
        }
        TaskOutcome::TimedOut => {
            warn!(
                analysis_id = %analysis_id,
                task = %task,
                elapsed_ms,
                deadline_secs = deadline.as_secs(),
                "task timed out"
            );
        }
        TaskOutcome::Failed(description) => {
            warn!(
                analysis_id = %analysis_id,
                task = %task,
                elapsed_ms,
                error = %description,
                "task failed"
            );
        }
    }

    outcome
}

/// Aborts the spawned task when dropped, whether or not it finished.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn describe_join_error(err: JoinError) -> String {
    if err.is_panic() {
        format!("task panicked: {}", panic_message(err.into_panic()))
    } else {
        "task cancelled".to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
