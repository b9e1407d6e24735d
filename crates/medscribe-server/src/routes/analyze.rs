use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use medscribe_core::models::analysis::{AnalyzeRequest, AnalyzeResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Analyze a transcript.
///
/// Always 200 for a well-formed body, including a blank transcript (which
/// yields `{"error": "Transcript is required"}`) and fully degraded results.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.orchestrator.analyze(request).await))
}
