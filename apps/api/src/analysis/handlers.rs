//! Axum route handlers for the Proposal API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::outcome::{AnalysisResultMap, SectionAnalysis, SectionOutcome};
use crate::analysis::score::overall_score;
use crate::errors::AppError;
use crate::segmentation::{segment, SectionKey, SectionMap};
use crate::state::AppState;

/// Multipart field carrying the proposal PDF.
const FILE_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub sections: SectionMap,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub sections: SectionMap,
    pub results: AnalysisResultMap,
    pub overall_score: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct ReanalyzeRequest {
    /// Current (possibly edited) text of the section.
    pub text: String,
    /// The client's last successful analysis for this section, kept as `stale`
    /// if the re-analysis fails.
    #[serde(default)]
    pub previous: Option<SectionAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct ReanalyzeResponse {
    pub section: SectionKey,
    pub outcome: SectionOutcome,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/proposals/sections
pub async fn handle_segment(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SegmentResponse>, AppError> {
    let file = read_upload(multipart, state.config.max_upload_bytes).await?;
    let sections = extract_sections(&state, file).await?;
    Ok(Json(SegmentResponse { sections }))
}

/// POST /api/v1/proposals/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let file = read_upload(multipart, state.config.max_upload_bytes).await?;
    let sections = extract_sections(&state, file).await?;
    let results = state.analyzer.analyze_all(&sections, &state.rubric).await;
    let overall_score = overall_score(&results);
    Ok(Json(AnalyzeResponse {
        sections,
        results,
        overall_score,
    }))
}

/// POST /api/v1/proposals/sections/:key/analyze
pub async fn handle_reanalyze(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<ReanalyzeRequest>,
) -> Result<Json<ReanalyzeResponse>, AppError> {
    let key = key
        .parse::<SectionKey>()
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    let result = state.analyzer.analyze_one(key, &req.text, &state.rubric).await;

    let mut results = AnalysisResultMap::default();
    if let Some(previous) = req.previous {
        results.set(key, SectionOutcome::Completed(previous));
    }
    let outcome = results.record(key, result).clone();

    Ok(Json(ReanalyzeResponse {
        section: key,
        outcome,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Reads the `file` field of a multipart upload, enforcing the size limit.
async fn read_upload(mut multipart: Multipart, limit: usize) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let bytes = field.bytes().await?;
        if bytes.len() > limit {
            return Err(AppError::PayloadTooLarge { limit });
        }
        return Ok(bytes);
    }
    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

/// Extraction → segmentation. Extraction failure is fatal for the request.
async fn extract_sections(state: &AppState, file: Bytes) -> Result<SectionMap, AppError> {
    let text = state.extractor.extract(file).await?;
    let sections = segment(&text);
    let found = sections.iter().filter(|(_, body)| !body.is_empty()).count();
    info!(
        "Segmented {} chars into {}/{} non-empty sections",
        text.len(),
        found,
        SectionKey::ALL.len()
    );
    Ok(sections)
}
