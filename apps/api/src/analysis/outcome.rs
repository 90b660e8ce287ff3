//! Per-section analysis results.
//!
//! Section failures are data: they live in the result map next to the
//! successes instead of being returned as an `Err` for the whole batch.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::score::extract_score;
use crate::llm_client::LlmError;
use crate::segmentation::{SectionKey, SectionTable};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),

    #[error("completion timed out after {0:?}")]
    Timeout(Duration),
}

/// One successful rubric evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub feedback: String,
    /// Parsed from the `Score: X/10` line, if present.
    pub score: Option<f32>,
    /// False when the section text was blank (heading missing, empty body, or
    /// edited down to whitespace) and a placeholder was analysed instead.
    pub content_found: bool,
    pub analyzed_at: DateTime<Utc>,
}

impl SectionAnalysis {
    pub fn new(feedback: String, content_found: bool) -> Self {
        Self {
            score: extract_score(&feedback),
            feedback,
            content_found,
            analyzed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SectionOutcome {
    #[default]
    NotAnalyzed,
    Completed(SectionAnalysis),
    /// `stale` is the last successful analysis for this section, kept when a
    /// re-analysis fails. `None` means there never was one.
    Failed {
        error: String,
        stale: Option<SectionAnalysis>,
    },
}

impl SectionOutcome {
    /// The current successful analysis, if any. Stale results are not included.
    pub fn analysis(&self) -> Option<&SectionAnalysis> {
        match self {
            SectionOutcome::Completed(analysis) => Some(analysis),
            _ => None,
        }
    }

    /// The most recent successful analysis, current or stale.
    pub fn last_success(&self) -> Option<&SectionAnalysis> {
        match self {
            SectionOutcome::Completed(analysis) => Some(analysis),
            SectionOutcome::Failed { stale, .. } => stale.as_ref(),
            SectionOutcome::NotAnalyzed => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SectionOutcome::Failed { .. })
    }
}

/// Outcome per section; starts all `NotAnalyzed`.
pub type AnalysisResultMap = SectionTable<SectionOutcome>;

impl AnalysisResultMap {
    /// Writes the result of one analysis into `key` only.
    ///
    /// A failure keeps the previous success (if any) as `stale`.
    pub fn record(
        &mut self,
        key: SectionKey,
        result: Result<SectionAnalysis, AnalysisError>,
    ) -> &SectionOutcome {
        let outcome = match result {
            Ok(analysis) => SectionOutcome::Completed(analysis),
            Err(e) => SectionOutcome::Failed {
                error: e.to_string(),
                stale: self.get(key).last_success().cloned(),
            },
        };
        self.set(key, outcome);
        self.get(key)
    }

    pub fn completed_count(&self) -> usize {
        self.iter().filter(|(_, o)| o.analysis().is_some()).count()
    }
}
