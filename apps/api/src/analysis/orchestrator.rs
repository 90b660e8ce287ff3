//! Section Analyzer: fans one completion call out per section and fans the
//! results back into a keyed map.
//!
//! Flow: for each key → pair section text with its rubric prompt → complete()
//! under a per-call timeout → collect `Result` per key → `AnalysisResultMap`.
//!
//! All calls are driven concurrently from the calling task (`join_all`), so the
//! batch takes roughly as long as the slowest section. Each call reads only
//! its own section and rubric entry, and its result is written only to its own
//! key. `analyze_all` never fails as a whole.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{info, warn};

use crate::analysis::outcome::{AnalysisError, AnalysisResultMap, SectionAnalysis};
use crate::analysis::prompts::NO_CONTENT_PLACEHOLDER;
use crate::analysis::rubric::Rubric;
use crate::llm_client::CompletionService;
use crate::segmentation::{SectionKey, SectionMap};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Runs rubric evaluations against an injected completion service.
#[derive(Clone)]
pub struct SectionAnalyzer {
    completion: Arc<dyn CompletionService>,
    timeout: Duration,
}

impl SectionAnalyzer {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Upper bound for a single completion call. A call that runs longer is
    /// recorded as failed for its section.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Analyzes all four sections concurrently.
    pub async fn analyze_all(&self, sections: &SectionMap, rubric: &Rubric) -> AnalysisResultMap {
        info!("Dispatching {} section analyses", SectionKey::ALL.len());

        let calls = sections
            .iter()
            .map(|(key, text)| async move { (key, self.analyze_one(key, text, rubric).await) });
        let settled = join_all(calls).await;

        let mut results = AnalysisResultMap::default();
        for (key, result) in settled {
            results.record(key, result);
        }

        info!(
            "Section analysis finished: {}/{} completed",
            results.completed_count(),
            SectionKey::ALL.len()
        );
        results
    }

    /// Analyzes one section using exactly the `text` supplied by the caller.
    pub async fn analyze_one(
        &self,
        key: SectionKey,
        text: &str,
        rubric: &Rubric,
    ) -> Result<SectionAnalysis, AnalysisError> {
        let content_found = !text.trim().is_empty();
        let content = if content_found { text } else { NO_CONTENT_PLACEHOLDER };

        let call = self.completion.complete(rubric.prompt(key), content);
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(feedback)) => Ok(SectionAnalysis::new(feedback, content_found)),
            Ok(Err(e)) => Err(AnalysisError::Completion(e)),
            Err(_) => Err(AnalysisError::Timeout(self.timeout)),
        };

        if let Err(e) = &result {
            warn!(section = %key, error = %e, "Section analysis failed");
        }
        result
    }
}
