//! Review session: one uploaded proposal, its user edits, and its latest results.
//!
//! The edited sections start as a copy of the segmented ones and diverge key by
//! key. `reanalyze(key)` snapshots that key's current text, releases the lock,
//! awaits the completion, and then writes only that key's outcome. Locks are
//! never held across an await, so edits and re-analyses of other keys are not
//! blocked by an in-flight call.
//!
//! Each dispatch for a key takes the next generation number for that key. A
//! completion is recorded only if no newer dispatch for the same key has
//! started since, so a slow call on an older edit never overwrites the result
//! for the current text.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use tracing::{debug, info};

use crate::analysis::orchestrator::SectionAnalyzer;
use crate::analysis::outcome::{AnalysisResultMap, SectionOutcome};
use crate::analysis::rubric::Rubric;
use crate::segmentation::{segment, SectionKey, SectionMap, SectionTable};

pub struct ReviewSession {
    analyzer: SectionAnalyzer,
    rubric: Arc<Rubric>,
    original: SectionMap,
    edited: Mutex<SectionMap>,
    results: Mutex<AnalysisResultMap>,
    generations: Mutex<SectionTable<u64>>,
}

// Critical sections only clone or replace a value, so a poisoned lock still
// holds consistent data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ReviewSession {
    pub fn new(analyzer: SectionAnalyzer, rubric: Arc<Rubric>, sections: SectionMap) -> Self {
        Self {
            analyzer,
            rubric,
            edited: Mutex::new(sections.clone()),
            original: sections,
            results: Mutex::new(AnalysisResultMap::default()),
            generations: Mutex::new(SectionTable::default()),
        }
    }

    /// Segments `text` and opens a session over the result.
    pub fn from_text(analyzer: SectionAnalyzer, rubric: Arc<Rubric>, text: &str) -> Self {
        Self::new(analyzer, rubric, segment(text))
    }

    /// Sections as segmented, before any edit.
    pub fn original(&self) -> &SectionMap {
        &self.original
    }

    /// Snapshot of the current (possibly edited) sections.
    pub fn sections(&self) -> SectionMap {
        lock(&self.edited).clone()
    }

    pub fn text(&self, key: SectionKey) -> String {
        lock(&self.edited)[key].clone()
    }

    pub fn edit(&self, key: SectionKey, text: impl Into<String>) {
        lock(&self.edited).set(key, text.into());
    }

    /// Restores `key` to its segmented text.
    pub fn reset(&self, key: SectionKey) {
        lock(&self.edited).set(key, self.original[key].clone());
    }

    pub fn is_edited(&self, key: SectionKey) -> bool {
        lock(&self.edited)[key] != self.original[key]
    }

    pub fn results(&self) -> AnalysisResultMap {
        lock(&self.results).clone()
    }

    pub fn outcome(&self, key: SectionKey) -> SectionOutcome {
        lock(&self.results)[key].clone()
    }

    /// Re-runs the analysis for `key` against its current text.
    ///
    /// If a newer re-analysis of `key` was dispatched while this one was in
    /// flight, this result is dropped and the stored outcome is returned.
    pub async fn reanalyze(&self, key: SectionKey) -> SectionOutcome {
        let (text, generation) = self.dispatch(key);
        info!(section = %key, edited = self.is_edited(key), "Re-analyzing section");
        let result = self.analyzer.analyze_one(key, &text, &self.rubric).await;

        // Lock order: results, then generations.
        let mut results = lock(&self.results);
        if lock(&self.generations)[key] != generation {
            debug!(section = %key, generation, "Discarding superseded analysis");
            return results[key].clone();
        }
        let outcome = results.record(key, result).clone();
        outcome
    }

    /// Snapshots `key`'s text and claims the next generation for it.
    fn dispatch(&self, key: SectionKey) -> (String, u64) {
        let text = self.text(key);
        let mut generations = lock(&self.generations);
        let generation = generations[key] + 1;
        generations.set(key, generation);
        (text, generation)
    }

    /// Analyzes every section concurrently; each key reads its text at dispatch.
    pub async fn analyze_all(&self) -> AnalysisResultMap {
        join_all(SectionKey::ALL.map(|key| self.reanalyze(key))).await;
        self.results()
    }
}
