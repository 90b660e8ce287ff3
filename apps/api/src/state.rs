use std::sync::Arc;

use crate::analysis::{Rubric, SectionAnalyzer};
use crate::config::Config;
use crate::extraction::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the injected completion client and the per-call timeout.
    pub analyzer: SectionAnalyzer,
    /// Pluggable text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    /// Loaded once at startup, never mutated.
    pub rubric: Arc<Rubric>,
    pub config: Config,
}
