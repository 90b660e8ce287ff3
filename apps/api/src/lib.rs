//! Proposal critique: segments a funding-proposal PDF into its rubric sections
//! and runs one LLM evaluation per section, tolerating per-section failure.
//!
//! Library entry points: `segmentation::segment`, `analysis::SectionAnalyzer`,
//! and `analysis::ReviewSession` for edit-and-re-analyze flows. The binary
//! wraps them in an Axum API (`routes::build_router`).

pub mod analysis;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod llm_client;
pub mod routes;
pub mod segmentation;
pub mod state;

pub use analysis::{
    AnalysisResultMap, ReviewSession, Rubric, SectionAnalysis, SectionAnalyzer, SectionOutcome,
};
pub use segmentation::{segment, SectionKey, SectionMap};
