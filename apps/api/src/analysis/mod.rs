// Section analysis: one rubric-governed completion per proposal section.
// Fan-out/fan-in lives in `orchestrator`; per-key results and their failure
// semantics live in `outcome`. All LLM calls go through `CompletionService`.

pub mod handlers;
pub mod orchestrator;
pub mod outcome;
pub mod prompts;
pub mod rubric;
pub mod score;
pub mod session;

pub use orchestrator::SectionAnalyzer;
pub use outcome::{AnalysisError, AnalysisResultMap, SectionAnalysis, SectionOutcome};
pub use rubric::{Rubric, RubricError};
pub use score::{extract_score, overall_score};
pub use session::ReviewSession;
