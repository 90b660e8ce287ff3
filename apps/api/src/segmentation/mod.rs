// Proposal segmentation: raw extracted text → one text block per rubric section.
// Pure and synchronous; no I/O happens here.

pub mod sections;
pub mod segmenter;

pub use sections::{SectionKey, SectionMap, SectionTable, UnknownSectionKey};
pub use segmenter::segment;
