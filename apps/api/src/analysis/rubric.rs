//! Rubric: the evaluation prompt for each section, fixed at startup.
//!
//! Built-in prompts live in `analysis::prompts`. A JSON file of the form
//! `{"measurableOutcomes": "..."}` may override any subset of keys. An empty
//! prompt is a legal entry.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::analysis::prompts::{
    DEFINITION_AND_SIZE_RUBRIC, MEASURABLE_OUTCOMES_RUBRIC, PROPOSED_SOLUTION_RUBRIC,
    VALIDATION_RUBRIC,
};
use crate::segmentation::{SectionKey, SectionTable};

#[derive(Debug, Error)]
pub enum RubricError {
    #[error("Failed to read rubric file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid rubric file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rubric {
    prompts: SectionTable<String>,
}

impl Default for Rubric {
    fn default() -> Self {
        Self::from_fn(|key| {
            match key {
                SectionKey::DefinitionAndSize => DEFINITION_AND_SIZE_RUBRIC,
                SectionKey::MeasurableOutcomes => MEASURABLE_OUTCOMES_RUBRIC,
                SectionKey::ProposedSolution => PROPOSED_SOLUTION_RUBRIC,
                SectionKey::Validation => VALIDATION_RUBRIC,
            }
            .to_string()
        })
    }
}

impl Rubric {
    pub fn from_fn(f: impl FnMut(SectionKey) -> String) -> Self {
        Self {
            prompts: SectionTable::from_fn(f),
        }
    }

    pub fn prompt(&self, key: SectionKey) -> &str {
        &self.prompts[key]
    }

    /// Built-in rubric with the entries in `overrides` replaced.
    pub fn with_overrides(overrides: HashMap<SectionKey, String>) -> Self {
        let mut rubric = Self::default();
        for (key, prompt) in overrides {
            rubric.prompts.set(key, prompt);
        }
        rubric
    }

    /// Loads overrides from a JSON file on top of the built-in rubric.
    pub fn load(path: &Path) -> Result<Self, RubricError> {
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| RubricError::Read {
            path: shown.clone(),
            source,
        })?;
        let overrides: HashMap<SectionKey, String> =
            serde_json::from_str(&raw).map_err(|source| RubricError::Parse {
                path: shown.clone(),
                source,
            })?;
        info!("Loaded {} rubric override(s) from {}", overrides.len(), shown);
        Ok(Self::with_overrides(overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_has_prompt_for_every_section() {
        let rubric = Rubric::default();
        for key in SectionKey::ALL {
            assert!(rubric.prompt(key).contains("Score: X/10"), "{key}");
        }
    }

    #[test]
    fn test_load_overrides_subset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"validation": "Be brief.", "measurableOutcomes": ""}}"#).unwrap();

        let rubric = Rubric::load(file.path()).unwrap();
        assert_eq!(rubric.prompt(SectionKey::Validation), "Be brief.");
        assert_eq!(rubric.prompt(SectionKey::MeasurableOutcomes), "");
        assert_eq!(
            rubric.prompt(SectionKey::DefinitionAndSize),
            DEFINITION_AND_SIZE_RUBRIC
        );
    }

    #[test]
    fn test_load_rejects_unknown_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"appendix": "?"}}"#).unwrap();
        assert!(matches!(
            Rubric::load(file.path()),
            Err(RubricError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Rubric::load(&dir.path().join("rubric.json")),
            Err(RubricError::Read { .. })
        ));
    }
}
