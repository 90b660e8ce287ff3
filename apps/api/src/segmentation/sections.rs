//! Section keys and the fixed four-slot table every per-section value lives in.
//!
//! `SectionTable<T>` holds exactly one `T` per `SectionKey`. There is no way to
//! add or remove a key, so a `SectionMap` or an analysis result map always
//! carries all four sections.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// The four rubric-evaluated regions of a funding proposal, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    DefinitionAndSize,
    MeasurableOutcomes,
    ProposedSolution,
    Validation,
}

impl SectionKey {
    /// All keys in document order.
    pub const ALL: [SectionKey; 4] = [
        SectionKey::DefinitionAndSize,
        SectionKey::MeasurableOutcomes,
        SectionKey::ProposedSolution,
        SectionKey::Validation,
    ];

    pub fn index(self) -> usize {
        match self {
            SectionKey::DefinitionAndSize => 0,
            SectionKey::MeasurableOutcomes => 1,
            SectionKey::ProposedSolution => 2,
            SectionKey::Validation => 3,
        }
    }

    /// Wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::DefinitionAndSize => "definitionAndSize",
            SectionKey::MeasurableOutcomes => "measurableOutcomes",
            SectionKey::ProposedSolution => "proposedSolution",
            SectionKey::Validation => "validation",
        }
    }

    /// Human-readable title for score cards and logs.
    pub fn title(self) -> &'static str {
        match self {
            SectionKey::DefinitionAndSize => "Problem definition",
            SectionKey::MeasurableOutcomes => "Measurable outcomes",
            SectionKey::ProposedSolution => "Proposed solution",
            SectionKey::Validation => "Validation",
        }
    }

    /// Literal heading that opens this section in the proposal template.
    pub fn anchor(self) -> &'static str {
        match self {
            SectionKey::DefinitionAndSize => "Definition and size of problem",
            SectionKey::MeasurableOutcomes => "Measurable outcomes",
            SectionKey::ProposedSolution => "Proposed solution and specific risk mitigation",
            SectionKey::Validation => "Validation of previous Proof-Of-Concepts done",
        }
    }

    /// Closing phrase of the template's guidance prose for this section.
    /// Everything up to and including it is boilerplate, not applicant text.
    pub fn guidance_marker(self) -> &'static str {
        match self {
            SectionKey::DefinitionAndSize => "6 hours per week wasted on manual work)",
            SectionKey::MeasurableOutcomes => "Show your cost per impact 1 .",
            SectionKey::ProposedSolution => {
                "Explain clearly how you intend to mitigate these risks during the POV."
            }
            SectionKey::Validation => "assess that the key risks are mitigated accordingly?",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section key: {0}")]
pub struct UnknownSectionKey(pub String);

impl FromStr for SectionKey {
    type Err = UnknownSectionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSectionKey(s.to_string()))
    }
}

/// One value per section key, always all four.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionTable<T> {
    slots: [T; 4],
}

/// Extracted text per section. Empty string means the anchor was not found.
pub type SectionMap = SectionTable<String>;

impl<T> SectionTable<T> {
    pub fn from_fn(mut f: impl FnMut(SectionKey) -> T) -> Self {
        Self {
            slots: SectionKey::ALL.map(|key| f(key)),
        }
    }

    pub fn get(&self, key: SectionKey) -> &T {
        &self.slots[key.index()]
    }

    /// Replaces the value for `key`, returning the previous one.
    pub fn set(&mut self, key: SectionKey, value: T) -> T {
        std::mem::replace(&mut self.slots[key.index()], value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &T)> {
        SectionKey::ALL.into_iter().zip(self.slots.iter())
    }
}

impl<T> Index<SectionKey> for SectionTable<T> {
    type Output = T;

    fn index(&self, key: SectionKey) -> &T {
        self.get(key)
    }
}

impl<T: Serialize> Serialize for SectionTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(&key, value)?;
        }
        map.end()
    }
}
