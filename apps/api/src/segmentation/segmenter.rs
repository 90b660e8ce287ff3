//! Segmenter: splits normalized proposal text into the four rubric sections.
//!
//! The scan is a small state machine. There is one `Seeking` state per section
//! key (in document order), a `SeekingTerminal` state for the heading that
//! closes the last section, and `Done`. Each state searches for its anchor at
//! or after the cursor. A hit moves the cursor to the end of the matched
//! heading; a miss leaves it where the previous hit ended, so one missing
//! heading cannot shift the boundaries of the sections after it.
//!
//! Section text runs from the end of its heading to the start of the next
//! heading that was actually found (or the terminal heading, or the end of the
//! document) and is trimmed.
//!
//! Known limitation: matching is literal and first-match-wins. If an applicant
//! quotes a later section's heading inside an earlier section's body, the
//! boundary lands on the quote, not the real heading.

use crate::segmentation::sections::{SectionKey, SectionMap, SectionTable};

/// Heading of the cost table that follows the last analysed section.
pub const TERMINAL_ANCHOR: &str = "Resourcing Table 1: Cost breakdown table";

/// Byte offsets of a located heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeadingSpan {
    start: usize,
    end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Seeking(SectionKey),
    SeekingTerminal,
    Done,
}

struct Scanner<'a> {
    text: &'a str,
    cursor: usize,
    state: ScanState,
    headings: SectionTable<Option<HeadingSpan>>,
    terminal: Option<usize>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: 0,
            state: ScanState::Seeking(SectionKey::ALL[0]),
            headings: SectionTable::default(),
            terminal: None,
        }
    }

    fn find_from_cursor(&self, needle: &str) -> Option<HeadingSpan> {
        self.text[self.cursor..].find(needle).map(|offset| {
            let start = self.cursor + offset;
            HeadingSpan {
                start,
                end: start + needle.len(),
            }
        })
    }

    /// Advances one state. Returns `false` once the scan is finished.
    fn step(&mut self) -> bool {
        match self.state {
            ScanState::Seeking(key) => {
                if let Some(span) = self.find_from_cursor(key.anchor()) {
                    self.headings.set(key, Some(span));
                    self.cursor = span.end;
                }
                self.state = match SectionKey::ALL.get(key.index() + 1) {
                    Some(next) => ScanState::Seeking(*next),
                    None => ScanState::SeekingTerminal,
                };
                true
            }
            ScanState::SeekingTerminal => {
                self.terminal = self.find_from_cursor(TERMINAL_ANCHOR).map(|span| span.start);
                self.state = ScanState::Done;
                true
            }
            ScanState::Done => false,
        }
    }

    fn run(mut self) -> SectionMap {
        while self.step() {}
        self.into_sections()
    }

    fn into_sections(self) -> SectionMap {
        let document_end = self.terminal.unwrap_or(self.text.len());
        SectionTable::from_fn(|key| {
            let Some(span) = self.headings[key] else {
                return String::new();
            };
            let body_end = SectionKey::ALL[key.index() + 1..]
                .iter()
                .find_map(|next| self.headings[*next].map(|h| h.start))
                .unwrap_or(document_end);
            strip_template_guidance(key, self.text[span.end..body_end].trim()).to_string()
        })
    }
}

/// Drops the template's guidance prose if it was left in the section body.
fn strip_template_guidance(key: SectionKey, body: &str) -> &str {
    let marker = key.guidance_marker();
    match body.find(marker) {
        Some(pos) => body[pos + marker.len()..].trim(),
        None => body,
    }
}

/// Splits `text` into the four proposal sections.
///
/// Total and deterministic: any input, including the empty string, yields all
/// four keys. A section whose heading is missing maps to `""`.
pub fn segment(text: &str) -> SectionMap {
    Scanner::new(text).run()
}
