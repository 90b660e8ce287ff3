//! Text extraction: uploaded file bytes → one normalized string.
//!
//! `PdfTextExtractor` (default) decodes with `pdf-extract`. Decoding is
//! CPU-bound, so it runs inside `tokio::task::spawn_blocking`.
//!
//! Output is whitespace-collapsed: every run of whitespace (including the line
//! breaks PDF text layout produces) becomes a single space, and the result is
//! trimmed. The segmenter's anchors rely on this.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file: not a PDF document")]
    Unsupported,

    #[error("Corrupt PDF: {0}")]
    Corrupt(String),

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, file: Bytes) -> Result<String, ExtractionError>;
}

pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, file: Bytes) -> Result<String, ExtractionError> {
        if !file.starts_with(PDF_MAGIC) {
            return Err(ExtractionError::Unsupported);
        }

        info!("Extracting text from {} byte PDF", file.len());
        // pdf-extract panics on some malformed inputs instead of returning Err.
        let raw = match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&file))
            .await
        {
            Ok(decoded) => decoded.map_err(|e| ExtractionError::Corrupt(e.to_string()))?,
            Err(e) if e.is_panic() => {
                return Err(ExtractionError::Corrupt("PDF decoder panicked".to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let text = normalize_whitespace(&raw);
        debug!("Extracted {} chars ({} before normalization)", text.len(), raw.len());
        Ok(text)
    }
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_line_breaks() {
        let raw = "Definition and size\nof problem\n\n  Users   waste\ttime.\r\n";
        assert_eq!(
            normalize_whitespace(raw),
            "Definition and size of problem Users waste time."
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }

    #[tokio::test]
    async fn test_rejects_non_pdf() {
        let result = PdfTextExtractor
            .extract(Bytes::from_static(b"PK\x03\x04 not a pdf"))
            .await;
        assert!(matches!(result, Err(ExtractionError::Unsupported)));
    }

    #[tokio::test]
    async fn test_truncated_pdf_is_corrupt() {
        let result = PdfTextExtractor
            .extract(Bytes::from_static(b"%PDF-1.7\n%garbage"))
            .await;
        assert!(matches!(result, Err(ExtractionError::Corrupt(_))));
    }
}
