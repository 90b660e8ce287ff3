pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

/// Headroom over the file limit for multipart boundaries and headers.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/proposals/sections",
            post(handlers::handle_segment),
        )
        .route("/api/v1/proposals/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/proposals/sections/:key/analyze",
            post(handlers::handle_reanalyze),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::orchestrator::tests::{Reply, StubCompletion};
    use crate::analysis::{Rubric, SectionAnalyzer};
    use crate::config::Config;
    use crate::extraction::{ExtractionError, TextExtractor};

    const DOCUMENT: &str = "Definition and size of problem Users waste time. \
        Measurable outcomes We will track X. \
        Proposed solution and specific risk mitigation Build Y. \
        Validation of previous Proof-Of-Concepts done We tested Z.";
    const BOUNDARY: &str = "critique-test-boundary";

    /// Returns `DOCUMENT` for anything that starts with the PDF magic.
    struct StubExtractor;

    #[async_trait]
    impl TextExtractor for StubExtractor {
        async fn extract(&self, file: Bytes) -> Result<String, ExtractionError> {
            if file.starts_with(b"%PDF-") {
                Ok(DOCUMENT.to_string())
            } else {
                Err(ExtractionError::Unsupported)
            }
        }
    }

    fn test_state(stub: StubCompletion) -> AppState {
        AppState {
            analyzer: SectionAnalyzer::new(Arc::new(stub)).with_timeout(Duration::from_secs(5)),
            extractor: Arc::new(StubExtractor),
            rubric: Arc::new(Rubric::default()),
            config: Config {
                anthropic_api_key: "test".to_string(),
                port: 0,
                rust_log: "debug".to_string(),
                analysis_timeout: Duration::from_secs(5),
                max_upload_bytes: 1024,
                rubric_path: None,
            },
        }
    }

    fn upload(uri: &str, field: &str, contents: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"proposal.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(test_state(StubCompletion::new(Duration::ZERO)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_segment_endpoint_returns_all_sections() {
        let request = upload("/api/v1/proposals/sections", "file", b"%PDF-1.7 fake");
        let (status, body) = send(test_state(StubCompletion::new(Duration::ZERO)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"]["definitionAndSize"], "Users waste time.");
        assert_eq!(body["sections"]["validation"], "We tested Z.");
    }

    #[tokio::test]
    async fn test_analyze_endpoint_reports_partial_failure() {
        let stub = StubCompletion::new(Duration::ZERO).reply("Build Y.", Reply::Fail);
        let request = upload("/api/v1/proposals/analyze", "file", b"%PDF-1.7 fake");
        let (status, body) = send(test_state(stub), request).await;

        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_object().unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results["proposedSolution"]["status"], "failed");
        assert_eq!(results["measurableOutcomes"]["status"], "completed");
        assert_eq!(body["overall_score"], 5.0);
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_unprocessable() {
        let request = upload("/api/v1/proposals/analyze", "file", b"plain text");
        let (status, body) = send(test_state(StubCompletion::new(Duration::ZERO)), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_file_field_is_bad_request() {
        let request = upload("/api/v1/proposals/sections", "attachment", b"%PDF-1.7");
        let (status, _) = send(test_state(StubCompletion::new(Duration::ZERO)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let mut contents = b"%PDF-1.7 ".to_vec();
        contents.resize(2048, b'x');
        let request = upload("/api/v1/proposals/sections", "file", &contents);
        let (status, body) = send(test_state(StubCompletion::new(Duration::ZERO)), request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    fn reanalyze(key: &str, payload: Value) -> Request<Body> {
        Request::post(format!("/api/v1/proposals/sections/{key}/analyze"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_reanalyze_unknown_section_is_not_found() {
        let request = reanalyze("appendix", json!({ "text": "anything" }));
        let (status, body) = send(test_state(StubCompletion::new(Duration::ZERO)), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_reanalyze_uses_submitted_text() {
        let stub = StubCompletion::new(Duration::ZERO)
            .reply("Edited outcomes.", Reply::Text("Clearer now. Score: 8/10"));
        let request = reanalyze("measurableOutcomes", json!({ "text": "Edited outcomes." }));
        let (status, body) = send(test_state(stub), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["section"], "measurableOutcomes");
        assert_eq!(body["outcome"]["status"], "completed");
        assert_eq!(body["outcome"]["score"], 8.0);
    }

    #[tokio::test]
    async fn test_failed_reanalyze_returns_previous_as_stale() {
        let stub = StubCompletion::new(Duration::ZERO).reply("broken", Reply::Fail);
        let previous = json!({
            "feedback": "Fine. Score: 6/10",
            "score": 6.0,
            "content_found": true,
            "analyzed_at": "2026-01-01T00:00:00Z"
        });
        let request = reanalyze("validation", json!({ "text": "broken", "previous": previous }));
        let (status, body) = send(test_state(stub), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["status"], "failed");
        assert_eq!(body["outcome"]["stale"]["feedback"], "Fine. Score: 6/10");
    }
}
