pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No route matches this path".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/similarity", post(handlers::handle_similarity))
        .route("/api/v1/keywords", post(handlers::handle_keywords))
        .route("/api/v1/advice", post(handlers::handle_advice))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyze/upload",
            post(handlers::handle_analyze_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/job-description/fetch",
            post(handlers::handle_fetch_job_description),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::advice::AdviceService;
    use crate::config::Config;
    use crate::keywords::analyzer::{build_analyzer, AnalyzerKind};
    use crate::keywords::dictionary::SkillDictionary;
    use crate::keywords::extractor::KeywordExtractor;
    use crate::keywords::reconciler::KeywordReconciler;
    use crate::llm_client::LlmClient;
    use crate::scraping::JobPostingFetcher;
    use crate::similarity::testing::{LetterCountEmbedder, UnavailableEmbedder};
    use crate::similarity::EmbeddingProvider;

    const BOUNDARY: &str = "ats-test-boundary";

    fn test_state(embedder: Arc<dyn EmbeddingProvider>) -> AppState {
        let config = Config {
            max_upload_bytes: 4096,
            ..Config::default()
        };
        // Nothing listens on the discard port, so advice always falls back.
        let llm = LlmClient::new("http://127.0.0.1:9", Duration::from_secs(2))
            .unwrap()
            .with_max_retries(1);
        let extractor = KeywordExtractor::new(
            Arc::new(SkillDictionary::builtin()),
            build_analyzer(AnalyzerKind::Linguistic),
            &config.keyword_limits,
        )
        .unwrap()
        .with_filter_policy(config.filter_policy);

        AppState {
            reconciler: KeywordReconciler::new(&config.keyword_limits),
            extractor: Arc::new(extractor),
            embedder,
            advisor: AdviceService::new(llm, config.advice_model.clone()),
            job_fetcher: JobPostingFetcher::new().unwrap(),
            config,
        }
    }

    fn app() -> Router {
        build_router(test_state(Arc::new(LetterCountEmbedder)))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_body(file_name: &str, file: &[u8], job_description: &str) -> Body {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(
            format!(
                "\r\n--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\
                 \r\n\r\n{job_description}\r\n--{BOUNDARY}--\r\n"
            )
            .as_bytes(),
        );
        Body::from(body)
    }

    fn post_multipart(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(body)
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_reports_backends() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["embedding_provider"], "letter-count");
        assert_eq!(body["text_analyzer"], "linguistic");
        assert_eq!(body["llm_available"], false);
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let request = Request::get("/").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["endpoints"]["POST /api/v1/similarity"].is_string());
    }

    #[tokio::test]
    async fn test_similarity_returns_report() {
        let request = post_json(
            "/api/v1/similarity",
            json!({
                "resume_text": "Backend engineer with Python and SQL experience",
                "job_description": "We need Python, Docker and SQL skills"
            }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        let shared: Vec<&str> = body["shared_keywords"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(shared.contains(&"python") && shared.contains(&"sql"));
        assert!(body["missing_keywords"]
            .as_array()
            .unwrap()
            .contains(&json!("docker")));
        assert!(body["metadata"]["match_percentage"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_similarity_rejects_short_inputs() {
        let request = post_json(
            "/api/v1/similarity",
            json!({"resume_text": "  too short ", "job_description": "Python developer wanted"}),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_similarity_surfaces_embedding_outage() {
        let app = build_router(test_state(Arc::new(UnavailableEmbedder)));
        let request = post_json(
            "/api/v1/similarity",
            json!({
                "resume_text": "Backend engineer with Python",
                "job_description": "Python developer wanted"
            }),
        );
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "EMBEDDING_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_keywords_endpoint() {
        let request = post_json(
            "/api/v1/keywords",
            json!({"text": "I have 5 years of Python and AWS experience building REST APIs"}),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        let keywords = body["keywords"].as_array().unwrap();
        for expected in ["python", "aws", "api"] {
            assert!(keywords.contains(&json!(expected)), "missing {expected}");
        }
        assert!(!keywords.contains(&json!("experience")));
        assert_eq!(body["total"].as_u64().unwrap() as usize, keywords.len());
    }

    #[tokio::test]
    async fn test_advice_falls_back_when_model_is_down() {
        let request = post_json(
            "/api/v1/advice",
            json!({
                "resume_text": "resume",
                "job_description": "job",
                "similarity_score": 0.42,
                "shared_keywords": ["python"],
                "missing_keywords": ["docker", "kubernetes"]
            }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["llm_available"], false);
        assert_eq!(body["advice"]["skills_to_add"], json!(["docker", "kubernetes"]));
        assert_eq!(body["advice"]["skills_to_emphasize"], json!(["python"]));
    }

    #[tokio::test]
    async fn test_advice_rejects_out_of_range_score() {
        let request = post_json(
            "/api/v1/advice",
            json!({"similarity_score": 1.5, "shared_keywords": [], "missing_keywords": []}),
        );
        let (status, _) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_combines_similarity_and_advice() {
        let request = post_json(
            "/api/v1/analyze",
            json!({
                "resume_text": "Backend engineer with Python and SQL experience",
                "job_description": "We need Python, Docker and SQL skills"
            }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["similarity_score"].is_number());
        assert!(body["advice"]["overall_priority"].is_array());
        assert_eq!(body["llm_available"], false);
    }

    #[tokio::test]
    async fn test_upload_analyzes_text_resume() {
        let body = multipart_body(
            "resume.txt",
            b"Backend engineer with Python and SQL experience",
            "We need Python, Docker and SQL skills",
        );
        let (status, body) = send(app(), post_multipart(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["file_name"], "resume.txt");
        assert!(body["shared_keywords"].as_array().unwrap().contains(&json!("python")));
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let body = multipart_body("resume.docx", b"binary", "We need Python, Docker and SQL");
        let (status, body) = send(app(), post_multipart(body)).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_file() {
        let body = multipart_body("resume.txt", b"", "We need Python, Docker and SQL");
        let (status, _) = send(app(), post_multipart(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_enforces_body_limit() {
        let big = vec![b'a'; 8192];
        let body = multipart_body("resume.txt", &big, "We need Python, Docker and SQL");
        let (status, _) = send(app(), post_multipart(body)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let request = post_json("/api/v1/job-description/fetch", json!({"url": "not a url"}));
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = Request::get("/api/v1/nope").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
