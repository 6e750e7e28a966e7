pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::pipeline::upload::MAX_UPLOAD_BYTES;
use crate::state::AppState;

/// Headroom on top of the per-file limit for multipart framing and form fields.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health", get(health::health_handler))
        // Upload lifecycle
        .route("/api/upload", post(handlers::handle_upload))
        .route("/api/batch-upload", post(handlers::handle_batch_upload))
        .route("/api/analysis/:id", get(handlers::handle_result))
        .route("/api/analysis/:id/status", get(handlers::handle_status))
        .route("/api/analysis/:id/wait", get(handlers::handle_wait))
        .route("/api/analysis/:id/cancel", post(handlers::handle_cancel))
        // Records and profiles
        .route("/api/resumes", get(handlers::handle_list_resumes))
        .route("/api/resumes/:id", delete(handlers::handle_delete_resume))
        .route(
            "/api/job-profiles",
            get(handlers::handle_list_job_profiles).post(handlers::handle_create_job_profile),
        )
        .route("/api/export", post(handlers::handle_export))
        .layer(DefaultBodyLimit::max(
            MAX_UPLOAD_BYTES as usize + BODY_LIMIT_SLACK,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::pipeline::polling::PollPolicy;
    use crate::pipeline::service::tests::seeded_service;

    const BOUNDARY: &str = "X-ATS-BOUNDARY";

    async fn app() -> Router {
        build_router(AppState {
            service: seeded_service(0.0).await,
            poll: PollPolicy::default(),
        })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Multipart request with one part per `(filename, content_type)` under
    /// `field`, plus a `jobProfileId` text part.
    fn multipart_req(
        uri: &str,
        field: &str,
        files: &[(&str, &str)],
        job_profile_id: &str,
    ) -> Request<Body> {
        let mut body = String::new();
        for (filename, content_type) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n\
                 fake document bytes\r\n"
            ));
        }
        body.push_str(&format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"jobProfileId\"\r\n\r\n\
             {job_profile_id}\r\n\
             --{BOUNDARY}--\r\n"
        ));
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

    fn upload_req(filename: &str, content_type: &str, job_profile_id: &str) -> Request<Body> {
        multipart_req("/api/upload", "resume", &[(filename, content_type)], job_profile_id)
    }

    #[tokio::test(start_paused = true)]
    async fn test_health_reports_demo_mode() {
        let app = app().await;
        let (status, body) = send(&app, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["mode"]["mode"], "demo");
        assert_eq!(value["mode"]["jobProfiles"], 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_then_poll_then_result() {
        let app = app().await;
        let (status, body) = send(&app, upload_req("resume.pdf", "application/pdf", "frontend")).await;
        assert_eq!(status, StatusCode::OK);
        let receipt: Value = serde_json::from_slice(&body).unwrap();
        let job_id = receipt["jobId"].as_str().unwrap().to_string();
        let resume_id = receipt["resumeId"].as_str().unwrap().to_string();
        assert_eq!(receipt["status"], "processing");

        let (status, _) = send(&app, get_req(&format!("/api/analysis/{resume_id}"))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, body) = send(&app, get_req(&format!("/api/analysis/{job_id}/status"))).await;
        let polled: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(polled, json!({ "status": "processing", "progress": 0 }));

        tokio::time::sleep(Duration::from_millis(3001)).await;

        let (_, body) = send(&app, get_req(&format!("/api/analysis/{job_id}/status"))).await;
        let polled: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(polled, json!({ "status": "completed", "progress": 100 }));

        let (status, body) = send(&app, get_req(&format!("/api/analysis/{resume_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        let analysis: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(analysis["jobMatch"]["title"], "Frontend Developer");
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_wrong_type_is_bad_request() {
        let app = app().await;
        let (status, body) = send(&app, upload_req("notes.txt", "text/plain", "frontend")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");

        let (_, body) = send(&app, get_req("/api/resumes")).await;
        let resumes: Vec<Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(resumes.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_endpoint_returns_terminal_status() {
        let app = app().await;
        let (_, body) = send(&app, upload_req("cv.docx", "application/octet-stream", "backend")).await;
        let receipt: Value = serde_json::from_slice(&body).unwrap();
        let job_id = receipt["jobId"].as_str().unwrap();

        let (status, body) = send(&app, get_req(&format!("/api/analysis/{job_id}/wait"))).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "completed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_result_is_not_found() {
        let app = app().await;
        let (status, _) = send(&app, get_req("/api/analysis/nonexistent-id")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_status_is_sentinel() {
        let app = app().await;
        let (status, body) = send(&app, get_req("/api/analysis/ghost/status")).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "status": "unknown" }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_always_no_content() {
        let app = app().await;
        for _ in 0..2 {
            let request = Request::builder()
                .method("DELETE")
                .uri("/api/resumes/1")
                .body(Body::empty())
                .unwrap();
            let (status, _) = send(&app, request).await;
            assert_eq!(status, StatusCode::NO_CONTENT);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_and_list_job_profiles() {
        let app = app().await;
        let payload = json!({
            "id": "ignored",
            "title": "QA Engineer",
            "requiredSkills": ["Selenium"],
            "preferredSkills": [],
            "minimumExperience": 1,
            "description": "..."
        });
        let (status, body) = send(&app, json_req("POST", "/api/job-profiles", payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Value = serde_json::from_slice(&body).unwrap();
        let id = created["id"].as_str().unwrap();
        assert_ne!(id, "ignored");

        let (_, body) = send(&app, get_req("/api/job-profiles")).await;
        let profiles: Vec<Value> = serde_json::from_slice(&body).unwrap();
        assert!(profiles.iter().any(|p| p["id"] == id && p["title"] == "QA Engineer"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_csv_headers_and_body() {
        let app = app().await;
        let request = json_req(
            "POST",
            "/api/export",
            json!({ "resumeIds": ["1", "missing-id"], "format": "csv" }),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("ats_analysis_export.csv"));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            "john_doe_resume.pdf,87,completed\nUnknown,0,unknown"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_route() {
        let app = app().await;
        let (_, body) = send(&app, upload_req("a.pdf", "application/pdf", "frontend")).await;
        let receipt: Value = serde_json::from_slice(&body).unwrap();
        let job_id = receipt["jobId"].as_str().unwrap();

        let cancel = Request::builder()
            .method("POST")
            .uri(format!("/api/analysis/{job_id}/cancel"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, cancel).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["cancelled"], true);

        let (_, body) = send(&app, get_req(&format!("/api/analysis/{job_id}/status"))).await;
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "failed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_upload_reports_each_file() {
        let app = app().await;
        let request = multipart_req(
            "/api/batch-upload",
            "resumes",
            &[
                ("a.pdf", "application/pdf"),
                ("notes.txt", "text/plain"),
                ("b.docx", "application/octet-stream"),
            ],
            "backend",
        );
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        let receipt: Value = serde_json::from_slice(&body).unwrap();
        let submitted = receipt["submitted"].as_array().unwrap();
        assert_eq!(submitted.len(), 2);
        assert!(submitted.iter().all(|r| r["jobId"].is_string() && r["resumeId"].is_string()));
        assert_eq!(receipt["rejected"][0]["filename"], "notes.txt");
        assert!(receipt["rejected"][0]["reason"].is_string());

        let (_, body) = send(&app, get_req("/api/resumes")).await;
        let resumes: Vec<Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(resumes.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_upload_without_files_is_bad_request() {
        let app = app().await;
        let request = multipart_req("/api/batch-upload", "resumes", &[], "backend");
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_json_is_pretty_array() {
        let app = app().await;
        let request = json_req(
            "POST",
            "/api/export",
            json!({ "resumeIds": ["2", "missing-id"], "format": "json" }),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("ats_analysis_export.json"));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains('\n'));
        let rows: Vec<Value> = serde_json::from_str(text).unwrap();
        assert_eq!(
            rows,
            vec![
                json!({ "filename": "jane_smith_resume.pdf", "score": 92, "status": "completed" }),
                json!({ "filename": "Unknown", "score": 0, "status": "unknown" }),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_unsupported_format_is_bad_request() {
        let app = app().await;
        let request = json_req(
            "POST",
            "/api/export",
            json!({ "resumeIds": ["1"], "format": "excel" }),
        );
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
        assert!(value["error"]["message"].as_str().unwrap().contains("excel"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_job_profile_malformed_body_is_bad_request() {
        let app = app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/job-profiles")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test(start_paused = true)]
    async fn test_list_resumes_paginates() {
        let app = app().await;
        let ids = |body: Vec<u8>| -> Vec<String> {
            let resumes: Vec<Value> = serde_json::from_slice(&body).unwrap();
            resumes
                .iter()
                .map(|r| r["id"].as_str().unwrap().to_string())
                .collect()
        };

        let (status, body) = send(&app, get_req("/api/resumes?limit=1&offset=0")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(body), vec!["1"]);

        let (_, body) = send(&app, get_req("/api/resumes?offset=1")).await;
        assert_eq!(ids(body), vec!["2"]);

        let (_, body) = send(&app, get_req("/api/resumes?limit=10&offset=5")).await;
        assert!(ids(body).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_list_resumes_bad_query_is_bad_request() {
        let app = app().await;
        let (status, body) = send(&app, get_req("/api/resumes?limit=-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
    }
}
