pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::extraction::handlers as extraction;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction API
        .route("/api/v1/extract", post(extraction::handle_extract))
        .route(
            "/api/v1/extract/upload",
            post(extraction::handle_upload).layer(DefaultBodyLimit::max(max_upload)),
        )
        // Resume API
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_replace_resume)
                .patch(resumes::handle_edit_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/export",
            get(export::handle_export_resume),
        )
        // Suggestions API
        .route(
            "/api/v1/resumes/:id/suggestions",
            get(suggestions::handle_get_suggestions),
        )
        .route(
            "/api/v1/resumes/:id/suggestions/apply",
            post(suggestions::handle_apply_suggestions),
        )
        .route("/api/v1/enhance", post(suggestions::handle_enhance))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::resumes::persistence::JsonDirPersistence;
    use crate::resumes::ResumeService;
    use crate::suggestions::MockSuggestionProvider;

    const JANE: &str = "Jane Smith\njane.smith@example.com\n(415) 555-0100\nSummary\nExperienced software engineer skilled in Python and React.\n";

    async fn test_state(dir: &Path) -> AppState {
        let config = Config {
            port: 0,
            rust_log: "debug".to_string(),
            storage_dir: dir.to_path_buf(),
            max_upload_bytes: 64 * 1024,
            suggestion_delay_ms: 0,
        };
        let persistence = Arc::new(JsonDirPersistence::new(dir));
        let resumes = ResumeService::load(persistence).await.unwrap();
        AppState {
            config,
            resumes: Arc::new(resumes),
            suggester: Arc::new(MockSuggestionProvider::default()),
        }
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn upload_request(file_name: &str, content: &str) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/plain\r\n\r\n{content}\r\n--{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/extract/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    /// Uploads `JANE` and returns the stored record's id.
    async fn upload_jane(state: &AppState) -> String {
        let response = build_router(state.clone())
            .oneshot(upload_request("jane.txt", JANE))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        json["resume"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()).await);

        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "resume-api");
    }

    #[tokio::test]
    async fn test_extract_preview_does_not_store() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;

        let response = build_router(state.clone())
            .oneshot(json_request(
                "POST",
                "/api/v1/extract",
                json!({ "raw_text": JANE, "file_name": "jane.txt" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["personalInfo"]["name"], "Jane Smith");
        assert_eq!(json["personalInfo"]["email"], "jane.smith@example.com");
        assert_eq!(json["fileName"], "jane.txt");
        assert!(state.resumes.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_extracts_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;

        let id = upload_jane(&state).await;
        let stored = state.resumes.get(&id).await.unwrap();
        assert_eq!(stored.personal_info.phone, "(415) 555-0100");
        assert!(stored.skills.contains(&"Python".to_string()));
        assert!(dir.path().join(format!("{id}.json")).exists());
    }

    #[tokio::test]
    async fn test_empty_upload_yields_blank_record() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;

        let response = build_router(state)
            .oneshot(upload_request("blank.txt", "  \n"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["resume"]["fileName"], "blank.txt");
        assert_eq!(json["resume"]["personalInfo"]["name"], "");
        assert_eq!(json["resume"]["experience"], json!([]));
    }

    #[tokio::test]
    async fn test_upload_ignores_byte_order_mark() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;

        let response = build_router(state)
            .oneshot(upload_request(
                "bom.txt",
                "\u{FEFF}Jane Smith\njane@example.com\nHobbies include chess\n",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["resume"]["personalInfo"]["name"], "Jane Smith");
        assert_eq!(json["resume"]["personalInfo"]["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()).await);

        let response = app
            .oneshot(upload_request("virus.exe", "MZ"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()).await);

        let huge = "a".repeat(128 * 1024);
        let response = app
            .oneshot(upload_request("big.txt", &huge))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_crud_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;
        let app = build_router(state.clone());

        // create blank
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/resumes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["persisted"], true);
        let id = created["resume"]["id"].as_str().unwrap().to_string();

        // replace
        let mut replacement = created["resume"].clone();
        replacement["summary"] = json!("Rewritten");
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/v1/resumes/{id}"),
                replacement,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let replaced = body_json(response).await;
        assert_eq!(replaced["resume"]["summary"], "Rewritten");
        assert_ne!(
            replaced["resume"]["lastModified"],
            created["resume"]["lastModified"]
        );

        // list
        let response = app.clone().oneshot(get("/api/v1/resumes")).await.unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed["count"], 1);
        assert_eq!(listed["resumes"][0]["summary"], "Rewritten");

        // delete
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/resumes/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!dir.path().join(format!("{id}.json")).exists());

        let response = app
            .oneshot(get(&format!("/api/v1/resumes/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_with_invalid_body_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()).await);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/resumes")
                    .body(Body::from("{ nope"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_duplicate_id_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;
        let id = upload_jane(&state).await;

        let response = build_router(state)
            .oneshot(json_request("POST", "/api/v1/resumes", json!({ "id": id })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_repeated_entry_ids_are_replaced_on_create_and_replace() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;
        let body = json!({
            "experience": [{ "id": "exp_same", "position": "A" }, { "id": "exp_same", "position": "B" }],
            "projects": [{ "id": "proj_same" }, { "id": "proj_same" }],
        });

        let response = build_router(state.clone())
            .oneshot(json_request("POST", "/api/v1/resumes", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        let id = json["resume"]["id"].as_str().unwrap().to_string();
        let experience = &json["resume"]["experience"];
        assert_eq!(experience[0]["id"], "exp_same");
        assert_ne!(experience[1]["id"], "exp_same");
        assert_ne!(json["resume"]["projects"][0]["id"], json["resume"]["projects"][1]["id"]);

        let response = build_router(state.clone())
            .oneshot(json_request("PUT", &format!("/api/v1/resumes/{id}"), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let experience = &json["resume"]["experience"];
        assert_eq!(experience[1]["position"], "B");
        assert_ne!(experience[0]["id"], experience[1]["id"]);
        assert_ne!(json["resume"]["projects"][0]["id"], json["resume"]["projects"][1]["id"]);
    }

    #[tokio::test]
    async fn test_patch_applies_editor_operations() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;
        let id = upload_jane(&state).await;

        let response = build_router(state.clone())
            .oneshot(json_request(
                "PATCH",
                &format!("/api/v1/resumes/{id}"),
                json!([
                    { "op": "set_skills", "value": "Rust, Go" },
                    { "op": "add_project" },
                    { "op": "update_project", "index": 0, "field": "technologies", "value": "Axum, Tokio" }
                ]),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["resume"]["skills"], json!(["Rust", "Go"]));
        assert_eq!(
            json["resume"]["projects"][0]["technologies"],
            json!(["Axum", "Tokio"])
        );

        let response = build_router(state)
            .oneshot(json_request(
                "PATCH",
                &format!("/api/v1/resumes/{id}"),
                json!([{ "op": "remove_education", "index": 5 }]),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_export_formats() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;
        let id = upload_jane(&state).await;
        let app = build_router(state);

        let response = app
            .clone()
            .oneshot(get(&format!("/api/v1/resumes/{id}/export?format=json")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane_Smith_resume.json\""
        );
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["id"], id.as_str());

        let response = app
            .clone()
            .oneshot(get(&format!("/api/v1/resumes/{id}/export?format=html")))
            .await
            .unwrap();
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(body_text(response).await.contains("<h1>Jane Smith</h1>"));

        let response = app
            .oneshot(get(&format!("/api/v1/resumes/{id}/export?format=pdf")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_suggestions_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;
        let id = upload_jane(&state).await;
        let app = build_router(state.clone());

        let response = app
            .clone()
            .oneshot(get(&format!("/api/v1/resumes/{id}/suggestions")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["suggestions"].as_array().unwrap().len(), 4);
        let summary = json["suggestions"][0]["suggested"].as_str().unwrap().to_string();

        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/resumes/{id}/suggestions/apply"),
                json!({ "suggestion_ids": ["1"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["applied"], json!(["1"]));
        assert_eq!(json["resume"]["summary"], summary.as_str());
        assert_eq!(state.resumes.get(&id).await.unwrap().summary, summary);
    }

    #[tokio::test]
    async fn test_apply_no_suggestions_leaves_record() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;
        let id = upload_jane(&state).await;
        let before = state.resumes.get(&id).await.unwrap();

        let response = build_router(state.clone())
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/resumes/{id}/suggestions/apply"),
                json!({ "suggestion_ids": [] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.resumes.get(&id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_enhance_section() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()).await);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/enhance",
                json!({ "section": "summary", "content": "Builds APIs." }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["section"], "summary");
        assert_eq!(json["enhanced_content"], "[Enhanced] Builds APIs.");
    }

    #[tokio::test]
    async fn test_saved_resumes_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let id = upload_jane(&test_state(dir.path()).await).await;

        let restarted = test_state(dir.path()).await;
        let record = restarted.resumes.get(&id).await.unwrap();
        assert_eq!(record.personal_info.name, "Jane Smith");
    }
}
