//! Integration tests for the job catalog endpoints
//!
//! Covered routes:
//! - GET /api/jobs - List all jobs
//! - POST /api/jobs - Create a job
//! - GET /api/jobs/{id} - Fetch one job
//! - PUT /api/jobs/{id} - Full update
//! - DELETE /api/jobs/{id} - Delete (idempotent)
//! - GET /api/jobs/search - Keyword search
//! - GET /api/jobs/location - Location filter

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use core_jd::{AuthConfig, allowed_origins};
use data_model_jd::db::DbPool;
use data_model_jd::models::{Job, JobPayload};
use data_model_jd::test_helpers::{clean_test_db, try_test_db_pool};
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;

use api_jd::routes::router;

/// Ensures tests that need sequential access work correctly.
static TEST_MUTEX: Mutex<()> = Mutex::const_new(());

/// Helper to create a router over the given pool (does NOT clean the DB)
fn test_router(pool: DbPool) -> Router {
    let auth_config = AuthConfig {
        token_secret: "integration-test-token-secret".to_string(),
        token_ttl_seconds: 3600,
    };
    router(pool.clone(), auth_config, allowed_origins()).with_state(pool)
}

/// Helper to parse JSON response body
async fn response_json<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &impl serde::Serialize) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn backend_job() -> JobPayload {
    JobPayload {
        title: "Backend Engineer".to_string(),
        company: "Acme GmbH".to_string(),
        location: "Berlin, Germany".to_string(),
        job_type: Some("Full-time".to_string()),
        skills: Some("rust,tokio,postgres".to_string()),
        salary: Some("80k-100k EUR".to_string()),
        ..Default::default()
    }
}

//
// POST /api/jobs tests
//

#[tokio::test]
async fn test_create_job_returns_the_stored_row() {
    let _guard = TEST_MUTEX.lock().await;
    let Some(pool) = try_test_db_pool().await else {
        return;
    };
    clean_test_db(&pool).await;

    let app = test_router(pool.clone());

    let response = app
        .oneshot(json_request("POST", "/api/jobs", &backend_job()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response_json(response.into_body()).await;
    assert!(body["id"].is_i64());
    assert_eq!(body["title"], "Backend Engineer");
    assert_eq!(body["company"], "Acme GmbH");
    // Wire format is camelCase and the server stamps the posting date
    assert!(body["postedDate"].is_string());
    assert_eq!(body["companyLogo"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_create_job_validates_required_fields_in_order() {
    let _guard = TEST_MUTEX.lock().await;
    let Some(pool) = try_test_db_pool().await else {
        return;
    };
    clean_test_db(&pool).await;

    let app = test_router(pool.clone());

    let cases = [
        (serde_json::json!({}), "Job title is required"),
        (
            serde_json::json!({"title": "  "}),
            "Job title is required",
        ),
        (
            serde_json::json!({"title": "Dev"}),
            "Company name is required",
        ),
        (
            serde_json::json!({"title": "Dev", "company": "Acme"}),
            "Location is required",
        ),
    ];

    for (payload, message) in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/jobs", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response_json(response.into_body()).await;
        assert_eq!(body["error"], message);
    }

    // Nothing was stored
    let response = app.oneshot(get("/api/jobs")).await.unwrap();
    let jobs: Vec<Job> = response_json(response.into_body()).await;
    assert!(jobs.is_empty());
}

//
// GET /api/jobs and GET /api/jobs/{id} tests
//

#[tokio::test]
async fn test_list_jobs_returns_all_rows() {
    let _guard = TEST_MUTEX.lock().await;
    let Some(pool) = try_test_db_pool().await else {
        return;
    };
    clean_test_db(&pool).await;

    let app = test_router(pool.clone());

    let response = app.clone().oneshot(get("/api/jobs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let jobs: Vec<Job> = response_json(response.into_body()).await;
    assert!(jobs.is_empty());

    for title in ["First", "Second"] {
        let payload = JobPayload {
            title: title.to_string(),
            ..backend_job()
        };
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/jobs", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/api/jobs")).await.unwrap();
    let jobs: Vec<Job> = response_json(response.into_body()).await;
    assert_eq!(jobs.len(), 2);
}

#[tokio::test]
async fn test_get_job_by_id_and_missing_id() {
    let _guard = TEST_MUTEX.lock().await;
    let Some(pool) = try_test_db_pool().await else {
        return;
    };
    clean_test_db(&pool).await;

    let app = test_router(pool.clone());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/jobs", &backend_job()))
        .await
        .unwrap();
    let created: Job = response_json(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/api/jobs/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Job = response_json(response.into_body()).await;
    assert_eq!(fetched, created);

    let response = app.oneshot(get("/api/jobs/999999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Job not found");
}

//
// PUT /api/jobs/{id} tests
//

#[tokio::test]
async fn test_update_overwrites_fields_but_not_posted_date() {
    let _guard = TEST_MUTEX.lock().await;
    let Some(pool) = try_test_db_pool().await else {
        return;
    };
    clean_test_db(&pool).await;

    let app = test_router(pool.clone());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/jobs", &backend_job()))
        .await
        .unwrap();
    let created: Job = response_json(response.into_body()).await;

    // The replacement payload drops jobType/skills/salary entirely
    let replacement = JobPayload {
        title: "Platform Engineer".to_string(),
        company: "Acme GmbH".to_string(),
        location: "Remote".to_string(),
        ..Default::default()
    };
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/jobs/{}", created.id),
            &replacement,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Job = response_json(response.into_body()).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Platform Engineer");
    assert_eq!(updated.location, "Remote");
    // Omitted optional fields are cleared, not preserved
    assert_eq!(updated.job_type, None);
    assert_eq!(updated.skills, None);
    assert_eq!(updated.salary, None);
    // The posting date survives every update
    assert_eq!(updated.posted_date, created.posted_date);
}

#[tokio::test]
async fn test_update_missing_job_is_not_found() {
    let _guard = TEST_MUTEX.lock().await;
    let Some(pool) = try_test_db_pool().await else {
        return;
    };
    clean_test_db(&pool).await;

    let app = test_router(pool.clone());

    let response = app
        .oneshot(json_request("PUT", "/api/jobs/424242", &backend_job()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Job not found");
}

#[tokio::test]
async fn test_update_rejects_blank_required_fields() {
    let _guard = TEST_MUTEX.lock().await;
    let Some(pool) = try_test_db_pool().await else {
        return;
    };
    clean_test_db(&pool).await;

    let app = test_router(pool.clone());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/jobs", &backend_job()))
        .await
        .unwrap();
    let created: Job = response_json(response.into_body()).await;

    let invalid = JobPayload {
        company: "   ".to_string(),
        ..backend_job()
    };
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/jobs/{}", created.id),
            &invalid,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Company name is required");
}

//
// DELETE /api/jobs/{id} tests
//

#[tokio::test]
async fn test_delete_job_is_idempotent() {
    let _guard = TEST_MUTEX.lock().await;
    let Some(pool) = try_test_db_pool().await else {
        return;
    };
    clean_test_db(&pool).await;

    let app = test_router(pool.clone());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/jobs", &backend_job()))
        .await
        .unwrap();
    let created: Job = response_json(response.into_body()).await;

    let delete_uri = format!("/api/jobs/{}", created.id);
    let delete_request = || {
        Request::builder()
            .method("DELETE")
            .uri(delete_uri.as_str())
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(get(&delete_uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting an id that is already gone still answers 204
    let response = app.oneshot(delete_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

//
// GET /api/jobs/search and GET /api/jobs/location tests
//

#[tokio::test]
async fn test_search_matches_any_text_column_case_insensitively() {
    let _guard = TEST_MUTEX.lock().await;
    let Some(pool) = try_test_db_pool().await else {
        return;
    };
    clean_test_db(&pool).await;

    let app = test_router(pool.clone());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/jobs", &backend_job()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let java_job = JobPayload {
        title: "Java Developer".to_string(),
        company: "Beans Inc".to_string(),
        location: "Munich, Germany".to_string(),
        skills: Some("java,spring".to_string()),
        ..Default::default()
    };
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/jobs", &java_job))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let cases = [
        ("TOKIO", 1),    // skills column, case-insensitive
        ("beans", 1),    // company
        ("engineer", 1), // title
        ("germany", 2),  // location, both rows
        ("cobol", 0),
    ];
    for (keyword, expected) in cases {
        let uri = format!("/api/jobs/search?keyword={}", urlencoding::encode(keyword));
        let response = app.clone().oneshot(get(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let jobs: Vec<Job> = response_json(response.into_body()).await;
        assert_eq!(jobs.len(), expected, "keyword {keyword:?}");
    }
}

#[tokio::test]
async fn test_location_filter_is_substring_match() {
    let _guard = TEST_MUTEX.lock().await;
    let Some(pool) = try_test_db_pool().await else {
        return;
    };
    clean_test_db(&pool).await;

    let app = test_router(pool.clone());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/jobs", &backend_job()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let remote_job = JobPayload {
        title: "Support Engineer".to_string(),
        company: "Acme GmbH".to_string(),
        location: "Remote".to_string(),
        ..Default::default()
    };
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/jobs", &remote_job))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/jobs/location?location={}", urlencoding::encode("berlin"));
    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    let jobs: Vec<Job> = response_json(response.into_body()).await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].location, "Berlin, Germany");

    let uri = format!("/api/jobs/location?location={}", urlencoding::encode("REMOTE"));
    let response = app.oneshot(get(&uri)).await.unwrap();
    let jobs: Vec<Job> = response_json(response.into_body()).await;
    assert_eq!(jobs.len(), 1);
}
