use axum::http::StatusCode;
use http_body_util::BodyExt;
use opsdiag_server::state::AppState;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app(dir: &TempDir) -> axum::Router {
    opsdiag_server::build_router(dir.path().to_path_buf())
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Send a POST request with a JSON body via `oneshot` and return (status, parsed JSON body).
async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn approx(value: &serde_json::Value, expected: f64) -> bool {
    value.as_f64().is_some_and(|v| (v - expected).abs() < 1e-6)
}

// ---------------------------------------------------------------------------
// Health / assessment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn assessment_falls_back_to_bundled_sample() {
    let dir = TempDir::new().unwrap();
    let req = axum::http::Request::builder()
        .uri("/api/assessment")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app(&dir).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["x-document-origin"].to_str().unwrap(),
        "bundled sample"
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["company"]["name"], "Northwind Health");
    assert_eq!(json["functions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn explicit_document_overrides_sources() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("doc.json");
    std::fs::write(&doc, r#"{"company": {"name": "Override Co"}}"#).unwrap();
    let router = opsdiag_server::build_router_with(
        AppState::new(dir.path().to_path_buf()).with_document(Some(doc)),
    );

    let (status, body) = get(router, "/api/assessment").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company"]["name"], "Override Co");
}

#[tokio::test]
async fn unreadable_explicit_document_is_500() {
    let dir = TempDir::new().unwrap();
    let router = opsdiag_server::build_router_with(
        AppState::new(dir.path().to_path_buf()).with_document(Some(dir.path().join("nope.json"))),
    );
    let (status, body) = get(router, "/api/assessment").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

// ---------------------------------------------------------------------------
// Roadmap / rollup / ranking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn roadmap_covers_every_horizon_year() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api/roadmap").await;
    assert_eq!(status, StatusCode::OK);

    let years = body["years"].as_object().unwrap();
    for year in ["2026", "2027", "2028"] {
        assert!(years.contains_key(year), "missing {year}");
    }
    assert_eq!(years["2026"]["productivity"].as_array().unwrap().len(), 3);
    assert_eq!(years["2028"]["ai"].as_array().unwrap().len(), 1);
    assert_eq!(body["summary"]["first_year"], 2026);
    assert!(approx(&body["summary"]["productivity_ftes"], 20.0));
}

#[tokio::test]
async fn rollup_defaults_to_first_year_productivity() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api/roadmap/rollup").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2026);
    assert_eq!(body["lever"], "Productivity");

    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["key"], "customer_success");
    assert_eq!(entries[1]["key"], "support");
    assert!(approx(&entries[1]["total_ftes"], 7.5));
    assert!(approx(&body["grand_total"], 20.0));
}

#[tokio::test]
async fn rollup_offshoring_groups_roles_by_function() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api/roadmap/rollup?lever=offshoring&year=2026").await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries[0]["key"], "support");
    assert_eq!(entries[0]["count"], 2);
    assert!(approx(&entries[0]["total_ftes"], 52.2));
}

#[tokio::test]
async fn rollup_for_empty_year_is_empty() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api/roadmap/rollup?year=2028").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["entries"].as_array().unwrap().is_empty());
    assert!(approx(&body["grand_total"], 0.0));
}

#[tokio::test]
async fn rollup_rejects_unknown_lever() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api/roadmap/rollup?lever=ai").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("ai"));
}

#[tokio::test]
async fn ranking_honors_limit() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api/ranking?limit=3").await;
    assert_eq!(status, StatusCode::OK);
    let ranked = body.as_array().unwrap();
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0]["rank"], 1);
    assert!(approx(&ranked[0]["item"]["impact_ftes"], 45.0));
    assert_eq!(ranked[0]["category"], "Near-term");
}

#[tokio::test]
async fn ranking_defaults_to_config_top_n() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api/ranking").await;
    assert_eq!(status, StatusCode::OK);
    // Sample has fewer role items than the default top_n.
    assert_eq!(body.as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn ranking_rejects_zero_limit() {
    let dir = TempDir::new().unwrap();
    let (status, _) = get(app(&dir), "/api/ranking?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn feedback_round_trip() {
    let dir = TempDir::new().unwrap();
    let (status, created) = post_json(
        app(&dir),
        "/api/feedback",
        serde_json::json!({
            "client": "acme-health",
            "product": "enhanced",
            "kind": "bug",
            "summary": "Rollup chart is cut off",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "F1");

    let (status, list) = get(app(&dir), "/api/feedback").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["summary"], "Rollup chart is cut off");

    let (status, one) = get(app(&dir), "/api/feedback/F1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["kind"], "bug");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_feedback_posts_are_all_stored() {
    let dir = TempDir::new().unwrap();
    let router = app(&dir);
    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..16 {
        let router = router.clone();
        tasks.spawn(async move {
            post_json(
                router,
                "/api/feedback",
                serde_json::json!({
                    "client": "acme",
                    "product": "basic",
                    "summary": format!("Report {i}"),
                }),
            )
            .await
        });
    }
    let mut ids = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (status, created) = joined.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        ids.push(created["id"].as_str().unwrap().to_string());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);

    let (_, list) = get(app(&dir), "/api/feedback").await;
    assert_eq!(list.as_array().unwrap().len(), 16);
}

#[tokio::test]
async fn feedback_kind_defaults_to_general() {
    let dir = TempDir::new().unwrap();
    let (status, created) = post_json(
        app(&dir),
        "/api/feedback",
        serde_json::json!({
            "client": "acme",
            "product": "basic",
            "summary": "Nice work",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["kind"], "general");
}

#[tokio::test]
async fn feedback_with_bad_client_is_400_and_not_stored() {
    let dir = TempDir::new().unwrap();
    let (status, _) = post_json(
        app(&dir),
        "/api/feedback",
        serde_json::json!({
            "client": "Acme Health",
            "product": "basic",
            "summary": "Hello",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = get(app(&dir), "/api/feedback").await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn feedback_with_unknown_product_is_400() {
    let dir = TempDir::new().unwrap();
    let (status, _) = post_json(
        app(&dir),
        "/api/feedback",
        serde_json::json!({
            "client": "acme",
            "product": "platinum",
            "summary": "Hello",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_feedback_is_404() {
    let dir = TempDir::new().unwrap();
    let (status, _) = get(app(&dir), "/api/feedback/F42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Diagnostics registry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn diagnostics_empty_by_default() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(app(&dir), "/api/diagnostics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn diagnostics_filter_by_client() {
    use opsdiag_core::registry::{register, NewDiagnostic};
    use opsdiag_core::types::Product;

    let dir = TempDir::new().unwrap();
    for (client, product) in [
        ("acme", Product::Basic),
        ("globex", Product::Agentic),
        ("acme", Product::Enhanced),
    ] {
        register(
            dir.path(),
            NewDiagnostic {
                client: client.to_string(),
                product,
                title: None,
                url: None,
            },
        )
        .unwrap();
    }

    let (_, all) = get(app(&dir), "/api/diagnostics").await;
    assert_eq!(all.as_array().unwrap().len(), 3);
    let (_, acme) = get(app(&dir), "/api/diagnostics?client=acme").await;
    assert_eq!(acme.as_array().unwrap().len(), 2);
}
