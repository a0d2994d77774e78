//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! the /api/v1/* endpoints using `tower::ServiceExt::oneshot()`.
//! No binary spawn, no network port.

use reservoir_twin::api::{create_app, DashboardState};
use reservoir_twin::config::TwinConfig;
use reservoir_twin::ingest::SyntheticGenerator;
use reservoir_twin::types::{DatasetOrigin, LoadedDataset};

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use tower::ServiceExt;

const BOUNDARY: &str = "twin-test-boundary";

fn test_config() -> TwinConfig {
    let mut config = TwinConfig::default();
    config.synthetic.seed = Some(42);
    config
}

fn state_with(config: TwinConfig) -> DashboardState {
    let dataset = SyntheticGenerator::new(&config.synthetic)
        .unwrap()
        .generate()
        .unwrap();
    let loaded = LoadedDataset::new(
        dataset,
        DatasetOrigin::Synthetic {
            reason: "Data source not found: Data/missing.csv".into(),
        },
    );
    DashboardState::new(config, loaded)
}

fn create_test_state() -> DashboardState {
    state_with(test_config())
}

async fn send(state: &DashboardState, req: Request<Body>) -> Response<Body> {
    create_app(state.clone()).oneshot(req).await.unwrap()
}

async fn get(state: &DashboardState, uri: &str) -> Response<Body> {
    send(state, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn json_body(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_request(file_name: Option<&str>, content: &str) -> Request<Body> {
    let disposition = match file_name {
        Some(name) => format!("form-data; name=\"file\"; filename=\"{name}\""),
        None => "form-data; name=\"note\"".to_string(),
    };
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n--{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/api/v1/dataset")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn upload(state: &DashboardState, file_name: &str, content: &str) -> Response<Body> {
    send(state, multipart_request(Some(file_name), content)).await
}

/// All v1 GET endpoints should return 200.
#[tokio::test]
async fn test_v1_get_endpoints_return_200() {
    let state = create_test_state();
    let endpoints = [
        "/api/v1/health",
        "/api/v1/dashboard",
        "/api/v1/metrics",
        "/api/v1/surface",
        "/api/v1/decline",
        "/api/v1/well-log",
        "/api/v1/dataset",
        "/api/v1/controls",
        "/health",
    ];

    for endpoint in &endpoints {
        let resp = get(&state, endpoint).await;
        assert!(
            resp.status().is_success(),
            "GET {endpoint} returned status {}",
            resp.status()
        );
    }
}

/// Every JSON endpoint wraps its payload in the envelope.
#[tokio::test]
async fn test_v1_responses_use_envelope() {
    let state = create_test_state();
    let v = json_body(get(&state, "/api/v1/metrics").await).await;
    assert!(v.get("data").is_some());
    assert!(v["meta"]["timestamp"].is_string());
    assert!(v["meta"]["version"].is_string());
}

#[tokio::test]
async fn test_dashboard_defaults_to_first_year() {
    let state = create_test_state();
    let v = json_body(get(&state, "/api/v1/dashboard").await).await;
    let data = &v["data"];

    assert_eq!(data["year"], 2026);
    assert_eq!(data["metrics"]["field_pressure_psi"], 3200);
    assert_eq!(data["metrics"]["field_pressure_label"], "3200 psi");
    assert_eq!(data["metrics"]["recovery_factor"], "34.2%");
    assert_eq!(data["dataset_origin"]["kind"], "synthetic");
    assert_eq!(data["well_log"]["table"]["rows"].as_array().unwrap().len(), 15);
    assert_eq!(data["well_log"]["table"]["total_rows"], 100);
    assert_eq!(data["surface"]["figure"]["data"][0]["type"], "surface");
    assert_eq!(data["decline"]["figure"]["data"][0]["x"].as_array().unwrap().len(), 16);
}

#[tokio::test]
async fn test_dashboard_for_last_year() {
    let state = create_test_state();
    let v = json_body(get(&state, "/api/v1/dashboard?year=2035").await).await;
    assert_eq!(v["data"]["metrics"]["field_pressure_psi"], 3065);
    assert_eq!(v["data"]["metrics"]["pressure_delta_label"], "-135 psi");
    assert_eq!(v["data"]["decline"]["figure"]["layout"]["shapes"][0]["x0"], 2035.0);
}

#[tokio::test]
async fn test_configured_default_year() {
    let mut config = test_config();
    config.forecast.default_year = 2028;
    config.display.table_preview_rows = 10;
    config.display.recovery_factor = "32.5%".into();
    let state = state_with(config);

    let v = json_body(get(&state, "/api/v1/dashboard").await).await;
    assert_eq!(v["data"]["year"], 2028);
    assert_eq!(v["data"]["metrics"]["field_pressure_psi"], 3170);
    assert_eq!(v["data"]["metrics"]["recovery_factor"], "32.5%");
    assert_eq!(v["data"]["well_log"]["table"]["rows"].as_array().unwrap().len(), 10);

    let controls = json_body(get(&state, "/api/v1/controls").await).await;
    assert_eq!(controls["data"]["forecast_year"]["default"], 2028);
}

/// Out-of-range or non-integer years are rejected on every year-aware view.
#[tokio::test]
async fn test_invalid_year_returns_400() {
    let state = create_test_state();
    for path in ["dashboard", "metrics", "surface", "decline"] {
        for year in ["2025", "2036", "next", "2030.0"] {
            let resp = get(&state, &format!("/api/v1/{path}?year={year}")).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{path}?year={year}");
            let v = json_body(resp).await;
            assert_eq!(v["error"]["code"], "BAD_REQUEST");
        }
    }
}

/// A repeated `year` parameter gets the envelope error, not a plain-text rejection.
#[tokio::test]
async fn test_repeated_year_returns_400_envelope() {
    let state = create_test_state();
    let resp = get(&state, "/api/v1/dashboard?year=2030&year=2031").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let v = json_body(resp).await;
    assert_eq!(v["error"]["code"], "BAD_REQUEST");
    assert!(v["error"]["message"].as_str().unwrap().contains("at most once"));

    let resp = get(&state, "/api/v1/metrics?unrelated=1&year=2031").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["data"]["target_year"], 2031);
}

#[tokio::test]
async fn test_upload_csv_replaces_dataset() {
    let state = create_test_state();
    let resp = upload(&state, "field.csv", "Depth,GR\n2500,61.5\n2501,62.0\n2502,63.5\n").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v = json_body(resp).await;
    assert_eq!(v["data"]["origin"]["kind"], "uploaded");
    assert_eq!(v["data"]["is_fallback"], false);

    let v = json_body(get(&state, "/api/v1/dashboard?year=2030").await).await;
    assert_eq!(v["data"]["dataset_origin"]["file_name"], "field.csv");
    assert_eq!(v["data"]["well_log"]["table"]["total_rows"], 3);
    assert_eq!(v["data"]["well_log"]["figure"]["data"][0]["x"][0], 61.5);
    assert_eq!(v["data"]["well_log"]["figure"]["data"][0]["y"][0], 2500.0);
}

#[tokio::test]
async fn test_upload_las() {
    let state = create_test_state();
    let las = "~V\n VERS. 2.0 :\n WRAP. NO :\n~W\n NULL. -999.25 :\n~C\n DEPT.M :\n GR.GAPI :\n~A\n3000.0 80.1\n3000.5 -999.25\n3001.0 82.4\n";
    let resp = upload(&state, "F-9A.LAS", las).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let v = json_body(get(&state, "/api/v1/well-log").await).await;
    assert_eq!(v["data"]["table"]["columns"][0], "DEPT (M)");
    assert!(v["data"]["table"]["rows"][1][1].is_null());
}

/// Failed uploads report their error and leave the active dataset alone.
#[tokio::test]
async fn test_bad_uploads_keep_previous_dataset() {
    let state = create_test_state();

    let resp = upload(&state, "broken.csv", "Depth\n2000\n").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(resp).await["error"]["code"], "PARSE_ERROR");

    let resp = upload(&state, "well.xlsx", "PK\u{3}\u{4}").await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json_body(resp).await["error"]["code"], "UNSUPPORTED_FORMAT");

    let v = json_body(get(&state, "/api/v1/dataset").await).await;
    assert_eq!(v["data"]["origin"]["kind"], "synthetic");
    assert_eq!(v["data"]["is_fallback"], true);
    assert_eq!(v["data"]["summary"]["rows"], 100);
}

#[tokio::test]
async fn test_upload_without_file_part() {
    let state = create_test_state();
    let resp = send(&state, multipart_request(None, "hello")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_over_limit() {
    let mut config = test_config();
    config.server.max_upload_bytes = 64;
    let state = state_with(config);

    let big = format!("Depth,GR\n{}", "2000,50\n".repeat(64));
    let resp = upload(&state, "big.csv", &big).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_delete_reverts_to_default() {
    let state = create_test_state();
    let resp = upload(&state, "field.csv", "Depth,GR\n1,2\n").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(
        &state,
        Request::builder()
            .method("DELETE")
            .uri("/api/v1/dataset")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v = json_body(resp).await;
    assert_eq!(v["data"]["origin"]["kind"], "synthetic");
}

#[tokio::test]
async fn test_health_reports_fallback() {
    let state = create_test_state();
    let v = json_body(get(&state, "/health").await).await;
    assert_eq!(v["status"], "ok");
    assert_eq!(v["dataset_fallback"], true);
}

/// Unknown paths fall back to the embedded dashboard page.
#[tokio::test]
async fn test_spa_fallback_serves_html() {
    let state = create_test_state();
    let resp = get(&state, "/some/client/route").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "{content_type}");
}

#[tokio::test]
async fn test_static_script_is_served() {
    let state = create_test_state();
    let resp = get(&state, "/dashboard.js").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.contains("javascript"), "{content_type}");
}
