#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use qrgen_generator::server::router;
use qrgen_kernel::domain::config::AppConfig;
use qrgen_kernel::server::ApiState;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

fn app(archive: &TempDir) -> Router {
    let mut config = AppConfig::default();
    config.archive.dir = archive.path().to_path_buf();

    let slice = qrgen_generator::init(&config).expect("generator init");
    let state = ApiState::builder().config(config).register_slice(slice).build().expect("state");

    let (router, _) = router().split_for_parts();
    router.with_state(state)
}

fn post(path: &str, body: impl Into<Body>) -> Request<Body> {
    Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn preview_returns_png_data_uri() {
    let archive = tempfile::tempdir().unwrap();
    let body = json!({ "link": "https://example.com", "style": { "boxSize": 5, "border": 2 } });

    let response = app(&archive).oneshot(post("/generate-preview", body.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let uri = body["image"].as_str().expect("image field");
    let encoded = uri.strip_prefix("data:image/png;base64,").expect("data uri prefix");
    let png = STANDARD.decode(encoded).expect("valid base64");
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));

    assert_eq!(std::fs::read_dir(archive.path()).unwrap().count(), 0, "preview never archives");
}

#[tokio::test]
async fn preview_without_style_uses_default_geometry() {
    let archive = tempfile::tempdir().unwrap();
    let body = json!({ "link": "hello" });

    let response = app(&archive).oneshot(post("/generate-preview", body.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let encoded = body["image"]
        .as_str()
        .and_then(|uri| uri.strip_prefix("data:image/png;base64,"))
        .expect("png data uri");
    let png = STANDARD.decode(encoded).expect("valid base64");
    assert!(!png.is_empty());

    // Version 1 is 21 modules; default border is 4 modules of 10 px.
    let decoded = image::load_from_memory(&png).expect("decodable png");
    assert_eq!(decoded.width(), (21 + 8) * 10);
    assert_eq!(decoded.height(), decoded.width());
}

#[tokio::test]
async fn generate_returns_attachment_and_archives_it() {
    let archive = tempfile::tempdir().unwrap();

    let response =
        app(&archive).oneshot(post("/generate", json!({ "link": "hello" }).to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_owned();
    let file_name = disposition
        .strip_prefix("attachment; filename=\"")
        .and_then(|rest| rest.strip_suffix('"'))
        .expect("attachment disposition");
    let stamp = file_name.strip_prefix("qr_").and_then(|s| s.strip_suffix(".png")).unwrap();
    assert_eq!(stamp.len(), 15);
    assert!(stamp.chars().enumerate().all(|(i, c)| if i == 8 { c == '_' } else { c.is_ascii_digit() }));

    let png = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let archived = std::fs::read(archive.path().join(file_name)).expect("archived copy");
    assert_eq!(archived, png.to_vec());
}

#[tokio::test]
async fn blank_link_is_a_bad_request() {
    let archive = tempfile::tempdir().unwrap();

    for path in ["/generate", "/generate-preview"] {
        for body in [json!({ "link": "   " }), json!({}), json!({ "style": { "boxSize": 8 } })] {
            let response = app(&archive).oneshot(post(path, body.to_string())).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path} {body}");
            assert_eq!(json_body(response).await, json!({ "error": "Please provide a link or text" }));
        }
    }
}

#[tokio::test]
async fn unknown_color_is_a_server_error() {
    let archive = tempfile::tempdir().unwrap();
    let body = json!({ "link": "hello", "style": { "fillColor": "definitely-not-a-color" } });

    let response = app(&archive).oneshot(post("/generate", body.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "unknown color specifier: 'definitely-not-a-color'" })
    );
    assert_eq!(std::fs::read_dir(archive.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn malformed_json_is_a_server_error() {
    let archive = tempfile::tempdir().unwrap();

    let response = app(&archive).oneshot(post("/generate-preview", "{\"link\":")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
}

#[tokio::test]
async fn null_link_and_empty_body_are_server_errors() {
    let archive = tempfile::tempdir().unwrap();

    for body in [json!({ "link": null }).to_string(), String::new()] {
        let response = app(&archive).oneshot(post("/generate", body.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{body:?}");
    }

    let response = app(&archive).oneshot(post("/generate-preview", "null")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_style_values_still_render() {
    let archive = tempfile::tempdir().unwrap();
    let body = json!({ "link": "hello", "style": { "boxSize": "huge", "border": -4 } });

    let response = app(&archive).oneshot(post("/generate-preview", body.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn generate_without_registered_slice_fails() {
    let state = ApiState::builder().config(AppConfig::default()).build().unwrap();
    let (router, _) = router().split_for_parts();
    let app = router.with_state(state);

    let response = app.oneshot(post("/generate", json!({ "link": "x" }).to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
