use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use qrgen::domain::config::{AppConfig, SslConfig};
use qrgen_server::Server;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

fn server(archive: &TempDir) -> Server {
    let mut cfg = AppConfig::default();
    cfg.archive.dir = archive.path().to_path_buf();
    Server::builder().config(cfg).port(0).build().expect("server build")
}

async fn get(server: &Server, path: &str) -> (StatusCode, Vec<u8>) {
    let response =
        server.app().oneshot(Request::get(path).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    (status, to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec())
}

#[test]
fn builder_registers_generator_slice() {
    let archive = tempfile::tempdir().unwrap();
    let server = server(&archive);

    assert_eq!(server.state().config.server.port, 0);
    assert!(server.state().slice_names().any(|name| name.ends_with("Generator")));
}

#[tokio::test]
async fn serves_index_health_and_docs() {
    let archive = tempfile::tempdir().unwrap();
    let server = server(&archive);

    let (status, body) = get(&server, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&body).contains("QR Code Generator"));

    let (status, body) = get(&server, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "up");

    let (status, _) = get(&server, "/api").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn preview_round_trips_through_full_stack() {
    let archive = tempfile::tempdir().unwrap();
    let request = Request::post("/generate-preview")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"link":"https://example.com","style":{"fillColor":"navy"}}"#))
        .unwrap();

    let response = server(&archive).app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert!(body["image"].as_str().unwrap().starts_with("data:image/png;base64,"));
}

#[test]
fn missing_tls_files_fail_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = AppConfig::default();
    cfg.server.ssl =
        Some(SslConfig { cert: dir.path().join("cert.pem"), key: dir.path().join("key.pem") });

    let err = Server::builder().config(cfg).build().unwrap_err();
    assert!(err.to_string().contains("SSL certificate not found"));
}
