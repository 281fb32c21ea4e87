use super::ApiState;
use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use qrgen_derive::{api_handler, api_model};
use qrgen_domain::constants::SYSTEM_TAG;

const NO_CACHE: [(header::HeaderName, &str); 2] = [
    (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
    (header::PRAGMA, "no-cache"),
];

#[api_model]
/// Liveness report
struct HealthReport {
    /// Always `up` while the process serves requests
    status: &'static str,
    /// Server crate version
    version: &'static str,
    /// Seconds since the server state was built
    uptime: u64,
    /// Number of registered feature slices
    slices: usize,
}

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Liveness and uptime", body = HealthReport)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let report = HealthReport {
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.uptime().as_secs(),
        slices: state.slice_names().count(),
    };

    (NO_CACHE, Json(report))
}
