use super::{ApiState, health, index};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes every deployment serves regardless of enabled slices: `GET /` and `GET /health`.
pub fn system_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(index::index_handler))
        .routes(routes!(health::health_handler))
}
