//! HTTP surface of the generator slice.

mod handlers;

pub use handlers::PreviewResponse;

use qrgen_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `POST /generate` and `POST /generate-preview`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::generate_handler))
        .routes(routes!(handlers::preview_handler))
}
