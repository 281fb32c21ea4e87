use crate::Generator;
use crate::archive;
use crate::error::GeneratorError;
use crate::render::{GeneratedImage, render_png};
use crate::request::{GenerateBody, GenerateRequest};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use qrgen_derive::{api_handler, api_model};
use qrgen_kernel::domain::constants::GENERATOR_TAG;
use qrgen_kernel::server::{ApiState, ErrorBody};
use tracing::debug;

#[api_model]
/// Inline preview of a generated code
pub struct PreviewResponse {
    /// `data:image/png;base64,...` URI
    pub image: String,
}

#[api_handler(
    post,
    path = "/generate",
    request_body(content = GenerateBody, content_type = "application/json"),
    responses(
        (status = OK, description = "PNG attachment named qr_<YYYYMMDD_HHMMSS>.png"),
        (status = BAD_REQUEST, description = "Empty link", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Generation failed", body = ErrorBody),
    ),
    tag = GENERATOR_TAG,
)]
pub(super) async fn generate_handler(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Response, GeneratorError> {
    let generator = slice(&state)?.clone();
    let request = GenerateRequest::from_slice(&body)?;

    let (image, file_name) = blocking(move || {
        let image = render_png(&request.link, &request.style)?;
        let file_name = archive::file_name(&chrono::Local::now());
        archive::store(&generator.archive, &file_name, &image.png)?;
        Ok((image, file_name))
    })
    .await?;

    debug!(file_name = %file_name, width = image.width, "QR download served");

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_owned()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{file_name}\"")),
    ];
    Ok((headers, image.png).into_response())
}

#[api_handler(
    post,
    path = "/generate-preview",
    request_body(content = GenerateBody, content_type = "application/json"),
    responses(
        (status = OK, description = "Base64 data URI of the PNG", body = PreviewResponse),
        (status = BAD_REQUEST, description = "Empty link", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Generation failed", body = ErrorBody),
    ),
    tag = GENERATOR_TAG,
)]
pub(super) async fn preview_handler(body: Bytes) -> Result<Json<PreviewResponse>, GeneratorError> {
    let request = GenerateRequest::from_slice(&body)?;

    let image = blocking(move || render_png(&request.link, &request.style)).await?;

    debug!(width = image.width, bytes = image.png.len(), "QR preview served");
    Ok(Json(PreviewResponse { image: data_uri(&image) }))
}

fn slice(state: &ApiState) -> Result<&Generator, GeneratorError> {
    state.try_get_slice::<Generator>().map_err(|err| GeneratorError::from(err.to_string()))
}

fn data_uri(image: &GeneratedImage) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(&image.png))
}

/// Runs CPU or disk bound work off the async workers.
async fn blocking<T, F>(work: F) -> Result<T, GeneratorError>
where
    F: FnOnce() -> Result<T, GeneratorError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| GeneratorError::from(format!("Render task failed: {err}")))?
}
