use axum::response::Html;
use qrgen_derive::api_handler;
use qrgen_domain::constants::SYSTEM_TAG;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[api_handler(
    get,
    path = "/",
    responses((status = OK, description = "Generator front page", content_type = "text/html", body = String)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
