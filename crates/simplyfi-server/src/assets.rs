//! Static file serving using rust-embed

use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Embed the client directory at compile time
#[derive(RustEmbed)]
#[folder = "../../client"]
struct ClientAssets;

/// Serve static files from the embedded client directory, falling back to
/// index.html for unknown paths.
pub async fn static_handler(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    if let Some(content) = ClientAssets::get(path) {
        let mime_type = mime_guess::from_path(path).first_or_text_plain();
        return ([(header::CONTENT_TYPE, mime_type.as_ref().to_string())], content.data).into_response();
    }

    match ClientAssets::get("index.html") {
        Some(content) => ([(header::CONTENT_TYPE, "text/html".to_string())], content.data).into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
