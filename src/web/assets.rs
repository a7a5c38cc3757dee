use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

/// Chart page and script compiled into the binary, so the server ships as a
/// single executable with nothing to deploy next to it.
#[derive(RustEmbed)]
#[folder = "static/"]
pub struct Assets;

/// Serves the embedded bundle: `/` maps to `index.html`, anything not in the
/// bundle is a 404.
pub async fn static_handler(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(file) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], file.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "404 page not found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_contains_the_chart_page_and_script() {
        assert!(Assets::get("index.html").is_some());
        assert!(Assets::get("chart.js").is_some());
    }
}
