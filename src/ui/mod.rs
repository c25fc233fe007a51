//! Review UI: embedded static pages for the operator's browser.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use rust_embed::Embed;
use std::path::Path;

#[derive(Embed)]
#[folder = "static/"]
#[prefix = ""]
struct ReviewUi;

fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match ext {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

fn serve_embedded_file(path: &str) -> Response<Body> {
    match ReviewUi::get(path) {
        Some(file) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, get_mime_type(path))
            .body(Body::from(file.data.into_owned()))
            .unwrap_or_else(|_| Response::new(Body::empty())),
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not found"))
            .unwrap_or_else(|_| Response::new(Body::empty())),
    }
}

/// Pending-invoice list and detail view.
pub async fn index_page() -> Response<Body> {
    serve_embedded_file("index.html")
}

/// Operator login form.
pub async fn login_page() -> Response<Body> {
    serve_embedded_file("login.html")
}
