use axum::{
    http::{HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::models::api::ErrorResponse;

pub async fn fallback_handler(uri: Uri, headers: HeaderMap) -> Response {
    debug!(path = %uri.path(), "No route matched");

    let accepts_html = headers
        .get("accept")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |accept| accept.contains("text/html"));

    if accepts_html {
        let html = "<h1>404</h1><p>Oops! Page not found</p><a href=\"/\">Return to Home</a>";

        return (StatusCode::NOT_FOUND, Html(html)).into_response();
    }

    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            error: format!("No route for {}", uri.path()),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::read_json;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_fallback_returns_json_404() {
        let uri: Uri = "/logs".parse().unwrap();
        let response = fallback_handler(uri, HeaderMap::new()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = read_json(response).await;
        assert!(!body.success);
        assert_eq!(body.error, "No route for /logs");
    }

    #[tokio::test]
    async fn test_fallback_serves_html_to_browsers() {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("text/html,application/xhtml+xml"));

        let response = fallback_handler("/nowhere".parse().unwrap(), headers).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
    }
}
