//! `/api` reverse proxy
//!
//! Forwards list and task requests to `{upstream}{path}` so the browser app
//! can keep its default same-origin base URL.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::AppState;

pub async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let url = format!("{}{}", state.config.upstream_url, path);

    let mut request = state.http.request(method.clone(), &url).body(body);
    if let Some(content_type) = headers.get(CONTENT_TYPE) {
        request = request.header(CONTENT_TYPE, content_type.clone());
    }

    let upstream = match request.send().await {
        Ok(upstream) => upstream,
        Err(err) => {
            tracing::error!(%method, %url, error = %err, "upstream unreachable");
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    match upstream.bytes().await {
        Ok(bytes) => {
            tracing::debug!(%method, %url, status = status.as_u16(), "proxied");
            let mut response = (status, bytes).into_response();
            if let Some(content_type) = content_type {
                response.headers_mut().insert(CONTENT_TYPE, content_type);
            }
            response
        }
        Err(err) => {
            tracing::error!(%method, %url, error = %err, "failed to read upstream body");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}
