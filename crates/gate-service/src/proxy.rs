//! Upstream pass-through forwarding.
//!
//! The terminal handler for everything nested under `/api`: relays the
//! (already filtered and annotated) request to the configured upstream and
//! relays the upstream's answer back verbatim. There is no routing table and
//! no retry: one upstream, one attempt.

use crate::errors::GateError;
use crate::observability::metrics::{categorize_status_code, record_upstream_request};
use crate::routes::AppState;
use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::header::{HeaderMap, HeaderName},
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

/// Cap on buffered request/response bodies relayed through the gateway
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Hop-by-hop headers that must not be relayed in either direction.
/// `host` is included: the client sets it for the upstream connection.
const HOP_BY_HOP_HEADERS: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
];

/// Relay a request to the configured upstream.
///
/// The request URI at this point is already `/api`-stripped by the nest, so
/// the upstream sees downstream-space paths. Status, headers and body of the
/// upstream response are relayed unchanged; transport failures surface as a
/// 502 envelope.
pub async fn forward_to_upstream(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Result<Response, GateError> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    let mut target = state.config.upstream_url.clone();
    target.set_path(&path);
    target.set_query(query.as_deref());

    let request_headers = strip_hop_by_hop(req.headers());
    let body_bytes = to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| GateError::Upstream(format!("Failed to read request body: {e}")))?;

    tracing::debug!(target: "proxy", method = %method, url = %target, "relaying to upstream");

    let start = Instant::now();
    let upstream_response = state
        .client
        .request(method, target)
        .headers(request_headers)
        .body(body_bytes)
        .send()
        .await
        .map_err(|e| {
            record_upstream_request("error", start.elapsed());
            tracing::error!(target: "proxy", error = %e, "upstream request failed");
            GateError::Upstream(e.to_string())
        })?;

    let status = upstream_response.status();
    record_upstream_request(categorize_status_code(status.as_u16()), start.elapsed());

    let response_headers = strip_hop_by_hop(upstream_response.headers());
    let response_bytes = upstream_response
        .bytes()
        .await
        .map_err(|e| GateError::Upstream(format!("Failed to read upstream body: {e}")))?;

    let mut response = Response::builder()
        .status(status)
        .body(Body::from(response_bytes))
        .map_err(|e| GateError::Upstream(format!("Failed to build response: {e}")))?;
    *response.headers_mut() = response_headers;

    Ok(response)
}

/// Copy `headers` minus the hop-by-hop set.
fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !is_hop_by_hop(name) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(&name.as_str())
}
