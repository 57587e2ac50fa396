//! E2E tests for the gateway access filter and upstream forwarding.
//!
//! Each test boots the real gateway router against a stub upstream and
//! drives it over HTTP, asserting both the caller-visible response and what
//! the upstream actually received.
//!
//! ## Test Naming
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use common::envelope::Envelope;
use gate_test_utils::{StubUpstream, TestGateServer};
use reqwest::header::HeaderValue;
use reqwest::StatusCode;

const TOKEN_HEADER: &str = "X-Token";

async fn gate_with_stub(bypass: &[&str]) -> Result<(StubUpstream, TestGateServer), anyhow::Error> {
    let upstream = StubUpstream::spawn().await?;
    let server = TestGateServer::spawn(&upstream.url(), bypass, TOKEN_HEADER).await?;
    Ok((upstream, server))
}

// ============================================================================
// Bypass Tests
// ============================================================================

/// A request whose effective path matches a bypass prefix is forwarded
/// untouched: no token lookup, no header mutation.
#[tokio::test]
async fn test_bypass_prefix_forwards_request_unchanged() -> Result<(), anyhow::Error> {
    let (upstream, server) = gate_with_stub(&["/public"]).await?;

    let response = server
        .client()
        .get(format!("{}/api/public/health?token=ignored", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, gate_test_utils::stub_upstream::STUB_BODY);

    let seen = upstream.last_request();
    assert_eq!(seen.path, "/public/health");
    assert!(
        !seen.has_header(TOKEN_HEADER),
        "Bypassed request must not gain a token header"
    );
    Ok(())
}

/// Bypass matching happens on the effective (prefix-stripped) path, so the
/// same prefix does not exempt a non-/api route.
#[tokio::test]
async fn test_bypass_only_applies_to_effective_path() -> Result<(), anyhow::Error> {
    let (upstream, server) = gate_with_stub(&["/public"]).await?;

    let response = server
        .client()
        .get(format!("{}/api/orders/public", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let seen = upstream.last_request();
    // Not bypassed: the filter attached the (empty) token header.
    assert_eq!(seen.header(TOKEN_HEADER), Some(""));
    Ok(())
}

// ============================================================================
// Token Resolution Tests
// ============================================================================

/// A non-blank token header wins regardless of the query parameter.
#[tokio::test]
async fn test_header_token_takes_precedence_over_query() -> Result<(), anyhow::Error> {
    let (upstream, server) = gate_with_stub(&[]).await?;

    let response = server
        .client()
        .get(format!("{}/api/orders?token=from-query", server.url()))
        .header(TOKEN_HEADER, "abc123")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstream.last_request().header(TOKEN_HEADER), Some("abc123"));
    Ok(())
}

/// With no header, the token falls back to the `token` query parameter and
/// is attached under the configured header name.
#[tokio::test]
async fn test_query_token_fallback_attached_as_header() -> Result<(), anyhow::Error> {
    let (upstream, server) = gate_with_stub(&[]).await?;

    let response = server
        .client()
        .get(format!("{}/api/orders?token=xyz", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstream.last_request().header(TOKEN_HEADER), Some("xyz"));
    Ok(())
}

/// A blank header value also falls back to the query parameter.
#[tokio::test]
async fn test_blank_header_falls_back_to_query() -> Result<(), anyhow::Error> {
    let (upstream, server) = gate_with_stub(&[]).await?;

    let response = server
        .client()
        .get(format!("{}/api/orders?token=xyz", server.url()))
        .header(TOKEN_HEADER, "")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstream.last_request().header(TOKEN_HEADER), Some("xyz"));
    Ok(())
}

/// No token anywhere: the request is still forwarded, not rejected, with an
/// empty token attached.
#[tokio::test]
async fn test_missing_token_still_forwarded() -> Result<(), anyhow::Error> {
    let (upstream, server) = gate_with_stub(&[]).await?;

    let response = server
        .client()
        .get(format!("{}/api/orders", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstream.last_request().header(TOKEN_HEADER), Some(""));
    Ok(())
}

// ============================================================================
// Rejection Tests
// ============================================================================

/// Extraction failure always answers HTTP 200 with the fixed envelope body,
/// and nothing reaches the upstream.
#[tokio::test]
async fn test_extraction_failure_returns_200_envelope() -> Result<(), anyhow::Error> {
    let (upstream, server) = gate_with_stub(&[]).await?;

    let response = server
        .client()
        .get(format!("{}/api/orders", server.url()))
        .header(TOKEN_HEADER, HeaderValue::from_bytes(&[0xff, 0xfe])?)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Envelope = response.json().await?;
    assert_eq!(body, Envelope::error("User Token Forbidden or Expired!"));
    assert_eq!(upstream.request_count(), 0, "Rejected request must not be relayed");
    Ok(())
}

// ============================================================================
// Forwarding Tests
// ============================================================================

/// Method, path, query and body are relayed to the upstream unchanged.
#[tokio::test]
async fn test_forwarding_preserves_method_path_query_body() -> Result<(), anyhow::Error> {
    let (upstream, server) = gate_with_stub(&[]).await?;

    let response = server
        .client()
        .post(format!("{}/api/orders/42?expand=items", server.url()))
        .header(TOKEN_HEADER, "abc123")
        .body("{\"qty\":3}")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let seen = upstream.last_request();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/orders/42");
    assert_eq!(seen.query.as_deref(), Some("expand=items"));
    Ok(())
}

/// Upstream response headers are relayed back to the caller.
#[tokio::test]
async fn test_forwarding_relays_upstream_response() -> Result<(), anyhow::Error> {
    let (_upstream, server) = gate_with_stub(&[]).await?;

    let response = server
        .client()
        .get(format!("{}/api/orders", server.url()))
        .header(TOKEN_HEADER, "abc123")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-stub-upstream").map(|v| v.as_bytes()),
        Some(&b"1"[..])
    );
    assert_eq!(response.text().await?, gate_test_utils::stub_upstream::STUB_BODY);
    Ok(())
}

/// An unreachable upstream surfaces as 502 with the error envelope, not as
/// the auth rejection.
#[tokio::test]
async fn test_unreachable_upstream_returns_502() -> Result<(), anyhow::Error> {
    // Port 9 (discard) on localhost: nothing listens there.
    let server = TestGateServer::spawn("http://127.0.0.1:9", &[], TOKEN_HEADER).await?;

    let response = server
        .client()
        .get(format!("{}/api/orders", server.url()))
        .header(TOKEN_HEADER, "abc123")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Envelope = response.json().await?;
    assert_eq!(body.code, 500);
    Ok(())
}

// ============================================================================
// Operational Endpoints
// ============================================================================

/// The gateway's own endpoints are served without touching the upstream.
#[tokio::test]
async fn test_health_and_metrics_served_locally() -> Result<(), anyhow::Error> {
    let (upstream, server) = gate_with_stub(&[]).await?;

    let health = server
        .client()
        .get(format!("{}/health", server.url()))
        .send()
        .await?;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.text().await?, "OK");

    let metrics = server
        .client()
        .get(format!("{}/metrics", server.url()))
        .send()
        .await?;
    assert_eq!(metrics.status(), StatusCode::OK);

    assert_eq!(upstream.request_count(), 0);
    Ok(())
}
