//! Access filter middleware.
//!
//! Runs once per proxied request: resolves the effective path, lets
//! bypass-listed prefixes through untouched, and otherwise extracts the
//! caller's token (configured header first, `token` query parameter as
//! fallback), re-attaches it under the same header name, and threads it to
//! downstream consumers as an [`AccessContext`] in the request extensions.
//!
//! The token is treated as opaque here. Decoding and validating its claims
//! belongs to the auth library behind the gateway, not to this filter.

use crate::errors::GateError;
use crate::observability::metrics::record_access_decision;
use crate::routes::AppState;
use axum::{
    extract::{OriginalUri, Request, State},
    http::header::{HeaderName, HeaderValue},
    middleware::Next,
    response::IntoResponse,
};
use common::context::AccessContext;
use std::sync::Arc;

/// Prefix the gateway mounts proxied routes under. Stripped from the
/// recorded original URL when computing the effective path.
const GATEWAY_PREFIX: &str = "/api";

/// Query parameter consulted when the token header is absent or blank
const TOKEN_QUERY_PARAM: &str = "token";

/// Access filter applied to everything nested under [`GATEWAY_PREFIX`].
///
/// Bypassed requests are forwarded exactly as received. For all other
/// requests the resolved token (possibly empty) is written back onto the
/// outgoing request and into the extensions; extraction failures short-circuit
/// with the fixed rejection envelope.
pub async fn access_filter(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, GateError> {
    let path = effective_path(&req);

    if is_bypassed(&path, &state.config.bypass_prefixes) {
        tracing::debug!(target: "access_filter", path = %path, "bypass prefix matched");
        record_access_decision("bypassed");
        return Ok(next.run(req).await);
    }

    let token = match extract_token(&req, &state.config.token_header) {
        Ok(token) => token,
        Err(err) => {
            tracing::error!(target: "access_filter", path = %path, error = %err, "token extraction failed");
            record_access_decision("rejected");
            return Err(err);
        }
    };

    if let Err(err) = attach_token(&mut req, &state.config.token_header, token.as_deref()) {
        tracing::error!(target: "access_filter", path = %path, error = %err, "token re-attachment failed");
        record_access_decision("rejected");
        return Err(err);
    }

    req.extensions_mut().insert(AccessContext::new(token));
    record_access_decision("forwarded");

    Ok(next.run(req).await)
}

/// Compute the path authentication decisions are made against.
///
/// When the router recorded the original URL (requests that came in through
/// the `/api` nest) and it starts with [`GATEWAY_PREFIX`], the prefix is
/// stripped so bypass prefixes are matched in downstream path space.
/// Otherwise the raw request path is used.
fn effective_path(req: &Request) -> String {
    if let Some(OriginalUri(original)) = req.extensions().get::<OriginalUri>() {
        if let Some(stripped) = original.path().strip_prefix(GATEWAY_PREFIX) {
            return stripped.to_string();
        }
    }
    req.uri().path().to_string()
}

/// True when `path` starts with any configured bypass prefix.
///
/// Plain prefix match; first hit wins and order does not matter.
fn is_bypassed(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
}

/// Resolve the caller's token.
///
/// First value of the configured header wins. The `token` query parameter is
/// consulted only when the header is absent or blank; if neither source
/// yields a non-blank value the (possibly blank) header value is returned
/// as-is. `Ok(None)` means no token anywhere, which is not an error.
fn extract_token(req: &Request, header: &HeaderName) -> Result<Option<String>, GateError> {
    let header_value = match req.headers().get(header) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| {
                    GateError::TokenExtraction(format!("header {} is not valid UTF-8", header))
                })?
                .to_string(),
        ),
        None => None,
    };

    if let Some(value) = &header_value {
        if !value.trim().is_empty() {
            return Ok(header_value);
        }
    }

    if let Some(query) = req.uri().query() {
        if let Some((_, value)) = url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == TOKEN_QUERY_PARAM)
        {
            return Ok(Some(value.into_owned()));
        }
    }

    Ok(header_value)
}

/// Write the resolved token back onto the outgoing request under the
/// configured header name. An absent token is attached as an empty value so
/// downstream services always see the header.
fn attach_token(
    req: &mut Request,
    header: &HeaderName,
    token: Option<&str>,
) -> Result<(), GateError> {
    let value = HeaderValue::from_str(token.unwrap_or("")).map_err(|_| {
        GateError::TokenExtraction("token is not a valid header value".to_string())
    })?;
    req.headers_mut().insert(header.clone(), value);
    Ok(())
}
