//! Request-scoped access context.
//!
//! The gateway resolves the caller's token once per request and threads it to
//! downstream consumers as an explicit value in the request extensions. There
//! is no process-wide "current token" holder; each request carries its own
//! context, so concurrent requests cannot observe each other's tokens.

/// Access context injected into request extensions by the gateway filter.
///
/// `token` is the opaque credential as received; it is not decoded or
/// validated here. `None` means the caller presented no token at all, which
/// the gateway forwards rather than rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessContext {
    /// Opaque token string from the configured header or the `token` query
    /// parameter, header taking precedence
    pub token: Option<String>,
}

impl AccessContext {
    /// Context carrying a resolved token
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// True when the caller presented a non-empty token
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}
