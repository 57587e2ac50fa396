//! Test server harness for E2E testing.
//!
//! Provides `TestGateServer` for spawning real gateway instances in tests.

use axum::http::header::HeaderName;
use gate_service::config::Config;
use gate_service::observability::metrics::init_metrics_recorder;
use gate_service::routes::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

/// Test harness for spawning the gateway in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_forwarding() -> Result<(), anyhow::Error> {
///     let upstream = StubUpstream::spawn().await?;
///     let server = TestGateServer::spawn(&upstream.url(), &["/public"], "X-Token").await?;
///
///     let response = server
///         .client()
///         .get(format!("{}/api/orders", server.url()))
///         .header("X-Token", "abc123")
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestGateServer {
    addr: SocketAddr,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestGateServer {
    /// Spawn a gateway instance on a random port.
    ///
    /// # Arguments
    /// * `upstream_url` - Base URL of the (usually stubbed) upstream
    /// * `bypass_prefixes` - Path prefixes exempt from authentication
    /// * `token_header` - Name of the header carrying the token
    pub async fn spawn(
        upstream_url: &str,
        bypass_prefixes: &[&str],
        token_header: &str,
    ) -> Result<Self, anyhow::Error> {
        let config = Config {
            bind_address: "127.0.0.1:0".to_string(),
            upstream_url: Url::parse(upstream_url)?,
            bypass_prefixes: bypass_prefixes.iter().map(|s| s.to_string()).collect(),
            token_header: HeaderName::from_bytes(token_header.as_bytes())?,
        };

        // Initialize metrics recorder for the test server.
        // Note: This may fail if already installed in the test process.
        // In that case, we create a new recorder without installing it globally.
        let metrics_handle = match init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let recorder = PrometheusBuilder::new().build_recorder();
                recorder.handle()
            }
        };

        let state = Arc::new(AppState {
            config,
            client: reqwest::Client::new(),
        });

        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test gateway error: {}", e);
            }
        });

        Ok(Self {
            addr,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Base URL of the running gateway
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// HTTP client for talking to the gateway
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}
