//! Stub upstream server for gateway tests.
//!
//! Accepts any request, records it, and answers with a canned body so tests
//! can assert both what the caller saw and what the upstream received.

use axum::{
    body::Body,
    extract::{Request, State},
    response::IntoResponse,
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Body every stubbed response carries
pub const STUB_BODY: &str = "upstream-ok";

/// One request as seen by the stub upstream
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Header name/value pairs, values lossily decoded
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// First value of `name`, if the upstream received that header
    pub fn header(&self, name: &str) -> Option<&str> {
        let wanted = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == wanted)
            .map(|(_, v)| v.as_str())
    }

    /// True when the upstream received the header at all
    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }
}

type Recorder = Arc<Mutex<Vec<RecordedRequest>>>;

/// Stub upstream bound to an ephemeral port
pub struct StubUpstream {
    addr: SocketAddr,
    recorder: Recorder,
    _handle: JoinHandle<()>,
}

impl StubUpstream {
    /// Bind and start the stub on `127.0.0.1:0`
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        let recorder: Recorder = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .fallback(record_request)
            .with_state(recorder.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Stub upstream error: {}", e);
            }
        });

        Ok(Self {
            addr,
            recorder,
            _handle: handle,
        })
    }

    /// Base URL of the stub, e.g. `http://127.0.0.1:49152`
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// All requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorder.lock().expect("recorder poisoned").clone()
    }

    /// The most recent request, panicking if none arrived
    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .last()
            .cloned()
            .expect("stub upstream received no requests")
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.recorder.lock().expect("recorder poisoned").len()
    }
}

async fn record_request(State(recorder): State<Recorder>, req: Request) -> impl IntoResponse {
    let record = RecordedRequest {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        headers: req
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
    };

    recorder.lock().expect("recorder poisoned").push(record);

    axum::response::Response::builder()
        .status(200)
        .header("x-stub-upstream", "1")
        .body(Body::from(STUB_BODY))
        .expect("static response must build")
}
