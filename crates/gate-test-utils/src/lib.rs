//! Test utilities for gateway E2E tests.
//!
//! Provides a stub upstream that records what the gateway relays to it and a
//! harness that boots the real gateway router against that stub.

pub mod server_harness;
pub mod stub_upstream;

pub use server_harness::TestGateServer;
pub use stub_upstream::{RecordedRequest, StubUpstream};
