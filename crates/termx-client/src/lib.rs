//! termx-client: talk to the termx remote execution backend.
//!
//! [`HttpBackend`] implements the kernel's
//! [`BackendClient`](termx_kernel::BackendClient) contract over HTTP:
//!
//! ```text
//! GET  {base}/api/health      reachable on any 2xx
//! POST {base}/api/command     CommandRequest -> CommandResponse
//! GET  {base}/api/processes   ProcessList
//! ```

mod http;

pub use http::HttpBackend;
