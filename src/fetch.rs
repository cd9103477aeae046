//! Fetch primitives and the fetch seam.
//!
//! This module provides the value types of the web fetch surface
//! ([`Headers`], [`Request`], and [`Response`]), emulated closely enough
//! that code written against the real primitives runs unchanged inside an
//! ordinary test process, plus the [`FetchProvider`] seam through which
//! that code performs HTTP exchanges and the [`StubFetch`] recording double
//! that answers them.
//!
//! # Concepts
//!
//! - **Value types** — [`Headers`], [`Request`], and [`Response`] are plain
//!   values: construct one, read its fields back, decode its body with the
//!   asynchronous `json()` accessor. No network or disk I/O happens
//!   anywhere in this module.
//! - **The seam** — code under test receives an `Arc<dyn FetchProvider>`
//!   instead of reaching for a process-global client, so each test owns its
//!   own double and no test-order coupling exists.
//! - **Deferred in shape only** — `json()` and `fetch()` are `async` purely
//!   to match the calling convention of the real APIs. Every future is
//!   immediately ready, and a failure (such as a malformed JSON body)
//!   surfaces at the first poll.
//!
//! # Available types
//!
//! - [`Headers`] — case-insensitive, insertion-ordered header bag.
//! - [`Body`] — request/response payload (`Empty`, `Text`, or `Json`).
//! - [`Request`], [`RequestInit`], [`RequestInput`] — inbound description.
//! - [`Response`], [`ResponseInit`] — outbound description and the JSON
//!   factory.
//! - [`FetchProvider`] — the injection seam.
//! - [`StubFetch`], [`RecordedRequest`] — the recording double.
//! - [`BodyError`], [`FetchError`] — the failures either side can surface.
//!
//! # Example: scripting a fetch
//!
//! ```
//! use webstub::fetch::{FetchProvider, Request, Response, ResponseInit, StubFetch};
//!
//! let fetch = StubFetch::new();
//! fetch.on_get(
//!     "https://app.test/api/user",
//!     Response::from_json(&serde_json::json!({"id": 1}), ResponseInit::default()).unwrap(),
//! );
//!
//! let response = futures::executor::block_on(
//!     fetch.fetch(Request::get("https://app.test/api/user")),
//! )
//! .unwrap();
//!
//! assert_eq!(response.status, 200);
//! assert!(fetch.was_fetched("GET", "https://app.test/api/user"));
//! ```
//!
//! # See also
//!
//! - [`TestHarness`](crate::harness::TestHarness) — bundles a [`StubFetch`]
//!   with the other doubles and owns the runtime that drives the seam from
//!   synchronous tests.

/// Body payloads and the shared JSON decode contract.
pub mod body;
/// Case-insensitive header bag.
pub mod headers;
/// The fetch seam and its recording double.
pub mod provider;
/// Inbound request descriptions.
pub mod request;
/// Outbound response descriptions.
pub mod response;

pub use body::{Body, BodyError};
pub use headers::Headers;
pub use provider::{FetchError, FetchProvider, RecordedRequest, StubFetch};
pub use request::{Request, RequestInit, RequestInput};
pub use response::{Response, ResponseInit};
