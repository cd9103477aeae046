//! The fetch seam and its recording double.
//!
//! Code under test performs HTTP exchanges through an
//! `Arc<dyn FetchProvider>` handed in by the caller; tests inject a
//! [`StubFetch`] scripted with responses per method/URL pair. Unmatched
//! requests are a hard error rather than a silent placeholder, so a missing
//! stub fails the test at the call site.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::fetch::body::Body;
use crate::fetch::request::Request;
use crate::fetch::response::Response;

/// Failures surfaced by a [`FetchProvider`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No stub was registered for the method/URL pair.
    #[error("no stubbed response for {method} {url}")]
    Unmatched { method: String, url: String },

    /// A scripted transport failure.
    #[error("network error: {0}")]
    Network(String),
}

/// The seam through which code under test performs HTTP exchanges.
#[async_trait]
pub trait FetchProvider: Send + Sync {
    /// Resolves a request to a response, or fails the way a transport would.
    async fn fetch(&self, request: Request) -> Result<Response, FetchError>;
}

/// One request as seen by [`StubFetch`], kept for later assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub body: Body,
}

enum Outcome {
    Respond(Response),
    Fail(String),
}

struct Rule {
    method: String,
    url: String,
    outcome: Outcome,
}

impl Rule {
    fn matches(&self, request: &Request) -> bool {
        self.method.eq_ignore_ascii_case(&request.method) && self.url == request.url()
    }
}

/// Recording fetch double.
///
/// Responses are registered per method/URL pair; the method match is
/// case-insensitive, the URL match exact. The most recently registered
/// matching stub wins, so a test can override a default it set up earlier.
/// Every call is recorded, hits and misses alike.
#[derive(Default)]
pub struct StubFetch {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<RecordedRequest>>,
}

impl StubFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a response for `method`/`url`.
    pub fn on(&self, method: &str, url: &str, response: Response) {
        self.rules.lock().unwrap().push(Rule {
            method: method.to_string(),
            url: url.to_string(),
            outcome: Outcome::Respond(response),
        });
    }

    /// Registers a response for GET `url`.
    pub fn on_get(&self, url: &str, response: Response) {
        self.on("GET", url, response);
    }

    /// Registers a response for POST `url`.
    pub fn on_post(&self, url: &str, response: Response) {
        self.on("POST", url, response);
    }

    /// Registers a response for PUT `url`.
    pub fn on_put(&self, url: &str, response: Response) {
        self.on("PUT", url, response);
    }

    /// Registers a response for DELETE `url`.
    pub fn on_delete(&self, url: &str, response: Response) {
        self.on("DELETE", url, response);
    }

    /// Scripts a transport failure for `method`/`url`.
    pub fn fail(&self, method: &str, url: &str, message: &str) {
        self.rules.lock().unwrap().push(Rule {
            method: method.to_string(),
            url: url.to_string(),
            outcome: Outcome::Fail(message.to_string()),
        });
    }

    /// Every recorded call, in issue order.
    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns whether `method`/`url` was fetched at least once. The method
    /// comparison is case-insensitive.
    pub fn was_fetched(&self, method: &str, url: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|call| call.method.eq_ignore_ascii_case(method) && call.url == url)
    }
}

#[async_trait]
impl FetchProvider for StubFetch {
    async fn fetch(&self, request: Request) -> Result<Response, FetchError> {
        self.calls.lock().unwrap().push(RecordedRequest {
            method: request.method.clone(),
            url: request.url().to_string(),
            body: request.body.clone(),
        });

        let rules = self.rules.lock().unwrap();
        match rules.iter().rev().find(|rule| rule.matches(&request)) {
            Some(rule) => match &rule.outcome {
                Outcome::Respond(response) => Ok(response.clone()),
                Outcome::Fail(message) => Err(FetchError::Network(message.clone())),
            },
            None => {
                log::warn!("unmatched fetch: {} {}", request.method, request.url());
                Err(FetchError::Unmatched {
                    method: request.method.clone(),
                    url: request.url().to_string(),
                })
            }
        }
    }
}
