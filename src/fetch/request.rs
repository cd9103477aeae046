//! Inbound HTTP-like request descriptions.
//!
//! ## Notes
//! - The URL is captured at construction and is **read-only**: it is a
//!   private field behind the [`Request::url`] accessor, so reassignment is
//!   unrepresentable. Every other field stays freely mutable.
//! - `method` is stored verbatim, with no validation and no case
//!   normalization, to stay faithful to the primitive being emulated.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::fetch::body::{Body, BodyError};
use crate::fetch::headers::Headers;

/// Constructor input for [`Request::new`]: a raw URL string or an already
/// parsed [`Url`].
///
/// `RawUrl` is kept distinct from `Parsed` so relative URLs (`"/api/x"`)
/// stay representable. The "object with a url" shape of the emulated
/// primitive is covered by `From<&Request>`, which extracts the URL at
/// conversion time.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestInput {
    /// An unvalidated URL string, stored as given.
    RawUrl(String),
    /// A parsed absolute URL.
    Parsed(Url),
}

impl RequestInput {
    fn into_url(self) -> String {
        match self {
            RequestInput::RawUrl(raw) => raw,
            RequestInput::Parsed(url) => url.into(),
        }
    }
}

impl From<&str> for RequestInput {
    fn from(raw: &str) -> Self {
        RequestInput::RawUrl(raw.to_string())
    }
}

impl From<String> for RequestInput {
    fn from(raw: String) -> Self {
        RequestInput::RawUrl(raw)
    }
}

impl From<Url> for RequestInput {
    fn from(url: Url) -> Self {
        RequestInput::Parsed(url)
    }
}

impl From<&Url> for RequestInput {
    fn from(url: &Url) -> Self {
        RequestInput::Parsed(url.clone())
    }
}

impl From<&Request> for RequestInput {
    fn from(request: &Request) -> Self {
        RequestInput::RawUrl(request.url().to_string())
    }
}

/// Init bag for [`Request::new`]; unset fields fall back to the fetch
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    /// HTTP method, `"GET"` when absent.
    pub method: Option<String>,
    /// Request headers; absent means an empty bag.
    pub headers: Option<Headers>,
    /// Request body, stored verbatim.
    pub body: Body,
}

/// An inbound HTTP-like request description, as handed to code under test.
#[derive(Debug, Clone)]
pub struct Request {
    url: String,
    /// HTTP method, `"GET"` by default.
    pub method: String,
    /// Header bag, empty by default.
    pub headers: Headers,
    /// Body as given at construction, [`Body::Empty`] by default.
    pub body: Body,
}

impl Request {
    /// Builds a request from `input` and the given init bag.
    pub fn new(input: impl Into<RequestInput>, init: RequestInit) -> Self {
        Self {
            url: input.into().into_url(),
            method: init.method.unwrap_or_else(|| "GET".to_string()),
            headers: init.headers.unwrap_or_default(),
            body: init.body,
        }
    }

    /// Convenience for a bare GET with no headers or body.
    pub fn get(input: impl Into<RequestInput>) -> Self {
        Self::new(input, RequestInit::default())
    }

    /// Convenience for a POST carrying the given body.
    pub fn post(input: impl Into<RequestInput>, body: impl Into<Body>) -> Self {
        Self::new(
            input,
            RequestInit {
                method: Some("POST".to_string()),
                body: body.into(),
                ..Default::default()
            },
        )
    }

    /// The URL captured at construction. Read-only: no setter exists.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Decodes the body as JSON: string bodies are parsed and fail fast
    /// when malformed (test suites rely on this to catch broken fixtures),
    /// structured bodies come back verbatim, and an absent body yields the
    /// empty object.
    ///
    /// Deferred in shape only; the returned future is immediately ready.
    pub async fn json(&self) -> Result<Value, BodyError> {
        self.body.decode()
    }

    /// Typed variant of [`json`](Request::json).
    pub async fn json_as<T: DeserializeOwned>(&self) -> Result<T, BodyError> {
        self.body.decode_as()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use serde_json::json;

    #[test]
    fn url_is_captured_and_read_only() {
        let mut request = Request::get("http://x/y");
        assert_eq!(request.url(), "http://x/y");

        // the other fields stay freely mutable without touching the url
        request.method = "DELETE".to_string();
        request.headers.set("authorization", "Bearer t");
        request.body = Body::from("{}");
        assert_eq!(request.url(), "http://x/y");
    }

    #[test]
    fn defaults_method_to_get_with_empty_headers() {
        let request = Request::new("http://x/y", RequestInit::default());
        assert_eq!(request.method, "GET");
        assert!(request.headers.is_empty());
        assert!(request.body.is_empty());
    }

    #[test]
    fn input_accepts_parsed_urls_and_other_requests() {
        let url = Url::parse("https://app.test/api/items").unwrap();
        let request = Request::get(&url);
        assert_eq!(request.url(), "https://app.test/api/items");

        // wrapping a richer request-like value keeps its url
        let wrapped = Request::new(
            &request,
            RequestInit {
                method: Some("HEAD".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(wrapped.url(), "https://app.test/api/items");
        assert_eq!(wrapped.method, "HEAD");
    }

    #[test]
    fn relative_urls_stay_intact() {
        let request = Request::get("/api/items?page=2");
        assert_eq!(request.url(), "/api/items?page=2");
    }

    #[tokio::test]
    async fn json_parses_string_bodies() {
        let request = Request::post("http://x/y", r#"{"name":"box"}"#);
        assert_eq!(request.json().await.unwrap(), json!({"name": "box"}));
    }

    #[tokio::test]
    async fn json_rejects_malformed_string_bodies() {
        let request = Request::new(
            "http://x/y",
            RequestInit {
                body: Body::from("not json"),
                ..Default::default()
            },
        );
        assert!(matches!(request.json().await, Err(BodyError::Parse(_))));
    }

    #[tokio::test]
    async fn json_as_decodes_into_typed_values() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Item {
            name: String,
        }

        let request = Request::post("http://x/y", r#"{"name":"box"}"#);
        assert_eq!(
            request.json_as::<Item>().await.unwrap(),
            Item { name: "box".to_string() }
        );
    }

    #[test]
    fn json_is_immediately_ready() {
        let request = Request::post("http://x/y", "{}");
        let decoded = request
            .json()
            .now_or_never()
            .expect("json() is deferred in shape only");
        assert!(decoded.is_ok());
    }
}
