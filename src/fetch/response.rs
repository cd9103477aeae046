//! Outbound HTTP-like response descriptions.
//!
//! ## Notes
//! - `status` and `status_text` default independently: an omitted
//!   `status_text` is always `"OK"`, even for non-2xx statuses. There is no
//!   canonical-reason lookup; that matches the primitive being emulated.
//! - [`Response::from_json`] is the counterpart of the static `json()`
//!   factory. Its body is always the serialized text, never the raw value,
//!   and it injects `content-type: application/json` before overlaying the
//!   caller's headers, so a caller-supplied content-type wins.

use http::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::fetch::body::{Body, BodyError};
use crate::fetch::headers::Headers;

/// Init bag for [`Response::new`]; unset fields fall back to the fetch
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct ResponseInit {
    /// Status code, `200` when absent.
    pub status: Option<u16>,
    /// Reason phrase, `"OK"` when absent.
    pub status_text: Option<String>,
    /// Response headers; absent means an empty bag.
    pub headers: Option<Headers>,
}

/// An outbound HTTP-like response description.
#[derive(Debug, Clone)]
pub struct Response {
    /// Body as given at construction, or the serialized text when built by
    /// [`Response::from_json`].
    pub body: Body,
    /// Status code, `200` by default.
    pub status: u16,
    /// Reason phrase, `"OK"` by default.
    pub status_text: String,
    /// Header bag, empty by default.
    pub headers: Headers,
}

impl Response {
    /// Builds a response from `body` and the given init bag.
    pub fn new(body: impl Into<Body>, init: ResponseInit) -> Self {
        Self {
            body: body.into(),
            status: init.status.unwrap_or(200),
            status_text: init.status_text.unwrap_or_else(|| "OK".to_string()),
            headers: init.headers.unwrap_or_default(),
        }
    }

    /// Builds a response whose body is the JSON serialization of `data`.
    ///
    /// Status and reason come from `init` when present. Headers start from
    /// the injected JSON content-type and are then overlaid with the
    /// caller's entries, so a caller-supplied content-type wins on
    /// collision. Fails when `data` cannot be serialized.
    pub fn from_json<T: Serialize>(data: &T, init: ResponseInit) -> Result<Self, BodyError> {
        let text = serde_json::to_string(data).map_err(BodyError::Serialize)?;

        let mut headers = Headers::new();
        headers.set(CONTENT_TYPE.as_str(), "application/json");
        if let Some(supplied) = &init.headers {
            headers.extend(supplied.iter());
        }

        Ok(Self {
            body: Body::Text(text),
            status: init.status.unwrap_or(200),
            status_text: init.status_text.unwrap_or_else(|| "OK".to_string()),
            headers,
        })
    }

    /// Decodes the body as JSON, under the same contract as
    /// [`Request::json`](crate::fetch::Request::json): parse string bodies
    /// fail-fast, return structured bodies verbatim, and decode an absent
    /// body to the empty object.
    pub async fn json(&self) -> Result<Value, BodyError> {
        self.body.decode()
    }

    /// Typed variant of [`json`](Response::json).
    pub async fn json_as<T: DeserializeOwned>(&self) -> Result<T, BodyError> {
        self.body.decode_as()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_status_200_ok() {
        let response = Response::new("hello", ResponseInit::default());
        assert_eq!(response.status, 200);
        assert_eq!(response.status_text, "OK");
        assert!(response.headers.is_empty());
    }

    #[test]
    fn status_text_still_defaults_to_ok_for_non_2xx() {
        let response = Response::new(
            Body::Empty,
            ResponseInit {
                status: Some(404),
                ..Default::default()
            },
        );
        assert_eq!(response.status, 404);
        assert_eq!(response.status_text, "OK"); // no canonical-reason lookup
    }

    #[tokio::test]
    async fn from_json_round_trips() {
        let response = Response::from_json(&json!({"a": 1}), ResponseInit::default()).unwrap();

        // the body is the serialized text, never the raw value
        assert!(matches!(response.body, Body::Text(_)));
        assert_eq!(response.json().await.unwrap(), json!({"a": 1}));
    }

    #[test]
    fn from_json_injects_the_json_content_type() {
        let response = Response::from_json(&json!({}), ResponseInit::default()).unwrap();
        assert_eq!(
            response.headers.get("content-type"),
            Some("application/json")
        );
    }

    #[test]
    fn caller_content_type_wins_over_the_injected_default() {
        let init = ResponseInit {
            headers: Some(Headers::from([(
                "Content-Type",
                "application/problem+json",
            )])),
            ..Default::default()
        };
        let response = Response::from_json(&json!({}), init).unwrap();

        assert_eq!(
            response.headers.get("content-type"),
            Some("application/problem+json")
        );
        assert_eq!(response.headers.len(), 1);
    }

    #[test]
    fn from_json_keeps_caller_status_and_extra_headers() {
        let init = ResponseInit {
            status: Some(201),
            status_text: Some("Created".to_string()),
            headers: Some(Headers::from([("Location", "/api/items/7")])),
        };
        let response = Response::from_json(&json!({"id": 7}), init).unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.status_text, "Created");
        assert_eq!(response.headers.get("location"), Some("/api/items/7"));
        assert_eq!(
            response.headers.get("content-type"),
            Some("application/json")
        );
    }

    #[test]
    fn from_json_surfaces_serialization_failures() {
        use std::collections::HashMap;

        // non-string keys cannot be represented as a JSON object
        let data: HashMap<Vec<u8>, u8> = HashMap::from([(vec![1], 1)]);
        assert!(matches!(
            Response::from_json(&data, ResponseInit::default()),
            Err(BodyError::Serialize(_))
        ));
    }

    #[tokio::test]
    async fn structured_bodies_decode_to_themselves() {
        let response = Response::new(json!([1, 2]), ResponseInit::default());
        assert_eq!(response.json().await.unwrap(), json!([1, 2]));
    }
}
