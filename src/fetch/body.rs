use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Failures surfaced by the `json()` accessors and the JSON factory.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// The body was a string that did not hold valid JSON.
    #[error("malformed JSON body: {0}")]
    Parse(#[source] serde_json::Error),

    /// The value handed to the JSON factory could not be serialized.
    #[error("cannot serialize body: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A request or response payload, stored verbatim at construction.
///
/// `Empty` stands in for the absent body of the emulated primitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No body was supplied.
    #[default]
    Empty,
    /// Raw text; `json()` parses it on access.
    Text(String),
    /// An already-structured value.
    Json(Value),
}

impl Body {
    /// Returns whether no body was supplied.
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    /// The shared `json()` decode contract: string bodies are parsed and
    /// fail fast on malformed JSON (the empty string included); structured
    /// bodies come back verbatim; an absent or null body decodes to the
    /// empty object.
    pub(crate) fn decode(&self) -> Result<Value, BodyError> {
        match self {
            Body::Text(raw) => serde_json::from_str(raw).map_err(BodyError::Parse),
            Body::Json(Value::Null) | Body::Empty => Ok(Value::Object(Map::new())),
            Body::Json(value) => Ok(value.clone()),
        }
    }

    /// Typed decode on top of [`decode`](Body::decode).
    pub(crate) fn decode_as<T: DeserializeOwned>(&self) -> Result<T, BodyError> {
        let value = self.decode()?;
        serde_json::from_value(value).map_err(BodyError::Parse)
    }
}

impl From<&str> for Body {
    fn from(raw: &str) -> Self {
        Body::Text(raw.to_string())
    }
}

impl From<String> for Body {
    fn from(raw: String) -> Self {
        Body::Text(raw)
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}
