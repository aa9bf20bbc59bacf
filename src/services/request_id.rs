use reqwest::header::HeaderValue;
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id attached to every outgoing request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Header value carrying this id
    pub fn header_value(&self) -> HeaderValue {
        // hyphenated UUIDs are ASCII
        HeaderValue::from_str(&self.0.to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
