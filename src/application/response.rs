use serde::Serialize;
use std::collections::BTreeMap;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// The response envelope handed back to the hosting layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// The body parsed back into JSON. Mostly useful in tests.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Credentials".to_string(),
            "true".to_string(),
        ),
        ("Content-Type".to_string(), "application/json".to_string()),
    ])
}

/// Builds a JSON response with the permissive CORS headers every handler sends.
///
/// A body that cannot be serialized turns into a generic 500.
pub fn build_response<T: Serialize + ?Sized>(status_code: u16, body: &T) -> ApiResponse {
    match serde_json::to_string(body) {
        Ok(body) => ApiResponse {
            status_code,
            headers: default_headers(),
            body,
        },
        Err(e) => {
            tracing::error!(error = %e, status = status_code, "failed to serialize response body");
            ApiResponse {
                status_code: 500,
                headers: default_headers(),
                body: format!(r#"{{"error":"{}"}}"#, INTERNAL_SERVER_ERROR),
            }
        }
    }
}

/// `{"error": ...}` bodies, used by the create and list operations.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

/// `{"message": ...}` bodies, used by the get operation.
#[derive(Debug, Serialize)]
pub struct MessageBody<'a> {
    pub message: &'a str,
}
