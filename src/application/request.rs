use serde_json::{Map, Value};
use std::collections::HashMap;

/// A request as delivered by the hosting layer, independent of transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiRequest {
    pub body: Option<String>,
    pub path_parameters: HashMap<String, String>,
    pub query_string_parameters: HashMap<String, String>,
}

impl ApiRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_query_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters.insert(name.into(), value.into());
        self
    }

    /// A non-empty path parameter.
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// The body as JSON, falling back to an empty object.
    pub fn json_body(&self) -> Value {
        match self.body.as_deref() {
            Some(raw) if !raw.is_empty() => parse_input(raw),
            _ => Value::Object(Map::new()),
        }
    }

    /// The query string as a JSON object of string values.
    pub fn query_as_json(&self) -> Value {
        Value::Object(
            self.query_string_parameters
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}

/// Parses a request body as JSON.
///
/// Malformed input is logged and replaced by an empty object, so it surfaces
/// later as a validation error rather than a distinct failure.
pub fn parse_input(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to parse request body, treating it as empty");
        Value::Object(Map::new())
    })
}
