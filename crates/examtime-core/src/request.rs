//! Request validation
//!
//! Turns a raw JSON body into a [`Query`]. The checks run in a fixed order
//! because the first failing check decides which message the caller sees.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, TimetableError};
use crate::types::{Query, QueryKind};

/// Unvalidated lookup request as sent by the caller
///
/// Both fields are kept as raw JSON so that validation, not
/// deserialization, decides the error message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ExtractRequest {
    /// Build a request from a JSON body.
    ///
    /// A body that is not a JSON object is read as a request with neither
    /// field set, so it fails validation with `"type is required"`.
    pub fn from_body(body: &[u8]) -> Self {
        // Only objects: serde would otherwise accept `["code"]` positionally
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Validate the request and produce a query.
    ///
    /// # Errors
    /// `TimetableError::InvalidQuery` carrying one of:
    /// - `"type is required"` if `type` is missing or falsy
    /// - `"type is name or code"` if `type` is anything else but those two
    /// - `"no codes"` / `"no names"` if `data` is missing, falsy or an empty list
    /// - `"data must be a list of strings"` if `data` has the wrong shape
    pub fn into_query(self) -> Result<Query> {
        let kind = match self.kind {
            None => return Err(invalid("type is required")),
            Some(ref value) if is_falsy(value) => return Err(invalid("type is required")),
            Some(Value::String(ref s)) => {
                QueryKind::parse(s).ok_or_else(|| invalid("type is name or code"))?
            }
            Some(_) => return Err(invalid("type is name or code")),
        };

        let items = match self.data {
            None => Vec::new(),
            Some(ref value) if is_falsy(value) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(invalid("data must be a list of strings")),
        };

        // Empty check first so `[]` reports "no codes" rather than a shape error
        if items.is_empty() {
            return Query::new(kind, Vec::new());
        }

        let terms = items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(invalid("data must be a list of strings")),
            })
            .collect::<Result<Vec<String>>>()?;

        Query::new(kind, terms)
    }
}

/// JavaScript falsiness for JSON values: `null`, `false`, `0` and `""`.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn invalid(message: &str) -> TimetableError {
    TimetableError::InvalidQuery(message.to_string())
}
