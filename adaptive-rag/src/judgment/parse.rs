//! Parsing of structured judgment replies.
//!
//! A reply must be one JSON object with exactly one entry: the call site's key
//! mapped to a string. A surrounding markdown code fence is tolerated; any other
//! text around the object is not.

use serde_json::{Map, Value};

use crate::error::RagError;

use super::JudgmentKind;

/// Strips a ```json / ``` fence if the whole reply is fenced.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Returns the string value under `kind`'s key, or `InvalidJudgment`.
pub(crate) fn single_value(kind: JudgmentKind, reply: &str) -> Result<String, RagError> {
    let invalid = || RagError::InvalidJudgment {
        kind,
        reply: reply.to_string(),
    };

    let object: Map<String, Value> =
        serde_json::from_str(strip_code_fence(reply)).map_err(|_| invalid())?;
    if object.len() != 1 {
        return Err(invalid());
    }
    match object.get(kind.result_key()) {
        Some(Value::String(value)) => Ok(value.clone()),
        _ => Err(invalid()),
    }
}
