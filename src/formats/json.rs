use anyhow::Result;
use serde_json::Value;

use crate::{error::ResponseError, model::TranscriptionResult};

/// Decodes a transcription server body, surfacing an `error` field as a
/// server failure rather than an empty result.
pub fn parse_response(input: &str) -> Result<TranscriptionResult, ResponseError> {
    let v: Value = serde_json::from_str(input)?;

    if let Some(err) = server_error(&v) {
        return Err(ResponseError::Server(err));
    }

    Ok(serde_json::from_value(v)?)
}

pub(crate) fn server_error(v: &Value) -> Option<String> {
    match v.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn write_json(r: &TranscriptionResult) -> Result<String> {
    let mut s = serde_json::to_string_pretty(r)?;
    s.push('\n');
    Ok(s)
}
