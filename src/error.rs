//! Result envelopes returned to JS callers.
//!
//! Success is `{ ok: true, value }`; failure is
//! `{ ok: false, error: { code, message, data? } }`.

use serde_json::{json, Value};
use sparsenet::CodecError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("invalid '{command}' payload: {source}")]
    JsonParse {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

impl ApiError {
    pub fn json_parse(command: &str, source: serde_json::Error) -> Self {
        ApiError::JsonParse { command: command.to_string(), source }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Codec(e) => e.code(),
            ApiError::JsonParse { .. } => "json_parse",
            ApiError::UnknownCommand(_) => "unknown_command",
        }
    }

    fn data(&self) -> Option<Value> {
        match self {
            ApiError::Codec(CodecError::MalformedInput { field, .. }) => {
                Some(json!({ "field": field }))
            }
            ApiError::Codec(CodecError::IndexOutOfRange { field, index, len }) => {
                Some(json!({ "field": field, "index": index, "len": len }))
            }
            ApiError::Codec(CodecError::Structural { .. }) => None,
            ApiError::JsonParse { command, source } => Some(json!({
                "command": command,
                "line": source.line(),
                "column": source.column(),
            })),
            ApiError::UnknownCommand(command) => Some(json!({ "command": command })),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub fn ok(value: Value) -> Value {
    json!({ "ok": true, "value": value })
}

pub fn err(e: &ApiError) -> Value {
    report(e);
    let mut error = json!({ "code": e.code(), "message": e.to_string() });
    if let Some(data) = e.data() {
        error["data"] = data;
    }
    json!({ "ok": false, "error": error })
}

pub fn envelope(result: ApiResult<Value>) -> Value {
    match result {
        Ok(v) => ok(v),
        Err(e) => err(&e),
    }
}

#[cfg(target_arch = "wasm32")]
fn report(e: &ApiError) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&format!(
        "sparsenet: [{}] {}",
        e.code(),
        e
    )));
}

#[cfg(not(target_arch = "wasm32"))]
fn report(e: &ApiError) {
    tracing::warn!(code = e.code(), "{}", e);
}
