use js_sys::{Float64Array, Object, Reflect, Uint32Array};
use serde::Serialize;
use serde_json::Value;
use sparsenet::{decode, SparseNetwork};
use wasm_bindgen::prelude::*;

use crate::error::{ApiError, ApiResult};

pub fn new_obj() -> Object {
    Object::new()
}

pub fn set_kv(obj: &Object, key: &str, val: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), val);
}

pub fn arr_u32(data: &[u32]) -> Uint32Array {
    Uint32Array::from(data)
}

pub fn arr_f64(data: &[f64]) -> Float64Array {
    Float64Array::from(data)
}

/// Plain JS objects for maps, so envelopes read naturally on the JS side.
pub fn to_js(value: &Value) -> JsValue {
    match value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(v) => v,
        Err(e) => err_obj("malformed_input", &format!("response not representable in JS: {}", e)),
    }
}

/// Error envelope built directly from JS objects, for when serde cannot run.
fn err_obj(code: &str, message: &str) -> JsValue {
    let error = new_obj();
    set_kv(&error, "code", &JsValue::from_str(code));
    set_kv(&error, "message", &JsValue::from_str(message));
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    set_kv(&root, "error", &error.into());
    root.into()
}

pub fn from_js(command: &str, value: JsValue) -> ApiResult<Value> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        ApiError::json_parse(command, serde::de::Error::custom(e.to_string()))
    })
}

/// Flat `[x0, y0, x1, y1, ...]` coordinates of a sparse network.
pub fn vertex_coords(sparse: &SparseNetwork) -> ApiResult<Vec<f64>> {
    let points = sparse.parse_vertices()?;
    Ok(points.iter().flat_map(|p| [p.x, p.y]).collect())
}

/// Flat `[start0, end0, start1, end1, ...]` segment endpoints after decoding.
pub fn segment_pairs(sparse: &SparseNetwork) -> ApiResult<Vec<u32>> {
    let net = decode(sparse)?;
    Ok(net.segments.iter().flat_map(|s| [s.start, s.end]).collect())
}
