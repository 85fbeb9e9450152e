//! Browser bindings for the `sparsenet` codec.
//!
//! Every export returns a `{ ok, value }` / `{ ok: false, error }` envelope.
//! The same commands are available natively through [`api::dispatch`].

use serde_json::Value;
use sparsenet::{DecodeOptions, SparseNetwork};
use wasm_bindgen::prelude::*;

pub mod api;
pub mod error;
pub mod interop;

use error::{envelope, ApiError, ApiResult};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Codec session holding per-caller decode caps.
#[wasm_bindgen]
pub struct Codec {
    options: DecodeOptions,
}

impl Codec {
    fn call(&self, command: &str, payload: JsValue) -> JsValue {
        let result = interop::from_js(command, payload)
            .and_then(|p| api::run(command, p, &self.options));
        interop::to_js(&envelope(result))
    }
}

#[wasm_bindgen]
impl Codec {
    /// `options` may be `undefined` or a partial `{ maxVertices, maxRegions, maxPaths }`.
    /// Malformed options throw a `json_parse` error envelope.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<Codec, JsValue> {
        let options = if options.is_undefined() || options.is_null() {
            DecodeOptions::default()
        } else {
            interop::from_js("codec", options)
                .and_then(api::decode_options)
                .map_err(|e| interop::to_js(&error::err(&e)))?
        };
        Ok(Codec { options })
    }

    pub fn dispatch(&self, command: &str, payload: JsValue) -> JsValue {
        self.call(command, payload)
    }

    pub fn encode(&self, payload: JsValue) -> JsValue {
        self.call("encode", payload)
    }

    pub fn decode(&self, payload: JsValue) -> JsValue {
        self.call("decode", payload)
    }

    pub fn extract_region(&self, payload: JsValue) -> JsValue {
        self.call("extractRegion", payload)
    }

    pub fn extract_path(&self, payload: JsValue) -> JsValue {
        self.call("extractPath", payload)
    }

    pub fn gradient_to_params(&self, payload: JsValue) -> JsValue {
        self.call("gradientToParams", payload)
    }

    pub fn params_to_gradient(&self, payload: JsValue) -> JsValue {
        self.call("paramsToGradient", payload)
    }

    pub fn image_to_params(&self, payload: JsValue) -> JsValue {
        self.call("imageToParams", payload)
    }

    pub fn params_to_image(&self, payload: JsValue) -> JsValue {
        self.call("paramsToImage", payload)
    }
}

/// Stateless entry with default caps; `payload` is JSON text.
#[wasm_bindgen]
pub fn dispatch(command: &str, payload: &str) -> JsValue {
    interop::to_js(&api::dispatch_str(command, payload))
}

fn sparse_from_js(command: &str, value: JsValue) -> ApiResult<SparseNetwork> {
    let v: Value = interop::from_js(command, value)?;
    serde_json::from_value(v).map_err(|e| ApiError::json_parse(command, e))
}

/// `{ ok, value: Float64Array }` of flat vertex coordinates.
#[wasm_bindgen]
pub fn vertex_positions(sparse: JsValue) -> JsValue {
    match sparse_from_js("vertexPositions", sparse).and_then(|s| interop::vertex_coords(&s)) {
        Ok(coords) => typed_ok(interop::arr_f64(&coords).into()),
        Err(e) => interop::to_js(&error::err(&e)),
    }
}

/// `{ ok, value: Uint32Array }` of flat segment endpoints.
#[wasm_bindgen]
pub fn segment_endpoints(sparse: JsValue) -> JsValue {
    match sparse_from_js("segmentEndpoints", sparse).and_then(|s| interop::segment_pairs(&s)) {
        Ok(pairs) => typed_ok(interop::arr_u32(&pairs).into()),
        Err(e) => interop::to_js(&error::err(&e)),
    }
}

fn typed_ok(value: JsValue) -> JsValue {
    let obj = interop::new_obj();
    interop::set_kv(&obj, "ok", &JsValue::from_bool(true));
    interop::set_kv(&obj, "value", &value);
    obj.into()
}
