//! JSON command layer shared by the wasm exports and native callers.
//!
//! Each command takes a JSON payload and returns a JSON value; [`dispatch`]
//! routes by command name and wraps the outcome in a result envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sparsenet::host::{read_geometry, write_geometry, SceneNode};
use sparsenet::model::Affine2;
use sparsenet::transform::{
    flattened_to_image_matrix, flattened_to_matrix, image_matrix_to_flattened,
    matrix_to_flattened, GradientParams, ImageTransformParams,
};
use sparsenet::{
    decode_with, encode, extract_path, extract_region, DecodeOptions, SparseNetwork,
    VectorNetwork,
};

use crate::error::{envelope, ApiError, ApiResult};

#[derive(Deserialize)]
struct EncodeRequest {
    network: VectorNetwork,
}

#[derive(Deserialize)]
struct DecodeRequest {
    network: SparseNetwork,
    #[serde(default)]
    options: Option<DecodeOptions>,
}

#[derive(Deserialize)]
struct ExtractRequest {
    network: SparseNetwork,
    index: usize,
    #[serde(default)]
    remove: bool,
}

#[derive(Deserialize)]
struct TransformRequest {
    transform: Affine2,
}

#[derive(Deserialize)]
struct NodeRequest {
    node: SceneNode,
}

#[derive(Deserialize)]
struct WriteGeometryRequest {
    node: SceneNode,
    network: SparseNetwork,
}

fn parse<T: DeserializeOwned>(command: &str, payload: Value) -> ApiResult<T> {
    serde_json::from_value(payload).map_err(|e| ApiError::json_parse(command, e))
}

fn to_json<T: Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::Codec(sparsenet::CodecError::malformed("response", e.to_string())))
}

/// Per-session decode caps; `null` selects the defaults.
pub fn decode_options(payload: Value) -> ApiResult<DecodeOptions> {
    if payload.is_null() {
        return Ok(DecodeOptions::default());
    }
    parse("codec", payload)
}

pub fn encode_network(payload: Value) -> ApiResult<Value> {
    let req: EncodeRequest = parse("encode", payload)?;
    to_json(&encode(&req.network)?)
}

pub fn decode_network(payload: Value, defaults: &DecodeOptions) -> ApiResult<Value> {
    let req: DecodeRequest = parse("decode", payload)?;
    let opts = req.options.unwrap_or(*defaults);
    to_json(&decode_with(&req.network, &opts)?)
}

pub fn extract_region_cmd(payload: Value) -> ApiResult<Value> {
    let req: ExtractRequest = parse("extractRegion", payload)?;
    to_json(&extract_region(&req.network, req.index, req.remove)?)
}

pub fn extract_path_cmd(payload: Value) -> ApiResult<Value> {
    let req: ExtractRequest = parse("extractPath", payload)?;
    to_json(&extract_path(&req.network, req.index, req.remove)?)
}

pub fn gradient_to_params(payload: Value) -> ApiResult<Value> {
    let req: TransformRequest = parse("gradientToParams", payload)?;
    to_json(&matrix_to_flattened(&req.transform))
}

pub fn params_to_gradient(payload: Value) -> ApiResult<Value> {
    let params: GradientParams = parse("paramsToGradient", payload)?;
    to_json(&flattened_to_matrix(&params))
}

pub fn image_to_params(payload: Value) -> ApiResult<Value> {
    let req: TransformRequest = parse("imageToParams", payload)?;
    to_json(&image_matrix_to_flattened(&req.transform))
}

pub fn params_to_image(payload: Value) -> ApiResult<Value> {
    let params: ImageTransformParams = parse("paramsToImage", payload)?;
    to_json(&flattened_to_image_matrix(&params))
}

pub fn read_node_geometry(payload: Value) -> ApiResult<Value> {
    let req: NodeRequest = parse("readGeometry", payload)?;
    to_json(&read_geometry(&req.node)?)
}

/// Returns the node with its network replaced.
pub fn write_node_geometry(payload: Value) -> ApiResult<Value> {
    let mut req: WriteGeometryRequest = parse("writeGeometry", payload)?;
    write_geometry(&mut req.node, &req.network)?;
    to_json(&req.node)
}

pub fn run(command: &str, payload: Value, defaults: &DecodeOptions) -> ApiResult<Value> {
    tracing::debug!(command, "dispatch");
    match command {
        "encode" => encode_network(payload),
        "decode" => decode_network(payload, defaults),
        "extractRegion" => extract_region_cmd(payload),
        "extractPath" => extract_path_cmd(payload),
        "gradientToParams" => gradient_to_params(payload),
        "paramsToGradient" => params_to_gradient(payload),
        "imageToParams" => image_to_params(payload),
        "paramsToImage" => params_to_image(payload),
        "readGeometry" => read_node_geometry(payload),
        "writeGeometry" => write_node_geometry(payload),
        other => Err(ApiError::UnknownCommand(other.to_string())),
    }
}

/// Runs `command` and wraps the outcome in a result envelope.
pub fn dispatch(command: &str, payload: Value) -> Value {
    envelope(run(command, payload, &DecodeOptions::default()))
}

/// Like [`dispatch`] but takes the request as JSON text.
pub fn dispatch_str(command: &str, payload: &str) -> Value {
    let parsed = serde_json::from_str(payload).map_err(|e| ApiError::json_parse(command, e));
    envelope(parsed.and_then(|p| run(command, p, &DecodeOptions::default())))
}
