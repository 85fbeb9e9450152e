//! Narrow view of the host scene graph.
//!
//! Node kinds advertise what they support through capability traits; callers
//! reach a capability by matching on [`SceneNode`], never by probing fields.

use serde::{Deserialize, Serialize};

use crate::codec::{decode, encode};
use crate::error::{CodecError, Result};
use crate::model::{Paint, VectorNetwork};
use crate::sparse::SparseNetwork;
use crate::transform::{
    flattened_to_image_matrix, flattened_to_matrix, image_matrix_to_flattened,
    matrix_to_flattened, GradientParams, ImageTransformParams,
};

pub trait HasVectorNetwork {
    fn vector_network(&self) -> &VectorNetwork;
    /// Swaps in a whole network in one step.
    fn replace_vector_network(&mut self, net: VectorNetwork);
}

pub trait HasFills {
    fn fills(&self) -> &[Paint];
    fn set_fills(&mut self, fills: Vec<Paint>);
}

pub trait HasStrokes {
    fn strokes(&self) -> &[Paint];
    fn stroke_weight(&self) -> f64;
    fn set_strokes(&mut self, strokes: Vec<Paint>, weight: f64);
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorNode {
    pub name: String,
    pub network: VectorNetwork,
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub strokes: Vec<Paint>,
    #[serde(default)]
    pub stroke_weight: f64,
}

/// Rectangles, ellipses, polygons: paintable but without editable geometry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeNode {
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub strokes: Vec<Paint>,
    #[serde(default)]
    pub stroke_weight: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub name: String,
    pub characters: String,
    #[serde(default)]
    pub fills: Vec<Paint>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SceneNode {
    Vector(VectorNode),
    Shape(ShapeNode),
    Text(TextNode),
    Group(GroupNode),
}

macro_rules! impl_fills {
    ($($t:ty),*) => {$(
        impl HasFills for $t {
            fn fills(&self) -> &[Paint] { &self.fills }
            fn set_fills(&mut self, fills: Vec<Paint>) { self.fills = fills; }
        }
    )*};
}
impl_fills!(VectorNode, ShapeNode, TextNode);

macro_rules! impl_strokes {
    ($($t:ty),*) => {$(
        impl HasStrokes for $t {
            fn strokes(&self) -> &[Paint] { &self.strokes }
            fn stroke_weight(&self) -> f64 { self.stroke_weight }
            fn set_strokes(&mut self, strokes: Vec<Paint>, weight: f64) {
                self.strokes = strokes;
                self.stroke_weight = weight;
            }
        }
    )*};
}
impl_strokes!(VectorNode, ShapeNode);

impl HasVectorNetwork for VectorNode {
    fn vector_network(&self) -> &VectorNetwork {
        &self.network
    }
    fn replace_vector_network(&mut self, net: VectorNetwork) {
        self.network = net;
    }
}

impl SceneNode {
    pub fn name(&self) -> &str {
        match self {
            SceneNode::Vector(n) => &n.name,
            SceneNode::Shape(n) => &n.name,
            SceneNode::Text(n) => &n.name,
            SceneNode::Group(n) => &n.name,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            SceneNode::Vector(_) => "vector",
            SceneNode::Shape(_) => "shape",
            SceneNode::Text(_) => "text",
            SceneNode::Group(_) => "group",
        }
    }

    pub fn as_vector(&self) -> Option<&dyn HasVectorNetwork> {
        match self {
            SceneNode::Vector(n) => Some(n),
            SceneNode::Shape(_) | SceneNode::Text(_) | SceneNode::Group(_) => None,
        }
    }

    pub fn as_vector_mut(&mut self) -> Option<&mut dyn HasVectorNetwork> {
        match self {
            SceneNode::Vector(n) => Some(n),
            SceneNode::Shape(_) | SceneNode::Text(_) | SceneNode::Group(_) => None,
        }
    }

    pub fn fills(&self) -> Option<&dyn HasFills> {
        match self {
            SceneNode::Vector(n) => Some(n),
            SceneNode::Shape(n) => Some(n),
            SceneNode::Text(n) => Some(n),
            SceneNode::Group(_) => None,
        }
    }

    pub fn fills_mut(&mut self) -> Option<&mut dyn HasFills> {
        match self {
            SceneNode::Vector(n) => Some(n),
            SceneNode::Shape(n) => Some(n),
            SceneNode::Text(n) => Some(n),
            SceneNode::Group(_) => None,
        }
    }

    pub fn strokes_mut(&mut self) -> Option<&mut dyn HasStrokes> {
        match self {
            SceneNode::Vector(n) => Some(n),
            SceneNode::Shape(n) => Some(n),
            SceneNode::Text(_) | SceneNode::Group(_) => None,
        }
    }
}

/// Encodes the node's current geometry.
pub fn read_geometry(node: &SceneNode) -> Result<SparseNetwork> {
    let vector = node.as_vector().ok_or_else(|| no_geometry(node))?;
    encode(vector.vector_network())
}

/// Decodes `sparse` and replaces the node's network. The node is untouched
/// unless the whole payload decodes.
pub fn write_geometry(node: &mut SceneNode, sparse: &SparseNetwork) -> Result<()> {
    if node.as_vector().is_none() {
        return Err(no_geometry(node));
    }
    let net = decode(sparse)?;
    if let Some(vector) = node.as_vector_mut() {
        vector.replace_vector_network(net);
    }
    Ok(())
}

fn no_geometry(node: &SceneNode) -> CodecError {
    CodecError::structural(format!(
        "{} node '{}' has no vector network",
        node.kind(),
        node.name()
    ))
}

pub fn gradient_handles(paint: &Paint) -> Option<GradientParams> {
    paint.as_gradient().map(|g| matrix_to_flattened(&g.gradient_transform))
}

pub fn set_gradient_handles(paint: &mut Paint, params: GradientParams) -> Result<()> {
    let g = paint
        .as_gradient_mut()
        .ok_or_else(|| CodecError::structural("paint is not a gradient"))?;
    check_finite(&[
        params.start_x,
        params.start_y,
        params.end_x,
        params.end_y,
        params.scale.unwrap_or(1.0),
    ])?;
    g.gradient_transform = flattened_to_matrix(&params);
    Ok(())
}

/// Image paints without an explicit transform report the identity.
pub fn image_transform_params(paint: &Paint) -> Option<ImageTransformParams> {
    paint
        .as_image()
        .map(|i| image_matrix_to_flattened(&i.image_transform.unwrap_or_default()))
}

pub fn set_image_transform(paint: &mut Paint, params: ImageTransformParams) -> Result<()> {
    let image = paint
        .as_image_mut()
        .ok_or_else(|| CodecError::structural("paint is not an image"))?;
    check_finite(&[
        params.offset_x,
        params.offset_y,
        params.scale_x,
        params.scale_y,
        params.rotation,
        params.skew_x,
        params.skew_y,
    ])?;
    image.image_transform = Some(flattened_to_image_matrix(&params));
    Ok(())
}

fn check_finite(values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CodecError::malformed("transform params", "parameters must be finite"))
    }
}
