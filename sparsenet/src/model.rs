use serde::{Deserialize, Serialize};

use crate::geometry::bounds::Bounds;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeCap {
    #[default]
    None,
    Round,
    Square,
    ArrowLines,
    ArrowEquilateral,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeJoin {
    #[default]
    Miter,
    Bevel,
    Round,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandleMirroring {
    #[default]
    None,
    Angle,
    AngleAndLength,
}

/// A network vertex. Identity is its index in `VectorNetwork::vertices`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default)]
    pub stroke_cap: StrokeCap,
    #[serde(default)]
    pub stroke_join: StrokeJoin,
    #[serde(default)]
    pub handle_mirroring: HandleMirroring,
}

impl Vertex {
    pub fn at(x: f64, y: f64) -> Self {
        Vertex { x, y, ..Default::default() }
    }

    /// True when every style field holds its default value.
    pub fn has_default_style(&self) -> bool {
        self.corner_radius == 0.0
            && self.stroke_cap == StrokeCap::None
            && self.stroke_join == StrokeJoin::Miter
            && self.handle_mirroring == HandleMirroring::None
    }
}

/// Directed curve edge. Tangents are handle offsets relative to their endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub start: u32,
    pub end: u32,
    #[serde(default)]
    pub tangent_start: Vec2,
    #[serde(default)]
    pub tangent_end: Vec2,
}

impl Segment {
    pub fn line(start: u32, end: u32) -> Self {
        Segment { start, end, ..Default::default() }
    }

    pub fn is_straight(&self) -> bool {
        self.tangent_start.is_zero() && self.tangent_end.is_zero()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WindingRule {
    #[default]
    #[serde(alias = "nonzero")]
    Nonzero,
    #[serde(alias = "evenodd")]
    Evenodd,
}

impl WindingRule {
    pub fn is_default(&self) -> bool {
        *self == WindingRule::Nonzero
    }
}

/// Filled face: first loop is the outer boundary, the rest are holes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub loops: Vec<Vec<u32>>,
    #[serde(default)]
    pub winding_rule: WindingRule,
    #[serde(default)]
    pub fills: Vec<Paint>,
}

/// Native graph representation read from and written to the host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorNetwork {
    pub vertices: Vec<Vertex>,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub regions: Vec<Region>,
}

impl VectorNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn add_vertex(&mut self, x: f64, y: f64) -> u32 {
        let id = self.vertices.len() as u32;
        self.vertices.push(Vertex::at(x, y));
        id
    }

    pub fn add_segment(&mut self, start: u32, end: u32) -> u32 {
        let id = self.segments.len() as u32;
        self.segments.push(Segment::line(start, end));
        id
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(self.vertices.iter().map(|v| (v.x, v.y)))
    }
}

// ---------------------------------------------------------------------------
// Paints

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "one")]
    pub a: f64,
}

impl Rgba {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Rgba,
}

/// 2x3 affine matrix laid out as `[[a, c, tx], [b, d, ty]]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Affine2(pub [[f64; 3]; 2]);

impl Default for Affine2 {
    fn default() -> Self {
        Affine2::IDENTITY
    }
}

impl Affine2 {
    pub const IDENTITY: Affine2 = Affine2([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    pub fn from_columns(x_axis: Vec2, y_axis: Vec2, translation: Vec2) -> Self {
        Affine2([
            [x_axis.x, y_axis.x, translation.x],
            [x_axis.y, y_axis.y, translation.y],
        ])
    }

    pub fn x_axis(&self) -> Vec2 {
        Vec2::new(self.0[0][0], self.0[1][0])
    }

    pub fn y_axis(&self) -> Vec2 {
        Vec2::new(self.0[0][1], self.0[1][1])
    }

    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.0[0][2], self.0[1][2])
    }

    pub fn apply(&self, p: Vec2) -> Vec2 {
        let m = &self.0;
        Vec2::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2],
            m[1][0] * p.x + m[1][1] * p.y + m[1][2],
        )
    }

    pub fn approx_eq(&self, other: &Affine2, eps: f64) -> bool {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlendMode {
    #[default]
    Normal,
    Darken,
    Multiply,
    ColorBurn,
    Lighten,
    Screen,
    ColorDodge,
    Overlay,
    SoftLight,
    HardLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    #[default]
    Fill,
    Fit,
    Crop,
    Tile,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFilters {
    #[serde(default)]
    pub exposure: f64,
    #[serde(default)]
    pub contrast: f64,
    #[serde(default)]
    pub saturation: f64,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub tint: f64,
    #[serde(default)]
    pub highlights: f64,
    #[serde(default)]
    pub shadows: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintCommon {
    #[serde(default = "one")]
    pub opacity: f64,
    #[serde(default = "yes")]
    pub visible: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
}

impl Default for PaintCommon {
    fn default() -> Self {
        PaintCommon { opacity: 1.0, visible: true, blend_mode: BlendMode::Normal }
    }
}

/// One paint layer. The `type` tag selects the variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid {
        color: Rgba,
        #[serde(flatten)]
        common: PaintCommon,
    },
    GradientLinear(GradientPaint),
    GradientRadial(GradientPaint),
    GradientAngular(GradientPaint),
    GradientDiamond(GradientPaint),
    Image(ImagePaint),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    pub gradient_stops: Vec<ColorStop>,
    #[serde(default)]
    pub gradient_transform: Affine2,
    #[serde(flatten)]
    pub common: PaintCommon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaint {
    pub image_hash: Option<String>,
    #[serde(default)]
    pub scale_mode: ScaleMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_transform: Option<Affine2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ImageFilters>,
    #[serde(flatten)]
    pub common: PaintCommon,
}

impl Paint {
    pub fn solid(r: f64, g: f64, b: f64) -> Self {
        Paint::Solid { color: Rgba::rgb(r, g, b), common: PaintCommon::default() }
    }

    pub fn common(&self) -> &PaintCommon {
        match self {
            Paint::Solid { common, .. } => common,
            Paint::GradientLinear(g)
            | Paint::GradientRadial(g)
            | Paint::GradientAngular(g)
            | Paint::GradientDiamond(g) => &g.common,
            Paint::Image(i) => &i.common,
        }
    }

    pub fn as_gradient(&self) -> Option<&GradientPaint> {
        match self {
            Paint::GradientLinear(g)
            | Paint::GradientRadial(g)
            | Paint::GradientAngular(g)
            | Paint::GradientDiamond(g) => Some(g),
            Paint::Solid { .. } | Paint::Image(_) => None,
        }
    }

    pub fn as_gradient_mut(&mut self) -> Option<&mut GradientPaint> {
        match self {
            Paint::GradientLinear(g)
            | Paint::GradientRadial(g)
            | Paint::GradientAngular(g)
            | Paint::GradientDiamond(g) => Some(g),
            Paint::Solid { .. } | Paint::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImagePaint> {
        match self {
            Paint::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImagePaint> {
        match self {
            Paint::Image(i) => Some(i),
            _ => None,
        }
    }
}

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}
