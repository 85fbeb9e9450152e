//! Sparse interchange form of a vector network.
//!
//! Nested arrays (`loops`, `paths`, handle tuples, the vertex list) travel as
//! JSON-encoded strings rather than nested JSON arrays. Existing callers depend
//! on that convention, so the string helpers below are the only place those
//! fields are parsed or produced.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::geometry::bounds::Bounds;
use crate::geometry::limits;
use crate::model::{HandleMirroring, Paint, StrokeCap, StrokeJoin, Vec2, Vertex, WindingRule};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseNetwork {
    /// Flat `[x0, y0, x1, y1, ...]` list.
    pub vertices: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<SparseRegion>,
    /// Deduplicated paint arrays referenced by `SparseRegion::fill_index`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Vec<Paint>>,
    /// Open polylines as vertex index sequences.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
    /// `vertex -> "[inX,inY,outX,outY]"`, all-zero entries omitted.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub handles: BTreeMap<u32, String>,
    /// `vertex -> non-default style fields`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vertex_props: BTreeMap<u32, VertexProps>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseRegion {
    pub loops: Vec<String>,
    #[serde(default, skip_serializing_if = "WindingRule::is_default")]
    pub winding_rule: WindingRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_index: Option<usize>,
}

/// Style overrides for one vertex; `None` means default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_cap: Option<StrokeCap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_join: Option<StrokeJoin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_mirroring: Option<HandleMirroring>,
}

impl VertexProps {
    /// Non-default fields of `v`, or `None` when the vertex is fully default.
    pub fn of(v: &Vertex) -> Option<VertexProps> {
        if v.has_default_style() {
            return None;
        }
        let props = VertexProps {
            corner_radius: (v.corner_radius != 0.0).then_some(v.corner_radius),
            stroke_cap: (v.stroke_cap != StrokeCap::None).then_some(v.stroke_cap),
            stroke_join: (v.stroke_join != StrokeJoin::Miter).then_some(v.stroke_join),
            handle_mirroring: (v.handle_mirroring != HandleMirroring::None)
                .then_some(v.handle_mirroring),
        };
        Some(props)
    }

    pub fn apply(&self, v: &mut Vertex) {
        if let Some(r) = self.corner_radius {
            v.corner_radius = r;
        }
        if let Some(c) = self.stroke_cap {
            v.stroke_cap = c;
        }
        if let Some(j) = self.stroke_join {
            v.stroke_join = j;
        }
        if let Some(m) = self.handle_mirroring {
            v.handle_mirroring = m;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == VertexProps::default()
    }
}

/// Per-vertex handle pair: `inbound` is the tangent of segments ending at the
/// vertex, `outbound` the tangent of segments starting there.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandlePair {
    pub inbound: Vec2,
    pub outbound: Vec2,
}

impl HandlePair {
    pub fn is_zero(&self) -> bool {
        self.inbound.is_zero() && self.outbound.is_zero()
    }
}

impl SparseNetwork {
    pub fn from_json_str(s: &str) -> Result<SparseNetwork> {
        serde_json::from_str(s).map_err(|e| CodecError::malformed("network", e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CodecError::malformed("network", e.to_string()))
    }

    pub fn parse_vertices(&self) -> Result<Vec<Vec2>> {
        parse_vertices(&self.vertices)
    }

    pub fn vertex_count(&self) -> Result<usize> {
        Ok(self.parse_vertices()?.len())
    }

    pub fn bounds(&self) -> Result<Option<Bounds>> {
        Ok(Bounds::of_points(self.parse_vertices()?.iter().map(|p| (p.x, p.y))))
    }

    /// 100x100 square with one default region.
    pub fn placeholder_square() -> SparseNetwork {
        SparseNetwork {
            vertices: "[0,0,100,0,100,100,0,100]".to_string(),
            regions: vec![SparseRegion {
                loops: vec!["[0,1,2,3]".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// 100 unit horizontal two-point line.
    pub fn placeholder_line() -> SparseNetwork {
        SparseNetwork {
            vertices: "[0,0,100,0]".to_string(),
            paths: vec!["[0,1]".to_string()],
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// String-encoded fields

pub fn parse_vertices(s: &str) -> Result<Vec<Vec2>> {
    let flat: Vec<f64> =
        serde_json::from_str(s).map_err(|e| CodecError::malformed("vertices", e.to_string()))?;
    if flat.len() % 2 != 0 {
        return Err(CodecError::malformed(
            "vertices",
            format!("odd coordinate count {}", flat.len()),
        ));
    }
    if flat.len() / 2 > limits::MAX_VERTICES {
        return Err(CodecError::structural(format!(
            "vertex count {} exceeds limit {}",
            flat.len() / 2,
            limits::MAX_VERTICES
        )));
    }
    if let Some(bad) = flat.iter().position(|c| !limits::in_coord_bounds(*c)) {
        return Err(CodecError::malformed(
            "vertices",
            format!("coordinate {} is not a finite in-range number", bad),
        ));
    }
    Ok(flat.chunks_exact(2).map(|c| Vec2::new(c[0], c[1])).collect())
}

pub fn format_vertices<'a, I: IntoIterator<Item = &'a Vertex>>(vertices: I) -> String {
    let mut out = String::from("[");
    for (i, v) in vertices.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_number(&mut out, v.x);
        out.push(',');
        push_number(&mut out, v.y);
    }
    out.push(']');
    out
}

/// Parses a vertex index list and checks every entry against `vertex_count`.
pub fn parse_index_list(field: &str, s: &str, vertex_count: usize) -> Result<Vec<u32>> {
    let raw: Vec<i64> =
        serde_json::from_str(s).map_err(|e| CodecError::malformed(field, e.to_string()))?;
    raw.into_iter()
        .map(|i| check_index(field, i, vertex_count))
        .collect()
}

pub fn format_index_list(indices: &[u32]) -> String {
    let mut out = String::from("[");
    for (i, idx) in indices.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", idx);
    }
    out.push(']');
    out
}

pub fn parse_handle(field: &str, s: &str) -> Result<HandlePair> {
    let raw: Vec<f64> =
        serde_json::from_str(s).map_err(|e| CodecError::malformed(field, e.to_string()))?;
    match raw.as_slice() {
        [ix, iy, ox, oy] => {
            if raw.iter().any(|c| !limits::in_coord_bounds(*c)) {
                return Err(CodecError::malformed(field, "handle component out of range"));
            }
            Ok(HandlePair { inbound: Vec2::new(*ix, *iy), outbound: Vec2::new(*ox, *oy) })
        }
        _ => Err(CodecError::malformed(
            field,
            format!("expected 4 numbers, got {}", raw.len()),
        )),
    }
}

pub fn format_handle(h: &HandlePair) -> String {
    let mut out = String::from("[");
    for (i, c) in [h.inbound.x, h.inbound.y, h.outbound.x, h.outbound.y].into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_number(&mut out, c);
    }
    out.push(']');
    out
}

pub(crate) fn check_index(field: &str, index: i64, len: usize) -> Result<u32> {
    if index < 0 || index as u64 >= len as u64 {
        return Err(CodecError::out_of_range(field, index, len));
    }
    Ok(index as u32)
}

// Display gives the shortest round-tripping form and drops a trailing ".0".
fn push_number(out: &mut String, v: f64) {
    let _ = write!(out, "{}", v);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_round_trip_compactly() {
        let vs = [Vertex::at(0.0, 0.5), Vertex::at(10.0, -3.25)];
        let s = format_vertices(vs.iter());
        assert_eq!(s, "[0,0.5,10,-3.25]");
        let back = parse_vertices(&s).unwrap();
        assert_eq!(back, vec![Vec2::new(0.0, 0.5), Vec2::new(10.0, -3.25)]);
    }

    #[test]
    fn odd_vertex_list_is_malformed() {
        let err = parse_vertices("[0,1,2]").unwrap_err();
        assert_eq!(err.code(), "malformed_input");
    }

    #[test]
    fn negative_and_large_indices_are_out_of_range() {
        assert_eq!(parse_index_list("paths[0]", "[0,-1]", 4).unwrap_err().code(), "out_of_range");
        assert_eq!(parse_index_list("paths[0]", "[0,4]", 4).unwrap_err().code(), "out_of_range");
        assert_eq!(parse_index_list("paths[0]", "[0,1.5]", 4).unwrap_err().code(), "malformed_input");
    }

    #[test]
    fn handle_tuple_needs_four_numbers() {
        assert!(parse_handle("handles[0]", "[1,2,3]").is_err());
        let h = parse_handle("handles[0]", "[1,2,3,4]").unwrap();
        assert_eq!(h.inbound, Vec2::new(1.0, 2.0));
        assert_eq!(h.outbound, Vec2::new(3.0, 4.0));
        assert_eq!(format_handle(&h), "[1,2,3,4]");
    }

    #[test]
    fn default_vertex_has_no_props() {
        assert!(VertexProps::of(&Vertex::at(1.0, 1.0)).is_none());
        let mut v = Vertex::at(1.0, 1.0);
        v.stroke_join = StrokeJoin::Round;
        let props = VertexProps::of(&v).unwrap();
        assert_eq!(props.stroke_join, Some(StrokeJoin::Round));
        assert_eq!(props.corner_radius, None);
    }
}
