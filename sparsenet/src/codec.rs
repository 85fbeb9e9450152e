//! Encode/decode between [`VectorNetwork`] and [`SparseNetwork`].
//!
//! Encode claims the segments walked by region loops, dedupes region fills
//! into a table and traces every remaining segment into open paths. Decode
//! validates the whole payload before building anything, so a failure never
//! yields a partial network.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::algorithms::fill_index::FillIndex;
use crate::algorithms::open_path::trace_open_paths;
use crate::error::{CodecError, Result};
use crate::geometry::limits;
use crate::model::{Region, Segment, Vertex, VectorNetwork};
use crate::sparse::{
    check_index, format_handle, format_index_list, format_vertices, parse_handle,
    parse_index_list, parse_vertices, HandlePair, SparseNetwork, SparseRegion, VertexProps,
};

/// Per-call caps applied by [`decode_with`]. Defaults come from `limits`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecodeOptions {
    pub max_vertices: usize,
    pub max_regions: usize,
    pub max_paths: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_vertices: limits::MAX_VERTICES,
            max_regions: limits::MAX_REGIONS,
            max_paths: limits::MAX_PATHS,
        }
    }
}

type PairKey = (u32, u32);

fn pair_key(a: u32, b: u32) -> PairKey {
    if a <= b { (a, b) } else { (b, a) }
}

/// Segments grouped by undirected endpoint pair, ascending by index.
fn segments_by_pair(segments: &[Segment]) -> HashMap<PairKey, Vec<usize>> {
    let mut map: HashMap<PairKey, Vec<usize>> = HashMap::new();
    for (i, s) in segments.iter().enumerate() {
        map.entry(pair_key(s.start, s.end)).or_default().push(i);
    }
    map
}

fn loop_edges(lp: &[u32]) -> impl Iterator<Item = (u32, u32)> + '_ {
    let n = lp.len();
    (0..n).map(move |k| (lp[k], lp[(k + 1) % n]))
}

pub fn encode(net: &VectorNetwork) -> Result<SparseNetwork> {
    let n = net.vertices.len();
    tracing::debug!(
        vertices = n,
        segments = net.segments.len(),
        regions = net.regions.len(),
        "encode vector network"
    );

    for (i, v) in net.vertices.iter().enumerate() {
        if !limits::in_coord_bounds(v.x) || !limits::in_coord_bounds(v.y) {
            return Err(CodecError::malformed(
                format!("vertices[{}]", i),
                "coordinate is not a finite in-range number",
            ));
        }
    }
    for (i, s) in net.segments.iter().enumerate() {
        check_index(&format!("segments[{}].start", i), s.start as i64, n)?;
        check_index(&format!("segments[{}].end", i), s.end as i64, n)?;
    }

    // Region loops claim segments. Each region may use a segment once, but
    // adjacent regions share their common boundary segment.
    let by_pair = segments_by_pair(&net.segments);
    let mut claimed = vec![false; net.segments.len()];
    // Set on first claim when the segment runs against the loop direction.
    // Decode rebuilds region segments in loop order, so handles follow it.
    let mut reversed = vec![false; net.segments.len()];
    let mut fill_index = FillIndex::new();
    let mut regions = Vec::with_capacity(net.regions.len());
    for (ri, region) in net.regions.iter().enumerate() {
        if region.loops.is_empty() {
            return Err(CodecError::structural(format!("regions[{}] has no loops", ri)));
        }
        let mut used_here: HashSet<usize> = HashSet::new();
        let mut loops = Vec::with_capacity(region.loops.len());
        for (li, lp) in region.loops.iter().enumerate() {
            let field = format!("regions[{}].loops[{}]", ri, li);
            if lp.len() < 2 {
                return Err(CodecError::structural(format!(
                    "{} has {} vertices; a loop needs at least 2",
                    field,
                    lp.len()
                )));
            }
            for &v in lp {
                check_index(&field, v as i64, n)?;
            }
            for (a, b) in loop_edges(lp) {
                let hit = by_pair
                    .get(&pair_key(a, b))
                    .and_then(|ids| ids.iter().copied().find(|i| !used_here.contains(i)));
                match hit {
                    Some(i) => {
                        used_here.insert(i);
                        if !claimed[i] {
                            claimed[i] = true;
                            reversed[i] = a != b && net.segments[i].start == b;
                        }
                    }
                    None => tracing::warn!(
                        region = ri,
                        from = a,
                        to = b,
                        "loop edge has no backing segment"
                    ),
                }
            }
            loops.push(format_index_list(lp));
        }
        let fill_slot = if region.fills.is_empty() {
            None
        } else {
            Some(fill_index.intern(&region.fills))
        };
        regions.push(SparseRegion {
            loops,
            winding_rule: region.winding_rule,
            fill_index: fill_slot,
        });
    }

    let paths = trace_open_paths(&net.segments, &mut claimed)
        .iter()
        .map(|p| format_index_list(p))
        .collect();

    let mut pairs: BTreeMap<u32, HandlePair> = BTreeMap::new();
    for (s, &flip) in net.segments.iter().zip(&reversed) {
        let (from, to, out, inb) = if flip {
            (s.end, s.start, s.tangent_end, s.tangent_start)
        } else {
            (s.start, s.end, s.tangent_start, s.tangent_end)
        };
        if !out.is_zero() {
            pairs.entry(from).or_default().outbound = out;
        }
        if !inb.is_zero() {
            pairs.entry(to).or_default().inbound = inb;
        }
    }
    let handles = pairs
        .iter()
        .filter(|(_, h)| !h.is_zero())
        .map(|(&v, h)| (v, format_handle(h)))
        .collect();

    let vertex_props = net
        .vertices
        .iter()
        .enumerate()
        .filter_map(|(i, v)| VertexProps::of(v).map(|p| (i as u32, p)))
        .collect();

    Ok(SparseNetwork {
        vertices: format_vertices(&net.vertices),
        regions,
        fills: fill_index.into_table(),
        paths,
        handles,
        vertex_props,
    })
}

pub fn decode(sparse: &SparseNetwork) -> Result<VectorNetwork> {
    decode_with(sparse, &DecodeOptions::default())
}

pub fn decode_with(sparse: &SparseNetwork, opts: &DecodeOptions) -> Result<VectorNetwork> {
    let points = parse_vertices(&sparse.vertices)?;
    let n = points.len();
    tracing::debug!(
        vertices = n,
        regions = sparse.regions.len(),
        paths = sparse.paths.len(),
        "decode sparse network"
    );
    check_cap("vertices", n, opts.max_vertices)?;
    check_cap("regions", sparse.regions.len(), opts.max_regions)?;
    check_cap("paths", sparse.paths.len(), opts.max_paths)?;
    check_cap("fills", sparse.fills.len(), limits::MAX_FILLS)?;

    let mut vertices: Vec<Vertex> = points.iter().map(|p| Vertex::at(p.x, p.y)).collect();
    for (&k, props) in &sparse.vertex_props {
        let i = check_index("vertexProps", k as i64, n)? as usize;
        if let Some(r) = props.corner_radius {
            if !r.is_finite() || r < 0.0 {
                return Err(CodecError::malformed(
                    format!("vertexProps[{}].cornerRadius", k),
                    "must be a finite non-negative number",
                ));
            }
        }
        props.apply(&mut vertices[i]);
    }

    let mut handles: HashMap<u32, HandlePair> = HashMap::with_capacity(sparse.handles.len());
    for (&k, s) in &sparse.handles {
        check_index("handles", k as i64, n)?;
        handles.insert(k, parse_handle(&format!("handles[{}]", k), s)?);
    }
    let make_segment = |a: u32, b: u32| Segment {
        start: a,
        end: b,
        tangent_start: handles.get(&a).map(|h| h.outbound).unwrap_or_default(),
        tangent_end: handles.get(&b).map(|h| h.inbound).unwrap_or_default(),
    };

    let mut segments: Vec<Segment> = Vec::new();
    // Segments already created for region edges, reused by neighbouring regions.
    let mut region_edges: HashMap<PairKey, Vec<usize>> = HashMap::new();
    let mut regions = Vec::with_capacity(sparse.regions.len());
    for (ri, r) in sparse.regions.iter().enumerate() {
        if r.loops.is_empty() {
            return Err(CodecError::structural(format!("regions[{}] has no loops", ri)));
        }
        if r.loops.len() > limits::MAX_LOOPS_PER_REGION {
            return Err(CodecError::structural(format!(
                "regions[{}] has {} loops (limit {})",
                ri,
                r.loops.len(),
                limits::MAX_LOOPS_PER_REGION
            )));
        }
        let mut used_here: HashSet<usize> = HashSet::new();
        let mut loops = Vec::with_capacity(r.loops.len());
        for (li, s) in r.loops.iter().enumerate() {
            let field = format!("regions[{}].loops[{}]", ri, li);
            let lp = parse_index_list(&field, s, n)?;
            if lp.len() < 2 {
                return Err(CodecError::structural(format!(
                    "{} has {} vertices; a loop needs at least 2",
                    field,
                    lp.len()
                )));
            }
            for (a, b) in loop_edges(&lp) {
                let ids = region_edges.entry(pair_key(a, b)).or_default();
                let i = match ids.iter().copied().find(|i| !used_here.contains(i)) {
                    Some(i) => i,
                    None => {
                        segments.push(make_segment(a, b));
                        ids.push(segments.len() - 1);
                        segments.len() - 1
                    }
                };
                used_here.insert(i);
            }
            loops.push(lp);
        }
        let fills = match r.fill_index {
            None => Vec::new(),
            Some(fi) => sparse.fills.get(fi).cloned().ok_or_else(|| {
                CodecError::out_of_range(
                    format!("regions[{}].fillIndex", ri),
                    fi as i64,
                    sparse.fills.len(),
                )
            })?,
        };
        regions.push(Region { loops, winding_rule: r.winding_rule, fills });
    }

    for (pi, s) in sparse.paths.iter().enumerate() {
        let field = format!("paths[{}]", pi);
        let path = parse_index_list(&field, s, n)?;
        if path.len() < 2 {
            return Err(CodecError::structural(format!(
                "{} has {} vertices; a path needs at least 2",
                field,
                path.len()
            )));
        }
        for w in path.windows(2) {
            segments.push(make_segment(w[0], w[1]));
        }
    }

    Ok(VectorNetwork { vertices, segments, regions })
}

fn check_cap(what: &str, got: usize, cap: usize) -> Result<()> {
    if got > cap {
        return Err(CodecError::structural(format!(
            "{} count {} exceeds limit {}",
            what, got, cap
        )));
    }
    Ok(())
}
