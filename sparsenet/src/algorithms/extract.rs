use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::error::{CodecError, Result};
use crate::geometry::bounds::Bounds;
use crate::model::{Vec2, Vertex};
use crate::sparse::{format_index_list, format_vertices, parse_index_list, SparseNetwork, SparseRegion};

/// What is left of the source after an extraction.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "network", rename_all = "lowercase")]
pub enum Remainder {
    /// The source was not modified.
    Kept,
    /// The source minus the extracted element.
    Network(SparseNetwork),
    /// Nothing is left; the caller decides between a placeholder and deletion.
    Emptied,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub extracted: SparseNetwork,
    pub remainder: Remainder,
    /// `source.min - extracted.min`. The host re-origins the extracted network
    /// at its own bounds, so the new node sits at `source_pos - position_offset`.
    pub position_offset: Vec2,
}

/// Carves region `region_index` out of `sparse` as a standalone network.
///
/// Vertices referenced by the region's loops are renumbered densely in
/// ascending original order. Only the region's fill survives, as slot 0.
pub fn extract_region(
    sparse: &SparseNetwork,
    region_index: usize,
    remove_from_source: bool,
) -> Result<Extraction> {
    let points = sparse.parse_vertices()?;
    let region = sparse.regions.get(region_index).ok_or_else(|| {
        CodecError::structural(format!(
            "region index {} beyond {} regions",
            region_index,
            sparse.regions.len()
        ))
    })?;
    tracing::debug!(region = region_index, remove_from_source, "extract region");

    let mut loops = Vec::with_capacity(region.loops.len());
    for (li, s) in region.loops.iter().enumerate() {
        let field = format!("regions[{}].loops[{}]", region_index, li);
        loops.push(parse_index_list(&field, s, points.len())?);
    }
    let used: BTreeSet<u32> = loops.iter().flatten().copied().collect();
    let (mut extracted, remap, position_offset) = carve(sparse, &points, &used, "region")?;

    let fill_index = match region.fill_index {
        None => None,
        Some(fi) => {
            let fill = sparse.fills.get(fi).ok_or_else(|| {
                CodecError::out_of_range(
                    format!("regions[{}].fillIndex", region_index),
                    fi as i64,
                    sparse.fills.len(),
                )
            })?;
            extracted.fills = vec![fill.clone()];
            Some(0)
        }
    };
    extracted.regions = vec![SparseRegion {
        loops: loops.iter().map(|lp| format_index_list(&renumber(lp, &remap))).collect(),
        winding_rule: region.winding_rule,
        fill_index,
    }];

    let remainder = if remove_from_source {
        let mut rest = sparse.clone();
        rest.regions.remove(region_index);
        compact_fills(&mut rest);
        settle(rest)
    } else {
        Remainder::Kept
    };
    Ok(Extraction { extracted, remainder, position_offset })
}

/// Carves open path `path_index` out of `sparse`; the path-table counterpart
/// of [`extract_region`].
pub fn extract_path(
    sparse: &SparseNetwork,
    path_index: usize,
    remove_from_source: bool,
) -> Result<Extraction> {
    let points = sparse.parse_vertices()?;
    let path_str = sparse.paths.get(path_index).ok_or_else(|| {
        CodecError::structural(format!(
            "path index {} beyond {} paths",
            path_index,
            sparse.paths.len()
        ))
    })?;
    tracing::debug!(path = path_index, remove_from_source, "extract path");

    let path = parse_index_list(&format!("paths[{}]", path_index), path_str, points.len())?;
    let used: BTreeSet<u32> = path.iter().copied().collect();
    let (mut extracted, remap, position_offset) = carve(sparse, &points, &used, "path")?;
    extracted.paths = vec![format_index_list(&renumber(&path, &remap))];

    let remainder = if remove_from_source {
        let mut rest = sparse.clone();
        rest.paths.remove(path_index);
        settle(rest)
    } else {
        Remainder::Kept
    };
    Ok(Extraction { extracted, remainder, position_offset })
}

/// Builds the densely indexed vertex table, handles and props for `used`.
fn carve(
    sparse: &SparseNetwork,
    points: &[Vec2],
    used: &BTreeSet<u32>,
    what: &str,
) -> Result<(SparseNetwork, HashMap<u32, u32>, Vec2)> {
    let source_bounds = Bounds::of_points(points.iter().map(|p| (p.x, p.y)));
    let sub_bounds = Bounds::of_points(used.iter().map(|&i| {
        let p = points[i as usize];
        (p.x, p.y)
    }));
    let (source_bounds, sub_bounds) = match (source_bounds, sub_bounds) {
        (Some(s), Some(e)) => (s, e),
        _ => return Err(CodecError::structural(format!("{} references no vertices", what))),
    };

    let remap: HashMap<u32, u32> =
        used.iter().enumerate().map(|(new, &old)| (old, new as u32)).collect();
    let vertices: Vec<Vertex> = used
        .iter()
        .map(|&i| {
            let p = points[i as usize];
            Vertex::at(p.x, p.y)
        })
        .collect();

    let handles = sparse
        .handles
        .iter()
        .filter_map(|(k, h)| remap.get(k).map(|&nk| (nk, h.clone())))
        .collect();
    let vertex_props = sparse
        .vertex_props
        .iter()
        .filter_map(|(k, p)| remap.get(k).map(|&nk| (nk, *p)))
        .collect();

    let extracted = SparseNetwork {
        vertices: format_vertices(&vertices),
        handles,
        vertex_props,
        ..Default::default()
    };
    let offset = Vec2::new(
        source_bounds.min_x - sub_bounds.min_x,
        source_bounds.min_y - sub_bounds.min_y,
    );
    Ok((extracted, remap, offset))
}

fn renumber(indices: &[u32], remap: &HashMap<u32, u32>) -> Vec<u32> {
    // Every index came from the set the map was built from.
    indices.iter().filter_map(|i| remap.get(i).copied()).collect()
}

fn settle(rest: SparseNetwork) -> Remainder {
    if rest.regions.is_empty() && rest.paths.is_empty() {
        Remainder::Emptied
    } else {
        Remainder::Network(rest)
    }
}

/// Drops fill table entries no region references any more.
fn compact_fills(net: &mut SparseNetwork) {
    let mut slot_of: HashMap<usize, usize> = HashMap::new();
    let mut table = Vec::new();
    for region in &mut net.regions {
        if let Some(fi) = region.fill_index {
            let slot = *slot_of.entry(fi).or_insert_with(|| {
                table.push(net.fills.get(fi).cloned().unwrap_or_default());
                table.len() - 1
            });
            region.fill_index = Some(slot);
        }
    }
    net.fills = table;
}
