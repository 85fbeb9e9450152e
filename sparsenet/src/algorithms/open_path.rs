use std::collections::{HashMap, VecDeque};

use crate::geometry::limits::ADJACENCY_THRESHOLD;
use crate::model::Segment;

/// Finds the lowest-index unvisited segment leaving or entering a vertex.
trait IncidentLookup {
    fn outgoing(&self, segments: &[Segment], vertex: u32, visited: &[bool]) -> Option<usize>;
    fn incoming(&self, segments: &[Segment], vertex: u32, visited: &[bool]) -> Option<usize>;
}

/// Segments without a flag in `visited` are treated as already consumed.
fn is_open(visited: &[bool], i: usize) -> bool {
    visited.get(i) == Some(&false)
}

struct LinearScan;

impl IncidentLookup for LinearScan {
    fn outgoing(&self, segments: &[Segment], vertex: u32, visited: &[bool]) -> Option<usize> {
        (0..segments.len()).find(|&i| is_open(visited, i) && segments[i].start == vertex)
    }

    fn incoming(&self, segments: &[Segment], vertex: u32, visited: &[bool]) -> Option<usize> {
        (0..segments.len()).find(|&i| is_open(visited, i) && segments[i].end == vertex)
    }
}

/// Vertex -> incident segment lists, ascending by segment index.
#[derive(Debug, Default)]
pub struct SegmentAdjacency {
    by_start: HashMap<u32, Vec<usize>>,
    by_end: HashMap<u32, Vec<usize>>,
}

impl SegmentAdjacency {
    pub fn build(segments: &[Segment]) -> Self {
        let mut adj = SegmentAdjacency::default();
        for (i, s) in segments.iter().enumerate() {
            adj.by_start.entry(s.start).or_default().push(i);
            adj.by_end.entry(s.end).or_default().push(i);
        }
        adj
    }
}

impl IncidentLookup for SegmentAdjacency {
    fn outgoing(&self, _segments: &[Segment], vertex: u32, visited: &[bool]) -> Option<usize> {
        self.by_start.get(&vertex)?.iter().copied().find(|&i| is_open(visited, i))
    }

    fn incoming(&self, _segments: &[Segment], vertex: u32, visited: &[bool]) -> Option<usize> {
        self.by_end.get(&vertex)?.iter().copied().find(|&i| is_open(visited, i))
    }
}

/// Grows a maximal open polyline from the seed segment `start`.
///
/// Extends forward from the seed's end over unvisited segments whose `start`
/// matches the current tail, then backward from the seed's start over
/// unvisited segments whose `end` matches the head. Every consumed segment is
/// marked in `visited` (one flag per segment), which callers thread through
/// successive calls.
///
/// Returns an empty sequence when `start` is out of range or already visited.
/// Each extension is a linear scan, so a full pass is O(S^2).
pub fn trace_open_path(segments: &[Segment], start: usize, visited: &mut [bool]) -> Vec<u32> {
    trace_with(&LinearScan, segments, start, visited)
}

/// Same as [`trace_open_path`] but resolves extensions through `adjacency`.
pub fn trace_open_path_indexed(
    adjacency: &SegmentAdjacency,
    segments: &[Segment],
    start: usize,
    visited: &mut [bool],
) -> Vec<u32> {
    trace_with(adjacency, segments, start, visited)
}

/// Traces every segment not yet marked in `visited` into open polylines.
///
/// Seeds are taken in ascending segment order. Segments past the end of
/// `visited` are skipped. Above `ADJACENCY_THRESHOLD`
/// open segments an adjacency index replaces the linear scan; both produce
/// identical output.
pub fn trace_open_paths(segments: &[Segment], visited: &mut [bool]) -> Vec<Vec<u32>> {
    let open = visited.iter().filter(|v| !**v).count();
    if open > ADJACENCY_THRESHOLD {
        let adjacency = SegmentAdjacency::build(segments);
        trace_all(&adjacency, segments, visited)
    } else {
        trace_all(&LinearScan, segments, visited)
    }
}

/// Linear-scan variant of [`trace_open_paths`] regardless of input size.
pub fn trace_open_paths_linear(segments: &[Segment], visited: &mut [bool]) -> Vec<Vec<u32>> {
    trace_all(&LinearScan, segments, visited)
}

fn trace_all<L: IncidentLookup>(lookup: &L, segments: &[Segment], visited: &mut [bool]) -> Vec<Vec<u32>> {
    let mut paths = Vec::new();
    for i in 0..segments.len() {
        if is_open(visited, i) {
            let path = trace_with(lookup, segments, i, visited);
            tracing::trace!(seed = i, len = path.len(), "traced open path");
            paths.push(path);
        }
    }
    paths
}

fn trace_with<L: IncidentLookup>(
    lookup: &L,
    segments: &[Segment],
    start: usize,
    visited: &mut [bool],
) -> Vec<u32> {
    let seed = match segments.get(start) {
        Some(s) if is_open(visited, start) => *s,
        _ => return Vec::new(),
    };
    visited[start] = true;
    let mut chain: VecDeque<u32> = VecDeque::from([seed.start, seed.end]);

    let mut tail = seed.end;
    while let Some(i) = lookup.outgoing(segments, tail, visited) {
        visited[i] = true;
        tail = segments[i].end;
        chain.push_back(tail);
    }

    let mut head = seed.start;
    while let Some(i) = lookup.incoming(segments, head, visited) {
        visited[i] = true;
        head = segments[i].start;
        chain.push_front(head);
    }

    chain.into()
}
