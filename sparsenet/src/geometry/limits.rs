// Centralized ingestion limits to harden decode against untrusted payloads

// Network size caps
pub const MAX_VERTICES: usize = 200_000;
pub const MAX_REGIONS: usize = 20_000;
pub const MAX_LOOPS_PER_REGION: usize = 4_096;
pub const MAX_PATHS: usize = 100_000;
pub const MAX_FILLS: usize = 20_000;

// Numeric bounds
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 = 10_000_000.0;

// Open segment count above which the tracer switches to an adjacency index
pub const ADJACENCY_THRESHOLD: usize = 256;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && (COORD_MIN..=COORD_MAX).contains(&x) }
