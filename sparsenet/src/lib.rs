//! Sparse canonical codec for vector networks.
//!
//! [`encode`] turns a host [`VectorNetwork`] into the compact
//! [`SparseNetwork`] interchange form and [`decode`] turns it back, validating
//! everything first. [`extract_region`] / [`extract_path`] carve one element
//! into a standalone network, and [`transform`] converts paint matrices to
//! and from editable parameters.

pub mod error;
pub mod model;
pub mod sparse;
pub mod codec;
pub mod transform;
pub mod host;
pub mod geometry {
    pub mod bounds;
    pub mod limits;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod extract;
    pub mod fill_index;
    pub mod open_path;
}

pub use algorithms::extract::{extract_path, extract_region, Extraction, Remainder};
pub use codec::{decode, decode_with, encode, DecodeOptions};
pub use error::{CodecError, Result};
pub use model::{Paint, Region, Segment, Vertex, VectorNetwork, WindingRule};
pub use sparse::{SparseNetwork, SparseRegion, VertexProps};
