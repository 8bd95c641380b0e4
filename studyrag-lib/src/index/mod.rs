//! Vector indexing
//!
//! An exact nearest-neighbor index over chunk embeddings. Chunk metadata is
//! copied into the index alongside each vector, so search results are
//! self-contained and later changes to the caller's chunks cannot skew what
//! the index returns.
//!
//! # Usage
//!
//! ```ignore
//! use studyrag_lib::index::FlatIndex;
//!
//! let mut index = FlatIndex::new(embedder.dimension());
//! index.add(&embeddings, &chunks)?;
//!
//! let hits = index.search(&query_embedding, 5)?;
//! ```

use crate::chunk::Chunk;

/// A search result: the stored chunk plus its distance to the query.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The matched chunk, as copied into the index at add time
    pub chunk: Chunk,
    /// Squared Euclidean distance to the query (lower is closer)
    pub distance: f32,
}

mod flat;

pub use flat::*;
