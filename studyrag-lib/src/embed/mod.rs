//! Text embedding using local models
//!
//! Uses sentence-transformers/all-MiniLM-L6-v2 via the fastembed crate
//! (ONNX runtime).
//!
//! # Model Details
//!
//! - Dimensions: 384
//! - Max tokens: 256
//! - Small and fast enough to embed a whole ingestion batch in one call
//!
//! # Usage
//!
//! ```ignore
//! use studyrag_lib::embed::{Embedder, MiniLmEmbedder};
//!
//! let mut embedder = MiniLmEmbedder::new()?;
//!
//! // Embed chunks (for indexing)
//! let chunk_embeddings = embedder.embed_documents(&["Osmosis is...", "Diffusion is..."])?;
//!
//! // Embed a question (for searching)
//! let query_embedding = embedder.embed_query("What is osmosis?")?;
//! ```

use crate::Result;

/// A vector embedding - fixed size array of floats
pub type Embedding = Vec<f32>;

/// Trait for text embedding models
///
/// Loading the underlying model is expensive; implementations load it once
/// at construction and the pipeline constructs exactly one embedder for its
/// lifetime.
pub trait Embedder: Send + Sync {
    /// Embed multiple texts for indexing.
    ///
    /// Returns exactly one embedding per input, in input order, all of
    /// [`dimension`](Self::dimension) length.
    fn embed_documents(&mut self, texts: &[&str]) -> Result<Vec<Embedding>>;

    /// Embed a single query for searching.
    ///
    /// Some models use a different prompt for queries than for documents;
    /// this method handles that distinction.
    fn embed_query(&mut self, text: &str) -> Result<Embedding>;

    /// Returns the embedding dimension
    fn dimension(&self) -> usize;

    /// Returns the model name/identifier
    fn model_name(&self) -> &str;
}

mod minilm;
pub use minilm::*;
