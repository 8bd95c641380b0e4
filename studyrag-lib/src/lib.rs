//! StudyRag - retrieval library for grounding study helpers in your own notes
//!
//! # Architecture
//!
//! ```text
//! Document -> Chunker -> Embedder -> FlatIndex
//!                                        |
//!   Query -> Embedder -> search <--------+
//!                           |
//!                        Context -> Generator
//! ```
//!
//! # Example
//!
//! ```ignore
//! use studyrag_lib::{chunk::PageChunker, embed::MiniLmEmbedder, pipeline::RagPipeline};
//! use studyrag_lib::extract::load_document;
//!
//! let chunker = PageChunker::new(800, 200)?;
//! let embedder = MiniLmEmbedder::new()?;
//! let mut pipeline = RagPipeline::new(embedder, chunker);
//!
//! // Index some documents
//! let docs = vec![load_document("notes.pdf".as_ref())?];
//! pipeline.ingest(&docs)?;
//!
//! // Retrieve context for a question
//! let context = pipeline.build_context("What is osmosis?", 5, 3500)?;
//! ```

pub mod chunk;
pub mod context;
pub mod embed;
pub mod error;
pub mod extract;
pub mod generate;
pub mod index;
pub mod pipeline;
pub mod prompt;

pub use error::{Error, Result};
