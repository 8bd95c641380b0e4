//! Retrieval pipeline
//!
//! Ties chunking, embedding, indexing, and context assembly together into
//! two flows: batch ingestion (documents in, searchable index out) and
//! query-time retrieval (question in, bounded context string out). The
//! study tasks on top are thin: they assemble a context, render a prompt,
//! and hand it to the generation backend.
//!
//! # Usage
//!
//! ```ignore
//! use studyrag_lib::pipeline::RagPipeline;
//!
//! let mut pipeline = RagPipeline::with_generator(embedder, chunker, generator);
//! pipeline.ingest(&documents)?;
//!
//! let answer = pipeline.answer("What is osmosis?", 5)?;
//! let quiz = pipeline.generate_mcqs(8)?;
//! ```

use tracing::{debug, info};

use crate::chunk::{Chunk, PageChunker};
use crate::context;
use crate::embed::Embedder;
use crate::extract::Document;
use crate::generate::{Generator, NoGenerator};
use crate::index::{FlatIndex, SearchHit};
use crate::prompt;
use crate::{Error, Result};

/// Default number of chunks retrieved per query.
pub const DEFAULT_TOP_K: usize = 5;

/// Default character budget for query-specific context.
pub const DEFAULT_CONTEXT_CHARS: usize = 3500;

/// Default character budget for whole-corpus context.
pub const DEFAULT_GLOBAL_CONTEXT_CHARS: usize = 4000;

/// Default number of multiple-choice questions.
pub const DEFAULT_NUM_QUESTIONS: usize = 8;

/// Default number of flashcards.
pub const DEFAULT_NUM_CARDS: usize = 12;

/// Message returned by study tasks before anything has been ingested.
pub const NOT_INDEXED_MESSAGE: &str = "Please ingest your documents first.";

/// Message returned when retrieval finds nothing usable for a question.
pub const NO_CONTEXT_MESSAGE: &str =
    "I couldn't find relevant content in your notes for this question.";

const ANSWER_TOKENS: usize = 256;
const SUMMARY_TOKENS: usize = 400;
const QUIZ_TOKENS: usize = 600;

/// Retrieval pipeline owning the embedder, the index, and the chunk list of
/// the most recent ingestion.
///
/// The pipeline is either unindexed (fresh, or after an ingestion that
/// produced no chunks) or indexed. Retrieval in the unindexed state is a
/// soft empty result, never an error. Each `ingest` call is a full rebuild:
/// the previous index and chunk list are discarded wholesale.
pub struct RagPipeline<E: Embedder, G: Generator = NoGenerator> {
    embedder: E,
    chunker: PageChunker,
    generator: Option<G>,
    index: Option<FlatIndex>,
    chunks: Vec<Chunk>,
}

// Constructor for pipelines that only retrieve
impl<E: Embedder> RagPipeline<E, NoGenerator> {
    /// Create a pipeline without a generation backend.
    ///
    /// Retrieval and context assembly work as usual; the study tasks that
    /// need generation will fail with [`Error::Generation`].
    #[must_use]
    pub fn new(embedder: E, chunker: PageChunker) -> Self {
        Self {
            embedder,
            chunker,
            generator: None,
            index: None,
            chunks: Vec::new(),
        }
    }
}

impl<E: Embedder, G: Generator> RagPipeline<E, G> {
    /// Create a pipeline with a generation backend for the study tasks.
    #[must_use]
    pub fn with_generator(embedder: E, chunker: PageChunker, generator: G) -> Self {
        Self {
            embedder,
            chunker,
            generator: Some(generator),
            index: None,
            chunks: Vec::new(),
        }
    }

    /// Ingest a batch of documents, replacing any previously indexed corpus.
    ///
    /// Chunks every document, embeds all chunk texts in one batch call, and
    /// builds a brand-new index sized to the embedding dimension. Prior
    /// state is swapped out only after the new index is fully built, so a
    /// failed ingestion leaves the previous corpus queryable. A batch that
    /// produces no chunks resets the pipeline to its unindexed state.
    pub fn ingest(&mut self, documents: &[Document]) -> Result<()> {
        let chunks = self.chunker.chunk_documents(documents);
        if chunks.is_empty() {
            info!("ingestion produced no chunks, clearing corpus");
            self.chunks.clear();
            self.index = None;
            return Ok(());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_documents(&texts)?;
        if embeddings.len() != chunks.len() {
            return Err(Error::Embedding(format!(
                "embedder returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let dim = embeddings[0].len();
        let mut index = FlatIndex::new(dim);
        index.add(&embeddings, &chunks)?;

        info!(
            documents = documents.len(),
            chunks = chunks.len(),
            dim,
            "rebuilt index"
        );

        self.chunks = chunks;
        self.index = Some(index);
        Ok(())
    }

    /// Returns `true` once a corpus has been ingested.
    #[must_use]
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Number of chunks in the current corpus.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if no corpus is ingested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Retrieve the chunks nearest to `query`.
    ///
    /// Returns an empty list in the unindexed state; callers that need to
    /// distinguish "no corpus" from "no matches" check
    /// [`is_indexed`](Self::is_indexed).
    pub fn retrieve(&mut self, query: &str, top_k: usize) -> Result<Vec<SearchHit>> {
        let Some(index) = &self.index else {
            return Ok(Vec::new());
        };

        let query_embedding = self.embedder.embed_query(query)?;
        let hits = index.search(&query_embedding, top_k)?;
        debug!(hits = hits.len(), top_k, "retrieved");
        Ok(hits)
    }

    /// Retrieve for `query` and pack the hits into one bounded context
    /// string. Empty when unindexed or nothing was retrieved.
    pub fn build_context(
        &mut self,
        query: &str,
        top_k: usize,
        max_chars: usize,
    ) -> Result<String> {
        let hits = self.retrieve(query, top_k)?;
        Ok(context::assemble(hits.iter().map(|h| &h.chunk), max_chars))
    }

    /// Pack the raw chunk list, in ingestion order, into one bounded
    /// context string.
    ///
    /// Used by the whole-corpus tasks (summary, quiz, flashcards) where no
    /// query-specific ranking applies.
    #[must_use]
    pub fn build_global_context(&self, max_chars: usize) -> String {
        context::assemble(&self.chunks, max_chars)
    }

    /// Show raw retrieved context for `query` without invoking generation.
    pub fn show_context(&mut self, query: &str, top_k: usize) -> Result<String> {
        let hits = self.retrieve(query, top_k)?;
        if hits.is_empty() {
            return Ok("No documents indexed yet or no relevant context found.".to_string());
        }

        let parts: Vec<String> = hits
            .iter()
            .map(|h| {
                let snippet: String = h.chunk.text.chars().take(300).collect();
                format!(
                    "[{} - p.{}] {}...",
                    h.chunk.source,
                    h.chunk.page_num,
                    snippet.replace('\n', " ")
                )
            })
            .collect();

        Ok(format!(
            "Top relevant context from your notes:\n\n{}",
            parts.join("\n\n")
        ))
    }

    /// Answer a question from retrieved context via the generation backend.
    ///
    /// Short-circuits with a fixed message when nothing is ingested or
    /// retrieval produced no usable context, so the backend is never called
    /// with a degenerate prompt.
    pub fn answer(&mut self, query: &str, top_k: usize) -> Result<String> {
        if !self.is_indexed() {
            return Ok(NOT_INDEXED_MESSAGE.to_string());
        }

        let context = self.build_context(query, top_k, DEFAULT_CONTEXT_CHARS)?;
        if context.is_empty() {
            return Ok(NO_CONTEXT_MESSAGE.to_string());
        }

        self.require_generator()?
            .generate(&prompt::answer(&context, query), ANSWER_TOKENS)
    }

    /// Summarize the whole corpus for revision.
    pub fn summarize(&self) -> Result<String> {
        let context = self.build_global_context(DEFAULT_GLOBAL_CONTEXT_CHARS);
        if context.is_empty() {
            return Ok(NOT_INDEXED_MESSAGE.to_string());
        }

        self.require_generator()?
            .generate(&prompt::summary(&context), SUMMARY_TOKENS)
    }

    /// Generate multiple-choice questions covering the corpus.
    pub fn generate_mcqs(&self, num_questions: usize) -> Result<String> {
        let context = self.build_global_context(DEFAULT_GLOBAL_CONTEXT_CHARS);
        if context.is_empty() {
            return Ok(NOT_INDEXED_MESSAGE.to_string());
        }

        self.require_generator()?
            .generate(&prompt::mcqs(&context, num_questions), QUIZ_TOKENS)
    }

    /// Generate Q/A flashcards covering the corpus.
    pub fn generate_flashcards(&self, num_cards: usize) -> Result<String> {
        let context = self.build_global_context(DEFAULT_GLOBAL_CONTEXT_CHARS);
        if context.is_empty() {
            return Ok(NOT_INDEXED_MESSAGE.to_string());
        }

        self.require_generator()?
            .generate(&prompt::flashcards(&context, num_cards), QUIZ_TOKENS)
    }

    fn require_generator(&self) -> Result<&G> {
        self.generator
            .as_ref()
            .ok_or_else(|| Error::Generation("no generation backend configured".to_string()))
    }
}
