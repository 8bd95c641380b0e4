//! StudyRag CLI - study helpers grounded in your own notes
//!
//! # Commands
//!
//! ```bash
//! # Chunk a document and show the windows
//! studyrag chunk notes.pdf
//!
//! # Embed text and show vector stats
//! studyrag embed "What is osmosis?"
//!
//! # Index files and answer a question from them
//! studyrag ask "what is osmosis" notes.pdf slides.pdf
//!
//! # Whole-corpus study helpers
//! studyrag summary notes.pdf
//! studyrag quiz notes.pdf
//! studyrag flashcards notes.pdf
//! ```

use std::path::Path;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use studyrag_lib::{
    chunk::{PageChunker, DEFAULT_MAX_CHARS, DEFAULT_OVERLAP},
    embed::{Embedder, MiniLmEmbedder},
    extract::{load_document, Document},
    generate::{OllamaGenerator, DEFAULT_BASE_URL, DEFAULT_MODEL},
    pipeline::{RagPipeline, DEFAULT_NUM_CARDS, DEFAULT_NUM_QUESTIONS, DEFAULT_TOP_K},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "studyrag")]
#[command(about = "Retrieval-grounded study helpers over your notes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk a document and show the resulting windows
    Chunk {
        /// Input file to chunk
        input: String,

        /// Window width in characters
        #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
        max_chars: usize,

        /// Overlap between adjacent windows in characters
        #[arg(long, default_value_t = DEFAULT_OVERLAP)]
        overlap: usize,
    },

    /// Embed text and show vector info
    Embed {
        /// Text to embed
        text: String,

        /// Treat as a search query rather than a document
        #[arg(short, long)]
        query: bool,
    },

    /// Index files and answer a question from them
    Ask {
        /// Question to answer
        query: String,

        /// Files to index
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Number of chunks to retrieve
        #[arg(short, long, default_value_t = DEFAULT_TOP_K)]
        k: usize,

        /// Show raw retrieved context instead of calling the model
        #[arg(short, long)]
        context_only: bool,

        /// Generation model name
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Generation server base URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Index files and summarize them for revision
    Summary {
        /// Files to index
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Generation model name
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Generation server base URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Index files and generate multiple-choice questions
    Quiz {
        /// Files to index
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Number of questions
        #[arg(short, long, default_value_t = DEFAULT_NUM_QUESTIONS)]
        num: usize,

        /// Generation model name
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Generation server base URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Index files and generate Q/A flashcards
    Flashcards {
        /// Files to index
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Number of cards
        #[arg(short, long, default_value_t = DEFAULT_NUM_CARDS)]
        num: usize,

        /// Generation model name
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Generation server base URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
}

/// Load each input file, skipping the ones that fail extraction.
fn load_documents(inputs: &[String]) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for input in inputs {
        match load_document(Path::new(input)) {
            Ok(doc) => {
                println!("Loaded '{}' ({} pages)", input, doc.pages.len());
                documents.push(doc);
            }
            Err(e) => eprintln!("Skipping '{input}': {e}"),
        }
    }
    if documents.is_empty() {
        bail!("none of the input files could be read");
    }
    Ok(documents)
}

fn embedder() -> Result<MiniLmEmbedder> {
    println!("Loading embedding model (first run downloads ~90MB)...");
    Ok(MiniLmEmbedder::new()?)
}

fn generation_pipeline(
    model: &str,
    base_url: &str,
) -> Result<RagPipeline<MiniLmEmbedder, OllamaGenerator>> {
    let chunker = PageChunker::new(DEFAULT_MAX_CHARS, DEFAULT_OVERLAP)?;
    let generator = OllamaGenerator::new(base_url, model)?;
    Ok(RagPipeline::with_generator(embedder()?, chunker, generator))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chunk {
            input,
            max_chars,
            overlap,
        } => {
            let chunker = PageChunker::new(max_chars, overlap)?;
            let doc = load_document(Path::new(&input))?;
            let chunks = chunker.chunk(&doc.name, &doc.pages);

            println!(
                "Chunked '{}' ({} pages) into {} chunks:\n",
                input,
                doc.pages.len(),
                chunks.len()
            );
            for chunk in &chunks {
                println!(
                    "--- Chunk {} (p.{}, {} chars) ---",
                    chunk.chunk_id,
                    chunk.page_num,
                    chunk.text.chars().count()
                );
                // Show preview (first 200 chars)
                let preview: String = chunk.text.chars().take(200).collect();
                let ellipsis = if chunk.text.chars().count() > 200 { "..." } else { "" };
                println!("{preview}{ellipsis}\n");
            }
        }

        Commands::Embed { text, query } => {
            let mut embedder = embedder()?;

            let embedding = if query {
                println!("Embedding as query: {text}");
                embedder.embed_query(&text)?
            } else {
                println!("Embedding as document: {text}");
                embedder
                    .embed_documents(&[text.as_str()])?
                    .into_iter()
                    .next()
                    .expect("should have one embedding")
            };

            println!("\nEmbedding stats:");
            println!("  Dimensions: {}", embedding.len());
            println!("  First 5 values: {:?}", &embedding[..5]);
            println!(
                "  Min: {:.4}",
                embedding.iter().cloned().fold(f32::INFINITY, f32::min)
            );
            println!(
                "  Max: {:.4}",
                embedding.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
            );
        }

        Commands::Ask {
            query,
            inputs,
            k,
            context_only,
            model,
            base_url,
        } => {
            let documents = load_documents(&inputs)?;

            if context_only {
                let chunker = PageChunker::new(DEFAULT_MAX_CHARS, DEFAULT_OVERLAP)?;
                let mut pipeline = RagPipeline::new(embedder()?, chunker);
                pipeline.ingest(&documents)?;
                println!("Indexed {} chunks\n", pipeline.len());
                println!("{}", pipeline.show_context(&query, k)?);
            } else {
                let mut pipeline = generation_pipeline(&model, &base_url)?;
                pipeline.ingest(&documents)?;
                println!("Indexed {} chunks\n", pipeline.len());
                println!("Asking: '{query}' (k={k})\n");
                println!("{}", pipeline.answer(&query, k)?);
            }
        }

        Commands::Summary {
            inputs,
            model,
            base_url,
        } => {
            let documents = load_documents(&inputs)?;
            let mut pipeline = generation_pipeline(&model, &base_url)?;
            pipeline.ingest(&documents)?;
            println!("Indexed {} chunks\n", pipeline.len());
            println!("{}", pipeline.summarize()?);
        }

        Commands::Quiz {
            inputs,
            num,
            model,
            base_url,
        } => {
            let documents = load_documents(&inputs)?;
            let mut pipeline = generation_pipeline(&model, &base_url)?;
            pipeline.ingest(&documents)?;
            println!("Indexed {} chunks\n", pipeline.len());
            println!("{}", pipeline.generate_mcqs(num)?);
        }

        Commands::Flashcards {
            inputs,
            num,
            model,
            base_url,
        } => {
            let documents = load_documents(&inputs)?;
            let mut pipeline = generation_pipeline(&model, &base_url)?;
            pipeline.ingest(&documents)?;
            println!("Indexed {} chunks\n", pipeline.len());
            println!("{}", pipeline.generate_flashcards(num)?);
        }
    }

    Ok(())
}
