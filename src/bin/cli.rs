//! Interactive CLI for the answering pipeline
//!
//! Ingests a pre-extracted text file and answers questions from stdin.
//! Requires an Ollama server for embeddings and an OpenAI-compatible API
//! key for generation.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use docquery::config::PipelineConfig;
use docquery::providers::{FsIndexStorage, OllamaEmbedder, OpenAiChatClient};
use docquery::{DocumentPipeline, QueryType};

#[derive(Parser)]
#[command(name = "docquery-cli", about = "Ask questions against a document")]
struct Args {
    /// Path to a plain-text document (already extracted from its original format)
    file: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Document key; defaults to the file stem
    #[arg(long)]
    key: Option<String>,

    /// Query-type hint applied to every question
    #[arg(long, default_value = "general")]
    query_type: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    let key = args.key.clone().unwrap_or_else(|| {
        args.file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    });
    let hint = QueryType::parse(&args.query_type);

    let embedder = Arc::new(OllamaEmbedder::new(&config.embeddings)?);
    let generator = Arc::new(OpenAiChatClient::new(&config.llm)?);
    let storage = Arc::new(FsIndexStorage::new(config.storage.index_dir.clone())?);

    let pipeline = DocumentPipeline::new(&config, embedder, generator, storage);

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    println!("Ingesting {} as '{}'...", args.file.display(), key);
    let document = pipeline.ingest(&key, &text).await?;
    println!(
        "Indexed {} chunks; classified as {}.",
        document.chunk_count,
        document.analysis.document_type.label()
    );
    println!("Ask questions (empty line to exit):\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut question = String::new();
        if stdin.lock().read_line(&mut question)? == 0 {
            break;
        }
        let question = question.trim();
        if question.is_empty() {
            break;
        }

        match pipeline.answer(question, &document, hint).await {
            Ok(answer) => {
                println!("{}", answer.answer);
                println!(
                    "[tokens: {} in / {} out / {} total]\n",
                    answer.token_usage.input_tokens,
                    answer.token_usage.output_tokens,
                    answer.token_usage.total_tokens
                );
            }
            Err(e) => eprintln!("error: {e}\n"),
        }
    }

    Ok(())
}
