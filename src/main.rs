use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{info, warn, Level};

use lede::labels::first_value;
use lede::parallel_processing::extract_batch;
use lede::reader::{Description, ParagraphReader, ReadStats, ReaderConfig};
use lede::sentence_detector::{AbbreviationTable, FirstSentenceExtractor};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// One sentence per line
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "lede")]
#[command(about = "Extract the first sentence of each description, one description per line")]
#[command(version)]
struct Args {
    /// Files to read; standard input when omitted
    files: Vec<PathBuf>,

    /// TOML abbreviation table replacing (or extending) the built-in one
    #[arg(long)]
    abbreviations: Option<PathBuf>,

    /// Treat each line as '|'-joined duplicate values and use the first
    #[arg(long)]
    joined: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Abort on first unreadable input
    #[arg(long)]
    fail_fast: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    source: &'a str,
    line: u64,
    sentence: &'a str,
    terminated: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // WHY: stdout carries results, so logs go to stderr
    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");

    let table = match &args.abbreviations {
        Some(path) => Arc::new(AbbreviationTable::load(path)?),
        None => AbbreviationTable::shared(),
    };
    let extractor = FirstSentenceExtractor::new(table);

    let reader = ParagraphReader::new(ReaderConfig {
        fail_fast: args.fail_fast,
        ..Default::default()
    });
    let sources = if args.files.is_empty() {
        vec![reader.read_stdin().await?]
    } else {
        reader.read_files(&args.files).await?
    };

    let mut origins: Vec<(usize, u64)> = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    for (source_index, (descriptions, stats)) in sources.iter().enumerate() {
        report_read_error(stats);
        for Description { line, text } in descriptions {
            let text = if args.joined {
                first_value(text).unwrap_or_default()
            } else {
                text.as_str()
            };
            origins.push((source_index, *line));
            texts.push(text.to_string());
        }
    }

    let batch = extract_batch(&extractor, texts).await?;

    let mut out = BufWriter::new(tokio::io::stdout());
    for extraction in &batch.extractions {
        let (source_index, line) = origins[extraction.index];
        let rendered = match args.format {
            OutputFormat::Text => extraction.sentence.clone(),
            OutputFormat::Json => serde_json::to_string(&JsonLine {
                source: &sources[source_index].1.source,
                line,
                sentence: &extraction.sentence,
                terminated: extraction.terminated,
            })?,
        };
        out.write_all(rendered.as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    out.flush().await.context("Failed to write results")?;

    let failed_sources = sources.iter().filter(|(_, stats)| stats.read_error.is_some()).count();
    info!(
        stats = %serde_json::to_string(&batch.stats)?,
        sources = sources.len(),
        failed_sources,
        "Extraction complete"
    );

    Ok(())
}

fn report_read_error(stats: &ReadStats) {
    if let Some(ref error) = stats.read_error {
        warn!("Issue with {}: {}", stats.source, error);
    }
}
