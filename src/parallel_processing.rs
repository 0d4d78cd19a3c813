// WHY: Batch extraction over many descriptions on tokio's blocking pool
// Workers share one read-only extractor; results come back in input order

use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::sentence_detector::FirstSentenceExtractor;

/// First sentence extracted from one description
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Position of the description in the batch input
    pub index: usize,
    pub sentence: String,
    /// Whether a sentence terminator was confirmed (false: whole description kept)
    pub terminated: bool,
}

/// Per-batch statistics
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub descriptions: u64,
    pub terminated: u64,
    pub exhausted: u64,
    pub chars_processed: u64,
    pub workers: u64,
    pub processing_time_ms: u64,
}

/// Extractions plus the statistics of the batch that produced them
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub extractions: Vec<Extraction>,
    pub stats: BatchStats,
}

/// Extract first sentences using one worker per CPU
pub async fn extract_batch(
    extractor: &FirstSentenceExtractor,
    descriptions: Vec<String>,
) -> Result<BatchResult> {
    extract_batch_with_workers(extractor, descriptions, num_cpus::get()).await
}

/// Extract first sentences using at most `workers` blocking tasks
pub async fn extract_batch_with_workers(
    extractor: &FirstSentenceExtractor,
    descriptions: Vec<String>,
    workers: usize,
) -> Result<BatchResult> {
    let start_time = Instant::now();
    let total = descriptions.len();
    let workers = workers.max(1).min(total.max(1));
    let chunk_size = total.div_ceil(workers).max(1);

    debug!("Extracting {} descriptions with {} workers (chunk size {})", total, workers, chunk_size);

    let mut chunks = Vec::with_capacity(workers);
    let mut remaining = descriptions.into_iter();
    let mut offset = 0;
    while offset < total {
        let chunk: Vec<String> = remaining.by_ref().take(chunk_size).collect();
        let base = offset;
        offset += chunk.len();

        let extractor = extractor.clone();
        chunks.push(tokio::task::spawn_blocking(move || extract_chunk(&extractor, base, chunk)));
    }

    let spawned = chunks.len();
    let mut chars_processed = 0u64;
    let mut extractions = Vec::with_capacity(total);
    for (chunk, chunk_chars) in try_join_all(chunks).await.context("Extraction worker panicked")? {
        extractions.extend(chunk);
        chars_processed += chunk_chars;
    }

    let terminated = extractions.iter().filter(|e| e.terminated).count() as u64;
    let stats = BatchStats {
        descriptions: extractions.len() as u64,
        terminated,
        exhausted: extractions.len() as u64 - terminated,
        chars_processed,
        workers: spawned as u64,
        processing_time_ms: start_time.elapsed().as_millis() as u64,
    };

    info!(
        "Extracted {} descriptions ({} terminated, {} kept whole) in {}ms",
        stats.descriptions, stats.terminated, stats.exhausted, stats.processing_time_ms
    );

    Ok(BatchResult { extractions, stats })
}

/// Extractions for one chunk plus the number of input characters it held
fn extract_chunk(extractor: &FirstSentenceExtractor, base: usize, chunk: Vec<String>) -> (Vec<Extraction>, u64) {
    let mut chars = 0u64;
    let extractions = chunk
        .into_iter()
        .enumerate()
        .map(|(i, mut text)| {
            chars += text.chars().count() as u64;
            let outcome = extractor.scan(&text);
            text.truncate(outcome.sentence_end(text.len()));
            Extraction {
                index: base + i,
                sentence: text,
                terminated: outcome.is_boundary(),
            }
        })
        .collect();
    (extractions, chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Item {i} is here. Trailing text.")).collect()
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let extractor = FirstSentenceExtractor::default();
        let result = extract_batch_with_workers(&extractor, inputs(37), 4).await.unwrap();

        assert_eq!(result.extractions.len(), 37);
        for (i, extraction) in result.extractions.iter().enumerate() {
            assert_eq!(extraction.index, i);
            assert_eq!(extraction.sentence, format!("Item {i} is here."));
            assert!(extraction.terminated);
        }
        assert_eq!(result.stats.workers, 4);
        assert_eq!(result.stats.terminated, 37);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let extractor = FirstSentenceExtractor::default();
        let result = extract_batch(&extractor, Vec::new()).await.unwrap();

        assert!(result.extractions.is_empty());
        assert_eq!(result.stats.descriptions, 0);
        assert_eq!(result.stats.workers, 0);
    }

    #[tokio::test]
    async fn test_more_workers_than_descriptions() {
        let extractor = FirstSentenceExtractor::default();
        let result = extract_batch_with_workers(&extractor, inputs(2), 16).await.unwrap();

        assert_eq!(result.extractions.len(), 2);
        assert_eq!(result.stats.workers, 2);
    }

    #[tokio::test]
    async fn test_stats_count_exhausted_descriptions() {
        let extractor = FirstSentenceExtractor::default();
        let descriptions = vec![
            "Done. Next.".to_string(),
            "no terminator here".to_string(),
            String::new(),
        ];
        let result = extract_batch_with_workers(&extractor, descriptions, 2).await.unwrap();

        assert_eq!(result.stats.terminated, 1);
        assert_eq!(result.stats.exhausted, 2);
        // whole inputs are counted, not just the extracted sentences
        assert_eq!(result.stats.chars_processed, 11 + 18);
        assert_eq!(result.extractions[1].sentence, "no terminator here");
        assert!(!result.extractions[2].terminated);
    }

    #[tokio::test]
    async fn test_chars_processed_counts_scanned_input() {
        let extractor = FirstSentenceExtractor::default();
        let descriptions = vec![
            "Zürich is a city. It is large.".to_string(),
            "Short. ".to_string(),
        ];
        let result = extract_batch_with_workers(&extractor, descriptions, 2).await.unwrap();

        assert_eq!(result.extractions[0].sentence, "Zürich is a city.");
        assert_eq!(result.extractions[1].sentence, "Short.");
        assert_eq!(result.stats.chars_processed, 30 + 7);
    }
}
