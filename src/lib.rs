pub mod sentence_detector;
pub mod labels;
pub mod reader;
pub mod parallel_processing;

// Re-export main types for convenient access
pub use sentence_detector::{
    first_sentence,
    AbbreviationTable,
    FirstSentenceExtractor,
    ScanOutcome
};

// Re-export batch processing types for benchmarking and the CLI
pub use parallel_processing::{
    BatchResult, BatchStats, Extraction,
    extract_batch, extract_batch_with_workers
};
