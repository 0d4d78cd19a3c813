use anyhow::Result;
use std::path::Path;
use std::time::Instant;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

/// Source label used for standard input
pub const STDIN_SOURCE: &str = "<stdin>";

/// Configuration for description reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// One description paragraph: a non-blank input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    /// 1-based line number within its source
    pub line: u64,
    pub text: String,
}

/// Statistics for one read source
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub source: String,
    pub lines_read: u64,
    pub descriptions: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// Async reader that turns line-oriented input into descriptions
pub struct ParagraphReader {
    config: ReaderConfig,
}

impl ParagraphReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read descriptions from a file, one per non-blank line
    pub async fn read_file<P: AsRef<Path>>(&self, file_path: P) -> Result<(Vec<Description>, ReadStats)> {
        let start_time = Instant::now();
        let path = file_path.as_ref();
        let source = path.display().to_string();

        debug!("Starting async read of file: {}", source);

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                let error_msg = format!("Failed to open file {}: {}", source, e);
                return self.failed(source, error_msg, Vec::new(), 0, 0, start_time);
            }
        };

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        self.read_lines(source, reader).await
    }

    /// Read descriptions from standard input
    pub async fn read_stdin(&self) -> Result<(Vec<Description>, ReadStats)> {
        let reader = BufReader::with_capacity(self.config.buffer_size, tokio::io::stdin());
        self.read_lines(STDIN_SOURCE.to_string(), reader).await
    }

    /// Read descriptions from any buffered async source
    pub async fn read_lines<R>(&self, source: String, reader: R) -> Result<(Vec<Description>, ReadStats)>
    where
        R: AsyncBufRead + Unpin,
    {
        let start_time = Instant::now();
        let mut lines = LinesStream::new(reader.lines());
        let mut descriptions = Vec::new();
        let mut line_count = 0u64;
        let mut byte_count = 0u64;

        while let Some(next) = lines.next().await {
            match next {
                Ok(line) => {
                    line_count += 1;
                    byte_count += line.len() as u64 + 1; // +1 for newline
                    if !line.trim().is_empty() {
                        descriptions.push(Description { line: line_count, text: line });
                    }
                }
                Err(e) => {
                    let error_msg = format!(
                        "Read error in {} at line {}: {}",
                        source,
                        line_count + 1,
                        e
                    );
                    return self.failed(source, error_msg, descriptions, line_count, byte_count, start_time);
                }
            }
        }

        let stats = ReadStats {
            source,
            lines_read: line_count,
            descriptions: descriptions.len() as u64,
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: None,
        };

        info!(
            "Read {}: {} lines, {} descriptions, {} bytes in {}ms",
            stats.source, stats.lines_read, stats.descriptions, stats.bytes_read, stats.duration_ms
        );
        Ok((descriptions, stats))
    }

    /// Read several files in order, honoring `fail_fast` between files
    pub async fn read_files<P: AsRef<Path>>(
        &self,
        file_paths: &[P],
    ) -> Result<Vec<(Vec<Description>, ReadStats)>> {
        info!("Starting batch read of {} files", file_paths.len());

        let mut results = Vec::with_capacity(file_paths.len());
        for file_path in file_paths {
            results.push(self.read_file(file_path).await?);
        }

        info!("Completed batch read of {} files", results.len());
        Ok(results)
    }

    /// Either abort or hand back what was read so far, depending on `fail_fast`
    fn failed(
        &self,
        source: String,
        error_msg: String,
        descriptions: Vec<Description>,
        lines_read: u64,
        bytes_read: u64,
        start_time: Instant,
    ) -> Result<(Vec<Description>, ReadStats)> {
        warn!("{}", error_msg);

        if self.config.fail_fast {
            return Err(anyhow::anyhow!(error_msg));
        }

        let stats = ReadStats {
            source,
            lines_read,
            descriptions: descriptions.len() as u64,
            bytes_read,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: Some(error_msg),
        };
        Ok((descriptions, stats))
    }
}
