// WHY: First-sentence extraction for card and deck descriptions
// Single forward pass over atoms; no backtracking, so time is linear in input length

use std::sync::Arc;
use tracing::trace;

pub mod abbreviations;
pub mod atoms;
pub mod boundary;

pub use abbreviations::{AbbreviationTable, BUILTIN_ABBREVIATIONS};
pub use atoms::{Atom, AtomKind, Paragraph};
pub use boundary::Boundary;

/// Where a scan stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Terminator confirmed; exclusive byte end of the first sentence
    Boundary(usize),
    /// End of input reached without a confirmed terminator
    Exhausted,
}

impl ScanOutcome {
    /// Byte length of the first sentence within a text of `text_len` bytes
    pub fn sentence_end(self, text_len: usize) -> usize {
        match self {
            ScanOutcome::Boundary(end) => end,
            ScanOutcome::Exhausted => text_len,
        }
    }

    pub fn is_boundary(self) -> bool {
        matches!(self, ScanOutcome::Boundary(_))
    }
}

/// Rule-based first-sentence extractor
///
/// Holds a shared, read-only [`AbbreviationTable`]; clones are cheap and the
/// extractor can be used from any number of threads at once.
///
/// ```
/// use lede::sentence_detector::FirstSentenceExtractor;
/// let extractor = FirstSentenceExtractor::with_default_table();
/// assert_eq!(
///     extractor.first_sentence("An abbr. Mr Bond. Second sentence."),
///     "An abbr. Mr Bond."
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FirstSentenceExtractor {
    table: Arc<AbbreviationTable>,
}

impl FirstSentenceExtractor {
    pub fn new(table: Arc<AbbreviationTable>) -> Self {
        Self { table }
    }

    /// Extractor over the process-wide built-in table
    pub fn with_default_table() -> Self {
        Self::new(AbbreviationTable::shared())
    }

    pub fn table(&self) -> &AbbreviationTable {
        &self.table
    }

    /// Scan `text` until the first confirmed terminator
    pub fn scan(&self, text: &str) -> ScanOutcome {
        let paragraph = Paragraph::new(text);
        let mut cursor = 0;

        while cursor < paragraph.len() {
            let atom = paragraph.next_atom(cursor, &self.table);
            if boundary::classify(&paragraph, &atom) == Boundary::Confirmed {
                trace!(end = atom.end, len = text.len(), "Confirmed sentence boundary");
                return ScanOutcome::Boundary(atom.end);
            }
            cursor = atom.end;
        }

        trace!(len = text.len(), "No sentence boundary before end of input");
        ScanOutcome::Exhausted
    }

    /// First sentence of `text`, borrowed from it
    ///
    /// Always a prefix of `text`; the whole of `text` when no terminator is
    /// confirmed. Never fails.
    pub fn first_sentence<'a>(&self, text: &'a str) -> &'a str {
        &text[..self.scan(text).sentence_end(text.len())]
    }
}

impl Default for FirstSentenceExtractor {
    fn default() -> Self {
        Self::with_default_table()
    }
}

/// First sentence of `text` using the built-in abbreviation table
///
/// ```
/// assert_eq!(lede::first_sentence("Simple sentence. Second sentence."), "Simple sentence.");
/// assert_eq!(lede::first_sentence("Ellipsis at EOI..."), "Ellipsis at EOI...");
/// ```
pub fn first_sentence(text: &str) -> &str {
    FirstSentenceExtractor::with_default_table().first_sentence(text)
}
