// WHY: Abbreviation table consulted by the atom matcher before a period is ever classified
// Entries are stored without their trailing period; the period is required in the text

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Built-in entries tuned for English encyclopedic synopses
/// Dotted forms ("e.g", "U.S") are spelled literally; the final period comes from the text
pub const BUILTIN_ABBREVIATIONS: &[&str] = &[
    "A.B", "Abbr", "Acad", "A.D", "Al", "Alt", "A.M", "Assn", "Aug", "Ave",
    "B.A", "B.C", "B.P", "B.S", "c", "Cal", "Capt", "Cent", "Co", "Col",
    "Comdr", "Corp", "Cpl", "Cu", "d", "D.C", "Dec", "Dept", "Dist", "Div",
    "Dr", "Ed", "e.g", "Est", "Feb", "Fl", "Gal", "Gen", "Gov", "Grad", "Hon",
    "i.e", "In", "Inc", "Inst", "Jan", "Jr", "Lat", "Lb", "Lib", "Long", "Lt",
    "Ltd", "M.D", "Mr", "Mrs", "Ms", "Msgr", "Mt", "Mts", "Mus", "No", "Nov",
    "Oct", "Op", "Ph.D", "Pl", "Pop", "Pseud", "Pt", "Pub", "Rev", "R.N", "Sept", "Ser",
    "Sgt", "Sr", "St", "Uninc", "Univ", "U.S", "Vol", "vs", "v", "Wt",
];

static BUILTIN_TABLE: OnceLock<Arc<AbbreviationTable>> = OnceLock::new();

/// On-disk shape of a custom abbreviation table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AbbreviationFile {
    /// Append to the built-in entries instead of replacing them
    #[serde(default)]
    extend_builtin: bool,
    entries: Vec<String>,
}

/// Ordered, read-only set of abbreviations that never end a sentence
///
/// Matching is case-appropriate rather than case-insensitive: the first letter
/// of an entry, and any letter right after one of its interior periods, may
/// appear in either ASCII case. Everything else must match exactly, so "Aug"
/// matches "aug." but not "AUG.".
#[derive(Debug, Clone)]
pub struct AbbreviationTable {
    entries: Vec<String>,
    /// Entry indices keyed by the ASCII-lowercased initial character
    by_initial: HashMap<char, Vec<usize>>,
}

impl AbbreviationTable {
    /// Build a table from caller-supplied entries, rejecting ones the matcher cannot use
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        for entry in &entries {
            validate_entry(entry)?;
        }
        Ok(Self::from_validated(entries))
    }

    /// Table holding [`BUILTIN_ABBREVIATIONS`]
    pub fn builtin() -> Self {
        Self::from_validated(BUILTIN_ABBREVIATIONS.iter().map(|s| s.to_string()).collect())
    }

    /// Process-wide built-in table, created on first use
    pub fn shared() -> Arc<Self> {
        BUILTIN_TABLE.get_or_init(|| Arc::new(Self::builtin())).clone()
    }

    /// Parse a TOML table definition
    ///
    /// ```
    /// use lede::sentence_detector::AbbreviationTable;
    /// let table = AbbreviationTable::from_toml_str("extend_builtin = true\nentries = [\"Prof\"]").unwrap();
    /// assert!(table.contains("Prof"));
    /// assert!(table.contains("Mr"));
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: AbbreviationFile =
            toml::from_str(content).context("Failed to parse abbreviation table")?;

        let mut entries = if file.extend_builtin {
            BUILTIN_ABBREVIATIONS.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };
        entries.extend(file.entries);

        let table = Self::new(entries)?;
        debug!(
            "Parsed abbreviation table with {} entries (extend_builtin: {})",
            table.len(),
            file.extend_builtin
        );
        Ok(table)
    }

    /// Load a TOML table definition from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read abbreviation table {}", path.display()))?;
        let table = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid abbreviation table {}", path.display()))?;
        info!("Loaded {} abbreviations from {}", table.len(), path.display());
        Ok(table)
    }

    fn from_validated(entries: Vec<String>) -> Self {
        let mut unique = Vec::with_capacity(entries.len());
        for entry in entries {
            if !unique.contains(&entry) {
                unique.push(entry);
            }
        }

        let mut by_initial: HashMap<char, Vec<usize>> = HashMap::new();
        for (index, entry) in unique.iter().enumerate() {
            if let Some(initial) = entry.chars().next() {
                by_initial.entry(initial.to_ascii_lowercase()).or_default().push(index);
            }
        }

        Self { entries: unique, by_initial }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact (case-sensitive) membership test
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Match an entry plus its trailing period at byte offset `pos`
    ///
    /// Returns the byte offset just past the period of the longest matching
    /// entry. Word-boundary checks are the caller's concern.
    pub fn match_at(&self, text: &str, pos: usize) -> Option<usize> {
        let rest = text.get(pos..)?;
        let initial = rest.chars().next()?.to_ascii_lowercase();
        let candidates = self.by_initial.get(&initial)?;

        candidates
            .iter()
            .map(|&index| self.entries[index].as_str())
            .filter(|entry| entry_matches(entry, rest))
            .map(str::len)
            .max()
            .map(|len| pos + len + 1)
    }
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// True when `text` starts with `entry` (case-appropriately) followed by '.'
fn entry_matches(entry: &str, text: &str) -> bool {
    let mut text_chars = text.chars();
    let mut fold_case = true;

    for expected in entry.chars() {
        let Some(actual) = text_chars.next() else {
            return false;
        };
        let same = if fold_case {
            expected.eq_ignore_ascii_case(&actual)
        } else {
            expected == actual
        };
        if !same {
            return false;
        }
        fold_case = expected == '.';
    }

    text_chars.next() == Some('.')
}

fn validate_entry(entry: &str) -> Result<()> {
    let Some(first) = entry.chars().next() else {
        bail!("Abbreviation entries must not be empty");
    };
    if !(first.is_alphanumeric() || first == '_') {
        bail!("Abbreviation {entry:?} must start with a letter, digit or underscore");
    }
    if entry.chars().any(char::is_whitespace) {
        bail!("Abbreviation {entry:?} must not contain whitespace");
    }
    if entry.ends_with('.') {
        bail!("Abbreviation {entry:?} must be written without its trailing period");
    }
    Ok(())
}
