// WHY: Boundary classifier - decides whether a plain '.', '!' or '?' really ends the sentence
// Only looks one or two characters ahead, except for trailing whitespace before end of input

use super::atoms::{Atom, AtomKind, Paragraph};

/// Outcome of classifying one atom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Sentence ends at the atom's end
    Confirmed,
    /// Atom is ordinary content
    Continue,
}

/// Classify the atom just consumed by the scan driver
pub fn classify(paragraph: &Paragraph<'_>, atom: &Atom) -> Boundary {
    if atom.kind != AtomKind::Plain {
        return Boundary::Continue;
    }

    let text = paragraph.text();
    let rest = &text[atom.end..];
    let confirmed = match atom.as_str(text) {
        "." => {
            // Periods after a period belong to an ellipsis run
            paragraph.char_before(atom.start) != Some('.')
                && (starts_new_sentence(rest) || rest.trim_start().is_empty())
        }
        "!" | "?" => {
            // A '!'/'?' run is judged once, at its last character
            !rest.starts_with(['!', '?']) && (starts_new_sentence(rest) || rest.is_empty())
        }
        _ => false,
    };

    if confirmed {
        Boundary::Confirmed
    } else {
        Boundary::Continue
    }
}

/// Whitespace followed by something other than a lowercase letter
///
/// A second whitespace character counts as "something other", so a double
/// space always starts a new sentence regardless of what follows it.
fn starts_new_sentence(rest: &str) -> bool {
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(gap), Some(next)) => gap.is_whitespace() && !next.is_ascii_lowercase(),
        _ => false,
    }
}
