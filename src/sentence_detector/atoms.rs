// WHY: Atom matcher - the non-breaking units a sentence boundary can never fall inside
// Priority order: quote, round bracket, square bracket, abbreviation, initial, plain character

use super::AbbreviationTable;

/// What kind of span an [`Atom`] covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// `"` up to the next `"`, or to end of input when unclosed
    Quoted,
    /// `(` up to the first following `)`
    RoundBracketed,
    /// `[` up to the first following `]`
    SquareBracketed,
    /// Table entry plus its period
    Abbreviation,
    /// Single uppercase letter plus period
    Initial,
    /// One ordinary character
    Plain,
}

/// Byte span `[start, end)` of one matched atom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom {
    pub start: usize,
    pub end: usize,
    pub kind: AtomKind,
}

impl Atom {
    fn new(start: usize, end: usize, kind: AtomKind) -> Self {
        Self { start, end, kind }
    }

    /// The atom's text within `text`
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Input paragraph plus the lookups the matcher needs in O(1)
///
/// The last closing bracket positions are recorded up front so an opener with
/// no closer anywhere after it is rejected without rescanning the tail. Every
/// successful bracket or quote search consumes what it scans, which keeps the
/// whole pass linear.
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    text: &'a str,
    last_round_close: Option<usize>,
    last_square_close: Option<usize>,
}

impl<'a> Paragraph<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            last_round_close: text.rfind(')'),
            last_square_close: text.rfind(']'),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Character immediately before byte offset `pos`
    pub fn char_before(&self, pos: usize) -> Option<char> {
        self.text[..pos].chars().next_back()
    }

    /// Match the next atom starting at byte offset `pos`
    ///
    /// `pos` must be a character boundary strictly inside the text. The returned
    /// atom always ends after `pos`.
    pub fn next_atom(&self, pos: usize, table: &AbbreviationTable) -> Atom {
        let rest = &self.text[pos..];
        let Some(current) = rest.chars().next() else {
            return Atom::new(pos, pos, AtomKind::Plain);
        };
        let plain = Atom::new(pos, pos + current.len_utf8(), AtomKind::Plain);

        match current {
            '"' => {
                let end = rest[1..]
                    .find('"')
                    .map(|offset| pos + 1 + offset + 1)
                    .unwrap_or(self.text.len());
                Atom::new(pos, end, AtomKind::Quoted)
            }
            '(' => self
                .bracketed(pos, ')', self.last_round_close, AtomKind::RoundBracketed)
                .unwrap_or(plain),
            '[' => self
                .bracketed(pos, ']', self.last_square_close, AtomKind::SquareBracketed)
                .unwrap_or(plain),
            _ if self.at_word_start(pos, current) => self
                .abbreviation(pos, table)
                .or_else(|| self.initial(pos, current))
                .unwrap_or(plain),
            _ => plain,
        }
    }

    fn bracketed(
        &self,
        pos: usize,
        close: char,
        last_close: Option<usize>,
        kind: AtomKind,
    ) -> Option<Atom> {
        // Openers are single-byte, so the closer must sit past pos
        if last_close? <= pos {
            return None;
        }
        let offset = self.text[pos + 1..].find(close)?;
        Some(Atom::new(pos, pos + 1 + offset + 1, kind))
    }

    fn abbreviation(&self, pos: usize, table: &AbbreviationTable) -> Option<Atom> {
        table
            .match_at(self.text, pos)
            .map(|end| Atom::new(pos, end, AtomKind::Abbreviation))
    }

    fn initial(&self, pos: usize, current: char) -> Option<Atom> {
        if current.is_ascii_uppercase() && self.text[pos + 1..].starts_with('.') {
            Some(Atom::new(pos, pos + 2, AtomKind::Initial))
        } else {
            None
        }
    }

    /// Word boundary in front of a word character
    fn at_word_start(&self, pos: usize, current: char) -> bool {
        is_word_char(current) && !self.char_before(pos).is_some_and(is_word_char)
    }
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
