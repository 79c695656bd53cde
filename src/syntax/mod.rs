// ── Lexical highlighting ──────────────────────────────────────────────────────
//
// Turns buffer text into an ordered, gap-free sequence of classified spans.
// Stateless: the whole text is re-scanned on every edit.

mod scanner;

use std::ops::Range;

use serde::Serialize;

use crate::languages::Language;
use scanner::Scanner;

// ── Token kinds ───────────────────────────────────────────────────────────────

/// Classification of one span.  Serialises to the lowercase style-class name
/// (`"keyword"`, `"paren"`, …) a stylesheet keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Keyword,
    Paren,
    Brace,
    Bracket,
    Semicolon,
    String,
    Comment,
    Integer,
    Type,
    Plain,
}

impl TokenKind {
    /// Matchable categories, highest priority first.  When two categories
    /// match at the same offset the earlier one wins.
    pub const PRIORITY: [TokenKind; 9] = [
        TokenKind::Keyword,
        TokenKind::Paren,
        TokenKind::Brace,
        TokenKind::Bracket,
        TokenKind::Semicolon,
        TokenKind::String,
        TokenKind::Comment,
        TokenKind::Integer,
        TokenKind::Type,
    ];

    /// Style-class name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Paren => "paren",
            Self::Brace => "brace",
            Self::Bracket => "bracket",
            Self::Semicolon => "semicolon",
            Self::String => "string",
            Self::Comment => "comment",
            Self::Integer => "integer",
            Self::Type => "type",
            Self::Plain => "plain",
        }
    }
}

// ── Spans ─────────────────────────────────────────────────────────────────────

/// A classified byte range of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenSpan {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub start: usize,
    /// Length in bytes.
    pub len: usize,
}

impl TokenSpan {
    pub fn new(kind: TokenKind, start: usize, len: usize) -> Self {
        Self { kind, start, len }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The slice of `source` this span covers.  `source` must be the text
    /// the span was produced from.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range()]
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Tokenize Java source text.
///
/// Total and deterministic.  The returned spans are in text order, never
/// overlap, and concatenate back to `text`.  Unmatched runs between two
/// matches come out as `Plain`; empty runs are not emitted.
pub fn tokenize(text: &str) -> Vec<TokenSpan> {
    highlight(Language::Java, text)
}

/// Tokenize `text` using the lexicons of `language`.
///
/// `Language::PlainText` yields a single `Plain` span over the whole input.
pub fn highlight(language: Language, text: &str) -> Vec<TokenSpan> {
    if language == Language::PlainText {
        let mut spans = Vec::with_capacity(1);
        push_plain(&mut spans, 0, text.len());
        return spans;
    }

    let mut spans = Vec::new();
    let mut gap_start = 0;
    for token in Scanner::new(text, language) {
        push_plain(&mut spans, gap_start, token.start);
        gap_start = token.end();
        spans.push(token);
    }
    push_plain(&mut spans, gap_start, text.len());
    spans
}

fn push_plain(spans: &mut Vec<TokenSpan>, start: usize, end: usize) {
    if end > start {
        spans.push(TokenSpan::new(TokenKind::Plain, start, end - start));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
