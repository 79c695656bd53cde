// ── Priority scanner ──────────────────────────────────────────────────────────
//
// Walks the text left to right.  At each offset every category in
// `TokenKind::PRIORITY` is tried in order; the first one that matches wins
// and scanning resumes after it.  Offsets where nothing matches are skipped
// one character at a time and become `Plain` gaps in the caller.

use super::{TokenKind, TokenSpan};
use crate::languages::Language;

pub(super) struct Scanner<'a> {
    text: &'a str,
    keywords: &'static [&'static str],
    types: &'static [&'static str],
    pos: usize,
    /// Smallest offset from which a search for `*/` already failed.  Every
    /// block opener at or after it is unterminated too.
    unclosed_block_from: Option<usize>,
}

impl<'a> Scanner<'a> {
    pub(super) fn new(text: &'a str, language: Language) -> Self {
        Self {
            text,
            keywords: language.keywords(),
            types: language.types(),
            pos: 0,
            unclosed_block_from: None,
        }
    }

    /// Length of the highest-priority match starting at `at`, if any.
    fn match_at(&mut self, at: usize) -> Option<(TokenKind, usize)> {
        for kind in TokenKind::PRIORITY {
            let len = match kind {
                TokenKind::Keyword => self.word_in(at, self.keywords),
                TokenKind::Paren => self.one_of(at, &['(', ')']),
                TokenKind::Brace => self.one_of(at, &['{', '}']),
                TokenKind::Bracket => self.one_of(at, &['[', ']']),
                TokenKind::Semicolon => self.one_of(at, &[';']),
                TokenKind::String => self.string_literal(at),
                TokenKind::Comment => self.comment(at),
                TokenKind::Integer => self.integer(at),
                TokenKind::Type => self.word_in(at, self.types),
                TokenKind::Plain => None,
            };
            if let Some(len) = len {
                return Some((kind, len));
            }
        }
        None
    }

    // ── Categories ────────────────────────────────────────────────────────────

    fn one_of(&self, at: usize, chars: &[char]) -> Option<usize> {
        let c = self.text[at..].chars().next()?;
        chars.contains(&c).then_some(c.len_utf8())
    }

    /// A whole word listed in `lexicon`.
    fn word_in(&self, at: usize, lexicon: &[&str]) -> Option<usize> {
        if !self.at_word_start(at) {
            return None;
        }
        let rest = &self.text[at..];
        let len = rest
            .char_indices()
            .find(|&(_, c)| !is_word_char(c))
            .map_or(rest.len(), |(i, _)| i);
        let word = &rest[..len];
        lexicon.iter().any(|&entry| entry == word).then_some(len)
    }

    /// A run of ASCII digits that is a whole word.
    fn integer(&self, at: usize) -> Option<usize> {
        if !self.at_word_start(at) {
            return None;
        }
        let rest = &self.text[at..];
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if len == 0 {
            return None;
        }
        match rest[len..].chars().next() {
            Some(c) if is_word_char(c) => None,
            _ => Some(len),
        }
    }

    /// `"…"` where `\` escapes the next character.  A backslash before a line
    /// terminator, or end of input, means there is no string here.
    fn string_literal(&self, at: usize) -> Option<usize> {
        let rest = &self.text[at..];
        if !rest.starts_with('"') {
            return None;
        }
        let mut chars = rest.char_indices().skip(1);
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => return Some(i + 1),
                '\\' => match chars.next() {
                    Some((_, escaped)) if !is_line_terminator(escaped) => {}
                    _ => return None,
                },
                _ => {}
            }
        }
        None
    }

    /// `//` to end of line, or `/*` to the nearest following `*/`.
    fn comment(&mut self, at: usize) -> Option<usize> {
        let rest = &self.text[at..];
        if rest.starts_with("//") {
            return Some(rest.find('\n').unwrap_or(rest.len()));
        }
        if !rest.starts_with("/*") {
            return None;
        }
        if self.unclosed_block_from.is_some_and(|from| at >= from) {
            return None;
        }
        match rest[2..].find("*/") {
            Some(i) => Some(i + 4),
            None => {
                self.unclosed_block_from = Some(at);
                None
            }
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn at_word_start(&self, at: usize) -> bool {
        let starts_word = self.text[at..].chars().next().is_some_and(is_word_char);
        let follows_word = self.text[..at].chars().next_back().is_some_and(is_word_char);
        starts_word && !follows_word
    }
}

impl Iterator for Scanner<'_> {
    type Item = TokenSpan;

    fn next(&mut self) -> Option<TokenSpan> {
        while let Some(c) = self.text[self.pos..].chars().next() {
            let start = self.pos;
            if let Some((kind, len)) = self.match_at(start) {
                self.pos = start + len;
                return Some(TokenSpan::new(kind, start, len));
            }
            self.pos += c.len_utf8();
        }
        None
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}
