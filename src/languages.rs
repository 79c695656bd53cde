// ── Language detection ────────────────────────────────────────────────────────
//
// Maps file paths to `Language` values and holds the word lexicons the
// tokenizer classifies against.  No I/O; pure Rust.

use std::path::Path;

// ── Language enum ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    PlainText,
    Java,
}

impl Language {
    /// Human-readable name for status displays.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::PlainText => "Plain Text",
            Language::Java => "Java",
        }
    }

    /// Reserved words, tested before [`Language::types`].
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Language::Java => JAVA_KEYWORDS,
            Language::PlainText => &[],
        }
    }

    /// Primitive and common type names.
    pub fn types(self) -> &'static [&'static str] {
        match self {
            Language::Java => JAVA_TYPES,
            Language::PlainText => &[],
        }
    }
}

// ── Language detection ────────────────────────────────────────────────────────

/// Detect the language from a path or synthetic buffer name by its
/// extension.  Returns `Language::PlainText` when no match is found.
pub fn language_from_path(path: &Path) -> Language {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("java") => Language::Java,
        _ => Language::PlainText,
    }
}

// ── Lexicons ──────────────────────────────────────────────────────────────────

static JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "break", "case", "catch", "class", "const", "continue",
    "default", "do", "else", "enum", "extends", "final", "finally", "for", "goto",
    "if", "implements", "import", "instanceof", "interface", "native", "new",
    "package", "private", "protected", "public", "return", "static", "strictfp",
    "super", "switch", "synchronized", "this", "throw", "throws", "transient",
    "try", "void", "volatile", "while",
];

static JAVA_TYPES: &[&str] = &[
    "boolean", "char", "byte", "short", "int", "long", "float", "double", "String",
    "Array", "Class", "Interface", "Object", "Enum",
];

// ── Tests ─────────────────────────────────────────────────────────────────────
