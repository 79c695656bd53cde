// ── Editing helpers ───────────────────────────────────────────────────────────
//
// Text operations a front end applies around the caret.  Offsets are UTF-8
// byte offsets, the same unit the tokenizer reports spans in.

/// Leading whitespace of the line that contains `caret`, up to the caret.
///
/// This is what a new line inserted at `caret` should start with.  A caret
/// past the end, or inside a multi-byte character, is moved back to the
/// nearest valid position.
pub fn auto_indent(text: &str, caret: usize) -> &str {
    let caret = floor_char_boundary(text, caret);
    let line_start = text[..caret].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[line_start..caret];
    let indent_len = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..indent_len]
}

/// Insert a newline plus [`auto_indent`] at `caret`.
///
/// Returns the new text and the caret position after the inserted indent.
pub fn insert_newline(text: &str, caret: usize) -> (String, usize) {
    let caret = floor_char_boundary(text, caret);
    let indent = auto_indent(text, caret);
    let mut out = String::with_capacity(text.len() + 1 + indent.len());
    out.push_str(&text[..caret]);
    out.push('\n');
    out.push_str(indent);
    let new_caret = out.len();
    out.push_str(&text[caret..]);
    (out, new_caret)
}

fn floor_char_boundary(text: &str, at: usize) -> usize {
    let mut at = at.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

// ── Tests ─────────────────────────────────────────────────────────────────────
