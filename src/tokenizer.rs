// ✂️ CSV Tokenizer - Logical lines and fields
//
// Quoting rules (RFC-4180 style):
// - A quoted field may contain commas, `\n` and `\r` without ending the line
// - `""` inside a quoted field is one literal quote
// - `\r\n` is a single line break
// - An unterminated quote runs to end of input

use serde::{Deserialize, Serialize};

const BOM: char = '\u{feff}';

/// One logical CSV line with its 1-based position in the line stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalLine {
    pub number: usize,
    pub text: String,
}

/// Remove a leading byte-order mark, if present
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Split text into logical lines.
///
/// Line breaks inside quotes are kept as part of the line. Quote characters
/// are kept verbatim; `split_fields` removes them. A trailing empty line is
/// not emitted, interior blank lines are.
pub fn split_logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                // `""` toggles twice, so escaped quotes leave the state unchanged
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Split one logical line into unescaped field values
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(ch),
            }
        }
    }

    fields.push(current);
    fields
}

/// Full tokenizer pass: strip BOM, split lines, number them, drop blank ones.
///
/// Numbering counts blank lines too, so line numbers match what a user
/// sees in the source file's line stream (header is line 1).
pub fn tokenize(text: &str) -> Vec<LogicalLine> {
    split_logical_lines(strip_bom(text))
        .into_iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, text)| LogicalLine { number: i + 1, text })
        .collect()
}
