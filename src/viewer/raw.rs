//! Raw view: pretty-printed JSON with syntax tags and line numbers

use crate::value::DecodedValue;
use once_cell::sync::Lazy;
use regex::Regex;

/// Quoted string with optional trailing colon, keyword, or number.
/// Alternation order gives strings precedence over anything inside them.
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#""(?:\\u[a-fA-F0-9]{4}|\\[^u]|[^\\"])*"(?:\s*:)?|\b(?:true|false|null)\b|-?\d+(?:\.\d*)?(?:[eE][+\-]?\d+)?"#,
    )
    .expect("Invalid JSON token regex pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Key,
    String,
    Number,
    Boolean,
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawToken {
    pub text: String,
    /// `None` for punctuation and whitespace
    pub kind: Option<TokenKind>,
}

/// Tagged lines of the serialized body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawDocument {
    pub lines: Vec<Vec<RawToken>>,
}

impl RawDocument {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Width of the line-number gutter
    pub fn gutter_width(&self) -> usize {
        self.line_count().max(1).to_string().len()
    }

    pub fn line_text(&self, idx: usize) -> Option<String> {
        self.lines
            .get(idx)
            .map(|line| line.iter().map(|token| token.text.as_str()).collect())
    }
}

/// Serialize `value` canonically and tag it for highlighting
pub fn format_raw(value: &DecodedValue) -> RawDocument {
    highlight(&value.pretty())
}

/// Tag already-serialized JSON text, left to right
pub fn highlight(text: &str) -> RawDocument {
    let lines = text.split('\n').map(highlight_line).collect();
    RawDocument { lines }
}

fn highlight_line(line: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in TOKEN_REGEX.find_iter(line) {
        if m.start() > last {
            tokens.push(RawToken {
                text: line[last..m.start()].to_string(),
                kind: None,
            });
        }
        tokens.push(RawToken {
            text: m.as_str().to_string(),
            kind: Some(token_kind(m.as_str())),
        });
        last = m.end();
    }

    if last < line.len() {
        tokens.push(RawToken {
            text: line[last..].to_string(),
            kind: None,
        });
    }
    tokens
}

fn token_kind(token: &str) -> TokenKind {
    if token.starts_with('"') {
        if token.ends_with(':') {
            TokenKind::Key
        } else {
            TokenKind::String
        }
    } else if token == "true" || token == "false" {
        TokenKind::Boolean
    } else if token == "null" {
        TokenKind::Null
    } else {
        TokenKind::Number
    }
}
