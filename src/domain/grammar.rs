//! Tokenizer for the prm text grammar.
//!
//! A prm document is a sequence of logical lines of three shapes:
//!
//! ```text
//! set <name> = <value>
//! subsection <name>
//! end
//! ```
//!
//! Blank lines and `#` comments are dropped; `\#` is a literal `#`. A trailing
//! `\` continues a line onto the next physical line, while a trailing `\\` is
//! a single literal backslash. Names and values are returned trimmed, so the
//! padding around `=` never survives tokenization.

use regex::Regex;
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

/// Shape of one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Set { name: String, value: String },
    Subsection(String),
    End,
}

/// A logical line with the 1-based number of the physical line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub line: usize,
    pub kind: LineKind,
}

/// Splits raw prm text into [`Token`]s.
pub struct Tokenizer {
    set_regex: Regex,
    subsection_regex: Regex,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            set_regex: Regex::new(r"^set\s+(\S.*?)\s*=\s*(.*)$").unwrap(),
            subsection_regex: Regex::new(r"^subsection\s+(\S.*)$").unwrap(),
        }
    }

    #[instrument(level = "trace", skip_all)]
    pub fn tokenize(&self, content: &str) -> DomainResult<Vec<Token>> {
        let mut tokens = Vec::new();
        // (first line number, accumulated text) of a line continued with `\`
        let mut pending: Option<(usize, String)> = None;

        for (idx, raw) in content.lines().enumerate() {
            let stripped = strip_comment(raw);
            let piece = stripped.trim();

            let (start, mut text) = match pending.take() {
                Some((start, mut acc)) => {
                    if !piece.is_empty() {
                        acc.push(' ');
                        acc.push_str(piece);
                    }
                    (start, acc)
                }
                None => (idx + 1, piece.to_string()),
            };

            if text.ends_with(r"\\") {
                text.pop();
            } else if let Some(head) = text.strip_suffix('\\') {
                pending = Some((start, head.trim_end().to_string()));
                continue;
            }
            if text.is_empty() {
                continue;
            }
            tokens.push(self.classify(start, &text)?);
        }

        if let Some((start, text)) = pending {
            if !text.is_empty() {
                tokens.push(self.classify(start, &text)?);
            }
        }

        trace!("tokenized {} logical lines", tokens.len());
        Ok(tokens)
    }

    fn classify(&self, line: usize, text: &str) -> DomainResult<Token> {
        let kind = if text == "end" {
            LineKind::End
        } else if let Some(caps) = self.set_regex.captures(text) {
            LineKind::Set {
                name: caps[1].trim().to_string(),
                value: caps[2].trim().to_string(),
            }
        } else if let Some(caps) = self.subsection_regex.captures(text) {
            LineKind::Subsection(caps[1].trim().to_string())
        } else {
            return Err(DomainError::MalformedLine {
                line,
                content: text.to_string(),
            });
        };
        Ok(Token { line, kind })
    }
}

/// Tokenize with a fresh [`Tokenizer`].
pub fn tokenize(content: &str) -> DomainResult<Vec<Token>> {
    Tokenizer::new().tokenize(content)
}

/// Cut the line at the first unescaped `#`; `\#` becomes a literal `#`.
fn strip_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'#') => {
                out.push('#');
                chars.next();
            }
            '#' => break,
            _ => out.push(c),
        }
    }
    out
}
