//! Placeholder masking for string literals, comments and quoted identifiers.
//!
//! Rewrite rules only ever see the masked text. Every `'...'` literal,
//! `"..."` identifier, `--` line comment and `/* */` block comment is lifted
//! into a side table and replaced with a short placeholder built from
//! private-use code points:
//!
//! ```text
//! SELECT N'it''s' -- note      =>   SELECT N\u{E000}0\u{E001} \u{E004}1\u{E001}
//! ```
//!
//! The opening code point encodes the fragment kind so rules can tell a
//! literal from a comment without looking it up.
//!
//! Bracketed identifiers (`[name]`) are masked too, under their own opening
//! code point. A rule may swap that opener for [`IDENT_OPEN`], and the
//! fragment is then restored as a double-quoted identifier. A `[` that
//! follows an expression (`v:items[0]`, `f(x)[1]`) or holds a numeric or
//! comma list (`[1, 2]`) is an array subscript or literal and stays in the
//! text.

use std::sync::LazyLock;

use regex::Regex;

/// Opens a string literal placeholder.
pub const LITERAL_OPEN: char = '\u{E000}';
/// Closes every placeholder.
pub const PLACEHOLDER_CLOSE: char = '\u{E001}';
/// Opens a double-quoted identifier placeholder.
pub const IDENT_OPEN: char = '\u{E002}';
/// Opens a bracketed identifier placeholder.
pub const BRACKET_OPEN: char = '\u{E003}';
/// Opens a comment placeholder.
pub const COMMENT_OPEN: char = '\u{E004}';

const OPENERS: [char; 4] = [LITERAL_OPEN, IDENT_OPEN, BRACKET_OPEN, COMMENT_OPEN];

static BLANK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\s|\x{E004}\d+\x{E001})*$").expect("valid regex"));

/// Kind of a masked fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Literal,
    QuotedIdent,
    BracketIdent,
    Comment
}

impl FragmentKind {
    fn open(self) -> char {
        match self {
            Self::Literal => LITERAL_OPEN,
            Self::QuotedIdent => IDENT_OPEN,
            Self::BracketIdent => BRACKET_OPEN,
            Self::Comment => COMMENT_OPEN
        }
    }
}

/// Original text lifted out of the SQL during masking.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub text: String
}

impl Fragment {
    /// `[a]]b]` as the double-quoted identifier `"a]b"`.
    fn quoted(&self) -> String {
        let inner = self
            .text
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .unwrap_or(&self.text);
        format!("\"{}\"", inner.replace("]]", "]").replace('"', "\"\""))
    }
}

/// SQL text with literals and comments replaced by placeholders.
#[derive(Debug, Clone, Default)]
pub struct Masked {
    text:      String,
    fragments: Vec<Fragment>
}

impl Masked {
    /// Mask `sql`. Unterminated literals and comments run to end of input.
    pub fn new(sql: &str) -> Self {
        let bytes = sql.as_bytes();
        let mut text = String::with_capacity(sql.len());
        let mut fragments = Vec::new();
        let mut copied = 0;
        let mut i = 0;

        while i < bytes.len() {
            let (kind, end) = match bytes[i] {
                b'\'' => (FragmentKind::Literal, quoted_end(bytes, i, b'\'')),
                b'"' => (FragmentKind::QuotedIdent, quoted_end(bytes, i, b'"')),
                b'-' if bytes.get(i + 1) == Some(&b'-') => (FragmentKind::Comment, line_end(bytes, i)),
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    (FragmentKind::Comment, block_end(bytes, i))
                }
                b'[' => match bracket_ident_end(bytes, i) {
                    Some(end) => (FragmentKind::BracketIdent, end),
                    None => {
                        i += 1;
                        continue;
                    }
                },
                _ => {
                    i += 1;
                    continue;
                }
            };

            text.push_str(&sql[copied..i]);
            text.push(kind.open());
            text.push_str(&fragments.len().to_string());
            text.push(PLACEHOLDER_CLOSE);
            fragments.push(Fragment {
                kind,
                text: sql[i..end].to_string()
            });
            i = end;
            copied = end;
        }
        text.push_str(&sql[copied..]);

        Self {
            text,
            fragments
        }
    }

    /// The masked text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of fragments lifted out.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Look up a fragment by placeholder index.
    pub fn fragment(&self, index: usize) -> Option<&Fragment> {
        self.fragments.get(index)
    }

    /// Put the original fragments back into `masked`.
    ///
    /// A bracketed identifier reopened with [`IDENT_OPEN`] comes back
    /// double-quoted. Placeholders that a rule mangled or that point at an
    /// unknown index are copied through verbatim.
    pub fn restore(&self, masked: &str) -> String {
        let mut out = String::with_capacity(masked.len() + self.fragments.len() * 8);
        let mut rest = masked;

        while let Some(open) = rest.find(OPENERS) {
            out.push_str(&rest[..open]);
            let after_open = &rest[open..];
            let opener = after_open.chars().next();
            let open_len = opener.map_or(1, char::len_utf8);
            let body = &after_open[open_len..];

            let restored = body.find(PLACEHOLDER_CLOSE).and_then(|close| {
                let index: usize = body[..close].parse().ok()?;
                let fragment = self.fragments.get(index)?;
                Some((fragment, open_len + close + PLACEHOLDER_CLOSE.len_utf8()))
            });

            match restored {
                Some((fragment, consumed)) => {
                    if fragment.kind == FragmentKind::BracketIdent && opener == Some(IDENT_OPEN) {
                        out.push_str(&fragment.quoted());
                    } else {
                        out.push_str(&fragment.text);
                    }
                    rest = &after_open[consumed..];
                }
                None => {
                    out.push_str(&after_open[..open_len]);
                    rest = body;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// True when `masked` holds nothing but whitespace and comments.
pub fn is_blank(masked: &str) -> bool {
    BLANK_REGEX.is_match(masked)
}

/// Start of a comment placeholder that ends `masked`, if any.
pub fn trailing_comment(masked: &str) -> Option<usize> {
    if !masked.ends_with(PLACEHOLDER_CLOSE) {
        return None;
    }
    let open = masked.rfind(OPENERS)?;
    masked[open..].starts_with(COMMENT_OPEN).then_some(open)
}

/// Length of `masked` without trailing whitespace and comment placeholders.
pub fn content_end(masked: &str) -> usize {
    let mut end = masked.trim_end().len();
    while let Some(open) = trailing_comment(&masked[..end]) {
        end = masked[..open].trim_end().len();
    }
    end
}

fn quoted_end(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

fn line_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| start + p)
}

// T-SQL block comments nest.
fn block_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1
        }
    }
    bytes.len()
}

/// End of the `[name]` identifier opening at `start`, or `None` when the
/// bracket is unclosed on its line or belongs to an array expression.
fn bracket_ident_end(bytes: &[u8], start: usize) -> Option<usize> {
    let subscript = start
        .checked_sub(1)
        .map(|p| bytes[p])
        .is_some_and(|b| b.is_ascii_alphanumeric() || b >= 0x80 || b"_$]):'\"".contains(&b));
    if subscript {
        return None;
    }

    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b']' if bytes.get(i + 1) == Some(&b']') => i += 2,
            b']' => break,
            b'\n' => return None,
            _ => i += 1
        }
    }
    if i >= bytes.len() {
        return None;
    }

    let inner = &bytes[start + 1..i];
    let array_literal = inner.contains(&b',')
        || inner.first().is_some_and(|b| matches!(b, b'\'' | b'"'))
        || inner
            .iter()
            .all(|b| b.is_ascii_digit() || b.is_ascii_whitespace() || matches!(b, b'.' | b'-' | b'+'));
    (!array_literal).then_some(i + 1)
}
