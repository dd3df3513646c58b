//! Text scanning and substitution.
//!
//! Placeholders are flat `{token}` spans where `token` is a non-empty run of
//! characters containing neither `{` nor `}`. Text is scanned once, left to
//! right:
//!
//! - each token is handed to a lookup function exactly as written,
//! - a token with a value is replaced by it,
//! - a token without a value stays in the output verbatim, braces included,
//! - substituted values are never scanned again, so a value of `"{b}"`
//!   stays `"{b}"`,
//! - an unmatched `{` (or an empty `{}`) is plain text.
//!
//! Input that has nothing substituted is returned borrowed and unchanged.

use std::borrow::Cow;
use std::ops::Range;

/// One `{token}` occurrence found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch<'a> {
    /// Byte offset of the opening `{`.
    pub start: usize,
    /// Byte offset just past the closing `}`.
    pub end: usize,
    /// Text between the braces, case preserved.
    pub token: &'a str,
}

impl TokenMatch<'_> {
    /// Byte range of the whole `{token}` span.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Iterator over the `{token}` spans of a text, left to right.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = TokenMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let open = self.pos + self.input[self.pos..].find('{')?;
            let body = &self.input[open + 1..];
            let Some(offset) = body.find(['{', '}']) else {
                self.pos = self.input.len();
                return None;
            };
            let delim = open + 1 + offset;
            if self.input.as_bytes()[delim] == b'{' {
                // Restart at the inner brace; the outer one is literal.
                self.pos = delim;
                continue;
            }
            self.pos = delim + 1;
            if offset == 0 {
                continue;
            }
            return Some(TokenMatch {
                start: open,
                end: delim + 1,
                token: &body[..offset],
            });
        }
    }
}

/// Returns an iterator over every `{token}` span in `input`.
pub fn tokens(input: &str) -> Tokens<'_> {
    Tokens { input, pos: 0 }
}

/// Substitutes every token for which `resolve` returns a value.
///
/// `resolve` receives the token text without braces. Tokens it returns
/// `None` for are left as they were.
pub fn replace_with<'a, F>(input: &'a str, mut resolve: F) -> Cow<'a, str>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out: Option<String> = None;
    let mut last = 0;

    for found in tokens(input) {
        if let Some(value) = resolve(found.token) {
            let buf = out.get_or_insert_with(|| String::with_capacity(input.len()));
            buf.push_str(&input[last..found.start]);
            buf.push_str(&value);
            last = found.end;
        }
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&input[last..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(input),
    }
}
