//! Line-tracked text cursor for directive parsing.
//!
//! Directive remainders are whitespace-normalized to a single line before
//! parsing, so the cursor mostly tracks the stanza's starting line for
//! diagnostics; the consuming API keeps position bookkeeping in one place
//! instead of scattering string arithmetic across the parsers.

/// A consuming view over directive text.
///
/// All `take_*` methods advance the cursor past what they return.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over `text`, reporting positions relative to the
    /// 1-based input line `line`.
    pub fn new(text: &'a str, line: usize) -> Self {
        Self { rest: text, line }
    }

    /// The 1-based input line of the current position.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Unconsumed text.
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Consume `n` bytes. `n` must lie on a char boundary.
    pub fn advance(&mut self, n: usize) {
        let (eaten, rest) = self.rest.split_at(n);
        self.line += eaten.matches('\n').count();
        self.rest = rest;
    }

    /// Consume leading whitespace.
    pub fn skip_ws(&mut self) {
        let trimmed = self.rest.trim_start();
        let n = self.rest.len() - trimmed.len();
        self.advance(n);
    }

    /// Consume `c` if it is the next character.
    pub fn eat(&mut self, c: char) -> bool {
        if self.rest.starts_with(c) {
            self.advance(c.len_utf8());
            true
        } else {
            false
        }
    }

    /// Take a type token: everything up to the first `,`, space, tab or
    /// newline (or the whole rest). Does not consume the delimiter.
    pub fn take_type_token(&mut self) -> &'a str {
        let end = self
            .rest
            .find([',', ' ', '\t', '\n'])
            .unwrap_or(self.rest.len());
        let (tok, _) = self.rest.split_at(end);
        self.advance(end);
        tok
    }

    /// Take everything up to and including `c`; returns the text before `c`,
    /// or `None` (cursor untouched) when `c` does not occur.
    pub fn take_until(&mut self, c: char) -> Option<&'a str> {
        let end = self.rest.find(c)?;
        let (head, _) = self.rest.split_at(end);
        self.advance(end + c.len_utf8());
        Some(head)
    }

    /// Take everything up to (not including) the next `,`, or the whole rest.
    pub fn take_to_comma(&mut self) -> &'a str {
        let end = self.rest.find(',').unwrap_or(self.rest.len());
        let (head, _) = self.rest.split_at(end);
        self.advance(end);
        head
    }
}
