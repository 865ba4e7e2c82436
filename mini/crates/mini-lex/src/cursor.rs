//! Character-queue cursor backing the lexer.
//!
//! The source grammar needs unbounded character lookahead in exactly two
//! spots: deciding `..` is the range operator rather than a decimal point
//! (`__read_number`'s `nc`/`nnc` two-character peek) and, in principle,
//! any future multi-character operator. Rather than assume a fixed-width
//! lookahead window, characters are pulled from the source on demand into
//! a small `VecDeque` queue and indexed by offset (`queue_request` in the
//! original), so `peek(n)` for arbitrary `n` is just "fill the queue to at
//! least `n + 1` entries, then index it".
use std::collections::VecDeque;
use std::str::Chars;

/// Pulls characters from a `&str` on demand into a lookahead queue,
/// tracking byte offset and 1-based line/column as it goes.
pub struct Cursor<'a> {
    chars: Chars<'a>,
    queue: VecDeque<char>,
    pos: u32,
    line: u32,
    column: u32,
    /// The most recently consumed character, including whitespace. Used by
    /// the lexer to decide whether `(`/`[` terminates a call/index
    /// position or starts a grouping/list literal — see
    /// `Lexer::classify_paren`.
    prev_char: Option<char>,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars(),
            queue: VecDeque::new(),
            pos: 0,
            line: 1,
            column: 1,
            prev_char: None,
        }
    }

    fn queue_request(&mut self, len: usize) {
        while self.queue.len() < len {
            match self.chars.next() {
                Some(c) => self.queue.push_back(c),
                None => break,
            }
        }
    }

    /// Peek the character `offset` positions ahead without consuming it.
    /// Returns `'\0'` past the end of the source, matching the sentinel
    /// used throughout the original tokenizer.
    pub fn peek(&mut self, offset: usize) -> char {
        self.queue_request(offset + 1);
        self.queue.get(offset).copied().unwrap_or('\0')
    }

    /// Consume and return the next character, advancing position and
    /// line/column bookkeeping. Tabs advance the column by 4; newlines
    /// reset the column and advance the line.
    pub fn advance(&mut self) -> Option<char> {
        self.queue_request(1);
        let c = self.queue.pop_front()?;
        self.pos += c.len_utf8() as u32;
        match c {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            '\t' => self.column += 4,
            _ => self.column += 1,
        }
        self.prev_char = Some(c);
        Some(c)
    }

    pub fn prev_char(&self) -> Option<char> {
        self.prev_char
    }

    pub fn pos(&self) -> u32 {
        self.pos
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}
