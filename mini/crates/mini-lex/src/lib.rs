//! Hand-written streaming tokenizer for the `mini` expression language.
//!
//! # Context-sensitive brackets
//!
//! `(` and `[` do not have a single fixed token kind. Whether they open a
//! *call*/*index* or a *grouping*/*list-literal* depends on the character
//! that immediately precedes them in the raw source, including whitespace:
//! if that character could plausibly end an expression (alphanumeric, `_`,
//! `]`, `}`, `)`) the bracket is classified as `Call`/`Index`; otherwise
//! it's a plain `LParen`/`LBracket`. Pushing this decision into the lexer
//! means the parser never has to look behind itself to tell `f (x)` (a
//! tuple literal bound to nothing, since there's a space) apart from
//! `f(x)` (a call) — the lexer has already told it which one it is.
//!
//! # Lookahead
//!
//! `peek_token`/`next_token` share a single one-token cache. `reset_peek`
//! discards it. Internally, `Cursor` supports arbitrary character
//! lookahead (needed to tell `..` apart from a decimal point one character
//! at a time), but token-level lookahead is always exactly one token.

mod cursor;

use cursor::Cursor;
use mini_util::{Span, Symbol};
use thiserror::Error;

/// Reserved words that are tokenized but (per the language's current
/// scope) not implemented by the parser/evaluator; `mini-par` rejects
/// them at primary-expression position with a named diagnostic instead of
/// silently treating them as identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Else,
    Match,
    Class,
    Enum,
    While,
    For,
    Break,
    Continue,
    Return,
}

impl Keyword {
    fn from_str(s: &str) -> Option<Keyword> {
        Some(match s {
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "match" => Keyword::Match,
            "class" => Keyword::Class,
            "enum" => Keyword::Enum,
            "while" => Keyword::While,
            "for" => Keyword::For,
            "break" => Keyword::Break,
            "continue" => Keyword::Continue,
            "return" => Keyword::Return,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::Match => "match",
            Keyword::Class => "class",
            Keyword::Enum => "enum",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Return => "return",
        }
    }
}

/// A lexical token kind. Structural operators (`Call`, `Index`, `Dot`,
/// `Assign`, `Range`, the compound-assigns) are tokens like any other;
/// their special evaluation semantics live in `mini-eval`, not here.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(Symbol),
    Number(f64),
    Str(String),
    Bool(bool),
    Keyword(Keyword),
    /// Only surfaced when the lexer is asked for it via `allow_comment`.
    Comment(String),

    // Word-form and symbol-form logical operators collapse onto the same
    // token kind: `&&` and `and` both lex to `And`, etc.
    And,
    Or,
    Not,
    Is,
    In,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    Lt,
    Gt,
    LtEq,
    GtEq,
    NotEq,
    EqEq,

    Assign,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    CaretEq,

    RightArrow,
    HashBrace,
    Range,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Call,
    Index,

    Comma,
    Colon,
    Semicolon,
    Dot,

    Ampersand,
    Pipe,
    BitwiseNot,
    QuestionMark,

    Eof,
}

impl TokenKind {
    pub fn is_eof(&self) -> bool {
        matches!(self, TokenKind::Eof)
    }

    /// Human-readable name used in parser diagnostics ("expected X but got
    /// IDENTIFIER").
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Identifier(_) => "IDENTIFIER",
            TokenKind::Number(_) => "NUMBER",
            TokenKind::Str(_) => "STRING",
            TokenKind::Bool(_) => "BOOL",
            TokenKind::Keyword(_) => "KEYWORD",
            TokenKind::Comment(_) => "COMMENT",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Not => "!",
            TokenKind::Is => "is",
            TokenKind::In => "in",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::NotEq => "!=",
            TokenKind::EqEq => "==",
            TokenKind::Assign => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::CaretEq => "^=",
            TokenKind::RightArrow => "=>",
            TokenKind::HashBrace => "#{",
            TokenKind::Range => "..",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Call => "CALL",
            TokenKind::Index => "INDEX",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Ampersand => "&",
            TokenKind::Pipe => "|",
            TokenKind::BitwiseNot => "~",
            TokenKind::QuestionMark => "?",
            TokenKind::Eof => "EOF",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LexError {
    #[error("Syntax Error at {span}: unterminated string")]
    UnterminatedString { span: Span },

    #[error("Syntax Error at {span}: invalid escape sequence '\\{escape}'")]
    InvalidEscape { span: Span, escape: char },

    #[error("Syntax Error at {span}: unexpected character '{ch}'")]
    UnexpectedChar { span: Span, ch: char },
}

pub type LexResult<T> = Result<T, LexError>;

/// Streaming tokenizer with one-token lookahead.
///
/// `debug` (when turned on by the host) traces each token as it's
/// produced; `mini-cli` wires this to its `-d`/`--debug` flag via
/// `tracing` rather than the source's global mutable flag.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    peeked: Option<Token>,
    prev_comment: Option<Token>,
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Characters that can plausibly end an expression, making a following
/// `(`/`[` a call/index rather than a grouping/list literal.
fn ends_expression(c: Option<char>) -> bool {
    matches!(c, Some(c) if c.is_alphanumeric() || matches!(c, '_' | ']' | '}' | ')'))
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            peeked: None,
            prev_comment: None,
        }
    }

    fn span_from(&self, start_pos: u32, start_line: u32, start_col: u32) -> Span {
        Span::new(start_pos, self.cursor.pos(), start_line, start_col)
    }

    /// Whether the lexer has no more significant tokens to produce.
    pub fn is_done(&mut self) -> LexResult<bool> {
        Ok(self.peek_token(false)?.kind.is_eof())
    }

    /// Discard the cached peeked token, if any.
    pub fn reset_peek(&mut self) {
        self.peeked = None;
    }

    /// The last comment absorbed while scanning for a significant token
    /// (i.e. the most recent comment read with `allow_comment = false`).
    pub fn prev_comment(&self) -> Option<&Token> {
        self.prev_comment.as_ref()
    }

    pub fn peek_token(&mut self, allow_comment: bool) -> LexResult<Token> {
        if let Some(t) = &self.peeked {
            return Ok(t.clone());
        }
        let t = self.next_token(allow_comment)?;
        self.peeked = Some(t.clone());
        Ok(t)
    }

    pub fn next_token(&mut self, allow_comment: bool) -> LexResult<Token> {
        if let Some(t) = self.peeked.take() {
            return Ok(t);
        }
        loop {
            let t = self.read_token()?;
            if !allow_comment {
                if let TokenKind::Comment(_) = &t.kind {
                    self.prev_comment = Some(t);
                    continue;
                }
            }
            return Ok(t);
        }
    }

    fn read_token(&mut self) -> LexResult<Token> {
        loop {
            let pc = self.cursor.prev_char();
            let start_pos = self.cursor.pos();
            let start_line = self.cursor.line();
            let start_col = self.cursor.column();

            let c = match self.cursor.advance() {
                Some(c) => c,
                None => return Ok(Token::new(TokenKind::Eof, self.span_from(start_pos, start_line, start_col))),
            };

            if matches!(c, ' ' | '\t' | '\n' | '\r') {
                continue;
            }

            let span_here = |lexer: &Self| lexer.span_from(start_pos, start_line, start_col);

            if c == '"' || c == '\'' {
                return self.read_string(c, start_pos, start_line, start_col);
            }
            if c.is_ascii_digit() {
                return Ok(self.read_number(c, start_pos, start_line, start_col));
            }
            if is_identifier_start(c) {
                return Ok(self.read_identifier(c, start_pos, start_line, start_col));
            }

            let nc = self.cursor.peek(0);

            if c == '/' && nc == '/' {
                self.cursor.advance();
                let mut s = String::new();
                while self.cursor.peek(0) != '\0' && self.cursor.peek(0) != '\n' {
                    s.push(self.cursor.advance().unwrap());
                }
                return Ok(Token::new(TokenKind::Comment(s), span_here(self)));
            }
            if c == '/' && nc == '*' {
                self.cursor.advance();
                let mut s = String::new();
                loop {
                    match self.cursor.advance() {
                        None => break,
                        Some('*') if self.cursor.peek(0) == '/' => {
                            self.cursor.advance();
                            break;
                        }
                        Some(ch) => s.push(ch),
                    }
                }
                return Ok(Token::new(TokenKind::Comment(s), span_here(self)));
            }

            macro_rules! two_char {
                ($next:expr, $kind:expr) => {
                    if nc == $next {
                        self.cursor.advance();
                        return Ok(Token::new($kind, span_here(self)));
                    }
                };
            }

            match c {
                '+' => two_char!('=', TokenKind::PlusEq),
                '-' => two_char!('=', TokenKind::MinusEq),
                '*' => two_char!('=', TokenKind::StarEq),
                '/' => two_char!('=', TokenKind::SlashEq),
                '%' => two_char!('=', TokenKind::PercentEq),
                '^' => two_char!('=', TokenKind::CaretEq),
                '<' => two_char!('=', TokenKind::LtEq),
                '>' => two_char!('=', TokenKind::GtEq),
                '!' => two_char!('=', TokenKind::NotEq),
                _ => {}
            }
            if c == '=' && nc == '=' {
                self.cursor.advance();
                return Ok(Token::new(TokenKind::EqEq, span_here(self)));
            }
            if c == '=' && nc == '>' {
                self.cursor.advance();
                return Ok(Token::new(TokenKind::RightArrow, span_here(self)));
            }
            if c == '&' && nc == '&' {
                self.cursor.advance();
                return Ok(Token::new(TokenKind::And, span_here(self)));
            }
            if c == '|' && nc == '|' {
                self.cursor.advance();
                return Ok(Token::new(TokenKind::Or, span_here(self)));
            }
            if c == '#' && nc == '{' {
                self.cursor.advance();
                return Ok(Token::new(TokenKind::HashBrace, span_here(self)));
            }
            if c == '.' && nc == '.' {
                self.cursor.advance();
                return Ok(Token::new(TokenKind::Range, span_here(self)));
            }

            let kind = match c {
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '%' => TokenKind::Percent,
                '^' => TokenKind::Caret,
                '<' => TokenKind::Lt,
                '>' => TokenKind::Gt,
                '=' => TokenKind::Assign,
                '!' => TokenKind::Not,
                '&' => TokenKind::Ampersand,
                '|' => TokenKind::Pipe,
                '~' => TokenKind::BitwiseNot,
                '?' => TokenKind::QuestionMark,
                '.' => TokenKind::Dot,
                ',' => TokenKind::Comma,
                ':' => TokenKind::Colon,
                ';' => TokenKind::Semicolon,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                '(' => {
                    if ends_expression(pc) {
                        TokenKind::Call
                    } else {
                        TokenKind::LParen
                    }
                }
                ')' => TokenKind::RParen,
                '[' => {
                    if ends_expression(pc) {
                        TokenKind::Index
                    } else {
                        TokenKind::LBracket
                    }
                }
                ']' => TokenKind::RBracket,
                other => {
                    return Err(LexError::UnexpectedChar {
                        span: span_here(self),
                        ch: other,
                    })
                }
            };
            return Ok(Token::new(kind, span_here(self)));
        }
    }

    fn read_string(&mut self, quote: char, start_pos: u32, start_line: u32, start_col: u32) -> LexResult<Token> {
        let mut s = String::new();
        loop {
            let c = self.cursor.advance().ok_or(LexError::UnterminatedString {
                span: self.span_from(start_pos, start_line, start_col),
            })?;
            if c == quote {
                return Ok(Token::new(TokenKind::Str(s), self.span_from(start_pos, start_line, start_col)));
            } else if c == '\\' {
                let esc = self.cursor.advance().ok_or(LexError::UnterminatedString {
                    span: self.span_from(start_pos, start_line, start_col),
                })?;
                match esc {
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    'r' => s.push('\r'),
                    '\\' => s.push('\\'),
                    '"' => s.push('"'),
                    '\'' => s.push('\''),
                    other => {
                        return Err(LexError::InvalidEscape {
                            span: self.span_from(start_pos, start_line, start_col),
                            escape: other,
                        })
                    }
                }
            } else {
                s.push(c);
            }
        }
    }

    fn read_identifier(&mut self, first: char, start_pos: u32, start_line: u32, start_col: u32) -> Token {
        let mut s = String::new();
        s.push(first);
        while is_identifier_continue(self.cursor.peek(0)) {
            s.push(self.cursor.advance().unwrap());
        }
        let span = self.span_from(start_pos, start_line, start_col);
        match s.as_str() {
            "true" => Token::new(TokenKind::Bool(true), span),
            "false" => Token::new(TokenKind::Bool(false), span),
            "and" => Token::new(TokenKind::And, span),
            "or" => Token::new(TokenKind::Or, span),
            "not" => Token::new(TokenKind::Not, span),
            "is" => Token::new(TokenKind::Is, span),
            "in" => Token::new(TokenKind::In, span),
            _ => match Keyword::from_str(&s) {
                Some(kw) => Token::new(TokenKind::Keyword(kw), span),
                None => Token::new(TokenKind::Identifier(Symbol::intern(&s)), span),
            },
        }
    }

    fn read_number(&mut self, first: char, start_pos: u32, start_line: u32, start_col: u32) -> Token {
        let mut s = String::new();
        s.push(first);
        let mut has_decimal_point = false;
        loop {
            let nc = self.cursor.peek(0);
            let nnc = self.cursor.peek(1);
            if !(nc.is_ascii_digit() || nc == '.') || (nc == '.' && nnc == '.') {
                break;
            }
            if nc == '.' {
                if has_decimal_point {
                    break;
                }
                has_decimal_point = true;
            }
            s.push(self.cursor.advance().unwrap());
        }
        let value: f64 = s.parse().unwrap_or(f64::NAN);
        Token::new(TokenKind::Number(value), self.span_from(start_pos, start_line, start_col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lex = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let t = lex.next_token(false).expect("lex error");
            if t.kind.is_eof() {
                break;
            }
            out.push(t.kind);
        }
        out
    }

    #[test]
    fn numbers_and_identifiers() {
        assert_eq!(
            kinds("x1 42 3.14"),
            vec![
                TokenKind::Identifier(Symbol::intern("x1")),
                TokenKind::Number(42.0),
                TokenKind::Number(3.14),
            ]
        );
    }

    #[test]
    fn range_is_not_a_decimal_point() {
        assert_eq!(kinds("1..4"), vec![TokenKind::Number(1.0), TokenKind::Range, TokenKind::Number(4.0)]);
    }

    #[test]
    fn call_vs_grouping_is_context_sensitive() {
        assert_eq!(kinds("f(x)"), vec![TokenKind::Identifier(Symbol::intern("f")), TokenKind::Call, TokenKind::Identifier(Symbol::intern("x")), TokenKind::RParen]);
        // A space before `(` means the previous raw character is not
        // expression-ending, so this is a grouping paren, not a call.
        assert_eq!(kinds("f (x)"), vec![TokenKind::Identifier(Symbol::intern("f")), TokenKind::LParen, TokenKind::Identifier(Symbol::intern("x")), TokenKind::RParen]);
    }

    #[test]
    fn index_vs_list_literal_is_context_sensitive() {
        assert_eq!(kinds("xs[0]"), vec![TokenKind::Identifier(Symbol::intern("xs")), TokenKind::Index, TokenKind::Number(0.0), TokenKind::RBracket]);
        assert_eq!(kinds("[0]"), vec![TokenKind::LBracket, TokenKind::Number(0.0), TokenKind::RBracket]);
    }

    #[test]
    fn keywords_and_word_operators() {
        assert_eq!(kinds("if a and not b"), vec![
            TokenKind::Keyword(Keyword::If),
            TokenKind::Identifier(Symbol::intern("a")),
            TokenKind::And,
            TokenKind::Not,
            TokenKind::Identifier(Symbol::intern("b")),
        ]);
    }

    #[test]
    fn string_escapes() {
        assert_eq!(kinds("\"a\\nb\""), vec![TokenKind::Str("a\nb".to_string())]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut lex = Lexer::new("\"abc");
        assert!(matches!(lex.next_token(false), Err(LexError::UnterminatedString { .. })));
    }

    #[test]
    fn invalid_escape_is_an_error() {
        let mut lex = Lexer::new("\"a\\qb\"");
        assert!(matches!(lex.next_token(false), Err(LexError::InvalidEscape { .. })));
    }

    #[test]
    fn comments_are_absorbed_by_default() {
        assert_eq!(kinds("1 // comment\n2"), vec![TokenKind::Number(1.0), TokenKind::Number(2.0)]);
        assert_eq!(kinds("1 /* block\ncomment */ 2"), vec![TokenKind::Number(1.0), TokenKind::Number(2.0)]);
    }

    #[test]
    fn comments_surface_with_allow_comment() {
        let mut lex = Lexer::new("// hi\n1");
        let t = lex.next_token(true).unwrap();
        assert_eq!(t.kind, TokenKind::Comment(" hi".to_string()));
    }

    #[test]
    fn prev_comment_is_remembered() {
        let mut lex = Lexer::new("// hi\n1");
        lex.next_token(false).unwrap();
        assert_eq!(lex.prev_comment().unwrap().kind, TokenKind::Comment(" hi".to_string()));
    }

    #[test]
    fn peek_does_not_advance() {
        let mut lex = Lexer::new("1 2");
        let p = lex.peek_token(false).unwrap();
        assert_eq!(p.kind, TokenKind::Number(1.0));
        let n = lex.next_token(false).unwrap();
        assert_eq!(n.kind, TokenKind::Number(1.0));
        assert_eq!(lex.next_token(false).unwrap().kind, TokenKind::Number(2.0));
    }

    #[test]
    fn compound_assign_operators() {
        assert_eq!(
            kinds("+= -= *= /= %= ^="),
            vec![
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::StarEq,
                TokenKind::SlashEq,
                TokenKind::PercentEq,
                TokenKind::CaretEq,
            ]
        );
    }

    #[test]
    fn eof_is_returned_indefinitely() {
        let mut lex = Lexer::new("");
        assert!(lex.next_token(false).unwrap().kind.is_eof());
        assert!(lex.next_token(false).unwrap().kind.is_eof());
    }

    #[test]
    fn unexpected_character_is_an_error() {
        let mut lex = Lexer::new("@");
        assert!(matches!(lex.next_token(false), Err(LexError::UnexpectedChar { .. })));
    }

    // ------------------------------------------------------------------
    // Property-based tests over arbitrary inputs
    // ------------------------------------------------------------------

    #[test]
    fn property_arbitrary_identifier_strings() {
        use proptest::prelude::*;

        proptest!(|(input in "[a-zA-Z_][a-zA-Z0-9_]{0,40}")| {
            let tokens = kinds(&input);
            prop_assert_eq!(tokens.len(), 1);
            match &tokens[0] {
                TokenKind::Identifier(_) | TokenKind::Bool(_) | TokenKind::Keyword(_)
                | TokenKind::And | TokenKind::Or | TokenKind::Not | TokenKind::Is | TokenKind::In => {}
                other => prop_assert!(false, "unexpected token kind {other:?} for identifier-shaped input"),
            }
        });
    }

    #[test]
    fn property_arbitrary_decimal_number_strings() {
        use proptest::prelude::*;

        proptest!(|(input in "[0-9]{1,15}")| {
            let tokens = kinds(&input);
            prop_assert_eq!(tokens.len(), 1);
            prop_assert!(matches!(tokens[0], TokenKind::Number(_)));
        });
    }

    #[test]
    fn property_arbitrary_string_literals_lex_to_a_single_string_token() {
        use proptest::prelude::*;

        proptest!(|(input in "[a-zA-Z0-9 ]{0,40}")| {
            let source = format!("\"{input}\"");
            let tokens = kinds(&source);
            prop_assert_eq!(tokens.len(), 1);
            match &tokens[0] {
                TokenKind::Str(s) => prop_assert_eq!(s, &input),
                other => prop_assert!(false, "expected a string token, got {other:?}"),
            }
        });
    }

    #[test]
    fn property_whitespace_between_identifiers_never_merges_them() {
        use proptest::prelude::*;

        proptest!(|(a in "[a-zA-Z_][a-zA-Z0-9_]{0,10}", b in "[a-zA-Z_][a-zA-Z0-9_]{0,10}")| {
            let src = format!("{a} {b}");
            let tokens = kinds(&src);
            prop_assert_eq!(tokens.len(), 2);
        });
    }
}
