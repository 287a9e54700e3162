// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Delve Script source code.
//!
//! This module converts source text into a stream of [`Token`]s. The lexer
//! is hand-written, character by character with one character of look-ahead.
//!
//! # Design Principles
//!
//! - **Error recovery**: never panic on malformed input; an unrecognizable
//!   character becomes a terminal [`TokenKind::Illegal`] token
//! - **Precise locations**: every token carries its byte span and its
//!   1-based line/column position
//!
//! Two layers are provided: [`Scanner`] borrows the source text and yields
//! tokens one at a time, while [`Lexer`] owns the scanned token list and can
//! be reused across inputs.
//!
//! # Example
//!
//! ```
//! use delve_core::source_analysis::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new();
//! let tokens = lexer.tokenize("x + 1;");
//! assert_eq!(tokens.len(), 5); // x, +, 1, ;, <eof>
//! assert!(tokens.last().unwrap().kind().is_eof());
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::{Position, Span, Token, TokenKind};

/// Returns `true` for characters skipped between tokens: space, tab, CR,
/// LF, vertical tab, and form feed.
const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{000B}' | '\u{000C}')
}

/// Returns `true` for characters that may start an identifier.
const fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns `true` for characters that may continue an identifier.
const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Maps an identifier to its keyword kind, or `Identifier` if it is not a
/// language keyword.
fn keyword_or_identifier(text: &str) -> TokenKind {
    match text {
        "function" => TokenKind::Function,
        "let" => TokenKind::Let,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "return" => TokenKind::Return,
        _ => TokenKind::Identifier(EcoString::from(text)),
    }
}

/// A scanner that tokenizes Delve Script source code.
///
/// The scanner produces tokens with their source locations. It implements
/// [`Iterator`]; iteration ends before the `Eof` token, and stops after an
/// `Illegal` token is produced.
pub struct Scanner<'src> {
    /// The source text being scanned.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Byte position of the next unconsumed character.
    position: usize,
    /// 1-based line of the next unconsumed character.
    line: u32,
    /// 1-based column of the next unconsumed character.
    column: u32,
    /// Set once an `Illegal` token has been produced.
    halted: bool,
}

impl std::fmt::Debug for Scanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("position", &self.position)
            .field("line", &self.line)
            .field("column", &self.column)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

impl<'src> Scanner<'src> {
    /// Creates a new scanner for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
            halted: false,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Consumes the next character and returns it, updating the line and
    /// column counters.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Skips whitespace between tokens. Newlines bump the line counter.
    fn skip_whitespace(&mut self) {
        self.advance_while(is_whitespace);
    }

    /// Lexes the next token. At the end of input this returns an `Eof`
    /// token, and continues to do so on subsequent calls.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.current_position();
        let position = Position::new(self.line, self.column);

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some(c) => self.lex_token_kind(c, start),
        };

        Token::new(kind, self.span_from(start), position)
    }

    /// Lexes a token kind based on the first character.
    fn lex_token_kind(&mut self, c: char, start: u32) -> TokenKind {
        match c {
            // Identifiers and keywords
            c if is_identifier_start(c) => self.lex_identifier_or_keyword(),

            // Integers
            '0'..='9' => self.lex_integer(),

            // Assignment or equality
            '=' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }

            // Negation or inequality
            '!' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    TokenKind::NotEqual
                } else {
                    TokenKind::Negate
                }
            }

            // Single-character tokens
            '+' => {
                self.advance();
                TokenKind::Plus
            }
            '-' => {
                self.advance();
                TokenKind::Minus
            }
            '*' => {
                self.advance();
                TokenKind::Multiply
            }
            '/' => {
                self.advance();
                TokenKind::Divide
            }
            '<' => {
                self.advance();
                TokenKind::LessThan
            }
            '>' => {
                self.advance();
                TokenKind::GreaterThan
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            ';' => {
                self.advance();
                TokenKind::Semicolon
            }
            '(' => {
                self.advance();
                TokenKind::LParen
            }
            ')' => {
                self.advance();
                TokenKind::RParen
            }
            '{' => {
                self.advance();
                TokenKind::LBrace
            }
            '}' => {
                self.advance();
                TokenKind::RBrace
            }

            // Unknown character - terminal error token
            _ => {
                self.advance();
                let text = self.text_for(self.span_from(start));
                TokenKind::Illegal(EcoString::from(text))
            }
        }
    }

    /// Lexes an identifier or keyword.
    fn lex_identifier_or_keyword(&mut self) -> TokenKind {
        let start = self.current_position();
        self.advance_while(is_identifier_char);
        keyword_or_identifier(self.text_for(self.span_from(start)))
    }

    /// Lexes an integer literal.
    ///
    /// The digit run keeps consuming identifier characters, so `123abc` is a
    /// single `Integer` token whose conversion fails at parse time.
    fn lex_integer(&mut self) -> TokenKind {
        let start = self.current_position();
        self.advance_while(is_identifier_char);
        TokenKind::Integer(EcoString::from(self.text_for(self.span_from(start))))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let token = self.next_token();
        if token.kind().is_eof() {
            return None;
        }
        if token.kind().is_illegal() {
            self.halted = true;
        }
        Some(token)
    }
}

/// A reusable lexer that owns the tokens it produces.
///
/// [`Lexer::tokenize`] scans a whole input and stores the resulting token
/// list, terminated by `Eof` (or by `Illegal`, in which case no `Eof` is
/// appended and scanning stops). The lexer may be reused: each `tokenize`
/// call starts from a clean state, and [`Lexer::reset`] restores the initial
/// state explicitly.
#[derive(Debug, Default)]
pub struct Lexer {
    tokens: Vec<Token>,
}

impl Lexer {
    /// Creates a new lexer with no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes the given source text, replacing any previously scanned
    /// tokens, and returns the token list.
    ///
    /// The returned slice is never empty: it ends with an `Eof` token, or
    /// with an `Illegal` token if an unrecognizable character was
    /// encountered.
    pub fn tokenize(&mut self, source: &str) -> &[Token] {
        self.reset();

        let mut scanner = Scanner::new(source);
        loop {
            let token = scanner.next_token();
            let done = token.kind().is_eof() || token.kind().is_illegal();
            self.tokens.push(token);
            if done {
                break;
            }
        }

        &self.tokens
    }

    /// Restores the lexer to its initial state, releasing the scanned
    /// tokens.
    pub fn reset(&mut self) {
        self.tokens.clear();
    }

    /// Returns the scanned tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the number of scanned tokens.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Returns the token at the given index, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }
}

/// Convenience function to lex source into a vector of tokens (excluding
/// `Eof`).
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Scanner::new(source).collect()
}

/// Convenience function to tokenize source into a terminated token vector:
/// the last token is `Eof`, or `Illegal` on an unrecognizable character.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new();
    lexer.tokenize(source);
    lexer.tokens
}
