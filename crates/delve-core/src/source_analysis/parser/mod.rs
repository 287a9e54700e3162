// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parser for Delve Script source code.
//!
//! The parser consumes the lexer's token stream and builds an
//! [`ast::Program`](crate::ast::Program), collecting [`Diagnostic`]s instead
//! of failing.
//!
//! # Design Philosophy
//!
//! - **Error recovery is mandatory** - one statement's failure never poisons
//!   its neighbors; the parser drops the statement and resumes after the
//!   next `;`
//! - **Multiple errors** - report all errors, don't stop at the first
//! - **Precise positions** - every diagnostic points at the line/column of
//!   the offending token
//!
//! # Statement grammar
//!
//! ```text
//! program   := statement*
//! statement := "let" IDENT "=" expr ";"
//!            | "return" expr ";"
//!            | "{" statement* "}"
//!            | expr ";"
//! ```
//!
//! Expressions are parsed with Pratt (top-down operator-precedence) parsing;
//! the precedence ladder and dispatch tables live in the `expressions`
//! submodule.
//!
//! # Cursor contract
//!
//! The parser keeps a `current` token and one token of look-ahead. Reads
//! past the end of the token vector clamp to the last token, so the cursor
//! is total on any input. Every successful statement parser leaves `current`
//! on its terminator (`;`, or `}` for block and if statements) and the
//! driver advances exactly once per iteration.
//!
//! # Usage
//!
//! ```
//! use delve_core::source_analysis::{parse, tokenize};
//!
//! let (program, diagnostics) = parse(tokenize("let x = 3 + 4;"));
//! assert!(diagnostics.is_empty());
//! assert_eq!(program.unwrap().statements.len(), 1);
//! ```

use ecow::{EcoString, eco_format};

use crate::ast::{
    BlockStatement, ExpressionStatement, Identifier, LetStatement, Program, ReturnStatement,
    Statement,
};
use crate::source_analysis::{Position, Token, TokenKind, tokenize};

// Submodule with the expression-parsing impl block for Parser
mod expressions;

use expressions::Precedence;


/// Parse a token vector into a program.
///
/// This is the one-shot entry point. An empty token vector yields no
/// program; any other input yields a [`Program`] (possibly with zero
/// statements) plus the diagnostics collected along the way.
///
/// # Examples
///
/// ```
/// use delve_core::source_analysis::{parse, tokenize};
///
/// let (program, diagnostics) = parse(tokenize("return 42;"));
/// assert!(diagnostics.is_empty());
/// assert_eq!(program.unwrap().to_string(), "return 42;\n");
/// ```
#[must_use]
pub fn parse(tokens: Vec<Token>) -> (Option<Program>, Vec<Diagnostic>) {
    Parser::new().parse(tokens)
}

/// Checks whether the given source text appears syntactically complete for
/// interactive evaluation.
///
/// This is a heuristic used by console hosts to decide whether to evaluate
/// the current input buffer or show a continuation prompt for multi-line
/// input. It returns `false` (incomplete) when:
///
/// - `(` or `{` depth is unclosed
/// - the last token expects something to follow: a binary or prefix
///   operator, `=`, `,`, or one of `let`, `return`, `function`, `if`, `else`
///
/// Extra closing delimiters and illegal characters count as complete so the
/// evaluator can report the syntax error rather than waiting forever.
///
/// # Examples
///
/// ```
/// use delve_core::source_analysis::is_input_complete;
///
/// assert!(is_input_complete("3 + 4;"));
/// assert!(!is_input_complete("function(x) {"));  // unclosed block
/// assert!(!is_input_complete("1 +"));            // operator missing operand
/// ```
#[must_use]
pub fn is_input_complete(source: &str) -> bool {
    if source.trim().is_empty() {
        return true;
    }

    let tokens = tokenize(source);

    let mut paren_depth: i32 = 0; // ( )
    let mut brace_depth: i32 = 0; // { }
    let mut last_meaningful_kind: Option<&TokenKind> = None;

    for token in &tokens {
        match token.kind() {
            // An illegal character never becomes valid with more input
            TokenKind::Illegal(_) => return true,

            TokenKind::LParen => paren_depth += 1,
            TokenKind::RParen => paren_depth -= 1,
            TokenKind::LBrace => brace_depth += 1,
            TokenKind::RBrace => brace_depth -= 1,

            TokenKind::Eof => break,
            _ => {}
        }

        last_meaningful_kind = Some(token.kind());
    }

    if paren_depth > 0 || brace_depth > 0 {
        return false;
    }

    // A trailing token that expects a right-hand side keeps the prompt open
    !matches!(
        last_meaningful_kind,
        Some(
            TokenKind::Assign
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Negate
                | TokenKind::GreaterThan
                | TokenKind::LessThan
                | TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::Comma
                | TokenKind::Let
                | TokenKind::Return
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::Else
        )
    )
}

/// A diagnostic message produced while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: Severity,
    /// The message, e.g. `expected identifier, found '='`.
    pub message: EcoString,
    /// The position of the offending token.
    pub position: Position,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<EcoString>, position: Position) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            position,
        }
    }

    /// Creates a new warning diagnostic.
    #[must_use]
    pub fn warning(message: impl Into<EcoString>, position: Position) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            position,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.message, self.position)
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A syntax error; the offending statement is dropped.
    Error,
    /// A warning that should be addressed.
    Warning,
}

/// A reusable parser.
///
/// [`Parser::parse`] takes ownership of a token vector and returns the
/// program plus diagnostics; [`Parser::clear`] restores the initial state.
/// Each `parse` call starts clean, so one parser instance may be fed many
/// inputs in sequence.
#[derive(Debug, Default)]
pub struct Parser {
    /// The tokens being parsed. Non-empty while parsing is in progress.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Accumulated diagnostics.
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    /// Creates a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a token vector into a program.
    ///
    /// An empty vector yields `(None, [])`. Any other input yields a
    /// program, possibly with zero statements; statements that fail to parse
    /// are dropped and described in the returned diagnostics.
    pub fn parse(&mut self, tokens: Vec<Token>) -> (Option<Program>, Vec<Diagnostic>) {
        self.clear();

        if tokens.is_empty() {
            return (None, Vec::new());
        }
        self.tokens = tokens;

        let program = self.parse_program();
        (Some(program), std::mem::take(&mut self.diagnostics))
    }

    /// Restores the parser to its initial state, releasing the token vector
    /// and any accumulated diagnostics.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.current = 0;
        self.diagnostics.clear();
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token. Reads past the end clamp to the last
    /// token, which is `Eof` in well-formed input.
    fn current_token(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    /// Returns the current token kind.
    fn current_kind(&self) -> &TokenKind {
        self.current_token().kind()
    }

    /// Returns the look-ahead token, clamped like [`Self::current_token`].
    fn peek_token(&self) -> &Token {
        &self.tokens[(self.current + 1).min(self.tokens.len() - 1)]
    }

    /// Returns the look-ahead token kind.
    fn peek_kind(&self) -> &TokenKind {
        self.peek_token().kind()
    }

    /// Advances to the next token. Returns `false` when the cursor is
    /// already on the last token and cannot move.
    fn advance(&mut self) -> bool {
        if self.current + 1 < self.tokens.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Advances onto the expected look-ahead token, or reports an error and
    /// returns `None`. Compares kinds structurally, ignoring payloads.
    fn expect_peek(&mut self, expected: &TokenKind) -> Option<()> {
        if std::mem::discriminant(self.peek_kind()) == std::mem::discriminant(expected) {
            self.advance();
            Some(())
        } else {
            let found = self.peek_token();
            let message = eco_format!("expected {}, found '{}'", expected.name(), found.kind());
            let position = found.position();
            self.diagnostics.push(Diagnostic::error(message, position));
            None
        }
    }

    // ========================================================================
    // Error Handling & Recovery
    // ========================================================================

    /// Reports that the current token is not the expected one.
    fn error_expected(&mut self, expected: &str) {
        let found = self.current_token();
        let message = eco_format!("expected {expected}, found '{}'", found.kind());
        let position = found.position();
        self.diagnostics.push(Diagnostic::error(message, position));
    }

    /// Reports an error at the given position.
    fn error(&mut self, message: EcoString, position: Position) {
        self.diagnostics.push(Diagnostic::error(message, position));
    }

    /// Synchronizes the cursor to the next recovery point: the next `;`, or
    /// `Eof`. The driver's end-of-iteration advance then steps past it.
    fn synchronize(&mut self) {
        while !matches!(self.current_kind(), TokenKind::Semicolon | TokenKind::Eof) {
            if !self.advance() {
                break;
            }
        }
    }

    // ========================================================================
    // Program & Statement Parsing
    // ========================================================================

    /// Parses the whole token stream into a program.
    fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        while !self.current_kind().is_eof() {
            match self.parse_statement() {
                Some(statement) => program.statements.push(statement),
                // The failed statement already reported its diagnostic;
                // drop it and resume after the next `;`.
                None => self.synchronize(),
            }

            if !self.advance() {
                break;
            }
        }

        program
    }

    /// Parses a single statement, dispatching on the current token kind.
    ///
    /// On success, `current` rests on the statement's terminator. On
    /// failure, a diagnostic has been reported and the cursor is wherever
    /// the failure left it; the caller resynchronizes.
    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current_kind() {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            TokenKind::LBrace => self.parse_block_statement().map(Statement::Block),
            TokenKind::If => self.parse_if_statement().map(Statement::Expression),
            _ => self.parse_expression_statement().map(Statement::Expression),
        }
    }

    /// Parses `let IDENT = EXPR ;`. Precondition: `current` is `let`.
    fn parse_let_statement(&mut self) -> Option<LetStatement> {
        let token = self.current_token().clone();
        self.advance();

        if !self.current_kind().is_identifier() {
            self.error_expected("identifier");
            return None;
        }
        let name = Identifier::new(self.current_token().clone());

        self.advance();
        if !matches!(self.current_kind(), TokenKind::Assign) {
            self.error_expected("=");
            return None;
        }

        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(&TokenKind::Semicolon)?;

        Some(LetStatement { name, value, token })
    }

    /// Parses `return EXPR ;`. Precondition: `current` is `return`.
    fn parse_return_statement(&mut self) -> Option<ReturnStatement> {
        let token = self.current_token().clone();
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(&TokenKind::Semicolon)?;

        Some(ReturnStatement { value, token })
    }

    /// Parses `EXPR ;`.
    fn parse_expression_statement(&mut self) -> Option<ExpressionStatement> {
        let token = self.current_token().clone();

        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(&TokenKind::Semicolon)?;

        Some(ExpressionStatement { expression, token })
    }

    /// Parses `{ statement* }`. Precondition: `current` is `{`.
    /// Post-condition: `current` is the closing `}`.
    fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        let token = self.current_token().clone();
        if !self.advance() {
            // A lone `{` at the very end of the stream
            self.error_expected("}");
            return None;
        }

        let mut statements = Vec::new();
        while !matches!(self.current_kind(), TokenKind::RBrace | TokenKind::Eof) {
            statements.push(self.parse_statement()?);
            if !self.advance() {
                break;
            }
        }

        if !matches!(self.current_kind(), TokenKind::RBrace) {
            self.error_expected("}");
            return None;
        }

        Some(BlockStatement { statements, token })
    }

    /// Parses an if expression in statement position. The `}` of the final
    /// block terminates the statement; a trailing `;` is consumed when
    /// present but not required.
    fn parse_if_statement(&mut self) -> Option<ExpressionStatement> {
        let token = self.current_token().clone();
        let expression = self.parse_if_expression()?;

        if matches!(self.peek_kind(), TokenKind::Semicolon) {
            self.advance();
        }

        Some(ExpressionStatement { expression, token })
    }
}
