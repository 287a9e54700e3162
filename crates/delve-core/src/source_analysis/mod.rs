// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for Delve Script source code.
//!
//! This module contains the lexer and parser; AST definitions live in
//! [`crate::ast`]. Data flows strictly left to right:
//!
//! ```text
//! source text → Lexer → tokens → Parser → (Program, diagnostics)
//! ```
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts source text into a stream of [`Token`]s. Each
//! token carries its byte [`Span`] and 1-based line/column [`Position`].
//!
//! ```
//! use delve_core::source_analysis::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new();
//! let tokens = lexer.tokenize("let x = 1;");
//! assert_eq!(tokens.len(), 6); // let, x, =, 1, ;, <eof>
//! ```
//!
//! # Parsing
//!
//! The [`parse`] function converts tokens into an [`ast::Program`]
//! (see [`crate::ast`]). Operator precedence uses Pratt parsing; syntax
//! errors are collected as [`Diagnostic`]s while parsing recovers at the
//! next statement boundary.
//!
//! # Error Handling
//!
//! The lexer never fails: an unrecognizable character becomes a terminal
//! [`TokenKind::Illegal`] token, convertible to a structured [`LexError`]
//! for miette rendering. The parser never fails either: it always returns
//! whatever program it could build, alongside its diagnostics.
//!
//! [`ast::Program`]: crate::ast::Program

mod error;
mod lexer;
mod parser;
mod span;
mod token;

// Property-based tests for the lexer
#[cfg(test)]
mod lexer_property_tests;

pub use error::{LexError, LexErrorKind};
pub use lexer::{Lexer, Scanner, lex, tokenize};
pub use parser::{Diagnostic, Parser, Severity, is_input_complete, parse};
pub use span::{Position, Span};
pub use token::{Token, TokenKind};
