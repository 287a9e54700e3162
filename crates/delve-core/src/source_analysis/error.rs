// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Structured lexical errors.
//!
//! The lexer itself never fails: an unrecognizable character becomes a
//! terminal [`TokenKind::Illegal`](super::TokenKind::Illegal) token. Hosts
//! that want an error report instead of a token can convert with
//! [`LexError::from_token`]; the type integrates with [`miette`] for
//! rendering.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use super::{Position, Span, Token, TokenKind};

/// A lexical error extracted from an `Illegal` token.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at {position}")]
#[diagnostic()]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// The line/column of the offending character.
    pub position: Position,
    /// The byte range of the offending text.
    #[label("here")]
    pub span: Span,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, position: Position, span: Span) -> Self {
        Self {
            kind,
            position,
            span,
        }
    }

    /// Creates an "unexpected character" error.
    #[must_use]
    pub fn unexpected_char(c: char, position: Position, span: Span) -> Self {
        Self::new(LexErrorKind::UnexpectedCharacter(c), position, span)
    }

    /// Extracts a lexical error from an `Illegal` token, or returns `None`
    /// for any other token kind.
    #[must_use]
    pub fn from_token(token: &Token) -> Option<Self> {
        match token.kind() {
            TokenKind::Illegal(text) => {
                let c = text.chars().next().unwrap_or('\u{fffd}');
                Some(Self::unexpected_char(c, token.position(), token.span()))
            }
            _ => None,
        }
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// An unexpected character was encountered.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
}
