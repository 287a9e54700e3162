// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for Delve Script.
//!
//! This module contains the Pratt (top-down operator-precedence) expression
//! parser, as an additional impl block for [`Parser`]. Dispatch is a pair of
//! `match` tables keyed on [`TokenKind`]:
//!
//! - **Prefix table**: identifiers, integer and boolean literals, the `!`
//!   and `-` prefix operators, grouping parentheses, function literals, and
//!   if expressions
//! - **Infix table**: the binary operators and the call operator `(`
//!
//! # Precedence
//!
//! | Level | Tokens |
//! |-------|--------|
//! | Equals | `==` `!=` |
//! | LessGreater | `<` `>` |
//! | Sum | `+` `-` |
//! | Product | `*` `/` |
//! | Prefix | `!x` `-x` |
//! | Call | `f(x)` |
//!
//! All binary operators are left-associative: an infix parser hands its own
//! precedence (not one lower) to the right-hand sub-parse, so an equal-
//! precedence operator in look-ahead falls out of the loop and attaches at
//! the outer level.

use ecow::{EcoString, eco_format};

use crate::ast::{Expression, Identifier};
use crate::source_analysis::TokenKind;

use super::Parser;

/// Operator binding strength, weakest first. Higher precedence binds
/// tighter; comparisons drive the Pratt loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    /// Starting precedence for a full expression.
    Lowest,
    /// `==` and `!=`
    Equals,
    /// `<` and `>`
    LessGreater,
    /// `+` and binary `-`
    Sum,
    /// `*` and `/`
    Product,
    /// Prefix `!` and `-`
    Prefix,
    /// The call operator `(`
    Call,
}

/// Gets the precedence of a token when it appears in infix position.
///
/// Non-operator tokens map to `Lowest`, which ends the Pratt loop.
pub(super) fn precedence_of(kind: &TokenKind) -> Precedence {
    match kind {
        TokenKind::Equal | TokenKind::NotEqual => Precedence::Equals,
        TokenKind::LessThan | TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Multiply | TokenKind::Divide => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

impl Parser {
    // ========================================================================
    // Pratt Expression Parsing
    // ========================================================================

    /// Parses an expression at the given precedence.
    ///
    /// Post-condition on success: `current` is the expression's last token.
    /// On failure a diagnostic has been reported and `None` is returned.
    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !matches!(self.peek_kind(), TokenKind::Semicolon)
            && precedence < precedence_of(self.peek_kind())
        {
            left = match self.peek_kind() {
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::LessThan
                | TokenKind::GreaterThan => {
                    self.advance();
                    self.parse_infix_expression(left)?
                }
                TokenKind::LParen => {
                    self.advance();
                    self.parse_call_expression(left)?
                }
                _ => break,
            };
        }

        Some(left)
    }

    /// Parses the leading (prefix) part of an expression.
    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current_kind() {
            TokenKind::Identifier(_) => Some(Expression::Identifier(Identifier::new(
                self.current_token().clone(),
            ))),
            TokenKind::Integer(_) => self.parse_integer_literal(),
            TokenKind::True | TokenKind::False => Some(Expression::BooleanLiteral {
                value: matches!(self.current_kind(), TokenKind::True),
                token: self.current_token().clone(),
            }),
            TokenKind::Negate | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::If => self.parse_if_expression(),
            _ => {
                let found = self.current_token();
                let message = eco_format!("expected expression, found '{}'", found.kind());
                let position = found.position();
                self.error(message, position);
                None
            }
        }
    }

    /// Parses an integer literal, converting the token text to an `i64`.
    /// A conversion failure (e.g. `123abc`, or a value out of range) is a
    /// parse error.
    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current_token().clone();
        let TokenKind::Integer(literal) = token.kind() else {
            unreachable!("caller dispatched on Integer");
        };

        match literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral { value, token }),
            Err(_) => {
                let message = eco_format!("invalid integer literal '{literal}'");
                self.error(message, token.position());
                None
            }
        }
    }

    /// Parses a prefix operator (`!` or `-`) and its operand.
    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.current_token().clone();
        let operator: EcoString = token.literal().into();

        if !self.advance() {
            // The operator is the last token; there is no operand to parse
            self.error_expected("expression");
            return None;
        }
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix {
            operator,
            right: Box::new(right),
            token,
        })
    }

    /// Parses a binary operator and its right operand. Precondition:
    /// `current` is the operator; the left operand is already built.
    ///
    /// The right side is parsed at the operator's own precedence, which
    /// makes equal-precedence chains left-associative.
    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current_token().clone();
        let operator: EcoString = token.literal().into();
        let precedence = precedence_of(token.kind());

        self.advance();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            token,
        })
    }

    /// Parses `( EXPR )`. The parentheses only alter precedence; the inner
    /// expression is returned without a wrapper node.
    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        if !self.advance() {
            // A lone `(` at the very end of the stream
            self.error_expected(")");
            return None;
        }

        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(&TokenKind::RParen)?;

        Some(expression)
    }

    /// Parses `function ( params ) { body }`. Precondition: `current` is
    /// `function`. Post-condition: `current` is the body's closing `}`.
    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.current_token().clone();

        self.expect_peek(&TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(&TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;

        Some(Expression::FunctionLiteral {
            parameters,
            body,
            token,
        })
    }

    /// Parses a comma-separated parameter list. Precondition: `current` is
    /// `(`. Post-condition: `current` is `)`.
    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if matches!(self.peek_kind(), TokenKind::RParen) {
            self.advance();
            return Some(parameters);
        }

        self.advance();
        parameters.push(self.parse_parameter()?);

        while matches!(self.peek_kind(), TokenKind::Comma) {
            self.advance();
            self.advance();
            parameters.push(self.parse_parameter()?);
        }

        self.expect_peek(&TokenKind::RParen)?;
        Some(parameters)
    }

    /// Parses a single parameter, which must be an identifier.
    fn parse_parameter(&mut self) -> Option<Identifier> {
        if self.current_kind().is_identifier() {
            Some(Identifier::new(self.current_token().clone()))
        } else {
            self.error_expected("identifier");
            None
        }
    }

    /// Parses a call's argument list as an infix operation on the callee.
    /// Precondition: `current` is the `(` following the callee expression.
    /// Post-condition: `current` is `)`.
    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.current_token().clone();
        let arguments = self.parse_call_arguments()?;

        Some(Expression::Call {
            function: Box::new(function),
            arguments,
            token,
        })
    }

    /// Parses a comma-separated argument list. Precondition: `current` is
    /// `(`. Post-condition: `current` is `)`.
    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = Vec::new();

        if matches!(self.peek_kind(), TokenKind::RParen) {
            self.advance();
            return Some(arguments);
        }

        self.advance();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while matches!(self.peek_kind(), TokenKind::Comma) {
            self.advance();
            self.advance();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(&TokenKind::RParen)?;
        Some(arguments)
    }

    /// Parses `if ( EXPR ) { BLOCK } [ else { BLOCK } ]`. Precondition:
    /// `current` is `if`. Post-condition: `current` is the final `}`.
    pub(super) fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current_token().clone();

        self.expect_peek(&TokenKind::LParen)?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(&TokenKind::RParen)?;

        self.expect_peek(&TokenKind::LBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if matches!(self.peek_kind(), TokenKind::Else) {
            self.advance();
            self.expect_peek(&TokenKind::LBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Some(Expression::If {
            condition: Box::new(condition),
            consequence,
            alternative,
            token,
        })
    }
}
