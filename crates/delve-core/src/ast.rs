// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for Delve Script.
//!
//! The AST represents the structure of a Delve Script program after parsing.
//! Expressions and statements are distinct sum types; every node carries a
//! clone of the [`Token`] that introduced it, so source positions survive
//! into diagnostics and later passes. Tokens are cheap to clone (their
//! string data is [`ecow::EcoString`]).
//!
//! # Pretty-printing
//!
//! Every node renders to a canonical textual form via [`std::fmt::Display`]:
//! parenthesized prefix/infix expressions, `let`/`return` statements with a
//! trailing `;`, and block bodies printed one statement per line. The
//! canonical form of a well-formed program parses back to an equivalent
//! tree.
//!
//! # Example
//!
//! ```
//! use delve_core::source_analysis::{parse, tokenize};
//!
//! let (program, _) = parse(tokenize("x + y * z;"));
//! assert_eq!(program.unwrap().to_string(), "(x + (y * z));\n");
//! ```

use std::fmt;

use ecow::EcoString;

use crate::source_analysis::{Position, Token};

/// An identifier reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The identifier's name.
    pub name: EcoString,
    /// The `Identifier` token this node was built from.
    pub token: Token,
}

impl Identifier {
    /// Creates an identifier node from its token. The name is the token's
    /// literal text.
    #[must_use]
    pub fn new(token: Token) -> Self {
        Self {
            name: token.literal().into(),
            token,
        }
    }

    /// Returns the position of this identifier in the source.
    #[must_use]
    pub fn position(&self) -> Position {
        self.token.position()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An expression.
///
/// Grouping parentheses do not appear in the tree; they only altered
/// precedence during parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A name: `x`
    Identifier(Identifier),

    /// A signed 64-bit integer literal: `42`
    IntegerLiteral {
        /// The parsed value.
        value: i64,
        /// The `Integer` token.
        token: Token,
    },

    /// A boolean literal: `true` or `false`
    BooleanLiteral {
        /// The literal value.
        value: bool,
        /// The `True` or `False` token.
        token: Token,
    },

    /// A prefix operator applied to one operand: `!ok`, `-x`
    Prefix {
        /// The operator spelling (`!` or `-`).
        operator: EcoString,
        /// The operand.
        right: Box<Expression>,
        /// The operator token.
        token: Token,
    },

    /// A binary operator applied to two operands: `a + b`
    Infix {
        /// The operator spelling (`+`, `-`, `*`, `/`, `==`, `!=`, `<`, `>`).
        operator: EcoString,
        /// The left operand.
        left: Box<Expression>,
        /// The right operand.
        right: Box<Expression>,
        /// The operator token.
        token: Token,
    },

    /// A function literal: `function(x, y) { return x + y; }`
    FunctionLiteral {
        /// The parameter names, in declaration order.
        parameters: Vec<Identifier>,
        /// The function body.
        body: BlockStatement,
        /// The `function` keyword token.
        token: Token,
    },

    /// A call: `add(1, 2)`
    Call {
        /// The callee expression.
        function: Box<Expression>,
        /// The arguments, in call order.
        arguments: Vec<Expression>,
        /// The `(` token that opened the argument list.
        token: Token,
    },

    /// A conditional: `if (c) { … } else { … }`. The alternative is
    /// optional; the consequence is not.
    If {
        /// The condition expression.
        condition: Box<Expression>,
        /// The block evaluated when the condition holds.
        consequence: BlockStatement,
        /// The block evaluated otherwise, if present.
        alternative: Option<BlockStatement>,
        /// The `if` keyword token.
        token: Token,
    },
}

impl Expression {
    /// Returns the token that introduced this expression.
    #[must_use]
    pub fn token(&self) -> &Token {
        match self {
            Self::Identifier(identifier) => &identifier.token,
            Self::IntegerLiteral { token, .. }
            | Self::BooleanLiteral { token, .. }
            | Self::Prefix { token, .. }
            | Self::Infix { token, .. }
            | Self::FunctionLiteral { token, .. }
            | Self::Call { token, .. }
            | Self::If { token, .. } => token,
        }
    }

    /// Returns the position of this expression in the source.
    #[must_use]
    pub fn position(&self) -> Position {
        self.token().position()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(identifier) => write!(f, "{identifier}"),
            Self::IntegerLiteral { value, .. } => write!(f, "{value}"),
            Self::BooleanLiteral { value, .. } => write!(f, "{value}"),
            Self::Prefix {
                operator, right, ..
            } => write!(f, "({operator}{right})"),
            Self::Infix {
                operator,
                left,
                right,
                ..
            } => write!(f, "({left} {operator} {right})"),
            Self::FunctionLiteral {
                parameters, body, ..
            } => {
                write!(f, "function(")?;
                for (i, parameter) in parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                write!(f, ") {{\n{body}}}")
            }
            Self::Call {
                function,
                arguments,
                ..
            } => {
                write!(f, "{function}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            }
            Self::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if {condition} {{\n{consequence}}}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{\n{alternative}}}")?;
                }
                Ok(())
            }
        }
    }
}

/// A `let` statement: `let x = 7;`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    /// The bound name.
    pub name: Identifier,
    /// The bound value.
    pub value: Expression,
    /// The `let` keyword token.
    pub token: Token,
}

impl fmt::Display for LetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

/// A `return` statement: `return x;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// The returned value.
    pub value: Expression,
    /// The `return` keyword token.
    pub token: Token,
}

impl fmt::Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "return {};", self.value)
    }
}

/// A bare expression in statement position: `x + y;`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// The expression.
    pub expression: Expression,
    /// The first token of the expression.
    pub token: Token,
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};", self.expression)
    }
}

/// A brace-enclosed sequence of statements.
///
/// Renders one statement per line, without the surrounding braces; the
/// containing `if`/`function` printer supplies those.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// The statements, in source order.
    pub statements: Vec<Statement>,
    /// The `{` token that opened the block.
    pub token: Token,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A `let` binding.
    Let(LetStatement),
    /// A `return` statement.
    Return(ReturnStatement),
    /// A bare expression.
    Expression(ExpressionStatement),
    /// A braced statement sequence.
    Block(BlockStatement),
}

impl Statement {
    /// Returns the token that introduced this statement.
    #[must_use]
    pub fn token(&self) -> &Token {
        match self {
            Self::Let(statement) => &statement.token,
            Self::Return(statement) => &statement.token,
            Self::Expression(statement) => &statement.token,
            Self::Block(statement) => &statement.token,
        }
    }

    /// Returns the position of this statement in the source.
    #[must_use]
    pub fn position(&self) -> Position {
        self.token().position()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let(statement) => write!(f, "{statement}"),
            Self::Return(statement) => write!(f, "{statement}"),
            Self::Expression(statement) => write!(f, "{statement}"),
            Self::Block(statement) => write!(f, "{statement}"),
        }
    }
}

/// The top-level AST node: an ordered sequence of statements.
///
/// Statement order is evaluation order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The statements, in source order.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Creates an empty program.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::{Position, Span, TokenKind};

    /// Helper to make a token with a throwaway location.
    fn token(kind: TokenKind) -> Token {
        Token::new(kind, Span::default(), Position::default())
    }

    fn identifier(name: &str) -> Identifier {
        Identifier::new(token(TokenKind::Identifier(name.into())))
    }

    fn integer(value: i64) -> Expression {
        Expression::IntegerLiteral {
            value,
            token: token(TokenKind::Integer(value.to_string().into())),
        }
    }

    #[test]
    fn identifier_to_string() {
        assert_eq!(identifier("matthew").to_string(), "matthew");
    }

    #[test]
    fn integer_literal_to_string() {
        assert_eq!(integer(55_662_187).to_string(), "55662187");
    }

    #[test]
    fn boolean_literal_to_string() {
        let expr = Expression::BooleanLiteral {
            value: true,
            token: token(TokenKind::True),
        };
        assert_eq!(expr.to_string(), "true");
    }

    #[test]
    fn prefix_expression_to_string() {
        let expr = Expression::Prefix {
            operator: "!".into(),
            right: Box::new(Expression::Identifier(identifier("matthew"))),
            token: token(TokenKind::Negate),
        };
        assert_eq!(expr.to_string(), "(!matthew)");
    }

    #[test]
    fn infix_expression_to_string() {
        let expr = Expression::Infix {
            operator: "+".into(),
            left: Box::new(Expression::Identifier(identifier("matthew"))),
            right: Box::new(Expression::Identifier(identifier("heather"))),
            token: token(TokenKind::Plus),
        };
        assert_eq!(expr.to_string(), "(matthew + heather)");
    }

    #[test]
    fn let_statement_to_string() {
        let statement = LetStatement {
            name: identifier("x"),
            value: integer(5),
            token: token(TokenKind::Let),
        };
        assert_eq!(statement.to_string(), "let x = 5;");
    }

    #[test]
    fn return_statement_to_string() {
        let statement = ReturnStatement {
            value: integer(5),
            token: token(TokenKind::Return),
        };
        assert_eq!(statement.to_string(), "return 5;");
    }

    #[test]
    fn expression_statement_to_string() {
        let statement = ExpressionStatement {
            expression: Expression::Infix {
                operator: "+".into(),
                left: Box::new(Expression::Identifier(identifier("matthew"))),
                right: Box::new(Expression::Identifier(identifier("heather"))),
                token: token(TokenKind::Plus),
            },
            token: token(TokenKind::Identifier("matthew".into())),
        };
        assert_eq!(statement.to_string(), "(matthew + heather);");
    }

    #[test]
    fn function_literal_to_string() {
        let body = BlockStatement {
            statements: vec![Statement::Return(ReturnStatement {
                value: Expression::Identifier(identifier("x")),
                token: token(TokenKind::Return),
            })],
            token: token(TokenKind::LBrace),
        };
        let expr = Expression::FunctionLiteral {
            parameters: vec![identifier("x"), identifier("y")],
            body,
            token: token(TokenKind::Function),
        };
        assert_eq!(expr.to_string(), "function(x, y) {\nreturn x;\n}");
    }

    #[test]
    fn call_expression_to_string() {
        let expr = Expression::Call {
            function: Box::new(Expression::Identifier(identifier("add"))),
            arguments: vec![integer(1), Expression::Identifier(identifier("b"))],
            token: token(TokenKind::LParen),
        };
        assert_eq!(expr.to_string(), "add(1, b)");
    }

    #[test]
    fn if_expression_to_string() {
        let consequence = BlockStatement {
            statements: vec![Statement::Expression(ExpressionStatement {
                expression: Expression::Identifier(identifier("a")),
                token: token(TokenKind::Identifier("a".into())),
            })],
            token: token(TokenKind::LBrace),
        };
        let expr = Expression::If {
            condition: Box::new(Expression::Identifier(identifier("c"))),
            consequence: consequence.clone(),
            alternative: None,
            token: token(TokenKind::If),
        };
        assert_eq!(expr.to_string(), "if c {\na;\n}");

        let alternative = BlockStatement {
            statements: vec![Statement::Expression(ExpressionStatement {
                expression: Expression::Identifier(identifier("b")),
                token: token(TokenKind::Identifier("b".into())),
            })],
            token: token(TokenKind::LBrace),
        };
        let expr = Expression::If {
            condition: Box::new(Expression::Identifier(identifier("c"))),
            consequence,
            alternative: Some(alternative),
            token: token(TokenKind::If),
        };
        assert_eq!(expr.to_string(), "if c {\na;\n} else {\nb;\n}");
    }

    #[test]
    fn program_to_string() {
        let program = Program {
            statements: vec![
                Statement::Let(LetStatement {
                    name: identifier("x"),
                    value: integer(5),
                    token: token(TokenKind::Let),
                }),
                Statement::Return(ReturnStatement {
                    value: Expression::Identifier(identifier("x")),
                    token: token(TokenKind::Return),
                }),
            ],
        };
        assert_eq!(program.to_string(), "let x = 5;\nreturn x;\n");
    }

    #[test]
    fn empty_program_to_string() {
        assert_eq!(Program::new().to_string(), "");
    }

    #[test]
    fn node_positions_come_from_tokens() {
        let name = Identifier::new(Token::new(
            TokenKind::Identifier("x".into()),
            Span::new(4, 5),
            Position::new(2, 5),
        ));
        assert_eq!(name.position(), Position::new(2, 5));

        let statement = Statement::Let(LetStatement {
            name,
            value: integer(1),
            token: Token::new(TokenKind::Let, Span::new(0, 3), Position::new(2, 1)),
        });
        assert_eq!(statement.position(), Position::new(2, 1));
    }
}
