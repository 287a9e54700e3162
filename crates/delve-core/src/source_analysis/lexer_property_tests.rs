// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the Delve Script lexer.
//!
//! These tests use `proptest` to verify lexer invariants over generated
//! inputs:
//!
//! 1. **Lexer never panics** - arbitrary string input always produces tokens
//! 2. **Terminal token shape** - `tokenize` output is non-empty and ends in
//!    `Eof` or `Illegal`, never both
//! 3. **Position monotonicity** - tokens come out in source order
//! 4. **Span bounds and ordering** - spans stay inside the input and don't
//!    overlap
//! 5. **Lexer is deterministic** - same input, same tokens
//! 6. **Valid fragments produce no errors** - known-valid inputs lex cleanly

use proptest::prelude::*;

use super::lexer::{lex, tokenize};

// ============================================================================
// Generators
// ============================================================================

/// Known-valid single-token fragments that should lex without errors.
const VALID_SINGLE_TOKENS: &[&str] = &[
    "42", "0", "true", "false", "x", "my_var", "_tmp", "x1", "let", "function", "if", "else",
    "return", "=", "==", "!", "!=", "<", ">", "+", "-", "*", "/", "(", ")", "{", "}", ",", ";",
];

/// Multi-token valid statements that should lex cleanly.
const VALID_STATEMENTS: &[&str] = &[
    "let x = 5;",
    "x + 1;",
    "return x * y;",
    "if (a < b) { a; }",
    "function(x, y) { return x + y; };",
    "add(1, 2);",
    "!true;",
    "-5;",
    "(1 + 2) * 3;",
    "let ok = a != b;",
];

fn valid_single_token() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_SINGLE_TOKENS).prop_map(std::string::ToString::to_string)
}

fn valid_statement() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_STATEMENTS).prop_map(std::string::ToString::to_string)
}

// ============================================================================
// Property tests
// ============================================================================

/// Default is 512 cases; override via `PROPTEST_CASES` env var for nightly
/// runs.
fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: The lexer never panics on arbitrary string input.
    #[test]
    fn lexer_never_panics(input in "\\PC{0,500}") {
        let _tokens = lex(&input);
        let _tokens = tokenize(&input);
    }

    /// Property 2: `tokenize` output is non-empty and its last token is
    /// either `Eof` or `Illegal`; `Eof` never follows an `Illegal` token.
    #[test]
    fn terminal_token_shape(input in "\\PC{0,500}") {
        let tokens = tokenize(&input);
        prop_assert!(!tokens.is_empty(), "tokenize should never return empty");

        let last = tokens.last().unwrap();
        prop_assert!(
            last.kind().is_eof() || last.kind().is_illegal(),
            "last token should be Eof or Illegal, got {:?} for input {:?}",
            last.kind(),
            input,
        );

        // Every earlier token is an ordinary one
        for token in &tokens[..tokens.len() - 1] {
            prop_assert!(
                !token.kind().is_eof() && !token.kind().is_illegal(),
                "terminal token kind {:?} appears mid-stream for input {:?}",
                token.kind(),
                input,
            );
        }
    }

    /// Property 3: Tokens are produced in source order; successive
    /// positions are non-decreasing (line first, then column).
    #[test]
    fn position_monotonicity(input in "\\PC{0,500}") {
        let tokens = tokenize(&input);
        for window in tokens.windows(2) {
            prop_assert!(
                window[0].position() <= window[1].position(),
                "positions regress: {:?} at {} then {:?} at {} for input {:?}",
                window[0].kind(),
                window[0].position(),
                window[1].kind(),
                window[1].position(),
                input,
            );
        }
    }

    /// Property 4: All token spans are within input bounds, ordered, and
    /// non-overlapping.
    #[test]
    fn span_bounds_and_ordering(input in "\\PC{0,500}") {
        let tokens = tokenize(&input);
        let input_len = u32::try_from(input.len()).unwrap_or(u32::MAX);

        for token in &tokens {
            prop_assert!(
                token.span().end() <= input_len,
                "token {:?} span end {} exceeds input length {} for input {:?}",
                token.kind(),
                token.span().end(),
                input_len,
                input,
            );
            prop_assert!(token.span().start() <= token.span().end());
        }

        for window in tokens.windows(2) {
            prop_assert!(
                window[1].span().start() >= window[0].span().end(),
                "overlapping spans: {:?} at {:?} and {:?} at {:?} for input {:?}",
                window[0].kind(),
                window[0].span(),
                window[1].kind(),
                window[1].span(),
                input,
            );
        }
    }

    /// Property 5: The lexer is deterministic - same input, same tokens.
    #[test]
    fn lexer_deterministic(input in "\\PC{0,200}") {
        let tokens1 = tokenize(&input);
        let tokens2 = tokenize(&input);
        prop_assert_eq!(tokens1, tokens2);
    }

    /// Property 6: Known-valid single tokens produce no Illegal tokens.
    #[test]
    fn valid_tokens_no_illegal(input in valid_single_token()) {
        let tokens = tokenize(&input);
        prop_assert!(tokens.last().unwrap().kind().is_eof());
    }

    /// Property 7: Known-valid statements produce no Illegal tokens.
    #[test]
    fn valid_statements_no_illegal(input in valid_statement()) {
        let tokens = tokenize(&input);
        prop_assert!(tokens.last().unwrap().kind().is_eof());
    }

    /// Property 8: An identifier-shaped input lexes to a single token
    /// (an identifier or a keyword) whose literal is the input itself.
    #[test]
    fn identifier_round_trip(input in "[a-z_][a-z0-9_]{0,12}") {
        let tokens = lex(&input);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].literal(), input.as_str());
    }

    /// Property 9: Whitespace placement never changes the token kinds.
    #[test]
    fn whitespace_is_insignificant(input in valid_statement()) {
        let spaced = input.replace(' ', "\n\t ");
        let kinds: Vec<_> = tokenize(&input).into_iter().map(|t| t.into_kind()).collect();
        let spaced_kinds: Vec<_> = tokenize(&spaced).into_iter().map(|t| t.into_kind()).collect();
        prop_assert_eq!(kinds, spaced_kinds);
    }
}
