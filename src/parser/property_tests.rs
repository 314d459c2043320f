//! Property-based tests for the parser.
//!
//! These tests use `proptest` to check parser invariants over generated inputs:
//!
//! 1. **Parser never panics** : arbitrary token soup always terminates with a result
//! 2. **Well-formed input is clean** : generated expressions parse with no errors
//! 3. **Printing is deterministic** : the same tree renders identically twice

use proptest::prelude::*;

use crate::parser::parse::Parser;
use crate::printer::AstPrinter;

/// Token-sized fragments, glued together at random to produce mostly broken input
const FRAGMENTS: &[&str] = &[
    "var", "x", "y", "=", "1", "2.5", "\"s\"", ";", "print", "if", "else", "(", ")", "{", "}",
    "+", "-", "*", "/", "!", "==", "!=", "<=", ">", "and", "or", "nil", "true", "false", ",",
    "f", "while", "return",
];

const BINARY_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "==", "!=", "<", "<=", ">", ">=", "and", "or",
];

const RESERVED: &[&str] = &[
    "and", "class", "else", "false", "for", "fun", "if", "nil", "or", "print", "return",
    "super", "this", "true", "var", "while",
];

fn fragment_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40)
        .prop_map(|parts| parts.join(" "))
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,5}".prop_filter("reserved words are not identifiers", |name| {
        !RESERVED.contains(&name.as_str())
    })
}

/// Syntactically valid expressions built from literals, names and operators
fn expression_source() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        Just("true".to_string()),
        Just("nil".to_string()),
        Just("\"text\"".to_string()),
        identifier(),
    ];

    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(BINARY_OPERATORS),
                inner.clone()
            )
                .prop_map(|(left, op, right)| format!("{left} {op} {right}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.clone().prop_map(|e| format!("-{e}")),
            inner.clone().prop_map(|e| format!("!{e}")),
            (identifier(), inner.clone()).prop_map(|(name, e)| format!("{name}({e})")),
        ]
    })
}

proptest! {
    #[test]
    fn parse_program_never_panics(source in fragment_soup()) {
        let mut parser = Parser::from_source(&source).unwrap();
        let parsed = parser.parse_program();

        prop_assert!(parser.is_at_end());
        for error in &parsed.errors {
            prop_assert!(!error.message.is_empty());
        }
    }

    #[test]
    fn well_formed_expressions_parse_cleanly(source in expression_source()) {
        let mut parser = Parser::from_source(&source).unwrap();
        let parsed = parser.parse_expression();

        prop_assert!(parsed.errors.is_empty(), "{:?} for {}", parsed.errors, source);
        prop_assert!(parsed.value.is_some());
        prop_assert!(parser.is_at_end(), "trailing input left in {}", source);
    }

    #[test]
    fn expression_statements_parse_cleanly(source in expression_source()) {
        let program = format!("{source};");
        let parsed = Parser::from_source(&program).unwrap().parse_program();

        prop_assert!(parsed.errors.is_empty(), "{:?} for {}", parsed.errors, program);
        prop_assert_eq!(parsed.value.len(), 1);
    }

    #[test]
    fn printing_is_deterministic(source in fragment_soup()) {
        let parsed = Parser::from_source(&source).unwrap().parse_program();
        let mut printer = AstPrinter::new();

        let first = printer.print_program(&parsed.value);
        let second = printer.print_program(&parsed.value);
        prop_assert_eq!(first, second);
    }
}
