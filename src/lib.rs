//! # Introduction
//!
//! loxtree parses a small C-like scripting language into an abstract syntax
//! tree and provides a visitor contract for walking that tree.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Visitor (printer, evaluator, ...)
//! ```
//!
//! 1. [`parser::lexer`] : turns source text into [`parser::lexer::Token`]s.
//! 2. [`parser::parse`] : recursive-descent [`parser::parse::Parser`] with
//!    panic-mode error recovery; returns partial results plus every syntax
//!    error.
//! 3. [`parser::ast`] / [`parser::visitor`] : the node model and the
//!    double-dispatch visitor traits.
//! 4. [`printer`] : [`printer::AstPrinter`], a visitor that renders trees in
//!    fully parenthesized form.
//!
//! ## Example
//!
//! ```
//! use loxtree::parser::parse::Parser;
//! use loxtree::printer::AstPrinter;
//!
//! let mut parser = Parser::from_source("1 + 2 * 3").unwrap();
//! let parsed = parser.parse_expression();
//! assert!(parsed.errors.is_empty());
//! assert_eq!(
//!     AstPrinter::new().print(parsed.value.as_ref()),
//!     "(+ 1.0 (* 2.0 3.0))"
//! );
//! ```

pub mod parser;
pub mod printer;
