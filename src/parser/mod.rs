//! Script source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST) with error recovery
//! - [`ast`]: AST node definitions
//! - [`visitor`]: Visitor traits for walking the AST
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! Syntax errors are collected rather than returned one at a time: after an
//! error the parser synchronizes to the next statement and keeps going.

pub mod ast;
pub mod constants;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod visitor;

#[cfg(test)]
mod property_tests;
