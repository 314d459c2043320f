//! Declaration parsing implementation
//!
//! Declarations are the unit of error recovery: a failure anywhere inside one
//! is recorded, the parser synchronizes, and the declaration is dropped.
//!
//! # Grammar
//!
//! ```text
//! program     ::= declaration* EOF
//! declaration ::= var_decl | statement
//! var_decl    ::= "var" IDENTIFIER ( "=" expression )? ";"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse one declaration, recovering from any error inside it
    pub(crate) fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.match_token(&[TokenKind::Var]).is_some() {
            self.var_declaration()
        } else {
            self.statement()
        };

        self.recover(result)
    }

    /// Parse variable declaration after the `var` keyword
    fn var_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?;

        let initializer = if self.match_token(&[TokenKind::Equal]).is_some() {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration.",
        )?;

        Ok(Stmt::Var(VarStmt { name, initializer }))
    }
}
