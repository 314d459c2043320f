//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Control flow: `if` / `else`
//! - Output: `print`
//! - Compound statements: `{ ... }`
//! - Expression statements: assignments, calls
//!
//! # Grammar
//!
//! ```text
//! statement ::= if_stmt | print_stmt | block | expr_stmt
//! if_stmt   ::= "if" "(" expression ")" statement ( "else" statement )?
//! print_stmt ::= "print" expression ";"
//! block     ::= "{" declaration* "}"
//! expr_stmt ::= expression ";"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::constants::SYNC_KEYWORDS;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a statement
    pub(crate) fn statement(&mut self) -> Result<Stmt, ParseError> {
        if self.match_token(&[TokenKind::If]).is_some() {
            return self.nested(Self::if_statement);
        }

        if self.match_token(&[TokenKind::Print]).is_some() {
            return self.print_statement();
        }

        if self.match_token(&[TokenKind::LeftBrace]).is_some() {
            let statements = self.nested(Self::block)?;
            return Ok(Stmt::Block(BlockStmt { statements }));
        }

        self.expression_statement()
    }

    /// Parse if statement; `else` binds to the nearest `if`
    fn if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);

        let else_branch = if self.match_token(&[TokenKind::Else]).is_some() {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            condition,
            then_branch,
            else_branch,
        }))
    }

    /// Parse print statement
    fn print_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(PrintStmt { expr }))
    }

    /// Parse block contents after the opening brace, through the closing one
    pub(crate) fn block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    /// Parse expression statement
    fn expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.expression()?;

        if let Err(error) = self.consume(TokenKind::Semicolon, "Expect ';' after value.") {
            if self.config.strict_semicolons {
                return Err(error);
            }
            // Lenient mode keeps the statement, then skips the rest of it
            self.record(error);
            if !self.at_statement_boundary() {
                self.synchronize();
            }
        }

        Ok(Stmt::Expression(ExpressionStmt { expr }))
    }

    /// True in front of a statement keyword, a closing brace or end of input
    fn at_statement_boundary(&self) -> bool {
        self.is_at_end()
            || self.check(TokenKind::RightBrace)
            || SYNC_KEYWORDS.contains(&self.peek().kind)
    }
}
