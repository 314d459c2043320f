//! Expression parsing implementation
//!
//! Each precedence level is one method that parses the next-higher level and
//! then loops over operators of its own level, so binary operators are
//! left-associative. Assignment recurses into itself for its value and is
//! right-associative.
//!
//! # Precedence (lowest to highest)
//!
//! ```text
//! assignment ::= IDENTIFIER "=" assignment | logic_or
//! logic_or   ::= logic_and ( "or" logic_and )*
//! logic_and  ::= equality ( "and" equality )*
//! equality   ::= comparison ( ( "!=" | "==" ) comparison )*
//! comparison ::= term ( ( ">" | ">=" | "<" | "<=" ) term )*
//! term       ::= factor ( ( "-" | "+" ) factor )*
//! factor     ::= unary ( ( "/" | "*" ) unary )*
//! unary      ::= ( "!" | "-" ) unary | call
//! call       ::= primary ( "(" arguments? ")" )*
//! primary    ::= "true" | "false" | "nil" | NUMBER | STRING
//!              | IDENTIFIER | "(" expression ")"
//! ```
//!
//! Every recursive step (grouping, prefix operator, assignment value, call
//! argument) goes through [`Parser::nested`], which bounds the depth.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::constants::MAX_CALL_ARGUMENTS;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn expression(&mut self) -> Result<Expr, ParseError> {
        self.assignment()
    }

    /// Parse assignment (right-associative)
    fn assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.logic_or()?;

        if let Some(equals) = self.match_token(&[TokenKind::Equal]) {
            let value = self.nested(Self::assignment)?;

            return match expr {
                Expr::Variable(VariableExpr { name }) => Ok(Expr::Assignment(AssignmentExpr {
                    target: name,
                    value: Box::new(value),
                })),
                // Not fatal: keep the left side and carry on without synchronizing
                other => {
                    self.record(ParseError::at(&equals, "Invalid assignment target."));
                    Ok(other)
                }
            };
        }

        Ok(expr)
    }

    /// Parse logical OR (`or`)
    fn logic_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.logic_and()?;

        while let Some(operator) = self.match_token(&[TokenKind::Or]) {
            let right = self.logic_and()?;
            left = Expr::logical(left, operator, right);
        }

        Ok(left)
    }

    /// Parse logical AND (`and`)
    fn logic_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.equality()?;

        while let Some(operator) = self.match_token(&[TokenKind::And]) {
            let right = self.equality()?;
            left = Expr::logical(left, operator, right);
        }

        Ok(left)
    }

    /// Parse equality (== !=)
    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.comparison()?;

        while let Some(operator) =
            self.match_token(&[TokenKind::BangEqual, TokenKind::EqualEqual])
        {
            let right = self.comparison()?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse comparison (< <= > >=)
    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.term()?;

        while let Some(operator) = self.match_token(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let right = self.term()?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.factor()?;

        while let Some(operator) = self.match_token(&[TokenKind::Minus, TokenKind::Plus]) {
            let right = self.factor()?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.unary()?;

        while let Some(operator) = self.match_token(&[TokenKind::Slash, TokenKind::Star]) {
            let right = self.unary()?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse prefix unary operators (! -)
    fn unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(operator) = self.match_token(&[TokenKind::Bang, TokenKind::Minus]) {
            let operand = self.nested(Self::unary)?;
            return Ok(Expr::unary(operator, operand));
        }

        self.call()
    }

    /// Parse call chains: `callee(args)(args)...`
    fn call(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;

        while self.match_token(&[TokenKind::LeftParen]).is_some() {
            expr = self.finish_call(expr)?;
        }

        Ok(expr)
    }

    /// Parse argument list after `(`, through the closing `)`
    fn finish_call(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() == MAX_CALL_ARGUMENTS {
                    let error = self.error_at_current(&format!(
                        "Can't have more than {} arguments.",
                        MAX_CALL_ARGUMENTS
                    ));
                    self.record(error);
                }

                arguments.push(self.nested(Self::expression)?);

                if self.match_token(&[TokenKind::Comma]).is_none() {
                    break;
                }
            }
        }

        let closing_paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call(CallExpr {
            callee: Box::new(callee),
            arguments,
            closing_paren,
        }))
    }

    /// Parse primary expressions (literals, identifiers, parenthesized)
    fn primary(&mut self) -> Result<Expr, ParseError> {
        if let Some(value) = self.match_token(&[
            TokenKind::False,
            TokenKind::True,
            TokenKind::Nil,
            TokenKind::Number,
            TokenKind::String,
        ]) {
            return Ok(Expr::Literal(LiteralExpr { value }));
        }

        if let Some(name) = self.match_token(&[TokenKind::Identifier]) {
            return Ok(Expr::Variable(VariableExpr { name }));
        }

        if self.match_token(&[TokenKind::LeftParen]).is_some() {
            let inner = self.nested(Self::expression)?;
            self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(GroupingExpr {
                inner: Box::new(inner),
            }));
        }

        Err(self.error_at_current("Expect expression."))
    }
}
