//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, cursor helpers, error recovery and both parse entry
//! points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Parsing `var` declarations and the recovery boundary
//! - `statements`: Parsing statements (if, print, blocks, expression statements)
//! - `expressions`: Parsing expressions, one method per precedence level
//!
//! # Error Recovery
//!
//! Parsing methods return `Result<_, ParseError>` and unwind with `?`. The
//! unwinding stops at the nearest declaration: the error is recorded, the
//! parser synchronizes to the next statement boundary, and the broken
//! declaration is dropped. Callers always receive the statements that did
//! parse together with every recorded error.

use crate::parser::ast::*;
use crate::parser::constants::{MAX_NESTING_DEPTH, SYNC_KEYWORDS};
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Where a syntax error was detected
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSite {
    /// The offending token
    Token(Token),
    /// The error occurred at end of input
    End { location: SourceLocation },
}

impl ErrorSite {
    pub fn location(&self) -> SourceLocation {
        match self {
            ErrorSite::Token(token) => token.location,
            ErrorSite::End { location } => *location,
        }
    }
}

impl fmt::Display for ErrorSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSite::Token(token) => write!(f, "at '{}'", token.lexeme),
            ErrorSite::End { .. } => f.write_str("at end"),
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {}] Error {site}: {message}", .site.location().line)]
pub struct ParseError {
    pub site: ErrorSite,
    pub message: String,
}

impl ParseError {
    /// Build an error pointing at `token`, or at end of input for `EOF`
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        let site = if token.kind == TokenKind::Eof {
            ErrorSite::End {
                location: token.location,
            }
        } else {
            ErrorSite::Token(token.clone())
        };

        Self {
            site,
            message: message.into(),
        }
    }

    pub fn location(&self) -> SourceLocation {
        self.site.location()
    }
}

/// Parser behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// Treat a missing `;` after an expression statement like every other
    /// missing token: record, synchronize and drop the statement. When
    /// false the error is recorded, the statement is kept and the tokens up
    /// to the next statement boundary are skipped.
    pub strict_semicolons: bool,
}

impl ParserConfig {
    pub fn strict() -> Self {
        Self {
            strict_semicolons: true,
        }
    }
}

/// Output of a parse: the (possibly partial) result plus all syntax errors
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub errors: Vec<ParseError>,
}

impl<T> Parsed<T> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Transform the value, keeping the errors
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            errors: self.errors,
        }
    }

    /// Discard the partial result if any error was recorded
    pub fn into_result(self) -> Result<T, Vec<ParseError>> {
        if self.errors.is_empty() {
            Ok(self.value)
        } else {
            Err(self.errors)
        }
    }
}

/// Recursive descent parser for the scripting language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) errors: Vec<ParseError>,
    pub(crate) config: ParserConfig,
    /// Current nesting depth (guards against stack overflow)
    pub(crate) depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(mut tokens: Vec<Token>, config: ParserConfig) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            warn!("token stream has no EOF sentinel, appending one");
            let location = tokens.last().map(|t| t.location).unwrap_or_default();
            tokens.push(Token::eof(location));
        }

        Self {
            tokens,
            position: 0,
            errors: Vec::new(),
            config,
            depth: 0,
        }
    }

    /// Tokenize `source` and build a parser over the result
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::new(tokens))
    }

    /// Parse a single expression
    pub fn parse_expression(&mut self) -> Parsed<Option<Expr>> {
        let value = match self.expression() {
            Ok(expr) => Some(expr),
            Err(error) => {
                self.record(error);
                None
            }
        };

        debug!(errors = self.errors.len(), "parsed expression");
        Parsed {
            value,
            errors: std::mem::take(&mut self.errors),
        }
    }

    /// Parse the entire program (a sequence of declarations)
    pub fn parse_program(&mut self) -> Parsed<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        Parsed {
            value: statements,
            errors: std::mem::take(&mut self.errors),
        }
    }

    // ===== Error recovery =====

    pub(crate) fn record(&mut self, error: ParseError) {
        debug!(%error, "syntax error");
        self.errors.push(error);
    }

    /// Record the error of a failed declaration and skip to the next
    /// statement boundary
    pub(crate) fn recover<T>(&mut self, result: Result<T, ParseError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.record(error);
                self.synchronize();
                None
            }
        }
    }

    /// Discard the offending token, then stop just after a `;`, in front of
    /// a statement keyword, or at end of input
    pub(crate) fn synchronize(&mut self) {
        let start = self.position;
        self.advance();

        while !self.is_at_end() {
            if self
                .previous()
                .is_some_and(|t| t.kind == TokenKind::Semicolon)
            {
                break;
            }

            if SYNC_KEYWORDS.contains(&self.peek().kind) {
                break;
            }

            self.advance();
        }

        trace!(skipped = self.position - start, "synchronized");
    }

    /// Run `parse` one nesting level deeper, failing once the depth passes
    /// [`MAX_NESTING_DEPTH`]. The depth is restored on every exit path.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            warn!(depth = self.depth, "nesting limit reached");
            return Err(self.error_at_current("Expression nesting is too deep."));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ===== Helper methods =====

    /// Consume the current token if it has one of `kinds`
    pub(crate) fn match_token(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance().cloned()
        } else {
            None
        }
    }

    /// Never true at end of input
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Move past the current token. At end of input this is a no-op that
    /// keeps returning the last consumed token.
    pub(crate) fn advance(&mut self) -> Option<&Token> {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// `None` until the first token has been consumed
    pub(crate) fn previous(&self) -> Option<&Token> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    pub(crate) fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        match self.match_token(&[kind]) {
            Some(token) => Ok(token),
            None => Err(self.error_at_current(message)),
        }
    }

    pub(crate) fn error_at_current(&self, message: &str) -> ParseError {
        ParseError::at(self.peek(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(source: &str) -> Parser {
        Parser::from_source(source).unwrap()
    }

    #[test]
    fn test_previous_before_first_token() {
        let parser = parser("print 1;");
        assert!(parser.previous().is_none());
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut parser = parser("x");

        assert_eq!(parser.advance().map(|t| t.lexeme.clone()), Some("x".into()));
        assert!(parser.is_at_end());

        for _ in 0..3 {
            let prev = parser.advance().map(|t| t.kind);
            assert_eq!(prev, Some(TokenKind::Identifier));
        }
        assert_eq!(parser.position, 1);
    }

    #[test]
    fn test_advance_on_empty_stream() {
        let mut parser = Parser::new(Vec::new());

        assert!(parser.is_at_end());
        assert!(parser.advance().is_none());
        assert_eq!(parser.position, 0);
    }

    #[test]
    fn test_missing_eof_is_appended() {
        let tokens = vec![Token::new(
            TokenKind::Number,
            "7",
            Some(crate::parser::lexer::LiteralValue::Number(7.0)),
            SourceLocation::new(3, 1),
        )];
        let mut parser = Parser::new(tokens);

        assert_eq!(parser.tokens.len(), 2);
        assert_eq!(parser.tokens[1].kind, TokenKind::Eof);
        assert_eq!(parser.tokens[1].location.line, 3);

        let parsed = parser.parse_expression();
        assert!(parsed.value.is_some());
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn test_check_is_false_at_end() {
        let parser = parser("");
        assert!(!parser.check(TokenKind::Eof));
    }

    #[test]
    fn test_synchronize_stops_after_semicolon() {
        let mut parser = parser("a b c; d");
        parser.synchronize();

        assert_eq!(parser.peek().lexeme, "d");
    }

    #[test]
    fn test_synchronize_stops_before_keyword() {
        let mut parser = parser("a b print c;");
        parser.synchronize();

        assert_eq!(parser.peek().kind, TokenKind::Print);
    }

    #[test]
    fn test_synchronize_always_discards_current_token() {
        // Even a statement keyword under the cursor is skipped
        let mut parser = parser("var var");
        parser.synchronize();

        assert_eq!(parser.position, 1);
        assert_eq!(parser.peek().kind, TokenKind::Var);
    }

    #[test]
    fn test_error_display() {
        let parsed = parser("var ;").parse_program();
        assert_eq!(
            parsed.errors[0].to_string(),
            "[line 1] Error at ';': Expect variable name."
        );

        let parsed = parser("(1").parse_expression();
        assert_eq!(
            parsed.errors[0].to_string(),
            "[line 1] Error at end: Expect ')' after expression."
        );
        assert!(matches!(parsed.errors[0].site, ErrorSite::End { .. }));
    }

    #[test]
    fn test_nesting_limit_boundary() {
        let at_limit = format!(
            "{}1{}",
            "(".repeat(MAX_NESTING_DEPTH),
            ")".repeat(MAX_NESTING_DEPTH)
        );
        let mut shallow = parser(&at_limit);
        let parsed = shallow.parse_expression();
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        assert_eq!(shallow.depth, 0);

        let depth = MAX_NESTING_DEPTH + 1;
        let past_limit = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let mut deep = parser(&past_limit);
        let parsed = deep.parse_expression();
        assert!(parsed.value.is_none());
        assert_eq!(
            parsed.errors[0].to_string(),
            "[line 1] Error at '1': Expression nesting is too deep."
        );
        assert_eq!(deep.depth, 0);
    }

    #[test]
    fn test_parsed_map_keeps_errors() {
        let parsed = parser("1 +").parse_expression();
        assert!(parsed.has_errors());

        let mapped = parsed.map(|expr| expr.is_some());
        assert!(!mapped.value);
        assert_eq!(mapped.errors.len(), 1);
        assert!(mapped.has_errors());

        let clean = parser("2").parse_expression().map(|expr| expr.is_some());
        assert!(clean.value);
        assert!(!clean.has_errors());
    }

    #[test]
    fn test_into_result() {
        let ok = parser("1 + 1").parse_expression().into_result();
        assert!(matches!(ok, Ok(Some(_))));

        let err = parser("1 +").parse_expression().into_result();
        assert_eq!(err.unwrap_err().len(), 1);
    }
}
