//! Lexer (tokenizer) for script source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The stream always ends with exactly one [`TokenKind::Eof`] token.

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Semicolon,

    // Operators (single and multi-character)
    Minus,
    Plus,
    Slash,
    Star,
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    // End of file
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Slash => "SLASH",
            TokenKind::Star => "STAR",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::Fun => "FUN",
            TokenKind::For => "FOR",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// Semantic value carried by a number or string token. Keyword literals
/// (`true`, `false`, `nil`) carry none and are read from their lexeme.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    Str(String),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral numbers keep a trailing ".0" so they read as floats
            LiteralValue::Number(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{n:.1}"),
            LiteralValue::Number(n) => write!(f, "{n}"),
            LiteralValue::Str(s) => f.write_str(s),
        }
    }
}

/// A lexical token. Immutable once produced; the parser only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<LiteralValue>,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Option<LiteralValue>,
        location: SourceLocation,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            location,
        }
    }

    /// End-of-input sentinel
    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, "", None, location)
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}

/// `KIND lexeme literal`, with `null` for tokens without a literal.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.kind, self.lexeme, literal),
            None => write!(f, "{} {} null", self.kind, self.lexeme),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {}] Error: {message}", .location.line)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        [
            ("and", TokenKind::And),
            ("class", TokenKind::Class),
            ("else", TokenKind::Else),
            ("false", TokenKind::False),
            ("for", TokenKind::For),
            ("fun", TokenKind::Fun),
            ("if", TokenKind::If),
            ("nil", TokenKind::Nil),
            ("or", TokenKind::Or),
            ("print", TokenKind::Print),
            ("return", TokenKind::Return),
            ("super", TokenKind::Super),
            ("this", TokenKind::This),
            ("true", TokenKind::True),
            ("var", TokenKind::Var),
            ("while", TokenKind::While),
        ]
        .into_iter()
        .collect()
    })
}

/// Lexer for script source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                tokens.push(Token::eof(self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        tracing::trace!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let start = self.position;
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        let kind = match ch {
            '"' => return self.string_literal(start, loc),
            '0'..='9' => return self.number_literal(start, loc),
            'a'..='z' | 'A'..='Z' | '_' => return Ok(self.identifier_or_keyword(start, loc)),

            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            '/' => TokenKind::Slash,
            '*' => TokenKind::Star,
            '!' => self.either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '>' => self.either('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '<' => self.either('=', TokenKind::LessEqual, TokenKind::Less),

            _ => {
                return Err(LexError {
                    message: format!("Unexpected character: {}", ch),
                    location: loc,
                })
            }
        };

        Ok(Token::new(kind, self.lexeme_from(start), None, loc))
    }

    /// Pick the two-character kind if `next` follows, consuming it
    fn either(&mut self, next: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some(next) {
            self.advance();
            matched
        } else {
            single
        }
    }

    /// Parse string literal (may span lines, no escape sequences)
    fn string_literal(&mut self, start: usize, loc: SourceLocation) -> Result<Token, LexError> {
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some(ch) => value.push(ch),
                None => {
                    return Err(LexError {
                        message: "Unterminated string.".to_string(),
                        location: loc,
                    });
                }
            }
        }

        Ok(Token::new(
            TokenKind::String,
            self.lexeme_from(start),
            Some(LiteralValue::Str(value)),
            loc,
        ))
    }

    /// Parse numeric literal: digits with an optional fractional part
    fn number_literal(&mut self, start: usize, loc: SourceLocation) -> Result<Token, LexError> {
        self.skip_digits();

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume '.'
            self.skip_digits();
        }

        let text = self.lexeme_from(start);
        let value = text.parse::<f64>().map_err(|_| LexError {
            message: format!("Invalid number literal: {}", text),
            location: loc,
        })?;

        Ok(Token::new(
            TokenKind::Number,
            text,
            Some(LiteralValue::Number(value)),
            loc,
        ))
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, start: usize, loc: SourceLocation) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = self.lexeme_from(start);
        let kind = keywords()
            .get(text.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);

        Token::new(kind, text, None, loc)
    }

    /// Skip whitespace and `//` comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    self.skip_line_comment();
                }
                _ => break,
            }
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    fn lexeme_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
