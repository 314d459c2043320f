// Grammar constants for the parser

use crate::parser::lexer::TokenKind;

/// Maximum number of arguments accepted in a single call expression
pub const MAX_CALL_ARGUMENTS: usize = 255;

/// Keywords that begin a new statement.
/// Synchronization stops in front of any of these.
pub const SYNC_KEYWORDS: &[TokenKind] = &[
    TokenKind::Class,
    TokenKind::Fun,
    TokenKind::Var,
    TokenKind::For,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Print,
    TokenKind::Return,
];

/// Maximum depth of nested groupings, unary operators, assignments, call
/// arguments, blocks and `if` statements. Each level costs several stack
/// frames, so unbounded nesting would overflow the stack.
pub const MAX_NESTING_DEPTH: usize = 64;
