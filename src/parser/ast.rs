// AST (Abstract Syntax Tree) definitions for the scripting language

use crate::parser::lexer::Token;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Binary arithmetic/comparison: `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

/// Parenthesized expression
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub inner: Box<Expr>,
}

/// Prefix `!` or `-`
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub operand: Box<Expr>,
}

/// Literal value. Keeps the whole token so consumers can tell
/// `true`/`false`/`nil` apart from numbers and strings.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Token,
}

/// Reference to a previously declared binding
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub name: Token,
}

/// `target = value`. Whether `target` exists is checked at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: Token,
    pub value: Box<Expr>,
}

/// Short-circuiting `and` / `or`
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

/// Function call. `closing_paren` is kept for error locations.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub closing_paren: Token,
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(BinaryExpr),
    Grouping(GroupingExpr),
    Unary(UnaryExpr),
    Literal(LiteralExpr),
    Variable(VariableExpr),
    Assignment(AssignmentExpr),
    Logical(LogicalExpr),
    Call(CallExpr),
}

impl Expr {
    /// Get the source location most closely associated with this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Binary(expr) => expr.operator.location,
            Expr::Grouping(expr) => expr.inner.location(),
            Expr::Unary(expr) => expr.operator.location,
            Expr::Literal(expr) => expr.value.location,
            Expr::Variable(expr) => expr.name.location,
            Expr::Assignment(expr) => expr.target.location,
            Expr::Logical(expr) => expr.operator.location,
            Expr::Call(expr) => expr.closing_paren.location,
        }
    }

    pub(crate) fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub(crate) fn logical(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Logical(LogicalExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub(crate) fn unary(operator: Token, operand: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            operator,
            operand: Box::new(operand),
        })
    }
}

/// `expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expr: Expr,
}

/// `print expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expr: Expr,
}

/// `var name [= initializer];`
#[derive(Debug, Clone, PartialEq)]
pub struct VarStmt {
    pub name: Token,
    pub initializer: Option<Expr>,
}

/// `{ declaration* }`
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
}

/// `if (condition) then_branch [else else_branch]`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Print(PrintStmt),
    Var(VarStmt),
    Block(BlockStmt),
    If(IfStmt),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn parse(source: &str) -> Expr {
        Parser::from_source(source)
            .unwrap()
            .parse_expression()
            .value
            .unwrap()
    }

    #[test]
    fn test_location_points_at_operator_or_name() {
        assert_eq!(parse("1 +\n2").location(), SourceLocation::new(1, 3));
        assert_eq!(parse("  -x").location(), SourceLocation::new(1, 3));
        assert_eq!(parse("count = 1").location(), SourceLocation::new(1, 1));
        assert_eq!(parse("a or b").location(), SourceLocation::new(1, 3));
    }

    #[test]
    fn test_grouping_location_is_inner_location() {
        assert_eq!(parse("((\n  7))").location(), SourceLocation::new(2, 3));
    }

    #[test]
    fn test_call_location_is_closing_paren() {
        assert_eq!(parse("f(1,\n2)").location(), SourceLocation::new(2, 2));
    }
}
