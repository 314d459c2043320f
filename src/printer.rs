//! Parenthesized tree printer
//!
//! [`AstPrinter`] is the reference [`ExprVisitor`]/[`StmtVisitor`]
//! implementation. It renders any subtree as a fully parenthesized string
//! `(label child1 child2 ...)`, which makes precedence and associativity
//! visible at a glance. The output is for debugging and golden tests; it is
//! not valid source syntax.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::visitor::{ExprVisitor, StmtVisitor};

/// Renders expressions and statements as parenthesized text
#[derive(Debug, Default, Clone, Copy)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        AstPrinter
    }

    /// Render one expression; an absent expression renders as `""`
    pub fn print(&mut self, expr: Option<&Expr>) -> String {
        match expr {
            Some(expr) => expr.accept(self),
            None => String::new(),
        }
    }

    /// Render each top-level statement in order, concatenated
    pub fn print_program(&mut self, statements: &[Stmt]) -> String {
        statements.iter().map(|stmt| stmt.accept(self)).collect()
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = format!("({name}");
        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out.push(')');
        out
    }
}

impl ExprVisitor for AstPrinter {
    type Output = String;

    fn visit_binary(&mut self, expr: &BinaryExpr) -> String {
        self.parenthesize(&expr.operator.lexeme, &[expr.left.as_ref(), expr.right.as_ref()])
    }

    fn visit_grouping(&mut self, expr: &GroupingExpr) -> String {
        self.parenthesize("group", &[expr.inner.as_ref()])
    }

    fn visit_unary(&mut self, expr: &UnaryExpr) -> String {
        self.parenthesize(&expr.operator.lexeme, &[expr.operand.as_ref()])
    }

    fn visit_literal(&mut self, expr: &LiteralExpr) -> String {
        let token = &expr.value;
        match (token.kind, &token.literal) {
            (TokenKind::True | TokenKind::False | TokenKind::Nil, _) => token.lexeme.clone(),
            (_, Some(value)) => value.to_string(),
            (_, None) => token.lexeme.clone(),
        }
    }

    fn visit_variable(&mut self, expr: &VariableExpr) -> String {
        format!("var {}", expr.name.lexeme)
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpr) -> String {
        format!(
            "ass {}",
            self.parenthesize(&expr.target.lexeme, &[expr.value.as_ref()])
        )
    }

    fn visit_logical(&mut self, expr: &LogicalExpr) -> String {
        self.parenthesize(&expr.operator.lexeme, &[expr.left.as_ref(), expr.right.as_ref()])
    }

    fn visit_call(&mut self, expr: &CallExpr) -> String {
        let mut children: Vec<&Expr> = vec![expr.callee.as_ref()];
        children.extend(expr.arguments.iter());
        self.parenthesize("call", &children)
    }
}

impl StmtVisitor for AstPrinter {
    type Output = String;

    fn visit_expression_stmt(&mut self, stmt: &ExpressionStmt) -> String {
        self.parenthesize("stmt", &[&stmt.expr])
    }

    fn visit_print_stmt(&mut self, stmt: &PrintStmt) -> String {
        self.parenthesize("print", &[&stmt.expr])
    }

    fn visit_var_stmt(&mut self, stmt: &VarStmt) -> String {
        match &stmt.initializer {
            Some(init) => format!("(var {} = {})", stmt.name.lexeme, init.accept(self)),
            None => format!("(var {})", stmt.name.lexeme),
        }
    }

    fn visit_block_stmt(&mut self, stmt: &BlockStmt) -> String {
        format!("{{ {} }}", self.print_program(&stmt.statements))
    }

    fn visit_if_stmt(&mut self, stmt: &IfStmt) -> String {
        let condition = self.parenthesize("if", &[&stmt.condition]);
        let then_branch = stmt.then_branch.accept(self);
        let mut out = format!("{condition}, {{\n{then_branch}\n}}");

        if let Some(else_branch) = &stmt.else_branch {
            let else_branch = else_branch.accept(self);
            out.push_str(&format!(" else {{\n{else_branch}\n}}"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::SourceLocation;
    use crate::parser::lexer::{LiteralValue, Token};

    fn token(kind: TokenKind, lexeme: &str, literal: Option<LiteralValue>) -> Token {
        Token::new(kind, lexeme, literal, SourceLocation::new(1, 1))
    }

    fn number(n: f64, lexeme: &str) -> Expr {
        Expr::Literal(LiteralExpr {
            value: token(TokenKind::Number, lexeme, Some(LiteralValue::Number(n))),
        })
    }

    #[test]
    fn test_print_absent_expression() {
        assert_eq!(AstPrinter::new().print(None), "");
    }

    #[test]
    fn test_print_empty_program() {
        assert_eq!(AstPrinter::new().print_program(&[]), "");
    }

    #[test]
    fn test_hand_built_tree() {
        // -123 * (45.67)
        let expr = Expr::binary(
            Expr::unary(token(TokenKind::Minus, "-", None), number(123.0, "123")),
            token(TokenKind::Star, "*", None),
            Expr::Grouping(GroupingExpr {
                inner: Box::new(number(45.67, "45.67")),
            }),
        );

        assert_eq!(
            AstPrinter::new().print(Some(&expr)),
            "(* (- 123.0) (group 45.67))"
        );
    }

    #[test]
    fn test_keyword_literals_use_lexeme() {
        let mut printer = AstPrinter::new();
        for (kind, lexeme) in [
            (TokenKind::True, "true"),
            (TokenKind::False, "false"),
            (TokenKind::Nil, "nil"),
        ] {
            let expr = Expr::Literal(LiteralExpr {
                value: token(kind, lexeme, None),
            });
            assert_eq!(printer.print(Some(&expr)), lexeme);
        }
    }

    #[test]
    fn test_string_literal_prints_contents() {
        let expr = Expr::Literal(LiteralExpr {
            value: token(
                TokenKind::String,
                "\"hello\"",
                Some(LiteralValue::Str("hello".into())),
            ),
        });
        assert_eq!(AstPrinter::new().print(Some(&expr)), "hello");
    }

    #[test]
    fn test_var_without_initializer() {
        let stmt = Stmt::Var(VarStmt {
            name: token(TokenKind::Identifier, "a", None),
            initializer: None,
        });
        assert_eq!(AstPrinter::new().print_program(&[stmt]), "(var a)");
    }
}
