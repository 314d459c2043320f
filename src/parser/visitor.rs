//! Visitor capability sets for walking the AST
//!
//! Any component that processes the tree (printer, evaluator, resolver)
//! implements [`ExprVisitor`] and [`StmtVisitor`] instead of matching on node
//! types itself. [`Expr::accept`] and [`Stmt::accept`] perform the double
//! dispatch: the node picks the method for its own variant, the visitor
//! supplies the behavior.
//!
//! Both traits have one method per variant and no defaults, so a new visitor
//! that misses a variant does not compile. `Output` lets evaluators return
//! `Result`s while the printer returns plain `String`s.

use crate::parser::ast::*;

/// One method per expression variant
pub trait ExprVisitor {
    type Output;

    fn visit_binary(&mut self, expr: &BinaryExpr) -> Self::Output;
    fn visit_grouping(&mut self, expr: &GroupingExpr) -> Self::Output;
    fn visit_unary(&mut self, expr: &UnaryExpr) -> Self::Output;
    fn visit_literal(&mut self, expr: &LiteralExpr) -> Self::Output;
    fn visit_variable(&mut self, expr: &VariableExpr) -> Self::Output;
    fn visit_assignment(&mut self, expr: &AssignmentExpr) -> Self::Output;
    fn visit_logical(&mut self, expr: &LogicalExpr) -> Self::Output;
    fn visit_call(&mut self, expr: &CallExpr) -> Self::Output;
}

/// One method per statement variant
pub trait StmtVisitor {
    type Output;

    fn visit_expression_stmt(&mut self, stmt: &ExpressionStmt) -> Self::Output;
    fn visit_print_stmt(&mut self, stmt: &PrintStmt) -> Self::Output;
    fn visit_var_stmt(&mut self, stmt: &VarStmt) -> Self::Output;
    fn visit_block_stmt(&mut self, stmt: &BlockStmt) -> Self::Output;
    fn visit_if_stmt(&mut self, stmt: &IfStmt) -> Self::Output;
}

impl Expr {
    pub fn accept<V: ExprVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Binary(expr) => visitor.visit_binary(expr),
            Expr::Grouping(expr) => visitor.visit_grouping(expr),
            Expr::Unary(expr) => visitor.visit_unary(expr),
            Expr::Literal(expr) => visitor.visit_literal(expr),
            Expr::Variable(expr) => visitor.visit_variable(expr),
            Expr::Assignment(expr) => visitor.visit_assignment(expr),
            Expr::Logical(expr) => visitor.visit_logical(expr),
            Expr::Call(expr) => visitor.visit_call(expr),
        }
    }
}

impl Stmt {
    pub fn accept<V: StmtVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Stmt::Expression(stmt) => visitor.visit_expression_stmt(stmt),
            Stmt::Print(stmt) => visitor.visit_print_stmt(stmt),
            Stmt::Var(stmt) => visitor.visit_var_stmt(stmt),
            Stmt::Block(stmt) => visitor.visit_block_stmt(stmt),
            Stmt::If(stmt) => visitor.visit_if_stmt(stmt),
        }
    }
}
