// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared syntax tree walker for lint passes.
//!
//! **DDD Context:** Compilation
//!
//! Provides pre-order traversals used by lint passes:
//!
//! - [`for_each_method`]: every method of every class in a unit, nested classes included.
//! - [`walk_block`] / [`walk_statement`] / [`walk_expression`]: pre-order
//!   recursive walks calling a visitor closure on every [`Node`].
//! - [`primary_expressions`], [`variable_declarators`], [`assignments`]:
//!   the descendant-of-kind queries passes ask most often.
//!
//! Lambda bodies are walked as part of the enclosing method. Nested class
//! declarations are not reachable from statements; [`for_each_method`]
//! visits their methods separately.

use crate::ast::{
    AssignmentOperator, Block, ClassDeclaration, CompilationUnit, Expression, LambdaBody,
    MethodDeclaration, PrimaryExpression, PrimaryPrefix, PrimarySuffix, Statement,
    VariableDeclarator,
};

/// A node handed to walker visitors.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Statement(&'a Statement),
    Declarator(&'a VariableDeclarator),
    Expression(&'a Expression),
}

// ── Unit-level iterators ──────────────────────────────────────────────────────

/// Calls `f` once for each method declaration in the unit, outer classes first.
pub fn for_each_method<'a, F>(unit: &'a CompilationUnit, mut f: F)
where
    F: FnMut(&'a ClassDeclaration, &'a MethodDeclaration),
{
    fn visit_class<'a, F>(class: &'a ClassDeclaration, f: &mut F)
    where
        F: FnMut(&'a ClassDeclaration, &'a MethodDeclaration),
    {
        for method in &class.methods {
            f(class, method);
        }
        for nested in &class.nested_classes {
            visit_class(nested, f);
        }
    }

    for class in &unit.classes {
        visit_class(class, &mut f);
    }
}

// ── Tree walkers ──────────────────────────────────────────────────────────────

/// Walks every statement of `block` in pre-order.
pub fn walk_block<'a, F>(block: &'a Block, f: &mut F)
where
    F: FnMut(Node<'a>),
{
    for statement in &block.statements {
        walk_statement(statement, f);
    }
}

/// Recursively walks a statement in pre-order, calling `f` on every node.
pub fn walk_statement<'a, F>(statement: &'a Statement, f: &mut F)
where
    F: FnMut(Node<'a>),
{
    f(Node::Statement(statement));
    match statement {
        Statement::LocalVariable(decl) => {
            for declarator in &decl.declarators {
                f(Node::Declarator(declarator));
                if let Some(init) = &declarator.initializer {
                    walk_expression(init, f);
                }
            }
        }
        Statement::Expression(expr) => walk_expression(expr, f),
        Statement::Block(block) => walk_block(block, f),
        Statement::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            walk_expression(condition, f);
            walk_statement(then_branch, f);
            if let Some(else_branch) = else_branch {
                walk_statement(else_branch, f);
            }
        }
        Statement::While {
            condition, body, ..
        } => {
            walk_expression(condition, f);
            walk_statement(body, f);
        }
        Statement::DoWhile {
            body, condition, ..
        } => {
            walk_statement(body, f);
            walk_expression(condition, f);
        }
        Statement::For {
            init,
            condition,
            update,
            body,
            ..
        } => {
            for stmt in init {
                walk_statement(stmt, f);
            }
            if let Some(condition) = condition {
                walk_expression(condition, f);
            }
            for expr in update {
                walk_expression(expr, f);
            }
            walk_statement(body, f);
        }
        Statement::ForEach { iterable, body, .. } => {
            walk_expression(iterable, f);
            walk_statement(body, f);
        }
        Statement::Return { value, .. } => {
            if let Some(value) = value {
                walk_expression(value, f);
            }
        }
        Statement::Throw { value, .. } => walk_expression(value, f),
        Statement::Try {
            body,
            catches,
            finally,
            ..
        } => {
            walk_block(body, f);
            for catch in catches {
                walk_block(&catch.body, f);
            }
            if let Some(finally) = finally {
                walk_block(finally, f);
            }
        }
        Statement::Switch {
            selector, cases, ..
        } => {
            walk_expression(selector, f);
            for case in cases {
                for label in &case.labels {
                    walk_expression(label, f);
                }
                for stmt in &case.body {
                    walk_statement(stmt, f);
                }
            }
        }
        Statement::Synchronized { lock, body, .. } => {
            walk_expression(lock, f);
            walk_block(body, f);
        }
        // Leaf statements, nothing to recurse into.
        Statement::Break { .. } | Statement::Continue { .. } | Statement::Empty { .. } => {}
    }
}

/// Recursively walks an expression tree in pre-order, calling `f` on every node.
///
/// The visitor is called on the current node **before** recursing into its children.
pub fn walk_expression<'a, F>(expr: &'a Expression, f: &mut F)
where
    F: FnMut(Node<'a>),
{
    f(Node::Expression(expr));
    match expr {
        Expression::Primary(primary) => walk_primary_children(primary, f),
        Expression::Assignment { target, value, .. } => {
            walk_expression(target, f);
            walk_expression(value, f);
        }
        Expression::Binary { left, right, .. } => {
            walk_expression(left, f);
            walk_expression(right, f);
        }
        Expression::Unary { operand, .. } => walk_expression(operand, f),
        Expression::Conditional {
            condition,
            then_value,
            else_value,
            ..
        } => {
            walk_expression(condition, f);
            walk_expression(then_value, f);
            walk_expression(else_value, f);
        }
        Expression::Cast { expression, .. } | Expression::InstanceOf { expression, .. } => {
            walk_expression(expression, f);
        }
        Expression::Lambda { body, .. } => match body {
            LambdaBody::Expression(expr) => walk_expression(expr, f),
            LambdaBody::Block(block) => walk_block(block, f),
        },
    }
}

/// Walks the sub-expressions of a primary expression (not the expression itself).
pub fn walk_primary_children<'a, F>(primary: &'a PrimaryExpression, f: &mut F)
where
    F: FnMut(Node<'a>),
{
    match &primary.prefix {
        PrimaryPrefix::Parenthesized(inner) => walk_expression(inner, f),
        PrimaryPrefix::Allocation(allocation) => {
            for arg in allocation
                .arguments
                .iter()
                .chain(allocation.array_dimensions.iter())
            {
                walk_expression(arg, f);
            }
        }
        PrimaryPrefix::Name(_)
        | PrimaryPrefix::This
        | PrimaryPrefix::Super
        | PrimaryPrefix::Literal(_) => {}
    }
    for suffix in &primary.suffixes {
        match suffix {
            PrimarySuffix::Arguments(args) => {
                for arg in args {
                    walk_expression(arg, f);
                }
            }
            PrimarySuffix::Index(index) => walk_expression(index, f),
            PrimarySuffix::Member(_) => {}
        }
    }
}

// ── Descendant queries ────────────────────────────────────────────────────────

/// Every primary expression in `block`, in pre-order, nested ones included.
#[must_use]
pub fn primary_expressions(block: &Block) -> Vec<&PrimaryExpression> {
    let mut found = Vec::new();
    walk_block(block, &mut |node| {
        if let Node::Expression(Expression::Primary(primary)) = node {
            found.push(primary);
        }
    });
    found
}

/// Every variable declarator in `block`, in pre-order.
#[must_use]
pub fn variable_declarators(block: &Block) -> Vec<&VariableDeclarator> {
    let mut found = Vec::new();
    walk_block(block, &mut |node| {
        if let Node::Declarator(declarator) = node {
            found.push(declarator);
        }
    });
    found
}

/// An assignment expression borrowed out of the tree.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentRef<'a> {
    pub target: &'a Expression,
    pub operator: &'a AssignmentOperator,
    pub value: &'a Expression,
    pub expression: &'a Expression,
}

/// Every assignment expression in `block`, in pre-order, compound ones included.
#[must_use]
pub fn assignments(block: &Block) -> Vec<AssignmentRef<'_>> {
    let mut found = Vec::new();
    walk_block(block, &mut |node| {
        let Node::Expression(expression) = node else {
            return;
        };
        if let Expression::Assignment {
            target,
            operator,
            value,
            ..
        } = expression
        {
            found.push(AssignmentRef {
                target,
                operator,
                value,
                expression,
            });
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::TreeBuilder;

    #[test]
    fn primary_expressions_include_nested_arguments() {
        let unit = TreeBuilder::method_unit(&[], &[], |b, body| {
            let inner = b.call(body, "x.y", Vec::new());
            let outer = b.call(body, "a.b", vec![inner]);
            vec![b.expression_statement(outer)]
        });
        let method = &unit.compilation_unit.classes[0].methods[0];
        let found = primary_expressions(method.body.as_ref().unwrap());

        let names: Vec<_> = found
            .iter()
            .map(|p| match &p.prefix {
                PrimaryPrefix::Name(name) => name.as_str(),
                _ => "?",
            })
            .collect();
        assert_eq!(names, ["a.b", "x.y"]);
    }

    #[test]
    fn declarators_and_assignments_are_collected_from_nested_statements() {
        let unit = TreeBuilder::method_unit(&[], &[], |b, body| {
            let inner = b.block_scope(body);
            let init = b.call(inner, "getFoo", Vec::new());
            let decl = b.local(inner, "f", "Foo", Some(init));
            let value = b.call(inner, "getFoo", Vec::new());
            let assign = b.assign(inner, "f", value);
            let one = b.int(inner, 1);
            let compound = b.compound_assign(inner, "n", "+=", one);
            let nested = b.block(inner, vec![decl, assign, compound]);
            let condition = b.name(body, "flag");
            vec![b.if_statement(condition, nested)]
        });
        let body = unit.compilation_unit.classes[0].methods[0]
            .body
            .as_ref()
            .unwrap();

        assert_eq!(variable_declarators(body).len(), 1);
        let found = assignments(body);
        assert_eq!(found.len(), 2);
        assert!(found[0].operator.is_plain());
        assert!(!found[1].operator.is_plain());
    }

    #[test]
    fn for_each_method_visits_nested_classes() {
        let mut b = TreeBuilder::new();
        let outer_scope = b.class_scope();
        let inner_scope = b.class_scope();
        let outer_method = b.empty_method(outer_scope, "outer");
        let inner_method = b.empty_method(inner_scope, "inner");
        let inner = b.class("Inner", inner_scope, vec![inner_method], Vec::new());
        let outer = b.class("Outer", outer_scope, vec![outer_method], vec![inner]);
        let unit = b.finish(vec![outer]);

        let mut seen = Vec::new();
        for_each_method(&unit.compilation_unit, |class, method| {
            seen.push(format!("{}.{}", class.name.name, method.name.name));
        });
        assert_eq!(seen, ["Outer.outer", "Inner.inner"]);
    }
}
