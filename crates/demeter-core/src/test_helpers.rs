// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared test helpers for use in demeter-core and dependent crate tests.
//!
//! [`TreeBuilder`] stands in for the front end: it hands out scopes,
//! records declarations, and gives every node a unique [`Location`].
//! Nodes built before a statement share that statement's line; each
//! statement builder moves to the next line, so statements built later
//! always sit on later lines.

use crate::ast::{
    Allocation, AnalysisUnit, AssignmentOperator, Block, ClassDeclaration, CompilationUnit,
    Expression, FieldDeclaration, Identifier, LambdaBody, Literal, LocalVariableDeclaration,
    MethodDeclaration, Parameter, PrimaryExpression, PrimaryPrefix, PrimarySuffix, Statement,
    VariableDeclarator,
};
use crate::semantic_analysis::{ResolvedType, ScopeId, ScopeLevel, ScopeTree, VariableDeclaration};
use crate::source_analysis::{Location, Span};

/// Builds syntax trees and their scope arena for tests.
#[derive(Debug)]
pub struct TreeBuilder {
    scopes: ScopeTree,
    line: u32,
    offset: u32,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: ScopeTree::new(),
            line: 1,
            offset: 0,
        }
    }

    /// Builds a unit with one class `Subject` holding `fields` and one method
    /// `run(params)` whose body statements come from `body`.
    ///
    /// `body` receives the builder and the body's local scope.
    pub fn method_unit<F>(fields: &[(&str, &str)], params: &[(&str, &str)], body: F) -> AnalysisUnit
    where
        F: FnOnce(&mut Self, ScopeId) -> Vec<Statement>,
    {
        let mut b = Self::new();
        let class_scope = b.class_scope();
        let fields: Vec<_> = fields
            .iter()
            .map(|(name, type_name)| b.field(class_scope, name, type_name))
            .collect();
        let method_scope = b.method_scope(class_scope);
        let params: Vec<_> = params
            .iter()
            .map(|(name, type_name)| b.parameter(method_scope, name, type_name))
            .collect();
        let body_scope = b.block_scope(method_scope);
        let statements = body(&mut b, body_scope);
        let body = b.body(body_scope, statements);
        let method = b.method(method_scope, "run", params, Some(body));
        let mut class = b.class("Subject", class_scope, vec![method], Vec::new());
        class.fields = fields;
        b.finish(vec![class])
    }

    /// The line the next statement will be placed on.
    #[must_use]
    pub fn current_line(&self) -> u32 {
        self.line
    }

    fn location(&mut self) -> Location {
        let start = self.offset;
        self.offset += 2;
        Location::new(self.line, Span::new(start, start + 1))
    }

    fn statement_location(&mut self) -> Location {
        let location = self.location();
        self.line += 1;
        location
    }

    fn ident(&mut self, name: &str) -> Identifier {
        let location = self.location();
        Identifier::new(name, location)
    }

    // ── Scopes ────────────────────────────────────────────────────────────

    pub fn class_scope(&mut self) -> ScopeId {
        self.scopes.push(ScopeLevel::Class, None)
    }

    pub fn method_scope(&mut self, class: ScopeId) -> ScopeId {
        self.scopes.push(ScopeLevel::Method, Some(class))
    }

    pub fn block_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(ScopeLevel::Local, Some(parent))
    }

    pub fn declare(&mut self, scope: ScopeId, name: &str, type_name: &str) {
        self.scopes
            .declare(scope, VariableDeclaration::new(name, type_name));
    }

    pub fn declare_resolved(&mut self, scope: ScopeId, name: &str, type_name: &str, resolved: &str) {
        self.scopes.declare(
            scope,
            VariableDeclaration::new(name, type_name).with_resolved_type(ResolvedType::new(resolved)),
        );
    }

    // ── Expressions ───────────────────────────────────────────────────────

    pub fn primary(
        &mut self,
        scope: ScopeId,
        prefix: PrimaryPrefix,
        suffixes: Vec<PrimarySuffix>,
    ) -> Expression {
        let location = self.location();
        Expression::Primary(PrimaryExpression {
            prefix,
            suffixes,
            scope,
            location,
        })
    }

    /// A bare (possibly qualified) name, e.g. `f` or `Util.CONST`.
    pub fn name(&mut self, scope: ScopeId, name: &str) -> Expression {
        self.primary(scope, PrimaryPrefix::Name(name.into()), Vec::new())
    }

    /// `name(args)`, where `name` may be qualified: `f.bar(args)`.
    pub fn call(&mut self, scope: ScopeId, name: &str, args: Vec<Expression>) -> Expression {
        self.primary(
            scope,
            PrimaryPrefix::Name(name.into()),
            vec![PrimarySuffix::Arguments(args)],
        )
    }

    /// `name().c1().c2()...` with empty argument lists.
    pub fn call_chain(&mut self, scope: ScopeId, name: &str, chained: &[&str]) -> Expression {
        let mut suffixes = vec![PrimarySuffix::Arguments(Vec::new())];
        for method in chained {
            suffixes.push(self.member(method));
            suffixes.push(PrimarySuffix::Arguments(Vec::new()));
        }
        self.primary(scope, PrimaryPrefix::Name(name.into()), suffixes)
    }

    /// `this.method(args)`
    pub fn this_call(&mut self, scope: ScopeId, method: &str, args: Vec<Expression>) -> Expression {
        let member = self.member(method);
        self.primary(
            scope,
            PrimaryPrefix::This,
            vec![member, PrimarySuffix::Arguments(args)],
        )
    }

    /// `super.method(args)`
    pub fn super_call(&mut self, scope: ScopeId, method: &str, args: Vec<Expression>) -> Expression {
        let member = self.member(method);
        self.primary(
            scope,
            PrimaryPrefix::Super,
            vec![member, PrimarySuffix::Arguments(args)],
        )
    }

    /// `new Type(args)`
    pub fn new_object(&mut self, scope: ScopeId, type_name: &str, args: Vec<Expression>) -> Expression {
        let location = self.location();
        let allocation = Allocation {
            type_name: type_name.into(),
            arguments: args,
            array_dimensions: Vec::new(),
            location,
        };
        self.primary(scope, PrimaryPrefix::Allocation(Box::new(allocation)), Vec::new())
    }

    pub fn int(&mut self, scope: ScopeId, value: i64) -> Expression {
        self.primary(scope, PrimaryPrefix::Literal(Literal::Integer(value)), Vec::new())
    }

    pub fn string(&mut self, scope: ScopeId, value: &str) -> Expression {
        self.primary(
            scope,
            PrimaryPrefix::Literal(Literal::String(value.into())),
            Vec::new(),
        )
    }

    /// `(inner)` followed by `suffixes`.
    pub fn parenthesized(
        &mut self,
        scope: ScopeId,
        inner: Expression,
        suffixes: Vec<PrimarySuffix>,
    ) -> Expression {
        self.primary(scope, PrimaryPrefix::Parenthesized(Box::new(inner)), suffixes)
    }

    pub fn member(&mut self, name: &str) -> PrimarySuffix {
        PrimarySuffix::Member(self.ident(name))
    }

    pub fn binary(&mut self, left: Expression, operator: &str, right: Expression) -> Expression {
        let location = self.location();
        Expression::Binary {
            left: Box::new(left),
            operator: operator.into(),
            right: Box::new(right),
            location,
        }
    }

    /// `(params) -> body`
    pub fn lambda(&mut self, params: &[&str], body: Expression) -> Expression {
        let parameters = params.iter().map(|p| self.ident(p)).collect();
        let location = self.location();
        Expression::Lambda {
            parameters,
            body: LambdaBody::Expression(Box::new(body)),
            location,
        }
    }

    // ── Statements ────────────────────────────────────────────────────────

    /// `type_name name [= init];`, declaring `name` in `scope`.
    pub fn local(
        &mut self,
        scope: ScopeId,
        name: &str,
        type_name: &str,
        init: Option<Expression>,
    ) -> Statement {
        self.declare(scope, name, type_name);
        self.local_statement(name, type_name, init)
    }

    /// Like [`Self::local`], recording a resolved type for the declaration.
    pub fn local_resolved(
        &mut self,
        scope: ScopeId,
        name: &str,
        type_name: &str,
        resolved: &str,
        init: Option<Expression>,
    ) -> Statement {
        self.declare_resolved(scope, name, type_name, resolved);
        self.local_statement(name, type_name, init)
    }

    fn local_statement(&mut self, name: &str, type_name: &str, init: Option<Expression>) -> Statement {
        let ident = self.ident(name);
        let declarator = VariableDeclarator {
            name: ident,
            initializer: init,
            location: self.location(),
        };
        Statement::LocalVariable(LocalVariableDeclaration {
            type_name: type_name.into(),
            declarators: vec![declarator],
            location: self.statement_location(),
        })
    }

    /// `name = value;`
    pub fn assign(&mut self, scope: ScopeId, name: &str, value: Expression) -> Statement {
        self.assignment(scope, name, AssignmentOperator::Assign, value)
    }

    /// `name <op> value;`, e.g. `n += 1;`
    pub fn compound_assign(
        &mut self,
        scope: ScopeId,
        name: &str,
        operator: &str,
        value: Expression,
    ) -> Statement {
        self.assignment(scope, name, AssignmentOperator::Compound(operator.into()), value)
    }

    fn assignment(
        &mut self,
        scope: ScopeId,
        name: &str,
        operator: AssignmentOperator,
        value: Expression,
    ) -> Statement {
        let target = self.name(scope, name);
        let location = self.statement_location();
        Statement::Expression(Expression::Assignment {
            target: Box::new(target),
            operator,
            value: Box::new(value),
            location,
        })
    }

    pub fn expression_statement(&mut self, expr: Expression) -> Statement {
        self.line += 1;
        Statement::Expression(expr)
    }

    /// A nested `{ ... }` block owning `scope`.
    pub fn block(&mut self, scope: ScopeId, statements: Vec<Statement>) -> Statement {
        Statement::Block(self.body(scope, statements))
    }

    fn body(&mut self, scope: ScopeId, statements: Vec<Statement>) -> Block {
        Block {
            statements,
            scope,
            location: self.location(),
        }
    }

    pub fn if_statement(&mut self, condition: Expression, then_branch: Statement) -> Statement {
        let location = self.statement_location();
        Statement::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: None,
            location,
        }
    }

    /// `for (type_name name : iterable) body`, declaring `name` in `body_scope`.
    pub fn for_each(
        &mut self,
        body_scope: ScopeId,
        name: &str,
        type_name: &str,
        iterable: Expression,
        statements: Vec<Statement>,
    ) -> Statement {
        self.declare(body_scope, name, type_name);
        let variable = Parameter {
            name: self.ident(name),
            type_name: type_name.into(),
        };
        let body = self.block(body_scope, statements);
        let location = self.statement_location();
        Statement::ForEach {
            variable,
            iterable,
            body: Box::new(body),
            location,
        }
    }

    pub fn return_statement(&mut self, value: Option<Expression>) -> Statement {
        let location = self.statement_location();
        Statement::Return { value, location }
    }

    // ── Declarations ──────────────────────────────────────────────────────

    /// `type_name name;` as a field, declaring `name` in the class scope.
    pub fn field(&mut self, class_scope: ScopeId, name: &str, type_name: &str) -> FieldDeclaration {
        self.declare(class_scope, name, type_name);
        let declarator = VariableDeclarator {
            name: self.ident(name),
            initializer: None,
            location: self.location(),
        };
        FieldDeclaration {
            type_name: type_name.into(),
            declarators: vec![declarator],
            location: self.statement_location(),
        }
    }

    /// A formal parameter, declared in the method scope.
    pub fn parameter(&mut self, method_scope: ScopeId, name: &str, type_name: &str) -> Parameter {
        self.declare(method_scope, name, type_name);
        Parameter {
            name: self.ident(name),
            type_name: type_name.into(),
        }
    }

    pub fn method(
        &mut self,
        method_scope: ScopeId,
        name: &str,
        parameters: Vec<Parameter>,
        body: Option<Block>,
    ) -> MethodDeclaration {
        MethodDeclaration {
            name: self.ident(name),
            parameters,
            body,
            scope: method_scope,
            location: self.statement_location(),
        }
    }

    /// A method with an empty body nested in `class_scope`.
    pub fn empty_method(&mut self, class_scope: ScopeId, name: &str) -> MethodDeclaration {
        let method_scope = self.method_scope(class_scope);
        let body_scope = self.block_scope(method_scope);
        let body = self.body(body_scope, Vec::new());
        self.method(method_scope, name, Vec::new(), Some(body))
    }

    /// A method whose body is built by `statements` in a fresh local scope.
    pub fn method_with_body<F>(&mut self, class_scope: ScopeId, name: &str, statements: F) -> MethodDeclaration
    where
        F: FnOnce(&mut Self, ScopeId) -> Vec<Statement>,
    {
        let method_scope = self.method_scope(class_scope);
        let body_scope = self.block_scope(method_scope);
        let statements = statements(self, body_scope);
        let body = self.body(body_scope, statements);
        self.method(method_scope, name, Vec::new(), Some(body))
    }

    pub fn class(
        &mut self,
        name: &str,
        scope: ScopeId,
        methods: Vec<MethodDeclaration>,
        nested_classes: Vec<ClassDeclaration>,
    ) -> ClassDeclaration {
        ClassDeclaration {
            name: self.ident(name),
            fields: Vec::new(),
            methods,
            nested_classes,
            scope,
            location: self.statement_location(),
        }
    }

    #[must_use]
    pub fn finish(self, classes: Vec<ClassDeclaration>) -> AnalysisUnit {
        let span = Span::new(0, self.offset);
        AnalysisUnit::new(CompilationUnit { classes, span }, self.scopes)
    }

    /// The scope arena built so far.
    #[must_use]
    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }
}
