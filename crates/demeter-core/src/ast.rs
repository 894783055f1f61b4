// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Syntax tree definitions for Java-like compilation units.
//!
//! The tree arrives fully parsed and scope-resolved: every block, method and
//! class names its [`ScopeId`] in the unit's [`ScopeTree`], and every primary
//! expression names the scope it was written in. Every node carries a
//! [`Location`].
//!
//! # Primary expressions
//!
//! Member access and calls are flattened the way Java grammars do it: a
//! leading [`PrimaryPrefix`] followed by a list of [`PrimarySuffix`]es.
//!
//! ```text
//! a.b().c()   =>  prefix: Name("a.b")
//!                 suffixes: [Arguments([]), Member(c), Arguments([])]
//!
//! this.run(x) =>  prefix: This
//!                 suffixes: [Member(run), Arguments([x])]
//! ```

use ecow::EcoString;

use crate::semantic_analysis::{ScopeId, ScopeTree};
use crate::source_analysis::{Location, Span};

/// A compilation unit together with the scopes its nodes refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisUnit {
    pub compilation_unit: CompilationUnit,
    pub scopes: ScopeTree,
}

impl AnalysisUnit {
    #[must_use]
    pub fn new(compilation_unit: CompilationUnit, scopes: ScopeTree) -> Self {
        Self {
            compilation_unit,
            scopes,
        }
    }
}

/// Top-level container: the classes of one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub classes: Vec<ClassDeclaration>,
    pub span: Span,
}

/// An identifier with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: EcoString,
    pub location: Location,
}

impl Identifier {
    #[must_use]
    pub fn new(name: impl Into<EcoString>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub name: Identifier,
    pub fields: Vec<FieldDeclaration>,
    pub methods: Vec<MethodDeclaration>,
    pub nested_classes: Vec<ClassDeclaration>,
    /// The class scope holding the fields.
    pub scope: ScopeId,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    pub type_name: EcoString,
    pub declarators: Vec<VariableDeclarator>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    /// `None` for abstract and interface methods.
    pub body: Option<Block>,
    /// The method scope holding the parameters.
    pub scope: ScopeId,
    pub location: Location,
}

/// A formal parameter, catch parameter, or for-each variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: Identifier,
    pub type_name: EcoString,
}

/// A `{ ... }` block with its own local scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub scope: ScopeId,
    pub location: Location,
}

/// `Type a = x, b;`
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariableDeclaration {
    pub type_name: EcoString,
    pub declarators: Vec<VariableDeclarator>,
    pub location: Location,
}

/// One `name [= initializer]` of a variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub name: Identifier,
    pub initializer: Option<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub parameter: Parameter,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Empty for `default:`.
    pub labels: Vec<Expression>,
    pub body: Vec<Statement>,
    pub location: Location,
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    LocalVariable(LocalVariableDeclaration),
    Expression(Expression),
    Block(Block),
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
        location: Location,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
        location: Location,
    },
    DoWhile {
        body: Box<Statement>,
        condition: Expression,
        location: Location,
    },
    For {
        init: Vec<Statement>,
        condition: Option<Expression>,
        update: Vec<Expression>,
        body: Box<Statement>,
        location: Location,
    },
    ForEach {
        variable: Parameter,
        iterable: Expression,
        body: Box<Statement>,
        location: Location,
    },
    Return {
        value: Option<Expression>,
        location: Location,
    },
    Throw {
        value: Expression,
        location: Location,
    },
    Try {
        body: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
        location: Location,
    },
    Switch {
        selector: Expression,
        cases: Vec<SwitchCase>,
        location: Location,
    },
    Synchronized {
        lock: Expression,
        body: Block,
        location: Location,
    },
    Break {
        location: Location,
    },
    Continue {
        location: Location,
    },
    Empty {
        location: Location,
    },
}

impl Statement {
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::LocalVariable(decl) => decl.location,
            Self::Expression(expr) => expr.location(),
            Self::Block(block) => block.location,
            Self::If { location, .. }
            | Self::While { location, .. }
            | Self::DoWhile { location, .. }
            | Self::For { location, .. }
            | Self::ForEach { location, .. }
            | Self::Return { location, .. }
            | Self::Throw { location, .. }
            | Self::Try { location, .. }
            | Self::Switch { location, .. }
            | Self::Synchronized { location, .. }
            | Self::Break { location }
            | Self::Continue { location }
            | Self::Empty { location } => *location,
        }
    }
}

/// `=` or a compound operator such as `+=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    Compound(EcoString),
}

impl AssignmentOperator {
    #[must_use]
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Assign)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expression(Box<Expression>),
    Block(Block),
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Primary(PrimaryExpression),
    Assignment {
        target: Box<Expression>,
        operator: AssignmentOperator,
        value: Box<Expression>,
        location: Location,
    },
    Binary {
        left: Box<Expression>,
        operator: EcoString,
        right: Box<Expression>,
        location: Location,
    },
    Unary {
        operator: EcoString,
        operand: Box<Expression>,
        location: Location,
    },
    Conditional {
        condition: Box<Expression>,
        then_value: Box<Expression>,
        else_value: Box<Expression>,
        location: Location,
    },
    Cast {
        type_name: EcoString,
        expression: Box<Expression>,
        location: Location,
    },
    InstanceOf {
        expression: Box<Expression>,
        type_name: EcoString,
        location: Location,
    },
    Lambda {
        parameters: Vec<Identifier>,
        body: LambdaBody,
        location: Location,
    },
}

impl Expression {
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::Primary(primary) => primary.location,
            Self::Assignment { location, .. }
            | Self::Binary { location, .. }
            | Self::Unary { location, .. }
            | Self::Conditional { location, .. }
            | Self::Cast { location, .. }
            | Self::InstanceOf { location, .. }
            | Self::Lambda { location, .. } => *location,
        }
    }

    /// Returns true if an object or array construction appears anywhere in
    /// this expression.
    #[must_use]
    pub fn contains_allocation(&self) -> bool {
        let mut found = false;
        crate::ast_walker::walk_expression(self, &mut |node| {
            if let crate::ast_walker::Node::Expression(Expression::Primary(primary)) = node {
                found |= primary.prefix.is_allocation();
            }
        });
        found
    }
}

/// A prefix followed by member selections, calls and index operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryExpression {
    pub prefix: PrimaryPrefix,
    pub suffixes: Vec<PrimarySuffix>,
    /// The innermost scope the expression was written in.
    pub scope: ScopeId,
    pub location: Location,
}

impl PrimaryExpression {
    /// Returns true if an object or array construction appears anywhere in
    /// this expression, arguments included.
    #[must_use]
    pub fn contains_allocation(&self) -> bool {
        if self.prefix.is_allocation() {
            return true;
        }
        let mut found = false;
        crate::ast_walker::walk_primary_children(self, &mut |node| {
            if let crate::ast_walker::Node::Expression(Expression::Primary(primary)) = node {
                found |= primary.prefix.is_allocation();
            }
        });
        found
    }

    /// Returns true if any suffix is an argument list, i.e. something is invoked.
    #[must_use]
    pub fn has_invocation(&self) -> bool {
        self.suffixes.iter().any(PrimarySuffix::is_arguments)
    }

    /// Returns true if this is exactly the bare name `name`, with no suffixes.
    #[must_use]
    pub fn is_plain_name(&self, name: &str) -> bool {
        self.suffixes.is_empty() && matches!(&self.prefix, PrimaryPrefix::Name(n) if n == name)
    }
}

/// The leading part of a primary expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryPrefix {
    /// A possibly qualified name, e.g. `a`, `a.b`, `System.out.println`.
    Name(EcoString),
    This,
    Super,
    Literal(Literal),
    Parenthesized(Box<Expression>),
    Allocation(Box<Allocation>),
}

impl PrimaryPrefix {
    #[must_use]
    pub fn is_this(&self) -> bool {
        matches!(self, Self::This)
    }

    #[must_use]
    pub fn is_super(&self) -> bool {
        matches!(self, Self::Super)
    }

    #[must_use]
    pub fn is_allocation(&self) -> bool {
        matches!(self, Self::Allocation(_))
    }
}

/// A trailing part of a primary expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimarySuffix {
    /// `.name`
    Member(Identifier),
    /// `(args)`
    Arguments(Vec<Expression>),
    /// `[index]`
    Index(Box<Expression>),
}

impl PrimarySuffix {
    #[must_use]
    pub fn is_arguments(&self) -> bool {
        matches!(self, Self::Arguments(_))
    }
}

/// `new Type(args)` or `new Type[dims]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub type_name: EcoString,
    pub arguments: Vec<Expression>,
    pub array_dimensions: Vec<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(EcoString),
    Character(char),
    Boolean(bool),
    Null,
}
