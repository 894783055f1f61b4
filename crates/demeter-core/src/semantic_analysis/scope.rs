// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Resolved lexical scopes.
//!
//! **DDD Context:** Semantic Analysis
//!
//! The front end that builds the syntax tree also resolves which variable
//! declarations belong to which lexical scope. Passes in this crate only read
//! the result. Scopes are stored in an arena ([`ScopeTree`]) and refer to
//! their parent by [`ScopeId`], so a tree node can name its enclosing scope
//! without borrowing it.
//!
//! Scopes nest as:
//! - Class (fields)
//! - Method (parameters), parent is the class scope
//! - Local (block declarations), parent is a method scope or another local scope

use std::collections::HashMap;

use ecow::EcoString;
use index_vec::IndexVec;

index_vec::define_index_type! {
    /// Handle to a scope inside a [`ScopeTree`].
    pub struct ScopeId = u32;
}

/// The level a scope lives at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeLevel {
    /// Block-local declarations.
    Local,
    /// Method parameters.
    Method,
    /// Class fields.
    Class,
}

/// A type the front end resolved to a fully qualified name.
///
/// Opaque to the rule except for equality against well-known types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedType(EcoString);

impl ResolvedType {
    #[must_use]
    pub fn new(qualified_name: impl Into<EcoString>) -> Self {
        Self(qualified_name.into())
    }

    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.0
    }
}

/// A declared variable (local, parameter or field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub name: EcoString,
    /// The type as written in source, e.g. `Iterator<String>`.
    pub declared_type_name: EcoString,
    /// The resolved type, when the front end could determine it.
    pub resolved_type: Option<ResolvedType>,
}

impl VariableDeclaration {
    #[must_use]
    pub fn new(name: impl Into<EcoString>, declared_type_name: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            declared_type_name: declared_type_name.into(),
            resolved_type: None,
        }
    }

    #[must_use]
    pub fn with_resolved_type(mut self, resolved: ResolvedType) -> Self {
        self.resolved_type = Some(resolved);
        self
    }
}

/// One lexical scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub kind: ScopeLevel,
    pub parent: Option<ScopeId>,
    declarations: HashMap<EcoString, VariableDeclaration>,
}

impl Scope {
    /// Looks up a declaration made directly in this scope.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VariableDeclaration> {
        self.declarations.get(name)
    }

    /// All declarations made directly in this scope.
    #[must_use]
    pub fn declarations(&self) -> &HashMap<EcoString, VariableDeclaration> {
        &self.declarations
    }
}

/// Arena of all scopes of one analysis unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeTree {
    scopes: IndexVec<ScopeId, Scope>,
}

impl ScopeTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scope and returns its handle.
    pub fn push(&mut self, kind: ScopeLevel, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope {
            kind,
            parent,
            declarations: HashMap::new(),
        })
    }

    /// Declares a variable directly in `scope`.
    ///
    /// A later declaration of the same name in the same scope replaces the
    /// earlier one. Returns `false` if `scope` is not part of this tree.
    pub fn declare(&mut self, scope: ScopeId, declaration: VariableDeclaration) -> bool {
        let Some(target) = self.scopes.get_mut(scope) else {
            return false;
        };
        target
            .declarations
            .insert(declaration.name.clone(), declaration);
        true
    }

    #[must_use]
    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Declarations made directly in `id`.
    #[must_use]
    pub fn declarations_in_scope(&self, id: ScopeId) -> Option<&HashMap<EcoString, VariableDeclaration>> {
        self.get(id).map(Scope::declarations)
    }

    #[must_use]
    pub fn parent_scope(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).and_then(|scope| scope.parent)
    }

    /// The nearest scope of `kind`, starting at `id` itself and walking out.
    #[must_use]
    pub fn enclosing_of_kind(&self, id: ScopeId, kind: ScopeLevel) -> Option<ScopeId> {
        self.ancestors(id)
            .find(|(_, scope)| scope.kind == kind)
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn enclosing_method_scope(&self, id: ScopeId) -> Option<ScopeId> {
        self.enclosing_of_kind(id, ScopeLevel::Method)
    }

    #[must_use]
    pub fn enclosing_class_scope(&self, id: ScopeId) -> Option<ScopeId> {
        self.enclosing_of_kind(id, ScopeLevel::Class)
    }

    /// Iterates `id` and then each parent in turn.
    ///
    /// Stops at a dangling handle and after visiting as many scopes as the
    /// tree holds, so a malformed parent cycle cannot loop forever.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = (ScopeId, &Scope)> + '_ {
        let mut next = Some(id);
        std::iter::from_fn(move || {
            let current = next?;
            let scope = self.get(current)?;
            next = scope.parent;
            Some((current, scope))
        })
        .take(self.scopes.len())
    }
}
