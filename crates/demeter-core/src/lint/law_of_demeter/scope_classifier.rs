// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Resolves where a call-site's receiver comes from.
//!
//! Names are probed innermost first: block-local declarations (through every
//! enclosing local scope), then method parameters, then class fields. A name
//! that matches nothing is classified by its shape alone.

use std::fmt;

use crate::config::LawOfDemeterConfig;
use crate::semantic_analysis::{ScopeId, ScopeLevel, ScopeTree, VariableDeclaration};

use super::call_chain::Receiver;

/// The provenance category of a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Declared in the enclosing block or an enclosing block of it.
    Local,
    /// A parameter of the enclosing method.
    Method,
    /// A field of the enclosing class, or `this`/`super`.
    Class,
    /// The result of the previous call in the chain.
    MethodChaining,
    /// A qualified name that resolves to no variable, e.g. `Util.CONST`.
    StaticChain,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Local => "local",
            Self::Method => "method",
            Self::Class => "class",
            Self::MethodChaining => "method-chaining",
            Self::StaticChain => "static-chain",
        };
        f.write_str(name)
    }
}

/// The outcome of classifying one receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'s> {
    /// `None` for unresolvable receivers, which are never judged.
    pub scope: Option<ScopeKind>,
    /// The declaration the receiver resolved to, if any.
    pub declaration: Option<&'s VariableDeclaration>,
}

impl Resolution<'_> {
    const fn unresolved(scope: Option<ScopeKind>) -> Self {
        Self {
            scope,
            declaration: None,
        }
    }
}

/// Classify `receiver` as seen from the scope `at`.
#[must_use]
pub fn classify_receiver<'s>(
    receiver: &Receiver,
    at: ScopeId,
    scopes: &'s ScopeTree,
    config: &LawOfDemeterConfig,
) -> Resolution<'s> {
    if let Receiver::Named(name) = receiver {
        if let Some(declaration) = find_in_local_scopes(name, at, scopes) {
            return Resolution {
                scope: Some(ScopeKind::Local),
                declaration: Some(declaration),
            };
        }
        if let Some(declaration) = find_in(scopes.enclosing_method_scope(at), name, scopes) {
            return Resolution {
                scope: Some(ScopeKind::Method),
                declaration: Some(declaration),
            };
        }
        if let Some(declaration) = find_in(scopes.enclosing_class_scope(at), name, scopes) {
            return Resolution {
                scope: Some(ScopeKind::Class),
                declaration: Some(declaration),
            };
        }
        tracing::trace!(%name, "receiver matches no declaration");
    }

    match receiver {
        Receiver::PreviousCall => Resolution::unresolved(Some(ScopeKind::MethodChaining)),
        Receiver::This | Receiver::Super => Resolution::unresolved(Some(ScopeKind::Class)),
        Receiver::Named(name) if name.contains('.') && !config.is_exempt_static(name) => {
            Resolution::unresolved(Some(ScopeKind::StaticChain))
        }
        // Most likely a static method call on a class name.
        Receiver::Named(_) | Receiver::Unknown => Resolution::unresolved(None),
    }
}

/// Search `at` and each enclosing local scope, stopping at the first non-local one.
fn find_in_local_scopes<'s>(
    name: &str,
    at: ScopeId,
    scopes: &'s ScopeTree,
) -> Option<&'s VariableDeclaration> {
    scopes
        .ancestors(at)
        .take_while(|(_, scope)| scope.kind == ScopeLevel::Local)
        .find_map(|(_, scope)| scope.get(name))
}

fn find_in<'s>(
    scope: Option<ScopeId>,
    name: &str,
    scopes: &'s ScopeTree,
) -> Option<&'s VariableDeclaration> {
    scopes.get(scope?)?.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        scopes: ScopeTree,
        inner_block: ScopeId,
    }

    /// class { field: Helper } → method(param: Param) → block { outer: Foo } → block { inner: Bar }
    fn fixture() -> Fixture {
        let mut scopes = ScopeTree::new();
        let class = scopes.push(ScopeLevel::Class, None);
        let method = scopes.push(ScopeLevel::Method, Some(class));
        let outer_block = scopes.push(ScopeLevel::Local, Some(method));
        let inner_block = scopes.push(ScopeLevel::Local, Some(outer_block));
        scopes.declare(class, VariableDeclaration::new("field", "Helper"));
        scopes.declare(class, VariableDeclaration::new("shadowed", "FromClass"));
        scopes.declare(method, VariableDeclaration::new("param", "Param"));
        scopes.declare(outer_block, VariableDeclaration::new("outer", "Foo"));
        scopes.declare(outer_block, VariableDeclaration::new("shadowed", "FromBlock"));
        scopes.declare(inner_block, VariableDeclaration::new("inner", "Bar"));
        Fixture {
            scopes,
            inner_block,
        }
    }

    fn classify<'s>(fx: &'s Fixture, receiver: &Receiver) -> Resolution<'s> {
        classify_receiver(
            receiver,
            fx.inner_block,
            &fx.scopes,
            &LawOfDemeterConfig::default(),
        )
    }

    fn named(name: &str) -> Receiver {
        Receiver::Named(name.into())
    }

    #[test]
    fn local_lookup_walks_enclosing_blocks() {
        let fx = fixture();
        let inner = classify(&fx, &named("inner"));
        let outer = classify(&fx, &named("outer"));
        assert_eq!(inner.scope, Some(ScopeKind::Local));
        assert_eq!(outer.scope, Some(ScopeKind::Local));
        assert_eq!(outer.declaration.unwrap().declared_type_name, "Foo");
    }

    #[test]
    fn parameters_and_fields_resolve_to_their_levels() {
        let fx = fixture();
        assert_eq!(classify(&fx, &named("param")).scope, Some(ScopeKind::Method));
        let field = classify(&fx, &named("field"));
        assert_eq!(field.scope, Some(ScopeKind::Class));
        assert_eq!(field.declaration.unwrap().declared_type_name, "Helper");
    }

    #[test]
    fn innermost_declaration_wins() {
        let fx = fixture();
        let resolution = classify(&fx, &named("shadowed"));
        assert_eq!(resolution.scope, Some(ScopeKind::Local));
        assert_eq!(
            resolution.declaration.unwrap().declared_type_name,
            "FromBlock"
        );
    }

    #[test]
    fn unresolved_receivers_classify_by_shape() {
        let fx = fixture();
        assert_eq!(
            classify(&fx, &Receiver::PreviousCall).scope,
            Some(ScopeKind::MethodChaining)
        );
        assert_eq!(classify(&fx, &Receiver::This).scope, Some(ScopeKind::Class));
        assert_eq!(classify(&fx, &Receiver::Super).scope, Some(ScopeKind::Class));
        assert_eq!(
            classify(&fx, &named("Util.CONST")).scope,
            Some(ScopeKind::StaticChain)
        );
        assert_eq!(classify(&fx, &named("Math")).scope, None);
        assert_eq!(classify(&fx, &Receiver::Unknown).scope, None);
    }

    #[test]
    fn platform_output_stream_is_exempt() {
        let fx = fixture();
        let resolution = classify(&fx, &named("System.out"));
        assert_eq!(resolution.scope, None);
        assert!(resolution.declaration.is_none());
    }

    #[test]
    fn dotted_field_path_is_static_chain() {
        let fx = fixture();
        assert_eq!(
            classify(&fx, &named("field.inner")).scope,
            Some(ScopeKind::StaticChain)
        );
    }

    #[test]
    fn dangling_scope_degrades_to_shape_rules() {
        let fx = fixture();
        let resolution = classify_receiver(
            &named("outer"),
            ScopeId::from_usize(42),
            &fx.scopes,
            &LawOfDemeterConfig::default(),
        );
        assert_eq!(resolution.scope, None);
    }

    #[test]
    fn scope_kind_display_names() {
        assert_eq!(ScopeKind::MethodChaining.to_string(), "method-chaining");
        assert_eq!(ScopeKind::StaticChain.to_string(), "static-chain");
    }
}
