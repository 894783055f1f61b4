// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint: warn when a method talks to strangers (Law of Demeter).
//!
//! **DDD Context:** Compilation
//!
//! A method may call methods on itself, its parameters, its fields, and on
//! objects it created. Anything else couples it to the structure of its
//! collaborators:
//!
//! ```text
//! // Bad: three kinds of coupling
//! Foo f = registry.lookup();   // (parameter call, allowed)
//! f.bar();                     // object not created locally
//! a.b().c();                   // method chain calls (on `.c`)
//! Util.CONST.doSomething();    // static property access
//!
//! // Good
//! Foo f = new Foo();
//! f.bar();
//! System.out.println(msg);     // platform output is exempt
//! ```
//!
//! Every primary expression of every method body, nested ones included, is
//! split into call-sites ([`call_chain`]); each receiver is resolved against
//! the scope chain ([`scope_classifier`]); block-local receivers are traced to
//! their last write ([`assignment_history`]); and [`verdict`] decides.

pub mod assignment_history;
pub mod call_chain;
pub mod scope_classifier;
pub mod verdict;


use std::fmt;

use ecow::{EcoString, eco_format};
use serde::Serialize;

use crate::ast::{AnalysisUnit, Block, MethodDeclaration, PrimaryExpression};
use crate::ast_walker::{for_each_method, primary_expressions};
use crate::config::LawOfDemeterConfig;
use crate::lint::LintPass;
use crate::semantic_analysis::ScopeTree;
use crate::source_analysis::{Diagnostic, DiagnosticCategory, Location};

use self::assignment_history::{Provenance, governing_assignment};
use self::call_chain::{Receiver, extract_call_chain};
use self::scope_classifier::{ScopeKind, classify_receiver};
use self::verdict::{ViolationReason, classify};

/// One fully classified call-site.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite<'a> {
    /// The primary expression the call-site was extracted from.
    pub expression: &'a PrimaryExpression,
    pub receiver: Receiver,
    pub method_name: Option<EcoString>,
    pub base_scope: Option<ScopeKind>,
    /// Declared type of the receiver, when it resolved to a declaration.
    pub base_type_name: Option<EcoString>,
    /// Only computed for block-local receivers.
    pub provenance: Option<Provenance>,
    pub reason: Option<ViolationReason>,
}

impl CallSite<'_> {
    #[must_use]
    pub fn is_violation(&self) -> bool {
        self.reason.is_some()
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.expression.location
    }
}

impl fmt::Display for CallSite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}.{}",
            self.location(),
            self.receiver,
            self.method_name.as_deref().unwrap_or("<none>")
        )?;
        if let Some(type_name) = &self.base_type_name {
            write!(f, " type={type_name}")?;
        }
        match self.base_scope {
            Some(scope) => write!(f, " scope={scope}")?,
            None => f.write_str(" scope=<unresolved>")?,
        }
        if let Some(record) = self.provenance.as_ref().and_then(Provenance::record) {
            write!(f, " assigned@{}", record.source_line())?;
            if record.is_local_allocation {
                f.write_str(" allocation")?;
            }
            if record.is_iterator_result {
                f.write_str(" iterator")?;
            }
        }
        match self.reason {
            Some(reason) => write!(f, " => violation ({reason})"),
            None => f.write_str(" => ok"),
        }
    }
}

/// Classify the call-sites of one primary expression.
///
/// `body` is the enclosing method body; `None` means the tree is incomplete,
/// in which case block-local receivers are conservatively reported.
#[must_use]
pub fn analyze_call_sites<'a>(
    expression: &'a PrimaryExpression,
    body: Option<&Block>,
    scopes: &ScopeTree,
    config: &LawOfDemeterConfig,
) -> Vec<CallSite<'a>> {
    extract_call_chain(expression)
        .into_iter()
        .map(|shape| {
            let resolution = classify_receiver(&shape.receiver, expression.scope, scopes, config);
            let provenance = match (&shape.receiver, resolution.scope) {
                (Receiver::Named(name), Some(ScopeKind::Local)) => Some(governing_assignment(
                    name,
                    resolution.declaration,
                    body,
                    config,
                )),
                _ => None,
            };
            let reason = classify(resolution.scope, provenance.as_ref());
            CallSite {
                expression,
                receiver: shape.receiver,
                method_name: shape.method_name,
                base_scope: resolution.scope,
                base_type_name: resolution
                    .declaration
                    .map(|declaration| declaration.declared_type_name.clone()),
                provenance,
                reason,
            }
        })
        .collect()
}

/// Classify every call-site in `method`, in pre-order.
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(method = %method.name.name))]
pub fn analyze_method<'a>(
    method: &'a MethodDeclaration,
    scopes: &ScopeTree,
    config: &LawOfDemeterConfig,
) -> Vec<CallSite<'a>> {
    let Some(body) = &method.body else {
        return Vec::new();
    };
    let mut sites = Vec::new();
    for expression in primary_expressions(body) {
        for site in analyze_call_sites(expression, Some(body), scopes, config) {
            tracing::debug!(%site, "classified call-site");
            sites.push(site);
        }
    }
    sites
}

/// A reported violation, detached from the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationReport {
    pub location: Location,
    /// `"<rule message> (<reason text>)"`.
    pub message: EcoString,
    pub reason: ViolationReason,
}

impl ViolationReport {
    fn new(site: &CallSite<'_>, reason: ViolationReason, config: &LawOfDemeterConfig) -> Self {
        Self {
            location: site.location(),
            message: eco_format!("{} ({})", config.message, reason.text()),
            reason,
        }
    }

    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::lint(self.message.clone(), self.location.span)
            .with_category(DiagnosticCategory::Coupling)
            .with_hint(self.reason.hint())
    }
}

/// Every violation in `unit`, method by method, in pre-order.
#[must_use]
pub fn violation_reports(unit: &AnalysisUnit, config: &LawOfDemeterConfig) -> Vec<ViolationReport> {
    let mut reports = Vec::new();
    for_each_method(&unit.compilation_unit, |_, method| {
        reports.extend(
            analyze_method(method, &unit.scopes, config)
                .iter()
                .filter_map(|site| {
                    site.reason
                        .map(|reason| ViolationReport::new(site, reason, config))
                }),
        );
    });
    reports
}

/// Lint pass reporting Law of Demeter violations.
pub(crate) struct LawOfDemeterPass {
    config: LawOfDemeterConfig,
}

impl LawOfDemeterPass {
    pub(crate) fn new(config: LawOfDemeterConfig) -> Self {
        Self { config }
    }
}

impl LintPass for LawOfDemeterPass {
    fn check(&self, unit: &AnalysisUnit, diagnostics: &mut Vec<Diagnostic>) {
        diagnostics.extend(
            violation_reports(unit, &self.config)
                .iter()
                .map(ViolationReport::to_diagnostic),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LintConfig;
    use crate::lint::run_lint_passes;
    use crate::source_analysis::Severity;
    use crate::test_helpers::TreeBuilder;

    fn lint(unit: &AnalysisUnit) -> Vec<Diagnostic> {
        run_lint_passes(unit, &LintConfig::default())
    }

    fn sites(unit: &AnalysisUnit) -> Vec<CallSite<'_>> {
        let method = &unit.compilation_unit.classes[0].methods[0];
        analyze_method(method, &unit.scopes, &LawOfDemeterConfig::default())
    }

    #[test]
    fn call_on_foreign_local_is_flagged() {
        let unit = TreeBuilder::method_unit(&[], &[], |b, s| {
            let init = b.call(s, "getFoo", Vec::new());
            let decl = b.local(s, "f", "Foo", Some(init));
            let call = b.call(s, "f.bar", Vec::new());
            vec![decl, b.expression_statement(call)]
        });
        let diags = lint(&unit);
        assert_eq!(diags.len(), 1, "expected one diagnostic: {diags:?}");
        assert_eq!(diags[0].severity, Severity::Lint);
        assert_eq!(
            diags[0].message,
            "Potential violation of Law of Demeter (object not created locally)"
        );
    }

    #[test]
    fn diagnostic_carries_hint_and_category() {
        let unit = TreeBuilder::method_unit(&[], &[("a", "A")], |b, s| {
            let call = b.call_chain(s, "a.b", &["c"]);
            vec![b.expression_statement(call)]
        });
        let diags = lint(&unit);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].category, Some(DiagnosticCategory::Coupling));
        assert!(
            diags[0].hint.is_some(),
            "lint diagnostic should include a fix hint"
        );
        assert!(diags[0].message.ends_with("(method chain calls)"));
    }

    #[test]
    fn diagnostic_span_is_the_owning_expression() {
        let unit = TreeBuilder::method_unit(&[], &[], |b, s| {
            let call = b.call(s, "Util.CONST.doSomething", Vec::new());
            vec![b.expression_statement(call)]
        });
        let span = sites(&unit)[0].expression.location.span;
        let diags = lint(&unit);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].span, span);
    }

    #[test]
    fn call_sites_record_type_and_provenance() {
        let unit = TreeBuilder::method_unit(&[], &[], |b, s| {
            let init = b.new_object(s, "Foo", Vec::new());
            let decl = b.local(s, "f", "Foo", Some(init));
            let call = b.call(s, "f.bar", Vec::new());
            vec![decl, b.expression_statement(call)]
        });
        let sites = sites(&unit);
        let site = sites
            .iter()
            .find(|site| site.receiver == Receiver::Named("f".into()))
            .expect("call on f");
        assert_eq!(site.base_scope, Some(ScopeKind::Local));
        assert_eq!(site.base_type_name.as_deref(), Some("Foo"));
        assert!(
            site.provenance
                .as_ref()
                .and_then(Provenance::record)
                .is_some_and(|record| record.is_local_allocation)
        );
        assert!(!site.is_violation());
    }

    #[test]
    fn call_site_display_is_readable() {
        let unit = TreeBuilder::method_unit(&[], &[], |b, s| {
            let init = b.call(s, "getFoo", Vec::new());
            let decl = b.local(s, "f", "Foo", Some(init));
            let call = b.call(s, "f.bar", Vec::new());
            vec![decl, b.expression_statement(call)]
        });
        let sites = sites(&unit);
        let text = sites
            .iter()
            .find(|site| site.is_violation())
            .expect("one violation")
            .to_string();
        assert_eq!(
            text,
            "line 2: f.bar type=Foo scope=local assigned@1 => violation (object not created locally)"
        );
    }

    #[test]
    fn missing_body_is_conservative_for_locals() {
        let unit = TreeBuilder::method_unit(&[], &[], |b, s| {
            let init = b.new_object(s, "Foo", Vec::new());
            let decl = b.local(s, "f", "Foo", Some(init));
            let call = b.call(s, "f.bar", Vec::new());
            vec![decl, b.expression_statement(call)]
        });
        let body = unit.compilation_unit.classes[0].methods[0]
            .body
            .as_ref()
            .unwrap();
        let expression = primary_expressions(body)
            .into_iter()
            .find(|p| p.has_invocation() && p.location.line == 2)
            .unwrap();
        let config = LawOfDemeterConfig::default();

        let with_body = analyze_call_sites(expression, Some(body), &unit.scopes, &config);
        let without_body = analyze_call_sites(expression, None, &unit.scopes, &config);
        assert_eq!(with_body[0].reason, None);
        assert_eq!(
            without_body[0].reason,
            Some(ViolationReason::ObjectNotCreatedLocally)
        );
        assert_eq!(without_body[0].provenance, Some(Provenance::Unavailable));
    }

    #[test]
    fn abstract_method_yields_nothing() {
        let mut b = TreeBuilder::new();
        let class_scope = b.class_scope();
        let method_scope = b.method_scope(class_scope);
        let method = b.method(method_scope, "run", Vec::new(), None);
        let class = b.class("Subject", class_scope, vec![method], Vec::new());
        let unit = b.finish(vec![class]);
        assert!(lint(&unit).is_empty());
    }

    #[test]
    fn nested_class_methods_are_checked() {
        let mut b = TreeBuilder::new();
        let outer_scope = b.class_scope();
        let inner_scope = b.class_scope();
        let inner_method = b.method_with_body(inner_scope, "inner", |b, s| {
            let call = b.call(s, "Util.CONST.run", Vec::new());
            vec![b.expression_statement(call)]
        });
        let inner = b.class("Inner", inner_scope, vec![inner_method], Vec::new());
        let outer_method = b.empty_method(outer_scope, "outer");
        let outer = b.class("Outer", outer_scope, vec![outer_method], vec![inner]);
        let unit = b.finish(vec![outer]);

        let reports = violation_reports(&unit, &LawOfDemeterConfig::default());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].reason, ViolationReason::StaticPropertyAccess);
    }

    #[test]
    fn custom_message_is_used() {
        let unit = TreeBuilder::method_unit(&[], &[], |b, s| {
            let call = b.call(s, "Util.CONST.run", Vec::new());
            vec![b.expression_statement(call)]
        });
        let config = LawOfDemeterConfig {
            message: "Too much coupling".to_string(),
            ..LawOfDemeterConfig::default()
        };
        let reports = violation_reports(&unit, &config);
        assert_eq!(reports[0].message, "Too much coupling (static property access)");
    }
}
