// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Diagnostics produced by lint passes.

use ecow::EcoString;

use super::Span;

/// The semantic category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    /// Coupling heuristics (Law of Demeter).
    Coupling,
    /// Style/redundancy lint.
    Lint,
}

/// A diagnostic message (warning or lint).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: Severity,
    /// The message.
    pub message: EcoString,
    /// The source location.
    pub span: Span,
    /// Optional hint for how to fix the issue.
    pub hint: Option<EcoString>,
    /// Optional semantic category.
    pub category: Option<DiagnosticCategory>,
}

impl Diagnostic {
    /// Creates a new warning diagnostic.
    #[must_use]
    pub fn warning(message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            span,
            hint: None,
            category: None,
        }
    }

    /// Creates a new lint diagnostic.
    #[must_use]
    pub fn lint(message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity: Severity::Lint,
            message: message.into(),
            span,
            hint: None,
            category: Some(DiagnosticCategory::Lint),
        }
    }

    /// Attaches a semantic category.
    #[must_use]
    pub fn with_category(mut self, category: DiagnosticCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Attaches a fix hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<EcoString>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A warning that should be addressed.
    Warning,
    /// A style/design lint check.
    Lint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lint_constructor_sets_lint_category() {
        let diag = Diagnostic::lint("too deep", Span::new(0, 4));
        assert_eq!(diag.severity, Severity::Lint);
        assert_eq!(diag.category, Some(DiagnosticCategory::Lint));
        assert!(diag.hint.is_none());
    }

    #[test]
    fn builders_override_category_and_hint() {
        let diag = Diagnostic::warning("w", Span::new(1, 2))
            .with_category(DiagnosticCategory::Coupling)
            .with_hint("do less");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.category, Some(DiagnosticCategory::Coupling));
        assert_eq!(diag.hint.as_deref(), Some("do less"));
    }
}
