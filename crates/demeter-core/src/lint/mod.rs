// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint passes over resolved syntax trees.
//!
//! **DDD Context:** Compilation
//!
//! Lint checks are design heuristics, not errors: they never fail and every
//! diagnostic they produce has [`Severity::Lint`](crate::source_analysis::Severity::Lint).
//!
//! # Adding a New Lint
//!
//! 1. Create `crates/demeter-core/src/lint/<your_lint>.rs`.
//! 2. Declare `pub(crate) struct YourLintPass;` implementing [`LintPass`].
//! 3. Add `mod your_lint;` below (keep alphabetical).
//! 4. Push the pass into `all_passes()`, gated by its configuration table.

pub mod law_of_demeter;
// ── add new lint modules here (alphabetical) ──────────────────────────────

use rayon::prelude::*;

use crate::ast::AnalysisUnit;
use crate::config::LintConfig;
use crate::source_analysis::Diagnostic;

/// A single lint pass.
///
/// Implementors inspect `unit` and push any [`Diagnostic`]s into `diagnostics`.
/// Passes must not keep state between calls; units may be checked
/// concurrently.
pub(crate) trait LintPass: Send + Sync {
    fn check(&self, unit: &AnalysisUnit, diagnostics: &mut Vec<Diagnostic>);
}

/// Construct the ordered list of enabled lint passes.
fn all_passes(config: &LintConfig) -> Vec<Box<dyn LintPass>> {
    let mut passes: Vec<Box<dyn LintPass>> = Vec::new();
    if config.law_of_demeter.enabled {
        passes.push(Box::new(law_of_demeter::LawOfDemeterPass::new(
            config.law_of_demeter.clone(),
        )));
    }
    // ── add new passes here (alphabetical) ────────────────────────────────
    passes
}

/// Run all enabled lint passes on one unit and return the lint diagnostics.
#[must_use]
pub fn run_lint_passes(unit: &AnalysisUnit, config: &LintConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for pass in all_passes(config) {
        pass.check(unit, &mut diagnostics);
    }
    diagnostics
}

/// Run all enabled lint passes on many units in parallel.
///
/// The result holds one diagnostic list per unit, in input order.
#[must_use]
pub fn run_lint_passes_parallel(units: &[AnalysisUnit], config: &LintConfig) -> Vec<Vec<Diagnostic>> {
    tracing::debug!(units = units.len(), "running lint passes");
    units
        .par_iter()
        .map(|unit| run_lint_passes(unit, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::TreeBuilder;

    fn chained_unit() -> AnalysisUnit {
        TreeBuilder::method_unit(&[("a", "A")], &[], |b, s| {
            let call = b.call_chain(s, "a.b", &["c"]);
            vec![b.expression_statement(call)]
        })
    }

    #[test]
    fn disabled_pass_reports_nothing() {
        let mut config = LintConfig::default();
        config.law_of_demeter.enabled = false;
        assert!(run_lint_passes(&chained_unit(), &config).is_empty());
        assert!(all_passes(&config).is_empty());
    }

    #[test]
    fn enabled_pass_reports() {
        let diags = run_lint_passes(&chained_unit(), &LintConfig::default());
        assert_eq!(diags.len(), 1, "expected one lint diagnostic");
    }

    #[test]
    fn parallel_results_keep_input_order() {
        let clean = TreeBuilder::method_unit(&[], &[], |_, _| Vec::new());
        let units = vec![chained_unit(), clean, chained_unit()];
        let results = run_lint_passes_parallel(&units, &LintConfig::default());
        let counts: Vec<_> = results.iter().map(Vec::len).collect();
        assert_eq!(counts, [1, 0, 1]);
    }
}
