// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Law of Demeter lint core.
//!
//! This crate inspects already parsed and scope-resolved Java-like syntax
//! trees and reports call-sites where a method reaches through its
//! collaborators:
//! - Syntax tree model and walkers ([`ast`], [`ast_walker`])
//! - Scope chains ([`semantic_analysis`])
//! - Lint passes and their diagnostics ([`lint`], [`source_analysis`])
//! - `demeter.toml` configuration ([`config`])
//!
//! ```
//! use demeter_core::config::LintConfig;
//! use demeter_core::lint::run_lint_passes;
//! use demeter_core::test_helpers::TreeBuilder;
//!
//! // void run() { Util.CONST.doSomething(); }
//! let unit = TreeBuilder::method_unit(&[], &[], |b, scope| {
//!     let call = b.call(scope, "Util.CONST.doSomething", Vec::new());
//!     vec![b.expression_statement(call)]
//! });
//! let diagnostics = run_lint_passes(&unit, &LintConfig::default());
//! assert_eq!(
//!     diagnostics[0].message,
//!     "Potential violation of Law of Demeter (static property access)"
//! );
//! ```

pub mod ast;
pub mod ast_walker;
pub mod config;
pub mod lint;
pub mod semantic_analysis;
pub mod source_analysis;
pub mod test_helpers;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{AnalysisUnit, CompilationUnit, Expression, PrimaryExpression, Statement};
    pub use crate::config::{LawOfDemeterConfig, LintConfig};
    pub use crate::lint::law_of_demeter::verdict::ViolationReason;
    pub use crate::lint::law_of_demeter::{ViolationReport, violation_reports};
    pub use crate::lint::{run_lint_passes, run_lint_passes_parallel};
    pub use crate::semantic_analysis::{ScopeId, ScopeTree};
    pub use crate::source_analysis::{Diagnostic, Location, Span};
}
