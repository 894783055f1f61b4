// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source locations and diagnostics.
//!
//! **DDD Context:** Source Analysis
//!
//! Syntax trees reach this crate already parsed. What remains of source
//! analysis here is the vocabulary shared by every pass: [`Span`] and
//! [`Location`] to point at nodes, and [`Diagnostic`] to report findings.

mod diagnostic;
mod span;

pub use diagnostic::{Diagnostic, DiagnosticCategory, Severity};
pub use span::{Location, Span};
