// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Finds the write that governs a block-local receiver.
//!
//! Every initialized declarator of the name and every plain `=` assignment
//! to it anywhere in the method body counts as a write. The write with the
//! greatest [`Location`] wins, regardless of where the call-site sits:
//!
//! ```text
//! Foo f = getFoo();   // line 1
//! f.bar();            // line 2, governed by line 3
//! f = new Foo();      // line 3
//! ```
//!
//! Compound assignments (`+=` and friends) and declarators without an
//! initializer are not writes.

use crate::ast::{Block, Expression};
use crate::ast_walker::{assignments, variable_declarators};
use crate::config::LawOfDemeterConfig;
use crate::semantic_analysis::VariableDeclaration;
use crate::source_analysis::Location;

/// One write to a local variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub location: Location,
    /// The written value constructs an object somewhere in its subtree.
    pub is_local_allocation: bool,
    /// The variable's declared type is an iteration cursor.
    pub is_iterator_result: bool,
}

impl AssignmentRecord {
    #[must_use]
    pub fn source_line(&self) -> u32 {
        self.location.line
    }
}

/// What is known about where a local receiver's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The last write to the variable.
    Governed(AssignmentRecord),
    /// The body holds no write to the variable.
    Unassigned,
    /// No method body was available to search.
    Unavailable,
}

impl Provenance {
    #[must_use]
    pub fn record(&self) -> Option<&AssignmentRecord> {
        match self {
            Self::Governed(record) => Some(record),
            Self::Unassigned | Self::Unavailable => None,
        }
    }
}

/// Returns true if `declaration` names an iteration cursor type.
///
/// Either the resolved type is exactly the configured iterator type, or the
/// declared type name, stripped of generic arguments and array brackets,
/// ends with the configured suffix.
#[must_use]
pub fn is_iterator(declaration: Option<&VariableDeclaration>, config: &LawOfDemeterConfig) -> bool {
    let Some(declaration) = declaration else {
        return false;
    };
    if declaration
        .resolved_type
        .as_ref()
        .is_some_and(|resolved| resolved.qualified_name() == config.iterator_type)
    {
        return true;
    }
    base_type_name(&declaration.declared_type_name).ends_with(config.iterator_suffix.as_str())
}

/// `Iterator<String>` → `Iterator`, `Foo[][]` → `Foo`.
fn base_type_name(type_name: &str) -> &str {
    let head = type_name.split('<').next().unwrap_or(type_name).trim();
    head.trim_end_matches("[]").trim_end()
}

/// All writes to `name` in `body`, in pre-order.
#[must_use]
pub fn assignment_records(name: &str, is_iterator_result: bool, body: &Block) -> Vec<AssignmentRecord> {
    let declared = variable_declarators(body)
        .into_iter()
        .filter(|declarator| declarator.name.name == name)
        .filter_map(|declarator| {
            let init = declarator.initializer.as_ref()?;
            Some(AssignmentRecord {
                location: declarator.location,
                is_local_allocation: init.contains_allocation(),
                is_iterator_result,
            })
        });

    let assigned = assignments(body)
        .into_iter()
        .filter(|assignment| assignment.operator.is_plain())
        .filter(|assignment| {
            matches!(assignment.target, Expression::Primary(target) if target.is_plain_name(name))
        })
        .map(|assignment| AssignmentRecord {
            location: assignment.expression.location(),
            is_local_allocation: assignment.value.contains_allocation(),
            is_iterator_result,
        });

    declared.chain(assigned).collect()
}

/// Select the write governing `name` within `body`.
#[must_use]
pub fn governing_assignment(
    name: &str,
    declaration: Option<&VariableDeclaration>,
    body: Option<&Block>,
    config: &LawOfDemeterConfig,
) -> Provenance {
    let Some(body) = body else {
        tracing::warn!(%name, "no enclosing method body; assuming the receiver is a foreign object");
        return Provenance::Unavailable;
    };
    let is_iterator_result = is_iterator(declaration, config);
    assignment_records(name, is_iterator_result, body)
        .into_iter()
        .max_by_key(|record| record.location)
        .map_or(Provenance::Unassigned, Provenance::Governed)
}
