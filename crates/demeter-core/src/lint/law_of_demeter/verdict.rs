// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Turns a classified call-site into a verdict.
//!
//! | scope            | provenance                              | reason                       |
//! |------------------|-----------------------------------------|------------------------------|
//! | `Local`          | last write neither allocates nor iterates | object not created locally |
//! | `Local`          | method body unavailable                 | object not created locally   |
//! | `Local`          | no write                                | none                         |
//! | `MethodChaining` |                                         | method chain calls           |
//! | `StaticChain`    |                                         | static property access       |
//! | anything else    |                                         | none                         |

use std::fmt;

use serde::Serialize;

use super::assignment_history::Provenance;
use super::scope_classifier::ScopeKind;

/// Why a call-site couples to a stranger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    ObjectNotCreatedLocally,
    MethodChainCall,
    StaticPropertyAccess,
}

impl ViolationReason {
    /// The reason text appended to the rule message.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::ObjectNotCreatedLocally => "object not created locally",
            Self::MethodChainCall => "method chain calls",
            Self::StaticPropertyAccess => "static property access",
        }
    }

    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::ObjectNotCreatedLocally => {
                "Ask the object that owns this value to do the work, or pass the value in as a parameter"
            }
            Self::MethodChainCall => {
                "Calling a method on a returned object reaches through a collaborator; add a method that does this for you"
            }
            Self::StaticPropertyAccess => {
                "Reaching through a static field couples this method to its internals; pass the value in instead"
            }
        }
    }
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Decide whether a call-site violates the rule.
///
/// `provenance` is only consulted for `Local` receivers.
#[must_use]
pub fn classify(scope: Option<ScopeKind>, provenance: Option<&Provenance>) -> Option<ViolationReason> {
    match (scope?, provenance) {
        (ScopeKind::Local, Some(Provenance::Governed(record))) => {
            (!record.is_local_allocation && !record.is_iterator_result)
                .then_some(ViolationReason::ObjectNotCreatedLocally)
        }
        (ScopeKind::Local, Some(Provenance::Unavailable)) => {
            Some(ViolationReason::ObjectNotCreatedLocally)
        }
        (ScopeKind::MethodChaining, _) => Some(ViolationReason::MethodChainCall),
        (ScopeKind::StaticChain, _) => Some(ViolationReason::StaticPropertyAccess),
        (ScopeKind::Local, Some(Provenance::Unassigned) | None)
        | (ScopeKind::Method | ScopeKind::Class, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::law_of_demeter::assignment_history::AssignmentRecord;
    use crate::source_analysis::{Location, Span};

    fn governed(is_local_allocation: bool, is_iterator_result: bool) -> Provenance {
        Provenance::Governed(AssignmentRecord {
            location: Location::new(3, Span::new(10, 20)),
            is_local_allocation,
            is_iterator_result,
        })
    }

    #[test]
    fn local_foreign_object_violates() {
        assert_eq!(
            classify(Some(ScopeKind::Local), Some(&governed(false, false))),
            Some(ViolationReason::ObjectNotCreatedLocally)
        );
    }

    #[test]
    fn local_allocation_or_iterator_is_exempt() {
        assert_eq!(classify(Some(ScopeKind::Local), Some(&governed(true, false))), None);
        assert_eq!(classify(Some(ScopeKind::Local), Some(&governed(false, true))), None);
    }

    #[test]
    fn local_without_writes_is_not_judged() {
        assert_eq!(
            classify(Some(ScopeKind::Local), Some(&Provenance::Unassigned)),
            None
        );
        assert_eq!(classify(Some(ScopeKind::Local), None), None);
    }

    #[test]
    fn unavailable_history_is_conservative() {
        assert_eq!(
            classify(Some(ScopeKind::Local), Some(&Provenance::Unavailable)),
            Some(ViolationReason::ObjectNotCreatedLocally)
        );
    }

    #[test]
    fn chains_and_statics_ignore_provenance() {
        assert_eq!(
            classify(Some(ScopeKind::MethodChaining), Some(&governed(true, true))),
            Some(ViolationReason::MethodChainCall)
        );
        assert_eq!(
            classify(Some(ScopeKind::StaticChain), None),
            Some(ViolationReason::StaticPropertyAccess)
        );
    }

    #[test]
    fn parameters_fields_and_unresolved_never_violate() {
        assert_eq!(classify(Some(ScopeKind::Method), None), None);
        assert_eq!(classify(Some(ScopeKind::Class), Some(&governed(false, false))), None);
        assert_eq!(classify(None, Some(&governed(false, false))), None);
    }

    #[test]
    fn reasons_serialize_in_snake_case() {
        let json = serde_json::to_string(&ViolationReason::MethodChainCall).unwrap();
        assert_eq!(json, "\"method_chain_call\"");
        assert_eq!(
            ViolationReason::StaticPropertyAccess.to_string(),
            "static property access"
        );
    }
}
