// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Splits a primary expression into the hops of its call chain.
//!
//! ```text
//! a.b().c()     =>  [a . b] [<previous call> . c]
//! foo()         =>  [this . foo]
//! new Foo().x() =>  []            (construction is never judged)
//! a.b.c         =>  []            (nothing is invoked)
//! this.run()    =>  []            (explicit self access)
//! ```

use std::fmt;

use ecow::EcoString;

use crate::ast::{Expression, PrimaryExpression, PrimaryPrefix, PrimarySuffix};
use crate::ast_walker::{Node, walk_expression};

/// What a call-site's method is invoked on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// A simple or qualified name, e.g. `f` or `Util.CONST`.
    Named(EcoString),
    /// The implicit or explicit `this`.
    This,
    Super,
    /// The value returned by the previous hop of the chain.
    PreviousCall,
    /// The prefix holds no name to judge (e.g. a literal).
    Unknown,
}

impl Receiver {
    /// The receiver as written, or a descriptive placeholder.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::This => "this",
            Self::Super => "super",
            Self::PreviousCall => "result from previous method call",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hop of a call chain before any semantic classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallShape {
    pub receiver: Receiver,
    /// `None` when the prefix carries no method name (e.g. bare `this`).
    pub method_name: Option<EcoString>,
}

/// Decompose `expression` into its call-sites, first hop first.
///
/// Returns an empty list when the expression constructs an object anywhere,
/// starts with `this`/`super`, or invokes nothing.
#[must_use]
pub fn extract_call_chain(expression: &PrimaryExpression) -> Vec<CallShape> {
    if expression.contains_allocation() {
        return Vec::new();
    }
    if !has_real_prefix(&expression.prefix) || !expression.has_invocation() {
        return Vec::new();
    }

    let mut chain = vec![prefix_shape(&expression.prefix)];
    chain.extend(expression.suffixes.iter().filter_map(|suffix| match suffix {
        PrimarySuffix::Member(member) => Some(CallShape {
            receiver: Receiver::PreviousCall,
            method_name: Some(member.name.clone()),
        }),
        PrimarySuffix::Arguments(_) | PrimarySuffix::Index(_) => None,
    }));
    chain
}

fn has_real_prefix(prefix: &PrimaryPrefix) -> bool {
    !prefix.is_this() && !prefix.is_super()
}

/// The first hop, taken from the expression's prefix.
fn prefix_shape(prefix: &PrimaryPrefix) -> CallShape {
    match prefix {
        PrimaryPrefix::Name(name) => split_qualified(name),
        PrimaryPrefix::This => CallShape {
            receiver: Receiver::This,
            method_name: None,
        },
        PrimaryPrefix::Super => CallShape {
            receiver: Receiver::Super,
            method_name: None,
        },
        PrimaryPrefix::Parenthesized(inner) => {
            first_name_in(inner).map_or_else(unknown_shape, |name| split_qualified(&name))
        }
        PrimaryPrefix::Literal(_) | PrimaryPrefix::Allocation(_) => unknown_shape(),
    }
}

fn unknown_shape() -> CallShape {
    CallShape {
        receiver: Receiver::Unknown,
        method_name: None,
    }
}

/// Split at the last `.`: `a.b.c` calls `c` on `a.b`, `foo` calls `foo` on `this`.
fn split_qualified(name: &EcoString) -> CallShape {
    match name.rsplit_once('.') {
        Some((base, method)) => CallShape {
            receiver: Receiver::Named(base.into()),
            method_name: Some(method.into()),
        },
        None => CallShape {
            receiver: Receiver::This,
            method_name: Some(name.clone()),
        },
    }
}

/// The first name-prefixed primary expression in pre-order within `expr`.
fn first_name_in(expr: &Expression) -> Option<EcoString> {
    let mut found = None;
    walk_expression(expr, &mut |node| {
        if found.is_some() {
            return;
        }
        if let Node::Expression(Expression::Primary(PrimaryExpression {
            prefix: PrimaryPrefix::Name(name),
            ..
        })) = node
        {
            found = Some(name.clone());
        }
    });
    found
}
