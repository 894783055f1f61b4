// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic information consumed by lint passes.
//!
//! **DDD Context:** Semantic Analysis

pub mod scope;

pub use scope::{ResolvedType, Scope, ScopeId, ScopeLevel, ScopeTree, VariableDeclaration};
