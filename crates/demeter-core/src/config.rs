// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lint configuration.
//!
//! **DDD Context:** Build System
//!
//! Parses `demeter.toml`, which tunes the lint passes:
//!
//! ```toml
//! [law-of-demeter]
//! enabled = true
//! message = "Potential violation of Law of Demeter"
//! iterator-type = "java.util.Iterator"
//! iterator-suffix = "Iterator"
//! exempt-static-prefixes = ["System."]
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use std::fs;

use camino::Utf8Path;
use miette::{Context, IntoDiagnostic, Result};
use serde::Deserialize;
use thiserror::Error;

/// File name looked up by [`find_config`].
pub const CONFIG_FILE_NAME: &str = "demeter.toml";

/// Top-level configuration parsed from `demeter.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LintConfig {
    /// The `[law-of-demeter]` table.
    pub law_of_demeter: LawOfDemeterConfig,
}

/// Settings for the Law of Demeter pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LawOfDemeterConfig {
    /// Whether the pass runs at all.
    pub enabled: bool,
    /// Rule description; each report is this text followed by ` (<reason>)`.
    pub message: String,
    /// Fully qualified name of the iteration-cursor type.
    pub iterator_type: String,
    /// Declared type names ending in this suffix are treated as iteration cursors.
    pub iterator_suffix: String,
    /// Qualified receivers starting with one of these prefixes are never
    /// reported as static property access (platform output streams).
    pub exempt_static_prefixes: Vec<String>,
}

impl Default for LawOfDemeterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            message: "Potential violation of Law of Demeter".to_string(),
            iterator_type: "java.util.Iterator".to_string(),
            iterator_suffix: "Iterator".to_string(),
            exempt_static_prefixes: vec!["System.".to_string()],
        }
    }
}

impl LawOfDemeterConfig {
    /// Returns true if `qualified_receiver` starts with an exempt prefix.
    #[must_use]
    pub fn is_exempt_static(&self, qualified_receiver: &str) -> bool {
        self.exempt_static_prefixes
            .iter()
            .any(|prefix| qualified_receiver.starts_with(prefix.as_str()))
    }
}

/// A configuration that parsed but cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("`law-of-demeter.message` must not be empty")]
    #[diagnostic(code(demeter::config::empty_message))]
    EmptyMessage,

    #[error("`law-of-demeter.iterator-suffix` must not be empty")]
    #[diagnostic(
        code(demeter::config::empty_iterator_suffix),
        help("an empty suffix would treat every declared type as an iterator")
    )]
    EmptyIteratorSuffix,

    #[error("`law-of-demeter.exempt-static-prefixes` contains an empty prefix")]
    #[diagnostic(
        code(demeter::config::empty_static_prefix),
        help("an empty prefix would exempt every qualified receiver")
    )]
    EmptyStaticPrefix,
}

impl LintConfig {
    /// Checks values that deserialize fine but make the lint meaningless.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let demeter = &self.law_of_demeter;
        if demeter.message.trim().is_empty() {
            return Err(ConfigError::EmptyMessage);
        }
        if demeter.iterator_suffix.is_empty() {
            return Err(ConfigError::EmptyIteratorSuffix);
        }
        if demeter.exempt_static_prefixes.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyStaticPrefix);
        }
        Ok(())
    }
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<LintConfig> {
    let config: LintConfig = toml::from_str(content)
        .into_diagnostic()
        .wrap_err("Failed to parse lint configuration")?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a configuration file.
pub fn load_config(path: &Utf8Path) -> Result<LintConfig> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read lint configuration '{path}'"))?;

    parse_config(&content).wrap_err_with(|| format!("Invalid lint configuration '{path}'"))
}

/// Look for `demeter.toml` in the given directory and load it if found.
///
/// Returns `None` if no configuration file exists. Returns an error if the
/// file exists but is malformed.
pub fn find_config(project_root: &Utf8Path) -> Result<Option<LintConfig>> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path
        .try_exists()
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to stat lint configuration '{config_path}'"))?
    {
        tracing::debug!(path = %config_path, "loading lint configuration");
        load_config(&config_path).map(Some)
    } else {
        Ok(None)
    }
}
