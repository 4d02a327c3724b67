// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved pipeline configuration.
//!
//! The pipeline takes one explicit [`CompareConfig`] rather than reading
//! globals; it is assembled here from CLI flags, an optional TOML/JSON
//! config file, and built-in defaults, in that order of precedence.

use crate::cli::CompareArgs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default right-hand ref of the comparison.
pub const DEFAULT_TARGET_REF: &str = "master";
/// Default report path, relative to the working tree.
pub const DEFAULT_OUTPUT_PATH: &str = "docs/slow_test_analysis.md";
/// Default timeout for one test-suite run.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

/// Errors from loading or resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no source ref given (pass --source-ref or set source_ref in the config file)")]
    MissingSourceRef,
}

/// On-disk config file shape; all fields optional.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub source_ref: Option<String>,

    #[serde(default)]
    pub target_ref: Option<String>,

    #[serde(default)]
    pub output_path: Option<PathBuf>,

    #[serde(default)]
    pub repo: Option<PathBuf>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Load a config file, picking the format by extension: `.json` parses
    /// as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|e| e == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }
}

/// Fully resolved configuration for one comparison run.
#[derive(Clone, Debug)]
pub struct CompareConfig {
    /// Baseline ref (left side).
    pub source_ref: String,
    /// Ref compared against (right side).
    pub target_ref: String,
    /// Report path; already joined with `repo` when given as relative.
    pub output_path: PathBuf,
    /// Working tree the comparison operates on.
    pub repo: PathBuf,
    /// Upper bound for one test-suite run.
    pub timeout: Duration,
}

impl CompareConfig {
    /// Resolve CLI arguments against the optional config file and defaults.
    pub fn resolve(args: &CompareArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let source_ref = args
            .source_ref
            .clone()
            .or(file.source_ref)
            .ok_or(ConfigError::MissingSourceRef)?;
        let target_ref = args
            .target_ref
            .clone()
            .or(file.target_ref)
            .unwrap_or_else(|| DEFAULT_TARGET_REF.to_string());
        let repo = args
            .repo
            .clone()
            .or(file.repo)
            .unwrap_or_else(|| PathBuf::from("."));
        let output = args
            .output
            .clone()
            .or(file.output_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
        let output_path = if output.is_absolute() {
            output
        } else {
            repo.join(output)
        };
        let timeout_secs = args
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            source_ref,
            target_ref,
            output_path,
            repo,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
