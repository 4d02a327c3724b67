// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The comparison pipeline.
//!
//! One run acquires a snapshot from each ref in turn (static scan or timed
//! run), reconciles the pair, renders the Markdown report, and writes it
//! out. The original ref is restored before returning, even when the run
//! failed partway through.

use crate::config::CompareConfig;
use crate::diag::{print_status, print_warning};
use crate::files::discover_test_files;
use crate::git::{GitError, GitTree};
use crate::testrun::run_test_suite;
use chrono::Local;
use std::path::{Path, PathBuf};
use testdrift_compare::{parse_runner_output, reconcile, render, scan_source, Snapshot};
use thiserror::Error;

/// Prefix stripped from logical paths when deriving module paths.
const SOURCE_ROOT: &str = "src/";

/// Which snapshot acquisition the pipeline uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Scan test declarations; identifiers only.
    Scan,
    /// Run the suite and parse per-test durations.
    Run,
}

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error("failed to write report to {path}: {source}")]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One configured comparison run.
pub struct Pipeline {
    config: CompareConfig,
    git: GitTree,
}

impl Pipeline {
    pub fn new(config: CompareConfig) -> Self {
        let git = GitTree::new(&config.repo);
        Self { config, git }
    }

    /// Execute the full comparison, returning the report path.
    pub async fn run(&self, mode: Mode) -> Result<PathBuf, PipelineError> {
        let original_ref = match self.git.current_ref().await {
            Ok(name) => {
                print_status(format_args!("Current ref: {name}"));
                Some(name)
            }
            Err(err) => {
                print_warning(format_args!(
                    "could not determine the current ref ({err}); it will not be restored"
                ));
                None
            }
        };

        let source_ref = self.resolve_source_ref(original_ref.as_deref()).await;
        let result = self.compare(mode, &source_ref).await;

        // Restore the original ref even after a failed run
        if let Some(name) = original_ref {
            print_status(format_args!("Restoring original ref: {name}"));
            if let Err(err) = self.git.checkout(&name).await {
                print_warning(format_args!("failed to restore '{name}': {err}"));
            }
        }

        result
    }

    /// Substitute the current ref for a missing source ref, as the report
    /// is still useful against whatever is checked out.
    async fn resolve_source_ref(&self, original_ref: Option<&str>) -> String {
        let configured = &self.config.source_ref;
        let exists = self.git.ref_exists(configured).await.unwrap_or(false);
        if exists {
            return configured.clone();
        }
        match original_ref {
            Some(current) => {
                print_warning(format_args!(
                    "ref '{configured}' does not exist; comparing the current ref '{current}' instead"
                ));
                current.to_string()
            }
            None => configured.clone(),
        }
    }

    async fn compare(&self, mode: Mode, source_ref: &str) -> Result<PathBuf, PipelineError> {
        let left = self.collect(mode, source_ref).await?;
        print_status(format_args!("{}: {} tests", source_ref, left.len()));

        let right = self.collect(mode, &self.config.target_ref).await?;
        print_status(format_args!(
            "{}: {} tests",
            self.config.target_ref,
            right.len()
        ));

        let recon = reconcile(&left, &right);
        let report = render(&recon, Local::now());
        self.write_report(&report)?;
        Ok(self.config.output_path.clone())
    }

    async fn collect(&self, mode: Mode, name: &str) -> Result<Snapshot, PipelineError> {
        print_status(format_args!("Checking out: {name}"));
        self.git.checkout(name).await?;
        match mode {
            Mode::Scan => Ok(self.scan_snapshot(name)),
            Mode::Run => Ok(self.run_snapshot(name).await),
        }
    }

    /// Build a snapshot by scanning test declarations in the working tree.
    fn scan_snapshot(&self, name: &str) -> Snapshot {
        let mut snapshot = Snapshot::new(name);
        for path in discover_test_files(&self.config.repo) {
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    print_warning(format_args!("skipping {}: {err}", path.display()));
                    continue;
                }
            };
            let logical = self.logical_path(&path);
            for ident in scan_source(&text, &logical, SOURCE_ROOT) {
                snapshot.insert_ident(ident);
            }
        }
        snapshot
    }

    /// Build a snapshot by running the suite and parsing its output.
    async fn run_snapshot(&self, name: &str) -> Snapshot {
        print_status(format_args!("Running tests on {name}..."));
        let outcome = run_test_suite(&self.config.repo, self.config.timeout).await;
        if outcome.timed_out {
            print_warning(format_args!(
                "test run on '{name}' exceeded {}s and was killed; no timing data",
                self.config.timeout.as_secs()
            ));
        } else if !outcome.success {
            // Failed runs still print per-test lines, so parse what we got
            print_warning(format_args!(
                "test command on '{name}' exited with failure; parsing captured output anyway"
            ));
        }

        let parsed = parse_runner_output(&outcome.stdout);
        if parsed.durations.is_empty() {
            print_warning(format_args!(
                "no per-test timing found on '{name}' (wall time {:.3}s)",
                outcome.elapsed.as_secs_f64()
            ));
        }

        let mut snapshot = Snapshot::new(name);
        let approximate = parsed.approximate;
        for (ident, seconds) in parsed.durations {
            snapshot.record_duration(ident, seconds);
        }
        if approximate {
            snapshot.mark_approximate();
        }
        snapshot
    }

    /// Path of `file` relative to the working tree, with `/` separators.
    fn logical_path(&self, file: &Path) -> String {
        file.strip_prefix(&self.config.repo)
            .unwrap_or(file)
            .to_string_lossy()
            .into_owned()
    }

    fn write_report(&self, text: &str) -> Result<(), PipelineError> {
        let path = &self.config.output_path;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PipelineError::WriteReport {
                path: path.clone(),
                source,
            })?;
        }
        std::fs::write(path, text).map_err(|source| PipelineError::WriteReport {
            path: path.clone(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
