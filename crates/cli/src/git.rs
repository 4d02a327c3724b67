// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Version-control collaborator.
//!
//! Three operations against one working tree: query the current ref, check
//! whether a named ref exists (locally, as a remote-tracking ref, or after
//! a fetch), and switch the tree to a ref. Each shells out to the `git`
//! binary and surfaces the exit code as data, so the pipeline branches on
//! the returned `Result`.

use std::path::{Path, PathBuf};
use std::process::Output;
use thiserror::Error;
use tokio::process::Command;

/// Errors from git invocations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("failed to determine the current ref: {stderr}")]
    CurrentRef { stderr: String },

    #[error("failed to check out '{name}': {stderr}")]
    Checkout { name: String, stderr: String },
}

/// A git working tree the pipeline operates on.
#[derive(Clone, Debug)]
pub struct GitTree {
    root: PathBuf,
}

impl GitTree {
    /// Wrap a working tree rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The working tree root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The symbolic name of the currently checked-out ref.
    pub async fn current_ref(&self) -> Result<String, GitError> {
        let output = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(GitError::CurrentRef {
                stderr: stderr_of(&output),
            })
        }
    }

    /// Whether `name` resolves to a ref, checking the local ref first, then
    /// the remote-tracking ref, then retrying after a fetch.
    pub async fn ref_exists(&self, name: &str) -> Result<bool, GitError> {
        if self.git(&["rev-parse", "--verify", name]).await?.status.success() {
            return Ok(true);
        }
        let remote = format!("origin/{name}");
        if self.git(&["rev-parse", "--verify", &remote]).await?.status.success() {
            return Ok(true);
        }
        // Fetch failure (e.g. no remote) just means the retry fails too
        let _ = self.git(&["fetch", "origin", name]).await?;
        Ok(self.git(&["rev-parse", "--verify", name]).await?.status.success())
    }

    /// Switch the working tree to `name`.
    ///
    /// Tries a plain checkout, then creating a local branch from the
    /// remote-tracking ref, then fetching the ref outright and retrying.
    pub async fn checkout(&self, name: &str) -> Result<(), GitError> {
        if self.git(&["checkout", name]).await?.status.success() {
            return Ok(());
        }
        let remote = format!("origin/{name}");
        if self
            .git(&["checkout", "-b", name, &remote])
            .await?
            .status
            .success()
        {
            return Ok(());
        }
        let refspec = format!("{name}:{name}");
        let _ = self.git(&["fetch", "origin", &refspec]).await?;
        let output = self.git(&["checkout", name]).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(GitError::Checkout {
                name: name.to_string(),
                stderr: stderr_of(&output),
            })
        }
    }

    async fn git(&self, args: &[&str]) -> Result<Output, GitError> {
        Ok(Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .await?)
    }
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
