// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git hook implementations.
//!
//! Each hook reads what git hands it, inspects the repository and writes
//! its report to the supplied writer. Only commit-msg, pre-push and
//! pre-rebase can block the operation.

pub mod commit_msg;
pub mod post_commit;
pub mod post_rewrite;
pub mod pre_push;
pub mod pre_rebase;
mod prompt;

pub use prompt::{Prompter, TtyPrompter};

#[cfg(test)]
pub(crate) use prompt::testing;

use crate::config::RhConfig;
use crate::error::{GitError, HookError, Result, RhError};
use crate::git::Repository;
use git2::Oid;

/// Hook names accepted as the executable name of a symlink to `rh`.
pub const HOOK_NAMES: [&str; 5] = [
    "commit-msg",
    "pre-push",
    "post-commit",
    "pre-rebase",
    "post-rewrite",
];

/// Whether git may go ahead with the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Accept,
    Reject,
}

impl HookOutcome {
    /// Process exit status git expects from the hook.
    pub fn exit_code(self) -> i32 {
        match self {
            HookOutcome::Accept => 0,
            HookOutcome::Reject => 1,
        }
    }
}

/// A feature branch that has been pushed for review.
#[derive(Debug, Clone)]
pub(crate) struct ReviewBranch {
    pub name: String,
    pub tracking: String,
    pub tracking_oid: Oid,
}

impl ReviewBranch {
    /// Look up `branch` (or the current branch) and its remote-tracking ref.
    ///
    /// `Ok(None)` for detached HEAD, base branches, branches without an
    /// upstream and upstreams that no longer resolve.
    pub fn find(
        repo: &Repository,
        config: &RhConfig,
        branch: Option<&str>,
    ) -> Result<Option<Self>> {
        let name = match branch {
            Some(name) => name.strip_prefix("refs/heads/").unwrap_or(name).to_string(),
            None => match repo.branch_name() {
                Ok(name) => name,
                Err(RhError::Git(GitError::DetachedHead)) => {
                    tracing::debug!("HEAD is detached; nothing to check");
                    return Ok(None);
                }
                Err(e) => return Err(e),
            },
        };

        if config.review.is_base_branch(&name) {
            tracing::debug!("{} is a base branch; not under review", name);
            return Ok(None);
        }

        let Some(tracking) = repo.upstream_of(&name)? else {
            tracing::debug!("{} has no upstream; not pushed yet", name);
            return Ok(None);
        };

        let tracking_oid = match repo.resolve(&tracking) {
            Ok(oid) => oid,
            Err(e) => {
                tracing::debug!("Upstream {} does not resolve: {}", tracking, e);
                return Ok(None);
            }
        };

        Ok(Some(Self {
            name,
            tracking,
            tracking_oid,
        }))
    }
}

/// Parse a full hexadecimal commit id from line `line_no` of hook input.
pub(crate) fn parse_oid(hook: &str, line_no: usize, line: &str, sha: &str) -> Result<Oid> {
    Oid::from_str(sha).map_err(|_| invalid_input(hook, line_no, line))
}

/// Whether `sha` is git's all-zeros placeholder for "no object".
pub(crate) fn is_null_sha(sha: &str) -> bool {
    !sha.is_empty() && sha.bytes().all(|b| b == b'0')
}

pub(crate) fn invalid_input(hook: &str, line_no: usize, line: &str) -> RhError {
    RhError::Hook(HookError::InvalidInput {
        hook: hook.to_string(),
        line: line_no,
        content: line.to_string(),
    })
}
