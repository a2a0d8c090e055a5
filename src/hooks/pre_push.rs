// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The pre-push hook.
//!
//! Keeps unsquashed fixup!/squash! commits out of base branches and walks
//! the author through the push checklist.

use crate::commit::Marker;
use crate::config::RhConfig;
use crate::error::{HookError, Result, RhError};
use crate::git::{short_id, Repository};
use console::style;
use git2::Oid;
use std::io::Write;

use super::{invalid_input, is_null_sha, parse_oid, HookOutcome, Prompter};

const HOOK: &str = "pre-push";

/// One line of the ref list git writes to the hook's stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefUpdate {
    pub local_ref: String,
    /// `None` when the remote ref is being deleted.
    pub local_oid: Option<Oid>,
    pub remote_ref: String,
    /// `None` when the remote ref does not exist yet.
    pub remote_oid: Option<Oid>,
}

impl RefUpdate {
    /// Parse `<local ref> <local sha> <remote ref> <remote sha>` lines.
    pub fn parse_all(input: &str) -> Result<Vec<Self>> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| Self::parse(i + 1, line))
            .collect()
    }

    fn parse(line_no: usize, line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [local_ref, local_sha, remote_ref, remote_sha] = fields[..] else {
            return Err(invalid_input(HOOK, line_no, line));
        };

        let oid = |sha: &str| -> Result<Option<Oid>> {
            if is_null_sha(sha) {
                Ok(None)
            } else {
                parse_oid(HOOK, line_no, line, sha).map(Some)
            }
        };

        Ok(Self {
            local_ref: local_ref.to_string(),
            local_oid: oid(local_sha)?,
            remote_ref: remote_ref.to_string(),
            remote_oid: oid(remote_sha)?,
        })
    }

    /// Short name of the destination branch, if the remote ref is a branch.
    pub fn destination_branch(&self) -> Option<&str> {
        self.remote_ref.strip_prefix("refs/heads/")
    }
}

/// A marked commit that would land on a base branch.
#[derive(Debug, Clone)]
struct Unsquashed {
    branch: String,
    oid: Oid,
    title: String,
}

/// Run the hook for the updates git is about to push to `remote`.
pub fn run(
    repo: &Repository,
    config: &RhConfig,
    remote: &str,
    updates: &[RefUpdate],
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<HookOutcome> {
    let mut pushed = 0;
    let mut unsquashed = Vec::new();

    for update in updates {
        let Some(local_oid) = update.local_oid else {
            tracing::debug!("Skipping deletion of {}", update.remote_ref);
            continue;
        };
        let Some(branch) = update.destination_branch() else {
            tracing::debug!("Skipping non-branch ref {}", update.remote_ref);
            continue;
        };

        let commits = pushed_commits(repo, remote, update, local_oid)?;
        tracing::debug!("{} commit(s) to push to {}", commits.len(), branch);
        pushed += commits.len();

        if config.review.is_base_branch(branch) {
            for oid in commits {
                let title = repo.commit_title(oid)?;
                if Marker::is_marked(&title) {
                    unsquashed.push(Unsquashed {
                        branch: branch.to_string(),
                        oid,
                        title,
                    });
                }
            }
        }
    }

    if !unsquashed.is_empty() {
        report_unsquashed(remote, &unsquashed, out)?;
        return Ok(HookOutcome::Reject);
    }

    if pushed == 0 || !config.push.confirm {
        return Ok(HookOutcome::Accept);
    }

    run_checklist(&config.push.checklist, prompter, out)
}

/// Commits the remote does not have yet.
///
/// For a new remote branch everything already on a tracking branch of
/// `remote` is assumed to be there.
fn pushed_commits(
    repo: &Repository,
    remote: &str,
    update: &RefUpdate,
    local_oid: Oid,
) -> Result<Vec<Oid>> {
    let hide = match update.remote_oid {
        Some(remote_oid) if repo.contains(remote_oid) => vec![remote_oid],
        Some(remote_oid) => {
            tracing::debug!("Remote tip {} is unknown locally", short_id(remote_oid));
            repo.remote_tips(remote)?
        }
        None => repo.remote_tips(remote)?,
    };
    repo.commits_between(&hide, local_oid)
}

fn report_unsquashed(remote: &str, commits: &[Unsquashed], out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{} Unsquashed fixup/squash commits would be pushed to a base branch:",
        style("✗").red().bold()
    )?;
    for commit in commits {
        writeln!(
            out,
            "  {} {} {}",
            style(&commit.branch).cyan(),
            style(short_id(commit.oid)).yellow(),
            commit.title
        )?;
    }
    if let Some(first) = commits.first() {
        writeln!(out)?;
        writeln!(
            out,
            "{} {}",
            style("→").dim(),
            style(format!(
                "Squash them first: git rebase -i --autosquash {}/{}",
                remote, first.branch
            ))
            .dim()
        )?;
    }
    Ok(())
}

fn run_checklist(
    checklist: &[String],
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<HookOutcome> {
    for question in checklist {
        match prompter.confirm(question) {
            Ok(true) => continue,
            Ok(false) => {
                writeln!(
                    out,
                    "{} Push aborted. Take care of it and push again.",
                    style("✗").red().bold()
                )?;
                return Ok(HookOutcome::Reject);
            }
            Err(RhError::Hook(HookError::NoTerminal { message })) => {
                tracing::warn!("Skipping push checklist: {}", message);
                writeln!(
                    out,
                    "{} No terminal available; skipping the push checklist.",
                    style("⚠").yellow().bold()
                )?;
                return Ok(HookOutcome::Accept);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(HookOutcome::Accept)
}
