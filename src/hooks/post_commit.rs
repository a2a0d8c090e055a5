// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The post-commit hook: nudge towards fixup commits on pushed branches.

use crate::commit::Marker;
use crate::config::RhConfig;
use crate::error::Result;
use crate::git::{short_id, Repository};
use console::style;
use git2::Oid;
use std::io::Write;

use super::{HookOutcome, ReviewBranch};

/// How many of the branch's pushed commits the nudge lists.
const SHOWN_COMMITS: usize = 5;

/// Run the hook after a commit has been recorded. Never blocks.
pub fn run(repo: &Repository, config: &RhConfig, out: &mut dyn Write) -> Result<HookOutcome> {
    let Some(branch) = ReviewBranch::find(repo, config, None)? else {
        return Ok(HookOutcome::Accept);
    };

    let head = repo.resolve("HEAD")?;
    if head == branch.tracking_oid || !repo.is_ancestor(branch.tracking_oid, head)? {
        tracing::debug!("{} does not extend {}", branch.name, branch.tracking);
        return Ok(HookOutcome::Accept);
    }

    let title = repo.commit_title(head)?;
    if Marker::is_marked(&title) {
        return Ok(HookOutcome::Accept);
    }

    let reviewed = reviewed_commits(repo, config, branch.tracking_oid)?;
    writeln!(
        out,
        "{} {} is under review on {}. If this commit answers review feedback, \
         make it a fixup of the commit it changes:",
        style("⚠").yellow().bold(),
        style(&branch.name).cyan(),
        style(&branch.tracking).cyan()
    )?;
    writeln!(
        out,
        "  {}",
        style("git reset --soft HEAD~1 && git commit --fixup=<commit>").bold()
    )?;

    if !reviewed.is_empty() {
        writeln!(out)?;
        writeln!(out, "Commits under review:")?;
        for oid in reviewed.iter().take(SHOWN_COMMITS) {
            writeln!(
                out,
                "  {} {}",
                style(short_id(*oid)).yellow(),
                repo.commit_title(*oid)?
            )?;
        }
        if reviewed.len() > SHOWN_COMMITS {
            writeln!(out, "  ... and {} more", reviewed.len() - SHOWN_COMMITS)?;
        }
    }

    Ok(HookOutcome::Accept)
}

/// Pushed commits of the branch that are not on any base branch.
fn reviewed_commits(repo: &Repository, config: &RhConfig, tracking: Oid) -> Result<Vec<Oid>> {
    let bases: Vec<Oid> = config
        .review
        .base_branches
        .iter()
        .filter_map(|name| repo.resolve(name).ok())
        .collect();
    repo.commits_between(&bases, tracking)
}
