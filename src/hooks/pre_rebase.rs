// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The pre-rebase hook: ask before rewriting commits that were pushed.

use crate::config::RhConfig;
use crate::error::{HookError, Result, RhError};
use crate::git::Repository;
use console::style;
use std::io::Write;

use super::{HookOutcome, Prompter, ReviewBranch};

/// Run the hook for `git rebase <upstream> [<branch>]`.
pub fn run(
    repo: &Repository,
    config: &RhConfig,
    upstream: &str,
    branch: Option<&str>,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<HookOutcome> {
    let Some(review) = ReviewBranch::find(repo, config, branch)? else {
        return Ok(HookOutcome::Accept);
    };

    let onto = repo.resolve(upstream)?;
    let tip = repo.resolve(&format!("refs/heads/{}", review.name))?;

    let mut pushed = 0;
    for oid in repo.commits_between(&[onto], tip)? {
        if repo.is_ancestor(oid, review.tracking_oid)? {
            pushed += 1;
        }
    }
    tracing::debug!("Rebase of {} rewrites {} pushed commit(s)", review.name, pushed);

    if pushed == 0 {
        return Ok(HookOutcome::Accept);
    }

    writeln!(
        out,
        "{} This rebase rewrites {} commit(s) of {} already pushed to {}.",
        style("⚠").yellow().bold(),
        pushed,
        style(&review.name).cyan(),
        style(&review.tracking).cyan()
    )?;
    writeln!(
        out,
        "  {}",
        style("Reviewers lose track of what changed. While the review is open, prefer fixup!/squash! commits.")
            .dim()
    )?;

    match prompter.confirm("Rebase anyway?") {
        Ok(true) => Ok(HookOutcome::Accept),
        Ok(false) => {
            writeln!(out, "{} Rebase aborted.", style("✗").red().bold())?;
            Ok(HookOutcome::Reject)
        }
        Err(RhError::Hook(HookError::NoTerminal { message })) => {
            tracing::warn!("Cannot ask about the rebase: {}", message);
            writeln!(
                out,
                "{} No terminal available; rebasing anyway.",
                style("⚠").yellow().bold()
            )?;
            Ok(HookOutcome::Accept)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::{checkout_new, commit, init, track};
    use crate::hooks::testing::ScriptedPrompter;

    /// `main` at "Add base" and a `topic` with one pushed and one local commit.
    fn topic_repo() -> (tempfile::TempDir, Repository) {
        let (dir, repo) = init();
        commit(&repo, "Add base");
        checkout_new(&repo, "main");
        checkout_new(&repo, "topic");
        let pushed = commit(&repo, "Add widget support");
        track(&repo, "topic", pushed);
        commit(&repo, "Rename widget field");
        (dir, repo)
    }

    fn rebase(
        repo: &Repository,
        upstream: &str,
        branch: Option<&str>,
        prompter: &mut ScriptedPrompter,
    ) -> (HookOutcome, String) {
        let mut out = Vec::new();
        let outcome =
            run(repo, &RhConfig::default(), upstream, branch, prompter, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_asks_before_rewriting_pushed_commits() {
        let (_dir, repo) = topic_repo();
        let mut prompter = ScriptedPrompter::answering(&[false]);
        let (outcome, out) = rebase(&repo, "main", None, &mut prompter);
        assert_eq!(outcome, HookOutcome::Reject);
        assert!(out.contains("1 commit(s)"));
        assert!(out.contains("Rebase aborted"));
        assert_eq!(prompter.asked, vec!["Rebase anyway?"]);
    }

    #[test]
    fn test_yes_proceeds() {
        let (_dir, repo) = topic_repo();
        let mut prompter = ScriptedPrompter::answering(&[true]);
        let (outcome, _) = rebase(&repo, "main", Some("topic"), &mut prompter);
        assert_eq!(outcome, HookOutcome::Accept);
    }

    #[test]
    fn test_local_commits_only() {
        let (_dir, repo) = topic_repo();
        let mut prompter = ScriptedPrompter::answering(&[]);
        let (outcome, out) = rebase(&repo, "origin/topic", None, &mut prompter);
        assert_eq!(outcome, HookOutcome::Accept);
        assert!(out.is_empty());
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_no_terminal_proceeds() {
        let (_dir, repo) = topic_repo();
        let mut prompter = ScriptedPrompter::unavailable();
        let (outcome, out) = rebase(&repo, "main", None, &mut prompter);
        assert_eq!(outcome, HookOutcome::Accept);
        assert!(out.contains("rebasing anyway"));
    }

    #[test]
    fn test_unpushed_branch_is_not_checked() {
        let (_dir, repo) = init();
        commit(&repo, "Add base");
        checkout_new(&repo, "main");
        checkout_new(&repo, "topic");
        commit(&repo, "Add widget support");
        let mut prompter = ScriptedPrompter::answering(&[]);
        let (outcome, _) = rebase(&repo, "main", None, &mut prompter);
        assert_eq!(outcome, HookOutcome::Accept);
        assert!(prompter.asked.is_empty());
    }
}
