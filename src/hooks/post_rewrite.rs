// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The post-rewrite hook: report when pushed commits were amended or rebased.

use crate::commit::Marker;
use crate::config::RhConfig;
use crate::error::{HookError, Result, RhError};
use crate::git::{short_id, Repository};
use console::style;
use git2::Oid;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use super::{invalid_input, parse_oid, HookOutcome, ReviewBranch};

const HOOK: &str = "post-rewrite";

/// The command that rewrote the commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteKind {
    Amend,
    Rebase,
}

impl FromStr for RewriteKind {
    type Err = RhError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "amend" => Ok(RewriteKind::Amend),
            "rebase" => Ok(RewriteKind::Rebase),
            other => Err(RhError::Hook(HookError::UnknownRewrite {
                command: other.to_string(),
            })),
        }
    }
}

impl fmt::Display for RewriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteKind::Amend => write!(f, "amended"),
            RewriteKind::Rebase => write!(f, "rebased"),
        }
    }
}

/// One `<old sha> <new sha> [<extra>]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub old: Oid,
    pub new: Oid,
}

impl Rewrite {
    /// Parse the lines git writes to the hook's stdin.
    pub fn parse_all(input: &str) -> Result<Vec<Self>> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| Self::parse(i + 1, line))
            .collect()
    }

    fn parse(line_no: usize, line: &str) -> Result<Self> {
        let mut fields = line.split_whitespace();
        let (Some(old), Some(new)) = (fields.next(), fields.next()) else {
            return Err(invalid_input(HOOK, line_no, line));
        };
        Ok(Self {
            old: parse_oid(HOOK, line_no, line, old)?,
            new: parse_oid(HOOK, line_no, line, new)?,
        })
    }
}

/// Run the hook after `kind` rewrote `rewrites`. Never blocks.
pub fn run(
    repo: &Repository,
    config: &RhConfig,
    kind: RewriteKind,
    rewrites: &[Rewrite],
    out: &mut dyn Write,
) -> Result<HookOutcome> {
    if kind == RewriteKind::Rebase && is_autosquash(repo, rewrites)? {
        tracing::debug!("Rebase squashed fixup commits; nothing to report");
        return Ok(HookOutcome::Accept);
    }

    let Some(branch) = ReviewBranch::find(repo, config, None)? else {
        return Ok(HookOutcome::Accept);
    };

    let mut pushed = Vec::new();
    for rewrite in rewrites {
        if repo.contains(rewrite.old) && repo.is_ancestor(rewrite.old, branch.tracking_oid)? {
            pushed.push(rewrite.old);
        }
    }
    tracing::debug!("{} of {} rewritten commit(s) were pushed", pushed.len(), rewrites.len());

    if pushed.is_empty() {
        return Ok(HookOutcome::Accept);
    }

    writeln!(
        out,
        "{} You {} {} commit(s) already pushed to {}:",
        style("⚠").yellow().bold(),
        kind,
        pushed.len(),
        style(&branch.tracking).cyan()
    )?;
    for oid in &pushed {
        writeln!(
            out,
            "  {} {}",
            style(short_id(*oid)).yellow(),
            repo.commit_title(*oid)?
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        style("→").dim(),
        style("Reviewers can no longer see what changed since their last pass. During review, prefer git commit --fixup=<commit>; this branch now needs a force-push.")
            .dim()
    )?;

    Ok(HookOutcome::Accept)
}

/// Whether any rewritten commit was a fixup!/squash! commit.
fn is_autosquash(repo: &Repository, rewrites: &[Rewrite]) -> Result<bool> {
    for rewrite in rewrites {
        if repo.contains(rewrite.old) && Marker::is_marked(&repo.commit_title(rewrite.old)?) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::{checkout_new, commit, init, track};

    fn report(repo: &Repository, kind: RewriteKind, rewrites: &[Rewrite]) -> String {
        let mut out = Vec::new();
        let outcome = run(repo, &RhConfig::default(), kind, rewrites, &mut out).unwrap();
        assert_eq!(outcome, HookOutcome::Accept);
        String::from_utf8(out).unwrap()
    }

    /// `topic` pushed up to "Add widget support", then the given local commits.
    fn topic_repo(local: &[&str]) -> (tempfile::TempDir, Repository, Vec<Oid>) {
        let (dir, repo) = init();
        commit(&repo, "Add base");
        checkout_new(&repo, "main");
        checkout_new(&repo, "topic");
        let pushed = commit(&repo, "Add widget support");
        track(&repo, "topic", pushed);
        let mut oids = vec![pushed];
        oids.extend(local.iter().map(|title| commit(&repo, title)));
        (dir, repo, oids)
    }

    fn rewritten(old: &[Oid], new: Oid) -> Vec<Rewrite> {
        old.iter().map(|&old| Rewrite { old, new }).collect()
    }

    #[test]
    fn test_parse() {
        let a = "1111111111111111111111111111111111111111";
        let b = "2222222222222222222222222222222222222222";
        let rewrites = Rewrite::parse_all(&format!("{} {}\n{} {} extra\n", a, b, b, a)).unwrap();
        assert_eq!(rewrites.len(), 2);
        assert_eq!(rewrites[1].old, Oid::from_str(b).unwrap());

        assert!(Rewrite::parse_all(a).is_err());
        assert!(matches!(
            "squash".parse::<RewriteKind>(),
            Err(RhError::Hook(HookError::UnknownRewrite { .. }))
        ));
        assert_eq!("amend".parse::<RewriteKind>().unwrap(), RewriteKind::Amend);
    }

    #[test]
    fn test_amend_of_pushed_commit() {
        let (_dir, repo, oids) = topic_repo(&[]);
        let out = report(&repo, RewriteKind::Amend, &rewritten(&oids, oids[0]));
        assert!(out.contains("amended 1 commit(s)"));
        assert!(out.contains("Add widget support"));
        assert!(out.contains("--fixup"));
    }

    #[test]
    fn test_amend_of_local_commit() {
        let (_dir, repo, oids) = topic_repo(&["Rename widget field"]);
        assert!(report(&repo, RewriteKind::Amend, &rewritten(&oids[1..], oids[1])).is_empty());
    }

    #[test]
    fn test_rebase_of_pushed_commits() {
        let (_dir, repo, oids) = topic_repo(&["Rename widget field"]);
        let out = report(&repo, RewriteKind::Rebase, &rewritten(&oids, oids[1]));
        assert!(out.contains("rebased 1 commit(s)"));
    }

    #[test]
    fn test_autosquash_is_silent() {
        // The marked commit is not the first one rewritten.
        let (_dir, repo, oids) = topic_repo(&["Rename widget field", "fixup! Add widget support"]);
        assert!(report(&repo, RewriteKind::Rebase, &rewritten(&oids, oids[2])).is_empty());
    }

    #[test]
    fn test_amend_of_fixup_still_reports() {
        let (_dir, repo, oids) = topic_repo(&[]);
        let fixup = commit(&repo, "fixup! Add widget support");
        track(&repo, "topic", fixup);
        let out = report(&repo, RewriteKind::Amend, &rewritten(&[fixup], oids[0]));
        assert!(out.contains("amended 1 commit(s)"));
    }
}
