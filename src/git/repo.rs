// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{GitError, Result, RhError};
use git2::{BranchType, Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with the queries the hooks need.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            RhError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                RhError::Git(GitError::NotARepository)
            } else {
                RhError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        if repo.is_bare() {
            return Err(RhError::Git(GitError::OpenFailed {
                message: "Repository has no working directory (bare repository)".to_string(),
            }));
        }

        Ok(Self { inner: repo })
    }

    /// Get the current branch name.
    pub fn branch_name(&self) -> Result<String> {
        let head = self.inner.head().map_err(|e| {
            if e.code() == git2::ErrorCode::UnbornBranch {
                RhError::Git(GitError::DetachedHead)
            } else {
                RhError::Git(GitError::BranchFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        if head.is_branch() {
            let name = head.shorthand().ok_or_else(|| {
                RhError::Git(GitError::BranchFailed {
                    message: "Invalid branch name encoding".to_string(),
                })
            })?;
            Ok(name.to_string())
        } else {
            Err(RhError::Git(GitError::DetachedHead))
        }
    }

    /// The remote-tracking branch of a local branch, e.g. `origin/topic`.
    ///
    /// `Ok(None)` when the branch has no upstream configured.
    pub fn upstream_of(&self, branch: &str) -> Result<Option<String>> {
        let local = self
            .inner
            .find_branch(branch, BranchType::Local)
            .map_err(|e| {
                RhError::Git(GitError::BranchFailed {
                    message: format!("{}: {}", branch, e.message()),
                })
            })?;

        let upstream = match local.upstream() {
            Ok(upstream) => upstream,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => {
                return Err(RhError::Git(GitError::BranchFailed {
                    message: format!("{}: {}", branch, e.message()),
                }))
            }
        };

        let name = upstream.name().map_err(GitError::from)?.ok_or_else(|| {
            RhError::Git(GitError::BranchFailed {
                message: "Invalid upstream name encoding".to_string(),
            })
        })?;
        Ok(Some(name.to_string()))
    }

    /// Resolve a revision (SHA, branch name, `HEAD~2`, ...) to a commit id.
    pub fn resolve(&self, reference: &str) -> Result<Oid> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            RhError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            RhError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok(commit.id())
    }

    /// Whether the object exists in the local object database.
    pub fn contains(&self, oid: Oid) -> bool {
        self.inner.find_commit(oid).is_ok()
    }

    /// Commits reachable from `tip` but from none of `hide`, newest first.
    pub fn commits_between(&self, hide: &[Oid], tip: Oid) -> Result<Vec<Oid>> {
        let mut revwalk = self.inner.revwalk().map_err(|e| walk_error("revwalk", e))?;
        revwalk
            .set_sorting(git2::Sort::TOPOLOGICAL)
            .map_err(|e| walk_error("revwalk.sort", e))?;
        revwalk.push(tip).map_err(|e| walk_error("revwalk.push", e))?;
        for oid in hide {
            revwalk.hide(*oid).map_err(|e| walk_error("revwalk.hide", e))?;
        }

        revwalk
            .map(|oid| oid.map_err(|e| walk_error("revwalk", e)))
            .collect()
    }

    /// Tips of every remote-tracking branch of `remote`.
    pub fn remote_tips(&self, remote: &str) -> Result<Vec<Oid>> {
        let glob = format!("refs/remotes/{}/*", remote);
        let refs = self
            .inner
            .references_glob(&glob)
            .map_err(|e| walk_error("references_glob", e))?;

        let mut tips = Vec::new();
        for reference in refs {
            let reference = reference.map_err(|e| walk_error("references_glob", e))?;
            if let Ok(commit) = reference.peel_to_commit() {
                tips.push(commit.id());
            }
        }
        Ok(tips)
    }

    /// Whether `ancestor` is `descendant` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: Oid, descendant: Oid) -> Result<bool> {
        if ancestor == descendant {
            return Ok(true);
        }
        self.inner
            .graph_descendant_of(descendant, ancestor)
            .map_err(|e| walk_error("graph_descendant_of", e))
    }

    /// The first line of a commit message.
    pub fn commit_title(&self, oid: Oid) -> Result<String> {
        let commit = self.inner.find_commit(oid).map_err(|e| {
            RhError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", oid, e.message()),
            })
        })?;
        let message = commit.message().unwrap_or("");
        Ok(message.lines().next().unwrap_or("").to_string())
    }
}

fn walk_error(command: &str, e: git2::Error) -> RhError {
    RhError::Git(GitError::CommandFailed {
        command: command.to_string(),
        message: e.message().to_string(),
    })
}

/// Abbreviate a commit id the way `git log --oneline` does.
pub fn short_id(oid: Oid) -> String {
    let full = oid.to_string();
    full[..7.min(full.len())].to_string()
}
