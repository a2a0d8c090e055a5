// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use crate::hooks::HOOK_NAMES;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// rh - git hooks for review-friendly history
///
/// Validates commit messages and keeps fixup!/squash! workflows honest
/// while a branch is under review.
#[derive(Parser, Debug)]
#[command(name = "rh")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Git hooks for review-friendly commit history", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The hook or command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for validation reports
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RH_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// commit-msg hook: validate the message file
    CommitMsg {
        /// File holding the proposed commit message
        file: PathBuf,
    },

    /// pre-push hook: block unsquashed fixups and run the push checklist
    PrePush {
        /// Name of the remote being pushed to
        remote: String,

        /// URL of the remote
        url: Option<String>,
    },

    /// post-commit hook: suggest fixup commits on branches under review
    PostCommit,

    /// pre-rebase hook: confirm before rewriting pushed commits
    PreRebase {
        /// Upstream the series is rebased onto
        upstream: String,

        /// Branch being rebased (default: current branch)
        branch: Option<String>,
    },

    /// post-rewrite hook: report rewritten commits that were pushed
    PostRewrite {
        /// Command that rewrote the commits (amend or rebase)
        command: String,
    },

    /// Validate a commit message file, or stdin
    Check(CheckArgs),

    /// Write an example configuration to rh.toml
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Message file to check (default: read stdin)
    pub file: Option<PathBuf>,

    /// Do not look up the branch's commits for fixup!/squash! targets
    #[arg(long)]
    pub no_history: bool,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone, Default)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Parse the process arguments, honouring hook-named symlinks.
    pub fn parse_invocation() -> Self {
        Self::parse_from(hook_invocation(std::env::args_os()))
    }
}

/// Rewrite `.git/hooks/pre-push <args>` into `rh pre-push <args>`.
///
/// Arguments are returned unchanged unless the executable is named after
/// a supported hook.
pub fn hook_invocation<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    let hook = args
        .first()
        .and_then(|argv0| Path::new(argv0).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| HOOK_NAMES.contains(name))
        .map(str::to_string);

    if let Some(hook) = hook {
        tracing::debug!("Invoked as the {} hook", hook);
        args.insert(1, OsString::from(hook));
    }
    args
}
