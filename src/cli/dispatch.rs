// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use crate::config::RhConfig;
use crate::error::{ConfigError, Result, ResultExt, RhError};
use crate::git::{GitCli, Repository};
use crate::hooks::{
    commit_msg, post_commit, post_rewrite, pre_push, pre_rebase, HookOutcome, TtyPrompter,
};
use crate::rules::BranchHistory;
use std::io::{self, Read};
use std::path::Path;

use super::args::{CheckArgs, Cli, Commands, InitArgs};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<HookOutcome> {
    let config = load_config(&cli)?;
    console::set_colors_enabled(config.ui.color && console::colors_enabled());

    tracing::debug!("Running {:?}", cli.command);

    match cli.command.clone() {
        Commands::CommitMsg { file } => {
            let history = GitCli::new(&config.git);
            commit_msg::run(&file, &config, Some(&history), cli.format)
        }
        Commands::PrePush { remote, url } => {
            tracing::debug!("Pushing to {} ({})", remote, url.as_deref().unwrap_or("no url"));
            let repo = Repository::open_current()?;
            let updates = pre_push::RefUpdate::parse_all(&read_stdin()?)?;
            pre_push::run(
                &repo,
                &config,
                &remote,
                &updates,
                &mut TtyPrompter::new(),
                &mut io::stdout(),
            )
        }
        Commands::PostCommit => {
            let repo = Repository::open_current()?;
            post_commit::run(&repo, &config, &mut io::stdout())
        }
        Commands::PreRebase { upstream, branch } => {
            let repo = Repository::open_current()?;
            pre_rebase::run(
                &repo,
                &config,
                &upstream,
                branch.as_deref(),
                &mut TtyPrompter::new(),
                &mut io::stdout(),
            )
        }
        Commands::PostRewrite { command } => {
            let kind: post_rewrite::RewriteKind = command.parse()?;
            let repo = Repository::open_current()?;
            let rewrites = post_rewrite::Rewrite::parse_all(&read_stdin()?)?;
            post_rewrite::run(&repo, &config, kind, &rewrites, &mut io::stdout())
        }
        Commands::Check(args) => run_check(&cli, &config, args),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

fn load_config(cli: &Cli) -> Result<RhConfig> {
    match &cli.config {
        Some(path) => RhConfig::load_from(path),
        None => RhConfig::load(),
    }
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading stdin")?;
    Ok(input)
}

/// Run the check command.
fn run_check(cli: &Cli, config: &RhConfig, args: CheckArgs) -> Result<HookOutcome> {
    let git = GitCli::new(&config.git);
    let history: Option<&dyn BranchHistory> = if args.no_history {
        None
    } else {
        Some(&git)
    };

    let result = match &args.file {
        Some(file) => commit_msg::validate_file(file, config, history)?,
        None => commit_msg::validate_text(&read_stdin()?, config, history)?,
    };
    result.print(cli.format, &config.ui.reminder, None);

    if result.is_valid() {
        Ok(HookOutcome::Accept)
    } else {
        Ok(HookOutcome::Reject)
    }
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<HookOutcome> {
    use crate::config::example_config;

    let config_path = Path::new("rh.toml");

    if config_path.exists() && !args.force {
        return Err(RhError::Config(ConfigError::InvalidValue {
            key: config_path.display().to_string(),
            message: "Configuration file already exists. Use --force to overwrite.".to_string(),
        }));
    }

    std::fs::write(config_path, example_config())
        .context(format!("writing {}", config_path.display()))?;
    println!("✓ Created {}", config_path.display());
    Ok(HookOutcome::Accept)
}

/// Run the version command.
fn run_version() -> Result<HookOutcome> {
    println!("rh {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(HookOutcome::Accept)
}
