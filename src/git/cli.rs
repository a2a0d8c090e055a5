// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Bounded `git` subprocess calls.

use crate::config::GitConfig;
use crate::error::{GitError, Result, RhError};
use crate::rules::BranchHistory;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Runs the `git` binary with a timeout.
#[derive(Debug, Clone)]
pub struct GitCli {
    upstream: String,
    timeout: Duration,
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Create a runner from the `[git]` configuration section.
    pub fn new(config: &GitConfig) -> Self {
        Self {
            upstream: config.upstream.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            workdir: None,
        }
    }

    /// Run commands in `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.workdir = Some(dir.to_path_buf());
        self
    }

    /// Run `git <args>` and return its stdout.
    ///
    /// Spawn failures, non-zero exits and timeouts are all errors.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!("Running {}", command);

        let mut cmd = Command::new("git");
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref dir) = self.workdir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| {
            RhError::Git(GitError::CommandFailed {
                command: command.clone(),
                message: format!("Failed to spawn git: {}", e),
            })
        })?;

        // Drain the pipes on their own threads so a large log cannot fill
        // the pipe buffer while we wait.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RhError::Git(GitError::Timeout {
                    command,
                    seconds: self.timeout.as_secs(),
                }));
            }
            Err(e) => {
                let _ = child.kill();
                return Err(RhError::Git(GitError::CommandFailed {
                    command,
                    message: format!("Failed to wait for git: {}", e),
                }));
            }
        };

        let stdout = stdout.map(join).unwrap_or_default();
        let stderr = stderr.map(join).unwrap_or_default();

        if !status.success() {
            return Err(RhError::Git(GitError::CommandFailed {
                command,
                message: stderr.trim().to_string(),
            }));
        }

        Ok(stdout)
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

impl BranchHistory for GitCli {
    fn branch_titles(&self) -> Result<Vec<String>> {
        let range = format!("{}..HEAD", self.upstream);
        let output = self.run(&["log", "--format=%s", &range])?;
        Ok(output.lines().map(str::to_string).collect())
    }
}
