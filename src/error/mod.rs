// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for rh.
//!
//! Validation problems in a commit message are not errors here: they are
//! verdicts (see [`crate::rules::Verdict`]). The types below cover everything
//! that stops a hook from running to completion.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rh operations.
#[derive(Error, Debug)]
pub enum RhError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Commit message errors
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),

    // Hook protocol errors
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    // Unreadable hook input
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // UI/Interactive errors
    #[error("UI error: {0}")]
    Ui(String),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl From<dialoguer::Error> for RhError {
    fn from(err: dialoguer::Error) -> Self {
        RhError::Ui(err.to_string())
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Detached HEAD state")]
    DetachedHead,

    #[error("Failed to get branch: {message}")]
    BranchFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    #[error("Git command timed out after {seconds}s: {command}")]
    Timeout { command: String, seconds: u64 },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// Commit message errors.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Empty commit message")]
    EmptyMessage,
}

/// Errors in the data git hands to a hook.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Malformed input for {hook} on line {line}: '{content}'")]
    InvalidInput {
        hook: String,
        line: usize,
        content: String,
    },

    #[error("No interactive terminal available: {message}")]
    NoTerminal { message: String },

    #[error("Unknown rewrite command: '{command}' (expected 'amend' or 'rebase')")]
    UnknownRewrite { command: String },
}

/// Hook input that could not be read.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Cannot read commit message {path}: {message}")]
    Unreadable { path: PathBuf, message: String },
}

/// Result type alias for rh operations.
pub type Result<T> = std::result::Result<T, RhError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| RhError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/rh.toml"),
        };
        assert!(err.to_string().contains("/path/to/rh.toml"));
    }

    #[test]
    fn test_timeout_display() {
        let err = GitError::Timeout {
            command: "git log".to_string(),
            seconds: 10,
        };
        let text = err.to_string();
        assert!(text.contains("10s"));
        assert!(text.contains("git log"));
    }

    #[test]
    fn test_rh_error_from_input_error() {
        let input_err = InputError::Unreadable {
            path: PathBuf::from(".git/COMMIT_EDITMSG"),
            message: "No such file or directory".to_string(),
        };
        let rh_err: RhError = input_err.into();
        assert!(matches!(rh_err, RhError::Input(_)));
        assert!(rh_err.to_string().contains("COMMIT_EDITMSG"));
    }

    #[test]
    fn test_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = result.context("reading stdin").unwrap_err();
        assert_eq!(err.to_string(), "reading stdin: gone");
    }
}
