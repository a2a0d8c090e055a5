// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from rh.toml.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// The main configuration structure for rh.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RhConfig {
    /// Commit message rule configuration.
    pub rules: RulesConfig,

    /// Review workflow configuration.
    pub review: ReviewConfig,

    /// pre-push checklist configuration.
    pub push: PushConfig,

    /// Git invocation settings.
    pub git: GitConfig,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

impl RhConfig {
    /// Load configuration from the default locations.
    pub fn load() -> Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Reject values the hooks cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.rules.max_title_length == 0 {
            return Err(invalid("rules.max_title_length", "must be greater than zero"));
        }
        if self.rules.max_body_line_length == 0 {
            return Err(invalid(
                "rules.max_body_line_length",
                "must be greater than zero",
            ));
        }
        if self.rules.comment_char.chars().count() != 1 {
            return Err(invalid(
                "rules.comment_char",
                &format!("must be a single character, got '{}'", self.rules.comment_char),
            ));
        }
        if self.git.timeout_secs == 0 {
            return Err(invalid("git.timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> crate::error::RhError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
    .into()
}

/// Commit message rule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Maximum title length, not counting a `fixup! `/`squash! ` prefix.
    pub max_title_length: usize,

    /// Maximum length of a body line.
    pub max_body_line_length: usize,

    /// Lines starting with this character are comments.
    pub comment_char: String,

    /// Title substrings that suggest more than one change.
    pub joining_phrases: Vec<String>,

    /// Title prefixes that suggest a fixup!/squash! commit instead.
    pub review_prefixes: Vec<String>,

    /// Title substrings that carry no information.
    pub useless_words: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_title_length: 50,
            max_body_line_length: 72,
            comment_char: "#".to_string(),
            joining_phrases: strings(&[". ", ";", " also ", " Also ", " and ", " And "]),
            review_prefixes: strings(&["Address", "address", "Review", "review"]),
            useless_words: strings(&[
                "Attempt", "First", "Commit", "Initial", "Pass", "attempt", "first", "commit",
                "initial", "pass",
            ]),
        }
    }
}

/// Review workflow configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Branches that receive reviewed work. Feature branches are everything else.
    pub base_branches: Vec<String>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            base_branches: strings(&["main", "master"]),
        }
    }
}

impl ReviewConfig {
    /// Whether `branch` is one of the base branches.
    pub fn is_base_branch(&self, branch: &str) -> bool {
        self.base_branches.iter().any(|b| b == branch)
    }
}

/// pre-push configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Whether to ask the checklist before pushing.
    pub confirm: bool,

    /// Questions that must all be answered "yes".
    pub checklist: Vec<String>,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            confirm: true,
            checklist: strings(&[
                "Have you reviewed your own diff?",
                "Do the tests pass locally?",
            ]),
        }
    }
}

/// Git invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Revision that marks where the current branch starts.
    pub upstream: String,

    /// Upper bound for a single git subprocess.
    pub timeout_secs: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            upstream: "@{upstream}".to_string(),
            timeout_secs: 10,
        }
    }
}

/// UI/UX configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,

    /// Printed after every commit-msg report.
    pub reminder: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            reminder: "A good title completes the sentence \"If applied, this commit will ...\"; \
                       during review, prefer `git commit --fixup` over amending."
                .to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
