// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! rh - git hooks for review-friendly commit history
//!
//! Keeps a branch's history readable while it is under code review.
//!
//! # Features
//!
//! - **Commit message rules**: title length, mood and punctuation, body layout
//! - **Fixup discipline**: `fixup!`/`squash!` titles must name a commit on the branch
//! - **Push guard**: unsquashed fixups never reach a base branch
//! - **Rewrite warnings**: amending or rebasing pushed commits is called out
//!
//! # Example
//!
//! ```no_run
//! use rh::config::RhConfig;
//! use rh::rules::RuleEngine;
//!
//! let config = RhConfig::load().unwrap();
//! let engine = RuleEngine::new(config.rules);
//!
//! let result = engine
//!     .validate_str("Add widget support\n\nExplains rationale.\n", None)
//!     .unwrap();
//! assert!(result.is_valid());
//! ```

pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod rules;

pub use config::RhConfig;
pub use error::{Result, RhError};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of rh.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Whether the build tree had uncommitted changes.
    pub const GIT_DIRTY: Option<&str> = option_env!("VERGEN_GIT_DIRTY");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        let dirty = if GIT_DIRTY == Some("true") { "-dirty" } else { "" };
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({}{} {})", VERSION, &sha[..7.min(sha.len())], dirty, date)
            }
            (Some(sha), None) => {
                format!("{} ({}{})", VERSION, &sha[..7.min(sha.len())], dirty)
            }
            _ => VERSION.to_string(),
        }
    }

}
