// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The commit-msg hook: validate the message git is about to record.

use crate::cli::args::OutputFormat;
use crate::config::RhConfig;
use crate::error::{InputError, Result};
use crate::rules::{BranchHistory, RuleEngine, ValidationResult};
use std::path::Path;

use super::HookOutcome;

/// Read and validate a commit message file.
pub fn validate_file(
    path: &Path,
    config: &RhConfig,
    history: Option<&dyn BranchHistory>,
) -> Result<ValidationResult> {
    let raw = std::fs::read_to_string(path).map_err(|e| InputError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    validate_text(&raw, config, history)
}

/// Validate raw commit message text.
pub fn validate_text(
    raw: &str,
    config: &RhConfig,
    history: Option<&dyn BranchHistory>,
) -> Result<ValidationResult> {
    RuleEngine::new(config.rules.clone()).validate_str(raw, history)
}

/// Run the hook against the message file git passed in.
pub fn run(
    path: &Path,
    config: &RhConfig,
    history: Option<&dyn BranchHistory>,
    format: Option<OutputFormat>,
) -> Result<HookOutcome> {
    let result = validate_file(path, config, history)?;
    result.print(format, &config.ui.reminder, Some(path));

    if result.is_valid() {
        Ok(HookOutcome::Accept)
    } else {
        tracing::debug!("Rejecting commit: {}", result.summary());
        Ok(HookOutcome::Reject)
    }
}
