// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Verdicts and validation results.

use crate::cli::args::OutputFormat;
use console::{style, Style};
use std::io::{self, Write};
use std::path::Path;

/// A single problem found in a commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Rule code for programmatic handling.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<String>,
}

impl Issue {
    /// Create an issue without a suggestion.
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach a suggestion.
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Format the issue for terminal output.
    pub fn format(&self, is_error: bool) -> String {
        let prefix = if is_error {
            style("✗").red().bold()
        } else {
            style("⚠").yellow().bold()
        };

        let code_style = if is_error {
            Style::new().red()
        } else {
            Style::new().yellow()
        };

        let mut output = format!(
            "{} {} {}",
            prefix,
            code_style.apply_to(self.code),
            self.message
        );

        if let Some(ref suggestion) = self.suggestion {
            output.push_str(&format!(
                "\n    {} {}",
                style("→").dim(),
                style(suggestion).dim()
            ));
        }

        output
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code,
            "message": self.message,
            "suggestion": self.suggestion,
        })
    }
}

/// The outcome of one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing to report.
    Pass,
    /// Blocks the commit.
    Error(Issue),
    /// Reported, never blocks.
    Warning(Issue),
}

impl Verdict {
    /// Whether this verdict blocks the commit.
    pub fn is_error(&self) -> bool {
        matches!(self, Verdict::Error(_))
    }

    /// The issue carried by a failing verdict.
    pub fn issue(&self) -> Option<&Issue> {
        match self {
            Verdict::Pass => None,
            Verdict::Error(issue) | Verdict::Warning(issue) => Some(issue),
        }
    }
}

/// Result of validating a commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Errors, in rule order.
    pub errors: Vec<Issue>,
    /// Warnings, in rule order.
    pub warnings: Vec<Issue>,
}

impl ValidationResult {
    /// Fold one verdict into the result.
    pub fn absorb(mut self, verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => {}
            Verdict::Error(issue) => self.errors.push(issue),
            Verdict::Warning(issue) => self.warnings.push(issue),
        }
        self
    }

    /// Check if the validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Whether an issue with `code` was reported at either severity.
    pub fn has(&self, code: &str) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|issue| issue.code == code)
    }

    /// Print the result to stdout.
    ///
    /// `rejected_file` names the message file in the rejection notice; pass
    /// `None` when the result does not abort a commit.
    pub fn print(&self, format: Option<OutputFormat>, reminder: &str, rejected_file: Option<&Path>) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let written = match format {
            Some(OutputFormat::Json) => self.write_json(&mut out),
            _ => self.write_text(&mut out, reminder, rejected_file),
        };
        if let Err(e) = written {
            tracing::warn!("Failed to write validation report: {}", e);
        }
    }

    /// Write the human-readable report.
    pub fn write_text(
        &self,
        out: &mut dyn Write,
        reminder: &str,
        rejected_file: Option<&Path>,
    ) -> io::Result<()> {
        if self.issue_count() == 0 {
            return Ok(());
        }

        if !self.errors.is_empty() {
            writeln!(out, "{}", style("ERRORS").red().bold())?;
            for error in &self.errors {
                writeln!(out, "  {}", error.format(true))?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(out, "{}", style("WARNINGS").yellow().bold())?;
            for warning in &self.warnings {
                writeln!(out, "  {}", warning.format(false))?;
            }
        }

        writeln!(out)?;
        writeln!(out, "{}", style(reminder).dim())?;

        if !self.is_valid() {
            if let Some(path) = rejected_file {
                writeln!(out)?;
                writeln!(
                    out,
                    "{} Fix the errors above and commit again; your message was saved in {}",
                    style("Commit rejected.").red().bold(),
                    path.display()
                )?;
            }
        }

        Ok(())
    }

    /// Write the JSON report.
    pub fn write_json(&self, out: &mut dyn Write) -> io::Result<()> {
        let json = serde_json::json!({
            "valid": self.is_valid(),
            "errors": self.errors.iter().map(Issue::to_json).collect::<Vec<_>>(),
            "warnings": self.warnings.iter().map(Issue::to_json).collect::<Vec<_>>(),
        });

        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        )
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            if self.warnings.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", self.warnings.len())
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(result: &ValidationResult, rejected: Option<&Path>) -> String {
        let mut buf = Vec::new();
        result.write_text(&mut buf, "Remember the rules", rejected).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_validation_result_valid() {
        let result = ValidationResult::default();
        assert!(result.is_valid());
        assert_eq!(result.issue_count(), 0);
        assert_eq!(render(&result, None), "");
    }

    #[test]
    fn test_absorb() {
        let result = ValidationResult::default()
            .absorb(Verdict::Pass)
            .absorb(Verdict::Warning(Issue::new("missing-body", "No body")))
            .absorb(Verdict::Error(Issue::new("title-length", "Too long")));

        assert!(!result.is_valid());
        assert_eq!(result.issue_count(), 2);
        assert!(result.has("missing-body"));
        assert!(result.has("title-length"));
        assert!(!result.has("title-mood"));
    }

    #[test]
    fn test_verdict_helpers() {
        let error = Verdict::Error(Issue::new("x", "y"));
        assert!(error.is_error());
        assert_eq!(error.issue().map(|i| i.code), Some("x"));
        assert!(!Verdict::Warning(Issue::new("x", "y")).is_error());
        assert!(Verdict::Pass.issue().is_none());
    }

    #[test]
    fn test_text_report_sections() {
        let result = ValidationResult::default()
            .absorb(Verdict::Error(
                Issue::new("title-mood", "Title should use the imperative mood").suggest("Fix it"),
            ))
            .absorb(Verdict::Warning(Issue::new("missing-body", "No body")));

        let text = render(&result, Some(Path::new(".git/COMMIT_EDITMSG")));
        let errors_at = text.find("ERRORS").unwrap();
        let warnings_at = text.find("WARNINGS").unwrap();
        let reminder_at = text.find("Remember the rules").unwrap();
        let rejected_at = text.find("Commit rejected.").unwrap();

        assert!(errors_at < warnings_at);
        assert!(warnings_at < reminder_at);
        assert!(reminder_at < rejected_at);
        assert!(text.contains("Fix it"));
        assert!(text.contains(".git/COMMIT_EDITMSG"));
    }

    #[test]
    fn test_text_report_warnings_only() {
        let result =
            ValidationResult::default().absorb(Verdict::Warning(Issue::new("missing-body", "No body")));

        let text = render(&result, Some(Path::new("msg")));
        assert!(!text.contains("ERRORS"));
        assert!(text.contains("WARNINGS"));
        assert!(text.contains("Remember the rules"));
        assert!(!text.contains("Commit rejected."));
    }

    #[test]
    fn test_json_report() {
        let result = ValidationResult::default()
            .absorb(Verdict::Error(Issue::new("title-length", "Too long")));

        let mut buf = Vec::new();
        result.write_json(&mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["code"], "title-length");
        assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_summary() {
        let mut result = ValidationResult::default();
        assert!(result.summary().contains("Valid"));

        result = result.absorb(Verdict::Warning(Issue::new("warn", "Warning")));
        assert!(result.summary().contains("1 warning"));

        result = result.absorb(Verdict::Error(Issue::new("err", "Error")));
        assert!(result.summary().contains("Invalid"));
    }
}
