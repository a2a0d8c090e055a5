// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use crate::commit::CommitMessage;
use crate::config::RulesConfig;
use crate::error::Result;

use super::builtin::{builtin_rules, BranchTitles, Rule, RuleContext};
use super::validator::ValidationResult;

/// Source of the commit titles on the current branch.
pub trait BranchHistory {
    /// Titles of commits reachable from HEAD but not from upstream, most
    /// recent first.
    fn branch_titles(&self) -> Result<Vec<String>>;
}

/// Rule engine for validating commit messages.
#[derive(Debug)]
pub struct RuleEngine {
    config: RulesConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Create a rule engine running the built-in rules.
    pub fn new(config: RulesConfig) -> Self {
        Self::with_rules(config, builtin_rules())
    }

    /// Create a rule engine running `rules` in the given order.
    pub fn with_rules(config: RulesConfig, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { config, rules }
    }

    /// Validate a commit message.
    ///
    /// `history` is consulted at most once, and only for titles carrying a
    /// fixup!/squash! marker. A failed lookup becomes a warning.
    pub fn validate(
        &self,
        message: &CommitMessage,
        history: Option<&dyn BranchHistory>,
    ) -> ValidationResult {
        let branch_titles = self.branch_titles(message, history);
        let ctx = RuleContext {
            config: &self.config,
            branch_titles: &branch_titles,
        };

        let result = self
            .rules
            .iter()
            .map(|rule| rule.check(message, &ctx))
            .fold(ValidationResult::default(), ValidationResult::absorb);

        tracing::debug!("Validated '{}': {}", message.title(), result.summary());
        result
    }

    /// Parse and validate the raw text of a commit message file.
    pub fn validate_str(
        &self,
        raw: &str,
        history: Option<&dyn BranchHistory>,
    ) -> Result<ValidationResult> {
        let comment_char = self.config.comment_char.chars().next().unwrap_or('#');
        let message = CommitMessage::parse(raw, comment_char)?;
        Ok(self.validate(&message, history))
    }

    fn branch_titles(
        &self,
        message: &CommitMessage,
        history: Option<&dyn BranchHistory>,
    ) -> BranchTitles {
        if message.marker().is_none() {
            return BranchTitles::NotQueried;
        }

        let Some(history) = history else {
            tracing::debug!("Branch history lookup disabled");
            return BranchTitles::Unavailable("branch history lookup is disabled".to_string());
        };

        match history.branch_titles() {
            Ok(titles) => {
                tracing::debug!("Found {} commit(s) on this branch", titles.len());
                BranchTitles::Known(titles)
            }
            Err(e) => {
                tracing::warn!("Branch history lookup failed: {}", e);
                BranchTitles::Unavailable(e.to_string())
            }
        }
    }
}

/// A fixed list of titles, for callers that already know them.
impl BranchHistory for Vec<String> {
    fn branch_titles(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GitError, RhError};
    use std::cell::Cell;

    /// Counts lookups and fails on demand.
    struct FakeHistory {
        titles: Vec<String>,
        fail: bool,
        calls: Cell<usize>,
    }

    impl FakeHistory {
        fn new(titles: &[&str]) -> Self {
            Self {
                titles: titles.iter().map(|t| t.to_string()).collect(),
                fail: false,
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(&[])
            }
        }
    }

    impl BranchHistory for FakeHistory {
        fn branch_titles(&self) -> Result<Vec<String>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(RhError::Git(GitError::CommandFailed {
                    command: "git log".to_string(),
                    message: "no upstream configured for branch 'topic'".to_string(),
                }))
            } else {
                Ok(self.titles.clone())
            }
        }
    }

    fn engine() -> RuleEngine {
        RuleEngine::new(RulesConfig::default())
    }

    fn validate(lines: &[&str], history: &dyn BranchHistory) -> ValidationResult {
        let message = CommitMessage::from_lines(lines.iter().copied()).unwrap();
        engine().validate(&message, Some(history))
    }

    #[test]
    fn test_clean_message() {
        let history = FakeHistory::new(&[]);
        let result = validate(&["Add widget support", "", "Explains rationale."], &history);
        assert!(result.is_valid());
        assert_eq!(result.issue_count(), 0);
        assert_eq!(history.calls.get(), 0);
    }

    #[test]
    fn test_title_only_warns_missing_body() {
        let result = validate(&["Add widget support"], &FakeHistory::new(&[]));
        assert!(result.is_valid());
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "missing-body");
    }

    #[test]
    fn test_lowercase_past_tense() {
        let result = validate(&["fixed bug in parser", "", "Body."], &FakeHistory::new(&[]));
        assert!(!result.is_valid());
        let codes: Vec<&str> = result.errors.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec!["title-capitalization", "title-mood"]);
    }

    #[test]
    fn test_fixup_with_trailing_period() {
        let history = FakeHistory::new(&["Add widget support."]);
        let result = validate(&["fixup! Add widget support."], &history);
        assert!(result.has("title-punctuation"));
        assert!(!result.has("title-length"));
        assert!(!result.has("marker-target"));
        assert_eq!(history.calls.get(), 1);
    }

    #[test]
    fn test_bare_fixup() {
        let history = FakeHistory::new(&[]);
        let result = validate(&["fixup!"], &history);
        assert!(result.errors.iter().any(|e| e.code == "malformed-marker"));
        assert_eq!(history.calls.get(), 0);
    }

    #[test]
    fn test_squash_target_missing() {
        let history = FakeHistory::new(&["Fix parser", "Add gadget support"]);
        let result = validate(&["squash! Add widget support", "", "More."], &history);
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, "marker-target");
    }

    #[test]
    fn test_history_failure_is_a_warning() {
        let history = FakeHistory::failing();
        let result = validate(&["fixup! Add widget support", "", "More."], &history);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.code == "marker-target-unchecked"
            && w.message.contains("no upstream configured")));
        // Rules after the lookup still ran.
        let long = "z".repeat(80);
        let result = validate(&["fixup! Add widget support", "", &long], &history);
        assert!(result.has("body-line-length"));
        assert_eq!(history.calls.get(), 2);
    }

    #[test]
    fn test_no_history() {
        let message = CommitMessage::from_lines(["fixup! Add widget", "", "Body."]).unwrap();
        let result = engine().validate(&message, None);
        assert!(result.is_valid());
        assert!(result.has("marker-target-unchecked"));
    }

    #[test]
    fn test_validate_str_strips_comments() {
        let raw = "Add widget support\n\nExplains rationale.\n# Lines starting with '#' are ignored\n";
        let result = engine().validate_str(raw, None).unwrap();
        assert_eq!(result.issue_count(), 0);
    }

    #[test]
    fn test_validate_str_empty() {
        assert!(engine().validate_str("# nothing\n", None).is_err());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let history = FakeHistory::new(&["Add widget support"]);
        let lines = ["squash! Add widget suport.", "Body without separator"];
        let first = validate(&lines, &history);
        let second = validate(&lines, &history);
        assert_eq!(first, second);
    }

    #[test]
    fn test_accept_decision_is_order_independent() {
        let messages: [&[&str]; 4] = [
            &["fixed bug in parser"],
            &["Add widget support", "", "Explains rationale."],
            &["Address review; also tidy.", "Oops"],
            &["squash! Add gadget", "", "Body."],
        ];
        let history = FakeHistory::new(&["Add widget support"]);

        for lines in messages {
            let message = CommitMessage::from_lines(lines.iter().copied()).unwrap();
            let forward = engine().validate(&message, Some(&history));

            let mut reversed = builtin_rules();
            reversed.reverse();
            let backward = RuleEngine::with_rules(RulesConfig::default(), reversed)
                .validate(&message, Some(&history));

            assert_eq!(forward.is_valid(), backward.is_valid());
            assert_eq!(forward.errors.len(), backward.errors.len());
            assert_eq!(forward.warnings.len(), backward.warnings.len());
        }
    }

    #[test]
    fn test_vec_history() {
        let titles = vec!["Add widget support".to_string()];
        let message = CommitMessage::from_lines(["fixup! Add widget support"]).unwrap();
        let result = engine().validate(&message, Some(&titles));
        assert!(!result.has("marker-target"));
        assert!(!result.has("marker-target-unchecked"));
    }
}
