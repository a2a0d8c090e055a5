// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! Each rule is a plain function of the message and a [`RuleContext`]. The
//! heuristics are literal substring and prefix matches against the lists in
//! [`RulesConfig`].

use crate::commit::{CommitMessage, Marker};
use crate::config::RulesConfig;
use lazy_static::lazy_static;
use regex::Regex;

use super::validator::{Issue, Verdict};

lazy_static! {
    /// A capitalized first word: one uppercase letter, then lowercase.
    static ref CAPITALIZED: Regex = Regex::new(r"^\p{Lu}\p{Ll}+").unwrap();

    /// Any non-word character at the end of the title.
    static ref TRAILING_PUNCTUATION: Regex = Regex::new(r"\W$").unwrap();

    /// Anything that looks like it is trying to be an autosquash marker.
    static ref MARKER_LIKE: Regex = Regex::new(r"(?i)^\W*(fixup|squash)\b").unwrap();
}

/// Titles of the commits on the current branch, as far as they are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchTitles {
    /// The lookup was not needed for this message.
    NotQueried,
    /// Titles reachable from HEAD but not from upstream, most recent first.
    Known(Vec<String>),
    /// The lookup failed; the reason is shown to the user.
    Unavailable(String),
}

/// Everything a rule may look at besides the message itself.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub config: &'a RulesConfig,
    pub branch_titles: &'a BranchTitles,
}

/// A commit message rule.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Check the commit message.
    fn check(&self, message: &CommitMessage, ctx: &RuleContext<'_>) -> Verdict;

    /// Get the rule name.
    fn name(&self) -> &str;
}

/// Signature shared by all built-in rule functions.
pub type RuleFn = fn(&CommitMessage, &RuleContext<'_>) -> Verdict;

/// A built-in rule backed by a function.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinRule {
    name: &'static str,
    check: RuleFn,
}

impl Rule for BuiltinRule {
    fn check(&self, message: &CommitMessage, ctx: &RuleContext<'_>) -> Verdict {
        (self.check)(message, ctx)
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// All built-in rules, in evaluation order: title rules, then body rules.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    let rules: [(&'static str, RuleFn); 12] = [
        ("title-length", check_title_length),
        ("title-capitalization", check_capitalization),
        ("title-mood", check_imperative_mood),
        ("title-punctuation", check_trailing_punctuation),
        ("malformed-marker", check_malformed_marker),
        ("multiple-changes", check_multiple_changes),
        ("should-be-fixup", check_should_be_fixup),
        ("marker-target", check_marker_target),
        ("uninformative-title", check_uninformative_title),
        ("missing-body", check_missing_body),
        ("missing-separator", check_separator),
        ("body-line-length", check_body_line_length),
    ];

    rules
        .into_iter()
        .map(|(name, check)| Box::new(BuiltinRule { name, check }) as Box<dyn Rule>)
        .collect()
}

/// Check the title length, not counting an autosquash prefix.
fn check_title_length(message: &CommitMessage, ctx: &RuleContext<'_>) -> Verdict {
    let title = message.title();
    let len = title.chars().count();
    let max = ctx.config.max_title_length + message.marker().map_or(0, |m| m.prefix_len());

    if len > max {
        Verdict::Error(
            Issue::new(
                "title-length",
                format!("Title is {} characters long (max: {})", len, max),
            )
            .suggest("Shorten the title and move the details into the body"),
        )
    } else {
        Verdict::Pass
    }
}

/// Check that the title starts with a capitalized word.
fn check_capitalization(message: &CommitMessage, _ctx: &RuleContext<'_>) -> Verdict {
    let title = message.title();
    if message.marker().is_some() || CAPITALIZED.is_match(title) {
        return Verdict::Pass;
    }

    let first_word = title.split_whitespace().next().unwrap_or("");
    Verdict::Error(
        Issue::new(
            "title-capitalization",
            format!("Title should start with a capitalized word (found '{}')", first_word),
        )
        .suggest("Start with an uppercase letter followed by lowercase, e.g. 'Add'"),
    )
}

/// Check that the first word is not past tense or a gerund.
fn check_imperative_mood(message: &CommitMessage, _ctx: &RuleContext<'_>) -> Verdict {
    if message.marker().is_some() {
        return Verdict::Pass;
    }

    let Some(first_word) = message.title().split_whitespace().next() else {
        return Verdict::Pass;
    };
    let lower = first_word.to_lowercase();

    if lower.ends_with("ed") || lower.ends_with("ing") {
        Verdict::Error(
            Issue::new(
                "title-mood",
                format!("Title should use the imperative mood (found '{}')", first_word),
            )
            .suggest("Complete the sentence \"If applied, this commit will ...\""),
        )
    } else {
        Verdict::Pass
    }
}

/// Check that the title does not end with punctuation.
fn check_trailing_punctuation(message: &CommitMessage, _ctx: &RuleContext<'_>) -> Verdict {
    let title = message.title();
    if !TRAILING_PUNCTUATION.is_match(title) {
        return Verdict::Pass;
    }

    let last = title.chars().last().unwrap_or(' ');
    Verdict::Error(
        Issue::new(
            "title-punctuation",
            format!("Title should not end with punctuation (found '{}')", last),
        )
        .suggest("Remove the trailing character"),
    )
}

/// Check that anything resembling an autosquash marker is exactly one.
fn check_malformed_marker(message: &CommitMessage, _ctx: &RuleContext<'_>) -> Verdict {
    let title = message.title();
    if !MARKER_LIKE.is_match(title) {
        return Verdict::Pass;
    }

    match Marker::target(title) {
        Some(target) if !target.trim().is_empty() => Verdict::Pass,
        _ => Verdict::Error(
            Issue::new(
                "malformed-marker",
                format!("Malformed fixup/squash marker in '{}'", title),
            )
            .suggest(
                "Use `git commit --fixup=<commit>`, or start the title with exactly \
                 'fixup! ' or 'squash! ' followed by the title being fixed",
            ),
        ),
    }
}

/// Check for words that join several changes into one title.
fn check_multiple_changes(message: &CommitMessage, ctx: &RuleContext<'_>) -> Verdict {
    let title = message.title();
    match ctx
        .config
        .joining_phrases
        .iter()
        .find(|phrase| title.contains(phrase.as_str()))
    {
        Some(phrase) => Verdict::Error(
            Issue::new(
                "multiple-changes",
                format!(
                    "Title looks like it describes several changes (contains '{}')",
                    phrase
                ),
            )
            .suggest("Split the work into one commit per logical change"),
        ),
        None => Verdict::Pass,
    }
}

/// Check for titles that say they respond to review.
fn check_should_be_fixup(message: &CommitMessage, ctx: &RuleContext<'_>) -> Verdict {
    let title = message.title();
    match ctx
        .config
        .review_prefixes
        .iter()
        .find(|prefix| title.starts_with(prefix.as_str()))
    {
        Some(prefix) => Verdict::Error(
            Issue::new(
                "should-be-fixup",
                format!(
                    "Title starts with '{}'; review feedback belongs in a fixup!/squash! commit",
                    prefix
                ),
            )
            .suggest("Use `git commit --fixup=<commit>` against the commit under review"),
        ),
        None => Verdict::Pass,
    }
}

/// Check that a fixup!/squash! commit points at a commit on this branch.
fn check_marker_target(message: &CommitMessage, ctx: &RuleContext<'_>) -> Verdict {
    let Some(target) = Marker::target(message.title()) else {
        return Verdict::Pass;
    };
    if target.trim().is_empty() {
        // Reported by the malformed-marker rule.
        return Verdict::Pass;
    }

    match ctx.branch_titles {
        BranchTitles::Known(titles) if titles.iter().any(|t| t == target) => Verdict::Pass,
        BranchTitles::Known(_) => Verdict::Error(
            Issue::new(
                "marker-target",
                format!("'{}' does not match any commit title on this branch", target),
            )
            .suggest("Copy the title exactly, or use `git commit --fixup=<commit>`"),
        ),
        BranchTitles::Unavailable(reason) => Verdict::Warning(Issue::new(
            "marker-target-unchecked",
            format!(
                "Could not check that '{}' matches a commit on this branch: {}",
                target, reason
            ),
        )),
        BranchTitles::NotQueried => Verdict::Warning(Issue::new(
            "marker-target-unchecked",
            format!("Did not check that '{}' matches a commit on this branch", target),
        )),
    }
}

/// Check for low-information words in the title.
fn check_uninformative_title(message: &CommitMessage, ctx: &RuleContext<'_>) -> Verdict {
    let title = message.title();
    match ctx
        .config
        .useless_words
        .iter()
        .find(|word| title.contains(word.as_str()))
    {
        Some(word) => Verdict::Error(
            Issue::new(
                "uninformative-title",
                format!("Title contains the uninformative word '{}'", word),
            )
            .suggest("Say what the commit changes, not how it came about"),
        ),
        None => Verdict::Pass,
    }
}

/// Warn when there is no body at all.
fn check_missing_body(message: &CommitMessage, _ctx: &RuleContext<'_>) -> Verdict {
    if message.line_count() <= 2 {
        Verdict::Warning(
            Issue::new("missing-body", "Commit message has no body")
                .suggest("Explain what changed and why"),
        )
    } else {
        Verdict::Pass
    }
}

/// Check for the blank line between title and body.
fn check_separator(message: &CommitMessage, _ctx: &RuleContext<'_>) -> Verdict {
    match message.separator() {
        Some(line) if !line.is_empty() => Verdict::Error(
            Issue::new(
                "missing-separator",
                "The second line must be blank to separate the title from the body",
            )
            .suggest("Insert an empty line after the title"),
        ),
        _ => Verdict::Pass,
    }
}

/// Warn about body lines that are not wrapped.
fn check_body_line_length(message: &CommitMessage, ctx: &RuleContext<'_>) -> Verdict {
    let max = ctx.config.max_body_line_length;
    // Body lines start at line 3.
    let long_lines: Vec<String> = message
        .body()
        .iter()
        .enumerate()
        .filter(|(_, line)| line.chars().count() > max)
        .map(|(index, _)| (index + 3).to_string())
        .collect();

    if long_lines.is_empty() {
        Verdict::Pass
    } else {
        Verdict::Warning(
            Issue::new(
                "body-line-length",
                format!(
                    "Body lines longer than {} characters: line {}",
                    max,
                    long_lines.join(", ")
                ),
            )
            .suggest(format!("Wrap the body at {} characters", max)),
        )
    }
}
