// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The example configuration written by `rh init`.

/// Generate an example configuration file.
///
/// Every value shown is the built-in default.
pub fn example_config() -> &'static str {
    r##"# rh configuration

# Commit message rules (commit-msg hook)
[rules]
max_title_length = 50
max_body_line_length = 72
comment_char = "#"
joining_phrases = [". ", ";", " also ", " Also ", " and ", " And "]
review_prefixes = ["Address", "address", "Review", "review"]
useless_words = ["Attempt", "First", "Commit", "Initial", "Pass", "attempt", "first", "commit", "initial", "pass"]

# Branches that receive reviewed work
[review]
base_branches = ["main", "master"]

# pre-push checklist
[push]
confirm = true
checklist = ["Have you reviewed your own diff?", "Do the tests pass locally?"]

# Git invocation
[git]
upstream = "@{upstream}"
timeout_secs = 10

# UI configuration
[ui]
color = true
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, RhConfig};

    #[test]
    fn test_example_config_parseable() {
        let config = parse_config(example_config()).expect("Example config should parse");
        let defaults = RhConfig::default();
        assert_eq!(config.rules.useless_words, defaults.rules.useless_words);
        assert_eq!(config.rules.joining_phrases, defaults.rules.joining_phrases);
        assert_eq!(config.push.checklist, defaults.push.checklist);
        assert_eq!(config.git.timeout_secs, defaults.git.timeout_secs);
    }
}
