// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use crate::error::{CommitError, Result, RhError};
use std::fmt;

/// Text git places above the verbose diff in the editor buffer.
const SCISSORS: &str = "------------------------ >8 ------------------------";

/// The autosquash marker at the start of a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `fixup! ` - fold into the referenced commit, drop this message.
    Fixup,
    /// `squash! ` - fold into the referenced commit, combine messages.
    Squash,
}

impl Marker {
    /// The exact prefix, including the trailing space.
    pub fn prefix(&self) -> &'static str {
        match self {
            Marker::Fixup => "fixup! ",
            Marker::Squash => "squash! ",
        }
    }

    /// Length of the prefix in characters.
    pub fn prefix_len(&self) -> usize {
        self.prefix().len()
    }

    /// Split a well-formed marker off a title.
    ///
    /// Returns the marker and the remainder exactly as written. Near misses
    /// such as `Fixup! x` or `fixup x` are not markers.
    pub fn split(title: &str) -> Option<(Marker, &str)> {
        [Marker::Fixup, Marker::Squash]
            .into_iter()
            .find_map(|m| title.strip_prefix(m.prefix()).map(|rest| (m, rest)))
    }

    /// Whether a title carries a well-formed marker.
    pub fn is_marked(title: &str) -> bool {
        Self::split(title).is_some()
    }

    /// The title a marked commit points at.
    ///
    /// Repeated markers (`fixup! fixup! Add x`) are stripped the way
    /// `git rebase --autosquash` does, so the result is the original title.
    pub fn target(title: &str) -> Option<&str> {
        let (_, mut rest) = Self::split(title)?;
        while let Some((_, inner)) = Self::split(rest) {
            rest = inner;
        }
        Some(rest)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Fixup => write!(f, "fixup!"),
            Marker::Squash => write!(f, "squash!"),
        }
    }
}

/// A commit message as the rules see it: comment lines removed.
///
/// Line 0 is the title, line 1 should be blank, lines 2 and up are the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    lines: Vec<String>,
}

impl CommitMessage {
    /// Build a message from already-cleaned lines.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            return Err(RhError::Commit(CommitError::EmptyMessage));
        }
        Ok(Self { lines })
    }

    /// Parse the raw editor buffer git hands to commit-msg.
    ///
    /// Lines starting with `comment_char` are dropped, everything below the
    /// scissors line is dropped, and so are trailing blank lines.
    pub fn parse(raw: &str, comment_char: char) -> Result<Self> {
        let scissors = format!("{} {}", comment_char, SCISSORS);

        let mut lines: Vec<String> = raw
            .lines()
            .take_while(|line| *line != scissors)
            .filter(|line| !line.starts_with(comment_char))
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();

        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        Self::from_lines(lines)
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The first line.
    pub fn title(&self) -> &str {
        &self.lines[0]
    }

    /// The line that should separate title and body, if any.
    pub fn separator(&self) -> Option<&str> {
        self.lines.get(1).map(String::as_str)
    }

    /// Lines after the separator.
    pub fn body(&self) -> &[String] {
        self.lines.get(2..).unwrap_or(&[])
    }

    /// The autosquash marker on the title, if well formed.
    pub fn marker(&self) -> Option<Marker> {
        Marker::split(self.title()).map(|(m, _)| m)
    }
}
