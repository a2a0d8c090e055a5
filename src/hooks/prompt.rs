// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Yes/no questions asked from inside a hook.
//!
//! Git feeds hooks such as pre-push through stdin, so questions cannot be
//! read from there. [`TtyPrompter`] reopens the controlling terminal for
//! every question instead.

use crate::error::{HookError, Result, RhError};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm};

/// Something that can ask the user a yes/no question.
pub trait Prompter {
    /// Ask `question`; `Ok(true)` means yes.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Asks questions on the controlling terminal (`/dev/tty`).
#[derive(Debug, Default)]
pub struct TtyPrompter;

impl TtyPrompter {
    pub fn new() -> Self {
        Self
    }

    #[cfg(unix)]
    fn open_terminal() -> Result<Term> {
        let open = || {
            std::fs::OpenOptions::new()
                .read(true)
                .write(true)
                .open("/dev/tty")
        };
        let no_terminal = |e: std::io::Error| {
            RhError::Hook(HookError::NoTerminal {
                message: format!("/dev/tty: {}", e),
            })
        };

        let read = open().map_err(no_terminal)?;
        let write = open().map_err(no_terminal)?;
        Ok(Term::read_write_pair(read, write))
    }

    #[cfg(not(unix))]
    fn open_terminal() -> Result<Term> {
        let term = Term::stderr();
        if term.is_term() {
            Ok(term)
        } else {
            Err(RhError::Hook(HookError::NoTerminal {
                message: "stderr is not a terminal".to_string(),
            }))
        }
    }
}

impl Prompter for TtyPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let term = Self::open_terminal()?;
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(false)
            .interact_on(&term)?;
        tracing::debug!("'{}' answered {}", question, answer);
        Ok(answer)
    }
}
