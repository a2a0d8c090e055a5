// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Repository queries go through git2; the branch title lookup used by the
//! commit-msg hook shells out to `git` with a timeout.

mod cli;
mod repo;

pub use cli::GitCli;
pub use repo::{short_id, Repository};

#[cfg(test)]
pub(crate) use repo::testing;
