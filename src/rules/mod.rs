// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The commit message validator.
//!
//! Every rule maps a message to a [`Verdict`]; the [`RuleEngine`] folds the
//! verdicts of all rules, in a fixed order, into a [`ValidationResult`].

mod builtin;
mod engine;
mod validator;

pub use builtin::{builtin_rules, BranchTitles, BuiltinRule, Rule, RuleContext, RuleFn};
pub use engine::{BranchHistory, RuleEngine};
pub use validator::{Issue, ValidationResult, Verdict};
