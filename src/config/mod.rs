// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for rh.
//!
//! This module handles finding, parsing, and validating rh.toml.

pub mod default;
mod loader;
mod schema;

pub use default::example_config;
pub use loader::{find_config_file, load_config, parse_config};
pub use schema::*;
