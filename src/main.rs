// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! rh - git hooks for review-friendly commit history
//!
//! Link or copy this binary into `.git/hooks/` under a hook's name, or call
//! `rh <hook> ...` from a hook script.

use rh::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    // Parse CLI arguments, honouring hook-named symlinks
    let cli = Cli::parse_invocation();

    // Set up logging
    setup_logging(cli.debug);

    match run(cli) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Set up logging/tracing on stderr; stdout carries hook reports.
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_new("rh=debug,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if debug {
        tracing::debug!("Debug logging enabled");
    }
}
