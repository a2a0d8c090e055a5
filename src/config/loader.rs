// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration discovery and loading.

use crate::error::{ConfigError, Result, RhError};
use std::path::{Path, PathBuf};

use super::schema::RhConfig;

/// File names looked for in each directory, most specific first.
const CONFIG_FILES: &[&str] = &["rh.toml", ".rh.toml", ".config/rh.toml"];

/// Find the configuration file for the current directory.
pub fn find_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd)
}

/// Find the configuration file for `start_dir`.
///
/// The directory and its ancestors win over the home directory, which wins
/// over `<config dir>/rh/config.toml`.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(Path::to_path_buf)
        .chain(dirs::home_dir())
        .flat_map(|dir| CONFIG_FILES.iter().map(move |name| dir.join(name)))
        .chain(dirs::config_dir().map(|dir| dir.join("rh").join("config.toml")))
        .find(|candidate| candidate.is_file())
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<RhConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(RhConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<RhConfig> {
    tracing::debug!("Loading configuration from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => RhError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }),
        _ => RhError::Config(ConfigError::ParseError {
            message: format!("{}: {}", path.display(), e),
        }),
    })?;

    parse_config(&content)
}

/// Parse and validate configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<RhConfig> {
    let config: RhConfig = toml::from_str(content).map_err(|e| {
        RhError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.rules.max_title_length, 50);
        assert_eq!(config.git.upstream, "@{upstream}");
    }

    #[test]
    fn test_parse_custom_config() {
        let toml = r#"
[rules]
max_title_length = 60
useless_words = ["WIP"]

[push]
confirm = false

[git]
upstream = "origin/main"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.rules.max_title_length, 60);
        assert_eq!(config.rules.useless_words, vec!["WIP"]);
        // Untouched keys keep their defaults
        assert_eq!(config.rules.max_body_line_length, 72);
        assert!(!config.push.confirm);
        assert_eq!(config.git.upstream, "origin/main");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config("[rules\nmax_title_length = ");
        assert!(matches!(
            result,
            Err(RhError::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_parse_invalid_value() {
        let result = parse_config("[rules]\ncomment_char = \"\"\n");
        assert!(matches!(
            result,
            Err(RhError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from(&dir.path().join("rh.toml"));
        assert!(matches!(
            result,
            Err(RhError::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".rh.toml"), "[push]\nconfirm = false\n").unwrap();
        let nested = dir.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config_file_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(".rh.toml"));

        let config = load_config_from(&found).unwrap();
        assert!(!config.push.confirm);
    }

    #[test]
    fn test_nearest_config_wins() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir_all(nested.join(".config")).unwrap();
        std::fs::write(dir.path().join("rh.toml"), "").unwrap();
        std::fs::write(nested.join(".config").join("rh.toml"), "").unwrap();

        let found = find_config_file_from(&nested).unwrap();
        assert_eq!(found, nested.join(".config").join("rh.toml"));
    }
}
