//! Configuration loading and discovery for `eid.toml`

use super::schema::EidConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "eid.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse eid.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub width: Option<u32>,
    pub language: Option<String>,
    pub scale: Option<f32>,
    pub strict: Option<bool>,
}

/// Find eid.toml by walking up from the current working directory, then
/// in the XDG config directory.
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Checks XDG_CONFIG_HOME/eidtext/eid.toml or ~/.config/eidtext/eid.toml
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("eidtext").join(CONFIG_FILE);
    config_path.exists().then_some(config_path)
}

/// Find eid.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from `path`, or from the discovered eid.toml.
///
/// With no path and no discoverable file, returns the default configuration.
pub fn load_config(path: Option<&Path>) -> Result<EidConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "Loading config");
            load_config_file(&p)
        }
        None => Ok(EidConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<EidConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: EidConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration. CLI values win.
pub fn merge_cli_overrides(config: &mut EidConfig, overrides: &CliOverrides) {
    if let Some(width) = overrides.width {
        config.display.width = width;
    }
    if let Some(ref language) = overrides.language {
        config.display.language = language.clone();
    }
    if let Some(scale) = overrides.scale {
        config.display.scale = scale;
    }
    if let Some(strict) = overrides.strict {
        config.packs.strict = strict;
    }
}

/// Resolve a path relative to the directory holding the config file.
pub fn resolve_path(config_path: &Path, path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(root) if !path.is_absolute() => root.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[display]\nwidth = 100");

        assert_eq!(find_config_from(temp.path().to_path_buf()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).expect("should create nested dirs");

        assert_eq!(find_config_from(nested), Some(config_path));
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join("eidtext");
        fs::create_dir_all(&dir).expect("should create xdg dir");
        let config_path = write_config(&dir, "");

        let previous = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match previous {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(temp.path(), "[display]\nwidth = 180\nlanguage = \"fr\"");

        let config = load_config(Some(&path)).expect("should load");
        assert_eq!(config.display.width, 180);
        assert_eq!(config.display.language, "fr");
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(temp.path(), "[display\nwidth = ");
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(temp.path(), "[display]\nwidth = 0\n[colors]\nerror = \"#12\"");

        match load_config(Some(&path)) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("display.width"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = EidConfig::default();
        let overrides = CliOverrides {
            width: Some(90),
            language: Some("ru".to_string()),
            strict: Some(true),
            ..Default::default()
        };
        merge_cli_overrides(&mut config, &overrides);

        assert_eq!(config.display.width, 90);
        assert_eq!(config.display.language, "ru");
        assert_eq!(config.display.scale, 1.0);
        assert!(config.packs.strict);
    }

    #[test]
    fn test_resolve_path() {
        let config = Path::new("/project/eid.toml");
        assert_eq!(resolve_path(config, Path::new("packs/a.json5")), PathBuf::from("/project/packs/a.json5"));
        assert_eq!(resolve_path(config, Path::new("/abs/a.json5")), PathBuf::from("/abs/a.json5"));
    }
}
