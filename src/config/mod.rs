mod schema;
mod validation;

pub use schema::{Config, ThemeChoice, DEFAULT_SCORING_DELAY};
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/facility-dash/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("facility-dash"))
}

/// Get the default config file path (~/.config/facility-dash/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path()?, false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    if config_content.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::time::Duration;

    #[test]
    fn test_explicit_missing_file_errors() {
        let path = env::temp_dir().join("facility_dash_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join("facility_dash_test_config.yaml");
        fs::write(&path, "scoring_delay: \"250ms\"\ntheme: dark\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.scoring_delay(), Duration::from_millis(250));
        assert_eq!(config.theme(), ThemeChoice::Dark);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_file_is_default() {
        let path = env::temp_dir().join("facility_dash_test_empty_config.yaml");
        fs::write(&path, "\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config, Config::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_yaml_errors() {
        let path = env::temp_dir().join("facility_dash_test_bad_config.yaml");
        fs::write(&path, "theme: [unterminated\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&path);
    }
}
