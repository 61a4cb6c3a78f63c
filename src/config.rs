use crate::discovery::FilePattern;
use crate::error::{BumpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working root and user config directory
pub const CONFIG_FILE_NAME: &str = "increment-build-number.toml";

/// Represents the complete configuration for increment-build-number.
///
/// Contains file discovery patterns, pre-flight checks, and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub preflight: PreflightConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_source_declarations() -> Vec<String> {
    vec!["AssemblyInfo.cs".to_string()]
}

fn default_project_manifests() -> Vec<String> {
    vec!["*.csproj".to_string()]
}

fn default_package_manifests() -> Vec<String> {
    vec!["package.json".to_string()]
}

fn default_exclude_dirs() -> Vec<String> {
    vec![".git".to_string(), "node_modules".to_string()]
}

/// File name patterns for each kind of versioned file.
///
/// Patterns match file names only (not paths) and support `*` and `?`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_source_declarations")]
    pub source_declarations: Vec<String>,

    #[serde(default = "default_project_manifests")]
    pub project_manifests: Vec<String>,

    #[serde(default = "default_package_manifests")]
    pub package_manifests: Vec<String>,

    /// Directory names never descended into
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            source_declarations: default_source_declarations(),
            project_manifests: default_project_manifests(),
            package_manifests: default_package_manifests(),
            exclude_dirs: default_exclude_dirs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_solution_pattern() -> String {
    "*.sln".to_string()
}

/// Checks run before any file is touched.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PreflightConfig {
    /// Require a solution file in the top directory of the working root
    #[serde(default = "default_true")]
    pub require_solution: bool,

    #[serde(default = "default_solution_pattern")]
    pub solution_pattern: String,

    /// Refuse to run when tracked files have uncommitted changes
    #[serde(default = "default_true")]
    pub require_clean_tree: bool,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        PreflightConfig {
            require_solution: true,
            solution_pattern: default_solution_pattern(),
            require_clean_tree: true,
        }
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Wait for a key press before exiting when attached to a terminal
    #[serde(default)]
    pub pause_before_exit: bool,
}

impl Config {
    /// Check that every configured file pattern compiles
    pub fn validate(&self) -> Result<()> {
        let files = &self.files;
        for pattern in files
            .source_declarations
            .iter()
            .chain(&files.project_manifests)
            .chain(&files.package_manifests)
            .chain(std::iter::once(&self.preflight.solution_pattern))
        {
            FilePattern::new(pattern)?;
        }
        Ok(())
    }
}

/// Parses and validates configuration from TOML text.
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(text).map_err(|e| BumpError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `increment-build-number.toml` in the working root
/// 3. `increment-build-number.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `root` - Working root whose versions are being bumped
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    let local = root.join(CONFIG_FILE_NAME);
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            BumpError::config(format!("Cannot read {}: {}", path.display(), e))
        })?
    } else if local.is_file() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(CONFIG_FILE_NAME);
        if user_path.is_file() {
            fs::read_to_string(user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.files.source_declarations, vec!["AssemblyInfo.cs"]);
        assert_eq!(config.files.project_manifests, vec!["*.csproj"]);
        assert_eq!(config.files.package_manifests, vec!["package.json"]);
        assert!(config.preflight.require_solution);
        assert!(config.preflight.require_clean_tree);
        assert!(!config.behavior.pause_before_exit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config = parse_config(
            r#"
[files]
project_manifests = ["*.csproj", "*.vbproj"]

[preflight]
require_clean_tree = false
"#,
        )
        .unwrap();
        assert_eq!(config.files.project_manifests, vec!["*.csproj", "*.vbproj"]);
        assert_eq!(config.files.source_declarations, vec!["AssemblyInfo.cs"]);
        assert!(!config.preflight.require_clean_tree);
        assert!(config.preflight.require_solution);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_config("[files\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        assert!(parse_config("[behavior]\npause_before_exit = \"yes\"\n").is_err());
    }
}
