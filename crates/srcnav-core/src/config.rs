//! Persistent configuration for srcnav.
//!
//! Loads/saves a TOML config. Lookup order is an explicit path, then
//! `srcnav.toml` in the project root, then `~/.srcnav/config.toml`.

use crate::SrcnavError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "srcnav.toml";

/// Top-level srcnav configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SrcnavConfig {
    pub classifier: ClassifierConfig,
    pub index: IndexConfig,
    pub output: OutputConfig,
}

impl SrcnavConfig {
    /// Load configuration from the given path.
    pub fn load(path: &Path) -> Result<Self, SrcnavError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SrcnavError::Config(e.to_string()))
    }

    /// Save configuration to the given path.
    pub fn save(&self, path: &Path) -> Result<(), SrcnavError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| SrcnavError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the default path, or return defaults if the file doesn't exist.
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Resolve the config for a project: `explicit`, then `<root>/srcnav.toml`,
    /// then the user-level default.
    pub fn resolve(explicit: Option<&Path>, root: &Path) -> Result<Self, SrcnavError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let project = root.join(PROJECT_CONFIG_FILE);
        if project.exists() {
            return Self::load(&project);
        }
        Ok(Self::load_or_default())
    }

    /// Default config path: `~/.srcnav/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".srcnav")
            .join("config.toml")
    }
}

/// How declarations are judged internal or external.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Library URI prefixes that mark the standard runtime.
    pub runtime_prefixes: Vec<String>,
    /// Scheme prepended to a package name to form its namespace prefix.
    pub package_scheme: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            runtime_prefixes: vec!["dart:".to_string()],
            package_scheme: "package:".to_string(),
        }
    }
}

/// Input discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// File-name suffix of resolved-unit documents.
    pub unit_suffix: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            unit_suffix: ".unit.json".to_string(),
        }
    }
}

/// Sink document settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the JSON document.
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrips_through_toml() {
        let config = SrcnavConfig::default();
        let toml_str =
            toml::to_string_pretty(&config).expect("default config should serialize to TOML");
        let parsed: SrcnavConfig =
            toml::from_str(&toml_str).expect("serialized TOML should parse back");
        assert_eq!(parsed.classifier.runtime_prefixes, vec!["dart:".to_string()]);
        assert_eq!(parsed.classifier.package_scheme, "package:");
        assert_eq!(parsed.index.unit_suffix, ".unit.json");
        assert!(!parsed.output.pretty);
    }

    #[test]
    fn load_nonexistent_returns_error() {
        let result = SrcnavConfig::load(Path::new("/tmp/nonexistent_srcnav_config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("srcnav_config_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.toml");

        let mut config = SrcnavConfig::default();
        config.classifier.runtime_prefixes.push("std:".to_string());
        config.output.pretty = true;

        config.save(&path).expect("save should succeed");
        let loaded = SrcnavConfig::load(&path).expect("load should succeed");

        assert_eq!(loaded.classifier.runtime_prefixes.len(), 2);
        assert!(loaded.output.pretty);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn resolve_prefers_project_file() {
        let dir = std::env::temp_dir().join("srcnav_config_resolve_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(PROJECT_CONFIG_FILE),
            "[index]\nunit_suffix = \".resolved.json\"\n",
        )
        .unwrap();

        let config = SrcnavConfig::resolve(None, &dir).expect("project config should load");
        assert_eq!(config.index.unit_suffix, ".resolved.json");
        assert_eq!(config.classifier.package_scheme, "package:");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        let partial = r#"
[output]
pretty = true
"#;
        let config: SrcnavConfig = toml::from_str(partial).expect("partial TOML should parse");
        assert!(config.output.pretty);
        assert_eq!(config.index.unit_suffix, ".unit.json");
        assert_eq!(config.classifier.runtime_prefixes, vec!["dart:".to_string()]);
    }
}
