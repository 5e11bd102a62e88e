//! `srcnav config get/set`: read and modify a configuration file.

use srcnav_core::SrcnavConfig;
use std::path::{Path, PathBuf};

pub(crate) fn cmd_config_get(file: Option<&Path>, key: &str) -> anyhow::Result<()> {
    let (_, config) = load_target(file)?;
    let json = serde_json::to_value(&config)?;

    match navigate_json(&json, key) {
        Some(v) => println!("{}", serde_json::to_string_pretty(v)?),
        None => anyhow::bail!("Unknown config key: {key}"),
    }
    Ok(())
}

pub(crate) fn cmd_config_set(file: Option<&Path>, key: &str, value: &str) -> anyhow::Result<()> {
    let (config_path, config) = load_target(file)?;
    let config = apply_setting(config, key, value)?;
    config.save(&config_path)?;
    eprintln!("Updated {key} and saved to {}", config_path.display());
    Ok(())
}

/// The file to edit (`file`, else the user config) and its current contents.
///
/// A file that does not exist yet reads as the defaults.
fn load_target(file: Option<&Path>) -> anyhow::Result<(PathBuf, SrcnavConfig)> {
    let path = file
        .map(Path::to_path_buf)
        .unwrap_or_else(SrcnavConfig::default_path);
    let config = if path.exists() {
        SrcnavConfig::load(&path)?
    } else {
        SrcnavConfig::default()
    };
    Ok((path, config))
}

/// Set `key` to `value` and validate by deserializing back into a config.
fn apply_setting(config: SrcnavConfig, key: &str, value: &str) -> anyhow::Result<SrcnavConfig> {
    let mut json = serde_json::to_value(&config)?;

    // Parse the value as JSON first, fall back to string
    let new_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    set_json_path(&mut json, key, new_value)?;
    Ok(serde_json::from_value(json)?)
}

/// Navigate a JSON value by a dot-separated path.
fn navigate_json<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    path.split('.').try_fold(value, |current, part| current.get(part))
}

/// Set a value at a dot-separated JSON path. Only existing keys can be set.
fn set_json_path(
    root: &mut serde_json::Value,
    path: &str,
    value: serde_json::Value,
) -> anyhow::Result<()> {
    let parts: Vec<&str> = path.split('.').collect();
    let Some((last, sections)) = parts.split_last() else {
        anyhow::bail!("Empty key path");
    };

    let mut current = root;
    for part in sections {
        current = current
            .get_mut(*part)
            .ok_or_else(|| anyhow::anyhow!("Unknown config section: {part}"))?;
    }

    let Some(obj) = current.as_object_mut() else {
        anyhow::bail!("Config path does not lead to an object");
    };
    if !obj.contains_key(*last) {
        anyhow::bail!("Unknown config key: {last}");
    }
    obj.insert((*last).to_string(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_section_and_leaf() {
        let json = serde_json::to_value(SrcnavConfig::default()).unwrap();
        assert!(navigate_json(&json, "classifier").unwrap().is_object());
        assert_eq!(
            navigate_json(&json, "classifier.package_scheme").unwrap(),
            "package:"
        );
        assert_eq!(navigate_json(&json, "index.unit_suffix").unwrap(), ".unit.json");
    }

    #[test]
    fn navigate_missing() {
        let json = serde_json::to_value(SrcnavConfig::default()).unwrap();
        assert!(navigate_json(&json, "classifier.nonexistent").is_none());
        assert!(navigate_json(&json, "").is_none());
    }

    #[test]
    fn apply_setting_parses_json_values() {
        let config = apply_setting(SrcnavConfig::default(), "output.pretty", "true").unwrap();
        assert!(config.output.pretty);

        let config = apply_setting(
            SrcnavConfig::default(),
            "classifier.runtime_prefixes",
            r#"["dart:", "flutter:"]"#,
        )
        .unwrap();
        assert_eq!(config.classifier.runtime_prefixes, vec!["dart:", "flutter:"]);
    }

    #[test]
    fn apply_setting_falls_back_to_plain_string() {
        let config =
            apply_setting(SrcnavConfig::default(), "index.unit_suffix", ".resolved.json").unwrap();
        assert_eq!(config.index.unit_suffix, ".resolved.json");
    }

    #[test]
    fn apply_setting_rejects_wrong_type() {
        assert!(apply_setting(SrcnavConfig::default(), "output.pretty", "\"maybe\"").is_err());
    }

    #[test]
    fn set_writes_the_given_file() {
        let dir = std::env::temp_dir().join("srcnav_cli_config_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("srcnav.toml");

        cmd_config_set(Some(&path), "output.pretty", "true").unwrap();
        cmd_config_set(Some(&path), "index.unit_suffix", ".resolved.json").unwrap();

        let saved = SrcnavConfig::load(&path).unwrap();
        assert!(saved.output.pretty);
        assert_eq!(saved.index.unit_suffix, ".resolved.json");
        assert!(cmd_config_get(Some(&path), "output.pretty").is_ok());
        assert!(cmd_config_get(Some(&path), "output.missing").is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn set_json_path_unknown_key_errors() {
        let mut json = serde_json::json!({"output": {"pretty": false}});
        let err = set_json_path(&mut json, "output.nonexistent", serde_json::json!(1)).unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));

        let err = set_json_path(&mut json, "missing.pretty", serde_json::json!(1)).unwrap_err();
        assert!(err.to_string().contains("Unknown config section"));
    }
}
