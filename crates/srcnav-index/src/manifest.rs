//! Manifest parsing: the ordered package list that seeds a run.
//!
//! Reads `pubspec.yaml`, `Cargo.toml` or `package.json`. The declaring
//! package comes first and becomes the home package; dependencies follow in
//! file order, then dev dependencies.

use srcnav_core::{Package, SrcnavError};
use std::path::{Path, PathBuf};

/// Manifest file names, in lookup order.
pub const MANIFEST_NAMES: [&str; 3] = ["pubspec.yaml", "Cargo.toml", "package.json"];

/// Find the first known manifest directly inside `root`.
pub fn find_manifest(root: &Path) -> Option<PathBuf> {
    MANIFEST_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Read a manifest, dispatching on its file name.
pub fn read_manifest(path: &Path) -> Result<Vec<Package>, SrcnavError> {
    let content = std::fs::read_to_string(path)?;
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    match file_name {
        "pubspec.yaml" | "pubspec.yml" => parse_pubspec(&content),
        "Cargo.toml" => parse_cargo_toml(&content),
        "package.json" => parse_package_json(&content),
        _ => Err(SrcnavError::Manifest(format!(
            "unrecognized manifest: {}",
            path.display()
        ))),
    }
}

/// Load the package list for a run, degrading to an empty list on any error.
///
/// `explicit` wins over discovery in `root`. A missing manifest is not an
/// error; a malformed one is logged.
pub fn load_packages(root: &Path, explicit: Option<&Path>) -> Vec<Package> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match find_manifest(root) {
            Some(p) => p,
            None => {
                tracing::warn!("No manifest found in {}", root.display());
                return Vec::new();
            }
        },
    };

    match read_manifest(&path) {
        Ok(packages) => {
            tracing::debug!("Read {} packages from {}", packages.len(), path.display());
            packages
        }
        Err(err) => {
            tracing::warn!("Ignoring manifest {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

// ── pubspec.yaml Parsing ─────────────────────────────────────────────────

/// Parse a pubspec for the package name/version and its dependencies.
pub fn parse_pubspec(content: &str) -> Result<Vec<Package>, SrcnavError> {
    let doc: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| SrcnavError::Manifest(e.to_string()))?;

    let name = doc
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| SrcnavError::Manifest("pubspec has no package name".to_string()))?;
    let version = doc.get("version").map(yaml_scalar).unwrap_or_default();

    let mut packages = vec![Package::new(name, version)];
    for section in ["dependencies", "dev_dependencies"] {
        if let Some(deps) = doc.get(section).and_then(|v| v.as_mapping()) {
            for (dep_name, spec) in deps {
                let Some(dep_name) = dep_name.as_str() else {
                    continue;
                };
                packages.push(Package::new(dep_name, extract_pubspec_dep_version(spec)));
            }
        }
    }
    Ok(packages)
}

/// Handles `^1.0.0`, `{ version: ^1.0.0, ... }` and `{ sdk: flutter }` forms.
fn extract_pubspec_dep_version(spec: &serde_yaml::Value) -> String {
    match spec {
        serde_yaml::Value::Mapping(map) => map.get("version").map(yaml_scalar).unwrap_or_default(),
        other => yaml_scalar(other),
    }
}

fn yaml_scalar(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

// ── Cargo.toml Parsing ───────────────────────────────────────────────────

/// Parse a Cargo manifest for its package and dependencies.
pub fn parse_cargo_toml(content: &str) -> Result<Vec<Package>, SrcnavError> {
    let toml_value: toml::Value =
        toml::from_str(content).map_err(|e| SrcnavError::Manifest(e.to_string()))?;
    let table = toml_value
        .as_table()
        .ok_or_else(|| SrcnavError::Manifest("Cargo.toml is not a table".to_string()))?;

    let package = table
        .get("package")
        .and_then(|v| v.as_table())
        .ok_or_else(|| SrcnavError::Manifest("Cargo.toml has no [package]".to_string()))?;
    let name = package
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| SrcnavError::Manifest("Cargo.toml has no package name".to_string()))?;
    let version = package
        .get("version")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    let mut packages = vec![Package::new(name, version)];
    for section in ["dependencies", "dev-dependencies", "build-dependencies"] {
        if let Some(deps) = table.get(section).and_then(|v| v.as_table()) {
            for (dep_name, value) in deps {
                packages.push(Package::new(dep_name.as_str(), extract_cargo_dep_version(value)));
            }
        }
    }
    Ok(packages)
}

/// Extract version string from a Cargo dependency value.
/// Handles both `"1.0"` (string) and `{ version = "1.0", ... }` (table) forms.
fn extract_cargo_dep_version(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(t) => t
            .get("version")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        _ => String::new(),
    }
}

// ── package.json Parsing ─────────────────────────────────────────────────

/// Parse a package.json for its name, version and dependencies.
pub fn parse_package_json(content: &str) -> Result<Vec<Package>, SrcnavError> {
    let json: serde_json::Value =
        serde_json::from_str(content).map_err(|e| SrcnavError::Manifest(e.to_string()))?;
    let obj = json
        .as_object()
        .ok_or_else(|| SrcnavError::Manifest("package.json is not an object".to_string()))?;

    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| SrcnavError::Manifest("package.json has no name".to_string()))?;
    let version = obj.get("version").and_then(|v| v.as_str()).unwrap_or("");

    let mut packages = vec![Package::new(name, version)];
    for section in ["dependencies", "devDependencies", "peerDependencies"] {
        if let Some(deps) = obj.get(section).and_then(|v| v.as_object()) {
            for (dep_name, value) in deps {
                packages.push(Package::new(
                    dep_name.as_str(),
                    value.as_str().unwrap_or(""),
                ));
            }
        }
    }
    Ok(packages)
}
