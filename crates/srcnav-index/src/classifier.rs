//! Internal/external classification and package attribution.

use crate::unit::LibraryRef;
use srcnav_core::{ClassifierConfig, Package};

/// Decides where a declaration comes from, based on its owning library.
///
/// Declared dependencies are not distinguished from unrelated libraries:
/// anything outside the home package's namespace is external.
#[derive(Debug, Clone)]
pub struct Classifier {
    packages: Vec<Package>,
    runtime_prefixes: Vec<String>,
    package_scheme: String,
}

impl Classifier {
    /// `packages` is in manifest order; the first entry is the home package.
    pub fn new(packages: Vec<Package>, config: &ClassifierConfig) -> Self {
        Self {
            packages,
            runtime_prefixes: config.runtime_prefixes.clone(),
            package_scheme: config.package_scheme.clone(),
        }
    }

    /// The home package, if the manifest named one.
    fn home_package(&self) -> Option<&Package> {
        self.packages.first().filter(|p| !p.name.is_empty())
    }

    /// Whether `library` belongs to the language's standard runtime.
    pub fn is_runtime(&self, library: &LibraryRef) -> bool {
        library.runtime
            || self
                .runtime_prefixes
                .iter()
                .any(|prefix| library.uri.starts_with(prefix.as_str()))
    }

    /// Whether a declaration owned by `library` lies outside the indexed program.
    pub fn is_external(&self, library: Option<&LibraryRef>) -> bool {
        let Some(library) = library else {
            return false;
        };
        if self.is_runtime(library) {
            return true;
        }
        match self.home_package() {
            Some(home) => !library.uri.contains(&self.namespace_prefix(&home.name)),
            None => true,
        }
    }

    /// Name of the first known package whose namespace owns `library`, or empty.
    pub fn package_path_of(&self, library: Option<&LibraryRef>) -> String {
        let Some(library) = library else {
            return String::new();
        };
        self.packages
            .iter()
            .filter(|p| !p.name.is_empty())
            .find(|p| library.uri.contains(&self.namespace_prefix(&p.name)))
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn namespace_prefix(&self, package: &str) -> String {
        format!("{}{}/", self.package_scheme, package)
    }
}
