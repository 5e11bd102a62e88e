use serde::{Deserialize, Serialize};

/// Integer identity assigned to a declaration for the life of one run.
///
/// `0` is reserved for "no parent / program root".
pub type SymbolId = u32;

/// Parent ID used for top-level symbols with no enclosing declaration.
pub const ROOT_ID: SymbolId = 0;

// ── Symbol Kinds ────────────────────────────────────────────────────────────

/// The closed set of declaration kinds a [`Symbol`] can carry.
///
/// Serialized names match what the navigation-database loader expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    #[serde(rename = "package")]
    Package,
    #[serde(rename = "library")]
    Library,
    #[serde(rename = "class_")]
    Type,
    /// Trait-like composable applied with `with`.
    #[serde(rename = "mixin")]
    Mixin,
    #[serde(rename = "extension")]
    Extension,
    #[serde(rename = "enum_")]
    Enum,
    #[serde(rename = "function")]
    Function,
    #[serde(rename = "method")]
    Method,
    #[serde(rename = "constructor")]
    Constructor,
    #[serde(rename = "field")]
    Field,
    #[serde(rename = "variable")]
    Variable,
    #[serde(rename = "parameter")]
    Parameter,
    #[serde(rename = "typeAlias")]
    TypeAlias,
}

impl SymbolKind {
    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Library => "library",
            Self::Type => "class_",
            Self::Mixin => "mixin",
            Self::Extension => "extension",
            Self::Enum => "enum_",
            Self::Function => "function",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Field => "field",
            Self::Variable => "variable",
            Self::Parameter => "parameter",
            Self::TypeAlias => "typeAlias",
        }
    }

    /// Every kind, in declaration order.
    pub const ALL: [SymbolKind; 13] = [
        Self::Package,
        Self::Library,
        Self::Type,
        Self::Mixin,
        Self::Extension,
        Self::Enum,
        Self::Function,
        Self::Method,
        Self::Constructor,
        Self::Field,
        Self::Variable,
        Self::Parameter,
        Self::TypeAlias,
    ];
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Reference Types ─────────────────────────────────────────────────────────

/// The seven edge kinds recorded between symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefType {
    #[serde(rename = "usage")]
    Usage,
    #[serde(rename = "call")]
    Call,
    #[serde(rename = "override")]
    Override,
    #[serde(rename = "extends_")]
    Extends,
    #[serde(rename = "implements_")]
    Implements,
    /// Application of a composable (`with`).
    #[serde(rename = "with_")]
    With,
    #[serde(rename = "import")]
    Import,
}

impl RefType {
    /// Wire name of this reference type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::Call => "call",
            Self::Override => "override",
            Self::Extends => "extends_",
            Self::Implements => "implements_",
            Self::With => "with_",
            Self::Import => "import",
        }
    }
}

impl std::fmt::Display for RefType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Records ─────────────────────────────────────────────────────────────────

/// One declaration encountered during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(rename = "ID")]
    pub id: SymbolId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Kind")]
    pub kind: SymbolKind,
    /// Name of the known package owning this declaration, or empty.
    #[serde(rename = "PackagePath")]
    pub package_path: String,
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "Line")]
    pub line: u32,
    #[serde(rename = "Column")]
    pub column: u32,
    /// Display-only signature; never used for identity.
    #[serde(rename = "Sig")]
    pub signature: String,
    #[serde(rename = "External")]
    pub external: bool,
    /// Enclosing symbol, or [`ROOT_ID`].
    #[serde(rename = "ParentID")]
    pub parent_id: SymbolId,
    #[serde(rename = "LibraryName")]
    pub library_name: String,
    #[serde(rename = "IsPrivate")]
    pub is_private: bool,
    #[serde(rename = "IsStatic")]
    pub is_static: bool,
    #[serde(rename = "IsAbstract")]
    pub is_abstract: bool,
}

/// A directed relationship, always referrer → referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "FromID")]
    pub from_id: SymbolId,
    #[serde(rename = "ToID")]
    pub to_id: SymbolId,
    /// File holding the referencing syntax.
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "Line")]
    pub line: u32,
    #[serde(rename = "Column")]
    pub column: u32,
    #[serde(rename = "RefType")]
    pub ref_type: RefType,
}

/// A package named by the manifest. The first one is the home package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// The three output tables handed to the serialization sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramTables {
    pub symbols: Vec<Symbol>,
    pub references: Vec<Reference>,
    pub packages: Vec<Package>,
}
