//! Resolved compilation units as handed over by the language front end.
//!
//! One JSON document per source file. The front end has already parsed and
//! name-resolved the file; every declaration and name reference carries the
//! element it resolves to, when it could be resolved at all.

use crate::registry::DeclKey;
use serde::{Deserialize, Serialize};
use srcnav_core::SrcnavError;
use std::path::Path;

/// 1-based line and column of a piece of syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A library (compilation unit owner), identified by its canonical URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRef {
    pub uri: String,
    /// Set by the front end when the library belongs to the standard runtime.
    #[serde(default)]
    pub runtime: bool,
    #[serde(default)]
    pub handle: Option<u64>,
}

impl LibraryRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            runtime: false,
            handle: None,
        }
    }

    pub fn key(&self) -> DeclKey {
        match self.handle {
            Some(handle) => DeclKey::Handle(handle),
            None => DeclKey::Library(self.uri.clone()),
        }
    }
}

/// The resolved element a declaration or name reference points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRef {
    pub name: String,
    /// Opaque identity from the front end, preferred over the location key.
    #[serde(default)]
    pub handle: Option<u64>,
    /// Owning library; `None` for fully synthetic elements.
    #[serde(default)]
    pub library: Option<LibraryRef>,
    /// Source offset of the declaration inside its library.
    #[serde(default)]
    pub offset: u32,
}

impl ElementRef {
    pub fn new(name: impl Into<String>, library: Option<LibraryRef>, offset: u32) -> Self {
        Self {
            name: name.into(),
            handle: None,
            library,
            offset,
        }
    }

    /// Identity key used by the registry.
    pub fn key(&self) -> DeclKey {
        match self.handle {
            Some(handle) => DeclKey::Handle(handle),
            None => DeclKey::Location {
                library: self
                    .library
                    .as_ref()
                    .map(|l| l.uri.clone())
                    .unwrap_or_default(),
                offset: self.offset,
                name: self.name.clone(),
            },
        }
    }
}

/// A resolved type as written in a declaration header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Display form, e.g. `List<int>`.
    pub display: String,
    #[serde(default)]
    pub element: Option<ElementRef>,
    /// True for the universal root type every class extends implicitly.
    #[serde(default)]
    pub root: bool,
    /// Members declared by the referenced type, used for override lookup.
    #[serde(default)]
    pub members: Vec<ElementRef>,
    /// Where the type is named in the referencing declaration.
    #[serde(default)]
    pub location: Location,
}

impl TypeRef {
    pub fn member_named(&self, name: &str) -> Option<&ElementRef> {
        self.members.iter().find(|m| m.name == name)
    }
}

// ── Directives ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    Import,
    Export,
    Part,
}

impl DirectiveKind {
    /// Imports and exports pull another library in; parts do not.
    pub fn is_import_like(&self) -> bool {
        matches!(self, Self::Import | Self::Export)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub uri: String,
    #[serde(default)]
    pub location: Location,
    /// The library the URI resolved to, if it resolved.
    #[serde(default)]
    pub target: Option<LibraryRef>,
}

// ── Declarations ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "const")]
    pub is_const: bool,
    #[serde(rename = "override")]
    pub is_override: bool,
    /// Compiler-provided declaration with no source text (e.g. default constructor).
    #[serde(rename = "synthetic")]
    pub is_synthetic: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    #[default]
    Required,
    /// Optional positional, written inside `[...]`.
    Positional,
    /// Named, written inside `{...}`.
    Named,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub element: Option<ElementRef>,
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub kind: ParamKind,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumConstant {
    #[serde(default)]
    pub element: Option<ElementRef>,
    #[serde(default)]
    pub location: Location,
}

/// Header of a function, method or constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Callable {
    pub return_type: Option<String>,
    pub params: Vec<Param>,
}

/// Header of a field or variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Binding {
    #[serde(rename = "type")]
    pub ty: Option<String>,
}

/// Category-specific data of a declaration, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclShape {
    Type {
        #[serde(default)]
        supertype: Option<TypeRef>,
        /// Whether the source spells out an `extends` clause.
        #[serde(default)]
        explicit_extends: bool,
        #[serde(default)]
        interfaces: Vec<TypeRef>,
        #[serde(default)]
        composables: Vec<TypeRef>,
    },
    Mixin {
        #[serde(default)]
        constraints: Vec<TypeRef>,
        #[serde(default)]
        interfaces: Vec<TypeRef>,
    },
    Extension {
        #[serde(default)]
        extended_type: Option<TypeRef>,
    },
    Enum {
        #[serde(default)]
        constants: Vec<EnumConstant>,
        #[serde(default)]
        interfaces: Vec<TypeRef>,
        #[serde(default)]
        composables: Vec<TypeRef>,
    },
    Function(Callable),
    Method(Callable),
    Constructor(Callable),
    Field(Binding),
    Variable(Binding),
    TypeAlias {
        #[serde(default)]
        aliased: Option<String>,
    },
}

impl DeclShape {
    /// Ancestors to search for an overridden member, in search order:
    /// interfaces, then the direct supertype, then applied composables.
    pub fn override_candidates(&self) -> Vec<&TypeRef> {
        match self {
            Self::Type {
                supertype,
                interfaces,
                composables,
                ..
            } => interfaces
                .iter()
                .chain(supertype.iter())
                .chain(composables.iter())
                .collect(),
            // A composable's `on` constraints stand in for its supertype.
            Self::Mixin {
                constraints,
                interfaces,
            } => interfaces.iter().chain(constraints.iter()).collect(),
            // Enums have no explicit supertype.
            Self::Enum {
                interfaces,
                composables,
                ..
            } => interfaces.iter().chain(composables.iter()).collect(),
            _ => Vec::new(),
        }
    }
}

/// One declaration node in the resolved tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// The resolved element; missing when the front end could not resolve it.
    #[serde(default)]
    pub element: Option<ElementRef>,
    #[serde(flatten)]
    pub shape: DeclShape,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Nested member declarations.
    #[serde(default)]
    pub members: Vec<Declaration>,
    /// Syntax inside the declaration that is not itself a member.
    #[serde(default)]
    pub body: Vec<Syntax>,
}

// ── Syntax ──────────────────────────────────────────────────────────────────

/// Immediate syntactic parent of a name reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameContext {
    /// The name is the target of a call expression.
    Call,
    #[default]
    Other,
}

/// Syntax found in bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Syntax {
    /// A name that may resolve to a declaration.
    Name {
        #[serde(default)]
        target: Option<ElementRef>,
        #[serde(default)]
        context: NameContext,
        #[serde(default)]
        location: Location,
    },
    /// A nested scope that is not a declaration (block, closure).
    Scope {
        #[serde(default)]
        children: Vec<Syntax>,
    },
    /// A local function or variable.
    Local { declaration: Box<Declaration> },
}

// ── Units ───────────────────────────────────────────────────────────────────

/// A fully resolved source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUnit {
    /// Path of the source file, as it should appear in the output.
    pub path: String,
    pub library: LibraryRef,
    #[serde(default)]
    pub library_name: Option<String>,
    #[serde(default)]
    pub library_location: Option<Location>,
    #[serde(default)]
    pub directives: Vec<Directive>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    /// Syntax at file level, outside every declaration.
    #[serde(default)]
    pub top_level: Vec<Syntax>,
}

impl ResolvedUnit {
    /// Read and deserialize a unit document.
    pub fn load(path: &Path) -> Result<Self, SrcnavError> {
        let resolve_err = |reason: String| SrcnavError::Resolve {
            path: path.display().to_string(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| resolve_err(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| resolve_err(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn declaration_kind_is_flattened_into_the_node() {
        let decl: Declaration = serde_json::from_value(json!({
            "kind": "method",
            "element": { "name": "build", "offset": 40,
                         "library": { "uri": "package:app/widget.dart" } },
            "return_type": "Widget",
            "params": [{ "name": "context", "type": "BuildContext" }],
            "modifiers": { "override": true },
            "location": { "line": 4, "column": 3 }
        }))
        .unwrap();

        assert!(decl.modifiers.is_override);
        assert!(!decl.modifiers.is_static);
        match &decl.shape {
            DeclShape::Method(callable) => {
                assert_eq!(callable.return_type.as_deref(), Some("Widget"));
                assert_eq!(callable.params[0].kind, ParamKind::Required);
            }
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn element_key_prefers_handle() {
        let mut element = ElementRef::new("x", Some(LibraryRef::new("package:app/a.dart")), 3);
        assert_eq!(
            element.key(),
            DeclKey::Location {
                library: "package:app/a.dart".to_string(),
                offset: 3,
                name: "x".to_string(),
            }
        );
        element.handle = Some(99);
        assert_eq!(element.key(), DeclKey::Handle(99));
    }

    #[test]
    fn syntax_nodes_are_tagged() {
        let body: Vec<Syntax> = serde_json::from_value(json!([
            { "node": "name", "context": "call",
              "target": { "name": "foo" }, "location": { "line": 1, "column": 1 } },
            { "node": "scope", "children": [ { "node": "name" } ] },
            { "node": "local", "declaration": { "kind": "variable",
              "element": { "name": "tmp" } } }
        ]))
        .unwrap();
        assert_eq!(body.len(), 3);
        assert!(matches!(
            body[0],
            Syntax::Name {
                context: NameContext::Call,
                ..
            }
        ));
        assert!(matches!(&body[1], Syntax::Scope { children } if children.len() == 1));
        assert!(matches!(&body[2], Syntax::Local { .. }));
    }

    #[test]
    fn override_candidates_follow_search_order() {
        let named = |n: &str| TypeRef {
            display: n.to_string(),
            ..Default::default()
        };
        let shape = DeclShape::Type {
            supertype: Some(named("Base")),
            explicit_extends: true,
            interfaces: vec![named("I1"), named("I2")],
            composables: vec![named("M")],
        };
        let order: Vec<&str> = shape
            .override_candidates()
            .iter()
            .map(|t| t.display.as_str())
            .collect();
        assert_eq!(order, vec!["I1", "I2", "Base", "M"]);

        let shape = DeclShape::Enum {
            constants: Vec::new(),
            interfaces: vec![named("Comparable")],
            composables: vec![named("Labelled")],
        };
        let order: Vec<&str> = shape
            .override_candidates()
            .iter()
            .map(|t| t.display.as_str())
            .collect();
        assert_eq!(order, vec!["Comparable", "Labelled"]);
    }

    #[test]
    fn load_reports_resolve_error_for_bad_json() {
        let dir = std::env::temp_dir().join("srcnav_unit_load_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.unit.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ResolvedUnit::load(&path).unwrap_err();
        assert!(matches!(err, SrcnavError::Resolve { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
