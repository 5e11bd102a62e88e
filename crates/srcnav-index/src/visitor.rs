//! Extraction visitor: one pre-order walk over a resolved unit.
//!
//! Every declaration gets an ID from the registry and a [`Symbol`]; the
//! relationships implied by its syntax become [`Reference`]s. Name references
//! in bodies are attributed to the nearest enclosing declaration on the
//! lexical scope stack.

use crate::classifier::Classifier;
use crate::program::Program;
use crate::registry::{DeclKey, IdentityRegistry};
use crate::signature;
use crate::unit::{
    DeclShape, Declaration, ElementRef, EnumConstant, LibraryRef, Location, NameContext, Param,
    ResolvedUnit, Syntax, TypeRef,
};
use srcnav_core::{RefType, Reference, Symbol, SymbolId, SymbolKind, ROOT_ID};

/// Display name of a constructor declared without a name.
pub const DEFAULT_CONSTRUCTOR_NAME: &str = "<default>";
/// Display name of unnamed libraries and extensions.
pub const ANONYMOUS_NAME: &str = "<anonymous>";

/// Counters for one or more visited units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisitStats {
    pub symbols: usize,
    pub references: usize,
    /// Declarations with no resolved element.
    pub skipped_declarations: usize,
    /// Relationships whose target did not resolve.
    pub skipped_references: usize,
}

impl VisitStats {
    pub fn merge(&mut self, other: &VisitStats) {
        self.symbols += other.symbols;
        self.references += other.references;
        self.skipped_declarations += other.skipped_declarations;
        self.skipped_references += other.skipped_references;
    }
}

/// A frame on the lexical scope stack.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Declaration(SymbolId),
    /// A block or closure: not a declaration, looked through when attributing.
    Block,
}

/// Walks one [`ResolvedUnit`], appending to a shared [`Program`].
pub struct ExtractionVisitor<'a> {
    registry: &'a mut IdentityRegistry,
    classifier: &'a Classifier,
    program: &'a mut Program,
    unit: &'a ResolvedUnit,
    scopes: Vec<Frame>,
    stats: VisitStats,
}

impl<'a> ExtractionVisitor<'a> {
    pub fn new(
        registry: &'a mut IdentityRegistry,
        classifier: &'a Classifier,
        program: &'a mut Program,
        unit: &'a ResolvedUnit,
    ) -> Self {
        Self {
            registry,
            classifier,
            program,
            unit,
            scopes: Vec::new(),
            stats: VisitStats::default(),
        }
    }

    /// Visit the whole unit: library, directives, declarations, then file-level syntax.
    pub fn run(mut self) -> VisitStats {
        let unit = self.unit;
        let library_id = self.visit_library(unit);
        for decl in &unit.declarations {
            self.visit_declaration(decl, library_id, None);
        }
        // Nothing encloses file-level syntax, so names here produce no references.
        for syntax in &unit.top_level {
            self.visit_syntax(syntax);
        }
        self.stats
    }

    // ── Declarations ────────────────────────────────────────────────────────

    fn visit_library(&mut self, unit: &ResolvedUnit) -> SymbolId {
        let id = self.registry.id_for(&unit.library.key());
        let name = unit
            .library_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(ANONYMOUS_NAME);
        let location = unit.library_location.unwrap_or_default();
        let symbol = self.symbol(
            id,
            name,
            SymbolKind::Library,
            Some(&unit.library),
            location,
            ROOT_ID,
        );
        self.emit_symbol(symbol);

        for directive in unit.directives.iter().filter(|d| d.kind.is_import_like()) {
            match &directive.target {
                Some(target) => {
                    let to = self.registry.id_for(&target.key());
                    self.emit_reference(id, to, directive.location, RefType::Import);
                }
                None => {
                    self.stats.skipped_references += 1;
                    tracing::debug!(
                        "{}:{}: unresolved directive {}",
                        unit.path,
                        directive.location.line,
                        directive.uri
                    );
                }
            }
        }
        id
    }

    /// `owner` is the shape of the enclosing type, used for override lookup.
    fn visit_declaration(
        &mut self,
        decl: &Declaration,
        parent: SymbolId,
        owner: Option<&DeclShape>,
    ) {
        let Some(element) = &decl.element else {
            self.stats.skipped_declarations += 1;
            tracing::debug!(
                "{}:{}: skipping unresolved declaration",
                self.unit.path,
                decl.location.line
            );
            // Members and body may still resolve; they attach to the outer scope.
            for member in &decl.members {
                self.visit_declaration(member, parent, None);
            }
            for syntax in &decl.body {
                self.visit_syntax(syntax);
            }
            return;
        };

        let kind = symbol_kind(&decl.shape);
        let id = self
            .registry
            .id_for(&declaration_key(element, parent, kind));
        let name = display_name(decl, element);
        let signature_name = match decl.shape {
            DeclShape::Extension { .. } => element.name.as_str(),
            _ => name,
        };

        let mut symbol = self.symbol(
            id,
            name,
            kind,
            element.library.as_ref(),
            decl.location,
            parent,
        );
        symbol.signature = signature::synthesize(decl, signature_name);
        symbol.is_static = decl.modifiers.is_static;
        symbol.is_abstract = decl.modifiers.is_abstract;
        self.emit_symbol(symbol);

        match &decl.shape {
            DeclShape::Type {
                supertype,
                explicit_extends,
                interfaces,
                composables,
            } => {
                if let Some(st) = supertype {
                    // The implicit root supertype is only recorded when spelled out.
                    if !st.root || *explicit_extends {
                        self.visit_type_ref(id, st, RefType::Extends);
                    }
                }
                for iface in interfaces {
                    self.visit_type_ref(id, iface, RefType::Implements);
                }
                for composable in composables {
                    self.visit_type_ref(id, composable, RefType::With);
                }
            }
            DeclShape::Mixin {
                constraints,
                interfaces,
            } => {
                for ty in constraints.iter().chain(interfaces) {
                    self.visit_type_ref(id, ty, RefType::Implements);
                }
            }
            DeclShape::Extension { extended_type } => match extended_type {
                Some(ty) => self.visit_type_ref(id, ty, RefType::Extends),
                None => self.stats.skipped_references += 1,
            },
            DeclShape::Enum {
                constants,
                interfaces,
                composables,
            } => {
                for iface in interfaces {
                    self.visit_type_ref(id, iface, RefType::Implements);
                }
                for composable in composables {
                    self.visit_type_ref(id, composable, RefType::With);
                }
                self.visit_enum_constants(id, constants);
            }
            DeclShape::Method(callable) => {
                if decl.modifiers.is_override {
                    self.visit_override(id, &element.name, decl.location, owner);
                }
                self.visit_params(id, &callable.params);
            }
            DeclShape::Function(callable) | DeclShape::Constructor(callable) => {
                self.visit_params(id, &callable.params);
            }
            DeclShape::Field(_) | DeclShape::Variable(_) | DeclShape::TypeAlias { .. } => {}
        }

        self.scopes.push(Frame::Declaration(id));
        for member in &decl.members {
            self.visit_declaration(member, id, Some(&decl.shape));
        }
        for syntax in &decl.body {
            self.visit_syntax(syntax);
        }
        self.scopes.pop();
    }

    fn visit_enum_constants(&mut self, enum_id: SymbolId, constants: &[EnumConstant]) {
        for constant in constants {
            let Some(element) = &constant.element else {
                self.stats.skipped_declarations += 1;
                continue;
            };
            let id = self
                .registry
                .id_for(&declaration_key(element, enum_id, SymbolKind::Field));
            let mut symbol = self.symbol(
                id,
                &element.name,
                SymbolKind::Field,
                element.library.as_ref(),
                constant.location,
                enum_id,
            );
            symbol.is_static = true;
            symbol.is_private = false;
            self.emit_symbol(symbol);
        }
    }

    fn visit_params(&mut self, owner_id: SymbolId, params: &[Param]) {
        for param in params {
            let Some(element) = &param.element else {
                self.stats.skipped_declarations += 1;
                continue;
            };
            let id = self
                .registry
                .id_for(&declaration_key(element, owner_id, SymbolKind::Parameter));
            let mut symbol = self.symbol(
                id,
                &element.name,
                SymbolKind::Parameter,
                element.library.as_ref(),
                param.location,
                owner_id,
            );
            symbol.signature = signature::parameter_symbol_signature(param);
            self.emit_symbol(symbol);
        }
    }

    /// Record one `override` edge to the first ancestor member named `name`.
    ///
    /// Search order is interfaces, supertype, composables; the first hit wins
    /// even when several ancestors declare the same name.
    fn visit_override(
        &mut self,
        method_id: SymbolId,
        name: &str,
        location: Location,
        owner: Option<&DeclShape>,
    ) {
        let Some(owner) = owner else {
            return;
        };
        let target = owner
            .override_candidates()
            .into_iter()
            .find_map(|ty| ty.member_named(name));
        match target {
            Some(target) => {
                let to = self.registry.id_for(&target.key());
                self.emit_reference(method_id, to, location, RefType::Override);
            }
            None => {
                tracing::debug!(
                    "{}:{}: no overridden member named {}",
                    self.unit.path,
                    location.line,
                    name
                );
            }
        }
    }

    fn visit_type_ref(&mut self, from: SymbolId, ty: &TypeRef, ref_type: RefType) {
        match &ty.element {
            Some(element) => {
                let to = self.registry.id_for(&element.key());
                self.emit_reference(from, to, ty.location, ref_type);
            }
            None => {
                self.stats.skipped_references += 1;
                tracing::debug!(
                    "{}:{}: unresolved {} type {}",
                    self.unit.path,
                    ty.location.line,
                    ref_type,
                    ty.display
                );
            }
        }
    }

    // ── Bodies ──────────────────────────────────────────────────────────────

    fn visit_syntax(&mut self, syntax: &Syntax) {
        match syntax {
            Syntax::Name {
                target,
                context,
                location,
            } => self.visit_name(target.as_ref(), *context, *location),
            Syntax::Scope { children } => {
                self.scopes.push(Frame::Block);
                for child in children {
                    self.visit_syntax(child);
                }
                self.scopes.pop();
            }
            Syntax::Local { declaration } => {
                let parent = self.enclosing_declaration().unwrap_or(ROOT_ID);
                self.visit_declaration(declaration, parent, None);
            }
        }
    }

    fn visit_name(&mut self, target: Option<&ElementRef>, context: NameContext, location: Location) {
        let Some(target) = target else {
            self.stats.skipped_references += 1;
            return;
        };
        let Some(from) = self.enclosing_declaration() else {
            tracing::debug!(
                "{}:{}: reference to {} outside any declaration",
                self.unit.path,
                location.line,
                target.name
            );
            return;
        };
        let to = self.registry.id_for(&target.key());
        let ref_type = match context {
            NameContext::Call => RefType::Call,
            NameContext::Other => RefType::Usage,
        };
        self.emit_reference(from, to, location, ref_type);
    }

    /// Nearest declaration on the scope stack, looking outward through blocks.
    fn enclosing_declaration(&self) -> Option<SymbolId> {
        self.scopes.iter().rev().find_map(|frame| match frame {
            Frame::Declaration(id) => Some(*id),
            Frame::Block => None,
        })
    }

    // ── Emission ────────────────────────────────────────────────────────────

    fn symbol(
        &self,
        id: SymbolId,
        name: &str,
        kind: SymbolKind,
        library: Option<&LibraryRef>,
        location: Location,
        parent_id: SymbolId,
    ) -> Symbol {
        Symbol {
            id,
            name: name.to_string(),
            kind,
            package_path: self.classifier.package_path_of(library),
            file: self.unit.path.clone(),
            line: location.line,
            column: location.column,
            signature: String::new(),
            external: self.classifier.is_external(library),
            parent_id,
            library_name: self.unit.library_name.clone().unwrap_or_default(),
            is_private: name.starts_with('_'),
            is_static: false,
            is_abstract: false,
        }
    }

    fn emit_symbol(&mut self, symbol: Symbol) {
        self.stats.symbols += 1;
        self.program.add_symbol(symbol);
    }

    fn emit_reference(&mut self, from: SymbolId, to: SymbolId, at: Location, ref_type: RefType) {
        self.stats.references += 1;
        self.program.add_reference(Reference {
            from_id: from,
            to_id: to,
            file: self.unit.path.clone(),
            line: at.line,
            column: at.column,
            ref_type,
        });
    }
}

/// Identity of a declaration visited under `parent`.
///
/// An element with neither a handle nor an owning library has no location
/// to key on, so it is scoped by its enclosing declaration instead.
fn declaration_key(element: &ElementRef, parent: SymbolId, kind: SymbolKind) -> DeclKey {
    if element.handle.is_none() && element.library.is_none() {
        DeclKey::Synthetic {
            parent,
            kind,
            name: element.name.clone(),
        }
    } else {
        element.key()
    }
}

fn symbol_kind(shape: &DeclShape) -> SymbolKind {
    match shape {
        DeclShape::Type { .. } => SymbolKind::Type,
        DeclShape::Mixin { .. } => SymbolKind::Mixin,
        DeclShape::Extension { .. } => SymbolKind::Extension,
        DeclShape::Enum { .. } => SymbolKind::Enum,
        DeclShape::Function(_) => SymbolKind::Function,
        DeclShape::Method(_) => SymbolKind::Method,
        DeclShape::Constructor(_) => SymbolKind::Constructor,
        DeclShape::Field(_) => SymbolKind::Field,
        DeclShape::Variable(_) => SymbolKind::Variable,
        DeclShape::TypeAlias { .. } => SymbolKind::TypeAlias,
    }
}

fn display_name<'e>(decl: &Declaration, element: &'e ElementRef) -> &'e str {
    if !element.name.is_empty() {
        return &element.name;
    }
    match decl.shape {
        DeclShape::Constructor(_) => DEFAULT_CONSTRUCTOR_NAME,
        _ => ANONYMOUS_NAME,
    }
}
