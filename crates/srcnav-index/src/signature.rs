//! Display signatures for declarations.
//!
//! Pure string formatting over already-resolved names and types. Lists keep
//! declaration order so the output is byte-identical across runs.

use crate::unit::{Binding, Callable, DeclShape, Declaration, Param, ParamKind, TypeRef};

/// Type name the front end reports when a type was left to inference.
pub const INFERRED_TYPE: &str = "dynamic";

/// Whether `ty` is absent or the inferred placeholder.
pub fn is_inferred(ty: Option<&str>) -> bool {
    match ty {
        None => true,
        Some(t) => t.is_empty() || t == INFERRED_TYPE,
    }
}

/// Signature of `decl`, displayed under `name`.
pub fn synthesize(decl: &Declaration, name: &str) -> String {
    let m = &decl.modifiers;
    match &decl.shape {
        DeclShape::Type {
            supertype,
            interfaces,
            composables,
            ..
        } => type_signature(name, supertype.as_ref(), interfaces, composables),
        DeclShape::Mixin {
            constraints,
            interfaces,
        } => composable_signature(name, constraints, interfaces),
        DeclShape::Extension { extended_type } => extension_signature(
            name,
            extended_type
                .as_ref()
                .map(|t| t.display.as_str())
                .filter(|d| !d.is_empty()),
        ),
        DeclShape::Enum { .. } => format!("enum {name}"),
        DeclShape::Function(c) | DeclShape::Method(c) | DeclShape::Constructor(c) => {
            callable_signature(name, m.is_static, c)
        }
        DeclShape::Field(b) | DeclShape::Variable(b) => {
            binding_signature(name, m.is_static, m.is_final, m.is_const, b)
        }
        DeclShape::TypeAlias { aliased } => match aliased {
            Some(aliased) if !aliased.is_empty() => format!("typedef {name} = {aliased}"),
            _ => format!("typedef {name}"),
        },
    }
}

/// `type <name> [extends S] [implements I, ..] [with M, ..]`
pub fn type_signature(
    name: &str,
    supertype: Option<&TypeRef>,
    interfaces: &[TypeRef],
    composables: &[TypeRef],
) -> String {
    let mut sig = format!("type {name}");
    if let Some(st) = supertype.filter(|st| !st.root) {
        sig.push_str(" extends ");
        sig.push_str(&st.display);
    }
    push_list(&mut sig, "implements", interfaces);
    push_list(&mut sig, "with", composables);
    sig
}

/// `composable <name> [on C, ..] [implements I, ..]`
pub fn composable_signature(name: &str, constraints: &[TypeRef], interfaces: &[TypeRef]) -> String {
    let mut sig = format!("composable {name}");
    push_list(&mut sig, "on", constraints);
    push_list(&mut sig, "implements", interfaces);
    sig
}

/// `extension [<name>] [on <type>]`; an empty name or unresolved type is left out.
pub fn extension_signature(name: &str, extended: Option<&str>) -> String {
    let mut sig = String::from("extension");
    if !name.is_empty() {
        sig.push(' ');
        sig.push_str(name);
    }
    if let Some(extended) = extended {
        sig.push_str(" on ");
        sig.push_str(extended);
    }
    sig
}

/// `[static] [R] name(params)`
pub fn callable_signature(name: &str, is_static: bool, callable: &Callable) -> String {
    let mut sig = String::new();
    if is_static {
        sig.push_str("static ");
    }
    if let Some(ret) = callable.return_type.as_deref().filter(|r| !is_inferred(Some(r))) {
        sig.push_str(ret);
        sig.push(' ');
    }
    let params: Vec<String> = callable.params.iter().map(param_signature).collect();
    sig.push_str(name);
    sig.push('(');
    sig.push_str(&params.join(", "));
    sig.push(')');
    sig
}

/// One parameter as it appears inside a parameter list.
pub fn param_signature(param: &Param) -> String {
    let (open, close) = match param.kind {
        ParamKind::Required => ("", ""),
        ParamKind::Positional => ("[", "]"),
        ParamKind::Named => ("{", "}"),
    };
    let mut sig = String::from(open);
    sig.push_str(&typed_name(param.ty.as_deref(), &param.name));
    if let Some(default) = &param.default_value {
        sig.push_str(" = ");
        sig.push_str(default);
    }
    sig.push_str(close);
    sig
}

/// Signature of a parameter emitted as its own symbol.
pub fn parameter_symbol_signature(param: &Param) -> String {
    typed_name(param.ty.as_deref(), &param.name)
}

/// `[static] [final|const] [T] name`
pub fn binding_signature(
    name: &str,
    is_static: bool,
    is_final: bool,
    is_const: bool,
    binding: &Binding,
) -> String {
    let mut sig = String::new();
    if is_static {
        sig.push_str("static ");
    }
    if is_const {
        sig.push_str("const ");
    } else if is_final {
        sig.push_str("final ");
    }
    sig.push_str(&typed_name(binding.ty.as_deref(), name));
    sig
}

fn typed_name(ty: Option<&str>, name: &str) -> String {
    match ty {
        Some(t) if !is_inferred(Some(t)) => format!("{t} {name}"),
        _ => name.to_string(),
    }
}

fn push_list(sig: &mut String, keyword: &str, types: &[TypeRef]) {
    if types.is_empty() {
        return;
    }
    let names: Vec<&str> = types.iter().map(|t| t.display.as_str()).collect();
    sig.push(' ');
    sig.push_str(keyword);
    sig.push(' ');
    sig.push_str(&names.join(", "));
}
