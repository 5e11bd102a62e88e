//! Per-run extraction context.
//!
//! Owns the identity registry, classifier and program accumulator for one
//! run. Units are fed in one at a time through `&mut self`, which keeps ID
//! allocation and appends serialized without any locking.

use crate::classifier::Classifier;
use crate::program::Program;
use crate::registry::IdentityRegistry;
use crate::unit::ResolvedUnit;
use crate::visitor::{ExtractionVisitor, VisitStats};
use srcnav_core::{ClassifierConfig, Package, ProgramTables};

pub struct ExtractionContext {
    registry: IdentityRegistry,
    classifier: Classifier,
    program: Program,
    stats: VisitStats,
}

impl ExtractionContext {
    /// `packages` comes from the manifest, home package first; may be empty.
    pub fn new(packages: Vec<Package>, config: &ClassifierConfig) -> Self {
        Self {
            registry: IdentityRegistry::new(),
            classifier: Classifier::new(packages.clone(), config),
            program: Program::with_packages(packages),
            stats: VisitStats::default(),
        }
    }

    /// Extract one unit into the accumulated tables.
    pub fn extract(&mut self, unit: &ResolvedUnit) -> VisitStats {
        let stats =
            ExtractionVisitor::new(&mut self.registry, &self.classifier, &mut self.program, unit)
                .run();
        self.stats.merge(&stats);
        stats
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Totals across every unit extracted so far.
    pub fn stats(&self) -> VisitStats {
        self.stats
    }

    pub fn finish(self) -> ProgramTables {
        self.program.into_tables()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{
        Callable, DeclShape, Declaration, ElementRef, LibraryRef, Location, NameContext, Syntax,
    };

    fn function(name: &str, lib: &str, offset: u32, body: Vec<Syntax>) -> Declaration {
        Declaration {
            element: Some(ElementRef::new(name, Some(LibraryRef::new(lib)), offset)),
            shape: DeclShape::Function(Callable::default()),
            location: Location::new(1, 1),
            modifiers: Default::default(),
            members: Vec::new(),
            body,
        }
    }

    fn unit(path: &str, lib: &str, declarations: Vec<Declaration>) -> ResolvedUnit {
        ResolvedUnit {
            path: path.to_string(),
            library: LibraryRef::new(lib),
            library_name: None,
            library_location: None,
            directives: Vec::new(),
            declarations,
            top_level: Vec::new(),
        }
    }

    #[test]
    fn ids_agree_across_units_regardless_of_order() {
        const A: &str = "package:app/a.dart";
        const B: &str = "package:app/b.dart";
        let target = ElementRef::new("helper", Some(LibraryRef::new(B)), 40);

        // a.dart calls helper before b.dart declares it.
        let caller = function(
            "main",
            A,
            0,
            vec![Syntax::Name {
                target: Some(target.clone()),
                context: NameContext::Call,
                location: Location::new(3, 5),
            }],
        );
        let callee = function("helper", B, 40, Vec::new());

        let mut ctx = ExtractionContext::new(
            vec![Package::new("app", "1.0.0")],
            &ClassifierConfig::default(),
        );
        ctx.extract(&unit("lib/a.dart", A, vec![caller]));
        ctx.extract(&unit("lib/b.dart", B, vec![callee]));

        let helper_id = ctx.registry().get(&target.key()).unwrap();
        let declared = ctx
            .program()
            .symbols()
            .iter()
            .find(|s| s.name == "helper")
            .unwrap();
        assert_eq!(declared.id, helper_id);
        assert_eq!(ctx.program().references()[0].to_id, helper_id);
        assert_eq!(ctx.stats().symbols, 4);
    }

    #[test]
    fn packages_are_carried_into_the_tables() {
        let ctx = ExtractionContext::new(
            vec![Package::new("app", "1.0.0"), Package::new("http", "1.2.0")],
            &ClassifierConfig::default(),
        );
        let tables = ctx.finish();
        assert_eq!(tables.packages.len(), 2);
        assert_eq!(tables.packages[0].name, "app");
        assert!(tables.symbols.is_empty());
    }
}
