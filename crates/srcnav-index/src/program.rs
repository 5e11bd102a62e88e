//! Program accumulator: the append-only output tables of one run.

use srcnav_core::{Package, ProgramTables, Reference, Symbol, SymbolKind};

/// Collects symbols, references and packages in visitation order.
///
/// No deduplication happens here: a declaration visited from two roots
/// shows up twice with the same ID.
#[derive(Debug, Default)]
pub struct Program {
    symbols: Vec<Symbol>,
    references: Vec<Reference>,
    packages: Vec<Package>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a program seeded with manifest packages, home package first.
    pub fn with_packages(packages: Vec<Package>) -> Self {
        Self {
            packages,
            ..Self::default()
        }
    }

    pub fn add_symbol(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    pub fn add_reference(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Symbol counts per kind, skipping kinds with no symbols.
    pub fn kind_counts(&self) -> Vec<(SymbolKind, usize)> {
        SymbolKind::ALL
            .iter()
            .map(|&kind| (kind, self.symbols.iter().filter(|s| s.kind == kind).count()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }

    /// Hand the tables over to the sink.
    pub fn into_tables(self) -> ProgramTables {
        ProgramTables {
            symbols: self.symbols,
            references: self.references,
            packages: self.packages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use srcnav_core::RefType;

    fn symbol(id: u32, kind: SymbolKind) -> Symbol {
        Symbol {
            id,
            name: format!("s{id}"),
            kind,
            package_path: String::new(),
            file: "a.dart".to_string(),
            line: 1,
            column: 1,
            signature: String::new(),
            external: false,
            parent_id: 0,
            library_name: String::new(),
            is_private: false,
            is_static: false,
            is_abstract: false,
        }
    }

    #[test]
    fn records_keep_insertion_order_and_duplicates() {
        let mut program = Program::with_packages(vec![Package::new("app", "1.0.0")]);
        program.add_symbol(symbol(2, SymbolKind::Type));
        program.add_symbol(symbol(1, SymbolKind::Library));
        program.add_symbol(symbol(2, SymbolKind::Type));
        program.add_reference(Reference {
            from_id: 2,
            to_id: 1,
            file: "a.dart".to_string(),
            line: 1,
            column: 1,
            ref_type: RefType::Usage,
        });

        let ids: Vec<u32> = program.symbols().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1, 2]);
        assert_eq!(
            program.kind_counts(),
            vec![(SymbolKind::Library, 1), (SymbolKind::Type, 2)]
        );

        let tables = program.into_tables();
        assert_eq!(tables.symbols.len(), 3);
        assert_eq!(tables.references.len(), 1);
        assert_eq!(tables.packages, vec![Package::new("app", "1.0.0")]);
    }
}
