//! Main indexing pipeline orchestrator.
//!
//! Collects resolved-unit documents, resolves them one after another and
//! feeds each into a single [`ExtractionContext`]. A file that fails to
//! resolve is skipped; the run only fails when nothing could be read.

use crate::context::ExtractionContext;
use crate::unit::ResolvedUnit;
use crate::visitor::VisitStats;
use ignore::WalkBuilder;
use srcnav_core::{Package, ProgramTables, SrcnavConfig, SrcnavError, SymbolKind};
use std::path::{Path, PathBuf};

/// Result of one indexing run.
#[derive(Debug)]
pub struct IndexResult {
    /// Number of input files handed to the run.
    pub files_scanned: usize,
    /// Files that resolved and were extracted.
    pub files_indexed: usize,
    /// Files skipped because they could not be resolved.
    pub files_failed: usize,
    /// Extraction counters across all indexed files.
    pub stats: VisitStats,
    /// Emitted symbols per kind, in kind order; zero counts left out.
    pub kind_counts: Vec<(SymbolKind, usize)>,
    /// The output tables.
    pub tables: ProgramTables,
}

/// The main indexing pipeline.
pub struct Indexer {
    config: SrcnavConfig,
}

impl Indexer {
    pub fn new(config: SrcnavConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SrcnavConfig {
        &self.config
    }

    /// Find resolved-unit documents under `root`, in a fixed order.
    ///
    /// Walks the directory respecting `.gitignore` rules (via the `ignore`
    /// crate) and keeps files ending with the configured unit suffix.
    pub fn collect_inputs(&self, root: &Path) -> Vec<PathBuf> {
        let suffix = self.config.index.unit_suffix.as_str();
        let walker = WalkBuilder::new(root)
            .hidden(true) // skip hidden files/dirs
            .git_ignore(true) // respect .gitignore
            .git_global(true) // respect global gitignore
            .git_exclude(true) // respect .git/info/exclude
            .build();

        let mut inputs = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!("Walk error: {}", err);
                    continue;
                }
            };

            // Skip directories
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(suffix));
            if matches {
                inputs.push(entry.into_path());
            }
        }

        inputs.sort();
        inputs
    }

    /// Index the given unit documents in order.
    ///
    /// Returns [`SrcnavError::NoInput`] when `inputs` is empty or none of
    /// them resolves; otherwise the tables hold whatever could be extracted.
    pub fn index_files(
        &self,
        inputs: &[PathBuf],
        packages: Vec<Package>,
    ) -> Result<IndexResult, SrcnavError> {
        if inputs.is_empty() {
            return Err(SrcnavError::NoInput("no input files".to_string()));
        }

        let mut ctx = ExtractionContext::new(packages, &self.config.classifier);
        let mut files_indexed = 0usize;
        let mut files_failed = 0usize;

        for path in inputs {
            // The next file is only resolved once the previous one is fully extracted.
            let unit = match ResolvedUnit::load(path) {
                Ok(unit) => unit,
                Err(err) => {
                    tracing::warn!("Skipping {}", err);
                    files_failed += 1;
                    continue;
                }
            };

            let stats = ctx.extract(&unit);
            files_indexed += 1;
            tracing::debug!(
                "Extracted {}: {} symbols, {} references",
                unit.path,
                stats.symbols,
                stats.references
            );
        }

        if files_indexed == 0 {
            return Err(SrcnavError::NoInput(format!(
                "none of {} input files could be resolved",
                inputs.len()
            )));
        }

        let stats = ctx.stats();
        tracing::info!(
            "Indexed {} files ({} failed): {} symbols, {} references, {} identities",
            files_indexed,
            files_failed,
            stats.symbols,
            stats.references,
            ctx.registry().len(),
        );

        Ok(IndexResult {
            files_scanned: inputs.len(),
            files_indexed,
            files_failed,
            stats,
            kind_counts: ctx.program().kind_counts(),
            tables: ctx.finish(),
        })
    }

    /// Index units that are already resolved in memory.
    pub fn index_units<'u>(
        &self,
        units: impl IntoIterator<Item = &'u ResolvedUnit>,
        packages: Vec<Package>,
    ) -> IndexResult {
        let mut ctx = ExtractionContext::new(packages, &self.config.classifier);
        let mut files_indexed = 0usize;
        for unit in units {
            ctx.extract(unit);
            files_indexed += 1;
        }
        IndexResult {
            files_scanned: files_indexed,
            files_indexed,
            files_failed: 0,
            stats: ctx.stats(),
            kind_counts: ctx.program().kind_counts(),
            tables: ctx.finish(),
        }
    }
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new(SrcnavConfig::default())
    }
}
