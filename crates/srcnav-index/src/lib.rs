//! srcnav-index: Symbol and reference extraction over resolved compilation units.
//!
//! Walks the declaration trees produced by a language front end and emits the
//! two linked tables a code-navigation database loads: symbols and the typed
//! references between them.
//!
//! # Architecture
//!
//! - **unit**: Resolved-unit input model (declarations, types, body syntax)
//! - **registry**: Declaration identity → stable integer ID
//! - **classifier**: Internal/external judgement and package attribution
//! - **signature**: Display signatures per declaration kind
//! - **visitor**: Single pre-order walk emitting symbols and references
//! - **program**: Append-only output tables
//! - **context**: Per-run owner of registry, classifier and program
//! - **manifest**: Package list from `pubspec.yaml`, `Cargo.toml` or `package.json`
//! - **indexer**: Input discovery and the sequential, skip-and-continue pipeline

pub mod classifier;
pub mod context;
pub mod indexer;
pub mod manifest;
pub mod program;
pub mod registry;
pub mod signature;
pub mod unit;
pub mod visitor;

pub use classifier::Classifier;
pub use context::ExtractionContext;
pub use indexer::{IndexResult, Indexer};
pub use program::Program;
pub use registry::{DeclKey, IdentityRegistry};
pub use unit::{Declaration, DeclShape, ElementRef, LibraryRef, ResolvedUnit, Syntax, TypeRef};
pub use visitor::{ExtractionVisitor, VisitStats};
