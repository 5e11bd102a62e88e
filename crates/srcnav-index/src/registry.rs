//! Identity registry: declaration keys to stable integer IDs.
//!
//! IDs are allocated lazily from a counter starting at 1, so a reference
//! recorded in one file and the declaration visited in another file agree on
//! the same ID regardless of which is seen first.

use srcnav_core::{SymbolId, SymbolKind};
use std::collections::HashMap;

/// Best-available identity proxy for a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclKey {
    /// Opaque handle supplied by the front end.
    Handle(u64),
    /// A library, keyed by its canonical URI.
    Library(String),
    /// Owning library URI + source offset + name.
    Location {
        library: String,
        offset: u32,
        name: String,
    },
    /// A declaration with neither handle nor owning library, scoped by the
    /// declaration it was visited under.
    Synthetic {
        parent: SymbolId,
        kind: SymbolKind,
        name: String,
    },
}

/// Append-only map from [`DeclKey`] to [`SymbolId`].
///
/// Keys are kept in an arena indexed by `id - 1`, which makes the reverse
/// lookup a plain index.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    ids: HashMap<DeclKey, SymbolId>,
    arena: Vec<DeclKey>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ID for `key`, allocating the next one on first sight.
    pub fn id_for(&mut self, key: &DeclKey) -> SymbolId {
        if let Some(&id) = self.ids.get(key) {
            return id;
        }
        self.arena.push(key.clone());
        let id = self.arena.len() as SymbolId;
        self.ids.insert(key.clone(), id);
        id
    }

    /// Look up an already allocated ID without allocating.
    pub fn get(&self, key: &DeclKey) -> Option<SymbolId> {
        self.ids.get(key).copied()
    }

    /// The key an ID was allocated for.
    pub fn key_of(&self, id: SymbolId) -> Option<&DeclKey> {
        let index = (id as usize).checked_sub(1)?;
        self.arena.get(index)
    }

    /// Number of identities allocated so far.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}
