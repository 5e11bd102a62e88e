//! srcnav-core: Shared record types, configuration and errors for srcnav.
//!
//! The three output tables (symbols, references, packages) live here so that
//! both the extraction engine and any downstream sink agree on one wire shape.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ClassifierConfig, IndexConfig, OutputConfig, SrcnavConfig};
pub use error::*;
pub use types::*;
