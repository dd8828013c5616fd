//! Type model for the exl expression resolver.
//!
//! This crate provides the resolver's view of the host type system:
//! - `TypeId` / `SymbolId` - interned handles with pre-registered intrinsics
//! - `Symbol` - variable-like and callable host symbols
//! - `TypeDatabase` - the query seam between the resolver and the host
//! - `TypeTable` - a purpose-built in-memory implementation
//!
//! Key invariant: handles are interned, so type identity is O(1) handle
//! comparison. Registration is `&mut`; every query is `&self` and pure,
//! which makes a table shareable across independent resolution passes.

// Interned type handles and classification
pub mod types;
pub use types::{PrimitiveKind, TypeId, TypeKind};

// Host symbols (fields, parameters, locals, enum constants, callables)
pub mod symbols;
pub use symbols::{
    CONSTRUCTOR_KEYWORD, CallableKind, CallableSymbol, Modifiers, Symbol, SymbolId, VariableKind,
    VariableSymbol,
};

// The query seam consumed by the resolver
pub mod db;
pub use db::TypeDatabase;

// In-memory type table
pub mod table;
pub use table::TypeTable;

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod table_tests;
