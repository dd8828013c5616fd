//! The query seam between the resolver and the host type model.

use crate::symbols::{Symbol, SymbolId};
use crate::types::{PrimitiveKind, TypeId, TypeKind};

/// Queries the resolver needs from the host's type model.
///
/// Implementations must be pure: repeated queries over the same handles
/// return the same answers and no query mutates observable state, so a
/// single database can serve any number of resolution passes. The in-memory
/// [`TypeTable`](crate::TypeTable) satisfies this by construction; an
/// adapter over a lazily-materializing host environment must make
/// [`reload_type`](TypeDatabase::reload_type) force a declared type before
/// member enumeration.
pub trait TypeDatabase {
    /// Handle of a primitive type.
    fn primitive_type(&self, kind: PrimitiveKind) -> TypeId;

    /// Handle of the null type.
    fn null_type(&self) -> TypeId;

    /// Handle of the void type.
    fn void_type(&self) -> TypeId;

    /// Classification of a handle.
    fn kind_of(&self, type_id: TypeId) -> TypeKind;

    /// Type identity.
    fn types_equal(&self, a: TypeId, b: TypeId) -> bool;

    /// Host compatibility relation for binary operands; broader than
    /// equality (equal types, integral primitives among themselves, or
    /// assignability in either direction).
    fn are_compatible(&self, a: TypeId, b: TypeId) -> bool;

    fn is_primitive(&self, type_id: TypeId) -> bool;

    /// Whether a value of `source` type can bind a slot of `target` type.
    fn is_assignable(&self, source: TypeId, target: TypeId) -> bool;

    /// Ensure a declared type is fully loaded, returning the handle to use
    /// for member enumeration.
    fn reload_type(&self, type_id: TypeId) -> TypeId;

    /// All member symbols of a declared type: own members first, then the
    /// supertype chain in order. Non-declared handles have no members.
    fn members_of(&self, declared: TypeId) -> Vec<SymbolId>;

    /// Simple name used in diagnostics.
    fn type_name(&self, type_id: TypeId) -> String;

    fn symbol(&self, id: SymbolId) -> &Symbol;
}
