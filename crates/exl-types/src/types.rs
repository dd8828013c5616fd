//! Interned type handles.

use crate::symbols::SymbolId;
use serde::Serialize;

/// Kind of a primitive type in the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Int,
}

/// Opaque identity of an interned type.
///
/// Two handles from the same table compare equal iff they denote the same
/// type. The intrinsic types are pre-registered at fixed slots so their
/// handles are constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub const BOOLEAN: TypeId = TypeId(0);
    pub const INT: TypeId = TypeId(1);
    pub const NULL: TypeId = TypeId(2);
    pub const VOID: TypeId = TypeId(3);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Classification of a type handle.
///
/// Drives receiver dispatch in member lookup and the operand-kind checks of
/// the identity and comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    Declared,
    Array,
    Null,
    Void,
}

/// Interned payload backing a `TypeId`.
#[derive(Debug, Clone)]
pub(crate) enum TypeData {
    Primitive(PrimitiveKind),
    Null,
    Void,
    Declared(DeclaredType),
    Array { element: TypeId },
}

/// A named class-like type: optional supertype, members in declaration order.
#[derive(Debug, Clone)]
pub(crate) struct DeclaredType {
    pub(crate) name: String,
    pub(crate) supertype: Option<TypeId>,
    pub(crate) members: Vec<SymbolId>,
}
