//! Host symbols visible to the resolver.
//!
//! Symbols are owned by the type table; the scope catalog and the resolver
//! hold `SymbolId` handles only, so a symbol can never diverge from what the
//! host declared.

use crate::db::TypeDatabase;
use crate::types::TypeId;
use bitflags::bitflags;
use serde::Serialize;

/// Reserved call-site name for constructors, distinct from any ordinary
/// identifier.
pub const CONSTRUCTOR_KEYWORD: &str = "new";

/// Opaque identity of a symbol owned by the type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    /// Synthetic null-typed symbol the literal name `null` always binds to.
    pub const NULL: SymbolId = SymbolId(0);
    /// Synthetic `length` member of array types.
    pub const ARRAY_LENGTH: SymbolId = SymbolId(1);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Declaration modifiers carried by host symbols.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const PUBLIC = 1 << 0;
        const STATIC = 1 << 1;
        const FINAL = 1 << 2;
    }
}

/// Kind of a variable-like symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Field,
    Parameter,
    Local,
    EnumConstant,
}

/// Kind of a callable symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    Method,
    Constructor,
}

/// A field, parameter, local variable, or enum constant.
#[derive(Debug, Clone)]
pub struct VariableSymbol {
    pub name: String,
    pub kind: VariableKind,
    pub type_id: TypeId,
    pub modifiers: Modifiers,
}

/// A method or constructor.
#[derive(Debug, Clone)]
pub struct CallableSymbol {
    pub name: String,
    pub kind: CallableKind,
    /// Declared return type; `TypeId::VOID` for void methods. A constructor's
    /// invocation type is its enclosing type, not this field.
    pub return_type: TypeId,
    /// Parameter types in declaration order.
    pub params: Vec<TypeId>,
    pub enclosing_type: TypeId,
    pub modifiers: Modifiers,
}

impl CallableSymbol {
    /// Name a call expression uses to address this callable. Constructors
    /// are addressed by the reserved `new` keyword.
    pub fn call_name(&self) -> &str {
        match self.kind {
            CallableKind::Constructor => CONSTRUCTOR_KEYWORD,
            CallableKind::Method => &self.name,
        }
    }

    /// Type a call bound to this symbol resolves to.
    pub fn invocation_type(&self) -> TypeId {
        match self.kind {
            CallableKind::Constructor => self.enclosing_type,
            CallableKind::Method => self.return_type,
        }
    }

    /// Human-readable signature used in diagnostics, e.g. `f(int, boolean)`.
    pub fn readable_signature(&self, db: &dyn TypeDatabase) -> String {
        let params: Vec<String> = self.params.iter().map(|&p| db.type_name(p)).collect();
        format!("{}({})", self.call_name(), params.join(", "))
    }
}

/// Any host symbol a lookup context can contain.
#[derive(Debug, Clone)]
pub enum Symbol {
    Variable(VariableSymbol),
    Callable(CallableSymbol),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Variable(variable) => &variable.name,
            Symbol::Callable(callable) => &callable.name,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Symbol::Variable(variable) => variable.modifiers,
            Symbol::Callable(callable) => callable.modifiers,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableSymbol> {
        match self {
            Symbol::Variable(variable) => Some(variable),
            Symbol::Callable(_) => None,
        }
    }

    pub fn as_callable(&self) -> Option<&CallableSymbol> {
        match self {
            Symbol::Callable(callable) => Some(callable),
            Symbol::Variable(_) => None,
        }
    }
}
