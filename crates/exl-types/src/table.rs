//! Purpose-built in-memory type table.
//!
//! The table owns every type and symbol the host declares for a resolution
//! session. Declared types and arrays are interned on registration, so
//! handle equality is type identity. Intrinsic types and the two synthetic
//! symbols (`null`, array `length`) are pre-registered at fixed slots.

use crate::db::TypeDatabase;
use crate::symbols::{
    CallableKind, CallableSymbol, Modifiers, Symbol, SymbolId, VariableKind, VariableSymbol,
};
use crate::types::{DeclaredType, PrimitiveKind, TypeData, TypeId, TypeKind};
use rustc_hash::FxHashMap;

pub struct TypeTable {
    types: Vec<TypeData>,
    symbols: Vec<Symbol>,
    declared_by_name: FxHashMap<String, TypeId>,
    arrays_by_element: FxHashMap<TypeId, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        // Slot order must match the TypeId / SymbolId constants.
        let types = vec![
            TypeData::Primitive(PrimitiveKind::Boolean),
            TypeData::Primitive(PrimitiveKind::Int),
            TypeData::Null,
            TypeData::Void,
        ];
        let symbols = vec![
            Symbol::Variable(VariableSymbol {
                name: "null".to_string(),
                kind: VariableKind::Local,
                type_id: TypeId::NULL,
                modifiers: Modifiers::PUBLIC,
            }),
            Symbol::Variable(VariableSymbol {
                name: "length".to_string(),
                kind: VariableKind::Field,
                type_id: TypeId::INT,
                modifiers: Modifiers::PUBLIC | Modifiers::FINAL,
            }),
        ];
        TypeTable {
            types,
            symbols,
            declared_by_name: FxHashMap::default(),
            arrays_by_element: FxHashMap::default(),
        }
    }

    // =========================================================================
    // Registration (build phase, `&mut`)
    // =========================================================================

    /// Register a declared type without a supertype. Re-declaring a name
    /// returns the existing handle.
    pub fn declare_type(&mut self, name: &str) -> TypeId {
        self.declare(name, None)
    }

    /// Register a declared type extending `supertype`.
    pub fn declare_subtype(&mut self, name: &str, supertype: TypeId) -> TypeId {
        self.declare(name, Some(supertype))
    }

    fn declare(&mut self, name: &str, supertype: Option<TypeId>) -> TypeId {
        if let Some(&existing) = self.declared_by_name.get(name) {
            return existing;
        }
        let id = self.push_type(TypeData::Declared(DeclaredType {
            name: name.to_string(),
            supertype,
            members: Vec::new(),
        }));
        self.declared_by_name.insert(name.to_string(), id);
        id
    }

    /// Interned array type over `element`.
    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        if let Some(&existing) = self.arrays_by_element.get(&element) {
            return existing;
        }
        let id = self.push_type(TypeData::Array { element });
        self.arrays_by_element.insert(element, id);
        id
    }

    /// Register a field member on a declared type.
    pub fn add_field(
        &mut self,
        owner: TypeId,
        name: &str,
        type_id: TypeId,
        modifiers: Modifiers,
    ) -> SymbolId {
        self.push_member(
            owner,
            Symbol::Variable(VariableSymbol {
                name: name.to_string(),
                kind: VariableKind::Field,
                type_id,
                modifiers,
            }),
        )
    }

    /// Register a method member on a declared type. Use `TypeId::VOID` as
    /// the return type for void methods.
    pub fn add_method(
        &mut self,
        owner: TypeId,
        name: &str,
        params: &[TypeId],
        return_type: TypeId,
    ) -> SymbolId {
        self.push_member(
            owner,
            Symbol::Callable(CallableSymbol {
                name: name.to_string(),
                kind: CallableKind::Method,
                return_type,
                params: params.to_vec(),
                enclosing_type: owner,
                modifiers: Modifiers::PUBLIC,
            }),
        )
    }

    /// Register a constructor member on a declared type.
    pub fn add_constructor(&mut self, owner: TypeId, params: &[TypeId]) -> SymbolId {
        let name = self.type_name(owner);
        self.push_member(
            owner,
            Symbol::Callable(CallableSymbol {
                name,
                kind: CallableKind::Constructor,
                return_type: TypeId::VOID,
                params: params.to_vec(),
                enclosing_type: owner,
                modifiers: Modifiers::PUBLIC,
            }),
        )
    }

    /// Register a free-standing parameter symbol for a lookup context.
    pub fn parameter(&mut self, name: &str, type_id: TypeId) -> SymbolId {
        self.push_symbol(Symbol::Variable(VariableSymbol {
            name: name.to_string(),
            kind: VariableKind::Parameter,
            type_id,
            modifiers: Modifiers::PUBLIC,
        }))
    }

    /// Register a free-standing local-variable symbol for a lookup context.
    pub fn local(&mut self, name: &str, type_id: TypeId) -> SymbolId {
        self.push_symbol(Symbol::Variable(VariableSymbol {
            name: name.to_string(),
            kind: VariableKind::Local,
            type_id,
            modifiers: Modifiers::PUBLIC,
        }))
    }

    /// Register an enum constant member; its declared type is the enum type.
    pub fn enum_constant(&mut self, owner: TypeId, name: &str) -> SymbolId {
        self.push_member(
            owner,
            Symbol::Variable(VariableSymbol {
                name: name.to_string(),
                kind: VariableKind::EnumConstant,
                type_id: owner,
                modifiers: Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL,
            }),
        )
    }

    /// Handle of a previously declared type.
    pub fn lookup_declared(&self, name: &str) -> Option<TypeId> {
        self.declared_by_name.get(name).copied()
    }

    fn push_type(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(data);
        id
    }

    fn push_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    fn push_member(&mut self, owner: TypeId, symbol: Symbol) -> SymbolId {
        let id = self.push_symbol(symbol);
        if let TypeData::Declared(declared) = &mut self.types[owner.index()] {
            declared.members.push(id);
        } else {
            debug_assert!(false, "member registered on a non-declared type");
        }
        id
    }

    // =========================================================================
    // Queries (`&self`, pure)
    // =========================================================================

    fn data(&self, type_id: TypeId) -> &TypeData {
        &self.types[type_id.index()]
    }

    fn is_integral(&self, type_id: TypeId) -> bool {
        matches!(self.data(type_id), TypeData::Primitive(PrimitiveKind::Int))
    }

    /// Whether `target` appears in the supertype chain of declared type `t`.
    fn has_supertype(&self, t: TypeId, target: TypeId) -> bool {
        let mut current = t;
        loop {
            let TypeData::Declared(declared) = self.data(current) else {
                return false;
            };
            match declared.supertype {
                Some(supertype) if supertype == target => return true,
                Some(supertype) => current = supertype,
                None => return false,
            }
        }
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        TypeTable::new()
    }
}

impl TypeDatabase for TypeTable {
    fn primitive_type(&self, kind: PrimitiveKind) -> TypeId {
        match kind {
            PrimitiveKind::Boolean => TypeId::BOOLEAN,
            PrimitiveKind::Int => TypeId::INT,
        }
    }

    fn null_type(&self) -> TypeId {
        TypeId::NULL
    }

    fn void_type(&self) -> TypeId {
        TypeId::VOID
    }

    fn kind_of(&self, type_id: TypeId) -> TypeKind {
        match self.data(type_id) {
            TypeData::Primitive(kind) => TypeKind::Primitive(*kind),
            TypeData::Null => TypeKind::Null,
            TypeData::Void => TypeKind::Void,
            TypeData::Declared(_) => TypeKind::Declared,
            TypeData::Array { .. } => TypeKind::Array,
        }
    }

    fn types_equal(&self, a: TypeId, b: TypeId) -> bool {
        // Interning makes identity a handle comparison.
        a == b
    }

    fn are_compatible(&self, a: TypeId, b: TypeId) -> bool {
        if self.types_equal(a, b) {
            return true;
        }
        if self.is_integral(a) && self.is_integral(b) {
            return true;
        }
        self.is_assignable(a, b) || self.is_assignable(b, a)
    }

    fn is_primitive(&self, type_id: TypeId) -> bool {
        matches!(self.data(type_id), TypeData::Primitive(_))
    }

    fn is_assignable(&self, source: TypeId, target: TypeId) -> bool {
        if source == target {
            return true;
        }
        match (self.data(source), self.data(target)) {
            (TypeData::Null, TypeData::Declared(_) | TypeData::Array { .. }) => true,
            (TypeData::Declared(_), TypeData::Declared(_)) => self.has_supertype(source, target),
            _ => false,
        }
    }

    fn reload_type(&self, type_id: TypeId) -> TypeId {
        // The in-memory table is always fully loaded.
        type_id
    }

    fn members_of(&self, declared: TypeId) -> Vec<SymbolId> {
        let mut members = Vec::new();
        let mut current = declared;
        while let TypeData::Declared(data) = self.data(current) {
            members.extend_from_slice(&data.members);
            match data.supertype {
                Some(supertype) => current = supertype,
                None => break,
            }
        }
        members
    }

    fn type_name(&self, type_id: TypeId) -> String {
        match self.data(type_id) {
            TypeData::Primitive(PrimitiveKind::Boolean) => "boolean".to_string(),
            TypeData::Primitive(PrimitiveKind::Int) => "int".to_string(),
            TypeData::Null => "null".to_string(),
            TypeData::Void => "void".to_string(),
            TypeData::Declared(declared) => declared.name.clone(),
            TypeData::Array { element } => format!("{}[]", self.type_name(*element)),
        }
    }

    fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }
}
