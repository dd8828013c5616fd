//! Ordered symbol scope assembled from host lookup contexts.

use exl_types::{Modifiers, Symbol, SymbolId, TypeDatabase};

/// Append the variable-like symbols of `elements` to `out` in input order,
/// keeping only public ones when `public_only` is set.
pub(crate) fn variables_in(
    db: &dyn TypeDatabase,
    elements: &[SymbolId],
    public_only: bool,
    out: &mut Vec<SymbolId>,
) {
    for &id in elements {
        if let Symbol::Variable(variable) = db.symbol(id)
            && (!public_only || variable.modifiers.contains(Modifiers::PUBLIC))
        {
            out.push(id);
        }
    }
}

/// Append the callable symbols of `elements` to `out` in input order.
pub(crate) fn callables_in(db: &dyn TypeDatabase, elements: &[SymbolId], out: &mut Vec<SymbolId>) {
    for &id in elements {
        if matches!(db.symbol(id), Symbol::Callable(_)) {
            out.push(id);
        }
    }
}

/// Visible variables and callables gathered from one or more lookup
/// contexts.
///
/// Order is precedence: lookups take the first name match, so entries added
/// earlier shadow later ones. Duplicates are kept; nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct ScopeCatalog {
    variables: Vec<SymbolId>,
    callables: Vec<SymbolId>,
}

impl ScopeCatalog {
    pub fn new() -> Self {
        ScopeCatalog::default()
    }

    /// Catalog seeded from a single lookup context.
    pub fn from_context(db: &dyn TypeDatabase, elements: &[SymbolId]) -> Self {
        let mut catalog = ScopeCatalog::new();
        catalog.add_context(db, elements, false);
        catalog
    }

    /// Scan one lookup context, appending its variables and callables in
    /// input order.
    pub fn add_context(
        &mut self,
        db: &dyn TypeDatabase,
        elements: &[SymbolId],
        restrict_to_public: bool,
    ) {
        variables_in(db, elements, restrict_to_public, &mut self.variables);
        callables_in(db, elements, &mut self.callables);
    }

    /// Fresh catalog holding `new_elements` first, then everything already
    /// visible here. Models lexical nesting: inner symbols are tried before
    /// outer ones of the same name. The source catalog is not mutated.
    pub fn copy(&self, db: &dyn TypeDatabase, new_elements: &[SymbolId]) -> ScopeCatalog {
        let mut catalog = ScopeCatalog::from_context(db, new_elements);
        catalog.variables.extend_from_slice(&self.variables);
        catalog.callables.extend_from_slice(&self.callables);
        catalog
    }

    pub fn variables(&self) -> &[SymbolId] {
        &self.variables
    }

    pub fn callables(&self) -> &[SymbolId] {
        &self.callables
    }
}
