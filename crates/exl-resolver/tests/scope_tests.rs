//! Scope catalog assembly, nested-scope copies, and shared-table
//! concurrency.

use exl_ast::{Expr, ExprKind};
use exl_resolver::{InvalidExpression, Resolver, ScopeCatalog};
use exl_types::{Modifiers, SymbolId, TypeId, TypeTable};

fn bound_symbol(expr: &Expr) -> Option<SymbolId> {
    let ExprKind::Variable(variable) = &expr.kind else {
        panic!("expected variable");
    };
    variable.resolved_symbol()
}

#[test]
fn add_context_keeps_input_order_and_duplicates() {
    let mut table = TypeTable::new();
    let guards = table.declare_type("Guards");
    let a = table.parameter("x", TypeId::INT);
    let b = table.local("x", TypeId::BOOLEAN);
    let f = table.add_method(guards, "f", &[], TypeId::INT);

    let mut catalog = ScopeCatalog::new();
    catalog.add_context(&table, &[a, f, b], false);
    catalog.add_context(&table, &[a], false);

    assert_eq!(catalog.variables(), [a, b, a]);
    assert_eq!(catalog.callables(), [f]);
}

#[test]
fn restrict_to_public_filters_variables_but_not_callables() {
    let mut table = TypeTable::new();
    let point = table.declare_type("Point");
    let shown = table.add_field(point, "x", TypeId::INT, Modifiers::PUBLIC);
    let hidden = table.add_field(point, "cache", TypeId::INT, Modifiers::empty());
    let norm = table.add_method(point, "norm", &[], TypeId::INT);

    let mut catalog = ScopeCatalog::new();
    catalog.add_context(&table, &[shown, hidden, norm], true);

    assert_eq!(catalog.variables(), [shown]);
    assert_eq!(catalog.callables(), [norm]);
}

#[test]
fn copy_puts_the_new_context_first() {
    let mut table = TypeTable::new();
    let outer = table.parameter("x", TypeId::INT);
    let inner = table.local("x", TypeId::BOOLEAN);

    let catalog = ScopeCatalog::from_context(&table, &[outer]);
    let copied = catalog.copy(&table, &[inner]);

    assert_eq!(copied.variables(), [inner, outer]);
    // The source catalog is untouched.
    assert_eq!(catalog.variables(), [outer]);
}

#[test]
fn inner_scope_shadows_outer_scope() {
    let mut table = TypeTable::new();
    let outer = table.parameter("x", TypeId::INT);
    let inner = table.local("x", TypeId::BOOLEAN);

    let resolver = Resolver::new(&table, &[outer]);
    let nested = resolver.copy(&[inner]);

    let mut inner_ref = Expr::variable("x");
    nested.resolve(&mut inner_ref).unwrap();
    assert_eq!(bound_symbol(&inner_ref), Some(inner));
    assert_eq!(inner_ref.resolved_type(&table), Some(TypeId::BOOLEAN));

    // The original resolver still binds the outer symbol.
    let mut outer_ref = Expr::variable("x");
    resolver.resolve(&mut outer_ref).unwrap();
    assert_eq!(bound_symbol(&outer_ref), Some(outer));
}

#[test]
fn copied_resolver_inherits_callables() {
    let mut table = TypeTable::new();
    let guards = table.declare_type("Guards");
    let f = table.add_method(guards, "f", &[], TypeId::BOOLEAN);
    let extra = table.local("x", TypeId::INT);

    let resolver = Resolver::new(&table, &[f]);
    let nested = resolver.copy(&[extra]);

    let mut expr = Expr::call("f", vec![]);
    nested.resolve(&mut expr).unwrap();
    assert_eq!(expr.resolved_type(&table), Some(TypeId::BOOLEAN));
}

#[test]
fn first_match_wins_among_duplicate_names() {
    let mut table = TypeTable::new();
    let first = table.parameter("x", TypeId::INT);
    let second = table.local("x", TypeId::BOOLEAN);

    let resolver = Resolver::new(&table, &[first, second]);
    let mut expr = Expr::variable("x");
    resolver.resolve(&mut expr).unwrap();
    assert_eq!(bound_symbol(&expr), Some(first));
}

#[test]
fn unresolved_in_copied_scope_still_fails() {
    let mut table = TypeTable::new();
    let outer = table.parameter("x", TypeId::INT);
    let resolver = Resolver::new(&table, &[outer]).copy(&[]);

    let mut expr = Expr::variable("y");
    let err = resolver.resolve(&mut expr).unwrap_err();
    assert_eq!(
        err,
        InvalidExpression::UnresolvedVariable {
            name: "y".to_string()
        }
    );
}

#[test]
fn independent_roots_resolve_concurrently_over_one_table() {
    use rayon::prelude::*;

    let mut table = TypeTable::new();
    let guards = table.declare_type("Guards");
    let f = table.add_method(guards, "f", &[TypeId::INT], TypeId::BOOLEAN);
    let limit = table.parameter("limit", TypeId::INT);
    let scope = vec![f, limit];

    let results: Vec<_> = (0..32)
        .into_par_iter()
        .map(|i| {
            let resolver = Resolver::new(&table, &scope);
            let mut expr = Expr::binary(
                "||",
                Expr::call("f", vec![Expr::int(format!("{i}"))]),
                Expr::negate(Expr::call("f", vec![Expr::variable("limit")])),
            );
            resolver.resolve(&mut expr).map(|()| {
                let ExprKind::Binary(binary) = &expr.kind else {
                    panic!("expected binary");
                };
                binary.resolved_type()
            })
        })
        .collect();

    for result in results {
        assert_eq!(result, Ok(Some(TypeId::BOOLEAN)));
    }
}
