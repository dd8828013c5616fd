//! Overload-sensitive call resolution.

use exl_ast::{Expr, ExprKind};
use exl_resolver::{InvalidExpression, Resolver};
use exl_types::{SymbolId, TypeId, TypeTable};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Ambient `Guards` helper type whose methods form the enclosing scope, plus
/// a constructible `Point` type.
struct Fixture {
    table: TypeTable,
    scope: Vec<SymbolId>,
    point: TypeId,
    f_int: SymbolId,
    f_boolean: SymbolId,
    point_ctor: SymbolId,
}

fn fixture() -> Fixture {
    let mut table = TypeTable::new();
    let guards = table.declare_type("Guards");
    let point = table.declare_type("Point");

    let f_int = table.add_method(guards, "f", &[TypeId::INT], TypeId::INT);
    let f_boolean = table.add_method(guards, "f", &[TypeId::BOOLEAN], TypeId::INT);
    let g_int_int = table.add_method(guards, "g", &[TypeId::INT, TypeId::INT], TypeId::BOOLEAN);
    let g_int_boolean =
        table.add_method(guards, "g", &[TypeId::INT, TypeId::BOOLEAN], TypeId::BOOLEAN);
    let h = table.add_method(guards, "h", &[TypeId::INT, TypeId::INT], TypeId::BOOLEAN);
    let log = table.add_method(guards, "log", &[], TypeId::VOID);
    let draw = table.add_method(guards, "draw", &[point], TypeId::BOOLEAN);
    let point_ctor = table.add_constructor(point, &[TypeId::INT, TypeId::INT]);

    let scope = vec![
        f_int, f_boolean, g_int_int, g_int_boolean, h, log, draw, point_ctor,
        table.parameter("p", point),
    ];
    Fixture {
        table,
        scope,
        point,
        f_int,
        f_boolean,
        point_ctor,
    }
}

fn resolve(fixture: &Fixture, expr: &mut Expr) -> Result<(), InvalidExpression> {
    Resolver::new(&fixture.table, &fixture.scope).resolve(expr)
}

fn resolved_call_symbol(expr: &Expr) -> Option<SymbolId> {
    let ExprKind::Call(call) = &expr.kind else {
        panic!("expected call");
    };
    call.resolved_symbol()
}

#[test]
fn overload_selected_by_argument_type() {
    init_tracing();
    let f = fixture();

    let mut by_bool = Expr::call("f", vec![Expr::boolean(true)]);
    resolve(&f, &mut by_bool).unwrap();
    assert_eq!(resolved_call_symbol(&by_bool), Some(f.f_boolean));
    let ExprKind::Call(call) = &by_bool.kind else {
        panic!("expected call");
    };
    assert_eq!(
        call.arguments[0].resolved_target_type(),
        Some(TypeId::BOOLEAN)
    );

    let mut by_int = Expr::call("f", vec![Expr::int("7")]);
    resolve(&f, &mut by_int).unwrap();
    assert_eq!(resolved_call_symbol(&by_int), Some(f.f_int));
}

#[test]
fn first_full_match_wins_in_candidate_order() {
    let f = fixture();
    // g(7, 7) matches g(int, int) before g(int, boolean) is ever tried.
    let mut expr = Expr::call("g", vec![Expr::int("7"), Expr::int("7")]);
    resolve(&f, &mut expr).unwrap();
    let ExprKind::Call(call) = &expr.kind else {
        panic!("expected call");
    };
    assert_eq!(call.arguments[1].resolved_target_type(), Some(TypeId::INT));
}

#[test]
fn rejected_candidate_leaves_no_target_annotation() {
    let f = fixture();
    // g(int, int) passes argument 0 and rejects on argument 1; the winning
    // g(int, boolean) must own every target annotation.
    let mut expr = Expr::call("g", vec![Expr::int("7"), Expr::boolean(true)]);
    resolve(&f, &mut expr).unwrap();
    let ExprKind::Call(call) = &expr.kind else {
        panic!("expected call");
    };
    assert_eq!(call.arguments[0].resolved_target_type(), Some(TypeId::INT));
    assert_eq!(
        call.arguments[1].resolved_target_type(),
        Some(TypeId::BOOLEAN)
    );
}

#[test]
fn failed_resolution_leaves_no_target_annotation() {
    let f = fixture();
    // h(int, int) passes argument 0 and rejects on argument 1; no other
    // candidate exists, so the staged write must be discarded.
    let mut expr = Expr::call("h", vec![Expr::int("7"), Expr::boolean(true)]);
    resolve(&f, &mut expr).unwrap_err();
    let ExprKind::Call(call) = &expr.kind else {
        panic!("expected call");
    };
    assert_eq!(call.arguments[0].resolved_target_type(), None);
    assert_eq!(call.arguments[1].resolved_target_type(), None);
}

#[test]
fn undefined_method_error_names_the_call() {
    let f = fixture();
    let mut expr = Expr::call("nope", vec![]);
    let err = resolve(&f, &mut expr).unwrap_err();
    assert_eq!(
        err,
        InvalidExpression::UndefinedMethod {
            name: "nope".to_string()
        }
    );
}

#[test]
fn inapplicable_method_error_describes_candidate_and_arguments() {
    let f = fixture();
    let mut expr = Expr::call("h", vec![Expr::boolean(true)]);
    let err = resolve(&f, &mut expr).unwrap_err();
    assert_eq!(
        err,
        InvalidExpression::MethodNotApplicable {
            signature: "h(int, int)".to_string(),
            enclosing_type: "Guards".to_string(),
            argument_types: vec!["boolean".to_string()],
        }
    );
}

#[test]
fn arity_mismatch_is_inapplicable_not_undefined() {
    let f = fixture();
    let mut expr = Expr::call("log", vec![Expr::int("1")]);
    let err = resolve(&f, &mut expr).unwrap_err();
    assert!(matches!(
        err,
        InvalidExpression::MethodNotApplicable { .. }
    ));
}

#[test]
fn constructor_call_uses_the_new_keyword() {
    let f = fixture();
    let mut expr = Expr::call("new", vec![Expr::int("1"), Expr::int("2")]);
    resolve(&f, &mut expr).unwrap();
    assert_eq!(resolved_call_symbol(&expr), Some(f.point_ctor));
    // A constructor call resolves to its enclosing type.
    assert_eq!(expr.resolved_type(&f.table), Some(f.point));
}

#[test]
fn null_argument_binds_a_declared_parameter() {
    let f = fixture();
    let mut expr = Expr::call("draw", vec![Expr::variable("null")]);
    resolve(&f, &mut expr).unwrap();
    let ExprKind::Call(call) = &expr.kind else {
        panic!("expected call");
    };
    assert_eq!(call.arguments[0].resolved_target_type(), Some(f.point));
}

#[test]
fn void_method_call_resolves_to_void() {
    let f = fixture();
    let mut expr = Expr::call("log", vec![]);
    resolve(&f, &mut expr).unwrap();
    assert_eq!(expr.resolved_type(&f.table), Some(TypeId::VOID));
}

#[test]
fn receiver_call_searches_the_receiver_type_members() {
    let mut table = TypeTable::new();
    let base = table.declare_type("Base");
    table.add_method(base, "norm", &[], TypeId::INT);
    let sub = table.declare_subtype("Sub", base);
    let scope = vec![table.parameter("s", sub)];

    // Inherited members are part of the candidate set.
    let mut expr = Expr::method_call(Expr::variable("s"), "norm", vec![]);
    Resolver::new(&table, &scope).resolve(&mut expr).unwrap();
    assert_eq!(expr.resolved_type(&table), Some(TypeId::INT));
}

#[test]
fn receiver_constructor_is_addressable_as_member() {
    let f = fixture();
    let mut expr = Expr::method_call(
        Expr::variable("p"),
        "new",
        vec![Expr::int("0"), Expr::int("0")],
    );
    resolve(&f, &mut expr).unwrap();
    assert_eq!(resolved_call_symbol(&expr), Some(f.point_ctor));
    assert_eq!(expr.resolved_type(&f.table), Some(f.point));
}

#[test]
fn primitive_receiver_yields_no_candidates() {
    let f = fixture();
    let mut expr = Expr::method_call(Expr::int("3"), "f", vec![]);
    let err = resolve(&f, &mut expr).unwrap_err();
    assert_eq!(
        err,
        InvalidExpression::UndefinedMethod {
            name: "f".to_string()
        }
    );
}

#[test]
fn call_result_feeds_enclosing_expression() {
    let f = fixture();
    // f(7) < 10 - the call's resolved type participates in operator checks.
    let mut expr = Expr::binary(
        "<",
        Expr::call("f", vec![Expr::int("7")]),
        Expr::int("10"),
    );
    resolve(&f, &mut expr).unwrap();
    assert_eq!(expr.resolved_type(&f.table), Some(TypeId::BOOLEAN));
}
