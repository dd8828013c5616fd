//! Expression AST for the exl expression language.
//!
//! The node set is closed and fixed, so the tree is a tagged union resolved
//! by exhaustive match rather than open polymorphic dispatch. Nodes own
//! their children outright (no sharing, no cycles) and carry annotation
//! slots the resolver fills exactly once per pass.

pub mod expr;
pub use expr::{Binary, BooleanLiteral, Call, Expr, ExprKind, IntLiteral, Negate, Variable};

#[cfg(test)]
#[path = "tests/expr_tests.rs"]
mod expr_tests;
