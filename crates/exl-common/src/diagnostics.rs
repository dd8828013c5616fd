//! Resolution failure taxonomy.
//!
//! Every failure the resolver can produce is one variant of
//! [`InvalidExpression`]. Callers (and tests) branch on the variant, never on
//! the rendered text; `Display` produces the message the surrounding code
//! generator attaches to the originating source location as a compile-time
//! diagnostic.

use serde::Serialize;
use std::fmt;

/// A semantic error in a single expression tree.
///
/// Resolution aborts at the first failure; there is no recovery and no
/// partial-result contract beyond nodes annotated before the failing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InvalidExpression {
    /// Integer literal text that does not parse in its detected base.
    MalformedIntLiteral { literal: String },
    /// Binary operand types the host type model considers incompatible.
    IncompatibleOperands { left: String, right: String },
    /// Operator token outside the supported set.
    UndefinedOperator { operator: String },
    /// Recognized operator applied to operand types it does not support.
    /// One operand type for the unary `!`, two for binary operators.
    OperatorNotApplicable {
        operator: String,
        operand_types: Vec<String>,
    },
    /// Variable name with no match in the searched scope.
    UnresolvedVariable { name: String },
    /// Call target with no name match among the visible callables.
    UndefinedMethod { name: String },
    /// Call target that matched by name but not by arity or argument types.
    MethodNotApplicable {
        /// Readable signature of the last name-matched candidate.
        signature: String,
        /// Simple name of the candidate's enclosing type.
        enclosing_type: String,
        /// Actual argument type names, in positional order.
        argument_types: Vec<String>,
    },
}

impl fmt::Display for InvalidExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidExpression::MalformedIntLiteral { literal } => {
                write!(
                    f,
                    "Type mismatch: cannot convert from String '{literal}' to int"
                )
            }
            InvalidExpression::IncompatibleOperands { left, right } => {
                write!(f, "Incompatible operand types {left} and {right}.")
            }
            InvalidExpression::UndefinedOperator { operator } => {
                write!(f, "The operator {operator} is undefined.")
            }
            InvalidExpression::OperatorNotApplicable {
                operator,
                operand_types,
            } => {
                if operand_types.len() == 1 {
                    write!(
                        f,
                        "The operator {operator} is undefined for the argument type {}.",
                        operand_types[0]
                    )
                } else {
                    write!(
                        f,
                        "The operator {operator} is undefined for the argument type(s) {}.",
                        operand_types.join(" ")
                    )
                }
            }
            InvalidExpression::UnresolvedVariable { name } => {
                write!(f, "{name} cannot be resolved.")
            }
            InvalidExpression::UndefinedMethod { name } => {
                write!(f, "The method {name} is undefined for the enclosing scope.")
            }
            InvalidExpression::MethodNotApplicable {
                signature,
                enclosing_type,
                argument_types,
            } => {
                write!(
                    f,
                    "The method {signature} in the type {enclosing_type} is not applicable for the arguments {}.",
                    argument_types.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for InvalidExpression {}
