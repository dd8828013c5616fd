//! Single-pass expression resolution.
//!
//! One visit per node kind, children first. Each visit annotates its node
//! and hands the node's type up to the parent; the first failure aborts the
//! whole pass as an [`InvalidExpression`].

use crate::catalog::{self, ScopeCatalog};
use exl_ast::{Binary, BooleanLiteral, Call, Expr, ExprKind, IntLiteral, Variable};
use exl_common::InvalidExpression;
use exl_types::{CallableSymbol, PrimitiveKind, Symbol, SymbolId, TypeDatabase, TypeId, TypeKind};

/// Operators requiring a boolean left operand.
const LOGIC_OPERATORS: &[&str] = &["||"];
/// Operators requiring a primitive left operand.
pub const COMPARABLE_OPERATORS: &[&str] = &["<", "<=", ">", ">="];
/// Operators requiring a primitive, declared, or array left operand.
pub const IDENTITY_OPERATORS: &[&str] = &["==", "!="];

/// Resolves one expression tree against a scope catalog.
///
/// The resolver never mutates its own state while visiting, so one instance
/// can resolve any number of trees; `copy` derives a nested-scope resolver
/// without touching the original.
pub struct Resolver<'db> {
    db: &'db dyn TypeDatabase,
    catalog: ScopeCatalog,
}

impl<'db> Resolver<'db> {
    /// Resolver over the catalog built from one lookup context.
    pub fn new(db: &'db dyn TypeDatabase, lookup_elements: &[SymbolId]) -> Self {
        Resolver {
            db,
            catalog: ScopeCatalog::from_context(db, lookup_elements),
        }
    }

    /// Resolver over an explicitly assembled catalog.
    pub fn with_catalog(db: &'db dyn TypeDatabase, catalog: ScopeCatalog) -> Self {
        Resolver { db, catalog }
    }

    /// Independent resolver whose scope tries `prefix_elements` first and
    /// falls back to this resolver's scope.
    pub fn copy(&self, prefix_elements: &[SymbolId]) -> Resolver<'db> {
        Resolver {
            db: self.db,
            catalog: self.catalog.copy(self.db, prefix_elements),
        }
    }

    pub fn catalog(&self) -> &ScopeCatalog {
        &self.catalog
    }

    /// Resolve a whole tree bottom-up, annotating every node in place.
    ///
    /// Nodes visited before a failure keep their annotations; re-resolving
    /// the same tree is unsupported.
    pub fn resolve(&self, root: &mut Expr) -> Result<(), InvalidExpression> {
        self.visit(root)?;
        Ok(())
    }

    fn visit(&self, expr: &mut Expr) -> Result<TypeId, InvalidExpression> {
        match &mut expr.kind {
            ExprKind::BooleanLiteral(literal) => Ok(self.visit_boolean_literal(literal)),
            ExprKind::IntLiteral(literal) => self.visit_int_literal(literal),
            ExprKind::Negate(negate) => {
                let operand_type = self.visit(&mut negate.operand)?;
                self.visit_negate(operand_type)
            }
            ExprKind::Binary(binary) => {
                let left = self.visit(&mut binary.left)?;
                let right = self.visit(&mut binary.right)?;
                self.visit_binary(binary, left, right)
            }
            ExprKind::Variable(variable) => {
                let receiver_type = match &mut variable.receiver {
                    Some(receiver) => Some(self.visit(receiver)?),
                    None => None,
                };
                self.visit_variable(variable, receiver_type)
            }
            ExprKind::Call(call) => {
                let receiver_type = match &mut call.receiver {
                    Some(receiver) => Some(self.visit(receiver)?),
                    None => None,
                };
                let mut argument_types = Vec::with_capacity(call.arguments.len());
                for argument in &mut call.arguments {
                    argument_types.push(self.visit(argument)?);
                }
                self.visit_call(call, receiver_type, &argument_types)
            }
        }
    }

    fn visit_boolean_literal(&self, literal: &mut BooleanLiteral) -> TypeId {
        let boolean = self.db.primitive_type(PrimitiveKind::Boolean);
        literal.set_resolved_type(boolean);
        boolean
    }

    fn visit_int_literal(&self, literal: &mut IntLiteral) -> Result<TypeId, InvalidExpression> {
        let int = self.db.primitive_type(PrimitiveKind::Int);
        literal.set_resolved_type(int);
        match parse_int_literal(&literal.literal) {
            Some(value) => {
                literal.set_resolved_value(value);
                Ok(int)
            }
            None => Err(InvalidExpression::MalformedIntLiteral {
                literal: literal.literal.clone(),
            }),
        }
    }

    fn visit_negate(&self, operand_type: TypeId) -> Result<TypeId, InvalidExpression> {
        let boolean = self.db.primitive_type(PrimitiveKind::Boolean);
        if !self.db.types_equal(operand_type, boolean) {
            return Err(InvalidExpression::OperatorNotApplicable {
                operator: "!".to_string(),
                operand_types: vec![self.db.type_name(operand_type)],
            });
        }
        // The negation keeps its operand's (boolean) type; nothing further
        // to annotate.
        Ok(operand_type)
    }

    fn visit_binary(
        &self,
        binary: &mut Binary,
        left: TypeId,
        right: TypeId,
    ) -> Result<TypeId, InvalidExpression> {
        // Operand compatibility is checked before anything operator-specific.
        if !self.db.are_compatible(left, right) {
            return Err(InvalidExpression::IncompatibleOperands {
                left: self.db.type_name(left),
                right: self.db.type_name(right),
            });
        }

        let boolean = self.db.primitive_type(PrimitiveKind::Boolean);
        let operator = binary.operator.as_str();
        let valid = if LOGIC_OPERATORS.contains(&operator) {
            self.db.types_equal(left, boolean)
        } else if COMPARABLE_OPERATORS.contains(&operator) {
            self.db.is_primitive(left)
        } else if IDENTITY_OPERATORS.contains(&operator) {
            matches!(
                self.db.kind_of(left),
                TypeKind::Primitive(_) | TypeKind::Declared | TypeKind::Array
            )
        } else {
            return Err(InvalidExpression::UndefinedOperator {
                operator: binary.operator.clone(),
            });
        };

        // The result type is assigned before the operand-kind check; an
        // inapplicable operator still leaves the boolean annotation behind.
        binary.set_resolved_type(boolean);

        if !valid {
            return Err(InvalidExpression::OperatorNotApplicable {
                operator: binary.operator.clone(),
                operand_types: vec![self.db.type_name(left), self.db.type_name(right)],
            });
        }
        Ok(boolean)
    }

    fn visit_variable(
        &self,
        variable: &mut Variable,
        receiver_type: Option<TypeId>,
    ) -> Result<TypeId, InvalidExpression> {
        // The literal name `null` always binds the synthetic null symbol,
        // bypassing every lookup.
        if variable.name == "null" {
            variable.set_resolved_symbol(SymbolId::NULL);
            return Ok(self.db.null_type());
        }

        let resolved = match receiver_type {
            None => self.find_variable(self.catalog.variables(), &variable.name),
            Some(receiver) => match self.db.kind_of(receiver) {
                TypeKind::Declared => {
                    let receiver = self.db.reload_type(receiver);
                    let members = self.db.members_of(receiver);
                    let mut visible = Vec::new();
                    catalog::variables_in(self.db, &members, true, &mut visible);
                    self.find_variable(&visible, &variable.name)
                }
                TypeKind::Array => {
                    self.find_variable(&[SymbolId::ARRAY_LENGTH], &variable.name)
                }
                _ => None,
            },
        };

        match resolved {
            Some((id, type_id)) => {
                variable.set_resolved_symbol(id);
                Ok(type_id)
            }
            None => Err(InvalidExpression::UnresolvedVariable {
                name: variable.name.clone(),
            }),
        }
    }

    /// First variable in `candidates` whose name matches, with its declared
    /// type.
    fn find_variable(&self, candidates: &[SymbolId], name: &str) -> Option<(SymbolId, TypeId)> {
        for &id in candidates {
            if let Symbol::Variable(variable) = self.db.symbol(id)
                && variable.name == name
            {
                return Some((id, variable.type_id));
            }
        }
        None
    }

    fn visit_call(
        &self,
        call: &mut Call,
        receiver_type: Option<TypeId>,
        argument_types: &[TypeId],
    ) -> Result<TypeId, InvalidExpression> {
        let candidates: Vec<SymbolId> = match receiver_type {
            None => self.catalog.callables().to_vec(),
            Some(receiver) => match self.db.kind_of(receiver) {
                TypeKind::Declared => {
                    let receiver = self.db.reload_type(receiver);
                    let members = self.db.members_of(receiver);
                    let mut visible = Vec::new();
                    catalog::callables_in(self.db, &members, &mut visible);
                    visible
                }
                _ => Vec::new(),
            },
        };

        let mut found_with_name: Option<&CallableSymbol> = None;
        let mut resolved: Option<(SymbolId, TypeId, Vec<TypeId>)> = None;

        'candidates: for &id in &candidates {
            let Some(callable) = self.db.symbol(id).as_callable() else {
                continue;
            };
            if callable.call_name() != call.name {
                continue;
            }
            found_with_name = Some(callable);

            if callable.params.len() != argument_types.len() {
                tracing::debug!(
                    "candidate {} rejected: expected {} argument(s), got {}",
                    callable.call_name(),
                    callable.params.len(),
                    argument_types.len()
                );
                continue;
            }

            // Target types are staged per candidate and committed only for
            // the winner, so a rejected candidate leaves no annotation.
            let mut target_types = Vec::with_capacity(argument_types.len());
            for (index, (&source, &target)) in
                argument_types.iter().zip(&callable.params).enumerate()
            {
                if !self.db.is_assignable(source, target) {
                    tracing::debug!(
                        "candidate {} rejected: argument {} of type {} not assignable to {}",
                        callable.call_name(),
                        index,
                        self.db.type_name(source),
                        self.db.type_name(target)
                    );
                    continue 'candidates;
                }
                target_types.push(target);
            }

            resolved = Some((id, callable.invocation_type(), target_types));
            break;
        }

        match resolved {
            Some((id, invocation_type, target_types)) => {
                tracing::debug!(
                    "call {} bound with {} argument(s)",
                    call.name,
                    target_types.len()
                );
                call.set_resolved_symbol(id);
                for (argument, target) in call.arguments.iter_mut().zip(target_types) {
                    argument.set_resolved_target_type(target);
                }
                Ok(invocation_type)
            }
            None => match found_with_name {
                None => Err(InvalidExpression::UndefinedMethod {
                    name: call.name.clone(),
                }),
                Some(callable) => Err(InvalidExpression::MethodNotApplicable {
                    signature: callable.readable_signature(self.db),
                    enclosing_type: self.db.type_name(callable.enclosing_type),
                    argument_types: argument_types
                        .iter()
                        .map(|&t| self.db.type_name(t))
                        .collect(),
                }),
            },
        }
    }
}

/// Parse an integer literal by prefix: `0x` hexadecimal, `0b` binary, a
/// leading zero octal over the entire text, decimal otherwise. Prefix
/// detection order matters: `0` alone is octal zero, and `09` must fail as
/// an octal literal rather than read as decimal.
fn parse_int_literal(literal: &str) -> Option<i64> {
    let (radix, digits) = if let Some(rest) = literal.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = literal.strip_prefix("0b") {
        (2, rest)
    } else if literal.starts_with('0') {
        (8, literal)
    } else {
        (10, literal)
    };
    i64::from_str_radix(digits, radix).ok()
}

#[cfg(test)]
#[path = "tests/literal_tests.rs"]
mod literal_tests;
