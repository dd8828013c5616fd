//! Expression nodes and their resolution annotations.

use exl_types::{Symbol, SymbolId, TypeDatabase, TypeId};

/// One expression node.
///
/// The `kind` payload holds the variant-specific children and annotation
/// slots; the node itself carries the resolved target type a call argument
/// receives from its matched parameter. Annotation setters are meant for the
/// resolver: each slot is written at most once, and re-resolving an already
/// annotated tree is unsupported.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    resolved_target_type: Option<TypeId>,
}

/// The closed set of expression variants.
#[derive(Debug, Clone)]
pub enum ExprKind {
    BooleanLiteral(BooleanLiteral),
    IntLiteral(IntLiteral),
    Negate(Negate),
    Binary(Binary),
    Variable(Variable),
    Call(Call),
}

#[derive(Debug, Clone)]
pub struct BooleanLiteral {
    pub value: bool,
    resolved_type: Option<TypeId>,
}

#[derive(Debug, Clone)]
pub struct IntLiteral {
    /// Literal text exactly as written, prefix included.
    pub literal: String,
    resolved_type: Option<TypeId>,
    resolved_value: Option<i64>,
}

/// Logical not over a boolean operand.
#[derive(Debug, Clone)]
pub struct Negate {
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct Binary {
    /// Operator token as written; validated during resolution.
    pub operator: String,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    resolved_type: Option<TypeId>,
}

/// A name reference, optionally narrowed by a receiver expression.
#[derive(Debug, Clone)]
pub struct Variable {
    pub receiver: Option<Box<Expr>>,
    pub name: String,
    resolved_symbol: Option<SymbolId>,
}

/// A call with positional arguments, optionally narrowed by a receiver.
/// Constructor calls use the reserved `new` name.
#[derive(Debug, Clone)]
pub struct Call {
    pub receiver: Option<Box<Expr>>,
    pub name: String,
    pub arguments: Vec<Expr>,
    resolved_symbol: Option<SymbolId>,
}

impl BooleanLiteral {
    pub fn resolved_type(&self) -> Option<TypeId> {
        self.resolved_type
    }

    pub fn set_resolved_type(&mut self, type_id: TypeId) {
        debug_assert!(self.resolved_type.is_none(), "node resolved twice");
        self.resolved_type = Some(type_id);
    }
}

impl IntLiteral {
    pub fn resolved_type(&self) -> Option<TypeId> {
        self.resolved_type
    }

    pub fn set_resolved_type(&mut self, type_id: TypeId) {
        debug_assert!(self.resolved_type.is_none(), "node resolved twice");
        self.resolved_type = Some(type_id);
    }

    /// Integer value parsed from the literal text.
    pub fn resolved_value(&self) -> Option<i64> {
        self.resolved_value
    }

    pub fn set_resolved_value(&mut self, value: i64) {
        debug_assert!(self.resolved_value.is_none(), "node resolved twice");
        self.resolved_value = Some(value);
    }
}

impl Binary {
    pub fn resolved_type(&self) -> Option<TypeId> {
        self.resolved_type
    }

    pub fn set_resolved_type(&mut self, type_id: TypeId) {
        debug_assert!(self.resolved_type.is_none(), "node resolved twice");
        self.resolved_type = Some(type_id);
    }
}

impl Variable {
    pub fn resolved_symbol(&self) -> Option<SymbolId> {
        self.resolved_symbol
    }

    pub fn set_resolved_symbol(&mut self, symbol: SymbolId) {
        debug_assert!(self.resolved_symbol.is_none(), "node resolved twice");
        self.resolved_symbol = Some(symbol);
    }
}

impl Call {
    pub fn resolved_symbol(&self) -> Option<SymbolId> {
        self.resolved_symbol
    }

    pub fn set_resolved_symbol(&mut self, symbol: SymbolId) {
        debug_assert!(self.resolved_symbol.is_none(), "node resolved twice");
        self.resolved_symbol = Some(symbol);
    }
}

impl Expr {
    fn new(kind: ExprKind) -> Expr {
        Expr {
            kind,
            resolved_target_type: None,
        }
    }

    pub fn boolean(value: bool) -> Expr {
        Expr::new(ExprKind::BooleanLiteral(BooleanLiteral {
            value,
            resolved_type: None,
        }))
    }

    pub fn int(literal: impl Into<String>) -> Expr {
        Expr::new(ExprKind::IntLiteral(IntLiteral {
            literal: literal.into(),
            resolved_type: None,
            resolved_value: None,
        }))
    }

    pub fn negate(operand: Expr) -> Expr {
        Expr::new(ExprKind::Negate(Negate {
            operand: Box::new(operand),
        }))
    }

    pub fn binary(operator: impl Into<String>, left: Expr, right: Expr) -> Expr {
        Expr::new(ExprKind::Binary(Binary {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
            resolved_type: None,
        }))
    }

    pub fn variable(name: impl Into<String>) -> Expr {
        Expr::new(ExprKind::Variable(Variable {
            receiver: None,
            name: name.into(),
            resolved_symbol: None,
        }))
    }

    /// Member access: `receiver.name`.
    pub fn member(receiver: Expr, name: impl Into<String>) -> Expr {
        Expr::new(ExprKind::Variable(Variable {
            receiver: Some(Box::new(receiver)),
            name: name.into(),
            resolved_symbol: None,
        }))
    }

    pub fn call(name: impl Into<String>, arguments: Vec<Expr>) -> Expr {
        Expr::new(ExprKind::Call(Call {
            receiver: None,
            name: name.into(),
            arguments,
            resolved_symbol: None,
        }))
    }

    /// Method call on a receiver: `receiver.name(arguments)`.
    pub fn method_call(receiver: Expr, name: impl Into<String>, arguments: Vec<Expr>) -> Expr {
        Expr::new(ExprKind::Call(Call {
            receiver: Some(Box::new(receiver)),
            name: name.into(),
            arguments,
            resolved_symbol: None,
        }))
    }

    /// Target type this node received as a call argument: the matched
    /// parameter's declared type, distinct from the node's own type.
    pub fn resolved_target_type(&self) -> Option<TypeId> {
        self.resolved_target_type
    }

    pub fn set_resolved_target_type(&mut self, type_id: TypeId) {
        debug_assert!(self.resolved_target_type.is_none(), "node resolved twice");
        self.resolved_target_type = Some(type_id);
    }

    /// Type this node resolved to, derived from its annotations.
    ///
    /// A negation has its operand's type; a variable has its bound symbol's
    /// declared type; a call has its bound callable's return type, or the
    /// enclosing type for a constructor. `None` until the node is resolved.
    pub fn resolved_type(&self, db: &dyn TypeDatabase) -> Option<TypeId> {
        match &self.kind {
            ExprKind::BooleanLiteral(literal) => literal.resolved_type(),
            ExprKind::IntLiteral(literal) => literal.resolved_type(),
            ExprKind::Negate(negate) => negate.operand.resolved_type(db),
            ExprKind::Binary(binary) => binary.resolved_type(),
            ExprKind::Variable(variable) => {
                let id = variable.resolved_symbol()?;
                match db.symbol(id) {
                    Symbol::Variable(symbol) => Some(symbol.type_id),
                    Symbol::Callable(_) => None,
                }
            }
            ExprKind::Call(call) => {
                let id = call.resolved_symbol()?;
                match db.symbol(id) {
                    Symbol::Callable(symbol) => Some(symbol.invocation_type()),
                    Symbol::Variable(_) => None,
                }
            }
        }
    }

    /// Visit the direct children in evaluation order.
    pub fn for_each_child(&self, mut f: impl FnMut(&Expr)) {
        match &self.kind {
            ExprKind::BooleanLiteral(_) | ExprKind::IntLiteral(_) => {}
            ExprKind::Negate(negate) => f(&negate.operand),
            ExprKind::Binary(binary) => {
                f(&binary.left);
                f(&binary.right);
            }
            ExprKind::Variable(variable) => {
                if let Some(receiver) = &variable.receiver {
                    f(receiver);
                }
            }
            ExprKind::Call(call) => {
                if let Some(receiver) = &call.receiver {
                    f(receiver);
                }
                for argument in &call.arguments {
                    f(argument);
                }
            }
        }
    }

    /// Pre-order walk over this node and every descendant.
    pub fn walk(&self, f: &mut impl FnMut(&Expr)) {
        f(self);
        self.for_each_child(|child| child.walk(&mut *f));
    }

    /// Every variable symbol bound in this subtree, in first-occurrence
    /// order. Meaningful after resolution; unresolved variables are skipped.
    pub fn bound_variables(&self) -> Vec<SymbolId> {
        let mut seen = Vec::new();
        self.walk(&mut |expr| {
            if let ExprKind::Variable(variable) = &expr.kind
                && let Some(id) = variable.resolved_symbol()
                && !seen.contains(&id)
            {
                seen.push(id);
            }
        });
        seen
    }

    /// Every callable symbol bound to a call in this subtree, in
    /// first-occurrence order.
    pub fn bound_callables(&self) -> Vec<SymbolId> {
        let mut seen = Vec::new();
        self.walk(&mut |expr| {
            if let ExprKind::Call(call) = &expr.kind
                && let Some(id) = call.resolved_symbol()
                && !seen.contains(&id)
            {
                seen.push(id);
            }
        });
        seen
    }
}
