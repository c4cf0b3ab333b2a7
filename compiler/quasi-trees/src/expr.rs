//! Host expressions.
use derive_more::Constructor;
use quasi_source::identifier::Identifier;

use crate::{lit::Lit, ops::Operator, ty::Type};

/// A typed binder: a bound identifier and its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Constructor)]
pub struct ValDef {
    pub id: Identifier,
    pub ty: Type,
}

impl ValDef {
    /// A reference to the bound variable.
    pub fn to_variable(&self) -> Expr {
        Expr::Variable(self.clone())
    }
}

/// A host expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A reference to a bound or free variable.
    Variable(ValDef),
    Literal(Lit),
    /// `let binder = value in body`
    Let { binder: ValDef, value: Box<Expr>, body: Box<Expr> },
    Lambda { params: Vec<ValDef>, body: Box<Expr> },
    Forall { params: Vec<ValDef>, body: Box<Expr> },
    Exists { params: Vec<ValDef>, body: Box<Expr> },
    /// Some value of the binder's type satisfying `pred`.
    Choose { binder: ValDef, pred: Box<Expr> },
    /// Application of a function valued expression.
    Application { callee: Box<Expr>, args: Vec<Expr> },
    /// Invocation of a declared function.
    FunctionInvocation { id: Identifier, tps: Vec<Type>, args: Vec<Expr> },
    /// Construction of an ADT value, `id` names the constructor.
    Adt { id: Identifier, tps: Vec<Type>, args: Vec<Expr> },
    /// Selection of the field `selector` of an ADT value.
    AdtSelector { adt: Box<Expr>, selector: Identifier },
    /// Test whether an ADT value was built by the constructor `id`.
    IsConstructor { expr: Box<Expr>, id: Identifier },
    IfExpr { cond: Box<Expr>, then: Box<Expr>, otherwise: Box<Expr> },
    Tuple(Vec<Expr>),
    /// Selection of a tuple member, `index` is 1-based.
    TupleSelect { tuple: Box<Expr>, index: usize },
    /// A primitive operation.
    Operation { op: Operator, args: Vec<Expr> },
    FiniteSet { elements: Vec<Expr>, base: Type },
    /// Bag literal, each element paired with its multiplicity.
    FiniteBag { elements: Vec<(Expr, Expr)>, base: Type },
    FiniteMap { pairs: Vec<(Expr, Expr)>, default: Box<Expr>, key: Type, value: Type },
}

impl Expr {
    pub fn var(binder: &ValDef) -> Self {
        binder.to_variable()
    }

    pub fn lit(lit: Lit) -> Self {
        Expr::Literal(lit)
    }

    pub fn int(value: i64) -> Self {
        Expr::Literal(Lit::int(value))
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal(Lit::Boolean(value))
    }

    pub fn op(op: Operator, args: Vec<Expr>) -> Self {
        Expr::Operation { op, args }
    }

    pub fn not(expr: Expr) -> Self {
        Expr::op(Operator::Not, vec![expr])
    }

    pub fn let_in(binder: ValDef, value: Expr, body: Expr) -> Self {
        Expr::Let { binder, value: Box::new(value), body: Box::new(body) }
    }

    pub fn lambda(params: Vec<ValDef>, body: Expr) -> Self {
        Expr::Lambda { params, body: Box::new(body) }
    }

    pub fn forall(params: Vec<ValDef>, body: Expr) -> Self {
        Expr::Forall { params, body: Box::new(body) }
    }

    pub fn exists(params: Vec<ValDef>, body: Expr) -> Self {
        Expr::Exists { params, body: Box::new(body) }
    }

    pub fn choose(binder: ValDef, pred: Expr) -> Self {
        Expr::Choose { binder, pred: Box::new(pred) }
    }

    pub fn if_expr(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::IfExpr { cond: Box::new(cond), then: Box::new(then), otherwise: Box::new(otherwise) }
    }

    pub fn tuple_select(tuple: Expr, index: usize) -> Self {
        Expr::TupleSelect { tuple: Box::new(tuple), index }
    }
}
