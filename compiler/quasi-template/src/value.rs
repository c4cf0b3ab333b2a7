//! Host values that are spliced into templates or bound by holes.
use derive_more::From;
use quasi_source::identifier::Identifier;
use quasi_token::SpliceKind;
use quasi_trees as trees;

/// A host value standing at a splice or hole position of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, From)]
pub enum Value {
    Expr(trees::Expr),
    Type(trees::Type),
    Ident(Identifier),
}

impl Value {
    /// The kind of splice token that the value is lexed as.
    pub fn kind(&self) -> SpliceKind {
        match self {
            Value::Expr(_) => SpliceKind::Expr,
            Value::Type(_) => SpliceKind::Type,
            Value::Ident(_) => SpliceKind::Ident,
        }
    }

    pub fn as_expr(&self) -> Option<&trees::Expr> {
        match self {
            Value::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&trees::Type> {
        match self {
            Value::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_ident(&self) -> Option<Identifier> {
        match self {
            Value::Ident(id) => Some(*id),
            _ => None,
        }
    }
}
