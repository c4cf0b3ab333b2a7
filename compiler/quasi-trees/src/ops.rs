//! Primitive host operators.
use std::fmt;

use strum_macros::AsRefStr;

/// How many operands an [Operator] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn admits(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// A primitive operation of the host language. Operands are stored in
/// [crate::Expr::Operation] in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum Operator {
    // Boolean
    Equals,
    Implies,
    And,
    Or,
    Not,

    // Arithmetic
    Plus,
    Minus,
    Times,
    Division,
    Remainder,
    Modulo,
    UMinus,
    LessThan,
    GreaterThan,
    LessEquals,
    GreaterEquals,

    // Bit-vectors
    BVNot,
    BVAnd,
    BVOr,
    BVXor,
    BVShiftLeft,
    BVAShiftRight,
    BVLShiftRight,

    // Strings
    StringConcat,
    SubString,
    StringLength,

    // Sets
    SetAdd,
    ElementOfSet,
    SubsetOf,
    SetIntersection,
    SetUnion,
    SetDifference,

    // Bags
    BagAdd,
    MultiplicityInBag,
    BagIntersection,
    BagUnion,
    BagDifference,

    // Maps
    MapApply,
    MapUpdated,
}

impl Operator {
    /// The number of operands the operator takes.
    pub fn arity(&self) -> Arity {
        use Operator::*;

        match self {
            And | Or => Arity::AtLeast(2),
            Not | UMinus | BVNot | StringLength => Arity::Exact(1),
            SubString | MapUpdated => Arity::Exact(3),
            _ => Arity::Exact(2),
        }
    }

    /// The position of the set, bag or map operand of a collection
    /// operation. The element types of that operand are matched against the
    /// type arguments of a template.
    pub fn collection_operand(&self) -> Option<usize> {
        use Operator::*;

        match self {
            ElementOfSet | MultiplicityInBag => Some(1),
            SetAdd | SubsetOf | SetIntersection | SetUnion | SetDifference | BagAdd
            | BagIntersection | BagUnion | BagDifference | MapApply | MapUpdated => Some(0),
            _ => None,
        }
    }

    /// Whether the operator is a boolean connective or a comparison.
    pub fn is_predicate(&self) -> bool {
        use Operator::*;

        matches!(
            self,
            Equals
                | Implies
                | And
                | Or
                | Not
                | LessThan
                | GreaterThan
                | LessEquals
                | GreaterEquals
                | ElementOfSet
                | SubsetOf
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_arities() {
        assert!(Operator::And.arity().admits(3));
        assert!(!Operator::And.arity().admits(1));
        assert!(Operator::Not.arity().admits(1));
        assert!(!Operator::Plus.arity().admits(3));
        assert_eq!(Operator::MapUpdated.arity(), Arity::Exact(3));
        assert_eq!(Operator::BVXor.to_string(), "BVXor");
    }

    #[test]
    fn collection_operands() {
        assert_eq!(Operator::SetAdd.collection_operand(), Some(0));
        assert_eq!(Operator::ElementOfSet.collection_operand(), Some(1));
        assert_eq!(Operator::MultiplicityInBag.collection_operand(), Some(1));
        assert_eq!(Operator::MapUpdated.collection_operand(), Some(0));
        assert_eq!(Operator::Plus.collection_operand(), None);
    }
}
