//! Host literals.
use std::fmt;

use num_bigint::BigInt;

use crate::ty::Type;

/// A host literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lit {
    Boolean(bool),
    /// Arbitrary precision integer.
    Integer(BigInt),
    /// A bit-vector literal, `value` is interpreted in the given width.
    BitVector { signed: bool, value: BigInt, size: u32 },
    /// A real number as a fraction, not necessarily in lowest terms.
    Fraction { numerator: BigInt, denominator: BigInt },
    Str(String),
    Char(char),
    Unit,
}

impl Lit {
    pub fn int(value: impl Into<BigInt>) -> Self {
        Lit::Integer(value.into())
    }

    /// A signed bit-vector literal of the given width.
    pub fn bv(value: impl Into<BigInt>, size: u32) -> Self {
        Lit::BitVector { signed: true, value: value.into(), size }
    }

    pub fn fraction(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Self {
        Lit::Fraction { numerator: numerator.into(), denominator: denominator.into() }
    }

    /// Get the [Type] of the literal.
    pub fn ty(&self) -> Type {
        match self {
            Lit::Boolean(_) => Type::Boolean,
            Lit::Integer(_) => Type::Integer,
            Lit::BitVector { signed, size, .. } => Type::BV { signed: *signed, size: *size },
            Lit::Fraction { .. } => Type::Real,
            Lit::Str(_) => Type::String,
            Lit::Char(_) => Type::Char,
            Lit::Unit => Type::Unit,
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lit::Boolean(value) => write!(f, "{value}"),
            Lit::Integer(value) => write!(f, "{value}"),
            Lit::BitVector { value, .. } => write!(f, "{value}"),
            Lit::Fraction { numerator, denominator } => write!(f, "({numerator}/{denominator})"),
            Lit::Str(value) => write!(f, "{value:?}"),
            Lit::Char(value) => write!(f, "{value:?}"),
            Lit::Unit => write!(f, "()"),
        }
    }
}
