//! Matching host literals.
use num_bigint::BigInt;
use num_traits::Signed;
use quasi_template::{lit::Numeral, Expr, LitTemplate, OpName};
use quasi_trees::{Lit, Operator};

use crate::{
    matcher::{MatchResult, Matched, Matcher},
    store::Store,
};

/// Check that a numeral template has the integer value `value`.
fn is_integer(text: &str, value: &BigInt) -> bool {
    matches!(Numeral::parse(text), Some(Numeral::Integer(parsed)) if parsed == *value)
}

impl<'s> Matcher<'s> {
    /// Match a host literal. Integers and bit-vectors are compared by value,
    /// the width of a bit-vector is not checked.
    pub(crate) fn match_lit(&self, lit: &Lit, template: &Expr, store: Store) -> MatchResult {
        let Expr::Literal(template_lit) = template else {
            return self.match_negated_numeral(lit, template, store);
        };

        let matches = match (lit, template_lit) {
            (Lit::Integer(value) | Lit::BitVector { value, .. }, LitTemplate::Numeric(text)) => {
                is_integer(text.as_str(), value)
            }
            (Lit::Fraction { numerator, denominator }, LitTemplate::Numeric(text)) => {
                match Numeral::parse(text.as_str()) {
                    Some(numeral) => {
                        let (parsed_numerator, parsed_denominator) = numeral.as_fraction();
                        parsed_numerator * denominator == numerator * parsed_denominator
                    }
                    None => false,
                }
            }
            (Lit::Boolean(value), LitTemplate::Boolean(template)) => value == template,
            (Lit::Str(value), LitTemplate::Str(template)) => value == template,
            (Lit::Char(value), LitTemplate::Char(template)) => value == template,
            (Lit::Unit, LitTemplate::Unit) => true,
            _ => false,
        };

        if matches {
            Matched::ok(store)
        } else {
            None
        }
    }

    /// A negative integer also matches `-n` written with a space, which is
    /// a negation of the numeral `n`.
    fn match_negated_numeral(&self, lit: &Lit, template: &Expr, store: Store) -> MatchResult {
        let (Lit::Integer(value) | Lit::BitVector { value, .. }) = lit else { return None };

        match template {
            Expr::Operation(OpName::Prim(Operator::UMinus), args) if value.is_negative() => {
                match args.as_slice() {
                    [Expr::Literal(LitTemplate::Numeric(text))]
                        if is_integer(text.as_str(), &-value) =>
                    {
                        Matched::ok(store)
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }
}
