//! Reading numerals written in templates.
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// The value of a numeral: an integer, or a fraction in lowest terms for a
/// decimal numeral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Numeral {
    Integer(BigInt),
    Fraction(BigInt, BigInt),
}

impl Numeral {
    /// Parse the text of a numeral, `-12`, `3` or `1.25`.
    pub fn parse(text: &str) -> Option<Numeral> {
        let (negative, digits) = match text.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, text),
        };

        let sign = |value: BigInt| if negative { -value } else { value };

        match digits.split_once('.') {
            None => {
                let value = BigInt::parse_bytes(digits.as_bytes(), 10)?;
                Some(Numeral::Integer(sign(value)))
            }
            Some((whole, fractional)) => {
                if fractional.is_empty() || !fractional.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }

                let numerator = BigInt::parse_bytes(format!("{whole}{fractional}").as_bytes(), 10)?;
                let denominator = BigInt::from(10).pow(fractional.len() as u32);
                let (numerator, denominator) = reduce(sign(numerator), denominator);

                Some(Numeral::Fraction(numerator, denominator))
            }
        }
    }

    /// The numeral as a fraction, integers have denominator one.
    pub fn as_fraction(&self) -> (BigInt, BigInt) {
        match self {
            Numeral::Integer(value) => (value.clone(), BigInt::from(1)),
            Numeral::Fraction(numerator, denominator) => (numerator.clone(), denominator.clone()),
        }
    }
}

/// Greatest common divisor, always non-negative.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let (mut a, mut b) = (a.abs(), b.abs());

    while !b.is_zero() {
        let rem = &a % &b;
        a = b;
        b = rem;
    }

    a
}

/// Divide a fraction by the gcd of its parts.
pub fn reduce(numerator: BigInt, denominator: BigInt) -> (BigInt, BigInt) {
    let divisor = gcd(&numerator, &denominator);

    if divisor.is_zero() {
        return (numerator, denominator);
    }

    (numerator / &divisor, denominator / divisor)
}
