//! Defines a structure used to represent the tokens that the
//! parser expected at some point during parsing. [ExpectedItem]
//! is represented using [`bitflags!`] in order to allow for encoding
//! multiple [ExpectedItem]s into a single [ExpectedItem] value.

use std::fmt;

use quasi_token::{delimiter::Delimiter, TokenKind};
use quasi_utils::{bitflags::bitflags, printing::SequenceDisplay};

bitflags! {
    /// Defines what expected items could be encountered in a given context.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExpectedItem: u32 {
        /// An identifier.
        const Ident = 1 << 1;

        /// A literal token.
        const Literal = 1 << 2;

        /// A hole or a splice.
        const Splice = 1 << 3;

        /// A dot.
        const Dot = 1 << 4;

        /// A comma token.
        const Comma = 1 << 5;

        /// A colon token.
        const Colon = 1 << 6;

        /// An equal sign token.
        const Eq = 1 << 7;

        /// A star token, the default entry of a map literal.
        const Star = 1 << 8;

        /// Left parenthesis
        const LeftParen = 1 << 9;

        /// Left brace
        const LeftBrace = 1 << 10;

        /// Left bracket
        const LeftBracket = 1 << 11;

        /// Thin arrow.
        const ThinArrow = 1 << 12;

        /// Fat arrow.
        const FatArrow = 1 << 13;

        /// The `in` keyword of a `let`.
        const InKw = 1 << 14;

        /// The `else` keyword of an `if`.
        const ElseKw = 1 << 15;

        /// Convenient left-wise delimiter mask.
        const DelimLeft = Self::LeftParen.bits()
                        | Self::LeftBrace.bits()
                        | Self::LeftBracket.bits();

        /// Tokens that can start a type.
        const Type = Self::Ident.bits()
                   | Self::Splice.bits()
                   | Self::LeftParen.bits();

        /// Tokens that can stand in a binder position.
        const Binder = Self::Ident.bits()
                     | Self::Splice.bits();
    }
}

impl fmt::Display for ExpectedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut toks = vec![];

        for kind in self.iter() {
            match kind {
                ExpectedItem::Ident => toks.push("identifier"),
                ExpectedItem::Literal => toks.push("literal"),
                ExpectedItem::Splice => toks.push("splice"),
                ExpectedItem::Dot => toks.push("."),
                ExpectedItem::Comma => toks.push(","),
                ExpectedItem::Colon => toks.push(":"),
                ExpectedItem::Eq => toks.push("="),
                ExpectedItem::Star => toks.push("*"),
                ExpectedItem::LeftParen => toks.push("("),
                ExpectedItem::LeftBrace => toks.push("{"),
                ExpectedItem::LeftBracket => toks.push("["),
                ExpectedItem::ThinArrow => toks.push("->"),
                ExpectedItem::FatArrow => toks.push("=>"),
                ExpectedItem::InKw => toks.push("in"),
                ExpectedItem::ElseKw => toks.push("else"),
                _ => {}
            }
        }

        write!(f, "{}", SequenceDisplay::either(&toks))
    }
}

impl From<TokenKind> for ExpectedItem {
    fn from(value: TokenKind) -> Self {
        match value {
            TokenKind::Eq => ExpectedItem::Eq,
            TokenKind::Dot => ExpectedItem::Dot,
            TokenKind::Star => ExpectedItem::Star,
            TokenKind::Colon => ExpectedItem::Colon,
            TokenKind::Comma => ExpectedItem::Comma,
            TokenKind::Ident(_) => ExpectedItem::Ident,
            TokenKind::ThinArrow => ExpectedItem::ThinArrow,
            TokenKind::FatArrow => ExpectedItem::FatArrow,
            TokenKind::Tree(delim, _) => delim.into(),
            TokenKind::Splice(..) | TokenKind::Hole(_) => ExpectedItem::Splice,
            kind if kind.is_lit() => ExpectedItem::Literal,
            _ => ExpectedItem::empty(),
        }
    }
}

impl From<Delimiter> for ExpectedItem {
    fn from(value: Delimiter) -> Self {
        match value {
            Delimiter::Paren => ExpectedItem::LeftParen,
            Delimiter::Bracket => ExpectedItem::LeftBracket,
            Delimiter::Brace => ExpectedItem::LeftBrace,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn expected_items_display() {
        assert_eq!(ExpectedItem::Comma.to_string(), "a `,`");
        assert_eq!(
            (ExpectedItem::Comma | ExpectedItem::Dot).to_string(),
            "either a `.`, or `,`"
        );
        assert_eq!(ExpectedItem::from(Delimiter::Bracket), ExpectedItem::LeftBracket);
    }
}
