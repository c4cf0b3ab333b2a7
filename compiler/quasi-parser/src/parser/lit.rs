//! Parsing literals.
use quasi_source::identifier::Name;
use quasi_template::{Expr, LitTemplate};
use quasi_token::{keyword::Keyword, TokenKind};

use super::TemplateGen;
use crate::diagnostics::{
    error::{ParseErrorKind, ParseResult},
    expected::ExpectedItem,
};

impl<'s> TemplateGen<'s> {
    /// Parse a primitive literal, numerals are kept in their textual form.
    pub(crate) fn parse_primitive_lit(&self) -> ParseResult<Expr> {
        let Some(token) = self.next_token() else {
            return self.unexpected_eof();
        };

        let lit = match token.kind {
            TokenKind::Keyword(Keyword::True) => LitTemplate::Boolean(true),
            TokenKind::Keyword(Keyword::False) => LitTemplate::Boolean(false),
            TokenKind::Int(text) | TokenKind::Decimal(text) => LitTemplate::Numeric(text),
            TokenKind::Char(ch) => LitTemplate::Char(ch),
            TokenKind::Str(text) => LitTemplate::Str(text.as_str().to_string()),
            kind => {
                return self.err_with_location(
                    ParseErrorKind::ExpectedExpr,
                    ExpectedItem::Literal,
                    Some(kind),
                    token.span,
                )
            }
        };

        Ok(Expr::Literal(lit))
    }

    /// Parse a `-` that is directly followed by a numeral, `-1` is a literal
    /// rather than an operation.
    pub(crate) fn parse_negative_numeral(&self) -> Option<Expr> {
        let (minus, numeral) = (self.peek()?, self.peek_second()?);

        match numeral.kind {
            TokenKind::Int(text) | TokenKind::Decimal(text)
                if minus.has_kind(TokenKind::Minus) && minus.span.is_right_before(numeral.span) =>
            {
                self.skip(2);
                let text = Name::from(format!("-{text}"));
                Some(Expr::Literal(LitTemplate::Numeric(text)))
            }
            _ => None,
        }
    }
}
