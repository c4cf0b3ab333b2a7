//! Parsing type templates.
use quasi_template::Type;
use quasi_token::{delimiter::Delimiter, SpliceKind, Token, TokenKind};

use super::TemplateGen;
use crate::diagnostics::{
    error::{ParseErrorKind, ParseResult},
    expected::ExpectedItem,
};

impl<'s> TemplateGen<'s> {
    /// Parse a type, `simple ('=>' type)?`. Arrows are right associative.
    pub(crate) fn parse_ty(&mut self) -> ParseResult<Type> {
        let from = self.parse_simple_ty()?;

        if self.parse_token_fast(TokenKind::FatArrow).is_some() {
            let to = self.parse_ty()?;
            return Ok(Type::arrow(from, to));
        }

        // A parenthesised list only stands on its own when it has a single
        // member, or when it is read as a tuple.
        match from {
            Type::Group(mut members) => match members.len() {
                0 => Ok(Type::name("Unit")),
                1 => Ok(members.remove(0)),
                _ => Ok(Type::Tuple(members)),
            },
            ty => Ok(ty),
        }
    }

    /// Parse a simple type. Parenthesised lists are returned as a
    /// [Type::Group], the caller decides whether they are a tuple or the
    /// parameters of a function type.
    fn parse_simple_ty(&mut self) -> ParseResult<Type> {
        let Some(token) = self.peek().copied() else {
            return self.err_with_location(
                ParseErrorKind::ExpectedType,
                ExpectedItem::Type,
                None,
                self.next_pos(),
            );
        };

        let ty = match token.kind {
            TokenKind::Ident(name) => {
                self.skip_token();
                self.parse_ty_args(Type::Name(name))?
            }
            TokenKind::Splice(SpliceKind::Type, index) => {
                self.skip_token();
                Type::Embedded(self.splice_ty(index, token.span)?)
            }
            TokenKind::Splice(SpliceKind::Ident, index) => {
                self.skip_token();
                let id = self.splice_ident(index, token.span)?;
                self.parse_ty_args(Type::EmbeddedIdent(id))?
            }
            TokenKind::Hole(index) => {
                self.skip_token();
                Type::Hole(index as usize)
            }
            TokenKind::Tree(Delimiter::Paren, _) => {
                let error = Some(ParseErrorKind::ExpectedType);
                let members = self
                    .in_tree(Delimiter::Paren, error, |g| g.parse_separated(|g| g.parse_ty()))?;
                Type::Group(members)
            }
            kind => {
                return self.err_with_location(
                    ParseErrorKind::ExpectedType,
                    ExpectedItem::Type,
                    Some(kind),
                    token.span,
                )
            }
        };

        Ok(ty)
    }

    /// Parse the optional `[args]` of a type constructor.
    fn parse_ty_args(&mut self, cons: Type) -> ParseResult<Type> {
        match self.peek() {
            Some(Token { kind: TokenKind::Tree(Delimiter::Bracket, _), .. }) => {
                let args = self.parse_ty_list()?;
                Ok(Type::app(cons, args))
            }
            _ => Ok(cons),
        }
    }

    /// Parse a bracketed, comma separated list of types, `[A, B]`.
    pub(crate) fn parse_ty_list(&mut self) -> ParseResult<Vec<Type>> {
        self.in_tree(Delimiter::Bracket, Some(ParseErrorKind::ExpectedType), |g| {
            g.parse_separated(|g| g.parse_ty())
        })
    }
}
