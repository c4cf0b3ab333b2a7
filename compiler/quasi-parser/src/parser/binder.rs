//! Parsing binders and the binding forms: quantifiers, `let` and `if`.
use quasi_template::{Binding, Expr, Ident, LetBinding, OpName, Quantifier};
use quasi_token::{delimiter::Delimiter, keyword::Keyword, SpliceKind, TokenKind};

use super::TemplateGen;
use crate::diagnostics::{
    error::{ParseErrorKind, ParseResult},
    expected::ExpectedItem,
};

impl<'s> TemplateGen<'s> {
    /// Parse an identifier in a binder or field position: a name, a spliced
    /// identifier or a hole.
    pub(crate) fn parse_ident(&mut self, error_kind: ParseErrorKind) -> ParseResult<Ident> {
        let Some(token) = self.peek().copied() else {
            return self.err_with_location(error_kind, ExpectedItem::Binder, None, self.next_pos());
        };

        let ident = match token.kind {
            TokenKind::Ident(name) => Ident::Name(name),
            TokenKind::Splice(SpliceKind::Ident, index) => {
                Ident::Embedded(self.splice_ident(index, token.span)?)
            }
            TokenKind::Hole(index) => Ident::Hole(index as usize),
            kind => {
                return self.err_with_location(
                    error_kind,
                    ExpectedItem::Binder,
                    Some(kind),
                    token.span,
                )
            }
        };

        self.skip_token();
        Ok(ident)
    }

    /// Parse a binder with its optional type, `x: T`.
    fn parse_binding(&mut self) -> ParseResult<Binding> {
        let binder = self.parse_ident(ParseErrorKind::ExpectedName)?;

        let ty = match self.parse_token_fast(TokenKind::Colon) {
            Some(_) => Some(self.parse_ty()?),
            None => None,
        };

        Ok(Binding { binder, ty })
    }

    /// Parse an abstraction, `forall x: T, y. body`. The body extends as far
    /// as possible.
    pub(crate) fn parse_abstraction(&mut self, quantifier: Quantifier) -> ParseResult<Expr> {
        self.skip_token(); // the quantifier keyword

        let start = self.next_pos();
        let mut bindings = vec![self.parse_binding()?];

        while self.parse_token_fast(TokenKind::Comma).is_some() {
            bindings.push(self.parse_binding()?);
        }

        if quantifier == Quantifier::Choose && bindings.len() != 1 {
            return self.err_with_location(
                ParseErrorKind::ChooseArity(bindings.len()),
                ExpectedItem::empty(),
                None,
                start.join(self.current_pos()),
            );
        }

        if self.parse_token_fast(TokenKind::Dot).is_none() {
            let received = self.peek().map(|token| token.kind);
            return self.err_with_location(
                ParseErrorKind::Expected,
                ExpectedItem::Dot | ExpectedItem::Comma | ExpectedItem::Colon,
                received,
                self.next_pos(),
            );
        }

        let body = self.parse_expr()?;
        Ok(Expr::Abstraction(quantifier, bindings, Box::new(body)))
    }

    /// Parse a `let` with one or more bindings, `let x: T = v, y = w in body`.
    pub(crate) fn parse_let(&mut self) -> ParseResult<Expr> {
        self.skip_token(); // `let`

        let mut bindings = vec![];

        loop {
            let binder = self.parse_ident(ParseErrorKind::ExpectedName)?;

            let ty = match self.parse_token_fast(TokenKind::Colon) {
                Some(_) => Some(self.parse_ty()?),
                None => None,
            };

            self.parse_token(TokenKind::Eq)?;
            let value = self.parse_expr()?;
            bindings.push(LetBinding { binder, ty, value });

            if self.parse_token_fast(TokenKind::Comma).is_none() {
                break;
            }
        }

        if self.parse_token_fast(TokenKind::Keyword(Keyword::In)).is_none() {
            let received = self.peek().map(|token| token.kind);
            return self.err_with_location(
                ParseErrorKind::Expected,
                ExpectedItem::InKw | ExpectedItem::Comma,
                received,
                self.next_pos(),
            );
        }

        let body = self.parse_expr()?;
        Ok(Expr::Let(bindings, Box::new(body)))
    }

    /// Parse `if (cond) then else otherwise`.
    pub(crate) fn parse_if(&mut self) -> ParseResult<Expr> {
        self.skip_token(); // `if`

        let cond =
            self.in_tree(Delimiter::Paren, Some(ParseErrorKind::ExpectedExpr), |g| g.parse_expr())?;
        let then = self.parse_expr()?;

        if self.parse_token_fast(TokenKind::Keyword(Keyword::Else)).is_none() {
            let received = self.peek().map(|token| token.kind);
            return self.err_with_location(
                ParseErrorKind::Expected,
                ExpectedItem::ElseKw,
                received,
                self.next_pos(),
            );
        }

        let otherwise = self.parse_expr()?;
        Ok(Expr::Operation(OpName::IfThenElse, vec![cond, then, otherwise]))
    }
}
