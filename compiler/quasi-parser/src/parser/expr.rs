//! Parsing expression templates.
use quasi_source::identifier::Name;
use quasi_template::{Expr, Ident, LitTemplate, OpName, Quantifier, Type};
use quasi_token::{delimiter::Delimiter, keyword::Keyword, SpliceKind, Token, TokenKind};
use quasi_trees::Operator;

use super::TemplateGen;
use crate::diagnostics::{
    error::{ParseErrorKind, ParseResult},
    expected::ExpectedItem,
};

/// An entry of a brace delimited set or map literal.
enum BraceEntry {
    Element(Expr),
    Pair(Expr, Expr),
    /// `* : T -> value`
    Default(Option<Type>, Expr),
}

impl<'s> TemplateGen<'s> {
    /// Parse an expression, including binary operators.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_expr_with_precedence(0)
    }

    /// Parse an expression whilst taking into account binary precedence
    /// operators. Parse chain of expressions with chain links being binary
    /// operators. Whilst parsing the chain, figure out the applicative
    /// precedence of each operator using Pratt parsing.
    pub(crate) fn parse_expr_with_precedence(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_prefix_expr()?;

        loop {
            let (Some(op), consumed_tokens) = self.parse_binary_operator() else {
                break;
            };

            // check if we have higher precedence than the lhs expression...
            let (l_prec, r_prec) = op.infix_binding_power();

            if l_prec < min_prec {
                break;
            }

            self.skip(consumed_tokens);

            let rhs = self.parse_expr_with_precedence(r_prec)?;
            lhs = op.apply(lhs, rhs);
        }

        Ok(lhs)
    }

    /// Parse the binding forms, which extend as far to the right as
    /// possible, and the prefix operators.
    fn parse_prefix_expr(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.peek().copied() else {
            return self.err_with_location(
                ParseErrorKind::ExpectedExpr,
                ExpectedItem::empty(),
                None,
                self.next_pos(),
            );
        };

        let operator = match token.kind {
            TokenKind::Keyword(Keyword::Forall) => {
                return self.parse_abstraction(Quantifier::Forall);
            }
            TokenKind::Keyword(Keyword::Exists) => {
                return self.parse_abstraction(Quantifier::Exists);
            }
            TokenKind::Keyword(Keyword::Lambda) => {
                return self.parse_abstraction(Quantifier::Lambda);
            }
            TokenKind::Keyword(Keyword::Choose) => {
                return self.parse_abstraction(Quantifier::Choose);
            }
            TokenKind::Keyword(Keyword::Let) => return self.parse_let(),
            TokenKind::Keyword(Keyword::If) => return self.parse_if(),
            TokenKind::Minus => match self.parse_negative_numeral() {
                Some(numeral) => return Ok(numeral),
                None => Operator::UMinus,
            },
            TokenKind::Exclamation => Operator::Not,
            TokenKind::Tilde => Operator::BVNot,
            _ => return self.parse_singular_expr(),
        };

        self.skip_token();
        let operand = self.parse_prefix_expr()?;
        Ok(Expr::prim(operator, vec![operand]))
    }

    /// Parse a primary expression followed by any number of selections,
    /// type applications, applications and constructor tests.
    fn parse_singular_expr(&mut self) -> ParseResult<Expr> {
        let mut subject = self.parse_primary()?;

        while let Some(token) = self.peek().copied() {
            subject = match token.kind {
                TokenKind::Dot => {
                    self.skip_token();
                    let field = self.parse_ident(ParseErrorKind::ExpectedField)?;
                    Expr::Selection(Box::new(subject), field)
                }
                TokenKind::Keyword(Keyword::Is) => {
                    self.skip_token();
                    let cons = self.parse_ident(ParseErrorKind::ExpectedSymbol)?;
                    Expr::Operation(OpName::Is, vec![subject, Expr::Variable(cons)])
                }
                TokenKind::Tree(Delimiter::Bracket, _) => {
                    let tps = self.parse_ty_list()?;
                    Expr::TypeApplication(Box::new(subject), tps)
                }
                TokenKind::Tree(Delimiter::Paren, _) => {
                    let args = self.parse_args()?;
                    Expr::Application(Box::new(subject), args)
                }
                // A single expression in braces is an argument, `f { x }`.
                TokenKind::Tree(Delimiter::Brace, _) if !self.is_bag_tree(&token) => {
                    let arg = self.peek_resultant_fn(|g| {
                        g.in_tree(Delimiter::Brace, None, |g| g.parse_expr())
                    });

                    match arg {
                        Some(arg) => Expr::Application(Box::new(subject), vec![arg]),
                        None => break,
                    }
                }
                _ => break,
            };
        }

        Ok(subject)
    }

    /// Parse the arguments of an application, `(a, b)`.
    fn parse_args(&mut self) -> ParseResult<Vec<Expr>> {
        self.in_tree(Delimiter::Paren, Some(ParseErrorKind::ExpectedExpr), |g| {
            g.parse_separated(|g| g.parse_expr())
        })
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.peek().copied() else {
            return self.err_with_location(
                ParseErrorKind::ExpectedExpr,
                ExpectedItem::empty(),
                None,
                self.next_pos(),
            );
        };

        match token.kind {
            kind if kind.is_lit() => self.parse_primitive_lit(),
            TokenKind::Ident(name) => {
                self.skip_token();
                self.parse_name(name)
            }
            TokenKind::Splice(SpliceKind::Ident, index) => {
                self.skip_token();
                let id = self.splice_ident(index, token.span)?;

                if self.symbols.function(id).is_some() || self.symbols.constructor(id).is_some() {
                    Ok(Expr::Literal(LitTemplate::EmbeddedIdent(id)))
                } else {
                    Ok(Expr::Variable(Ident::Embedded(id)))
                }
            }
            TokenKind::Splice(SpliceKind::Expr, index) => {
                self.skip_token();
                Ok(Expr::Literal(LitTemplate::EmbeddedExpr(self.splice_expr(index, token.span)?)))
            }
            TokenKind::Hole(index) => {
                self.skip_token();
                Ok(Expr::Hole(index as usize))
            }
            TokenKind::Tree(Delimiter::Brace, _) if self.is_bag_tree(&token) => {
                self.parse_bag_lit()
            }
            TokenKind::Tree(Delimiter::Brace, _) => self.parse_brace_lit(),
            TokenKind::Tree(Delimiter::Paren, _) => self.parse_paren_expr(),
            kind => self.err_with_location(
                ParseErrorKind::ExpectedExpr,
                ExpectedItem::empty(),
                Some(kind),
                token.span,
            ),
        }
    }

    /// Parse a name that was just consumed: a declared function or
    /// constructor, a primitive function call, or a variable.
    fn parse_name(&mut self, name: Name) -> ParseResult<Expr> {
        if self.symbols.lookup_function(name).is_some()
            || self.symbols.lookup_constructor(name).is_some()
        {
            return Ok(Expr::Literal(LitTemplate::Name(name)));
        }

        let is_call = matches!(
            self.peek(),
            Some(Token { kind: TokenKind::Tree(Delimiter::Paren | Delimiter::Bracket, _), .. })
        );

        match OpName::from_function_name(name.as_str()) {
            Some(op) if is_call => {
                let tps = match self.peek() {
                    Some(Token { kind: TokenKind::Tree(Delimiter::Bracket, _), .. }) => {
                        Some(self.parse_ty_list()?)
                    }
                    _ => None,
                };

                let operation = Expr::Operation(op, self.parse_args()?);

                Ok(match tps {
                    Some(tps) => Expr::TypeApplication(Box::new(operation), tps),
                    None => operation,
                })
            }
            _ => Ok(Expr::Variable(Ident::Name(name))),
        }
    }

    /// Whether the token is a brace tree of the form `{| ... |}`.
    fn is_bag_tree(&self, token: &Token) -> bool {
        match self.tree_of(token) {
            Some(tree) if tree.len() >= 2 && token.is_brace_tree() => {
                tree[0].has_kind(TokenKind::Pipe) && tree[tree.len() - 1].has_kind(TokenKind::Pipe)
            }
            _ => false,
        }
    }

    /// Parse a bag literal, `{| e -> n, ... |}`. Each entry is a pair of the
    /// element and its multiplicity.
    fn parse_bag_lit(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.next_token().copied() else {
            return self.unexpected_eof();
        };

        let Some(tree) = self.tree_of(&token).filter(|tree| tree.len() >= 2) else {
            return self.unexpected_eof();
        };
        let entries = &tree[1..tree.len() - 1];

        let entries = self.new_frame(entries, token.span, |g| {
            g.parse_separated(|g| {
                let element = g.parse_expr()?;
                g.parse_token(TokenKind::ThinArrow)?;
                let count = g.parse_expr()?;
                Ok(Expr::Operation(OpName::Tuple, vec![element, count]))
            })
        })?;

        Ok(Expr::Operation(OpName::Bag, entries))
    }

    /// Parse a set literal `{ a, b }` or a map literal
    /// `{ k -> v, * : T -> default }`.
    fn parse_brace_lit(&mut self) -> ParseResult<Expr> {
        let span = self.next_pos();
        let entries = self.in_tree(Delimiter::Brace, Some(ParseErrorKind::ExpectedExpr), |g| {
            g.parse_separated(|g| g.parse_brace_entry())
        })?;

        if entries.iter().all(|entry| matches!(entry, BraceEntry::Element(_))) {
            let elements = entries
                .into_iter()
                .filter_map(|entry| match entry {
                    BraceEntry::Element(element) => Some(element),
                    _ => None,
                })
                .collect();

            return Ok(Expr::Operation(OpName::Set, elements));
        }

        let mut default = None;
        let mut pairs = vec![];

        for entry in entries {
            match entry {
                BraceEntry::Element(_) => {
                    return self.err_with_location(
                        ParseErrorKind::MixedCollection,
                        ExpectedItem::ThinArrow,
                        None,
                        span,
                    )
                }
                BraceEntry::Pair(key, value) => {
                    pairs.push(Expr::Operation(OpName::Tuple, vec![key, value]))
                }
                BraceEntry::Default(_, _) if default.is_some() => {
                    return self.err_with_location(
                        ParseErrorKind::DuplicateMapDefault,
                        ExpectedItem::empty(),
                        None,
                        span,
                    )
                }
                BraceEntry::Default(ty, value) => default = Some((ty, value)),
            }
        }

        let Some((ty, value)) = default else {
            return self.err_with_location(
                ParseErrorKind::ExpectedMapDefault,
                ExpectedItem::Star,
                None,
                span,
            );
        };

        let mut children = vec![value];
        children.extend(pairs);
        let map = Expr::Operation(OpName::Map, children);

        Ok(match ty {
            Some(ty) => Expr::TypeApplication(Box::new(map), vec![ty]),
            None => map,
        })
    }

    fn parse_brace_entry(&mut self) -> ParseResult<BraceEntry> {
        if self.parse_token_fast(TokenKind::Star).is_some() {
            let ty = match self.parse_token_fast(TokenKind::Colon) {
                Some(_) => Some(self.parse_ty()?),
                None => None,
            };

            self.parse_token(TokenKind::ThinArrow)?;
            return Ok(BraceEntry::Default(ty, self.parse_expr()?));
        }

        let key = self.parse_expr()?;

        match self.parse_token_fast(TokenKind::ThinArrow) {
            Some(_) => Ok(BraceEntry::Pair(key, self.parse_expr()?)),
            None => Ok(BraceEntry::Element(key)),
        }
    }

    /// Parse the unit literal `()`, a parenthesised expression `(e)`, a tuple
    /// `(a, b)` or an annotated expression `(e : T)`.
    fn parse_paren_expr(&mut self) -> ParseResult<Expr> {
        self.in_tree(Delimiter::Paren, Some(ParseErrorKind::ExpectedExpr), |g| {
            if !g.has_token() {
                return Ok(Expr::Literal(LitTemplate::Unit));
            }

            let first = g.parse_expr()?;

            if g.parse_token_fast(TokenKind::Colon).is_some() {
                let ty = g.parse_ty()?;
                return Ok(Expr::Annotated(Box::new(first), ty));
            }

            let mut members = vec![first];

            while g.parse_token_fast(TokenKind::Comma).is_some() && g.has_token() {
                members.push(g.parse_expr()?);
            }

            Ok(match members.len() {
                1 => members.remove(0),
                _ => Expr::Operation(OpName::Tuple, members),
            })
        })
    }
}
