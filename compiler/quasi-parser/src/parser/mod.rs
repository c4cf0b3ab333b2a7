//! Quasi template parser. The parser takes a lexed token stream and its
//! accompanying token trees and converts it into a template.

mod binder;
mod expr;
mod lit;
mod operator;
mod ty;

use std::{cell::Cell, ops::Deref};

use quasi_source::{identifier::Identifier, location::ByteRange};
use quasi_template::Value;
use quasi_token::{delimiter::Delimiter, SpliceKind, Token, TokenKind};
use quasi_trees::{self as trees, Symbols};
use quasi_utils::log::debug;

use crate::diagnostics::{
    error::{ParseError, ParseErrorKind, ParseResult},
    expected::ExpectedItem,
};

pub(crate) struct GenFrame<'s> {
    /// The current offset of the token stream.
    offset: Cell<usize>,

    /// The span of the tree that the frame reads. When the stream of a frame
    /// is empty and it is expected to be non empty, this is the location that
    /// is reported. For example, in `f()` the arguments of `f` are read from
    /// an empty frame.
    span: ByteRange,

    /// The current token stream.
    stream: &'s [Token],
}

impl<'s> GenFrame<'s> {
    pub fn from_stream(stream: &'s [Token], span: ByteRange) -> Self {
        Self { offset: Cell::new(0), span, stream }
    }

    /// Skip `n` number of tokens.
    #[inline(always)]
    pub(crate) fn skip(&self, n: u8) {
        self.offset.set(self.offset.get() + n as usize);
    }

    /// Function to check if the token stream has been exhausted based on the
    /// current offset in the generator.
    #[inline]
    pub(crate) fn has_token(&self) -> bool {
        self.offset.get() < self.stream.len()
    }

    /// Get the current offset of where the stream is at.
    #[inline(always)]
    pub(crate) fn offset(&self) -> usize {
        self.offset.get()
    }

    /// Function to peek at the nth token ahead of the current offset.
    #[inline(always)]
    pub(crate) fn peek_nth(&self, at: usize) -> Option<&'s Token> {
        self.stream.get(self.offset.get() + at)
    }

    /// Attempt to peek one step token ahead.
    pub(crate) fn peek(&self) -> Option<&'s Token> {
        self.peek_nth(0)
    }

    /// Peek two tokens ahead.
    pub(crate) fn peek_second(&self) -> Option<&'s Token> {
        self.peek_nth(1)
    }

    /// Function that skips the next token without explicitly looking up the
    /// token in the stream and avoiding the additional computation.
    #[inline(always)]
    pub(crate) fn skip_token(&self) {
        self.offset.set(self.offset.get() + 1);
    }

    /// Function that increases the offset of the next token
    pub(crate) fn next_token(&self) -> Option<&'s Token> {
        let value = self.stream.get(self.offset.get());

        if value.is_some() {
            self.skip_token();
        }

        value
    }

    /// Get the current location from the current token, if there is no token
    /// at the current offset, then the location of the last token is used.
    pub(crate) fn current_pos(&self) -> ByteRange {
        let offset = self.offset.get().saturating_sub(1);

        match self.stream.get(offset).or_else(|| self.stream.last()) {
            Some(token) => token.span,
            None => self.span,
        }
    }

    /// Get the next location of the token, if there is no token after, we use
    /// the next character offset to determine the location.
    pub(crate) fn next_pos(&self) -> ByteRange {
        match self.peek() {
            Some(token) => token.span,
            None if self.stream.is_empty() => self.span,
            None => {
                let span = self.current_pos();
                ByteRange::new(span.end(), span.end() + 1)
            }
        }
    }
}

/// The [TemplateGen] is the parser of the template language. It reads a token
/// stream and its accompanying token trees, looking up names in [Symbols]
/// and splice tokens in the supplied values.
pub(crate) struct TemplateGen<'s> {
    /// The current frame.
    pub(crate) frame: GenFrame<'s>,

    /// Token trees that were generated from the stream.
    token_trees: &'s [Vec<Token>],

    /// Declared functions and constructors, names of these are read as
    /// symbols rather than variables.
    pub(crate) symbols: &'s Symbols,

    /// The values standing at each splice token.
    splices: &'s [Value],

    /// The error that reached furthest into the template among the
    /// alternatives that were abandoned.
    deepest: Option<ParseError>,
}

impl<'s> Deref for TemplateGen<'s> {
    type Target = GenFrame<'s>;

    fn deref(&self) -> &Self::Target {
        &self.frame
    }
}

impl<'s> TemplateGen<'s> {
    /// Create new template generator from a token stream.
    pub fn new(
        stream: &'s [Token],
        token_trees: &'s [Vec<Token>],
        symbols: &'s Symbols,
        splices: &'s [Value],
    ) -> Self {
        // We compute the `parent_span` from the given stream. If the stream has
        // no tokens, then we assume that the byte range is empty.
        let parent_span = match (stream.first(), stream.last()) {
            (Some(first), Some(last)) => first.span.join(last.span),
            _ => ByteRange::default(),
        };

        Self {
            frame: GenFrame::from_stream(stream, parent_span),
            token_trees,
            symbols,
            splices,
            deepest: None,
        }
    }

    /// Run `parse` over the whole stream of the current frame, failing if any
    /// tokens are left over. On failure, the error that reached the furthest
    /// is reported.
    pub(crate) fn parse_to_end<T>(
        &mut self,
        mut parse: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let result = parse(self).and_then(|value| match self.has_token() {
            true => self.expected_eof(),
            false => Ok(value),
        });

        result.map_err(|err| {
            let err = self.deepest_error(err);
            debug!("template parse failed: {err}");
            err
        })
    }

    /// Create new generator frame from a provided token stream and a parent
    /// span, run `parse` in it and ensure that the stream has been exhausted.
    pub fn new_frame<T>(
        &mut self,
        stream: &'s [Token],
        parent_span: ByteRange,
        mut parse: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let new_frame = GenFrame::from_stream(stream, parent_span);
        let old_frame = std::mem::replace(&mut self.frame, new_frame);
        let result = parse(self).and_then(|value| match self.has_token() {
            true => self.expected_eof(),
            false => Ok(value),
        });
        self.frame = old_frame;

        result
    }

    /// Parse the contents of the token tree delimited by `delimiter` that is
    /// the next token in the stream.
    pub(crate) fn in_tree<T>(
        &mut self,
        delimiter: Delimiter,
        error_kind: Option<ParseErrorKind>,
        parse: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        match self.peek().copied() {
            Some(Token { kind: TokenKind::Tree(inner, tree_index), span })
                if inner == delimiter =>
            {
                self.skip_token();
                let trees = self.token_trees;
                self.new_frame(&trees[tree_index as usize], span, parse)
            }
            token => self.err_with_location(
                error_kind.unwrap_or(ParseErrorKind::Expected),
                ExpectedItem::from(delimiter),
                token.map(|t| t.kind),
                token.map_or_else(|| self.next_pos(), |t| t.span),
            ),
        }
    }

    /// The tokens of the tree that `token` opens, if it is a tree.
    pub(crate) fn tree_of(&self, token: &Token) -> Option<&'s [Token]> {
        match token.kind {
            TokenKind::Tree(_, tree_index) => {
                let trees = self.token_trees;
                Some(trees[tree_index as usize].as_slice())
            }
            _ => None,
        }
    }

    /// Get the identifier spliced at `index`.
    pub(crate) fn splice_ident(&self, index: u32, span: ByteRange) -> ParseResult<Identifier> {
        match self.splices.get(index as usize).and_then(Value::as_ident) {
            Some(id) => Ok(id),
            None => self.invalid_splice(index, SpliceKind::Ident, span),
        }
    }

    /// Get the expression spliced at `index`.
    pub(crate) fn splice_expr(&self, index: u32, span: ByteRange) -> ParseResult<trees::Expr> {
        match self.splices.get(index as usize).and_then(Value::as_expr) {
            Some(expr) => Ok(expr.clone()),
            None => self.invalid_splice(index, SpliceKind::Expr, span),
        }
    }

    /// Get the type spliced at `index`.
    pub(crate) fn splice_ty(&self, index: u32, span: ByteRange) -> ParseResult<trees::Type> {
        match self.splices.get(index as usize).and_then(Value::as_type) {
            Some(ty) => Ok(ty.clone()),
            None => self.invalid_splice(index, SpliceKind::Type, span),
        }
    }

    fn invalid_splice<T>(
        &self,
        index: u32,
        expected: SpliceKind,
        span: ByteRange,
    ) -> ParseResult<T> {
        self.err_with_location(
            ParseErrorKind::InvalidSplice { index: index as usize, expected },
            ExpectedItem::empty(),
            None,
            span,
        )
    }

    /// Parse items separated by commas until the end of the current frame, a
    /// trailing comma is allowed.
    pub(crate) fn parse_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = vec![];

        while self.has_token() {
            items.push(item(self)?);

            if self.has_token() {
                self.parse_token(TokenKind::Comma)?;
            }
        }

        Ok(items)
    }

    /// Create an error without wrapping it in an [Err] variant
    #[inline(always)]
    pub(crate) fn make_err(
        &self,
        kind: ParseErrorKind,
        expected: ExpectedItem,
        received: Option<TokenKind>,
        span: Option<ByteRange>,
    ) -> ParseError {
        ParseError::new(kind, span.unwrap_or_else(|| self.current_pos()), expected, received)
    }

    /// Create an error at the given location.
    pub(crate) fn err_with_location<T>(
        &self,
        kind: ParseErrorKind,
        expected: ExpectedItem,
        received: Option<TokenKind>,
        span: ByteRange,
    ) -> ParseResult<T> {
        Err(self.make_err(kind, expected, received, Some(span)))
    }

    /// Generate an error that represents that within the current frame no
    /// more tokens should be read.
    pub(crate) fn expected_eof<T>(&self) -> ParseResult<T> {
        let received = self.peek().map(|token| token.kind);
        let pos = self.next_pos();
        self.err_with_location(ParseErrorKind::UnExpected, ExpectedItem::empty(), received, pos)
    }

    /// Generate an error representing that the current frame unexpectedly
    /// reached the end of its tokens.
    pub(crate) fn unexpected_eof<T>(&self) -> ParseResult<T> {
        let pos = self.next_pos();
        self.err_with_location(ParseErrorKind::Expected, ExpectedItem::empty(), None, pos)
    }

    /// Function to peek ahead and match some parsing function that returns a
    /// [ParseResult<T>]. If the result is an error, the function will reset
    /// the current offset of the token stream to where it was when the
    /// function was peeked, and remember the error in case it turns out to be
    /// the furthest one.
    pub(crate) fn peek_resultant_fn<T>(
        &mut self,
        mut parse_fn: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> Option<T> {
        let start = self.offset();

        match parse_fn(self) {
            Ok(result) => Some(result),
            Err(err) => {
                self.record_error(err);
                self.frame.offset.set(start);
                None
            }
        }
    }

    /// Parse a token of the given kind, failing if it is not the next token.
    pub(crate) fn parse_token(&self, atom: TokenKind) -> ParseResult<()> {
        match self.peek() {
            Some(token) if token.has_kind(atom) => {
                self.skip_token();
                Ok(())
            }
            token => self.err_with_location(
                ParseErrorKind::Expected,
                ExpectedItem::from(atom),
                token.map(|t| t.kind),
                token.map_or_else(|| self.next_pos(), |t| t.span),
            ),
        }
    }

    /// Parse a token of the given kind if it is the next token.
    pub(crate) fn parse_token_fast(&self, atom: TokenKind) -> Option<()> {
        match self.peek() {
            Some(token) if token.has_kind(atom) => {
                self.skip_token();
                Some(())
            }
            _ => None,
        }
    }

    fn record_error(&mut self, err: ParseError) {
        match &self.deepest {
            Some(deepest) if deepest.span().start() >= err.span().start() => {}
            _ => self.deepest = Some(err),
        }
    }

    /// Pick between `err` and the furthest error of an abandoned alternative.
    fn deepest_error(&mut self, err: ParseError) -> ParseError {
        match self.deepest.take() {
            Some(deepest) if deepest.span().start() > err.span().start() => deepest,
            _ => err,
        }
    }
}
