//! Quasi template lexer.
//!
//! A template is written as a sequence of text parts with host values spliced
//! in between them. The lexer reads the parts as one stream: tokens never
//! span two parts, and at every boundary it emits a single splice token (when
//! compiling, carrying the kind of the value supplied for that position) or a
//! hole token (when the template is read as a pattern).
use std::cell::Cell;

use error::{LexerError, LexerErrorKind, LexerResult};
use log::debug;
use quasi_source::location::ByteRange;
use quasi_token::{delimiter::Delimiter, keyword::ident_is_keyword, SpliceKind, Token, TokenKind};
use utils::{is_id_continue, is_id_start};

pub mod error;
mod utils;

/// Returned by the peeking functions when the current text part has been
/// consumed.
const EOF_CHAR: char = '\0';

/// What the lexer places at the boundaries between two text parts.
#[derive(Debug, Clone, Copy)]
pub enum Interpolation<'s> {
    /// Every boundary is a [TokenKind::Hole].
    Holes,
    /// Boundary `i` is a [TokenKind::Splice] of the `i`-th kind.
    Splices(&'s [SpliceKind]),
}

/// The output of the [Lexer]: the top level token stream and the token trees
/// that [TokenKind::Tree] tokens index into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub trees: Vec<Vec<Token>>,
}

/// Lex the given text parts with the given [Interpolation] between them.
pub fn lex(parts: &[&str], interpolation: Interpolation<'_>) -> LexerResult<TokenStream> {
    let mut lexer = Lexer::new(parts, interpolation);
    let tokens = lexer.tokenise()?;

    Ok(TokenStream { tokens, trees: lexer.into_token_trees() })
}

/// The [Lexer] turns the text parts of a template into [Token]s, grouping
/// delimited regions into token trees.
pub struct Lexer<'s> {
    /// Location of the lexer in the concatenated parts.
    offset: Cell<usize>,

    /// The concatenation of every text part.
    contents: String,

    /// The end offset of each text part within `contents`.
    part_ends: Vec<usize>,

    /// The part that is currently being lexed.
    part: Cell<usize>,

    interpolation: Interpolation<'s>,

    /// The closing delimiter that ended the last call to
    /// [Lexer::advance_token], so that [Lexer::eat_token_tree] can check
    /// that the tree was closed correctly.
    previous_delimiter: Cell<Option<char>>,

    /// If the current token position is within a token tree
    within_token_tree: Cell<bool>,

    /// Token trees produced when the lexer encounters delimited token
    /// streams.
    token_trees: Vec<Vec<Token>>,
}

impl<'s> Lexer<'s> {
    /// Create a new [Lexer] from the given text parts.
    pub fn new(parts: &[&str], interpolation: Interpolation<'s>) -> Self {
        let mut contents = String::new();
        let mut part_ends = Vec::with_capacity(parts.len().max(1));

        for part in parts {
            contents.push_str(part);
            part_ends.push(contents.len());
        }

        // No parts at all lexes as a single empty part.
        if part_ends.is_empty() {
            part_ends.push(0);
        }

        Lexer {
            offset: Cell::new(0),
            contents,
            part_ends,
            part: Cell::new(0),
            interpolation,
            previous_delimiter: Cell::new(None),
            within_token_tree: Cell::new(false),
            token_trees: vec![],
        }
    }

    /// Take the token trees produced by [Lexer::tokenise].
    pub fn into_token_trees(self) -> Vec<Vec<Token>> {
        self.token_trees
    }

    /// Tokenise the given input stream. Lexing stops at the first error.
    pub fn tokenise(&mut self) -> LexerResult<Vec<Token>> {
        if let Interpolation::Splices(kinds) = self.interpolation {
            let expected = self.part_ends.len() - 1;

            if kinds.len() != expected {
                return Err(LexerError::new(
                    LexerErrorKind::SpliceCount { expected, given: kinds.len() },
                    ByteRange::default(),
                ));
            }
        }

        let mut tokens = vec![];
        while let Some(token) = self.advance_token()? {
            tokens.push(token);
        }

        debug!("lexed {} tokens and {} token trees", tokens.len(), self.token_trees.len());
        Ok(tokens)
    }

    /// Returns amount of already consumed symbols.
    #[inline(always)]
    fn len_consumed(&self) -> usize {
        self.offset.get()
    }

    /// The unconsumed remainder of the current text part.
    fn as_slice(&self) -> &str {
        &self.contents[self.offset.get()..self.part_ends[self.part.get()]]
    }

    /// Peeks the next symbol from the input stream without consuming it.
    fn peek(&self) -> char {
        self.nth_char(0)
    }

    /// Peeks the second symbol from the input stream without consuming it.
    fn peek_second(&self) -> char {
        self.nth_char(1)
    }

    /// Returns nth character relative to the current position, or
    /// [EOF_CHAR] past the end of the current part.
    fn nth_char(&self, n: usize) -> char {
        self.as_slice().chars().nth(n).unwrap_or(EOF_CHAR)
    }

    /// Moves to the next character.
    fn next(&self) -> Option<char> {
        let ch = self.as_slice().chars().next()?;
        self.offset.set(self.offset.get() + ch.len_utf8());
        Some(ch)
    }

    /// Move past the next character, if there is one.
    fn skip(&self) {
        let _ = self.next();
    }

    /// Checks if the current text part has been consumed.
    fn is_part_end(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Produce the next token, `None` at the end of the template or at a
    /// closing delimiter inside a token tree.
    fn advance_token(&mut self) -> LexerResult<Option<Token>> {
        // Eat any comments or whitespace before processing the token...
        loop {
            match self.peek() {
                c if c.is_whitespace() => self.eat_while_and_discard(char::is_whitespace),
                '/' if self.peek_second() == '/' => self.line_comment(),
                _ => break,
            }
        }

        let offset = self.offset.get();

        if self.is_part_end() {
            return Ok(self.interpolate(offset));
        }

        let Some(ch) = self.next() else { return Ok(None) };

        let token_kind = match ch {
            '-' if self.peek() == '>' => {
                self.skip();
                TokenKind::ThinArrow
            }
            '=' if self.peek() == '>' => {
                self.skip();
                TokenKind::FatArrow
            }

            // One-symbol tokens
            '=' => TokenKind::Eq,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '&' => TokenKind::Amp,
            '~' => TokenKind::Tilde,
            '|' => TokenKind::Pipe,
            '!' => TokenKind::Exclamation,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,

            ch @ ('(' | '{' | '[') => {
                // `from_left` is total over the three opening characters.
                let delimiter = Delimiter::from_left(ch).unwrap_or(Delimiter::Paren);
                self.eat_token_tree(delimiter, offset)?
            }

            // We have to exit the current tree if we encounter a closing
            // delimiter, the tree checks that it is the right one.
            ch @ (')' | '}' | ']') if self.within_token_tree.get() => {
                self.previous_delimiter.set(Some(ch));
                return Ok(None);
            }
            ch @ (')' | '}' | ']') => {
                let delimiter = Delimiter::from_right(ch).unwrap_or(Delimiter::Paren);
                return Err(LexerError::new(
                    LexerErrorKind::Unopened(delimiter),
                    ByteRange::new(offset, offset + 1),
                ));
            }

            ch if is_id_start(ch) => self.ident(offset),
            '0'..='9' => self.number(offset),
            '\'' => self.char(offset)?,
            '"' => self.string(offset)?,

            ch => {
                return Err(LexerError::new(
                    LexerErrorKind::Unexpected(ch),
                    ByteRange::new(offset, offset + ch.len_utf8()),
                ))
            }
        };

        Ok(Some(Token::new(token_kind, ByteRange::new(offset, self.len_consumed()))))
    }

    /// Emit the token standing for the boundary after the current part, and
    /// move on to the next part. At the end of the final part this is the
    /// end of the stream.
    fn interpolate(&self, offset: usize) -> Option<Token> {
        let part = self.part.get();

        if part + 1 >= self.part_ends.len() {
            return None;
        }

        self.part.set(part + 1);
        let index = part as u32;

        let kind = match self.interpolation {
            Interpolation::Holes => TokenKind::Hole(index),
            Interpolation::Splices(kinds) => TokenKind::Splice(kinds[part], index),
        };

        Some(Token::new(kind, ByteRange::new(offset, offset)))
    }

    /// Recursively consume tokens until the right hand-side variant of the
    /// provided delimiter. Reaching the end of the template first is an
    /// unclosed tree.
    fn eat_token_tree(&mut self, delimiter: Delimiter, start: usize) -> LexerResult<TokenKind> {
        let mut children_tokens = vec![];

        // reset here, the previous delimiter might belong to an inner tree
        self.previous_delimiter.set(None);
        let prev_in_token_tree = self.within_token_tree.replace(true);

        while let Some(token) = self.advance_token()? {
            children_tokens.push(token);
        }

        self.within_token_tree.set(prev_in_token_tree);
        let close = self.previous_delimiter.take();

        match close {
            Some(ch) if ch == delimiter.right() => {
                self.token_trees.push(children_tokens);
                Ok(TokenKind::Tree(delimiter, (self.token_trees.len() - 1) as u32))
            }
            Some(ch) => {
                let close = Delimiter::from_right(ch).unwrap_or(delimiter);
                let offset = self.offset.get();

                Err(LexerError::new(
                    LexerErrorKind::Mismatched { open: delimiter, close },
                    ByteRange::new(offset - 1, offset),
                ))
            }
            None => Err(LexerError::new(
                LexerErrorKind::Unclosed(delimiter),
                ByteRange::new(start, start + 1),
            )),
        }
    }

    /// Consume an identifier or a keyword. The first character has already
    /// been consumed.
    fn ident(&self, start: usize) -> TokenKind {
        self.eat_while_and_discard(is_id_continue);
        let name = &self.contents[start..self.offset.get()];

        ident_is_keyword(name).map_or_else(|| TokenKind::Ident(name.into()), TokenKind::Keyword)
    }

    /// Consume an integer or decimal numeral. The first digit has already
    /// been consumed.
    fn number(&self, start: usize) -> TokenKind {
        self.eat_while_and_discard(|c| c.is_ascii_digit());

        // A dot must be followed by a digit to be part of the numeral, so
        // that `t._1` and `1.max` still lex as selections.
        if self.peek() == '.' && self.peek_second().is_ascii_digit() {
            self.skip();
            self.eat_while_and_discard(|c| c.is_ascii_digit());

            return TokenKind::Decimal(self.contents[start..self.offset.get()].into());
        }

        TokenKind::Int(self.contents[start..self.offset.get()].into())
    }

    /// Transform an escape sequence into the character it stands for. The
    /// backslash has already been consumed.
    fn char_from_escape_seq(&self) -> LexerResult<char> {
        let start = self.offset.get() - 1;

        let Some(c) = self.next() else {
            return Err(LexerError::new(
                LexerErrorKind::UnclosedStringLit,
                ByteRange::new(start, self.offset.get()),
            ));
        };

        match c {
            '0' => Ok('\0'),
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '\\' => Ok('\\'),
            '"' => Ok('"'),
            '\'' => Ok('\''),
            'u' => {
                let malformed = || {
                    LexerError::new(
                        LexerErrorKind::MalformedUnicodeLit,
                        ByteRange::new(start, self.offset.get()),
                    )
                };

                if self.peek() != '{' {
                    return Err(malformed());
                }
                self.skip();

                let digits_start = self.offset.get();
                self.eat_while_and_discard(|c| c.is_ascii_hexdigit());
                let digits = &self.contents[digits_start..self.offset.get()];

                if self.peek() != '}' || digits.is_empty() || digits.len() > 6 {
                    return Err(malformed());
                }
                self.skip();

                u32::from_str_radix(digits, 16).ok().and_then(char::from_u32).ok_or_else(malformed)
            }
            ch => Err(LexerError::new(
                LexerErrorKind::UnknownEscapeSequence(ch),
                ByteRange::new(start, self.offset.get()),
            )),
        }
    }

    /// Consume a character literal, the opening quote has already been
    /// consumed.
    fn char(&self, start: usize) -> LexerResult<TokenKind> {
        let ch = match self.next() {
            None => {
                return Err(LexerError::new(
                    LexerErrorKind::UnclosedCharLit,
                    ByteRange::new(start, self.offset.get()),
                ))
            }
            Some('\'') => {
                return Err(LexerError::new(
                    LexerErrorKind::EmptyCharLit,
                    ByteRange::new(start, self.offset.get()),
                ))
            }
            Some('\\') => self.char_from_escape_seq()?,
            Some(ch) => ch,
        };

        match self.peek() {
            '\'' => {
                self.skip();
                Ok(TokenKind::Char(ch))
            }
            EOF_CHAR if self.is_part_end() => Err(LexerError::new(
                LexerErrorKind::UnclosedCharLit,
                ByteRange::new(start, self.offset.get()),
            )),
            _ => {
                // highlight the whole literal up to the closing quote
                self.eat_while_and_discard(|c| c != '\'' && !c.is_whitespace());
                Err(LexerError::new(
                    LexerErrorKind::MultipleCharCodePoints,
                    ByteRange::new(start, self.offset.get()),
                ))
            }
        }
    }

    /// Consume a string literal, the opening quote has already been
    /// consumed.
    fn string(&self, start: usize) -> LexerResult<TokenKind> {
        let mut value = String::new();

        while let Some(c) = self.next() {
            match c {
                '"' => return Ok(TokenKind::Str(value.into())),
                '\\' => value.push(self.char_from_escape_seq()?),
                ch => value.push(ch),
            }
        }

        Err(LexerError::new(
            LexerErrorKind::UnclosedStringLit,
            ByteRange::new(start, self.offset.get()),
        ))
    }

    /// Consume a line comment, eating characters up to the next `\n` or the
    /// end of the current part.
    fn line_comment(&self) {
        debug_assert!(self.peek() == '/' && self.peek_second() == '/');
        self.eat_while_and_discard(|c| c != '\n');
    }

    /// Eat while the condition holds, discarding the characters.
    fn eat_while_and_discard(&self, mut condition: impl FnMut(char) -> bool) {
        let mut offset = self.offset.get();

        for ch in self.as_slice().chars() {
            if !condition(ch) {
                break;
            }
            offset += ch.len_utf8();
        }

        self.offset.set(offset);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quasi_source::identifier::Name;
    use quasi_token::keyword::Keyword;

    use super::*;

    fn kinds(stream: &TokenStream) -> Vec<TokenKind> {
        stream.tokens.iter().map(|token| token.kind).collect()
    }

    #[test]
    fn lex_operators_and_arrows() {
        let stream = lex(&["a ==> b -> c => d != e"], Interpolation::Holes).unwrap();
        let ident = |s: &str| TokenKind::Ident(Name::from(s));

        assert_eq!(
            kinds(&stream),
            vec![
                ident("a"),
                TokenKind::Eq,
                TokenKind::FatArrow,
                ident("b"),
                TokenKind::ThinArrow,
                ident("c"),
                TokenKind::FatArrow,
                ident("d"),
                TokenKind::Exclamation,
                TokenKind::Eq,
                ident("e"),
            ]
        );
    }

    #[test]
    fn lex_numerals_and_selections() {
        let stream = lex(&["1.5 + t._1 + 42"], Interpolation::Holes).unwrap();

        assert_eq!(
            kinds(&stream),
            vec![
                TokenKind::Decimal(Name::from("1.5")),
                TokenKind::Plus,
                TokenKind::Ident(Name::from("t")),
                TokenKind::Dot,
                TokenKind::Ident(Name::from("_1")),
                TokenKind::Plus,
                TokenKind::Int(Name::from("42")),
            ]
        );
    }

    #[test]
    fn lex_keywords_literals_and_comments() {
        let stream =
            lex(&["forall x. x // the rest is ignored\n 'a' \"b\\n\""], Interpolation::Holes)
                .unwrap();

        assert_eq!(
            kinds(&stream),
            vec![
                TokenKind::Keyword(Keyword::Forall),
                TokenKind::Ident(Name::from("x")),
                TokenKind::Dot,
                TokenKind::Ident(Name::from("x")),
                TokenKind::Char('a'),
                TokenKind::Str(Name::from("b\n")),
            ]
        );
    }

    #[test]
    fn holes_between_parts() {
        let stream = lex(&["", " + f(", ")"], Interpolation::Holes).unwrap();

        assert_eq!(stream.tokens.len(), 4);
        assert_eq!(stream.tokens[0].kind, TokenKind::Hole(0));
        assert_eq!(stream.tokens[0].span, ByteRange::new(0, 0));
        assert_eq!(stream.trees, vec![vec![Token::new(TokenKind::Hole(1), ByteRange::new(5, 5))]]);
    }

    #[test]
    fn splices_carry_their_kind() {
        let kinds_in = [SpliceKind::Ident, SpliceKind::Type];
        let stream = lex(&["lambda ", ": ", ". 1"], Interpolation::Splices(&kinds_in)).unwrap();

        assert_eq!(
            kinds(&stream),
            vec![
                TokenKind::Keyword(Keyword::Lambda),
                TokenKind::Splice(SpliceKind::Ident, 0),
                TokenKind::Colon,
                TokenKind::Splice(SpliceKind::Type, 1),
                TokenKind::Dot,
                TokenKind::Int(Name::from("1")),
            ]
        );
    }

    #[test]
    fn tokens_do_not_span_parts() {
        let stream = lex(&["ab", "cd"], Interpolation::Holes).unwrap();

        assert_eq!(
            kinds(&stream),
            vec![
                TokenKind::Ident(Name::from("ab")),
                TokenKind::Hole(0),
                TokenKind::Ident(Name::from("cd")),
            ]
        );
    }

    #[test]
    fn nested_token_trees() {
        let stream = lex(&["{| f(x) -> 1 |}"], Interpolation::Holes).unwrap();

        assert_eq!(kinds(&stream), vec![TokenKind::Tree(Delimiter::Brace, 1)]);
        assert_eq!(stream.trees[0].len(), 1);
        assert_eq!(stream.trees[1][0].kind, TokenKind::Pipe);
        assert_eq!(stream.trees[1][2].kind, TokenKind::Tree(Delimiter::Paren, 0));
    }

    #[test]
    fn delimiter_errors() {
        let err = lex(&["f(x"], Interpolation::Holes).unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::Unclosed(Delimiter::Paren));
        assert_eq!(err.span, ByteRange::new(1, 2));

        let err = lex(&["(x]"], Interpolation::Holes).unwrap_err();
        assert_eq!(
            err.kind,
            LexerErrorKind::Mismatched { open: Delimiter::Paren, close: Delimiter::Bracket }
        );

        let err = lex(&["x)"], Interpolation::Holes).unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::Unopened(Delimiter::Paren));
    }

    #[test]
    fn literal_errors() {
        let err = lex(&["\"abc", "\""], Interpolation::Holes).unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::UnclosedStringLit);

        let err = lex(&["'ab'"], Interpolation::Holes).unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::MultipleCharCodePoints);

        let err = lex(&["'\\q'"], Interpolation::Holes).unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::UnknownEscapeSequence('q'));

        let err = lex(&["x # y"], Interpolation::Holes).unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::Unexpected('#'));
        assert_eq!(err.to_string(), "encountered unexpected character `#` at 2:3");
    }

    #[test]
    fn splice_count_must_fit() {
        let err = lex(&["a", "b"], Interpolation::Splices(&[])).unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::SpliceCount { expected: 1, given: 0 });
    }

    #[test]
    fn unicode_escapes() {
        let stream = lex(&["'\\u{41}'"], Interpolation::Holes).unwrap();
        assert_eq!(kinds(&stream), vec![TokenKind::Char('A')]);
    }
}
