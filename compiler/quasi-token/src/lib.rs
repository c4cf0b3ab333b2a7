//! Quasi token definitions that are produced by the lexer and consumed by the
//! template parser.
pub mod delimiter;
pub mod keyword;

use std::fmt;

use delimiter::Delimiter;
use keyword::Keyword;
use quasi_source::{identifier::Name, location::ByteRange};

/// The smallest code unit of a template: a [TokenKind] and the [ByteRange]
/// of the source it was read from.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub span: ByteRange,
}

impl Token {
    pub fn new(kind: TokenKind, span: ByteRange) -> Self {
        Token { kind, span }
    }

    /// Check if the token has the specified token kind.
    pub fn has_kind(&self, right: TokenKind) -> bool {
        self.kind == right
    }

    /// Check if the token is a tree opened by a brace.
    pub fn is_brace_tree(&self) -> bool {
        matches!(self.kind, TokenKind::Tree(Delimiter::Brace, _))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

/// The kind of host value spliced into a template at a given position.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SpliceKind {
    /// A raw host identifier.
    Ident,
    /// A raw host expression.
    Expr,
    /// A raw host type.
    Type,
}

impl fmt::Display for SpliceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpliceKind::Ident => write!(f, "identifier"),
            SpliceKind::Expr => write!(f, "expression"),
            SpliceKind::Type => write!(f, "type"),
        }
    }
}

/// All variants of a token that can appear in a template.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum TokenKind {
    /// '='
    Eq,
    /// '<'
    Lt,
    /// '>'
    Gt,
    /// '+'
    Plus,
    /// '-'
    Minus,
    /// '*'
    Star,
    /// '/'
    Slash,
    /// '%'
    Percent,
    /// '^'
    Caret,
    /// '&'
    Amp,
    /// '~'
    Tilde,
    /// '|'
    Pipe,
    /// '!'
    Exclamation,
    /// '.'
    Dot,
    /// ':'
    Colon,
    /// ','
    Comma,
    /// A thin arrow `->`
    ThinArrow,
    /// A fat arrow `=>`
    FatArrow,
    /// Integer numeral, kept as text since it has arbitrary precision.
    Int(Name),
    /// Decimal numeral such as `1.5`, kept as text.
    Decimal(Name),
    /// Character literal.
    Char(char),
    /// String literal.
    Str(Name),
    /// Identifier.
    Ident(Name),
    /// Keyword.
    Keyword(Keyword),
    /// A delimited token tree, the index points into the token trees that the
    /// lexer produced alongside the stream.
    Tree(Delimiter, u32),
    /// A host value spliced into the template, the index points into the
    /// caller supplied splice list.
    Splice(SpliceKind, u32),
    /// A positional placeholder, used when a template is read as a pattern.
    Hole(u32),
}

impl TokenKind {
    /// Check if the [TokenKind] is a primitive literal.
    pub fn is_lit(&self) -> bool {
        matches!(
            self,
            TokenKind::Keyword(Keyword::False)
                | TokenKind::Keyword(Keyword::True)
                | TokenKind::Int(_)
                | TokenKind::Decimal(_)
                | TokenKind::Char(_)
                | TokenKind::Str(_)
        )
    }

    /// Create an error message fragment naming this token.
    pub fn as_error_string(&self) -> String {
        match self {
            TokenKind::Char(ch) => format!("the character `{ch:?}`"),
            TokenKind::Str(str) => format!("the string `{str:?}`"),
            TokenKind::Keyword(kwd) => format!("the keyword `{kwd}`"),
            TokenKind::Ident(ident) => format!("the identifier `{ident}`"),
            TokenKind::Splice(kind, index) => format!("a spliced {kind} (#{index})"),
            TokenKind::Hole(index) => format!("the hole #{index}"),
            kind => format!("a `{kind}`"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eq => write!(f, "="),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::Amp => write!(f, "&"),
            TokenKind::Tilde => write!(f, "~"),
            TokenKind::Pipe => write!(f, "|"),
            TokenKind::Exclamation => write!(f, "!"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::ThinArrow => write!(f, "->"),
            TokenKind::FatArrow => write!(f, "=>"),
            TokenKind::Int(text) | TokenKind::Decimal(text) => write!(f, "{text}"),
            TokenKind::Char(ch) => write!(f, "{ch:?}"),
            TokenKind::Str(str) => write!(f, "{:?}", str.as_str()),
            TokenKind::Ident(ident) => write!(f, "{ident}"),
            TokenKind::Keyword(kwd) => write!(f, "{kwd}"),
            TokenKind::Tree(delim, _) => write!(f, "{}...{}", delim.left(), delim.right()),
            TokenKind::Splice(_, index) | TokenKind::Hole(index) => write!(f, "${index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_strings_name_the_token() {
        assert_eq!(TokenKind::Ident(Name::from("x")).as_error_string(), "the identifier `x`");
        assert_eq!(TokenKind::FatArrow.as_error_string(), "a `=>`");
        assert_eq!(
            TokenKind::Splice(SpliceKind::Type, 2).as_error_string(),
            "a spliced type (#2)"
        );
    }
}
