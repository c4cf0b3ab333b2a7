//! Lexer error data types.
use std::fmt;

use derive_more::Constructor;
use quasi_source::location::ByteRange;
use quasi_token::delimiter::Delimiter;

/// Utility type that wraps a [Result] and a [LexerError]
pub type LexerResult<T> = Result<T, LexerError>;

/// A [LexerError] represents an error encountered during tokenisation: the
/// [LexerErrorKind] which classifies the error, and the [ByteRange] where
/// it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct LexerError {
    pub kind: LexerErrorKind,
    pub span: ByteRange,
}

/// The kind of a [LexerError].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexerErrorKind {
    /// A character that cannot begin any token.
    Unexpected(char),

    /// A token tree that reached the end of the template without being
    /// closed.
    Unclosed(Delimiter),

    /// A token tree closed with the wrong delimiter, e.g. `(a]`.
    Mismatched { open: Delimiter, close: Delimiter },

    /// A closing delimiter without a matching opening one.
    Unopened(Delimiter),

    /// A string literal that is not closed before the end of its text part.
    UnclosedStringLit,

    /// A character literal that is not closed before the end of its text
    /// part.
    UnclosedCharLit,

    /// `''`
    EmptyCharLit,

    /// A character literal with more than one code point, e.g. `'ab'`.
    MultipleCharCodePoints,

    /// An escape sequence that is not recognised, e.g. `'\z'`.
    UnknownEscapeSequence(char),

    /// A `\u{...}` escape which is not well formed or is not a valid code
    /// point.
    MalformedUnicodeLit,

    /// The number of splice kinds supplied does not fit between the text
    /// parts.
    SpliceCount { expected: usize, given: usize },
}

impl fmt::Display for LexerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerErrorKind::Unexpected(ch) => write!(f, "encountered unexpected character `{ch}`"),
            LexerErrorKind::Unclosed(delim) => write!(f, "unclosed `{}` delimiter", delim.left()),
            LexerErrorKind::Mismatched { open, close } => write!(
                f,
                "mismatched delimiter, expected `{}` but found `{}`",
                open.right(),
                close.right()
            ),
            LexerErrorKind::Unopened(delim) => {
                write!(f, "unexpected closing delimiter `{}`", delim.right())
            }
            LexerErrorKind::UnclosedStringLit => write!(f, "unclosed string literal"),
            LexerErrorKind::UnclosedCharLit => write!(f, "unclosed character literal"),
            LexerErrorKind::EmptyCharLit => write!(f, "empty character literal"),
            LexerErrorKind::MultipleCharCodePoints => {
                write!(f, "character literal can only contain one codepoint")
            }
            LexerErrorKind::UnknownEscapeSequence(ch) => {
                write!(f, "unrecognised character escape sequence `{ch}`")
            }
            LexerErrorKind::MalformedUnicodeLit => write!(f, "malformed unicode escape sequence"),
            LexerErrorKind::SpliceCount { expected, given } => {
                write!(f, "expected {expected} spliced values between the text parts, but got {given}")
            }
        }
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for LexerError {}
