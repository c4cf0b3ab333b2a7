//! Quasi template parser error utilities.
use std::fmt;

use derive_more::Constructor;
use quasi_source::location::ByteRange;
use quasi_token::{SpliceKind, TokenKind};

use super::expected::ExpectedItem;

/// Utility wrapper type for [ParseError] in [Result]
pub type ParseResult<T> = Result<T, ParseError>;

/// A [ParseError] represents possible errors that occur when transforming the
/// token stream into a template.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct ParseError {
    /// The kind of the error.
    kind: ParseErrorKind,
    /// Location of where the error references
    span: ByteRange,
    /// The tokens that would have been accepted at this location.
    expected: ExpectedItem,
    /// An optional token in question that was received but shouldn't have
    /// been.
    received: Option<TokenKind>,
}

impl ParseError {
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn span(&self) -> ByteRange {
        self.span
    }

    pub fn expected(&self) -> ExpectedItem {
        self.expected
    }

    pub fn received(&self) -> Option<TokenKind> {
        self.received
    }
}

/// Enum representation of the template parser error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Generic error specifying an expected token atom.
    Expected,
    /// Expected an expression.
    ExpectedExpr,
    /// Expected a binder, an identifier or an identifier splice.
    ExpectedName,
    /// Expected a type at the current location.
    ExpectedType,
    /// Expected the name of a declared constructor.
    ExpectedSymbol,
    /// After a dot, the parser expects a field name.
    ExpectedField,
    /// A map literal without a `* -> default` entry.
    ExpectedMapDefault,
    /// A map literal with more than one default entry.
    DuplicateMapDefault,
    /// A brace literal that mixes set elements and map entries.
    MixedCollection,
    /// `choose` binds exactly one identifier.
    ChooseArity(usize),
    /// A splice token whose value is missing or of another kind.
    InvalidSplice { index: usize, expected: SpliceKind },
    /// Tokens are left over after a complete template.
    UnExpected,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Expected => write!(f, "unexpected token"),
            ParseErrorKind::ExpectedExpr => write!(f, "expected an expression"),
            ParseErrorKind::ExpectedName => write!(f, "expected a binder name"),
            ParseErrorKind::ExpectedType => write!(f, "expected a type"),
            ParseErrorKind::ExpectedSymbol => write!(f, "expected a symbol"),
            ParseErrorKind::ExpectedField => write!(f, "expected a field name after `.`"),
            ParseErrorKind::ExpectedMapDefault => {
                write!(f, "expected a default entry `* -> value` in the map literal")
            }
            ParseErrorKind::DuplicateMapDefault => {
                write!(f, "a map literal has a single default entry")
            }
            ParseErrorKind::MixedCollection => {
                write!(f, "set elements and map entries cannot be mixed")
            }
            ParseErrorKind::ChooseArity(given) => {
                write!(f, "`choose` binds exactly one identifier, however {given} were given")
            }
            ParseErrorKind::InvalidSplice { index, expected } => {
                write!(f, "expected the value spliced at #{index} to be a {expected}")
            }
            ParseErrorKind::UnExpected => write!(f, "expected the end of the template"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `Expected` errors are phrased from the received token.
        match (&self.kind, &self.received) {
            (ParseErrorKind::Expected, Some(kind)) => {
                write!(f, "unexpectedly encountered {}", kind.as_error_string())?
            }
            (ParseErrorKind::Expected, None) => write!(f, "unexpectedly reached the end of input")?,
            (kind, Some(received)) => {
                write!(f, "{kind}, however received {}", received.as_error_string())?
            }
            (kind, None) => write!(f, "{kind}")?,
        }

        write!(f, " at {}", self.span)?;

        if !self.expected.is_empty() {
            write!(f, ", consider adding {}", self.expected)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
