//! Errors that can occur when a template is read, resolved or compiled.
use std::fmt;

use derive_more::From;
use quasi_lexer::error::LexerError;
use quasi_parser::diagnostics::error::ParseError;
use quasi_template::{compile::CompileErrors, resolve::ResolveErrors};

/// Utility type that wraps a [Result] and a [QuoteError].
pub type QuoteResult<T> = Result<T, QuoteError>;

/// An error from any of the stages a template goes through.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum QuoteError {
    /// The text parts of the template could not be tokenised.
    Lex(LexerError),

    /// The token stream is not a well formed template.
    Parse(ParseError),

    /// A type template names an unknown type or is malformed.
    Resolve(ResolveErrors),

    /// The template could not be compiled into a host tree.
    Compile(CompileErrors),
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::Lex(error) => write!(f, "{error}"),
            QuoteError::Parse(error) => write!(f, "{error}"),
            QuoteError::Resolve(errors) => write!(f, "{errors}"),
            QuoteError::Compile(errors) => write!(f, "{errors}"),
        }
    }
}

impl std::error::Error for QuoteError {}
