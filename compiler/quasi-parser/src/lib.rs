//! Quasi template parser. Turns a lexed template into the template IR of
//! `quasi-template`. Names of declared functions and constructors are read
//! as symbols, splice tokens are replaced by the host values standing at
//! their position, and hole tokens become template holes.
pub mod diagnostics;
mod parser;

use diagnostics::error::ParseResult;
use parser::TemplateGen;
use quasi_lexer::TokenStream;
use quasi_template::{Expr, Type, Value};
use quasi_trees::Symbols;

/// Parse an expression template from the lexed `stream`. The `i`-th splice
/// token stands for `splices[i]`.
pub fn parse_expr(stream: &TokenStream, symbols: &Symbols, splices: &[Value]) -> ParseResult<Expr> {
    let mut generator = TemplateGen::new(&stream.tokens, &stream.trees, symbols, splices);
    generator.parse_to_end(|g| g.parse_expr())
}

/// Parse a type template from the lexed `stream`.
pub fn parse_type(stream: &TokenStream, symbols: &Symbols, splices: &[Value]) -> ParseResult<Type> {
    let mut generator = TemplateGen::new(&stream.tokens, &stream.trees, symbols, splices);
    generator.parse_to_end(|g| g.parse_ty())
}
