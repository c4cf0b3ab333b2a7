//! Quasi: quasiquoted templates over the host syntax tree.
//!
//! A template is written as text parts with host values in between them.
//! [Quote] reads templates in two ways. With [Quote::parse_expr] the values
//! are spliced into the template, which can then be compiled into a host
//! tree. With [Quote::pattern] every position between two parts is a hole,
//! and the resulting template is matched against host trees to extract the
//! nodes standing at the holes.
pub mod error;
pub mod settings;

use error::QuoteResult;
use itertools::Itertools;
use log::debug;
use quasi_lexer::{lex, Interpolation, TokenStream};
use quasi_template::{compile::Compiler, resolve::TypeResolver};
use quasi_trees::{self as trees, Symbols};
use settings::QuoteSettings;

pub use error::QuoteError;
pub use quasi_matcher::Match;
pub use quasi_template::{Expr, Type, Value};

/// Reads, compiles and matches templates against one symbol table.
#[derive(Debug, Clone)]
pub struct Quote<'s> {
    symbols: &'s Symbols,
    resolver: TypeResolver,
    settings: QuoteSettings,
}

impl<'s> Quote<'s> {
    pub fn new(symbols: &'s Symbols) -> Self {
        Self::with_settings(symbols, QuoteSettings::default())
    }

    pub fn with_settings(symbols: &'s Symbols, settings: QuoteSettings) -> Self {
        Self { symbols, resolver: TypeResolver::new(symbols), settings }
    }

    pub fn settings(&self) -> QuoteSettings {
        self.settings
    }

    pub fn symbols(&self) -> &'s Symbols {
        self.symbols
    }

    /// Lex the text parts, the `i`-th splice token standing for
    /// `splices[i]`.
    fn lex_spliced(parts: &[&str], splices: &[Value]) -> QuoteResult<TokenStream> {
        let kinds = splices.iter().map(Value::kind).collect_vec();
        Ok(lex(parts, Interpolation::Splices(&kinds))?)
    }

    /// Read an expression template with `splices` placed between the text
    /// parts.
    pub fn parse_expr(&self, parts: &[&str], splices: &[Value]) -> QuoteResult<Expr> {
        let stream = Self::lex_spliced(parts, splices)?;
        let template = quasi_parser::parse_expr(&stream, self.symbols, splices)?;

        debug!("read expression template `{template}`");
        Ok(template)
    }

    /// Read a type template with `splices` placed between the text parts.
    pub fn parse_type(&self, parts: &[&str], splices: &[Value]) -> QuoteResult<Type> {
        let stream = Self::lex_spliced(parts, splices)?;
        let template = quasi_parser::parse_type(&stream, self.symbols, splices)?;

        debug!("read type template `{template}`");
        Ok(template)
    }

    /// Read an expression template with a hole between every two text
    /// parts. The holes are numbered from left to right.
    pub fn pattern(&self, parts: &[&str]) -> QuoteResult<Expr> {
        let stream = lex(parts, Interpolation::Holes)?;
        let template = quasi_parser::parse_expr(&stream, self.symbols, &[])?;

        debug!("read expression pattern `{template}`");
        Ok(template)
    }

    /// Read a type template with a hole between every two text parts.
    pub fn type_pattern(&self, parts: &[&str]) -> QuoteResult<Type> {
        let stream = lex(parts, Interpolation::Holes)?;
        let template = quasi_parser::parse_type(&stream, self.symbols, &[])?;

        debug!("read type pattern `{template}`");
        Ok(template)
    }

    /// Resolve a type template that has no holes.
    pub fn resolve(&self, template: &Type) -> QuoteResult<trees::Type> {
        Ok(self.resolver.resolve(template)?)
    }

    fn compiler<'a>(&'a self, values: &'a [Value]) -> Compiler<'a> {
        Compiler::new(self.symbols, &self.resolver, values)
            .allow_free_names(self.settings.allow_free_names)
    }

    /// Compile an expression template into a host expression, the hole `i`
    /// is filled with `values[i]`.
    pub fn compile(&self, template: &Expr, values: &[Value]) -> QuoteResult<trees::Expr> {
        Ok(self.compiler(values).compile_expr(template)?)
    }

    /// Compile a type template into a host type.
    pub fn compile_type(&self, template: &Type, values: &[Value]) -> QuoteResult<trees::Type> {
        Ok(self.compiler(values).compile_type(template)?)
    }

    fn matcher(&self) -> quasi_matcher::Matcher<'_> {
        quasi_matcher::Matcher::new(self.symbols, &self.resolver)
    }

    /// Match a host expression against a template.
    pub fn matches(&self, expr: &trees::Expr, template: &Expr) -> Option<Match> {
        self.matcher().matches(expr, template)
    }

    /// Match a host type against a type template.
    pub fn matches_type(&self, ty: &trees::Type, template: &Type) -> Option<Match> {
        self.matcher().matches_type(ty, template)
    }
}

#[cfg(test)]
mod tests;
