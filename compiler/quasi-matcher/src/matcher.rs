//! The matching operations shared by expressions and types.
use derive_more::Constructor;
use quasi_source::identifier::Identifier;
use quasi_template::{resolve::TypeResolver, Expr, Ident, Type, Value};
use quasi_trees::{self as trees, Symbols};
use quasi_utils::log::trace;

use crate::{matches::Match, store::Store};

/// A successful match of one node: the store as left by the node, and the
/// values bound by the holes inside it.
#[derive(Debug, Clone, Constructor)]
pub struct Matched {
    pub store: Store,
    pub holes: Match,
}

/// The result of matching a node, [None] if it does not match.
pub type MatchResult = Option<Matched>;

impl Matched {
    /// Create a successful match that binds no holes.
    pub fn ok(store: Store) -> MatchResult {
        Some(Matched::new(store, Match::empty()))
    }

    /// Create a successful match that binds the hole `index` to `value`.
    pub fn hole(store: Store, index: usize, value: impl Into<Value>) -> MatchResult {
        trace!("hole #{index} is bound");
        Some(Matched::new(store, Match::single(index, value)))
    }

    /// Add the holes bound by an earlier sibling.
    pub fn with_holes(self, holes: Match) -> Self {
        Self { store: self.store, holes: holes.union(self.holes) }
    }
}

/// A host node paired with the template it is matched against.
#[derive(Debug)]
pub(crate) enum Pairing<'t> {
    Expr(&'t trees::Expr, &'t Expr),
    Type(&'t trees::Type, &'t Type),
    /// A missing template type accepts any type.
    OptType(&'t trees::Type, Option<&'t Type>),
    /// A host field or constructor identifier against a template identifier.
    Ident(Identifier, Ident),
    Seq(Vec<Pairing<'t>>),
}

impl<'t> Pairing<'t> {
    /// Pair up expressions, only if there are as many templates as
    /// expressions.
    pub(crate) fn exprs(exprs: &'t [trees::Expr], templates: &'t [Expr]) -> Option<Self> {
        (exprs.len() == templates.len()).then(|| {
            Pairing::Seq(exprs.iter().zip(templates).map(|(e, t)| Pairing::Expr(e, t)).collect())
        })
    }

    /// Pair up types, only if there are as many templates as types.
    pub(crate) fn types(tys: &'t [trees::Type], templates: &'t [Type]) -> Option<Self> {
        (tys.len() == templates.len()).then(|| {
            Pairing::Seq(tys.iter().zip(templates).map(|(ty, t)| Pairing::Type(ty, t)).collect())
        })
    }

    pub(crate) fn none() -> Self {
        Pairing::Seq(vec![])
    }
}

/// Matches host expressions and types against templates.
///
/// The symbol table and the type resolver are only read.
#[derive(Debug, Clone, Copy, Constructor)]
pub struct Matcher<'s> {
    pub(crate) symbols: &'s Symbols,
    pub(crate) resolver: &'s TypeResolver,
}

impl<'s> Matcher<'s> {
    /// Match `expr` against `template` in an empty scope, returning the
    /// values bound by the holes of the template.
    pub fn matches(&self, expr: &trees::Expr, template: &Expr) -> Option<Match> {
        self.match_expr(expr, template, Store::new()).map(|matched| matched.holes)
    }

    /// Match the type `ty` against a type template.
    pub fn matches_type(&self, ty: &trees::Type, template: &Type) -> Option<Match> {
        self.match_ty(ty, template, Store::new()).map(|matched| matched.holes)
    }

    /// Match every pairing in order. The store is threaded from each pairing
    /// to the next, the first failure fails the whole sequence.
    pub(crate) fn extract<'t>(
        &self,
        pairings: impl IntoIterator<Item = Pairing<'t>>,
        store: Store,
    ) -> MatchResult {
        pairings.into_iter().try_fold(
            Matched::new(store, Match::empty()),
            |Matched { store, holes }, pairing| {
                let matched = self.match_pairing(pairing, store)?;
                Some(matched.with_holes(holes))
            },
        )
    }

    fn match_pairing(&self, pairing: Pairing<'_>, store: Store) -> MatchResult {
        match pairing {
            Pairing::Expr(expr, template) => self.match_expr(expr, template, store),
            Pairing::Type(ty, template) => self.match_ty(ty, template, store),
            Pairing::OptType(_, None) => Matched::ok(store),
            Pairing::OptType(ty, Some(template)) => self.match_ty(ty, template, store),
            Pairing::Ident(id, ident) => self.match_ident(id, ident, store),
            Pairing::Seq(pairings) => self.extract(pairings, store),
        }
    }

    /// Match the identifier of a field or constructor. Names only need to
    /// agree textually, the host identifier was found by name when the
    /// template was compiled.
    fn match_ident(&self, id: Identifier, ident: Ident, store: Store) -> MatchResult {
        match ident {
            Ident::Name(name) if id.name() == name => Matched::ok(store),
            Ident::Embedded(embedded) if embedded == id => Matched::ok(store),
            Ident::Hole(index) => Matched::hole(store, index, id),
            _ => None,
        }
    }

    /// Bring the host binder `id` into scope as the template binder
    /// `binder`. A binder that is a hole is also bound by the match.
    pub(crate) fn bind(&self, id: Identifier, binder: Ident, matched: Matched) -> Matched {
        trace!("binding `{id:?}` to `{binder}`");

        let Matched { store, holes } = matched;
        let holes = match binder {
            Ident::Hole(index) => holes.union(Match::single(index, id)),
            _ => holes,
        };

        Matched::new(store.add(id, binder.into()), holes)
    }
}
