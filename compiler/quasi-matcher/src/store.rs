//! The binder table that is threaded through matching.
use std::{fmt, sync::Arc};

use bimap::BiMap;
use quasi_source::identifier::{Identifier, Name};
use quasi_template::Ident;

/// How a template refers to a binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    Name(Name),
    /// A spliced host identifier used as a binder.
    Ident(Identifier),
    /// A binder position that is a hole.
    Hole(usize),
}

impl From<Ident> for TemplateName {
    fn from(ident: Ident) -> Self {
        match ident {
            Ident::Name(name) => TemplateName::Name(name),
            Ident::Embedded(id) => TemplateName::Ident(id),
            Ident::Hole(index) => TemplateName::Hole(index),
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateName::Name(name) => write!(f, "{name}"),
            TemplateName::Ident(id) => write!(f, "{id}"),
            TemplateName::Hole(index) => write!(f, "${index}"),
        }
    }
}

/// A bijection between host identifiers and the template names they were
/// bound to. Adding a pair drops every earlier pair that shares either half
/// of it.
///
/// Stores are persistent: [Store::add] leaves every other handle to the
/// same table untouched, the table is only copied when it is shared.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pairs: Arc<BiMap<Identifier, TemplateName>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `id` with `name`.
    pub fn add(mut self, id: Identifier, name: TemplateName) -> Self {
        Arc::make_mut(&mut self.pairs).insert(id, name);
        self
    }

    /// The template name that `id` is bound to.
    pub fn name_of(&self, id: Identifier) -> Option<TemplateName> {
        self.pairs.get_by_left(&id).copied()
    }

    /// The host identifier bound to `name`.
    pub fn ident_of(&self, name: TemplateName) -> Option<Identifier> {
        self.pairs.get_by_right(&name).copied()
    }

    /// Every pair in the store.
    pub fn iter(&self) -> impl Iterator<Item = (Identifier, TemplateName)> + '_ {
        self.pairs.iter().map(|(id, name)| (*id, *name))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn adding_replaces_both_halves() {
        let x = Identifier::fresh("x");
        let y = Identifier::fresh("y");
        let a = TemplateName::Name(Name::from("a"));
        let b = TemplateName::Name(Name::from("b"));

        let store = Store::new().add(x, a).add(y, b);
        assert_eq!(store.name_of(x), Some(a));
        assert_eq!(store.ident_of(b), Some(y));

        // `y` takes over `a`, dropping `x -> a` and `y -> b`
        let store = store.add(y, a);
        assert_eq!(store.len(), 1);
        assert_eq!(store.name_of(x), None);
        assert_eq!(store.ident_of(a), Some(y));
        assert_eq!(store.ident_of(b), None);
    }

    #[test]
    fn stores_are_persistent() {
        let x = Identifier::fresh("x");
        let name = TemplateName::Hole(0);

        let outer = Store::new();
        let inner = outer.clone().add(x, name);

        assert!(outer.is_empty());
        assert_eq!(inner.name_of(x), Some(name));
        assert_eq!(TemplateName::from(Ident::name("v")).to_string(), "v");
    }
}
