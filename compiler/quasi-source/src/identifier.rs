//! Interned names and host identifiers.
//!
//! A [Name] is the textual part of an identifier, interned globally so that it
//! is [Copy] and cheap to compare. An [Identifier] is a [Name] paired with a
//! globally unique id: two identifiers that print the same are still distinct
//! binders unless they were allocated by the same call to
//! [Identifier::fresh].
use std::{
    fmt::{Debug, Display},
    sync::atomic::{AtomicU32, Ordering},
};

use dashmap::DashMap;
use fnv::FnvBuildHasher;
use lazy_static::lazy_static;
use parking_lot::RwLock;

/// An interned string.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Name(u32);

lazy_static! {
    pub static ref NAME_MAP: NameMap = NameMap::default();
}

/// Global name table, with a reverse map for lookups by text.
#[derive(Debug, Default)]
pub struct NameMap {
    reverse: DashMap<&'static str, Name, FnvBuildHasher>,
    names: RwLock<Vec<&'static str>>,
}

impl NameMap {
    /// Intern `text`, returning the existing [Name] if it was seen before.
    pub fn create_name(&self, text: &str) -> Name {
        if let Some(name) = self.reverse.get(text) {
            return *name;
        }

        // Take the write lock before inserting so that two threads racing on
        // the same text agree on one index.
        let mut names = self.names.write();
        if let Some(name) = self.reverse.get(text) {
            return *name;
        }

        let text: &'static str = Box::leak(text.to_owned().into_boxed_str());
        let name = Name(names.len() as u32);
        names.push(text);
        self.reverse.insert(text, name);
        name
    }

    /// Get the text of an interned [Name].
    pub fn get_name(&self, name: Name) -> &'static str {
        self.names.read()[name.0 as usize]
    }
}

impl Name {
    pub fn as_str(&self) -> &'static str {
        NAME_MAP.get_name(*self)
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        NAME_MAP.create_name(text)
    }
}

impl From<String> for Name {
    fn from(text: String) -> Self {
        NAME_MAP.create_name(&text)
    }
}

impl From<Name> for &str {
    fn from(name: Name) -> Self {
        name.as_str()
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

static IDENTIFIER_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A host identifier: a bound variable, a function, an ADT sort, constructor
/// or field.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Identifier {
    name: Name,
    uid: u32,
}

impl Identifier {
    /// Allocate an identifier that is distinct from every other identifier.
    pub fn fresh(name: impl Into<Name>) -> Self {
        let uid = IDENTIFIER_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self { name: name.into(), uid }
    }

    /// Allocate a new identifier with the same name as `self`.
    pub fn freshen(&self) -> Self {
        Self::fresh(self.name)
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn uid(&self) -> u32 {
        self.uid
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Debug for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}${}", self.name, self.uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_interned() {
        let a = Name::from("alpha");
        let b = Name::from(String::from("alpha"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "alpha");
        assert_ne!(a, Name::from("beta"));
    }

    #[test]
    fn fresh_identifiers_are_distinct() {
        let x = Identifier::fresh("x");
        let y = x.freshen();
        assert_ne!(x, y);
        assert_eq!(x.name(), y.name());
        assert_eq!(x.to_string(), "x");
        assert_eq!(format!("{x:?}"), format!("x${}", x.uid()));
    }
}
