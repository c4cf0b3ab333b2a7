//! Quasi structural matcher. Matches host trees against templates, binding
//! the holes of the template to the host nodes standing at their position.
//!
//! Binders are matched up to renaming: a host binder is paired with the
//! template binder in a [Store] before its scope is matched, and every
//! variable in that scope must respect the pairing.
mod expr;
mod lit;
pub mod matcher;
pub mod matches;
pub mod store;
mod ty;

pub use matcher::{MatchResult, Matched, Matcher};
pub use matches::Match;
pub use store::{Store, TemplateName};

#[cfg(test)]
mod tests;
