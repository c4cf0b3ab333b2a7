//! Type templates.
use std::fmt;

use itertools::Itertools;
use quasi_source::identifier::{Identifier, Name};
use quasi_trees as trees;

/// A type as written in a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A placeholder for the `i`-th spliced or matched type.
    Hole(usize),
    /// A type name, `Boolean`, `Int32` or the name of a sort.
    Name(Name),
    /// A spliced host type.
    Embedded(trees::Type),
    /// A spliced host identifier naming a sort or a type parameter.
    EmbeddedIdent(Identifier),
    /// A type constructor applied to arguments, `Map[K, V]`. The constructor
    /// is a [Type::Name] or a [Type::EmbeddedIdent].
    Application(Box<Type>, Vec<Type>),
    /// A parenthesised list in front of `=>`, the parameters of a function
    /// type.
    Group(Vec<Type>),
    Tuple(Vec<Type>),
    Arrow(Box<Type>, Box<Type>),
}

impl Type {
    pub fn name(name: &str) -> Self {
        Type::Name(Name::from(name))
    }

    pub fn arrow(from: Type, to: Type) -> Self {
        Type::Arrow(Box::new(from), Box::new(to))
    }

    pub fn app(cons: Type, args: Vec<Type>) -> Self {
        Type::Application(Box::new(cons), args)
    }

    /// Collect the hole indices in the type, left to right.
    pub fn holes(&self) -> Vec<usize> {
        let mut holes = vec![];
        self.collect_holes(&mut holes);
        holes
    }

    pub(crate) fn collect_holes(&self, holes: &mut Vec<usize>) {
        match self {
            Type::Hole(index) => holes.push(*index),
            Type::Name(_) | Type::Embedded(_) | Type::EmbeddedIdent(_) => {}
            Type::Application(cons, args) => {
                cons.collect_holes(holes);
                args.iter().for_each(|arg| arg.collect_holes(holes));
            }
            Type::Group(members) | Type::Tuple(members) => {
                members.iter().for_each(|member| member.collect_holes(holes))
            }
            Type::Arrow(from, to) => {
                from.collect_holes(holes);
                to.collect_holes(holes);
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Hole(index) => write!(f, "${index}"),
            Type::Name(name) => write!(f, "{name}"),
            Type::Embedded(ty) => write!(f, "{ty}"),
            Type::EmbeddedIdent(id) => write!(f, "{id}"),
            Type::Application(cons, args) => write!(f, "{cons}[{}]", args.iter().join(", ")),
            Type::Group(members) | Type::Tuple(members) => {
                write!(f, "({})", members.iter().join(", "))
            }
            Type::Arrow(from, to) => write!(f, "{from} => {to}"),
        }
    }
}
