//! Host types.
use std::fmt;

use itertools::Itertools;
use quasi_source::identifier::Identifier;

/// A host type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The type of a binder whose type was not given.
    Untyped,
    Boolean,
    Unit,
    Char,
    /// Arbitrary precision integers.
    Integer,
    Real,
    String,
    /// A bit-vector of the given width.
    BV { signed: bool, size: u32 },
    Tuple(Vec<Type>),
    Function { from: Vec<Type>, to: Box<Type> },
    Set(Box<Type>),
    Bag(Box<Type>),
    Map(Box<Type>, Box<Type>),
    /// An algebraic data type: the sort identifier and its type arguments.
    Adt { id: Identifier, tps: Vec<Type> },
    /// A type parameter of a function or a sort.
    Parameter(Identifier),
}

impl Type {
    /// The default machine integer, a signed 32-bit bit-vector.
    pub const INT32: Type = Type::BV { signed: true, size: 32 };

    pub fn set(elem: Type) -> Self {
        Type::Set(Box::new(elem))
    }

    pub fn bag(elem: Type) -> Self {
        Type::Bag(Box::new(elem))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(Box::new(key), Box::new(value))
    }

    pub fn function(from: Vec<Type>, to: Type) -> Self {
        Type::Function { from, to: Box::new(to) }
    }

    /// Replace type parameters by the types they are mapped to. Parameters
    /// without a mapping are left untouched.
    pub fn instantiate(&self, subst: &[(Identifier, Type)]) -> Type {
        let go = |ty: &Type| ty.instantiate(subst);

        match self {
            Type::Parameter(id) => subst
                .iter()
                .find_map(|(param, ty)| (param == id).then(|| ty.clone()))
                .unwrap_or_else(|| self.clone()),
            Type::Tuple(members) => Type::Tuple(members.iter().map(go).collect()),
            Type::Function { from, to } => Type::function(from.iter().map(go).collect(), go(to)),
            Type::Set(elem) => Type::set(go(elem)),
            Type::Bag(elem) => Type::bag(go(elem)),
            Type::Map(key, value) => Type::map(go(key), go(value)),
            Type::Adt { id, tps } => Type::Adt { id: *id, tps: tps.iter().map(go).collect() },
            _ => self.clone(),
        }
    }

    /// Whether the type mentions no type parameter.
    pub fn is_ground(&self) -> bool {
        match self {
            Type::Parameter(_) => false,
            Type::Tuple(members) => members.iter().all(Type::is_ground),
            Type::Function { from, to } => from.iter().all(Type::is_ground) && to.is_ground(),
            Type::Set(elem) | Type::Bag(elem) => elem.is_ground(),
            Type::Map(key, value) => key.is_ground() && value.is_ground(),
            Type::Adt { tps, .. } => tps.iter().all(Type::is_ground),
            _ => true,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Untyped => write!(f, "<untyped>"),
            Type::Boolean => write!(f, "Boolean"),
            Type::Unit => write!(f, "Unit"),
            Type::Char => write!(f, "Char"),
            Type::Integer => write!(f, "BigInt"),
            Type::Real => write!(f, "Real"),
            Type::String => write!(f, "String"),
            Type::BV { signed: true, size } => write!(f, "Int{size}"),
            Type::BV { signed: false, size } => write!(f, "UInt{size}"),
            Type::Tuple(members) => write!(f, "({})", members.iter().join(", ")),
            Type::Function { from, to } => match from.as_slice() {
                [single] if !matches!(single, Type::Function { .. }) => {
                    write!(f, "{single} => {to}")
                }
                _ => write!(f, "({}) => {to}", from.iter().join(", ")),
            },
            Type::Set(elem) => write!(f, "Set[{elem}]"),
            Type::Bag(elem) => write!(f, "Bag[{elem}]"),
            Type::Map(key, value) => write!(f, "Map[{key}, {value}]"),
            Type::Adt { id, tps } if tps.is_empty() => write!(f, "{id}"),
            Type::Adt { id, tps } => write!(f, "{id}[{}]", tps.iter().join(", ")),
            Type::Parameter(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn display_types() {
        let ty = Type::function(vec![Type::INT32, Type::set(Type::Integer)], Type::Boolean);
        assert_eq!(ty.to_string(), "(Int32, Set[BigInt]) => Boolean");
        assert_eq!(Type::function(vec![Type::Char], Type::Unit).to_string(), "Char => Unit");
        assert_eq!(Type::map(Type::String, Type::Real).to_string(), "Map[String, Real]");
    }

    #[test]
    fn instantiate_parameters() {
        let t = Identifier::fresh("T");
        let list = Identifier::fresh("List");
        let ty = Type::Adt { id: list, tps: vec![Type::set(Type::Parameter(t))] };

        assert_eq!(
            ty.instantiate(&[(t, Type::Char)]),
            Type::Adt { id: list, tps: vec![Type::set(Type::Char)] }
        );
        assert!(!ty.is_ground());
        assert!(ty.instantiate(&[(t, Type::Char)]).is_ground());
    }
}
