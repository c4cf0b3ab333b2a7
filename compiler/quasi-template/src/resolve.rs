//! Resolution of type templates to host types.
use std::fmt;

use fxhash::FxHashMap;
use itertools::Itertools;
use log::debug;
use quasi_source::identifier::{Identifier, Name};
use quasi_trees::{self as trees, Symbols};

use crate::{ty::Type, value::Value};

/// An error found while resolving a type template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A name that is neither a basic type nor a declared sort.
    UnknownType(Name),
    /// A type constructor applied to the wrong number of arguments.
    ArityMismatch { cons: String, expected: usize, given: usize },
    /// A template that does not denote a type, such as a group outside of an
    /// arrow or an unfilled hole.
    InvalidTypeShape(Type),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnknownType(name) => write!(f, "unknown type `{name}`"),
            ResolveError::ArityMismatch { cons, expected, given } => write!(
                f,
                "type constructor `{cons}` expects {expected} type arguments, but {given} were given"
            ),
            ResolveError::InvalidTypeShape(ty) => write!(f, "`{ty}` is not a valid type"),
        }
    }
}

/// Every error found while resolving one type template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveErrors(pub Vec<ResolveError>);

impl fmt::Display for ResolveErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

impl std::error::Error for ResolveErrors {}

/// The key of a type constructor: the textual name or the identifier of a
/// sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ConsKey {
    Name(Name),
    Ident(Identifier),
}

/// How a type constructor builds a type from its arguments.
#[derive(Debug, Clone, Copy)]
enum Builder {
    Set,
    Bag,
    Map,
    Sort(Identifier),
}

#[derive(Debug, Clone, Copy)]
struct TypeCons {
    arity: usize,
    builder: Builder,
}

impl TypeCons {
    fn build(&self, mut args: Vec<trees::Type>) -> trees::Type {
        match self.builder {
            Builder::Set => trees::Type::set(args.remove(0)),
            Builder::Bag => trees::Type::bag(args.remove(0)),
            Builder::Map => {
                let value = args.remove(1);
                trees::Type::map(args.remove(0), value)
            }
            Builder::Sort(id) => trees::Type::Adt { id, tps: args },
        }
    }
}

/// Resolves [Type] templates to host types, using the built-in containers
/// and every sort declared in a [Symbols] table.
#[derive(Debug, Clone)]
pub struct TypeResolver {
    constructors: FxHashMap<ConsKey, TypeCons>,
}

impl TypeResolver {
    pub fn new(symbols: &Symbols) -> Self {
        let mut constructors = FxHashMap::default();

        for (name, arity, builder) in
            [("Set", 1, Builder::Set), ("Bag", 1, Builder::Bag), ("Map", 2, Builder::Map)]
        {
            constructors.insert(ConsKey::Name(Name::from(name)), TypeCons { arity, builder });
        }

        for sort in symbols.sorts() {
            let cons = TypeCons { arity: sort.tparams.len(), builder: Builder::Sort(sort.id) };

            constructors.entry(ConsKey::Name(sort.id.name())).or_insert(cons);
            constructors.insert(ConsKey::Ident(sort.id), cons);
        }

        Self { constructors }
    }

    /// Resolve a type template without holes.
    pub fn resolve(&self, ty: &Type) -> Result<trees::Type, ResolveErrors> {
        self.resolve_with(ty, &[])
    }

    /// Resolve a type template, filling holes with the spliced types in
    /// `values`.
    pub fn resolve_with(&self, ty: &Type, values: &[Value]) -> Result<trees::Type, ResolveErrors> {
        let mut errors = vec![];

        match self.resolve_into(ty, values, &mut errors) {
            Some(resolved) if errors.is_empty() => Ok(resolved),
            _ => {
                debug!("failed to resolve type `{ty}`: {} errors", errors.len());
                Err(ResolveErrors(errors))
            }
        }
    }

    /// Resolve one of the names in the basic type table: `Boolean`,
    /// `BigInt`, `Char`, `Int`, `Real`, `String`, `Unit` and `Int<n>` for
    /// any positive width `n`.
    pub fn basic_type(name: &str) -> Option<trees::Type> {
        let ty = match name {
            "Boolean" => trees::Type::Boolean,
            "BigInt" => trees::Type::Integer,
            "Char" => trees::Type::Char,
            "Int" => trees::Type::INT32,
            "Real" => trees::Type::Real,
            "String" => trees::Type::String,
            "Unit" => trees::Type::Unit,
            _ => {
                let size = name.strip_prefix("Int")?;

                // leading zeros and signs are not part of a width
                if size.starts_with('0') || !size.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }

                match size.parse::<u32>() {
                    Ok(size) if size > 0 => trees::Type::BV { signed: true, size },
                    _ => return None,
                }
            }
        };

        Some(ty)
    }

    /// Resolve a name to a basic type or a sort without type parameters.
    pub fn resolve_name(&self, name: Name) -> Result<trees::Type, ResolveError> {
        if let Some(ty) = Self::basic_type(name.as_str()) {
            return Ok(ty);
        }

        match self.constructors.get(&ConsKey::Name(name)) {
            Some(cons) if cons.arity == 0 => Ok(cons.build(vec![])),
            Some(cons) => Err(ResolveError::ArityMismatch {
                cons: name.to_string(),
                expected: cons.arity,
                given: 0,
            }),
            None => Err(ResolveError::UnknownType(name)),
        }
    }

    /// The sort that a type constructor name refers to, if it is not one of
    /// the built-in containers.
    pub fn sort_named(&self, name: Name) -> Option<Identifier> {
        match self.constructors.get(&ConsKey::Name(name))?.builder {
            Builder::Sort(id) => Some(id),
            Builder::Set | Builder::Bag | Builder::Map => None,
        }
    }

    fn resolve_into(
        &self,
        ty: &Type,
        values: &[Value],
        errors: &mut Vec<ResolveError>,
    ) -> Option<trees::Type> {
        match ty {
            Type::Embedded(ty) => Some(ty.clone()),
            Type::Hole(index) => match values.get(*index).and_then(Value::as_type) {
                Some(ty) => Some(ty.clone()),
                None => {
                    errors.push(ResolveError::InvalidTypeShape(ty.clone()));
                    None
                }
            },
            Type::Name(name) => match self.resolve_name(*name) {
                Ok(ty) => Some(ty),
                Err(err) => {
                    errors.push(err);
                    None
                }
            },
            // A spliced identifier that is not a sort stands for a type
            // parameter.
            Type::EmbeddedIdent(id) => match self.constructors.get(&ConsKey::Ident(*id)) {
                Some(cons) if cons.arity == 0 => Some(cons.build(vec![])),
                Some(cons) => {
                    errors.push(ResolveError::ArityMismatch {
                        cons: id.to_string(),
                        expected: cons.arity,
                        given: 0,
                    });
                    None
                }
                None => Some(trees::Type::Parameter(*id)),
            },
            Type::Application(cons, args) => {
                let (key, cons_name) = match cons.as_ref() {
                    Type::Name(name) => (ConsKey::Name(*name), name.to_string()),
                    Type::EmbeddedIdent(id) => (ConsKey::Ident(*id), id.to_string()),
                    _ => {
                        errors.push(ResolveError::InvalidTypeShape(ty.clone()));
                        return None;
                    }
                };

                // resolve every argument first so that their errors are
                // reported alongside the constructor's
                let args = self.resolve_all(args, values, errors);

                let Some(type_cons) = self.constructors.get(&key) else {
                    errors.push(match key {
                        ConsKey::Name(name) => ResolveError::UnknownType(name),
                        ConsKey::Ident(_) => ResolveError::InvalidTypeShape(ty.clone()),
                    });
                    return None;
                };

                let args = args?;
                if args.len() != type_cons.arity {
                    errors.push(ResolveError::ArityMismatch {
                        cons: cons_name,
                        expected: type_cons.arity,
                        given: args.len(),
                    });
                    return None;
                }

                Some(type_cons.build(args))
            }
            Type::Tuple(members) if members.len() >= 2 => {
                self.resolve_all(members, values, errors).map(trees::Type::Tuple)
            }
            Type::Arrow(from, to) => {
                let from = match from.as_ref() {
                    Type::Group(froms) => self.resolve_all(froms, values, errors),
                    from => self.resolve_into(from, values, errors).map(|from| vec![from]),
                };
                let to = self.resolve_into(to, values, errors);

                Some(trees::Type::function(from?, to?))
            }
            Type::Group(_) | Type::Tuple(_) => {
                errors.push(ResolveError::InvalidTypeShape(ty.clone()));
                None
            }
        }
    }

    /// Resolve every type, reporting the errors of each one.
    fn resolve_all(
        &self,
        tys: &[Type],
        values: &[Value],
        errors: &mut Vec<ResolveError>,
    ) -> Option<Vec<trees::Type>> {
        let resolved = tys.iter().map(|ty| self.resolve_into(ty, values, errors)).collect_vec();
        resolved.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quasi_trees::AdtConstructor;

    use super::*;

    fn list_symbols() -> (Symbols, Identifier) {
        let t = Identifier::fresh("T");
        let list = Identifier::fresh("List");
        let nil = Identifier::fresh("Nil");
        let mut symbols = Symbols::new();
        let nil = AdtConstructor { id: nil, sort: list, fields: vec![] };
        symbols.add_sort(list, vec![t], vec![nil]);
        (symbols, list)
    }

    #[test]
    fn resolve_basic_types() {
        let resolver = TypeResolver::new(&Symbols::new());

        assert_eq!(resolver.resolve(&Type::name("Int")), Ok(trees::Type::INT32));
        assert_eq!(resolver.resolve(&Type::name("BigInt")), Ok(trees::Type::Integer));
        assert_eq!(
            resolver.resolve(&Type::name("Int8")),
            Ok(trees::Type::BV { signed: true, size: 8 })
        );
        assert_eq!(
            resolver.resolve(&Type::name("Int0")),
            Err(ResolveErrors(vec![ResolveError::UnknownType(Name::from("Int0"))]))
        );
    }

    #[test]
    fn resolve_constructors() {
        let (symbols, list) = list_symbols();
        let resolver = TypeResolver::new(&symbols);

        let set = Type::app(Type::name("Set"), vec![Type::name("Char")]);
        let ty = Type::app(Type::name("List"), vec![set]);
        assert_eq!(
            resolver.resolve(&ty),
            Ok(trees::Type::Adt { id: list, tps: vec![trees::Type::set(trees::Type::Char)] })
        );

        let ty = Type::app(Type::EmbeddedIdent(list), vec![Type::name("Real")]);
        assert_eq!(
            resolver.resolve(&ty),
            Ok(trees::Type::Adt { id: list, tps: vec![trees::Type::Real] })
        );

        assert_eq!(resolver.sort_named(Name::from("List")), Some(list));
        assert_eq!(resolver.sort_named(Name::from("Set")), None);
    }

    #[test]
    fn resolve_functions_and_tuples() {
        let resolver = TypeResolver::new(&Symbols::new());

        let ty = Type::arrow(
            Type::Group(vec![Type::name("Int"), Type::name("Char")]),
            Type::Tuple(vec![Type::name("Unit"), Type::name("Boolean")]),
        );
        assert_eq!(
            resolver.resolve(&ty),
            Ok(trees::Type::function(
                vec![trees::Type::INT32, trees::Type::Char],
                trees::Type::Tuple(vec![trees::Type::Unit, trees::Type::Boolean])
            ))
        );

        let ty = Type::arrow(Type::name("Int"), Type::name("Int"));
        assert_eq!(
            resolver.resolve(&ty),
            Ok(trees::Type::function(vec![trees::Type::INT32], trees::Type::INT32))
        );
    }

    #[test]
    fn errors_are_accumulated() {
        let (symbols, _) = list_symbols();
        let resolver = TypeResolver::new(&symbols);

        let ty = Type::Tuple(vec![
            Type::app(Type::name("Map"), vec![Type::name("Foo")]),
            Type::name("List"),
            Type::Group(vec![]),
            Type::Hole(0),
        ]);

        assert_eq!(
            resolver.resolve(&ty),
            Err(ResolveErrors(vec![
                ResolveError::UnknownType(Name::from("Foo")),
                ResolveError::ArityMismatch { cons: "List".to_string(), expected: 1, given: 0 },
                ResolveError::InvalidTypeShape(Type::Group(vec![])),
                ResolveError::InvalidTypeShape(Type::Hole(0)),
            ]))
        );
    }

    #[test]
    fn holes_are_filled_from_values() {
        let resolver = TypeResolver::new(&Symbols::new());
        let ty = Type::app(Type::name("Set"), vec![Type::Hole(0)]);

        assert_eq!(
            resolver.resolve_with(&ty, &[Value::Type(trees::Type::Char)]),
            Ok(trees::Type::set(trees::Type::Char))
        );
    }
}
