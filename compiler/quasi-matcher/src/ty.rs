//! Matching host types against type templates.
use std::slice;

use quasi_source::identifier::Name;
use quasi_template::Type;
use quasi_trees as trees;
use quasi_utils::log::trace;

use crate::{
    matcher::{MatchResult, Matched, Matcher, Pairing},
    store::Store,
};

/// Check that a constructor template is the built-in container `name`.
fn is_container(cons: &Type, name: &str) -> bool {
    matches!(cons, Type::Name(cons) if cons.as_str() == name)
}

impl<'s> Matcher<'s> {
    /// Match the host type `ty` against `template`.
    pub fn match_ty(&self, ty: &trees::Type, template: &Type, store: Store) -> MatchResult {
        use trees::Type as T;

        trace!("matching type `{ty}` against `{template}`");

        match (ty, template) {
            (_, Type::Hole(index)) => Matched::hole(store, *index, ty.clone()),
            (_, Type::Embedded(embedded)) if ty == embedded => Matched::ok(store),
            (_, Type::Name(name)) if self.names_type(*name, ty) => Matched::ok(store),
            (T::Parameter(id), Type::EmbeddedIdent(embedded)) if id == embedded => {
                Matched::ok(store)
            }
            (T::Adt { id, tps }, Type::EmbeddedIdent(embedded))
                if id == embedded && tps.is_empty() =>
            {
                Matched::ok(store)
            }
            (T::Set(elem), Type::Application(cons, args)) if is_container(cons, "Set") => {
                self.extract([Pairing::types(slice::from_ref(elem.as_ref()), args)?], store)
            }
            (T::Bag(elem), Type::Application(cons, args)) if is_container(cons, "Bag") => {
                self.extract([Pairing::types(slice::from_ref(elem.as_ref()), args)?], store)
            }
            (T::Map(key, value), Type::Application(cons, args)) if is_container(cons, "Map") => {
                let [key_template, value_template] = args.as_slice() else { return None };
                self.extract(
                    [Pairing::Type(key, key_template), Pairing::Type(value, value_template)],
                    store,
                )
            }
            (T::Adt { id, tps }, Type::Application(cons, args)) => {
                let names_sort = match cons.as_ref() {
                    Type::Name(name) => self.resolver.sort_named(*name) == Some(*id),
                    Type::EmbeddedIdent(embedded) => embedded == id,
                    _ => false,
                };

                if !names_sort {
                    return None;
                }

                self.extract([Pairing::types(tps, args)?], store)
            }
            (T::Tuple(members), Type::Tuple(templates)) => {
                self.extract([Pairing::types(members, templates)?], store)
            }
            (T::Function { from, to }, Type::Arrow(from_template, to_template)) => {
                // a group lists the parameters, anything else is the only one
                let from = match (from.as_slice(), from_template.as_ref()) {
                    (_, Type::Group(templates)) => Pairing::types(from, templates)?,
                    ([param], template) => Pairing::Type(param, template),
                    _ => return None,
                };

                self.extract([from, Pairing::Type(to, to_template)], store)
            }
            _ => None,
        }
    }

    /// Check that a type name denotes `ty`: a basic type, a sort without
    /// type parameters, or a type parameter called `name`.
    fn names_type(&self, name: Name, ty: &trees::Type) -> bool {
        match self.resolver.resolve_name(name) {
            Ok(resolved) => resolved == *ty,
            Err(_) => matches!(ty, trees::Type::Parameter(id) if id.name() == name),
        }
    }
}
