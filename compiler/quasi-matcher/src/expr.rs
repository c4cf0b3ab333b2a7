//! Matching host expressions against expression templates.
use std::slice;

use quasi_source::identifier::Identifier;
use quasi_template::{Binding, Expr, Ident, LetBinding, LitTemplate, OpName, Type};
use quasi_trees::{self as trees, Operator, ValDef};
use quasi_utils::{
    log::trace,
    smallvec::{smallvec, SmallVec},
};

use crate::{
    matcher::{MatchResult, Matched, Matcher, Pairing},
    store::{Store, TemplateName},
};

/// Split the explicit type arguments off a template, `{a, b}[T]`.
fn type_arguments(template: &Expr) -> (&Expr, Option<&[Type]>) {
    match template {
        Expr::TypeApplication(inner, tys) => (inner.as_ref(), Some(tys.as_slice())),
        _ => (template, None),
    }
}

/// The element types of a set or bag, or the key and value types of a map.
fn element_types(ty: &trees::Type) -> SmallVec<[trees::Type; 2]> {
    match ty {
        trees::Type::Set(elem) | trees::Type::Bag(elem) => smallvec![elem.as_ref().clone()],
        trees::Type::Map(key, value) => smallvec![key.as_ref().clone(), value.as_ref().clone()],
        _ => SmallVec::new(),
    }
}

/// Pair the element types of a collection with the type arguments of a
/// template. A map with a single type argument only constrains its values.
fn pair_element_types<'t>(
    elements: &'t [trees::Type],
    templates: Option<&'t [Type]>,
) -> Option<Pairing<'t>> {
    match (elements, templates) {
        (_, None) => Some(Pairing::none()),
        ([_, value], Some([template])) => Some(Pairing::Type(value, template)),
        (elements, Some(templates)) => Pairing::types(elements, templates),
    }
}

impl<'s> Matcher<'s> {
    /// Match the host expression `expr` against `template`, under the
    /// binders in `store`.
    pub fn match_expr(&self, expr: &trees::Expr, template: &Expr, store: Store) -> MatchResult {
        use quasi_template::Quantifier::*;
        use trees::Expr as E;

        trace!("matching against `{template}`");

        match (expr, template) {
            (_, Expr::Hole(index)) => Matched::hole(store, *index, expr.clone()),
            (_, Expr::Literal(LitTemplate::EmbeddedExpr(embedded))) => {
                if expr == embedded {
                    Matched::ok(store)
                } else {
                    None
                }
            }
            (_, Expr::Annotated(inner, annotation)) => {
                let ty = expr.get_type(self.symbols);
                self.extract([Pairing::Type(&ty, annotation), Pairing::Expr(expr, inner)], store)
            }
            (E::Variable(vd), Expr::Variable(ident)) => self.match_variable(vd.id, *ident, store),
            (E::Variable(vd), Expr::Literal(LitTemplate::EmbeddedIdent(id))) => {
                self.match_variable(vd.id, Ident::Embedded(*id), store)
            }
            (E::Literal(lit), _) => self.match_lit(lit, template, store),
            (E::Let { binder, value, body }, Expr::Let(bindings, template_body)) => {
                self.match_let(binder, value, body, bindings, template_body, store)
            }
            (E::Lambda { params, body }, Expr::Abstraction(Lambda, bindings, inner))
            | (E::Forall { params, body }, Expr::Abstraction(Forall, bindings, inner))
            | (E::Exists { params, body }, Expr::Abstraction(Exists, bindings, inner)) => {
                self.match_abstraction(params, body, bindings, inner, store)
            }
            (E::Choose { binder, pred }, Expr::Abstraction(Choose, bindings, inner)) => {
                self.match_abstraction(slice::from_ref(binder), pred, bindings, inner, store)
            }
            (E::Application { callee, args }, Expr::Application(callee_template, templates)) => {
                let args = Pairing::exprs(args, templates)?;
                self.extract([Pairing::Expr(callee, callee_template), args], store)
            }
            (E::FunctionInvocation { id, tps, args } | E::Adt { id, tps, args }, _) => {
                self.match_invocation(*id, tps, args, template, store)
            }
            (E::AdtSelector { adt, selector }, Expr::Selection(receiver, field)) => self.extract(
                [Pairing::Expr(adt, receiver), Pairing::Ident(*selector, *field)],
                store,
            ),
            (E::IsConstructor { expr, id }, Expr::Operation(OpName::Is, args)) => {
                let [inner, cons] = args.as_slice() else { return None };
                let cons = match cons {
                    Expr::Variable(ident) => *ident,
                    Expr::Literal(LitTemplate::Name(name)) => Ident::Name(*name),
                    Expr::Literal(LitTemplate::EmbeddedIdent(id)) => Ident::Embedded(*id),
                    _ => return None,
                };

                self.extract([Pairing::Expr(expr, inner), Pairing::Ident(*id, cons)], store)
            }
            (E::IfExpr { cond, then, otherwise }, Expr::Operation(OpName::IfThenElse, args)) => {
                let [cond_template, then_template, otherwise_template] = args.as_slice() else {
                    return None;
                };

                self.extract(
                    [
                        Pairing::Expr(cond, cond_template),
                        Pairing::Expr(then, then_template),
                        Pairing::Expr(otherwise, otherwise_template),
                    ],
                    store,
                )
            }
            (E::Tuple(members), Expr::Operation(OpName::Tuple, templates)) => {
                self.extract([Pairing::exprs(members, templates)?], store)
            }
            (E::TupleSelect { tuple, index }, Expr::Selection(receiver, Ident::Name(field)))
                if field.as_str() == format!("_{index}") =>
            {
                self.match_expr(tuple, receiver, store)
            }
            (E::Operation { op, args }, _) => self.match_operation(*op, args, template, store),
            (E::FiniteSet { elements, base }, _) => {
                let (inner, tys) = type_arguments(template);
                let Expr::Operation(OpName::Set, templates) = inner else { return None };
                let tys = pair_element_types(slice::from_ref(base), tys)?;

                self.extract([Pairing::exprs(elements, templates)?, tys], store)
            }
            (E::FiniteBag { elements, base }, _) => {
                let (inner, tys) = type_arguments(template);
                let Expr::Operation(OpName::Bag, templates) = inner else { return None };
                let tys = pair_element_types(slice::from_ref(base), tys)?;

                self.extract([Pairing::Seq(pairs(elements, templates)?), tys], store)
            }
            (E::FiniteMap { pairs: entries, default, key, value }, _) => {
                let (inner, tys) = type_arguments(template);
                let Expr::Operation(OpName::Map, templates) = inner else { return None };
                let Some((default_template, templates)) = templates.split_first() else {
                    return None;
                };

                let tys = match tys {
                    None => Pairing::none(),
                    Some([value_template]) => Pairing::Type(value, value_template),
                    Some([key_template, value_template]) => Pairing::Seq(vec![
                        Pairing::Type(key, key_template),
                        Pairing::Type(value, value_template),
                    ]),
                    Some(_) => return None,
                };

                self.extract(
                    [
                        Pairing::Expr(default, default_template),
                        Pairing::Seq(pairs(entries, templates)?),
                        tys,
                    ],
                    store,
                )
            }
            _ => None,
        }
    }

    /// Match a reference to a variable. A template name that is bound in the
    /// store must refer to the host binder it is paired with. Otherwise the
    /// variable is free on both sides and the pair is added to the store, so
    /// that every later use of either one must refer to the other.
    fn match_variable(&self, id: Identifier, ident: Ident, store: Store) -> MatchResult {
        if let Ident::Hole(_) = ident {
            return None;
        }

        let name = TemplateName::from(ident);

        match (store.name_of(id), store.ident_of(name)) {
            (Some(bound_name), Some(bound_id)) if bound_name == name && bound_id == id => {
                Matched::ok(store)
            }
            // a spliced identifier only stands for itself
            (None, None) if matches!(ident, Ident::Embedded(embedded) if embedded != id) => None,
            (None, None) => {
                trace!("free variable `{id:?}` is paired with `{name}`");
                Matched::ok(store.add(id, name))
            }
            _ => None,
        }
    }

    /// Match a `let` binding by binding. The value is matched outside of the
    /// scope of its binder, the remaining bindings and the body inside it.
    fn match_let(
        &self,
        binder: &ValDef,
        value: &trees::Expr,
        body: &trees::Expr,
        bindings: &[LetBinding],
        template_body: &Expr,
        store: Store,
    ) -> MatchResult {
        let (first, rest) = bindings.split_first()?;

        let matched = self.extract(
            [Pairing::OptType(&binder.ty, first.ty.as_ref()), Pairing::Expr(value, &first.value)],
            store,
        )?;
        let outer = matched.store.clone();
        let Matched { store: scope, holes } = self.bind(binder.id, first.binder, matched);

        let body = match (rest, body) {
            ([], _) => self.match_expr(body, template_body, scope.clone())?,
            (rest, trees::Expr::Let { binder, value, body }) => {
                self.match_let(binder, value, body, rest, template_body, scope.clone())?
            }
            _ => return None,
        };

        let store = leave_scope(outer, &scope, body.store);
        Some(Matched::new(store, holes.union(body.holes)))
    }

    /// Match a lambda, a quantifier or a `choose`. The types of all binders
    /// are matched first, then all binders are brought into scope for the
    /// body.
    fn match_abstraction(
        &self,
        params: &[ValDef],
        body: &trees::Expr,
        bindings: &[Binding],
        template_body: &Expr,
        store: Store,
    ) -> MatchResult {
        if params.len() != bindings.len() {
            return None;
        }

        let tys = params
            .iter()
            .zip(bindings)
            .map(|(param, binding)| Pairing::OptType(&param.ty, binding.ty.as_ref()));
        let matched = self.extract(tys, store)?;
        let outer = matched.store.clone();

        let Matched { store: scope, holes } =
            params.iter().zip(bindings).fold(matched, |matched, (param, binding)| {
                self.bind(param.id, binding.binder, matched)
            });

        let body = self.match_expr(body, template_body, scope.clone())?;
        let store = leave_scope(outer, &scope, body.store);
        Some(Matched::new(store, holes.union(body.holes)))
    }

    /// Check that a template names the declared function or constructor
    /// `id`.
    fn names_symbol(&self, template: &Expr, id: Identifier) -> bool {
        match template {
            Expr::Literal(LitTemplate::Name(name)) => {
                let symbol = self
                    .symbols
                    .lookup_function(*name)
                    .map(|fd| fd.id)
                    .or_else(|| self.symbols.lookup_constructor(*name).map(|cons| cons.id));

                symbol == Some(id)
            }
            Expr::Literal(LitTemplate::EmbeddedIdent(embedded)) => *embedded == id,
            _ => false,
        }
    }

    /// Match an invocation of a declared function or constructor. Without
    /// arguments, the template may be the bare symbol. Type arguments are
    /// only matched when the template gives them.
    fn match_invocation(
        &self,
        id: Identifier,
        tps: &[trees::Type],
        args: &[trees::Expr],
        template: &Expr,
        store: Store,
    ) -> MatchResult {
        let (callee, templates) = match template {
            Expr::Application(callee, templates) => (callee.as_ref(), templates.as_slice()),
            _ => (template, &[][..]),
        };

        let (callee, tys) = type_arguments(callee);
        if !self.names_symbol(callee, id) {
            return None;
        }

        let tys = match tys {
            Some(tys) => Pairing::types(tps, tys)?,
            None => Pairing::none(),
        };

        self.extract([tys, Pairing::exprs(args, templates)?], store)
    }

    /// Match a primitive operation. Operations on sets, bags and maps may
    /// carry the element types of their collection as type arguments.
    fn match_operation(
        &self,
        op: Operator,
        args: &[trees::Expr],
        template: &Expr,
        store: Store,
    ) -> MatchResult {
        let (inner, tys) = type_arguments(template);
        let Expr::Operation(OpName::Prim(template_op), templates) = inner else { return None };

        if op != *template_op {
            return None;
        }

        // type arguments name the element types of the collection operand
        let elements = match tys {
            Some(_) => element_types(&args.get(op.collection_operand()?)?.get_type(self.symbols)),
            None => SmallVec::new(),
        };

        let tys = pair_element_types(&elements, tys)?;
        self.extract([Pairing::exprs(args, templates)?, tys], store)
    }
}

/// Leave the scope of a binder form. The binders are dropped, variables that
/// were first met inside the scope stay paired for the rest of the match.
fn leave_scope(outer: Store, scope: &Store, inner: Store) -> Store {
    inner
        .iter()
        .filter(|(id, name)| scope.name_of(*id) != Some(*name))
        .fold(outer, |store, (id, name)| store.add(id, name))
}

/// Pair the `(element, count)` or `(key, value)` entries of a bag or map
/// with tuple templates.
fn pairs<'t>(
    entries: &'t [(trees::Expr, trees::Expr)],
    templates: &'t [Expr],
) -> Option<Vec<Pairing<'t>>> {
    if entries.len() != templates.len() {
        return None;
    }

    entries
        .iter()
        .zip(templates)
        .map(|((first, second), template)| match template {
            Expr::Operation(OpName::Tuple, members) => match members.as_slice() {
                [first_template, second_template] => Some(Pairing::Seq(vec![
                    Pairing::Expr(first, first_template),
                    Pairing::Expr(second, second_template),
                ])),
                _ => None,
            },
            _ => None,
        })
        .collect()
}
