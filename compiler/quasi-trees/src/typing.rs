//! Computing the type of a host expression.
//!
//! This is not a type checker: the type is read off the tree assuming it is
//! well formed, and [Type::Untyped] is produced wherever the tree does not
//! determine one.
use quasi_source::identifier::Identifier;

use crate::{expr::Expr, ops::Operator, symbols::Symbols, ty::Type};

impl Expr {
    /// Get the type of the expression.
    pub fn get_type(&self, symbols: &Symbols) -> Type {
        let ty = |expr: &Expr| expr.get_type(symbols);

        match self {
            Expr::Variable(binder) => binder.ty.clone(),
            Expr::Literal(lit) => lit.ty(),
            Expr::Let { body, .. } => ty(body),
            Expr::Lambda { params, body } => {
                Type::function(params.iter().map(|param| param.ty.clone()).collect(), ty(body))
            }
            Expr::Forall { .. } | Expr::Exists { .. } | Expr::IsConstructor { .. } => Type::Boolean,
            Expr::Choose { binder, .. } => binder.ty.clone(),
            Expr::Application { callee, .. } => match ty(callee) {
                Type::Function { to, .. } => *to,
                _ => Type::Untyped,
            },
            Expr::FunctionInvocation { id, tps, .. } => match symbols.function(*id) {
                Some(fd) => fd.return_type.instantiate(&substitution(&fd.tparams, tps)),
                None => Type::Untyped,
            },
            Expr::Adt { id, tps, .. } => match symbols.sort_of(*id) {
                Some(sort) => Type::Adt { id: sort.id, tps: tps.clone() },
                None => Type::Untyped,
            },
            Expr::AdtSelector { adt, selector } => match (symbols.field(*selector), ty(adt)) {
                (Some((sort, field)), Type::Adt { id, tps }) if id == sort.id => {
                    field.ty.instantiate(&substitution(&sort.tparams, &tps))
                }
                (Some((_, field)), _) => field.ty.clone(),
                (None, _) => Type::Untyped,
            },
            Expr::IfExpr { then, otherwise, .. } => match ty(then) {
                Type::Untyped => ty(otherwise),
                then => then,
            },
            Expr::Tuple(members) => Type::Tuple(members.iter().map(ty).collect()),
            Expr::TupleSelect { tuple, index } => match ty(tuple) {
                Type::Tuple(mut members) if (1..=members.len()).contains(index) => {
                    members.swap_remove(index - 1)
                }
                _ => Type::Untyped,
            },
            Expr::Operation { op, args } => operation_type(*op, args, symbols),
            Expr::FiniteSet { base, .. } => Type::set(base.clone()),
            Expr::FiniteBag { base, .. } => Type::bag(base.clone()),
            Expr::FiniteMap { key, value, .. } => Type::map(key.clone(), value.clone()),
        }
    }
}

fn substitution(tparams: &[Identifier], tps: &[Type]) -> Vec<(Identifier, Type)> {
    tparams.iter().copied().zip(tps.iter().cloned()).collect()
}

fn operation_type(op: Operator, args: &[Expr], symbols: &Symbols) -> Type {
    use Operator::*;

    let first = || args.first().map_or(Type::Untyped, |arg| arg.get_type(symbols));

    match op {
        _ if op.is_predicate() => Type::Boolean,
        StringConcat | SubString => Type::String,
        StringLength | MultiplicityInBag => Type::Integer,
        MapApply => match first() {
            Type::Map(_, value) => *value,
            _ => Type::Untyped,
        },
        _ => first(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{expr::ValDef, lit::Lit, symbols::FunDef};

    #[test]
    fn type_of_operations() {
        let symbols = Symbols::new();
        let x = ValDef::new(Identifier::fresh("x"), Type::INT32);
        let m = ValDef::new(Identifier::fresh("m"), Type::map(Type::Char, Type::Real));

        let sum = Expr::op(Operator::Plus, vec![Expr::var(&x), Expr::lit(Lit::bv(1, 32))]);
        assert_eq!(sum.get_type(&symbols), Type::INT32);

        let cmp = Expr::op(Operator::LessThan, vec![Expr::var(&x), Expr::var(&x)]);
        assert_eq!(cmp.get_type(&symbols), Type::Boolean);

        let apply = Expr::op(Operator::MapApply, vec![Expr::var(&m), Expr::lit(Lit::Char('c'))]);
        assert_eq!(apply.get_type(&symbols), Type::Real);

        let select = Expr::tuple_select(Expr::Tuple(vec![Expr::int(1), Expr::bool(true)]), 2);
        assert_eq!(select.get_type(&symbols), Type::Boolean);

        let lambda = Expr::lambda(vec![x.clone()], Expr::var(&x));
        assert_eq!(lambda.get_type(&symbols), Type::function(vec![Type::INT32], Type::INT32));
    }

    #[test]
    fn type_of_invocations() {
        let t = Identifier::fresh("T");
        let id = Identifier::fresh("identity");
        let mut symbols = Symbols::new();
        symbols.add_function(FunDef {
            id,
            tparams: vec![t],
            params: vec![ValDef::new(Identifier::fresh("v"), Type::Parameter(t))],
            return_type: Type::Parameter(t),
        });

        let call = Expr::FunctionInvocation { id, tps: vec![Type::Char], args: vec![] };
        assert_eq!(call.get_type(&symbols), Type::Char);

        let unknown = Expr::FunctionInvocation { id: t, tps: vec![], args: vec![] };
        assert_eq!(unknown.get_type(&symbols), Type::Untyped);
    }
}
