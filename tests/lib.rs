//! Quasi behavioural tests. Templates are read, compiled and matched through
//! the [quasi::Quote] entry points against a small symbol table that declares
//! a list sort.
use quasi::Quote;
use quasi_source::identifier::Identifier;
use quasi_trees::{AdtConstructor, Expr, FunDef, Symbols, Type, ValDef};


/// The declarations that tests refer to: a sort `List` with the
/// constructors `Cons(head: BigInt, tail: List)` and `Nil`, and a function
/// `size(xs: List): BigInt`.
pub struct ListSymbols {
    pub symbols: Symbols,
    pub list: Identifier,
    pub cons: Identifier,
    pub nil: Identifier,
    pub size: Identifier,
}

impl ListSymbols {
    pub fn new() -> Self {
        let list = Identifier::fresh("List");
        let cons = Identifier::fresh("Cons");
        let nil = Identifier::fresh("Nil");
        let size = Identifier::fresh("size");
        let list_ty = Type::Adt { id: list, tps: vec![] };

        let fields = vec![
            ValDef::new(Identifier::fresh("head"), Type::Integer),
            ValDef::new(Identifier::fresh("tail"), list_ty.clone()),
        ];

        let mut symbols = Symbols::new();
        symbols
            .add_sort(
                list,
                vec![],
                vec![
                    AdtConstructor { id: cons, sort: list, fields },
                    AdtConstructor { id: nil, sort: list, fields: vec![] },
                ],
            )
            .add_function(FunDef {
                id: size,
                tparams: vec![],
                params: vec![ValDef::new(Identifier::fresh("xs"), list_ty)],
                return_type: Type::Integer,
            });

        Self { symbols, list, cons, nil, size }
    }

    pub fn quote(&self) -> Quote<'_> {
        Quote::new(&self.symbols)
    }

    /// The list with the given integer elements.
    pub fn list_of(&self, elements: &[i64]) -> Expr {
        let nil = Expr::Adt { id: self.nil, tps: vec![], args: vec![] };

        elements.iter().rev().fold(nil, |tail, head| Expr::Adt {
            id: self.cons,
            tps: vec![],
            args: vec![Expr::int(*head), tail],
        })
    }
}

impl Default for ListSymbols {
    fn default() -> Self {
        Self::new()
    }
}

/// A variable of type `ty`, with a fresh identifier.
pub fn var(name: &str, ty: Type) -> ValDef {
    ValDef::new(Identifier::fresh(name), ty)
}
