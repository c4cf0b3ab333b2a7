//! The symbol table of declared functions and algebraic data types.
use indexmap::IndexMap;
use quasi_source::identifier::{Identifier, Name};

use crate::{expr::ValDef, ty::Type};

/// A declared function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunDef {
    pub id: Identifier,
    pub tparams: Vec<Identifier>,
    pub params: Vec<ValDef>,
    pub return_type: Type,
}

/// A constructor of an [AdtSort].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdtConstructor {
    pub id: Identifier,
    /// The sort that the constructor belongs to.
    pub sort: Identifier,
    pub fields: Vec<ValDef>,
}

/// A declared algebraic data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdtSort {
    pub id: Identifier,
    pub tparams: Vec<Identifier>,
    pub constructors: Vec<Identifier>,
}

impl AdtSort {
    /// The type of the sort applied to its own type parameters.
    pub fn ty(&self) -> Type {
        Type::Adt { id: self.id, tps: self.tparams.iter().map(|id| Type::Parameter(*id)).collect() }
    }
}

/// Read-only table of every declaration that templates may refer to by
/// name. Declarations are kept in insertion order, a name that is declared
/// twice resolves to the first declaration.
#[derive(Debug, Clone, Default)]
pub struct Symbols {
    functions: IndexMap<Identifier, FunDef>,
    sorts: IndexMap<Identifier, AdtSort>,
    constructors: IndexMap<Identifier, AdtConstructor>,
}

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, fd: FunDef) -> &mut Self {
        self.functions.insert(fd.id, fd);
        self
    }

    /// Declare a sort together with its constructors. The `sort` field of
    /// each constructor is overwritten with the sort's identifier.
    pub fn add_sort(
        &mut self,
        id: Identifier,
        tparams: Vec<Identifier>,
        constructors: Vec<AdtConstructor>,
    ) -> &mut Self {
        let ids = constructors.iter().map(|cons| cons.id).collect();

        for cons in constructors {
            self.constructors.insert(cons.id, AdtConstructor { sort: id, ..cons });
        }

        self.sorts.insert(id, AdtSort { id, tparams, constructors: ids });
        self
    }

    pub fn function(&self, id: Identifier) -> Option<&FunDef> {
        self.functions.get(&id)
    }

    pub fn sort(&self, id: Identifier) -> Option<&AdtSort> {
        self.sorts.get(&id)
    }

    pub fn constructor(&self, id: Identifier) -> Option<&AdtConstructor> {
        self.constructors.get(&id)
    }

    /// The sort that the given constructor belongs to.
    pub fn sort_of(&self, cons: Identifier) -> Option<&AdtSort> {
        self.constructor(cons).and_then(|cons| self.sort(cons.sort))
    }

    pub fn lookup_function(&self, name: Name) -> Option<&FunDef> {
        self.functions.values().find(|fd| fd.id.name() == name)
    }

    pub fn lookup_constructor(&self, name: Name) -> Option<&AdtConstructor> {
        self.constructors.values().find(|cons| cons.id.name() == name)
    }

    pub fn sorts(&self) -> impl Iterator<Item = &AdtSort> {
        self.sorts.values()
    }

    /// Find the field called `name` among the constructors of the given
    /// sort, or among every constructor when no sort is known.
    pub fn lookup_field(&self, sort: Option<Identifier>, name: Name) -> Option<&ValDef> {
        self.constructors
            .values()
            .filter(|cons| sort.map_or(true, |sort| cons.sort == sort))
            .flat_map(|cons| cons.fields.iter())
            .find(|field| field.id.name() == name)
    }

    /// Find the field with the identifier `id` and the sort declaring it.
    pub fn field(&self, id: Identifier) -> Option<(&AdtSort, &ValDef)> {
        self.constructors.values().find_map(|cons| {
            let field = cons.fields.iter().find(|field| field.id == id)?;
            Some((self.sort(cons.sort)?, field))
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn declare_and_lookup_sorts() {
        let t = Identifier::fresh("T");
        let list = Identifier::fresh("List");
        let cons = Identifier::fresh("Cons");
        let nil = Identifier::fresh("Nil");
        let head = ValDef::new(Identifier::fresh("head"), Type::Parameter(t));
        let tail = ValDef::new(
            Identifier::fresh("tail"),
            Type::Adt { id: list, tps: vec![Type::Parameter(t)] },
        );

        let mut symbols = Symbols::new();
        symbols.add_sort(
            list,
            vec![t],
            vec![
                AdtConstructor { id: cons, sort: cons, fields: vec![head.clone(), tail] },
                AdtConstructor { id: nil, sort: nil, fields: vec![] },
            ],
        );

        assert_eq!(symbols.sort_of(nil).map(|sort| sort.id), Some(list));
        assert_eq!(symbols.lookup_constructor(Name::from("Cons")).map(|c| c.id), Some(cons));
        assert_eq!(symbols.lookup_field(Some(list), Name::from("head")), Some(&head));
        assert_eq!(symbols.field(head.id).map(|(sort, _)| sort.id), Some(list));
        assert!(symbols.lookup_field(Some(cons), Name::from("head")).is_none());
    }
}
