//! Expression templates.
use std::fmt;

use itertools::Itertools;
use phf::phf_map;
use quasi_source::identifier::{Identifier, Name};
use quasi_trees::{self as trees, Operator};

use crate::ty::Type;

/// An identifier as written in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ident {
    /// A name written in the template text.
    Name(Name),
    /// A spliced host identifier.
    Embedded(Identifier),
    /// A placeholder for an identifier, only in binder and field positions.
    Hole(usize),
}

impl Ident {
    pub fn name(name: &str) -> Self {
        Ident::Name(Name::from(name))
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ident::Name(name) => write!(f, "{name}"),
            Ident::Embedded(id) => write!(f, "{id}"),
            Ident::Hole(index) => write!(f, "${index}"),
        }
    }
}

/// A literal in a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LitTemplate {
    Boolean(bool),
    /// A numeral kept as text, `-12` or `1.5`. Its host type is decided when
    /// it is compiled or matched.
    Numeric(Name),
    Str(String),
    Char(char),
    Unit,
    /// The name of a declared function or constructor.
    Name(Name),
    /// A spliced host expression.
    EmbeddedExpr(trees::Expr),
    /// A spliced host identifier naming a declared function or constructor.
    EmbeddedIdent(Identifier),
}

impl fmt::Display for LitTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LitTemplate::Boolean(value) => write!(f, "{value}"),
            LitTemplate::Numeric(text) => write!(f, "{text}"),
            LitTemplate::Str(value) => write!(f, "{value:?}"),
            LitTemplate::Char(value) => write!(f, "{value:?}"),
            LitTemplate::Unit => write!(f, "()"),
            LitTemplate::Name(name) => write!(f, "{name}"),
            LitTemplate::EmbeddedExpr(expr) => write!(f, "<{expr:?}>"),
            LitTemplate::EmbeddedIdent(id) => write!(f, "{id}"),
        }
    }
}

/// The operator of a [Expr::Operation].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpName {
    /// A host primitive operator.
    Prim(Operator),
    Tuple,
    Set,
    /// Children are `(element, multiplicity)` tuples.
    Bag,
    /// The first child is the default value, the rest are `(key, value)`
    /// tuples.
    Map,
    IfThenElse,
    /// Constructor test, the second child is a [Expr::Variable] naming the
    /// constructor.
    Is,
}

impl OpName {
    /// Look up a primitive operator that is written as a function call,
    /// `setAdd(s, x)`.
    pub fn from_function_name(name: &str) -> Option<OpName> {
        PRIMITIVE_FUNCTIONS.get(name).map(|op| OpName::Prim(*op))
    }
}

static PRIMITIVE_FUNCTIONS: phf::Map<&'static str, Operator> = phf_map! {
    "setAdd" => Operator::SetAdd,
    "elementOfSet" => Operator::ElementOfSet,
    "subset" => Operator::SubsetOf,
    "setUnion" => Operator::SetUnion,
    "setIntersection" => Operator::SetIntersection,
    "setDifference" => Operator::SetDifference,
    "bagAdd" => Operator::BagAdd,
    "multiplicity" => Operator::MultiplicityInBag,
    "bagUnion" => Operator::BagUnion,
    "bagIntersection" => Operator::BagIntersection,
    "bagDifference" => Operator::BagDifference,
    "mapApply" => Operator::MapApply,
    "mapUpdated" => Operator::MapUpdated,
    "concatenate" => Operator::StringConcat,
    "substring" => Operator::SubString,
    "length" => Operator::StringLength,
};

impl fmt::Display for OpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpName::Prim(op) => write!(f, "{op}"),
            OpName::Tuple => write!(f, "Tuple"),
            OpName::Set => write!(f, "Set"),
            OpName::Bag => write!(f, "Bag"),
            OpName::Map => write!(f, "Map"),
            OpName::IfThenElse => write!(f, "IfThenElse"),
            OpName::Is => write!(f, "Is"),
        }
    }
}

/// The binder forms of [Expr::Abstraction].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Lambda,
    Forall,
    Exists,
    /// Binds exactly one identifier.
    Choose,
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Lambda => write!(f, "lambda"),
            Quantifier::Forall => write!(f, "forall"),
            Quantifier::Exists => write!(f, "exists"),
            Quantifier::Choose => write!(f, "choose"),
        }
    }
}

/// A binder of an [Expr::Abstraction] with its optional type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub binder: Ident,
    pub ty: Option<Type>,
}

/// A binding of an [Expr::Let].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LetBinding {
    pub binder: Ident,
    pub ty: Option<Type>,
    pub value: Expr,
}

/// An expression template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A placeholder for the `i`-th spliced or matched value.
    Hole(usize),
    Literal(LitTemplate),
    Variable(Ident),
    Operation(OpName, Vec<Expr>),
    Application(Box<Expr>, Vec<Expr>),
    /// Field selection, `e.field`.
    Selection(Box<Expr>, Ident),
    /// Explicit type arguments, `f[T]` or `{a, b}[T]`.
    TypeApplication(Box<Expr>, Vec<Type>),
    Abstraction(Quantifier, Vec<Binding>, Box<Expr>),
    /// Bindings are in scope for the bindings that follow them and for the
    /// body.
    Let(Vec<LetBinding>, Box<Expr>),
    /// `(e : T)`
    Annotated(Box<Expr>, Type),
}

impl Expr {
    pub fn var(name: &str) -> Self {
        Expr::Variable(Ident::name(name))
    }

    pub fn numeral(text: &str) -> Self {
        Expr::Literal(LitTemplate::Numeric(Name::from(text)))
    }

    pub fn prim(op: Operator, args: Vec<Expr>) -> Self {
        Expr::Operation(OpName::Prim(op), args)
    }

    /// Collect the hole indices in the template, left to right, including
    /// holes in type and binder positions.
    pub fn holes(&self) -> Vec<usize> {
        let mut holes = vec![];
        self.collect_holes(&mut holes);
        holes
    }

    fn collect_holes(&self, holes: &mut Vec<usize>) {
        let ident = |ident: &Ident, holes: &mut Vec<usize>| {
            if let Ident::Hole(index) = ident {
                holes.push(*index);
            }
        };

        match self {
            Expr::Hole(index) => holes.push(*index),
            Expr::Literal(_) => {}
            Expr::Variable(id) => ident(id, holes),
            Expr::Operation(_, args) => args.iter().for_each(|arg| arg.collect_holes(holes)),
            Expr::Application(callee, args) => {
                callee.collect_holes(holes);
                args.iter().for_each(|arg| arg.collect_holes(holes));
            }
            Expr::Selection(receiver, field) => {
                receiver.collect_holes(holes);
                ident(field, holes);
            }
            Expr::TypeApplication(inner, tys) => {
                inner.collect_holes(holes);
                tys.iter().for_each(|ty| ty.collect_holes(holes));
            }
            Expr::Abstraction(_, bindings, body) => {
                for binding in bindings {
                    ident(&binding.binder, holes);
                    if let Some(ty) = &binding.ty {
                        ty.collect_holes(holes);
                    }
                }
                body.collect_holes(holes);
            }
            Expr::Let(bindings, body) => {
                for binding in bindings {
                    ident(&binding.binder, holes);
                    if let Some(ty) = &binding.ty {
                        ty.collect_holes(holes);
                    }
                    binding.value.collect_holes(holes);
                }
                body.collect_holes(holes);
            }
            Expr::Annotated(inner, ty) => {
                inner.collect_holes(holes);
                ty.collect_holes(holes);
            }
        }
    }
}

fn write_binder(f: &mut fmt::Formatter<'_>, binder: &Ident, ty: &Option<Type>) -> fmt::Result {
    match ty {
        Some(ty) => write!(f, "{binder}: {ty}"),
        None => write!(f, "{binder}"),
    }
}

/// Templates are printed fully parenthesised in their surface syntax.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Hole(index) => write!(f, "${index}"),
            Expr::Literal(lit) => write!(f, "{lit}"),
            Expr::Variable(id) => write!(f, "{id}"),
            Expr::Operation(OpName::Tuple, args) => write!(f, "({})", args.iter().join(", ")),
            Expr::Operation(OpName::Set, args) => write!(f, "{{{}}}", args.iter().join(", ")),
            Expr::Operation(OpName::IfThenElse, args) if args.len() == 3 => {
                write!(f, "(if ({}) {} else {})", args[0], args[1], args[2])
            }
            Expr::Operation(OpName::Is, args) if args.len() == 2 => {
                write!(f, "({} is {})", args[0], args[1])
            }
            Expr::Operation(op, args) => write!(f, "{op}({})", args.iter().join(", ")),
            Expr::Application(callee, args) => write!(f, "{callee}({})", args.iter().join(", ")),
            Expr::Selection(receiver, field) => write!(f, "{receiver}.{field}"),
            Expr::TypeApplication(inner, tys) => write!(f, "{inner}[{}]", tys.iter().join(", ")),
            Expr::Abstraction(quantifier, bindings, body) => {
                write!(f, "({quantifier} ")?;
                for (index, binding) in bindings.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write_binder(f, &binding.binder, &binding.ty)?;
                }
                write!(f, ". {body})")
            }
            Expr::Let(bindings, body) => {
                write!(f, "(let ")?;
                for (index, binding) in bindings.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write_binder(f, &binding.binder, &binding.ty)?;
                    write!(f, " = {}", binding.value)?;
                }
                write!(f, " in {body})")
            }
            Expr::Annotated(inner, ty) => write!(f, "({inner} : {ty})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn primitive_function_names() {
        assert_eq!(OpName::from_function_name("setAdd"), Some(OpName::Prim(Operator::SetAdd)));
        assert_eq!(OpName::from_function_name("length"), Some(OpName::Prim(Operator::StringLength)));
        assert_eq!(OpName::from_function_name("set_add"), None);
    }

    #[test]
    fn holes_in_order() {
        let template = Expr::Abstraction(
            Quantifier::Lambda,
            vec![Binding { binder: Ident::Hole(0), ty: Some(Type::Hole(1)) }],
            Box::new(Expr::prim(Operator::Plus, vec![Expr::Hole(2), Expr::numeral("1")])),
        );

        assert_eq!(template.holes(), vec![0, 1, 2]);
        assert_eq!(template.to_string(), "(lambda $0: $1. Plus($2, 1))");
    }
}
