//! Compilation of templates into host trees.
//!
//! Holes are replaced by the values supplied for them, binder names are bound
//! to fresh identifiers, known symbols become invocations and constructions,
//! and type templates are resolved. Errors are accumulated so that one
//! compilation reports every problem in the template.
use std::fmt;

use fxhash::FxHashMap;
use itertools::Itertools;
use log::debug;
use quasi_source::identifier::{Identifier, Name};
use quasi_token::SpliceKind;
use quasi_trees::{self as trees, Arity, Lit, Symbols, ValDef};

use crate::{
    expr::{Binding, Expr, Ident, LetBinding, LitTemplate, OpName, Quantifier},
    lit::Numeral,
    resolve::{ResolveErrors, TypeResolver},
    ty::Type,
    value::Value,
};

/// An error found while compiling a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A name that is neither bound, a declared symbol, nor allowed to be
    /// free.
    UnknownName(Name),
    /// No value was supplied for the hole.
    MissingValue(usize),
    /// The value supplied for the hole is of the wrong kind.
    SpliceKindMismatch { hole: usize, expected: SpliceKind, found: SpliceKind },
    /// An operator, symbol or binder form applied to the wrong number of
    /// operands.
    Arity { name: String, expected: Arity, given: usize },
    /// A selected field that no constructor declares.
    UnknownField(Name),
    /// A template that cannot be compiled to any host tree.
    InvalidShape(String),
    /// A type template that does not resolve.
    Type(ResolveErrors),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnknownName(name) => write!(f, "unknown name `{name}`"),
            CompileError::MissingValue(hole) => write!(f, "no value supplied for hole #{hole}"),
            CompileError::SpliceKindMismatch { hole, expected, found } => {
                write!(f, "hole #{hole} expects a spliced {expected}, but a {found} was supplied")
            }
            CompileError::Arity { name, expected, given } => {
                write!(f, "`{name}` expects {expected} operands, but {given} were given")
            }
            CompileError::UnknownField(name) => {
                write!(f, "no constructor declares a field `{name}`")
            }
            CompileError::InvalidShape(message) => write!(f, "{message}"),
            CompileError::Type(errors) => write!(f, "{errors}"),
        }
    }
}

/// Every error found while compiling one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileErrors(pub Vec<CompileError>);

impl fmt::Display for CompileErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

impl std::error::Error for CompileErrors {}

/// How a binder is referred to in the scope: by its template name, or by a
/// host identifier that was spliced in or bound by a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKey {
    Name(Name),
    Ident(Identifier),
}

/// A declared symbol that a template invokes.
#[derive(Debug, Clone, Copy)]
enum Symbol {
    Function(Identifier),
    Constructor(Identifier),
}

/// Compiles [Expr] templates into host expressions.
pub struct Compiler<'s> {
    symbols: &'s Symbols,
    resolver: &'s TypeResolver,
    values: &'s [Value],

    /// Give each unknown name a fresh identifier instead of reporting it.
    allow_free_names: bool,

    /// Binders in scope, innermost last.
    scope: Vec<(ScopeKey, ValDef)>,

    /// Free names seen so far, each is compiled to the same variable.
    free: FxHashMap<Name, ValDef>,

    errors: Vec<CompileError>,
}

impl<'s> Compiler<'s> {
    pub fn new(symbols: &'s Symbols, resolver: &'s TypeResolver, values: &'s [Value]) -> Self {
        Self {
            symbols,
            resolver,
            values,
            allow_free_names: false,
            scope: vec![],
            free: FxHashMap::default(),
            errors: vec![],
        }
    }

    pub fn allow_free_names(mut self, allow: bool) -> Self {
        self.allow_free_names = allow;
        self
    }

    /// Compile an expression template.
    pub fn compile_expr(mut self, template: &Expr) -> Result<trees::Expr, CompileErrors> {
        let result = self.expr(template, None);
        self.finish(result)
    }

    /// Compile a type template.
    pub fn compile_type(mut self, template: &Type) -> Result<trees::Type, CompileErrors> {
        let result = self.ty(template);
        self.finish(result)
    }

    fn finish<T>(self, result: Option<T>) -> Result<T, CompileErrors> {
        match result {
            Some(result) if self.errors.is_empty() => Ok(result),
            _ => {
                debug!("template compilation failed with {} errors", self.errors.len());
                Err(CompileErrors(self.errors))
            }
        }
    }

    fn error<T>(&mut self, error: CompileError) -> Option<T> {
        self.errors.push(error);
        None
    }

    /// Get the value supplied for a hole, checking that it has the expected
    /// kind.
    fn value(&mut self, hole: usize, expected: SpliceKind) -> Option<&'s Value> {
        match self.values.get(hole) {
            None => self.error(CompileError::MissingValue(hole)),
            Some(value) if value.kind() != expected => {
                self.error(CompileError::SpliceKindMismatch { hole, expected, found: value.kind() })
            }
            Some(value) => Some(value),
        }
    }

    fn ty(&mut self, template: &Type) -> Option<trees::Type> {
        match self.resolver.resolve_with(template, self.values) {
            Ok(ty) => Some(ty),
            Err(errors) => self.error(CompileError::Type(errors)),
        }
    }

    fn types(&mut self, templates: &[Type]) -> Option<Vec<trees::Type>> {
        let tys = templates.iter().map(|ty| self.ty(ty)).collect_vec();
        tys.into_iter().collect()
    }

    /// Compile every template against the same expected type, reporting the
    /// errors of each one.
    fn exprs(
        &mut self,
        templates: &[Expr],
        expected: Option<&trees::Type>,
    ) -> Option<Vec<trees::Expr>> {
        let exprs = templates.iter().map(|expr| self.expr(expr, expected)).collect_vec();
        exprs.into_iter().collect()
    }

    /// Compile an expression template. `expected` is the type the
    /// surrounding template requires, if it is known, and decides the host
    /// type of numerals and empty collections.
    fn expr(&mut self, template: &Expr, expected: Option<&trees::Type>) -> Option<trees::Expr> {
        match template {
            Expr::Hole(index) => Some(self.value(*index, SpliceKind::Expr)?.as_expr()?.clone()),
            Expr::Literal(lit) => self.literal(lit, expected, vec![]),
            Expr::Variable(ident) => self.variable(*ident, expected),
            Expr::Operation(op, args) => self.operation(*op, args, &[], expected),
            Expr::Application(callee, args) => self.application(callee, args),
            Expr::Selection(receiver, field) => self.selection(receiver, *field),
            Expr::TypeApplication(inner, tys) => {
                let tps = self.types(tys);

                match inner.as_ref() {
                    Expr::Literal(lit) => self.literal(lit, expected, tps?),
                    Expr::Operation(op, args) => self.operation(*op, args, &tps?, expected),
                    _ => self.error(CompileError::InvalidShape(format!(
                        "type arguments cannot be applied to `{inner}`"
                    ))),
                }
            }
            Expr::Abstraction(quantifier, bindings, body) => {
                self.abstraction(*quantifier, bindings, body)
            }
            Expr::Let(bindings, body) => {
                let depth = self.scope.len();
                let result = self.let_bindings(bindings, body);
                self.scope.truncate(depth);
                result
            }
            Expr::Annotated(inner, ty) => {
                let ty = self.ty(ty)?;
                self.expr(inner, Some(&ty))
            }
        }
    }

    fn lookup_symbol(&self, lit: &LitTemplate) -> Option<Symbol> {
        match lit {
            LitTemplate::Name(name) => self
                .symbols
                .lookup_function(*name)
                .map(|fd| Symbol::Function(fd.id))
                .or_else(|| {
                    self.symbols.lookup_constructor(*name).map(|c| Symbol::Constructor(c.id))
                }),
            LitTemplate::EmbeddedIdent(id) => self
                .symbols
                .function(*id)
                .map(|fd| Symbol::Function(fd.id))
                .or_else(|| self.symbols.constructor(*id).map(|c| Symbol::Constructor(c.id))),
            _ => None,
        }
    }

    /// Invoke a declared function or constructor, checking the number of
    /// type arguments, when given, and of arguments. Each argument is
    /// compiled against the declared type of its parameter.
    fn invoke(
        &mut self,
        symbol: Symbol,
        tps: Vec<trees::Type>,
        args: &[Expr],
    ) -> Option<trees::Expr> {
        let (id, tparams, params) = match symbol {
            Symbol::Function(id) => {
                let fd = self.symbols.function(id)?;
                (id, fd.tparams.as_slice(), fd.params.as_slice())
            }
            Symbol::Constructor(id) => {
                let sort = self.symbols.sort_of(id)?;
                let cons = self.symbols.constructor(id)?;
                (id, sort.tparams.as_slice(), cons.fields.as_slice())
            }
        };

        let subst = tparams.iter().copied().zip(tps.iter().cloned()).collect_vec();
        let expected = params
            .iter()
            .map(|param| Some(param.ty.instantiate(&subst)).filter(trees::Type::is_ground))
            .collect_vec();
        let tparams = tparams.len();

        let args = args
            .iter()
            .enumerate()
            .map(|(i, arg)| self.expr(arg, expected.get(i).and_then(Option::as_ref)))
            .collect_vec();

        if !tps.is_empty() && tps.len() != tparams {
            return self.error(CompileError::Arity {
                name: format!("{id}[...]"),
                expected: Arity::Exact(tparams),
                given: tps.len(),
            });
        }

        if args.len() != expected.len() {
            return self.error(CompileError::Arity {
                name: id.to_string(),
                expected: Arity::Exact(expected.len()),
                given: args.len(),
            });
        }

        let args = args.into_iter().collect::<Option<Vec<_>>>()?;

        Some(match symbol {
            Symbol::Function(id) => trees::Expr::FunctionInvocation { id, tps, args },
            Symbol::Constructor(id) => trees::Expr::Adt { id, tps, args },
        })
    }

    fn literal(
        &mut self,
        lit: &LitTemplate,
        expected: Option<&trees::Type>,
        tps: Vec<trees::Type>,
    ) -> Option<trees::Expr> {
        if let Some(symbol) = self.lookup_symbol(lit) {
            return self.invoke(symbol, tps, &[]);
        }

        if !tps.is_empty() {
            return self.error(CompileError::InvalidShape(format!(
                "type arguments cannot be applied to `{lit}`"
            )));
        }

        let lit = match lit {
            LitTemplate::Boolean(value) => Lit::Boolean(*value),
            LitTemplate::Numeric(text) => self.numeral(*text, expected)?,
            LitTemplate::Str(value) => Lit::Str(value.clone()),
            LitTemplate::Char(value) => Lit::Char(*value),
            LitTemplate::Unit => Lit::Unit,
            LitTemplate::Name(name) => return self.error(CompileError::UnknownName(*name)),
            LitTemplate::EmbeddedExpr(expr) => return Some(expr.clone()),
            LitTemplate::EmbeddedIdent(id) => return Some(self.embedded_variable(*id)),
        };

        Some(trees::Expr::Literal(lit))
    }

    /// A numeral takes the expected type if it is numeric. Otherwise
    /// integers are arbitrary precision and decimals are fractions.
    fn numeral(&mut self, text: Name, expected: Option<&trees::Type>) -> Option<Lit> {
        let Some(numeral) = Numeral::parse(text.as_str()) else {
            return self.error(CompileError::InvalidShape(format!("malformed numeral `{text}`")));
        };

        match (expected, numeral) {
            (Some(trees::Type::BV { signed, size }), Numeral::Integer(value)) => {
                Some(Lit::BitVector { signed: *signed, value, size: *size })
            }
            (Some(trees::Type::Real), numeral) => {
                let (numerator, denominator) = numeral.as_fraction();
                Some(Lit::Fraction { numerator, denominator })
            }
            (None | Some(trees::Type::Untyped | trees::Type::Integer), Numeral::Integer(value)) => {
                Some(Lit::Integer(value))
            }
            (None | Some(trees::Type::Untyped), Numeral::Fraction(numerator, denominator)) => {
                Some(Lit::Fraction { numerator, denominator })
            }
            (Some(ty), _) => self.error(CompileError::InvalidShape(format!(
                "numeral `{text}` cannot have type `{ty}`"
            ))),
        }
    }

    fn lookup_scope(&self, key: ScopeKey) -> Option<&ValDef> {
        self.scope.iter().rev().find_map(|(bound, vd)| (*bound == key).then_some(vd))
    }

    /// A reference to a spliced identifier, typed by its binder when it is
    /// bound in the template.
    fn embedded_variable(&self, id: Identifier) -> trees::Expr {
        match self.lookup_scope(ScopeKey::Ident(id)) {
            Some(vd) => vd.to_variable(),
            None => trees::Expr::Variable(ValDef::new(id, trees::Type::Untyped)),
        }
    }

    fn variable(&mut self, ident: Ident, expected: Option<&trees::Type>) -> Option<trees::Expr> {
        match ident {
            Ident::Name(name) => {
                if let Some(vd) = self.lookup_scope(ScopeKey::Name(name)) {
                    return Some(vd.to_variable());
                }

                if let Some(symbol) = self.lookup_symbol(&LitTemplate::Name(name)) {
                    return self.invoke(symbol, vec![], &[]);
                }

                if !self.allow_free_names {
                    return self.error(CompileError::UnknownName(name));
                }

                let ty = expected.cloned().unwrap_or(trees::Type::Untyped);
                let vd = self
                    .free
                    .entry(name)
                    .or_insert_with(|| ValDef::new(Identifier::fresh(name), ty));

                Some(vd.to_variable())
            }
            Ident::Embedded(id) => Some(self.embedded_variable(id)),
            Ident::Hole(hole) => {
                let id = self.value(hole, SpliceKind::Ident)?.as_ident()?;
                Some(self.embedded_variable(id))
            }
        }
    }

    /// Compile the operands of a primitive operation. Numerals among them
    /// take the type of a bit-vector or real operand, so that `x + 1` with
    /// `x: Int` adds two 32-bit values.
    fn operands(&mut self, args: &[Expr]) -> Option<Vec<trees::Expr>> {
        let compiled = args.iter().map(|arg| self.expr(arg, None)).collect_vec();

        let hint = compiled
            .iter()
            .flatten()
            .map(|expr| expr.get_type(self.symbols))
            .find(|ty| matches!(ty, trees::Type::BV { .. } | trees::Type::Real));

        let Some(hint) = hint else {
            return compiled.into_iter().collect();
        };

        args.iter()
            .zip(compiled)
            .map(|(arg, expr)| match arg {
                Expr::Literal(LitTemplate::Numeric(text)) => {
                    self.numeral(*text, Some(&hint)).map(trees::Expr::Literal)
                }
                _ => expr,
            })
            .collect_vec()
            .into_iter()
            .collect()
    }

    fn check_arity(&mut self, name: impl ToString, expected: Arity, given: usize) -> Option<()> {
        if expected.admits(given) {
            return Some(());
        }

        self.error(CompileError::Arity { name: name.to_string(), expected, given })
    }

    /// Collection literals take at most `max` type arguments.
    fn check_type_arguments(&mut self, name: &str, tps: &[trees::Type], max: usize) -> Option<()> {
        if tps.len() <= max {
            return Some(());
        }

        self.error(CompileError::Arity {
            name: format!("{name}[...]"),
            expected: Arity::Exact(max),
            given: tps.len(),
        })
    }

    /// Split `(a, b)` tuple templates, the elements of bag and map literals,
    /// compiling the sides against the given types.
    fn pairs(
        &mut self,
        templates: &[Expr],
        first_ty: Option<&trees::Type>,
        second_ty: Option<&trees::Type>,
    ) -> Option<Vec<(trees::Expr, trees::Expr)>> {
        let pairs = templates
            .iter()
            .map(|template| match template {
                Expr::Operation(OpName::Tuple, members) if members.len() == 2 => {
                    let first = self.expr(&members[0], first_ty);
                    let second = self.expr(&members[1], second_ty);
                    Some((first?, second?))
                }
                _ => self.error(CompileError::InvalidShape(format!(
                    "expected a `key -> value` pair, found `{template}`"
                ))),
            })
            .collect_vec();

        pairs.into_iter().collect()
    }

    /// The element type of a collection literal: the stated type, from a
    /// type argument or the expected type, or else the type of the first
    /// element.
    fn element_type(
        &self,
        stated: Option<trees::Type>,
        first: Option<&trees::Expr>,
    ) -> trees::Type {
        stated
            .or_else(|| first.map(|expr| expr.get_type(self.symbols)))
            .unwrap_or(trees::Type::Untyped)
    }

    fn operation(
        &mut self,
        op: OpName,
        args: &[Expr],
        tps: &[trees::Type],
        expected: Option<&trees::Type>,
    ) -> Option<trees::Expr> {
        match op {
            OpName::Prim(op) => {
                self.check_arity(op, op.arity(), args.len())?;
                let args = self.operands(args)?;
                Some(trees::Expr::Operation { op, args })
            }
            OpName::Tuple => {
                self.check_arity("tuple", Arity::AtLeast(2), args.len())?;
                Some(trees::Expr::Tuple(self.exprs(args, None)?))
            }
            OpName::Set => {
                self.check_type_arguments("Set", tps, 1)?;
                let stated = match expected {
                    Some(trees::Type::Set(elem)) => tps.first().or(Some(elem.as_ref())),
                    _ => tps.first(),
                };
                let stated = stated.cloned();
                let elements = self.exprs(args, stated.as_ref())?;
                let base = self.element_type(stated, elements.first());

                Some(trees::Expr::FiniteSet { elements, base })
            }
            OpName::Bag => {
                self.check_type_arguments("Bag", tps, 1)?;
                let stated = match expected {
                    Some(trees::Type::Bag(elem)) => tps.first().or(Some(elem.as_ref())),
                    _ => tps.first(),
                };
                let stated = stated.cloned();
                let elements = self.pairs(args, stated.as_ref(), Some(&trees::Type::Integer))?;
                let base = self.element_type(stated, elements.first().map(|(e, _)| e));

                Some(trees::Expr::FiniteBag { elements, base })
            }
            OpName::Map => {
                self.check_type_arguments("Map", tps, 2)?;
                let Some((default, pairs)) = args.split_first() else {
                    return self.error(CompileError::InvalidShape(
                        "a map literal needs a default value".to_string(),
                    ));
                };

                let (expected_key, expected_value) = match expected {
                    Some(trees::Type::Map(key, value)) => {
                        (Some(key.as_ref()), Some(value.as_ref()))
                    }
                    _ => (None, None),
                };

                // One type argument is the value type, two are key and value.
                let (key_tp, value_tp) = match tps {
                    [key, value] => (Some(key), Some(value)),
                    [value] => (None, Some(value)),
                    _ => (None, None),
                };

                let stated_key = key_tp.or(expected_key).cloned();
                let stated_value = value_tp.or(expected_value).cloned();

                let default = self.expr(default, stated_value.as_ref());
                let pairs = self.pairs(pairs, stated_key.as_ref(), stated_value.as_ref())?;
                let default = default?;

                let key = self.element_type(stated_key, pairs.first().map(|(k, _)| k));
                let value = self.element_type(stated_value, Some(&default));

                Some(trees::Expr::FiniteMap { pairs, default: Box::new(default), key, value })
            }
            OpName::IfThenElse => {
                self.check_arity("if", Arity::Exact(3), args.len())?;
                let [cond, then, otherwise]: [trees::Expr; 3] =
                    self.exprs(args, None)?.try_into().ok()?;

                Some(trees::Expr::if_expr(cond, then, otherwise))
            }
            OpName::Is => {
                self.check_arity("is", Arity::Exact(2), args.len())?;
                let expr = self.expr(&args[0], None);
                let id = self.constructor_name(&args[1]);

                Some(trees::Expr::IsConstructor { expr: Box::new(expr?), id: id? })
            }
        }
    }

    /// Resolve the constructor named on the right of `is`.
    fn constructor_name(&mut self, template: &Expr) -> Option<Identifier> {
        let name = match template {
            Expr::Variable(Ident::Name(name)) | Expr::Literal(LitTemplate::Name(name)) => *name,
            Expr::Variable(Ident::Embedded(id)) | Expr::Literal(LitTemplate::EmbeddedIdent(id)) => {
                return Some(*id)
            }
            Expr::Variable(Ident::Hole(hole)) => {
                return self.value(*hole, SpliceKind::Ident)?.as_ident()
            }
            _ => {
                return self.error(CompileError::InvalidShape(format!(
                    "expected a constructor name, found `{template}`"
                )))
            }
        };

        match self.symbols.lookup_constructor(name) {
            Some(cons) => Some(cons.id),
            None => self.error(CompileError::UnknownName(name)),
        }
    }

    fn application(&mut self, callee: &Expr, args: &[Expr]) -> Option<trees::Expr> {
        let (lit, tys) = match callee {
            Expr::Literal(lit) => (Some(lit), &[][..]),
            Expr::TypeApplication(inner, tys) => match inner.as_ref() {
                Expr::Literal(lit) => (Some(lit), tys.as_slice()),
                _ => (None, &[][..]),
            },
            _ => (None, &[][..]),
        };

        if let Some(symbol) = lit.and_then(|lit| self.lookup_symbol(lit)) {
            let tps = self.types(tys)?;
            return self.invoke(symbol, tps, args);
        }

        let callee = self.expr(callee, None);
        let args = self.exprs(args, None);

        Some(trees::Expr::Application { callee: Box::new(callee?), args: args? })
    }

    fn selection(&mut self, receiver: &Expr, field: Ident) -> Option<trees::Expr> {
        let receiver = self.expr(receiver, None)?;
        let receiver_ty = receiver.get_type(self.symbols);

        let selector = match field {
            Ident::Name(name) => {
                let sort = match receiver_ty {
                    trees::Type::Adt { id, .. } => Some(id),
                    _ => None,
                };

                if sort.is_none() {
                    if let Some(index) = tuple_index(name) {
                        return Some(trees::Expr::tuple_select(receiver, index));
                    }
                }

                match self.symbols.lookup_field(sort, name) {
                    Some(field) => field.id,
                    None => return self.error(CompileError::UnknownField(name)),
                }
            }
            Ident::Embedded(id) => id,
            Ident::Hole(hole) => self.value(hole, SpliceKind::Ident)?.as_ident()?,
        };

        Some(trees::Expr::AdtSelector { adt: Box::new(receiver), selector })
    }

    /// Resolve the type of a binder, a binder without one is untyped.
    fn binder_type(&mut self, ty: Option<&Type>) -> Option<trees::Type> {
        match ty {
            Some(ty) => self.ty(ty),
            None => Some(trees::Type::Untyped),
        }
    }

    /// Create the host binder for a template binder and bring it into scope.
    /// A binder whose type did not resolve is brought into scope untyped.
    fn bind(&mut self, binder: Ident, ty: Option<trees::Type>) -> Option<ValDef> {
        let (key, id) = match binder {
            Ident::Name(name) => (ScopeKey::Name(name), Identifier::fresh(name)),
            Ident::Embedded(id) => (ScopeKey::Ident(id), id),
            Ident::Hole(hole) => {
                let id = self.value(hole, SpliceKind::Ident)?.as_ident()?;
                (ScopeKey::Ident(id), id)
            }
        };

        let vd = ValDef::new(id, ty.clone().unwrap_or(trees::Type::Untyped));
        self.scope.push((key, vd.clone()));
        ty.map(|_| vd)
    }

    fn abstraction(
        &mut self,
        quantifier: Quantifier,
        bindings: &[Binding],
        body: &Expr,
    ) -> Option<trees::Expr> {
        if quantifier == Quantifier::Choose {
            self.check_arity(quantifier, Arity::Exact(1), bindings.len())?;
        }

        let depth = self.scope.len();
        let params = bindings
            .iter()
            .map(|binding| {
                let ty = self.binder_type(binding.ty.as_ref());
                self.bind(binding.binder, ty)
            })
            .collect_vec();
        let body = self.expr(body, None);
        self.scope.truncate(depth);

        let mut params = params.into_iter().collect::<Option<Vec<_>>>()?;
        let body = body?;

        Some(match quantifier {
            Quantifier::Lambda => trees::Expr::lambda(params, body),
            Quantifier::Forall => trees::Expr::forall(params, body),
            Quantifier::Exists => trees::Expr::exists(params, body),
            Quantifier::Choose => trees::Expr::choose(params.remove(0), body),
        })
    }

    /// Compile `let` bindings one at a time, each value sees the binders
    /// before it. The caller restores the scope.
    fn let_bindings(&mut self, bindings: &[LetBinding], body: &Expr) -> Option<trees::Expr> {
        let Some((first, rest)) = bindings.split_first() else {
            return self.expr(body, None);
        };

        let ty = self.binder_type(first.ty.as_ref());
        let expected = ty.as_ref().filter(|_| first.ty.is_some());

        let value = self.expr(&first.value, expected);
        let binder = self.bind(first.binder, ty);
        let body = self.let_bindings(rest, body);

        Some(trees::Expr::let_in(binder?, value?, body?))
    }
}

/// The 1-based index of a tuple field name `_1`, `_2`...
fn tuple_index(name: Name) -> Option<usize> {
    let digits = name.as_str().strip_prefix('_')?;

    match digits.parse::<usize>() {
        Ok(index) if index > 0 && !digits.starts_with('0') => Some(index),
        _ => None,
    }
}
