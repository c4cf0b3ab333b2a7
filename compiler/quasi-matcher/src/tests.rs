use pretty_assertions::assert_eq;
use quasi_lexer::{lex, Interpolation};
use quasi_parser::{parse_expr, parse_type};
use quasi_source::identifier::Identifier;
use quasi_template::{compile::Compiler, resolve::TypeResolver, Expr, Type, Value};
use quasi_trees::{self as trees, AdtConstructor, FunDef, Lit, Operator, Symbols, ValDef};

use crate::{Match, Matcher};

struct Env {
    symbols: Symbols,
    resolver: TypeResolver,
    list: Identifier,
    cons: Identifier,
    nil: Identifier,
    head: Identifier,
    size: Identifier,
}

fn env() -> Env {
    let list = Identifier::fresh("List");
    let cons = Identifier::fresh("Cons");
    let nil = Identifier::fresh("Nil");
    let head = Identifier::fresh("head");
    let size = Identifier::fresh("size");
    let list_ty = trees::Type::Adt { id: list, tps: vec![] };

    let mut symbols = Symbols::new();
    symbols
        .add_sort(
            list,
            vec![],
            vec![
                AdtConstructor {
                    id: cons,
                    sort: list,
                    fields: vec![
                        ValDef::new(head, trees::Type::Integer),
                        ValDef::new(Identifier::fresh("tail"), list_ty.clone()),
                    ],
                },
                AdtConstructor { id: nil, sort: list, fields: vec![] },
            ],
        )
        .add_function(FunDef {
            id: size,
            tparams: vec![],
            params: vec![ValDef::new(Identifier::fresh("xs"), list_ty)],
            return_type: trees::Type::Integer,
        });

    let resolver = TypeResolver::new(&symbols);
    Env { symbols, resolver, list, cons, nil, head, size }
}

impl Env {
    fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.symbols, &self.resolver)
    }

    /// Parse a template, a hole is placed between consecutive parts.
    fn template(&self, parts: &[&str]) -> Expr {
        let stream = lex(parts, Interpolation::Holes).unwrap();
        parse_expr(&stream, &self.symbols, &[]).unwrap()
    }

    fn type_template(&self, parts: &[&str]) -> Type {
        let stream = lex(parts, Interpolation::Holes).unwrap();
        parse_type(&stream, &self.symbols, &[]).unwrap()
    }

    fn matches(&self, expr: &trees::Expr, parts: &[&str]) -> Option<Match> {
        self.matcher().matches(expr, &self.template(parts))
    }

    fn matches_type(&self, ty: &trees::Type, parts: &[&str]) -> Option<Match> {
        self.matcher().matches_type(ty, &self.type_template(parts))
    }
}

fn var(name: &str, ty: trees::Type) -> ValDef {
    ValDef::new(Identifier::fresh(name), ty)
}

fn plus(lhs: trees::Expr, rhs: trees::Expr) -> trees::Expr {
    trees::Expr::op(Operator::Plus, vec![lhs, rhs])
}

#[test]
fn holes_match_any_node() {
    let env = env();
    let a = var("a", trees::Type::Integer);
    let exprs = [
        trees::Expr::int(1),
        a.to_variable(),
        trees::Expr::lambda(vec![a.clone()], a.to_variable()),
        trees::Expr::FiniteSet { elements: vec![], base: trees::Type::Untyped },
    ];

    for expr in exprs {
        let m = env.matches(&expr, &["", ""]).unwrap();
        assert_eq!(m.into_values(), vec![Value::Expr(expr)]);
    }
}

#[test]
fn holes_bind_in_index_order() {
    let env = env();
    let product = trees::Expr::op(Operator::Times, vec![trees::Expr::int(2), trees::Expr::int(3)]);
    let expr = plus(trees::Expr::int(1), product);

    let m = env.matches(&expr, &["", " + ", " * ", ""]).unwrap();
    assert_eq!(
        m.into_values(),
        vec![
            Value::Expr(trees::Expr::int(1)),
            Value::Expr(trees::Expr::int(2)),
            Value::Expr(trees::Expr::int(3))
        ]
    );

    assert_eq!(env.matches(&expr, &["", " * ", ""]), None);
}

#[test]
fn free_variables_are_canonical() {
    let env = env();
    let a = var("a", trees::Type::Integer);
    let b = var("b", trees::Type::Integer);

    let twice = plus(a.to_variable(), a.to_variable());
    assert_eq!(env.matches(&twice, &["x + x"]), Some(Match::empty()));
    assert_eq!(env.matches(&plus(a.to_variable(), b.to_variable()), &["x + x"]), None);

    // two template names cannot stand for one host variable either
    assert_eq!(env.matches(&twice, &["x + y"]), None);
    assert!(env.matches(&plus(a.to_variable(), b.to_variable()), &["x + y"]).is_some());
}

#[test]
fn binders_match_up_to_renaming() {
    let env = env();
    let y = var("y", trees::Type::Integer);
    let lambda =
        |n| trees::Expr::lambda(vec![y.clone()], plus(y.to_variable(), trees::Expr::int(n)));

    assert!(env.matches(&lambda(1), &["lambda x. x + 1"]).is_some());
    assert_eq!(env.matches(&lambda(2), &["lambda x. x + 1"]), None);
    assert!(env.matches(&lambda(1), &["lambda x: BigInt. x + 1"]).is_some());
    assert_eq!(env.matches(&lambda(1), &["lambda x: Int. x + 1"]), None);

    // a bound variable is not a free one
    let doubled = trees::Expr::lambda(vec![y.clone()], plus(y.to_variable(), y.to_variable()));
    assert_eq!(env.matches(&doubled, &["lambda x. x + z"]), None);
    assert!(env.matches(&doubled, &["lambda x. x + x"]).is_some());
}

#[test]
fn binders_shadow_free_variables() {
    let env = env();
    let a = var("a", trees::Type::Integer);
    let b = var("b", trees::Type::Integer);

    // `x` is free on the left of `&&` and bound to `b` on the right
    let expr = trees::Expr::op(
        Operator::And,
        vec![
            trees::Expr::op(Operator::Equals, vec![a.to_variable(), a.to_variable()]),
            trees::Expr::forall(
                vec![b.clone()],
                trees::Expr::op(Operator::Equals, vec![b.to_variable(), b.to_variable()]),
            ),
        ],
    );

    assert!(env.matches(&expr, &["x == x && forall x. x == x"]).is_some());
    assert_eq!(env.matches(&expr, &["x == x && exists x. x == x"]), None);

    // the binder goes out of scope after the quantifier
    let expr = trees::Expr::op(
        Operator::And,
        vec![
            trees::Expr::forall(
                vec![b.clone()],
                trees::Expr::op(Operator::Equals, vec![b.to_variable(), a.to_variable()]),
            ),
            trees::Expr::op(Operator::Equals, vec![a.to_variable(), a.to_variable()]),
        ],
    );

    assert!(env.matches(&expr, &["(forall x. x == y) && y == y"]).is_some());
    assert!(env.matches(&expr, &["(forall x. x == y) && z == z"]).is_none());

    let expr = trees::Expr::op(
        Operator::And,
        vec![
            trees::Expr::forall(
                vec![b.clone()],
                trees::Expr::op(Operator::Equals, vec![b.to_variable(), b.to_variable()]),
            ),
            trees::Expr::op(Operator::Equals, vec![a.to_variable(), a.to_variable()]),
        ],
    );

    assert!(env.matches(&expr, &["(forall x. x == x) && x == x"]).is_some());
}

#[test]
fn quantifiers_bind_all_parameters() {
    let env = env();
    let p = var("p", trees::Type::Boolean);
    let q = var("q", trees::Type::Boolean);
    let expr = trees::Expr::exists(
        vec![p.clone(), q.clone()],
        trees::Expr::op(Operator::Implies, vec![p.to_variable(), q.to_variable()]),
    );

    assert!(env.matches(&expr, &["exists a, b: Boolean. a ==> b"]).is_some());
    assert_eq!(env.matches(&expr, &["exists a, b. b ==> a"]), None);
    assert_eq!(env.matches(&expr, &["exists a. a ==> a"]), None);

    let m = env.matches(&expr, &["exists ", ", b. ", ""]).unwrap();
    assert_eq!(m.get(0), Some(&Value::Ident(p.id)));
    let body = trees::Expr::op(Operator::Implies, vec![p.to_variable(), q.to_variable()]);
    assert_eq!(m.expr(1), Some(&body));
}

#[test]
fn choose_binds_one_identifier() {
    let env = env();
    let n = var("n", trees::Type::Integer);
    let expr = trees::Expr::choose(
        n.clone(),
        trees::Expr::op(Operator::GreaterThan, vec![n.to_variable(), trees::Expr::int(0)]),
    );

    assert!(env.matches(&expr, &["choose k. k > 0"]).is_some());
    assert_eq!(env.matches(&expr, &["choose k. k < 0"]), None);
    assert_eq!(env.matches(&expr, &["lambda k. k > 0"]), None);
}

#[test]
fn let_bindings_are_matched_one_by_one() {
    let env = env();
    let a = var("a", trees::Type::Integer);
    let b = var("b", trees::Type::Integer);
    let expr = trees::Expr::let_in(
        a.clone(),
        trees::Expr::int(1),
        trees::Expr::let_in(b.clone(), a.to_variable(), b.to_variable()),
    );

    assert!(env.matches(&expr, &["let x = 1, y = x in y"]).is_some());
    assert!(env.matches(&expr, &["let x = 1 in let y = x in y"]).is_some());
    assert_eq!(env.matches(&expr, &["let x = 1, y = x in x"]), None);
    assert_eq!(env.matches(&expr, &["let x = 1, y = 1 in y"]), None);
    assert_eq!(env.matches(&expr, &["let x = 1, y = x, z = y in z"]), None);

    let m = env.matches(&expr, &["let x: ", " = ", " in ", ""]).unwrap();
    assert_eq!(m.ty(0), Some(&trees::Type::Integer));
    assert_eq!(m.expr(1), Some(&trees::Expr::int(1)));
    assert_eq!(m.len(), 3);
}

#[test]
fn arities_must_agree() {
    let env = env();
    let [p, q, r] = ["p", "q", "r"].map(|name| var(name, trees::Type::Boolean).to_variable());

    let and3 = trees::Expr::op(Operator::And, vec![p.clone(), q.clone(), r.clone()]);
    let and2 = trees::Expr::op(Operator::And, vec![p.clone(), q.clone()]);
    assert_eq!(env.matches(&and3, &["", " && ", ""]), None);
    assert!(env.matches(&and2, &["", " && ", ""]).is_some());

    let pair = &["(", ", ", ")"];
    assert!(env.matches(&trees::Expr::Tuple(vec![p.clone(), q.clone()]), pair).is_some());
    assert_eq!(env.matches(&trees::Expr::Tuple(vec![p.clone()]), pair), None);
    assert_eq!(env.matches(&trees::Expr::Tuple(vec![p, q, r]), pair), None);
}

#[test]
fn numerals_match_by_value() {
    let env = env();

    assert!(env.matches(&trees::Expr::int(2), &["2"]).is_some());
    assert!(env.matches(&trees::Expr::lit(Lit::bv(2, 8)), &["2"]).is_some());
    assert!(env.matches(&trees::Expr::lit(Lit::bv(2, 32)), &["2"]).is_some());
    assert!(env.matches(&trees::Expr::lit(Lit::fraction(3, 2)), &["1.5"]).is_some());
    assert_eq!(env.matches(&trees::Expr::lit(Lit::fraction(3, 4)), &["1.5"]), None);
    assert!(env.matches(&trees::Expr::int(-4), &["-4"]).is_some());
    assert!(env.matches(&trees::Expr::int(-4), &["- 4"]).is_some());

    // the annotation is what checks the width
    assert!(env.matches(&trees::Expr::lit(Lit::bv(2, 32)), &["(2 : Int)"]).is_some());
    assert_eq!(env.matches(&trees::Expr::lit(Lit::bv(2, 8)), &["(2 : Int)"]), None);
}

#[test]
fn annotations_match_types() {
    let env = env();
    let s = var("s", trees::Type::set(trees::Type::Char));

    let m = env.matches(&s.to_variable(), &["(x : Set[", "])"]).unwrap();
    assert_eq!(m.ty(0), Some(&trees::Type::Char));
    assert_eq!(env.matches(&s.to_variable(), &["(x : Bag[Char])"]), None);
}

#[test]
fn set_element_types_are_optional() {
    let env = env();
    let a = var("a", trees::Type::Integer);
    let set =
        trees::Expr::FiniteSet { elements: vec![a.to_variable()], base: trees::Type::Integer };

    assert!(env.matches(&set, &["{x}"]).is_some());
    assert!(env.matches(&set, &["{x}[BigInt]"]).is_some());
    assert_eq!(env.matches(&set, &["{x}[Int]"]), None);
    assert_eq!(env.matches(&set, &["{x, y}"]), None);

    let m = env.matches(&set, &["{x}[", "]"]).unwrap();
    assert_eq!(m.ty(0), Some(&trees::Type::Integer));
}

#[test]
fn collection_operations_match_element_types() {
    let env = env();
    let s = var("s", trees::Type::set(trees::Type::Integer));
    let m = var("m", trees::Type::map(trees::Type::Char, trees::Type::Real));

    let add = trees::Expr::op(Operator::SetAdd, vec![s.to_variable(), trees::Expr::int(1)]);
    assert!(env.matches(&add, &["setAdd(s, 1)"]).is_some());
    assert!(env.matches(&add, &["setAdd[BigInt](s, 1)"]).is_some());
    assert_eq!(env.matches(&add, &["setAdd[Char](s, 1)"]), None);

    let member =
        trees::Expr::op(Operator::ElementOfSet, vec![trees::Expr::int(1), s.to_variable()]);
    assert!(env.matches(&member, &["elementOfSet[BigInt](1, s)"]).is_some());

    let key = trees::Expr::lit(Lit::Char('c'));
    let apply = trees::Expr::op(Operator::MapApply, vec![m.to_variable(), key]);
    assert!(env.matches(&apply, &["mapApply[Char, Real](m, 'c')"]).is_some());
    assert!(env.matches(&apply, &["mapApply[Real](m, 'c')"]).is_some());
    assert_eq!(env.matches(&apply, &["mapApply[Real, Char](m, 'c')"]), None);

    // type arguments are meaningless on other operations
    let sum = plus(trees::Expr::int(1), trees::Expr::int(2));
    assert_eq!(env.matches(&sum, &["(1 + 2)[BigInt]"]), None);
}

#[test]
fn membership_takes_element_types_from_the_set_operand() {
    let env = env();
    let e = var("e", trees::Type::set(trees::Type::INT32));
    let s = var("s", trees::Type::set(trees::Type::set(trees::Type::INT32)));
    let member = trees::Expr::op(Operator::ElementOfSet, vec![e.to_variable(), s.to_variable()]);

    assert!(env.matches(&member, &["elementOfSet[Set[Int]](", ", ", ")"]).is_some());
    assert_eq!(env.matches(&member, &["elementOfSet[Int](", ", ", ")"]), None);

    let bag = var("b", trees::Type::bag(trees::Type::Char));
    let count = trees::Expr::op(
        Operator::MultiplicityInBag,
        vec![trees::Expr::lit(Lit::Char('a')), bag.to_variable()],
    );
    assert!(env.matches(&count, &["multiplicity[Char]('a', ", ")"]).is_some());
}

#[test]
fn bag_and_map_literals() {
    let env = env();
    let bag = trees::Expr::FiniteBag {
        elements: vec![(trees::Expr::lit(Lit::Char('a')), trees::Expr::int(2))],
        base: trees::Type::Char,
    };

    assert!(env.matches(&bag, &["{| 'a' -> 2 |}"]).is_some());
    assert_eq!(env.matches(&bag, &["{| 'a' -> 3 |}"]), None);
    let m = env.matches(&bag, &["{| ", " -> ", " |}"]).unwrap();
    assert_eq!(m.len(), 2);

    let map = trees::Expr::FiniteMap {
        pairs: vec![(trees::Expr::lit(Lit::Char('a')), trees::Expr::int(1))],
        default: Box::new(trees::Expr::int(0)),
        key: trees::Type::Char,
        value: trees::Type::Integer,
    };

    assert!(env.matches(&map, &["{'a' -> 1, * -> 0}"]).is_some());
    assert!(env.matches(&map, &["{'a' -> 1, * : BigInt -> 0}"]).is_some());
    assert_eq!(env.matches(&map, &["{'a' -> 1, * : Char -> 0}"]), None);

    let m = env.matches(&map, &["{'a' -> 1, * -> ", "}"]).unwrap();
    assert_eq!(m.expr(0), Some(&trees::Expr::int(0)));
}

#[test]
fn invocations_and_constructors() {
    let env = env();
    let nil = trees::Expr::Adt { id: env.nil, tps: vec![], args: vec![] };
    let args = vec![trees::Expr::int(1), nil.clone()];
    let list = trees::Expr::Adt { id: env.cons, tps: vec![], args };
    let call =
        trees::Expr::FunctionInvocation { id: env.size, tps: vec![], args: vec![list.clone()] };

    assert!(env.matches(&nil, &["Nil"]).is_some());
    assert!(env.matches(&nil, &["Nil()"]).is_some());
    assert!(env.matches(&call, &["size(Cons(1, Nil))"]).is_some());
    assert_eq!(env.matches(&call, &["size(Cons(2, Nil))"]), None);
    assert_eq!(env.matches(&list, &["Cons(1)"]), None);
    assert_eq!(env.matches(&list, &["size(1, Nil)"]), None);

    let m = env.matches(&call, &["size(Cons(", ", ", "))"]).unwrap();
    assert_eq!(m.into_values(), vec![Value::Expr(trees::Expr::int(1)), Value::Expr(nil)]);
}

#[test]
fn selections_and_constructor_tests() {
    let env = env();
    let xs = var("xs", trees::Type::Adt { id: env.list, tps: vec![] });
    let head = trees::Expr::AdtSelector { adt: Box::new(xs.to_variable()), selector: env.head };

    assert!(env.matches(&head, &["l.head"]).is_some());
    assert_eq!(env.matches(&head, &["l.tail"]), None);

    let m = env.matches(&head, &["l.", ""]).unwrap();
    assert_eq!(m.get(0), Some(&Value::Ident(env.head)));

    let is_cons = trees::Expr::IsConstructor { expr: Box::new(xs.to_variable()), id: env.cons };
    assert!(env.matches(&is_cons, &["l is Cons"]).is_some());
    assert_eq!(env.matches(&is_cons, &["l is Nil"]), None);

    let pair = trees::Expr::Tuple(vec![trees::Expr::int(1), trees::Expr::int(2)]);
    let second = trees::Expr::tuple_select(pair, 2);
    assert!(env.matches(&second, &["(1, 2)._2"]).is_some());
    assert_eq!(env.matches(&second, &["(1, 2)._1"]), None);
}

#[test]
fn conditionals() {
    let env = env();
    let c = var("c", trees::Type::Boolean);
    let expr = trees::Expr::if_expr(c.to_variable(), trees::Expr::int(1), trees::Expr::int(2));

    assert!(env.matches(&expr, &["if (c) 1 else 2"]).is_some());
    assert_eq!(env.matches(&expr, &["if (c) 2 else 1"]), None);
    assert_eq!(env.matches(&expr, &["if (!c) 1 else 2"]), None);
}

#[test]
fn spliced_expressions_match_by_equality() {
    let env = env();
    let a = var("a", trees::Type::Integer);
    let values = [Value::Expr(a.to_variable())];
    let kinds = values.iter().map(Value::kind).collect::<Vec<_>>();
    let stream = lex(&["", " + 1"], Interpolation::Splices(&kinds)).unwrap();
    let template = parse_expr(&stream, &env.symbols, &values).unwrap();

    let sum = plus(a.to_variable(), trees::Expr::int(1));
    assert!(env.matcher().matches(&sum, &template).is_some());
    let b = var("b", trees::Type::Integer);
    assert_eq!(env.matcher().matches(&plus(b.to_variable(), trees::Expr::int(1)), &template), None);
}

#[test]
fn type_templates() {
    let env = env();
    let t = Identifier::fresh("T");

    assert!(env.matches_type(&trees::Type::INT32, &["Int"]).is_some());
    assert!(env.matches_type(&trees::Type::BV { signed: true, size: 8 }, &["Int8"]).is_some());
    assert_eq!(env.matches_type(&trees::Type::Integer, &["Int"]), None);
    assert!(env.matches_type(&trees::Type::Adt { id: env.list, tps: vec![] }, &["List"]).is_some());
    assert!(env.matches_type(&trees::Type::Parameter(t), &["T"]).is_some());

    let ty = trees::Type::function(
        vec![trees::Type::map(trees::Type::Char, trees::Type::Integer), trees::Type::Boolean],
        trees::Type::Tuple(vec![trees::Type::Unit, trees::Type::Real]),
    );
    assert!(env.matches_type(&ty, &["(Map[Char, BigInt], Boolean) => (Unit, Real)"]).is_some());
    assert_eq!(env.matches_type(&ty, &["Map[Char, BigInt] => (Unit, Real)"]), None);

    let m = env.matches_type(&ty, &["(Map[", ", BigInt], ", ") => ", ""]).unwrap();
    assert_eq!(
        m.into_values(),
        vec![
            Value::Type(trees::Type::Char),
            Value::Type(trees::Type::Boolean),
            Value::Type(trees::Type::Tuple(vec![trees::Type::Unit, trees::Type::Real]))
        ]
    );

    let single = trees::Type::function(vec![trees::Type::Char], trees::Type::Char);
    assert!(env.matches_type(&single, &["Char => Char"]).is_some());
}

#[test]
fn compiled_templates_match_their_values() {
    let env = env();
    let a = var("a", trees::Type::Integer);
    let values = [
        Value::Expr(a.to_variable()),
        Value::Type(trees::Type::Integer),
        Value::Expr(trees::Expr::int(3)),
    ];

    let template = env.template(&[
        "lambda k: Set[BigInt]. elementOfSet(",
        ", {x}[",
        "]) && k == k && ",
        " > 0",
    ]);
    let compiled = Compiler::new(&env.symbols, &env.resolver, &values)
        .allow_free_names(true)
        .compile_expr(&template)
        .unwrap();

    let m = env.matcher().matches(&compiled, &template).unwrap();
    assert_eq!(m.into_values(), values.to_vec());
}
