use pretty_assertions::assert_eq;
use quasi_source::identifier::Identifier;
use quasi_trees::{Lit, Operator, ValDef};

use super::*;

fn plus(lhs: trees::Expr, rhs: trees::Expr) -> trees::Expr {
    trees::Expr::op(Operator::Plus, vec![lhs, rhs])
}

#[test]
fn spliced_values_are_compiled_in_place() {
    let symbols = Symbols::new();
    let quote = Quote::new(&symbols);
    let a = ValDef::new(Identifier::fresh("a"), trees::Type::Integer);

    let template = quote.parse_expr(&["", " + 1"], &[Value::Expr(a.to_variable())]).unwrap();
    let expr = quote.compile(&template, &[]).unwrap();

    assert_eq!(expr, plus(a.to_variable(), trees::Expr::int(1)));
}

#[test]
fn compiled_patterns_match_their_values() {
    let symbols = Symbols::new();
    let quote = Quote::new(&symbols);
    let values = vec![Value::Expr(trees::Expr::int(1)), Value::Expr(trees::Expr::int(2))];

    let template = quote.pattern(&["", " + ", ""]).unwrap();
    let expr = quote.compile(&template, &values).unwrap();

    assert_eq!(expr, plus(trees::Expr::int(1), trees::Expr::int(2)));
    assert_eq!(quote.matches(&expr, &template).unwrap().into_values(), values);
}

#[test]
fn free_names_need_to_be_allowed() {
    let symbols = Symbols::new();
    let template = Quote::new(&symbols).pattern(&["x + x"]).unwrap();

    let strict = Quote::new(&symbols);
    assert!(matches!(strict.compile(&template, &[]), Err(QuoteError::Compile(_))));

    let lenient = Quote::with_settings(&symbols, QuoteSettings::new().allow_free_names(true));
    let expr = lenient.compile(&template, &[]).unwrap();
    let trees::Expr::Operation { args, .. } = &expr else { panic!("expected an operation") };
    assert_eq!(args[0], args[1]);
    assert!(lenient.matches(&expr, &template).is_some());
}

#[test]
fn errors_come_from_the_failing_stage() {
    let symbols = Symbols::new();
    let quote = Quote::new(&symbols);

    assert!(matches!(quote.pattern(&["(a"]), Err(QuoteError::Lex(_))));
    assert!(matches!(quote.pattern(&["a +"]), Err(QuoteError::Parse(_))));

    // one splice for two boundaries
    let splices = [Value::Expr(trees::Expr::int(1))];
    assert!(matches!(quote.parse_expr(&["", "+", ""], &splices), Err(QuoteError::Lex(_))));

    let unknown = quote.parse_type(&["Foo"], &[]).unwrap();
    let err = quote.resolve(&unknown).unwrap_err();
    assert!(matches!(err, QuoteError::Resolve(_)));
    assert_eq!(err.to_string(), "unknown type `Foo`");
}

#[test]
fn type_templates_resolve_and_match() {
    let symbols = Symbols::new();
    let quote = Quote::new(&symbols);

    let template = quote.parse_type(&["Map[Int, Boolean]"], &[]).unwrap();
    let map = trees::Type::map(trees::Type::INT32, trees::Type::Boolean);
    assert_eq!(quote.resolve(&template).unwrap(), map);

    let spliced = quote.parse_type(&["Set[", "]"], &[Value::Type(trees::Type::Char)]).unwrap();
    assert_eq!(quote.compile_type(&spliced, &[]).unwrap(), trees::Type::set(trees::Type::Char));

    let pattern = quote.type_pattern(&["Map[Int, ", "]"]).unwrap();
    let m = quote.matches_type(&map, &pattern).unwrap();
    assert_eq!(m.into_values(), vec![Value::Type(trees::Type::Boolean)]);
    assert_eq!(quote.matches_type(&trees::Type::set(trees::Type::Char), &pattern), None);
}

#[test]
fn spliced_literals_match_by_equality() {
    let symbols = Symbols::new();
    let quote = Quote::new(&symbols);
    let text = trees::Expr::lit(Lit::Str("quasi".to_string()));

    let template = quote.parse_expr(&["", " == ", ""], &[text.clone().into(), text.clone().into()]);
    let template = template.unwrap();
    let equals = trees::Expr::op(Operator::Equals, vec![text.clone(), text]);

    assert_eq!(quote.matches(&equals, &template).map(|m| m.len()), Some(0));
}
