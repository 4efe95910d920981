use rill_lex::Lexer;

use crate::ast::*;
use crate::parser::Parser;

fn parse(source: &str) -> (Program, Vec<String>) {
    let parser = Parser::new(Lexer::new(source));
    let (program, handler) = parser.parse();
    let errors = handler
        .diagnostics()
        .iter()
        .map(|d| d.message.clone())
        .collect();
    (program, errors)
}

#[test]
fn let_statement_with_precedence_climbed_expression() {
    let (program, errors) = parse("let a = 1 + 2 * 3;");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Statement::Let(let_stmt) => {
            assert_eq!(let_stmt.name.name.as_str(), "a");
            match &let_stmt.value {
                Expression::Infix(infix) => {
                    assert_eq!(infix.operator.as_str(), "+");
                    assert!(matches!(*infix.right, Expression::Infix(_)));
                }
                other => panic!("expected infix, got {other:?}"),
            }
        }
        other => panic!("expected let statement, got {other:?}"),
    }
}

#[test]
fn function_call_with_closure_argument() {
    let (program, errors) = parse("add(2, 3);");
    assert!(errors.is_empty(), "{errors:?}");
    match &program.statements[0] {
        Statement::Expression(stmt) => {
            assert!(matches!(stmt.expression, Expression::Call(_)));
        }
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn for_in_disambiguates_from_c_style_for() {
    let (program, errors) = parse("for (x in arr) { print(x) }");
    assert!(errors.is_empty(), "{errors:?}");
    assert!(matches!(program.statements[0], Statement::ForIn(_)));
}

#[test]
fn c_style_for_when_no_in_follows() {
    let (program, errors) = parse("for (let i = 0; i < 3; i = i + 1) { }");
    assert!(errors.is_empty(), "{errors:?}");
    assert!(matches!(program.statements[0], Statement::For(_)));
}

#[test]
fn class_with_superclass_and_methods() {
    let source = "class Dog : Animal { fn init(self, name) { self.name = name } }";
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "{errors:?}");
    match &program.statements[0] {
        Statement::Class(class) => {
            assert_eq!(class.name.name.as_str(), "Dog");
            assert_eq!(class.superclass.as_ref().unwrap().name.as_str(), "Animal");
            assert_eq!(class.body.statements.len(), 1);
        }
        other => panic!("expected class statement, got {other:?}"),
    }
}

#[test]
fn assignment_to_non_target_is_a_parse_error() {
    let (_, errors) = parse("1 + 1 = 2;");
    assert!(!errors.is_empty());
    assert!(errors[0].contains("assignment target"));
}

#[test]
fn missing_closing_paren_records_expected_token_error() {
    let (_, errors) = parse("let a = (1 + 2;");
    assert!(!errors.is_empty());
    assert!(errors[0].contains("expected next token to be"));
}

#[test]
fn member_access_parses_as_dot_infix() {
    let (program, errors) = parse("obj.field;");
    assert!(errors.is_empty(), "{errors:?}");
    match &program.statements[0] {
        Statement::Expression(stmt) => match &stmt.expression {
            Expression::Infix(infix) => assert_eq!(infix.operator.as_str(), "."),
            other => panic!("expected dot-infix, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn hash_literal_preserves_pair_order() {
    let (program, errors) = parse(r#"{"a": 1, "b": 2};"#);
    assert!(errors.is_empty(), "{errors:?}");
    match &program.statements[0] {
        Statement::Expression(stmt) => match &stmt.expression {
            Expression::Hash(hash) => assert_eq!(hash.pairs.len(), 2),
            other => panic!("expected hash literal, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn parsing_is_total_even_with_errors() {
    // a malformed statement should not prevent the rest of the program
    // from being parsed and reported on (§4.2, §8).
    let (program, errors) = parse("let = ; let b = 2;");
    assert!(!errors.is_empty());
    assert!(program.statements.iter().any(|s| matches!(
        s,
        Statement::Let(l) if l.name.name.as_str() == "b"
    )));
}
