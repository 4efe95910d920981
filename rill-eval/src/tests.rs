use rill_lex::Lexer;
use rill_par::Parser;

use crate::environment::Environment;
use crate::evaluator::Interpreter;
use crate::value::Value;

fn eval(source: &str) -> Value {
    let (program, handler) = Parser::new(Lexer::new(source)).parse();
    assert!(!handler.has_errors(), "parse errors: {:?}", handler.diagnostics());
    let mut interp = Interpreter::new(Vec::new());
    let env = Environment::new();
    interp.eval_program(&program, &env)
}

fn eval_capturing_stdout(source: &str) -> (Value, String) {
    let (program, handler) = Parser::new(Lexer::new(source)).parse();
    assert!(!handler.has_errors(), "parse errors: {:?}", handler.diagnostics());
    let mut interp = Interpreter::new(Vec::new());
    let env = Environment::new();
    let result = interp.eval_program(&program, &env);
    (result, String::from_utf8(interp.out).unwrap())
}

#[test]
fn scenario_1_integer_arithmetic() {
    assert_eq!(eval("let a = 5; a + 10;").inspect(), "15");
}

#[test]
fn scenario_2_function_call() {
    assert_eq!(eval("let add = fn(x,y){x+y}; add(2,3);").inspect(), "5");
}

#[test]
fn scenario_3_closure_currying() {
    assert_eq!(
        eval("let mk = fn(x){ fn(y){ x+y } }; mk(2)(3);").inspect(),
        "5"
    );
}

#[test]
fn scenario_4_class_instantiation_and_method_call() {
    let source = r#"
        class P { fn init(self,n){ self.n = n } fn g(self){ return "hi "+self.n } }
        let p = new P("x");
        p.g();
    "#;
    assert_eq!(eval(source).inspect(), "hi x");
}

#[test]
fn scenario_5_reduce_sums_array() {
    assert_eq!(
        eval("let a=[1,2,3]; reduce(fn(x,y){x+y}, a, 0);").inspect(),
        "6"
    );
}

#[test]
fn scenario_6_type_mismatch_error_message() {
    match eval("5 + true;") {
        Value::Error(message) => assert_eq!(&*message, "type mismatch: INTEGER + BOOLEAN"),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn scenario_7_continue_skips_print_and_result_is_null() {
    let source = "for (let i=0; i<3; i=i+1) { if (i==1) { continue } print(i) }";
    let (result, stdout) = eval_capturing_stdout(source);
    assert_eq!(stdout, "0\n2\n");
    assert!(matches!(result, Value::Null));
}

#[test]
fn scenario_8_hash_inspect_preserves_insertion_order() {
    assert_eq!(eval(r#"{"a":1,"b":2}"#).inspect(), "{a: 1, b: 2}");
}

#[test]
fn integer_invariants() {
    assert_eq!(eval("-(-5)").inspect(), "5");
    assert_eq!(eval("~(~5)").inspect(), "5");
    assert_eq!(eval("5 + 0").inspect(), "5");
    assert_eq!(eval("5 * 1").inspect(), "5");
}

#[test]
fn hash_index_and_member_access_agree() {
    assert_eq!(eval(r#"let h = {"k": 9}; h["k"];"#).inspect(), "9");
    assert_eq!(eval(r#"let h = {"k": 9}; h.k;"#).inspect(), "9");
}

#[test]
fn int_str_round_trip() {
    assert_eq!(eval("int(str(42))").inspect(), "42");
}

#[test]
fn map_filter_reduce_length_invariants() {
    assert_eq!(
        eval("len(map(fn(x){x*2}, [1,2,3]))").inspect(),
        "3"
    );
    assert_eq!(
        eval("len(filter(fn(x){x>1}, [1,2,3]))").inspect(),
        "2"
    );
}

#[test]
fn truthiness_double_negation() {
    assert_eq!(eval("!!0").inspect(), "true");
    assert_eq!(eval("!!null").inspect(), "false");
    assert_eq!(eval("!!false").inspect(), "false");
    assert_eq!(eval(r#"!!"""#).inspect(), "true");
}

/// Assignment never walks up the environment chain (§3, §9 resolved), so
/// mutating a captured binding is only observable when the mutation
/// happens in the exact frame a closure captured — here, both `get_n`'s
/// closure and the later `n = 2;` act on the same top-level frame.
#[test]
fn closures_capture_live_frames() {
    let source = r#"
        let n = 1;
        let get_n = fn() { return n; };
        n = 2;
        get_n();
    "#;
    assert_eq!(eval(source).inspect(), "2");
}

#[test]
fn numeric_type_promotion_allows_mixed_integer_float() {
    assert_eq!(eval("1 + 2.5").inspect(), "3.5");
}

#[test]
fn division_by_zero_is_an_error() {
    match eval("1 / 0") {
        Value::Error(message) => assert_eq!(&*message, "division by zero"),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn bitwise_ops_reject_float_operands() {
    assert!(eval("1 & 2.0").is_error());
}

/// `for..in`'s body runs in a single `scope_env` shared across iterations
/// but never visible to statements after the loop (§4.3), so the loop
/// itself is observed through `print` rather than through an outer
/// accumulator that assignment (which never walks up) couldn't reach.
#[test]
fn for_in_over_array_and_string() {
    let (_, stdout) = eval_capturing_stdout("for (x in [1,2,3]) { print(x) }");
    assert_eq!(stdout, "1\n2\n3\n");
    let (_, stdout) = eval_capturing_stdout(r#"for (c in "ab") { print(c) }"#);
    assert_eq!(stdout, "a\nb\n");
}

#[test]
fn superclass_method_dispatch() {
    let source = r#"
        class Animal { fn speak(self) { return "..." } }
        class Dog: Animal { fn init(self) {} }
        let d = new Dog();
        d.speak();
    "#;
    assert_eq!(eval(source).inspect(), "...");
}

#[test]
fn super_call_reaches_parent_method() {
    let source = r#"
        class Animal { fn speak(self) { return "generic" } }
        class Dog: Animal { fn speak(self) { return "dog says " + super.speak() } }
        let d = new Dog();
        d.speak();
    "#;
    assert_eq!(eval(source).inspect(), "dog says generic");
}

#[test]
fn unsupported_constructs_fail_loudly() {
    assert!(eval("import \"x\";").is_error());
    assert!(eval("raise \"boom\";").is_error());
}

#[test]
fn array_and_hash_equality_is_structural() {
    assert_eq!(eval("[1,2] == [1,2]").inspect(), "true");
    assert_eq!(eval(r#"{"a": 1} == {"a": 1}"#).inspect(), "true");
    assert_eq!(eval("[1,2] == [1,3]").inspect(), "false");
}

/// `//` and `%` floor toward negative infinity / take the divisor's sign
/// (§4.1), matching Python rather than Rust's truncating built-ins.
#[test]
fn floor_division_rounds_toward_negative_infinity() {
    assert_eq!(eval("-5 // 2").inspect(), "-3");
    assert_eq!(eval("5 // -2").inspect(), "-3");
    assert_eq!(eval("-5 // -2").inspect(), "2");
}

#[test]
fn modulo_result_takes_the_sign_of_the_divisor() {
    assert_eq!(eval("-5 % 2").inspect(), "1");
    assert_eq!(eval("5 % -2").inspect(), "-1");
    assert_eq!(eval("-5.0 % 2.0").inspect(), "1");
}

/// Integer `**` stays exact past 2^53, unlike a round trip through `f64`.
#[test]
fn integer_exponentiation_is_exact_for_large_results() {
    assert_eq!(eval("10 ** 16").inspect(), "10000000000000000");
}

#[test]
fn compound_assignment_desugars_to_target_op_rhs() {
    assert_eq!(eval("let x = 10; x += 5; x;").inspect(), "15");
    assert_eq!(eval("let x = 10; x //= 3; x;").inspect(), "3");
}
