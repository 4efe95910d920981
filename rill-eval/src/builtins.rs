//! The sixteen built-in functions (§4.3 "Identifiers", §6 builtin table).
//!
//! A name resolves to a builtin only once `Environment::get` has already
//! missed at every frame (§4.3): identifiers still shadow builtins, not
//! the other way around. Builtins that need to call back into user code
//! (`map`/`filter`/`reduce`) go through `Interpreter::apply_function`,
//! which is why `call_builtin` takes the interpreter rather than being a
//! free function over `Vec<Value>`.

use std::io::Write;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::evaluator::{as_f64, Interpreter};
use crate::value::Value;

const NAMES: &[&str] = &[
    "len", "print", "type", "time", "input", "str", "int", "float", "abs", "round", "max", "min",
    "sum", "map", "filter", "reduce",
];

pub(crate) fn is_builtin_name(name: &str) -> bool {
    NAMES.contains(&name)
}

/// Builtins are looked up by name at identifier-resolution time and
/// stored as a `'static` tag on the `Value::Builtin` variant, so this just
/// echoes the input back once it's confirmed to be one of `NAMES`.
pub(crate) fn canonical_name(name: &str) -> &'static str {
    NAMES.iter().find(|n| **n == name).copied().unwrap_or("len")
}

pub(crate) fn call_builtin<W: Write>(
    interp: &mut Interpreter<W>,
    name: &'static str,
    args: Vec<Value>,
) -> Value {
    match name {
        "len" => len_builtin(args),
        "print" => print_builtin(interp, args),
        "type" => type_builtin(args),
        "time" => time_builtin(args),
        "input" => input_builtin(args),
        "str" => str_builtin(args),
        "int" => int_builtin(args),
        "float" => float_builtin(args),
        "abs" => abs_builtin(args),
        "round" => round_builtin(args),
        "max" => max_builtin(args),
        "min" => min_builtin(args),
        "sum" => sum_builtin(args),
        "map" => map_builtin(interp, args),
        "filter" => filter_builtin(interp, args),
        "reduce" => reduce_builtin(interp, args),
        _ => Value::Error(format!("unknown builtin: {name}").into()),
    }
}

fn wrong_arity(got: usize, want: &str) -> Value {
    Value::Error(format!("wrong number of arguments. got={got}, want={want}").into())
}

fn len_builtin(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), "1");
    }
    match &args[0] {
        Value::String(s) => Value::Integer(s.chars().count() as i64),
        Value::Array(elements) => Value::Integer(elements.borrow().len() as i64),
        other => Value::Error(format!("argument to `len` not supported, got {}", other.type_name()).into()),
    }
}

fn print_builtin<W: Write>(interp: &mut Interpreter<W>, args: Vec<Value>) -> Value {
    let rendered: Vec<String> = args.iter().map(Value::inspect).collect();
    let _ = writeln!(interp.out, "{}", rendered.join(" "));
    Value::Null
}

fn type_builtin(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), "1");
    }
    Value::String(Rc::from(args[0].type_name()))
}

fn time_builtin(_args: Vec<Value>) -> Value {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    Value::Float(secs)
}

fn input_builtin(args: Vec<Value>) -> Value {
    if args.len() > 1 {
        return wrong_arity(args.len(), "0 or 1");
    }
    if let Some(Value::String(prompt)) = args.first() {
        print!("{prompt}");
        let _ = std::io::stdout().flush();
    }
    let mut line = String::new();
    match std::io::stdin().read_line(&mut line) {
        Ok(_) => {
            let trimmed = line.trim_end_matches(['\n', '\r']);
            Value::String(Rc::from(trimmed))
        }
        Err(e) => Value::Error(format!("input failed: {e}").into()),
    }
}

fn str_builtin(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), "1");
    }
    Value::String(Rc::from(args[0].inspect()))
}

fn int_builtin(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), "1");
    }
    match &args[0] {
        Value::Integer(v) => Value::Integer(*v),
        Value::Float(v) => Value::Integer(*v as i64),
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(v) => Value::Integer(v),
            Err(_) => Value::Error(format!("could not convert {} to integer", args[0].inspect()).into()),
        },
        other => Value::Error(format!("argument to `int` not supported, got {}", other.type_name()).into()),
    }
}

fn float_builtin(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), "1");
    }
    match &args[0] {
        Value::Integer(v) => Value::Float(*v as f64),
        Value::Float(v) => Value::Float(*v),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) => Value::Float(v),
            Err(_) => Value::Error(format!("could not convert {} to float", args[0].inspect()).into()),
        },
        other => Value::Error(format!("argument to `float` not supported, got {}", other.type_name()).into()),
    }
}

fn abs_builtin(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), "1");
    }
    match &args[0] {
        Value::Integer(v) => Value::Integer(v.wrapping_abs()),
        Value::Float(v) => Value::Float(v.abs()),
        other => Value::Error(format!("argument to `abs` not supported, got {}", other.type_name()).into()),
    }
}

/// One-argument `round` returns Integer (banker's rounding, matching the
/// host language's `round()`); two-argument `round` always returns Float
/// even when the first argument was an Integer (§4.3 builtin table, ground
/// truth is the source's own `round_builtin`).
fn round_builtin(args: Vec<Value>) -> Value {
    if args.is_empty() || args.len() > 2 {
        return wrong_arity(args.len(), "1 or 2");
    }
    if !matches!(args[0], Value::Integer(_) | Value::Float(_)) {
        return Value::Error(
            format!("argument to `round` not supported, got {}", args[0].type_name()).into(),
        );
    }
    let value = as_f64(&args[0]);
    if args.len() == 1 {
        return Value::Integer(round_half_even(value) as i64);
    }
    let Value::Integer(digits) = &args[1] else {
        return Value::Error(
            format!(
                "second argument to `round` must be an integer, got {}",
                args[1].type_name()
            )
            .into(),
        );
    };
    Value::Float(round_to(value, *digits))
}

fn round_half_even(x: f64) -> f64 {
    let floor = x.floor();
    let diff = x - floor;
    if diff < 0.5 {
        floor
    } else if diff > 0.5 {
        floor + 1.0
    } else if (floor as i64) % 2 == 0 {
        floor
    } else {
        floor + 1.0
    }
}

fn round_to(x: f64, digits: i64) -> f64 {
    let scale = 10f64.powi(digits as i32);
    round_half_even(x * scale) / scale
}

fn builtin_cmp(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            as_f64(a).partial_cmp(&as_f64(b))
        }
        (Value::String(x), Value::String(y)) => x.as_ref().partial_cmp(y.as_ref()),
        (Value::Boolean(x), Value::Boolean(y)) => x.partial_cmp(y),
        _ => None,
    }
}

fn extremum(args: Vec<Value>, name: &str, pick_max: bool) -> Value {
    let candidates = if let Some(Value::Array(elements)) = args.first() {
        if args.len() != 1 {
            return wrong_arity(args.len(), "1");
        }
        elements.borrow().clone()
    } else {
        args
    };
    if candidates.is_empty() {
        return Value::Error(format!("{name}() expected 1 argument, got 0").into());
    }
    let mut best = candidates[0].clone();
    for candidate in &candidates[1..] {
        match builtin_cmp(candidate, &best) {
            Some(ord) => {
                let replace = if pick_max {
                    ord == std::cmp::Ordering::Greater
                } else {
                    ord == std::cmp::Ordering::Less
                };
                if replace {
                    best = candidate.clone();
                }
            }
            None => {
                return Value::Error(
                    format!("argument to `{name}` not supported, got {}", candidate.type_name()).into(),
                )
            }
        }
    }
    best
}

fn max_builtin(args: Vec<Value>) -> Value {
    extremum(args, "max", true)
}

fn min_builtin(args: Vec<Value>) -> Value {
    extremum(args, "min", false)
}

fn sum_builtin(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_arity(args.len(), "1");
    }
    let Value::Array(elements) = &args[0] else {
        return Value::Error(
            format!("argument to `sum` must be an array, got {}", args[0].type_name()).into(),
        );
    };
    let elements = elements.borrow();
    let mut any_float = false;
    let mut total = 0.0f64;
    for el in elements.iter() {
        match el {
            Value::Integer(v) => total += *v as f64,
            Value::Float(v) => {
                any_float = true;
                total += v;
            }
            _ => return Value::Error("can only sum numbers".into()),
        }
    }
    if any_float {
        Value::Float(total)
    } else {
        Value::Integer(total as i64)
    }
}

fn map_builtin<W: Write>(interp: &mut Interpreter<W>, args: Vec<Value>) -> Value {
    if args.len() != 2 {
        return wrong_arity(args.len(), "2");
    }
    let (func, arr) = (args[0].clone(), args[1].clone());
    if !matches!(func, Value::Function(_)) {
        return Value::Error("first argument must be a function".into());
    }
    let Value::Array(elements) = arr else {
        return Value::Error("second argument must be an array".into());
    };
    let snapshot = elements.borrow().clone();
    let mut results = Vec::with_capacity(snapshot.len());
    for el in snapshot {
        let r = interp.apply_function(func.clone(), vec![el]);
        if r.is_error() {
            return r;
        }
        results.push(r);
    }
    Value::Array(Rc::new(std::cell::RefCell::new(results)))
}

fn filter_builtin<W: Write>(interp: &mut Interpreter<W>, args: Vec<Value>) -> Value {
    if args.len() != 2 {
        return wrong_arity(args.len(), "2");
    }
    let (func, arr) = (args[0].clone(), args[1].clone());
    if !matches!(func, Value::Function(_)) {
        return Value::Error("first argument must be a function".into());
    }
    let Value::Array(elements) = arr else {
        return Value::Error("second argument must be an array".into());
    };
    let snapshot = elements.borrow().clone();
    let mut results = Vec::new();
    for el in snapshot {
        let r = interp.apply_function(func.clone(), vec![el.clone()]);
        if r.is_error() {
            return r;
        }
        if r.is_truthy() {
            results.push(el);
        }
    }
    Value::Array(Rc::new(std::cell::RefCell::new(results)))
}

fn reduce_builtin<W: Write>(interp: &mut Interpreter<W>, args: Vec<Value>) -> Value {
    if args.len() != 2 && args.len() != 3 {
        return wrong_arity(args.len(), "2 or 3");
    }
    let func = args[0].clone();
    let Value::Array(elements) = &args[1] else {
        return Value::Error("second argument must be an array".into());
    };
    if !matches!(func, Value::Function(_)) {
        return Value::Error("first argument must be a function".into());
    }
    let snapshot = elements.borrow().clone();
    let (mut accumulator, rest): (Value, &[Value]) = if args.len() == 3 {
        (args[2].clone(), &snapshot[..])
    } else {
        if snapshot.is_empty() {
            return Value::Error("reduce of empty sequence with no initial value".into());
        }
        (snapshot[0].clone(), &snapshot[1..])
    };
    for el in rest {
        accumulator = interp.apply_function(func.clone(), vec![accumulator, el.clone()]);
        if accumulator.is_error() {
            return accumulator;
        }
    }
    accumulator
}
