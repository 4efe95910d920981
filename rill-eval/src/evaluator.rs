//! The recursive tree-walking evaluator (§4.3).
//!
//! `Interpreter` owns nothing but an output sink: all interpreter state
//! lives in the `Environment` chain the caller threads through every
//! call. Evaluating a `Program` folds its statements and unwraps a
//! trailing `ReturnValue`; evaluating a `BlockStatement` does the same
//! fold but leaves `ReturnValue` wrapped, so a function body's last
//! expression can be distinguished from an explicit `return` by its
//! caller (§4.3 "Top level").

use std::io::Write;
use std::rc::Rc;

use rill_par::ast::{
    AssignExpression, BlockStatement, ClassStatement, Expression, ForInStatement, ForStatement,
    Identifier, Program, Statement, WhileStatement,
};
use rill_util::Symbol;

use crate::builtins::{self, is_builtin_name};
use crate::environment::Environment;
use crate::value::{BoundMethodValue, ClassValue, FunctionValue, HashValue, InstanceValue, Value};

pub struct Interpreter<W: Write> {
    pub(crate) out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Interpreter { out }
    }

    pub fn eval_program(&mut self, program: &Program, env: &Environment) -> Value {
        let mut result = Value::Null;
        for stmt in &program.statements {
            result = self.eval_statement(stmt, env);
            match result {
                Value::ReturnValue(inner) => {
                    tracing::debug!(result = %inner.inspect(), "evaluation complete");
                    return *inner;
                }
                Value::Error(_) => {
                    tracing::debug!(result = %result.inspect(), "evaluation complete");
                    return result;
                }
                _ => {}
            }
        }
        tracing::debug!(result = %result.inspect(), "evaluation complete");
        result
    }

    fn eval_block(&mut self, block: &BlockStatement, env: &Environment) -> Value {
        let mut result = Value::Null;
        for stmt in &block.statements {
            result = self.eval_statement(stmt, env);
            if matches!(
                result,
                Value::ReturnValue(_) | Value::Error(_) | Value::BreakValue | Value::ContinueValue
            ) {
                return result;
            }
        }
        result
    }

    fn eval_statement(&mut self, stmt: &Statement, env: &Environment) -> Value {
        match stmt {
            Statement::Let(let_stmt) => {
                let value = self.eval_expression(&let_stmt.value, env);
                if value.is_error() {
                    return value;
                }
                env.set(let_stmt.name.name, value.clone());
                value
            }
            Statement::Return(ret) => {
                let value = match &ret.value {
                    Some(expr) => self.eval_expression(expr, env),
                    None => Value::Null,
                };
                if value.is_error() {
                    return value;
                }
                Value::ReturnValue(Box::new(value))
            }
            Statement::Expression(expr_stmt) => self.eval_expression(&expr_stmt.expression, env),
            Statement::Block(block) => self.eval_block(block, env),
            Statement::While(ws) => self.eval_while(ws, env),
            Statement::For(fs) => self.eval_for(fs, env),
            Statement::ForIn(fis) => self.eval_for_in(fis, env),
            Statement::Class(cs) => self.eval_class_statement(cs, env),
            Statement::Pass(_) => Value::Null,
            Statement::Break(_) => Value::BreakValue,
            Statement::Continue(_) => Value::ContinueValue,
            Statement::Import(_) => unsupported("import"),
            Statement::From(_) => unsupported("from-import"),
            Statement::Try(_) => unsupported("try"),
            Statement::Raise(_) => unsupported("raise"),
            Statement::Assert(_) => unsupported("assert"),
            Statement::With(_) => unsupported("with"),
            Statement::Async(astmt) => self.eval_statement(&astmt.statement, env),
        }
    }

    fn eval_expression(&mut self, expr: &Expression, env: &Environment) -> Value {
        match expr {
            Expression::Integer(lit) => Value::Integer(lit.value),
            Expression::Float(lit) => Value::Float(lit.value),
            Expression::Boolean(lit) => Value::Boolean(lit.value),
            Expression::Null(_) => Value::Null,
            Expression::String(lit) => Value::String(Rc::from(lit.value.as_str())),
            Expression::Binary(lit) => eval_radix_literal(lit.digits.as_str(), 2),
            Expression::Octal(lit) => eval_radix_literal(lit.digits.as_str(), 8),
            Expression::Hex(lit) => eval_radix_literal(lit.digits.as_str(), 16),
            Expression::Identifier(ident) => self.eval_identifier(ident, env),
            Expression::Prefix(prefix) => {
                let right = self.eval_expression(&prefix.right, env);
                if right.is_error() {
                    return right;
                }
                eval_prefix(prefix.operator.as_str(), right)
            }
            Expression::Infix(infix) => {
                let left = self.eval_expression(&infix.left, env);
                if left.is_error() {
                    return left;
                }
                if infix.operator.as_str() == "." {
                    return self.eval_member_access(left, &infix.right, env);
                }
                let right = self.eval_expression(&infix.right, env);
                if right.is_error() {
                    return right;
                }
                eval_infix(infix.operator.as_str(), left, right)
            }
            Expression::Assign(assign) => self.eval_assign(assign, env),
            Expression::Array(arr) => {
                let mut elements = Vec::with_capacity(arr.elements.len());
                for e in &arr.elements {
                    let v = self.eval_expression(e, env);
                    if v.is_error() {
                        return v;
                    }
                    elements.push(v);
                }
                Value::Array(Rc::new(std::cell::RefCell::new(elements)))
            }
            Expression::Index(idx) => {
                let left = self.eval_expression(&idx.left, env);
                if left.is_error() {
                    return left;
                }
                let index = self.eval_expression(&idx.index, env);
                if index.is_error() {
                    return index;
                }
                eval_index(left, index)
            }
            Expression::Hash(hash) => self.eval_hash_literal(&hash.pairs, env),
            Expression::If(if_expr) => {
                let condition = self.eval_expression(&if_expr.condition, env);
                if condition.is_error() {
                    return condition;
                }
                if condition.is_truthy() {
                    self.eval_block(&if_expr.consequence, env)
                } else if let Some(alt) = &if_expr.alternative {
                    self.eval_block(alt, env)
                } else {
                    Value::Null
                }
            }
            Expression::Function(literal) => Value::Function(Rc::new(FunctionValue {
                literal: Rc::new(literal.clone()),
                env: env.clone(),
            })),
            Expression::Call(call) => {
                let function = self.eval_expression(&call.function, env);
                if function.is_error() {
                    return function;
                }
                let mut args = Vec::with_capacity(call.arguments.len());
                for a in &call.arguments {
                    let v = self.eval_expression(a, env);
                    if v.is_error() {
                        return v;
                    }
                    args.push(v);
                }
                self.apply_function(function, args)
            }
            Expression::New(new_expr) => {
                let class = self.eval_expression(&new_expr.class, env);
                if class.is_error() {
                    return class;
                }
                if !matches!(class, Value::Class(_)) {
                    return Value::Error(
                        format!("new requires a class, got {}", class.type_name()).into(),
                    );
                }
                class
            }
            Expression::Super(_) => match env.get(Symbol::intern("super")) {
                Some(v) => v,
                None => Value::Error("identifier not found: super".into()),
            },
            Expression::SelfExpr(_) => match env.get(Symbol::intern("self")) {
                Some(v) => v,
                None => Value::Error("identifier not found: self".into()),
            },
            Expression::Await(await_expr) => self.eval_expression(&await_expr.expression, env),
            Expression::Yield(_) => unsupported("yield"),
        }
    }

    fn eval_identifier(&mut self, ident: &Identifier, env: &Environment) -> Value {
        if let Some(value) = env.get(ident.name) {
            return value;
        }
        if is_builtin_name(ident.name.as_str()) {
            return Value::Builtin(crate::value::Builtin {
                name: builtins::canonical_name(ident.name.as_str()),
            });
        }
        Value::Error(format!("identifier not found: {}", ident.name).into())
    }

    /// `+=`/`-=`/`*=`/`/=`/`%=`/`//=` desugar to `target = target OP rhs`
    /// (§4.2 compound-assignment parselet); plain `=` just rebinds.
    fn eval_assign(&mut self, assign: &AssignExpression, env: &Environment) -> Value {
        let rhs = self.eval_expression(&assign.value, env);
        if rhs.is_error() {
            return rhs;
        }
        let op = assign.operator.as_str();
        match assign.target.as_ref() {
            Expression::Identifier(ident) => {
                let new_value = if op == "=" {
                    rhs
                } else {
                    let current = match env.get(ident.name) {
                        Some(v) => v,
                        None => {
                            return Value::Error(
                                format!("identifier not found: {}", ident.name).into(),
                            )
                        }
                    };
                    eval_infix(strip_assign_suffix(op), current, rhs)
                };
                if new_value.is_error() {
                    return new_value;
                }
                env.set(ident.name, new_value.clone());
                new_value
            }
            Expression::Infix(infix) if infix.operator.as_str() == "." => {
                let left = self.eval_expression(&infix.left, env);
                if left.is_error() {
                    return left;
                }
                let Expression::Identifier(field) = infix.right.as_ref() else {
                    return Value::Error("member name must be identifier".into());
                };
                match left {
                    Value::Instance(instance) => {
                        let new_value = if op == "=" {
                            rhs
                        } else {
                            let current = instance
                                .fields
                                .borrow()
                                .get(&field.name)
                                .cloned()
                                .unwrap_or(Value::Null);
                            eval_infix(strip_assign_suffix(op), current, rhs)
                        };
                        if new_value.is_error() {
                            return new_value;
                        }
                        instance.fields.borrow_mut().insert(field.name, new_value.clone());
                        new_value
                    }
                    other => Value::Error(
                        format!(
                            "cannot assign to member of non-instance: {}",
                            other.type_name()
                        )
                        .into(),
                    ),
                }
            }
            _ => Value::Error("invalid assignment target".into()),
        }
    }

    /// A bare `Class` value only ever reaches this as the `super` keyword's
    /// value (§4.3 `super` binding): `super.m` looks up `m` in that class's
    /// own method table (no further superclass walk) and binds it to the
    /// *current* `self`, not to the class.
    fn eval_member_access(&mut self, left: Value, right: &Expression, env: &Environment) -> Value {
        let Expression::Identifier(field) = right else {
            return Value::Error(format!(
                "member name must be identifier, got {}",
                expr_type_name(right)
            )
            .into());
        };
        match left {
            Value::Instance(instance) => match lookup_member(&instance, field.name) {
                Some(Value::Function(f)) => Value::BoundMethod(Rc::new(BoundMethodValue {
                    function: f,
                    receiver: instance,
                })),
                Some(v) => v,
                None => Value::Error(format!("instance has no member '{}'", field.name).into()),
            },
            Value::Hash(hash) => {
                let key = crate::value::HashKey::String(Rc::from(field.name.as_str()));
                match hash.borrow().get(&key) {
                    Some((_, v)) => v.clone(),
                    None => Value::Error(format!("hash has no key '{}'", field.name).into()),
                }
            }
            Value::Class(class) => match class.methods.borrow().get(&field.name).cloned() {
                Some(f) => match env.get(Symbol::intern("self")) {
                    Some(Value::Instance(receiver)) => {
                        Value::BoundMethod(Rc::new(BoundMethodValue { function: f, receiver }))
                    }
                    _ => Value::Error("super used outside of a method".into()),
                },
                None => Value::Error(format!("instance has no member '{}'", field.name).into()),
            },
            other => {
                Value::Error(format!("member access not supported on {}", other.type_name()).into())
            }
        }
    }

    fn eval_hash_literal(
        &mut self,
        pairs: &[(Expression, Expression)],
        env: &Environment,
    ) -> Value {
        let mut map = HashValue::new();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expression(key_expr, env);
            if key.is_error() {
                return key;
            }
            let Some(hash_key) = key.hash_key() else {
                return Value::Error(
                    format!("unusable as hash key: {}", key.type_name()).into(),
                );
            };
            let value = self.eval_expression(value_expr, env);
            if value.is_error() {
                return value;
            }
            map.insert(hash_key, (key, value));
        }
        Value::Hash(Rc::new(std::cell::RefCell::new(map)))
    }

    fn eval_while(&mut self, ws: &WhileStatement, env: &Environment) -> Value {
        let mut result = Value::Null;
        loop {
            let condition = self.eval_expression(&ws.condition, env);
            if condition.is_error() {
                return condition;
            }
            if !condition.is_truthy() {
                break;
            }
            result = self.eval_block(&ws.body, env);
            match result {
                Value::ReturnValue(_) | Value::Error(_) => return result,
                Value::BreakValue => break,
                Value::ContinueValue => continue,
                _ => {}
            }
        }
        result
    }

    /// Loop-local: `init` lives in `scope_env`, which is reused across
    /// iterations (not re-childed per iteration), so `continue` still runs
    /// `increment` before the next condition check (§4.3 `for`).
    fn eval_for(&mut self, fs: &ForStatement, env: &Environment) -> Value {
        let scope_env = Environment::child(env);
        let init_result = self.eval_statement(&fs.init, &scope_env);
        if init_result.is_error() {
            return init_result;
        }
        loop {
            let condition = self.eval_expression(&fs.condition, &scope_env);
            if condition.is_error() {
                return condition;
            }
            if !condition.is_truthy() {
                break;
            }
            let body_result = self.eval_block(&fs.body, &scope_env);
            match body_result {
                Value::ReturnValue(_) | Value::Error(_) => return body_result,
                Value::BreakValue => break,
                Value::ContinueValue => {
                    let inc = self.eval_expression(&fs.increment, &scope_env);
                    if inc.is_error() {
                        return inc;
                    }
                    continue;
                }
                _ => {}
            }
            let inc = self.eval_expression(&fs.increment, &scope_env);
            if inc.is_error() {
                return inc;
            }
        }
        Value::Null
    }

    fn eval_for_in(&mut self, fis: &ForInStatement, env: &Environment) -> Value {
        let iterable = self.eval_expression(&fis.iterable, env);
        if iterable.is_error() {
            return iterable;
        }
        let elements: Vec<Value> = match &iterable {
            Value::Array(elements) => elements.borrow().clone(),
            Value::String(s) => s.chars().map(|c| Value::String(Rc::from(c.to_string()))).collect(),
            other => {
                return Value::Error(
                    format!("for..in loop not supported for type {}", other.type_name()).into(),
                )
            }
        };
        let scope_env = Environment::child(env);
        let result = Value::Null;
        for element in elements {
            scope_env.set(fis.iterator.name, element);
            let body_result = self.eval_block(&fis.body, &scope_env);
            match body_result {
                Value::ReturnValue(_) | Value::Error(_) => return body_result,
                Value::BreakValue => break,
                Value::ContinueValue => continue,
                _ => {}
            }
        }
        result
    }

    fn eval_class_statement(&mut self, cs: &ClassStatement, env: &Environment) -> Value {
        let superclass = match &cs.superclass {
            Some(name) => match env.get(name.name) {
                Some(Value::Class(c)) => Some(c),
                _ => return Value::Error("Superclass must be a class.".into()),
            },
            None => None,
        };

        let class_env = Environment::child(env);
        let class = Rc::new(ClassValue {
            name: cs.name.name,
            superclass,
            methods: std::cell::RefCell::new(rustc_hash::FxHashMap::default()),
        });
        class_env.set(cs.name.name, Value::Class(class.clone()));

        for stmt in &cs.body.statements {
            match stmt {
                Statement::Expression(expr_stmt) => match &expr_stmt.expression {
                    Expression::Function(literal) => {
                        let Some(name) = &literal.name else {
                            return Value::Error(
                                "Only functions and pass statements are allowed inside a class body.".into(),
                            );
                        };
                        let function = Rc::new(FunctionValue {
                            literal: Rc::new(literal.clone()),
                            env: class_env.clone(),
                        });
                        class.methods.borrow_mut().insert(name.name, function);
                    }
                    _ => {
                        return Value::Error(
                            "Only functions and pass statements are allowed inside a class body."
                                .into(),
                        )
                    }
                },
                Statement::Pass(_) => {}
                _ => {
                    return Value::Error(
                        "Only functions and pass statements are allowed inside a class body."
                            .into(),
                    )
                }
            }
        }

        env.set(cs.name.name, Value::Class(class));
        Value::Null
    }

    /// Dispatches on the callee variant (§4.3 Calls). `super` is bound in
    /// the bound-method call frame to the receiver's class's superclass,
    /// resolving the source's half-wired `super` (§9).
    pub(crate) fn apply_function(&mut self, func: Value, args: Vec<Value>) -> Value {
        match func {
            Value::Function(f) => self.call_function(&f, args, None),
            Value::BoundMethod(bm) => self.call_function(&bm.function, args, Some(bm.receiver.clone())),
            Value::Builtin(b) => builtins::call_builtin(self, b.name, args),
            Value::Class(class) => {
                let instance = Rc::new(InstanceValue {
                    class: class.clone(),
                    fields: std::cell::RefCell::new(rustc_hash::FxHashMap::default()),
                });
                if let Some(init) = class.methods.borrow().get(&Symbol::intern("init")).cloned() {
                    self.call_function(&init, args, Some(instance.clone()));
                }
                Value::Instance(instance)
            }
            other => Value::Error(format!("not a function: {}", other.type_name()).into()),
        }
    }

    fn call_function(
        &mut self,
        function: &Rc<FunctionValue>,
        args: Vec<Value>,
        receiver: Option<Rc<InstanceValue>>,
    ) -> Value {
        let call_env = Environment::child(&function.env);
        let mut params = function.literal.parameters.iter();
        if let Some(receiver) = &receiver {
            if let Some(first) = params.next() {
                call_env.set(first.name, Value::Instance(receiver.clone()));
                call_env.set(Symbol::intern("self"), Value::Instance(receiver.clone()));
            }
            if let Some(superclass) = &receiver.class.superclass {
                call_env.set(Symbol::intern("super"), Value::Class(superclass.clone()));
            }
        }
        for (param, arg) in params.zip(args) {
            call_env.set(param.name, arg);
        }
        let result = self.eval_block(&function.literal.body, &call_env);
        match result {
            Value::ReturnValue(inner) => *inner,
            other => other,
        }
    }
}

fn strip_assign_suffix(op: &str) -> &str {
    op.strip_suffix('=').unwrap_or(op)
}

fn unsupported(kind: &str) -> Value {
    Value::Error(format!("unsupported construct: {}", kind.to_uppercase()).into())
}

fn expr_type_name(expr: &Expression) -> &'static str {
    match expr {
        Expression::Identifier(_) => "Identifier",
        _ => "Expression",
    }
}

fn eval_radix_literal(digits: &str, radix: u32) -> Value {
    match i64::from_str_radix(digits, radix) {
        Ok(v) => Value::Integer(v),
        Err(_) => Value::Error(format!("could not parse {digits} as base-{radix} integer").into()),
    }
}

fn lookup_member(instance: &Rc<InstanceValue>, name: Symbol) -> Option<Value> {
    if let Some(v) = instance.fields.borrow().get(&name) {
        return Some(v.clone());
    }
    if let Some(f) = instance.class.methods.borrow().get(&name) {
        return Some(Value::Function(f.clone()));
    }
    if let Some(superclass) = &instance.class.superclass {
        if let Some(f) = superclass.methods.borrow().get(&name) {
            return Some(Value::Function(f.clone()));
        }
    }
    None
}

/// `!` negates truthiness; `-`/`~` require Integer/Float and Integer
/// respectively (§4.3 Prefix).
fn eval_prefix(operator: &str, right: Value) -> Value {
    match operator {
        "!" => Value::Boolean(!right.is_truthy()),
        "-" => match right {
            Value::Integer(v) => Value::Integer(v.wrapping_neg()),
            Value::Float(v) => Value::Float(-v),
            other => {
                Value::Error(format!("unknown operator: -{}", other.type_tag_upper()).into())
            }
        },
        "~" => match right {
            Value::Integer(v) => Value::Integer(!v),
            other => {
                Value::Error(format!("unknown operator: ~{}", other.type_tag_upper()).into())
            }
        },
        _ => Value::Error(
            format!("unknown operator: {}{}", operator, right.type_tag_upper()).into(),
        ),
    }
}

/// Member access (`.`) is dispatched separately with an unevaluated RHS
/// (§4.3); every other infix operator arrives here with both sides already
/// evaluated.
fn eval_infix(operator: &str, left: Value, right: Value) -> Value {
    if matches!(left, Value::Integer(_) | Value::Float(_))
        && matches!(right, Value::Integer(_) | Value::Float(_))
    {
        return eval_numeric_infix(operator, &left, &right);
    }
    if let (Value::String(a), Value::String(b)) = (&left, &right) {
        return eval_string_infix(operator, a, b);
    }
    if left.type_name() != right.type_name() && operator != "==" && operator != "!=" {
        return Value::Error(
            format!(
                "type mismatch: {} {} {}",
                left.type_tag_upper(),
                operator,
                right.type_tag_upper()
            )
            .into(),
        );
    }
    match operator {
        "==" => Value::Boolean(left.structural_eq(&right)),
        "!=" => Value::Boolean(!left.structural_eq(&right)),
        _ => Value::Error(
            format!(
                "unknown operator: {} {} {}",
                left.type_tag_upper(),
                operator,
                right.type_tag_upper()
            )
            .into(),
        ),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Value {
    match operator {
        "+" => Value::String(Rc::from(format!("{left}{right}"))),
        _ => Value::Error(format!("unknown operator: String {operator} String").into()),
    }
}

/// Type-promotion: if either operand is Float the result is Float, except
/// `//`, `&`, `|`, `^`, `<<`, `>>` which require Integer on both sides and
/// always return Integer; `/` always returns Float (§4.3 Infix).
fn eval_numeric_infix(operator: &str, left: &Value, right: &Value) -> Value {
    let l = as_f64(left);
    let r = as_f64(right);
    let is_float = matches!(left, Value::Float(_)) || matches!(right, Value::Float(_));
    let integer_only = matches!(operator, "//" | "&" | "|" | "^" | "<<" | ">>");

    if integer_only && is_float {
        return Value::Error(
            format!(
                "unknown operator: {} {} {}",
                left.type_tag_upper(),
                operator,
                right.type_tag_upper()
            )
            .into(),
        );
    }

    match operator {
        "/" => {
            if r == 0.0 {
                Value::Error("division by zero".into())
            } else {
                Value::Float(l / r)
            }
        }
        "//" => {
            let (li, ri) = (as_i64(left), as_i64(right));
            if ri == 0 {
                Value::Error("division by zero".into())
            } else {
                Value::Integer(floor_div(li, ri))
            }
        }
        "&" => Value::Integer(as_i64(left) & as_i64(right)),
        "|" => Value::Integer(as_i64(left) | as_i64(right)),
        "^" => Value::Integer(as_i64(left) ^ as_i64(right)),
        "<<" => Value::Integer(as_i64(left).wrapping_shl(as_i64(right) as u32)),
        ">>" => Value::Integer(as_i64(left).wrapping_shr(as_i64(right) as u32)),
        ">" => Value::Boolean(l > r),
        "<" => Value::Boolean(l < r),
        ">=" => Value::Boolean(l >= r),
        "<=" => Value::Boolean(l <= r),
        "==" => Value::Boolean(l == r),
        "!=" => Value::Boolean(l != r),
        "+" | "-" | "*" | "%" | "**" => {
            if is_float {
                Value::Float(match operator {
                    "+" => l + r,
                    "-" => l - r,
                    "*" => l * r,
                    "%" => float_floor_rem(l, r),
                    "**" => l.powf(r),
                    _ => unreachable!(),
                })
            } else {
                let (li, ri) = (as_i64(left), as_i64(right));
                match operator {
                    "+" => Value::Integer(li.wrapping_add(ri)),
                    "-" => Value::Integer(li.wrapping_sub(ri)),
                    "*" => Value::Integer(li.wrapping_mul(ri)),
                    "%" => {
                        if ri == 0 {
                            Value::Error("division by zero".into())
                        } else {
                            Value::Integer(floor_rem(li, ri))
                        }
                    }
                    "**" => {
                        if ri >= 0 {
                            Value::Integer(li.wrapping_pow(ri as u32))
                        } else {
                            Value::Float(l.powf(r))
                        }
                    }
                    _ => unreachable!(),
                }
            }
        }
        _ => Value::Error(
            format!(
                "unknown operator: {} {} {}",
                left.type_tag_upper(),
                operator,
                right.type_tag_upper()
            )
            .into(),
        ),
    }
}

pub(crate) fn as_f64(v: &Value) -> f64 {
    match v {
        Value::Integer(i) => *i as f64,
        Value::Float(f) => *f,
        _ => 0.0,
    }
}

pub(crate) fn as_i64(v: &Value) -> i64 {
    match v {
        Value::Integer(i) => *i,
        Value::Float(f) => *f as i64,
        _ => 0,
    }
}

/// `//` rounds toward negative infinity, not toward zero (§4.1), so a
/// truncating `wrapping_div` needs a -1 correction whenever the remainder
/// is nonzero and the operand signs differ.
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a.wrapping_div(b);
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        q.wrapping_sub(1)
    } else {
        q
    }
}

/// Floored `%`: the result takes the sign of the divisor, matching
/// Python's `%` rather than Rust's truncating `wrapping_rem`.
fn floor_rem(a: i64, b: i64) -> i64 {
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        r.wrapping_add(b)
    } else {
        r
    }
}

/// Floored `%` for floats: same sign-follows-divisor correction as
/// [`floor_rem`], applied to Rust's truncating float remainder.
fn float_floor_rem(l: f64, r: f64) -> f64 {
    let rem = l % r;
    if rem != 0.0 && (rem < 0.0) != (r < 0.0) {
        rem + r
    } else {
        rem
    }
}

fn eval_index(left: Value, index: Value) -> Value {
    match (&left, &index) {
        (Value::Array(elements), Value::Integer(i)) => {
            let elements = elements.borrow();
            if *i >= 0 && (*i as usize) < elements.len() {
                elements[*i as usize].clone()
            } else {
                Value::Null
            }
        }
        (Value::Hash(pairs), _) => match index.hash_key() {
            Some(key) => pairs.borrow().get(&key).map(|(_, v)| v.clone()).unwrap_or(Value::Null),
            None => Value::Null,
        },
        _ => Value::Error(format!("index operator not supported: {}", left.type_name()).into()),
    }
}
