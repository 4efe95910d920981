//! Runtime value model (§3, §4.3).
//!
//! `Value` is a tagged union over the evaluator's runtime objects plus four
//! control sentinels (`ReturnValue`, `BreakValue`, `ContinueValue`, `Error`)
//! used to unwind the tree-walking evaluator without host exceptions. The
//! sentinels must never escape into a container or a binding — every call
//! site that stores a `Value` (array push, hash insert, `let`) operates on
//! values that have already had their sentinel-ness checked upstream.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use rill_par::ast::FunctionLiteral;
use rill_util::Symbol;

use crate::environment::Environment;

#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(Rc<str>),
    Null,
    Array(Rc<RefCell<Vec<Value>>>),
    Hash(Rc<RefCell<HashValue>>),
    Function(Rc<FunctionValue>),
    Builtin(Builtin),
    Class(Rc<ClassValue>),
    Instance(Rc<InstanceValue>),
    BoundMethod(Rc<BoundMethodValue>),
    /// Reserved per the value model (§3); never constructed, since import
    /// evaluation is rejected outright (§9 open questions).
    Module(Rc<ModuleValue>),
    ReturnValue(Box<Value>),
    BreakValue,
    ContinueValue,
    Error(Rc<str>),
}

/// A hash's key domain: Integer, Float, Boolean, String, Null (§3). `Float`
/// hashes/compares on its bit pattern since `f64` has no `Eq`/`Hash` impl —
/// this is the runtime hash table's key, not IEEE-754 equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Float(u64),
    Boolean(bool),
    String(Rc<str>),
    Null,
}

/// Insertion-order-preserving map from hash-key to the original `(key,
/// value)` pair — both the key that produced the hash and the bound value
/// are kept, since `inspect()` must print the original key (§4.3).
pub type HashValue = IndexMap<HashKey, (Value, Value)>;

pub struct FunctionValue {
    pub literal: Rc<FunctionLiteral>,
    pub env: Environment,
}

pub struct ClassValue {
    pub name: Symbol,
    pub superclass: Option<Rc<ClassValue>>,
    pub methods: RefCell<rustc_hash::FxHashMap<Symbol, Rc<FunctionValue>>>,
}

pub struct InstanceValue {
    pub class: Rc<ClassValue>,
    pub fields: RefCell<rustc_hash::FxHashMap<Symbol, Value>>,
}

/// Holds a strong reference to its receiver (§3 invariants); the resulting
/// instance → class → method → captured-env → instance cycle is tolerated
/// for the run's lifetime (§9).
pub struct BoundMethodValue {
    pub function: Rc<FunctionValue>,
    pub receiver: Rc<InstanceValue>,
}

pub struct ModuleValue {
    pub name: Symbol,
    pub env: Environment,
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
}

impl Value {
    pub const NULL: Value = Value::Null;

    pub fn boolean(b: bool) -> Value {
        Value::Boolean(b)
    }

    /// NULL and FALSE are falsy; everything else is truthy (§4.3).
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// The Python-source class-name spelling, used both by the `type`
    /// built-in and by argument-type error messages (§4.3's builtin
    /// table); `.to_uppercase()` on this is what the prefix/infix
    /// operator error templates use (e.g. `unknown operator: -BOOLEAN`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Boolean(_) => "Boolean",
            Value::String(_) => "String",
            Value::Null => "Null",
            Value::Array(_) => "Array",
            Value::Hash(_) => "Hash",
            Value::Function(_) => "Function",
            Value::Builtin(_) => "Builtin",
            Value::Class(_) => "Class",
            Value::Instance(_) => "Instance",
            Value::BoundMethod(_) => "BoundMethod",
            Value::Module(_) => "Module",
            Value::ReturnValue(_) => "ReturnValue",
            Value::BreakValue => "BreakValue",
            Value::ContinueValue => "ContinueValue",
            Value::Error(_) => "Error",
        }
    }

    pub fn type_tag_upper(&self) -> String {
        self.type_name().to_uppercase()
    }

    /// The structured `(type-tag, scalar)` hash key (§3); `None` for
    /// non-hashable variants (Array, Hash, Function, ...).
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(v) => Some(HashKey::Integer(*v)),
            Value::Float(v) => Some(HashKey::Float(v.to_bits())),
            Value::Boolean(v) => Some(HashKey::Boolean(*v)),
            Value::String(s) => Some(HashKey::String(s.clone())),
            Value::Null => Some(HashKey::Null),
            _ => None,
        }
    }

    /// The canonical string form (§4.3 `inspect`).
    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Boolean(v) => v.to_string(),
            Value::String(s) => s.to_string(),
            Value::Null => "null".to_string(),
            Value::Array(elements) => {
                let items: Vec<String> = elements.borrow().iter().map(Value::inspect).collect();
                format!("[{}]", items.join(", "))
            }
            Value::Hash(pairs) => {
                let items: Vec<String> = pairs
                    .borrow()
                    .values()
                    .map(|(k, v)| format!("{}: {}", k.inspect(), v.inspect()))
                    .collect();
                format!("{{{}}}", items.join(", "))
            }
            Value::Function(f) => {
                let params: Vec<&str> = f
                    .literal
                    .parameters
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect();
                format!("fn({}) {{...}}", params.join(", "))
            }
            Value::Builtin(_) => "builtin function".to_string(),
            Value::Class(c) => c.name.as_str().to_string(),
            Value::Instance(i) => format!("{} instance", i.class.name),
            Value::BoundMethod(_) => "bound method".to_string(),
            Value::Module(m) => format!("module '{}'", m.name),
            Value::ReturnValue(v) => v.inspect(),
            Value::BreakValue => "break".to_string(),
            Value::ContinueValue => "continue".to_string(),
            Value::Error(message) => format!("ERROR: {message}"),
        }
    }

    /// Structural equality, used by `==`/`!=` (§4.3 "equality is structural
    /// within a variant"): mixed-variant comparisons are simply unequal
    /// rather than an error. Array/Hash compare elementwise, matching the
    /// source's dataclass-derived field equality; Function/Class/Instance/
    /// BoundMethod/Module fall back to reference identity, since their
    /// source-side field equality recurses into captured environments that
    /// have no meaningful value equality of their own.
    pub fn structural_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Array(a), Value::Array(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.structural_eq(y))
            }
            (Value::Hash(a), Value::Hash(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().all(|(k, (_, v))| {
                        b.get(k).is_some_and(|(_, bv)| v.structural_eq(bv))
                    })
            }
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::BoundMethod(a), Value::BoundMethod(b)) => Rc::ptr_eq(a, b),
            (Value::Module(a), Value::Module(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Doc-comment-only `Debug` used for panic messages in internal assertions;
/// not on the evaluator's hot path.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), self.inspect())
    }
}
