//! Symbol module - string interning for identifier handling.
//!
//! [`Symbol`] is a compact handle to an interned string. Identifiers appear
//! repeatedly across a program (the same variable name read at every use
//! site), so interning turns repeated string comparisons into index
//! comparisons and lets `Environment` key its frames on a `Copy` type.
//!
//! The interpreter is single-threaded end to end (§5), so unlike a
//! compiler's concurrent symbol table this one is a plain `RefCell`-guarded
//! table with no locking.

use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// A compact, `Copy` handle to an interned string.
///
/// Two symbols compare equal iff the strings they were interned from are
/// equal; comparison never touches the underlying string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

thread_local! {
    static INTERNER: RefCell<Interner> = RefCell::new(Interner::new());
}

struct Interner {
    strings: Vec<&'static str>,
    names: FxHashMap<&'static str, u32>,
}

impl Interner {
    fn new() -> Self {
        Self {
            strings: Vec::new(),
            names: FxHashMap::default(),
        }
    }

    fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&id) = self.names.get(s) {
            return Symbol(id);
        }
        let id = self.strings.len() as u32;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        self.strings.push(leaked);
        self.names.insert(leaked, id);
        Symbol(id)
    }

    fn resolve(&self, sym: Symbol) -> &'static str {
        self.strings[sym.0 as usize]
    }
}

impl Symbol {
    /// Intern `s`, returning the existing symbol if it was already interned.
    pub fn intern(s: &str) -> Self {
        INTERNER.with(|i| i.borrow_mut().intern(s))
    }

    /// The original string this symbol was interned from.
    ///
    /// Interned strings are leaked for the process lifetime (§3: an
    /// interpreter run has no persisted state to reclaim them for), so this
    /// borrow is valid for as long as the symbol is.
    pub fn as_str(&self) -> &'static str {
        INTERNER.with(|i| i.borrow().resolve(*self))
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_interns_to_same_symbol() {
        let a = Symbol::intern("foo");
        let b = Symbol::intern("foo");
        assert_eq!(a, b);
    }

    #[test]
    fn different_strings_intern_differently() {
        let a = Symbol::intern("foo");
        let b = Symbol::intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn as_str_round_trips() {
        let s = Symbol::intern("identifier_name");
        assert_eq!(s.as_str(), "identifier_name");
    }

    #[quickcheck_macros::quickcheck]
    fn intern_round_trip(s: String) -> bool {
        Symbol::intern(&s).as_str() == s
    }
}
